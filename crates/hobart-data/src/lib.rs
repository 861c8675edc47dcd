#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/hobart/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod dates;
pub mod error;
pub mod loader;
pub mod panel;
pub mod source;
pub mod validate;

pub use error::{DataError, Result};
pub use loader::load_prices;
pub use panel::{PRICE_COLUMNS, PricePanel, PricePoint, REQUIRED_COLUMNS, TickerPartition};
pub use source::{CsvPriceSource, FramePriceSource, ParquetPriceSource, PriceSource, open_source};
pub use validate::validate_prices;

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
