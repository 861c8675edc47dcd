#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/hobart/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod engine;
pub mod error;
pub mod frame;
pub mod label;
pub mod liquidity;
pub mod momentum;
pub mod registry;
pub mod traits;
pub mod validate;
pub mod volatility;
pub mod window;

pub use engine::FactorEngine;
pub use error::{FactorError, Result};
pub use frame::{FactorColumn, FactorFrame, FactorRow, Features, Label};
pub use registry::{FactorInfo, available_factors, factors_by_kind, get_factor_info};
pub use traits::{Factor, FactorKind, TickerHistory};
pub use validate::{FactorValidationConfig, validate_factors};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
