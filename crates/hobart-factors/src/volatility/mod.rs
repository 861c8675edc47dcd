//! Volatility factors - trailing dispersion of returns and prices

pub mod price_zscore;
pub mod return_vol;

pub use price_zscore::PriceZScore;
pub use return_vol::ReturnVolatility;
