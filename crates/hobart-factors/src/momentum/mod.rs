//! Momentum factors - trailing price changes
//!
//! All momentum factors are ratios of the current adjusted close to an
//! earlier one, over a window counted in trading days.

pub mod daily_return;
pub mod price_momentum;

pub use daily_return::DailyReturn;
pub use price_momentum::PriceMomentum;
