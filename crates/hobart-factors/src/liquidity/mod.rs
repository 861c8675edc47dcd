//! Liquidity factors - traded volume and dollar volume

pub mod adv;
pub mod dollar_volume;

pub use adv::AverageDailyVolume;
pub use dollar_volume::DollarVolume;
