//! Data module - indicator fetching and trade CSV loading

mod indicators;
mod trade;
mod world_bank;

pub use indicators::{
    FetchError, IndicatorSource, IndicatorTable, Observation, YearSeries, YearlyIndicatorRow,
};
pub use trade::{SkipReason, TradeData, TradeLoadError, TradeLoader, TradeRow, TradeType};
pub use world_bank::WorldBankClient;
