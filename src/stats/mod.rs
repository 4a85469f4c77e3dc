//! Statistics module - trend fitting and trade aggregation

mod trade_summary;
mod trend;

pub use trade_summary::{DualCategory, SummaryAggregator, TradePartition, TradeSummary};
pub use trend::{TrendEstimator, TrendLine};
