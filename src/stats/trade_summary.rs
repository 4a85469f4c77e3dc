//! Trade Summary Module
//! Totals, balance and top categories per trade side.

use crate::data::{TradeRow, TradeType};

/// Rows listed per side in the "top categories" view.
pub const TOP_N: usize = 3;

/// Trade rows split by direction, each keeping file order.
#[derive(Debug, Clone, Default)]
pub struct TradePartition {
    pub imports: Vec<TradeRow>,
    pub exports: Vec<TradeRow>,
}

impl TradePartition {
    pub fn from_rows(rows: &[TradeRow]) -> Self {
        let (imports, exports) = rows
            .iter()
            .cloned()
            .partition(|row| row.trade_type == TradeType::Import);
        Self { imports, exports }
    }
}

/// A category present on both sides with its net position.
#[derive(Debug, Clone, PartialEq)]
pub struct DualCategory {
    pub category: String,
    pub imported: f64,
    pub exported: f64,
}

impl DualCategory {
    /// Positive means net importer.
    pub fn net_imports(&self) -> f64 {
        self.imported - self.exported
    }
}

#[derive(Debug, Clone)]
pub struct TradeSummary {
    pub total_imports: f64,
    pub total_exports: f64,
    /// `total_imports - total_exports`; negative means surplus.
    pub deficit: f64,
    pub top_imports: Vec<TradeRow>,
    pub top_exports: Vec<TradeRow>,
}

impl TradeSummary {
    pub fn is_surplus(&self) -> bool {
        self.deficit < 0.0
    }
}

pub struct SummaryAggregator;

impl SummaryAggregator {
    pub fn summarize(partition: &TradePartition) -> TradeSummary {
        let total_imports = Self::total(&partition.imports);
        let total_exports = Self::total(&partition.exports);

        TradeSummary {
            total_imports,
            total_exports,
            deficit: total_imports - total_exports,
            top_imports: Self::top_n(&partition.imports, TOP_N),
            top_exports: Self::top_n(&partition.exports, TOP_N),
        }
    }

    pub fn total(rows: &[TradeRow]) -> f64 {
        rows.iter().map(|row| row.value).sum()
    }

    /// Highest `n` rows by value; equal values keep their original order.
    pub fn top_n(rows: &[TradeRow], n: usize) -> Vec<TradeRow> {
        let mut ranked = Self::sorted_desc(rows);
        ranked.truncate(n);
        ranked
    }

    /// All rows by value descending, stable on ties.
    pub fn sorted_desc(rows: &[TradeRow]) -> Vec<TradeRow> {
        let mut sorted = rows.to_vec();
        // sort_by is stable, so first-seen wins on ties
        sorted.sort_by(|a, b| {
            b.value
                .partial_cmp(&a.value)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        sorted
    }

    /// Categories appearing on both sides, in import order, values summed per side.
    pub fn dual_categories(partition: &TradePartition) -> Vec<DualCategory> {
        let mut duals: Vec<DualCategory> = Vec::new();
        for row in &partition.imports {
            if duals.iter().any(|d| d.category == row.category) {
                continue;
            }
            let exported: Vec<&TradeRow> = partition
                .exports
                .iter()
                .filter(|e| e.category == row.category)
                .collect();
            if exported.is_empty() {
                continue;
            }
            let imported = partition
                .imports
                .iter()
                .filter(|i| i.category == row.category)
                .map(|i| i.value)
                .sum();
            duals.push(DualCategory {
                category: row.category.clone(),
                imported,
                exported: exported.iter().map(|e| e.value).sum(),
            });
        }
        duals
    }
}
