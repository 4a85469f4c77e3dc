//! Flow Graph Builder
//! Turns trade rows into Sankey nodes and edges around a single country node.

use crate::data::TradeType;
use crate::stats::TradePartition;

/// Role of a node in the flow diagram; drives its colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeColor {
    Import,
    Country,
    Export,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlowNode {
    pub label: String,
    pub color: NodeColor,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlowEdge {
    pub source: usize,
    pub target: usize,
    pub value: f64,
    pub side: TradeType,
}

/// Nodes ordered imports, country, exports; edges one per trade row.
#[derive(Debug, Clone, Default)]
pub struct FlowGraph {
    pub nodes: Vec<FlowNode>,
    pub edges: Vec<FlowEdge>,
}

impl FlowGraph {
    /// Build the graph. Duplicate categories stay separate nodes.
    pub fn build(partition: &TradePartition, country_label: &str) -> Self {
        let country = partition.imports.len();
        let mut nodes = Vec::with_capacity(partition.imports.len() + 1 + partition.exports.len());
        let mut edges = Vec::with_capacity(partition.imports.len() + partition.exports.len());

        for (i, row) in partition.imports.iter().enumerate() {
            nodes.push(FlowNode {
                label: row.category.clone(),
                color: NodeColor::Import,
            });
            edges.push(FlowEdge {
                source: i,
                target: country,
                value: row.value,
                side: TradeType::Import,
            });
        }

        nodes.push(FlowNode {
            label: country_label.to_string(),
            color: NodeColor::Country,
        });

        for (i, row) in partition.exports.iter().enumerate() {
            nodes.push(FlowNode {
                label: row.category.clone(),
                color: NodeColor::Export,
            });
            edges.push(FlowEdge {
                source: country,
                target: country + 1 + i,
                value: row.value,
                side: TradeType::Export,
            });
        }

        Self { nodes, edges }
    }

    /// Index of the single country node.
    pub fn country_index(&self) -> Option<usize> {
        self.nodes.iter().position(|n| n.color == NodeColor::Country)
    }

    /// Sum of edge values on one side.
    pub fn side_total(&self, side: TradeType) -> f64 {
        self.edges
            .iter()
            .filter(|e| e.side == side)
            .map(|e| e.value)
            .sum()
    }

    /// Flow passing through a node: incoming or outgoing, whichever is larger.
    pub fn node_throughput(&self, index: usize) -> f64 {
        let incoming: f64 = self.edges.iter().filter(|e| e.target == index).map(|e| e.value).sum();
        let outgoing: f64 = self.edges.iter().filter(|e| e.source == index).map(|e| e.value).sum();
        incoming.max(outgoing)
    }
}
