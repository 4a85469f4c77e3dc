//! Charts module - flow graph construction and chart rendering

mod flow;
mod plotter;
mod renderer;
mod sankey;

pub use flow::FlowGraph;
pub use plotter::ChartPlotter;
pub use renderer::{ExportError, StaticChartRenderer};
