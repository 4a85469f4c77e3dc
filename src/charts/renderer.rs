//! Static Chart Renderer
//! Renders report figures to PNG bytes with plotters, for export.
//!
//! Layout:
//! 1. Title centred at the top
//! 2. Scatter: axes with labels, one dot per year, dashed trend line
//! 3. Flow: import column, country node, export column, labelled with values

use super::flow::{FlowGraph, NodeColor};
use super::sankey::SankeyLayout;
use crate::data::{IndicatorTable, TradeType};
use crate::stats::TrendLine;
use image::{ImageFormat, RgbImage};
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::io::Cursor;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Chart rendering failed: {0}")]
    Render(String),
    #[error("PNG encoding failed: {0}")]
    Image(#[from] image::ImageError),
    #[error("Failed to write file: {0}")]
    Io(#[from] std::io::Error),
}

fn render_err<E: std::fmt::Display>(e: E) -> ExportError {
    ExportError::Render(e.to_string())
}

fn rgb(c: egui::Color32) -> RGBColor {
    RGBColor(c.r(), c.g(), c.b())
}

const FONT: &str = "sans-serif";
const BAND_STEPS: usize = 32;
const LABEL_GUTTER: i32 = 220;

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Scatter of (unemployment, inflation) per year with the optional trend line.
    pub fn render_scatter_png(
        table: &IndicatorTable,
        trend: Option<&TrendLine>,
        title: &str,
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>, ExportError> {
        let first = table.rows.first().map(|r| r.year).unwrap_or_default();
        let last = table.rows.last().map(|r| r.year).unwrap_or_default();
        let points: Vec<(f64, f64, i32)> = table
            .rows
            .iter()
            .filter_map(|r| r.pair().map(|(x, y)| (x, y, r.year)))
            .collect();
        let (x_range, y_range) = Self::padded_bounds(&points);

        let mut buffer = vec![255u8; (width * height * 3) as usize];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            root.fill(&WHITE).map_err(render_err)?;

            let mut chart = ChartBuilder::on(&root)
                .caption(title, (FONT, 24))
                .margin(20)
                .x_label_area_size(45)
                .y_label_area_size(55)
                .build_cartesian_2d(x_range, y_range)
                .map_err(render_err)?;

            chart
                .configure_mesh()
                .x_desc("Unemployment Rate (%)")
                .y_desc("Inflation (CPI %)")
                .light_line_style(RGBColor(235, 235, 235).stroke_width(1))
                .draw()
                .map_err(render_err)?;

            chart
                .draw_series(points.iter().map(|&(x, y, year)| {
                    let color = rgb(super::ChartPlotter::year_color(year, first, last));
                    Circle::new((x, y), 6, color.filled())
                }))
                .map_err(render_err)?;

            if let Some(trend) = trend {
                let style = rgb(super::plotter::TREND_COLOR).stroke_width(2);
                chart
                    .draw_series(DashedLineSeries::new(
                        trend.sample_points.iter().copied(),
                        10,
                        6,
                        style,
                    ))
                    .map_err(render_err)?
                    .label("Trend Line")
                    .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));

                chart
                    .configure_series_labels()
                    .background_style(&WHITE.mix(0.8))
                    .border_style(&BLACK)
                    .draw()
                    .map_err(render_err)?;
            }

            root.present().map_err(render_err)?;
        }

        Self::encode_png(buffer, width, height)
    }

    /// Flow diagram with node labels and values.
    pub fn render_sankey_png(
        graph: &FlowGraph,
        title: &str,
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>, ExportError> {
        let mut buffer = vec![255u8; (width * height * 3) as usize];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            root.fill(&WHITE).map_err(render_err)?;

            root.draw(&Text::new(
                title.to_string(),
                (width as i32 / 2, 16),
                (FONT, 24)
                    .into_font()
                    .color(&BLACK)
                    .pos(Pos::new(HPos::Center, VPos::Top)),
            ))
            .map_err(render_err)?;

            let top = 70;
            let plot_w = width as i32 - 2 * LABEL_GUTTER;
            let plot_h = height as i32 - top - 20;
            let layout = SankeyLayout::compute(graph, plot_w as f32, plot_h as f32);
            let at = |x: f32, y: f32| (LABEL_GUTTER + x.round() as i32, top + y.round() as i32);

            for link in &layout.links {
                let color = match graph.edges[link.edge].side {
                    TradeType::Import => RGBColor(239, 68, 68).mix(0.4),
                    TradeType::Export => RGBColor(34, 197, 94).mix(0.4),
                };
                let outline: Vec<(i32, i32)> = link
                    .outline(BAND_STEPS)
                    .into_iter()
                    .map(|(x, y)| at(x, y))
                    .collect();
                root.draw(&Polygon::new(outline, color.filled()))
                    .map_err(render_err)?;
            }

            for node in &layout.nodes {
                let meta = &graph.nodes[node.index];
                let color = rgb(super::ChartPlotter::node_color(meta.color));
                let (x0, y0) = at(node.x, node.y);
                let (x1, y1) = at(node.x + node.width, node.y + node.height.max(1.0));
                root.draw(&Rectangle::new([(x0, y0), (x1, y1)], color.filled()))
                    .map_err(render_err)?;

                let label = format!("{} (${:.1}B)", meta.label, graph.node_throughput(node.index));
                let mid = (y0 + y1) / 2;
                let (pos, anchor, style_color) = match meta.color {
                    NodeColor::Import => ((x0 - 6, mid), Pos::new(HPos::Right, VPos::Center), BLACK),
                    NodeColor::Export => ((x1 + 6, mid), Pos::new(HPos::Left, VPos::Center), BLACK),
                    NodeColor::Country => {
                        (((x0 + x1) / 2, y0 - 6), Pos::new(HPos::Center, VPos::Bottom), color)
                    }
                };
                root.draw(&Text::new(
                    label,
                    pos,
                    (FONT, 15).into_font().color(&style_color).pos(anchor),
                ))
                .map_err(render_err)?;
            }

            root.present().map_err(render_err)?;
        }

        Self::encode_png(buffer, width, height)
    }

    fn padded_bounds(
        points: &[(f64, f64, i32)],
    ) -> (std::ops::Range<f64>, std::ops::Range<f64>) {
        if points.is_empty() {
            return (0.0..10.0, 0.0..10.0);
        }
        let fold = |f: fn(&(f64, f64, i32)) -> f64| {
            points
                .iter()
                .map(f)
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                    (lo.min(v), hi.max(v))
                })
        };
        let pad = |(lo, hi): (f64, f64)| {
            let margin = ((hi - lo) * 0.1).max(0.5);
            (lo - margin)..(hi + margin)
        };
        (pad(fold(|p| p.0)), pad(fold(|p| p.1)))
    }

    fn encode_png(buffer: Vec<u8>, width: u32, height: u32) -> Result<Vec<u8>, ExportError> {
        let image = RgbImage::from_raw(width, height, buffer)
            .ok_or_else(|| ExportError::Render("buffer size mismatch".to_string()))?;
        let mut bytes = Cursor::new(Vec::new());
        image.write_to(&mut bytes, ImageFormat::Png)?;
        Ok(bytes.into_inner())
    }
}
