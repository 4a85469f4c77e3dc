//! Chart Plotter Module
//! Draws the interactive scatter and flow charts with egui_plot and egui's painter.

use super::flow::{FlowGraph, NodeColor};
use super::sankey::SankeyLayout;
use crate::data::{IndicatorTable, TradeType};
use crate::stats::TrendLine;
use egui::{Align2, Color32, FontId, Pos2, RichText, Sense, Stroke};
use egui_plot::{Line, LineStyle, Plot, PlotPoints, Points};

pub const IMPORT_COLOR: Color32 = Color32::from_rgb(220, 38, 38); // Red
pub const COUNTRY_COLOR: Color32 = Color32::from_rgb(30, 64, 175); // Blue
pub const EXPORT_COLOR: Color32 = Color32::from_rgb(22, 163, 74); // Green
pub const TREND_COLOR: Color32 = Color32::from_rgb(220, 38, 38);

/// Year gradient stops, early years first.
pub const YEAR_GRADIENT: [Color32; 5] = [
    Color32::from_rgb(13, 8, 135),   // Indigo
    Color32::from_rgb(126, 3, 168),  // Purple
    Color32::from_rgb(204, 71, 120), // Magenta
    Color32::from_rgb(248, 149, 64), // Orange
    Color32::from_rgb(240, 249, 33), // Yellow
];

/// Label column reserved on each side of the flow diagram.
const LABEL_GUTTER: f32 = 190.0;

pub struct ChartPlotter;

impl ChartPlotter {
    /// Colour for `year` within `[first, last]`, interpolated along the gradient.
    pub fn year_color(year: i32, first: i32, last: i32) -> Color32 {
        let t = if last > first {
            ((year - first) as f32 / (last - first) as f32).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let scaled = t * (YEAR_GRADIENT.len() - 1) as f32;
        let lo = scaled.floor() as usize;
        let hi = (lo + 1).min(YEAR_GRADIENT.len() - 1);
        let frac = scaled - lo as f32;
        let (a, b) = (YEAR_GRADIENT[lo], YEAR_GRADIENT[hi]);
        let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * frac).round() as u8;
        Color32::from_rgb(mix(a.r(), b.r()), mix(a.g(), b.g()), mix(a.b(), b.b()))
    }

    pub fn node_color(color: NodeColor) -> Color32 {
        match color {
            NodeColor::Import => IMPORT_COLOR,
            NodeColor::Country => COUNTRY_COLOR,
            NodeColor::Export => EXPORT_COLOR,
        }
    }

    pub fn link_color(side: TradeType) -> Color32 {
        match side {
            TradeType::Import => Color32::from_rgba_unmultiplied(239, 68, 68, 102),
            TradeType::Export => Color32::from_rgba_unmultiplied(34, 197, 94, 102),
        }
    }

    /// Unemployment (x) vs inflation (y), one point per year, with optional trend overlay.
    /// Years missing either value are not drawn.
    pub fn draw_scatter_chart(
        ui: &mut egui::Ui,
        table: &IndicatorTable,
        trend: Option<&TrendLine>,
        height: f32,
    ) {
        let first = table.rows.first().map(|r| r.year).unwrap_or_default();
        let last = table.rows.last().map(|r| r.year).unwrap_or_default();

        Plot::new("phillips_scatter")
            .height(height)
            .x_axis_label("Unemployment Rate (%)")
            .y_axis_label("Inflation (CPI %)")
            .allow_scroll(false)
            .label_formatter(|name, value| {
                if name.is_empty() {
                    format!("Unemployment: {:.2}%\nInflation: {:.2}%", value.x, value.y)
                } else {
                    format!(
                        "{}\nUnemployment: {:.2}%\nInflation: {:.2}%",
                        name, value.x, value.y
                    )
                }
            })
            .show(ui, |plot_ui| {
                for row in &table.rows {
                    let Some((x, y)) = row.pair() else {
                        continue;
                    };
                    let color = Self::year_color(row.year, first, last);
                    plot_ui.points(
                        Points::new(PlotPoints::from(vec![[x, y]]))
                            .radius(6.0)
                            .color(color)
                            .name(row.year.to_string()),
                    );
                }

                if let Some(trend) = trend {
                    let points: PlotPoints =
                        trend.sample_points.iter().map(|&(x, y)| [x, y]).collect();
                    plot_ui.line(
                        Line::new(points)
                            .color(TREND_COLOR)
                            .width(2.0)
                            .style(LineStyle::dashed_loose())
                            .name("Trend Line"),
                    );
                }
            });
    }

    /// Horizontal year colour key under the scatter.
    pub fn draw_year_key(ui: &mut egui::Ui, first: i32, last: i32) {
        ui.horizontal(|ui| {
            ui.label(RichText::new(first.to_string()).size(11.0));
            let (rect, _) = ui.allocate_exact_size(egui::vec2(180.0, 10.0), Sense::hover());
            let steps = 36;
            let step_w = rect.width() / steps as f32;
            for i in 0..steps {
                let year = first + ((last - first) as f32 * i as f32 / (steps - 1) as f32).round() as i32;
                let cell = egui::Rect::from_min_size(
                    Pos2::new(rect.left() + i as f32 * step_w, rect.top()),
                    egui::vec2(step_w + 0.5, rect.height()),
                );
                ui.painter().rect_filled(cell, 0.0, Self::year_color(year, first, last));
            }
            ui.label(RichText::new(last.to_string()).size(11.0));
            ui.add_space(12.0);
            let (line_rect, _) = ui.allocate_exact_size(egui::vec2(28.0, 10.0), Sense::hover());
            let y = line_rect.center().y;
            ui.painter().add(egui::Shape::dashed_line(
                &[Pos2::new(line_rect.left(), y), Pos2::new(line_rect.right(), y)],
                Stroke::new(2.0, TREND_COLOR),
                6.0,
                4.0,
            ));
            ui.label(RichText::new("Trend Line").size(11.0));
        });
    }

    /// Paint the flow diagram into a fixed-height area using the available width.
    pub fn draw_sankey(ui: &mut egui::Ui, graph: &FlowGraph, height: f32) {
        let width = ui.available_width().max(2.0 * LABEL_GUTTER + 120.0);
        let (rect, _) = ui.allocate_exact_size(egui::vec2(width, height), Sense::hover());
        let painter = ui.painter_at(rect);

        let plot_w = width - 2.0 * LABEL_GUTTER;
        let layout = SankeyLayout::compute(graph, plot_w, height - 10.0);
        let origin = Pos2::new(rect.left() + LABEL_GUTTER, rect.top() + 5.0);
        let at = |x: f32, y: f32| Pos2::new(origin.x + x, origin.y + y);

        for link in &layout.links {
            let side = graph.edges[link.edge].side;
            let [p0, p1, p2, p3] = link.bezier();
            let curve = egui::epaint::CubicBezierShape::from_points_stroke(
                [at(p0.0, p0.1), at(p1.0, p1.1), at(p2.0, p2.1), at(p3.0, p3.1)],
                false,
                Color32::TRANSPARENT,
                Stroke::new(link.thickness, Self::link_color(side)),
            );
            painter.add(curve);
        }

        let text_color = ui.visuals().text_color();
        for node in &layout.nodes {
            let meta = &graph.nodes[node.index];
            let node_rect = egui::Rect::from_min_size(
                at(node.x, node.y),
                egui::vec2(node.width, node.height.max(1.0)),
            );
            painter.rect_filled(node_rect, 2.0, Self::node_color(meta.color));
            painter.rect_stroke(node_rect, 2.0, Stroke::new(1.0, Color32::WHITE));

            let label = format!("{} (${:.1}B)", meta.label, graph.node_throughput(node.index));
            let font = FontId::proportional(13.0);
            match meta.color {
                NodeColor::Import => painter.text(
                    Pos2::new(node_rect.left() - 6.0, node_rect.center().y),
                    Align2::RIGHT_CENTER,
                    label,
                    font,
                    text_color,
                ),
                NodeColor::Export => painter.text(
                    Pos2::new(node_rect.right() + 6.0, node_rect.center().y),
                    Align2::LEFT_CENTER,
                    label,
                    font,
                    text_color,
                ),
                NodeColor::Country => painter.text(
                    Pos2::new(node_rect.center().x, node_rect.top() - 4.0),
                    Align2::CENTER_BOTTOM,
                    format!(
                        "{}\nin ${:.1}B / out ${:.1}B",
                        meta.label,
                        graph.side_total(TradeType::Import),
                        graph.side_total(TradeType::Export)
                    ),
                    FontId::proportional(15.0),
                    COUNTRY_COLOR,
                ),
            };
        }
    }
}
