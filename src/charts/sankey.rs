//! Sankey Layout
//! Pure geometry for the three-column flow diagram, shared by the interactive
//! painter and the static renderer. Coordinates are in canvas units with the
//! origin at the top-left corner.

use super::flow::{FlowGraph, NodeColor};

pub const NODE_WIDTH: f32 = 22.0;
pub const NODE_PADDING: f32 = 14.0;

/// Placed node rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeRect {
    pub index: usize,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl NodeRect {
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

/// A link band from the right edge of its source node to the left edge of its target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkBand {
    pub edge: usize,
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
    /// Band thickness; `y0`/`y1` are band centres.
    pub thickness: f32,
}

impl LinkBand {
    /// Control points of the centre-line cubic Bézier.
    pub fn bezier(&self) -> [(f32, f32); 4] {
        let mid = (self.x0 + self.x1) / 2.0;
        [(self.x0, self.y0), (mid, self.y0), (mid, self.y1), (self.x1, self.y1)]
    }

    /// Sample the centre line at `steps + 1` points.
    pub fn centre_line(&self, steps: usize) -> Vec<(f32, f32)> {
        let [p0, p1, p2, p3] = self.bezier();
        (0..=steps)
            .map(|i| {
                let t = i as f32 / steps.max(1) as f32;
                let u = 1.0 - t;
                let b0 = u * u * u;
                let b1 = 3.0 * u * u * t;
                let b2 = 3.0 * u * t * t;
                let b3 = t * t * t;
                (
                    b0 * p0.0 + b1 * p1.0 + b2 * p2.0 + b3 * p3.0,
                    b0 * p0.1 + b1 * p1.1 + b2 * p2.1 + b3 * p3.1,
                )
            })
            .collect()
    }

    /// Closed outline of the band, top edge forward then bottom edge back.
    pub fn outline(&self, steps: usize) -> Vec<(f32, f32)> {
        let half = self.thickness / 2.0;
        let centre = self.centre_line(steps);
        let mut outline: Vec<(f32, f32)> = centre.iter().map(|&(x, y)| (x, y - half)).collect();
        outline.extend(centre.iter().rev().map(|&(x, y)| (x, y + half)));
        outline
    }
}

#[derive(Debug, Clone, Default)]
pub struct SankeyLayout {
    pub nodes: Vec<NodeRect>,
    pub links: Vec<LinkBand>,
}

impl SankeyLayout {
    pub fn compute(graph: &FlowGraph, width: f32, height: f32) -> Self {
        let Some(country) = graph.country_index() else {
            return Self::default();
        };

        let column = |color: NodeColor| -> Vec<usize> {
            graph
                .nodes
                .iter()
                .enumerate()
                .filter(|(_, n)| n.color == color)
                .map(|(i, _)| i)
                .collect()
        };
        let imports = column(NodeColor::Import);
        let exports = column(NodeColor::Export);

        let throughput: Vec<f64> = (0..graph.nodes.len())
            .map(|i| graph.node_throughput(i))
            .collect();
        let column_total = |ids: &[usize]| ids.iter().map(|&i| throughput[i]).sum::<f64>() as f32;

        // One scale for all columns so equal values get equal heights
        let scale_for = |ids: &[usize]| -> f32 {
            let total = column_total(ids);
            if ids.is_empty() || total <= 0.0 {
                return f32::INFINITY;
            }
            let free = height - NODE_PADDING * (ids.len() as f32 - 1.0);
            (free / total).max(0.0)
        };
        let mut scale = scale_for(&imports)
            .min(scale_for(&exports))
            .min(scale_for(&[country]));
        if !scale.is_finite() {
            scale = 0.0;
        }

        let mut nodes: Vec<NodeRect> = Vec::with_capacity(graph.nodes.len());
        let mut place_column = |ids: &[usize], x: f32| {
            let used = column_total(ids) * scale + NODE_PADDING * (ids.len().max(1) as f32 - 1.0);
            let mut y = ((height - used) / 2.0).max(0.0);
            for &i in ids {
                let h = throughput[i] as f32 * scale;
                nodes.push(NodeRect {
                    index: i,
                    x,
                    y,
                    width: NODE_WIDTH,
                    height: h,
                });
                y += h + NODE_PADDING;
            }
        };
        place_column(&imports, 0.0);
        place_column(&[country], (width - NODE_WIDTH) / 2.0);
        place_column(&exports, width - NODE_WIDTH);
        nodes.sort_by_key(|n| n.index);

        let mut links = Vec::with_capacity(graph.edges.len());
        let country_rect = nodes[country];
        let mut inbound_y = country_rect.y;
        let mut outbound_y = country_rect.y;
        for (edge_idx, edge) in graph.edges.iter().enumerate() {
            let thickness = edge.value as f32 * scale;
            let source = nodes[edge.source];
            let target = nodes[edge.target];

            let (y0, y1) = if edge.target == country {
                let y1 = inbound_y + thickness / 2.0;
                inbound_y += thickness;
                (source.center_y(), y1)
            } else {
                let y0 = outbound_y + thickness / 2.0;
                outbound_y += thickness;
                (y0, target.center_y())
            };

            if thickness > 0.0 {
                links.push(LinkBand {
                    edge: edge_idx,
                    x0: source.right(),
                    y0,
                    x1: target.x,
                    y1,
                    thickness,
                });
            }
        }

        Self { nodes, links }
    }
}
