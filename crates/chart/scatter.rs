use crate::{canvas, scale, ChartError, Figure, LegendPosition, ReferenceLine};
use config::Style;
use log::warn;
use plotters::prelude::*;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    /// Marker radius in pixels.
    pub radius: u32,
    pub color: RGBColor,
}

/// Points sharing a legend entry and an opacity.
#[derive(Debug, Clone, PartialEq)]
pub struct PointGroup {
    pub label: Option<String>,
    pub alpha: f64,
    pub points: Vec<Point>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum XScale {
    #[default]
    Linear,
    Log,
}

#[derive(Debug, Clone)]
pub struct ScatterChart {
    pub title: String,
    pub x_desc: String,
    pub y_desc: String,
    pub figure: Figure,
    pub x_scale: XScale,
    pub groups: Vec<PointGroup>,
    pub hlines: Vec<ReferenceLine>,
    pub vlines: Vec<ReferenceLine>,
    pub legend: Option<LegendPosition>,
}

// Same drawing for linear and logarithmic x; only the coordinate type differs.
macro_rules! draw_scatter {
    ($this:expr, $chart:ident, $style:ident, $groups:ident, ($x_lo:expr, $x_hi:expr), ($y_lo:expr, $y_hi:expr)) => {{
        let mut mesh = $chart.configure_mesh();
        mesh.x_desc($this.x_desc.as_str())
            .y_desc($this.y_desc.as_str())
            .label_style(canvas::font($style, $style.tick_size))
            .axis_desc_style(canvas::font($style, $style.label_size))
            .bold_line_style(canvas::GRID.stroke_width(1))
            .light_line_style(WHITE.stroke_width(0));
        if !$style.grid {
            mesh.disable_mesh();
        }
        mesh.draw()?;

        for group in &$groups {
            let alpha = group.alpha;
            let anno = $chart.draw_series(
                group
                    .points
                    .iter()
                    .map(|p| Circle::new((p.x, p.y), p.radius, p.color.mix(alpha).filled())),
            )?;
            if let (Some(label), Some(first)) = (&group.label, group.points.first()) {
                let color = first.color;
                anno.label(label.as_str())
                    .legend(move |(x, y)| Circle::new((x, y), 5, color.mix(alpha).filled()));
            }
        }

        for line in &$this.hlines {
            draw_reference!($chart, line, ($x_lo, line.value), ($x_hi, line.value));
        }
        for line in &$this.vlines {
            draw_reference!($chart, line, (line.value, $y_lo), (line.value, $y_hi));
        }

        if let Some(position) = $this.legend {
            $chart
                .configure_series_labels()
                .position(position.into())
                .background_style(&WHITE.mix(0.8))
                .border_style(&BLACK.mix(0.3))
                .label_font(canvas::font($style, $style.tick_size).color(&BLACK))
                .draw()?;
        }
    }};
}

impl ScatterChart {
    /// Groups with only the points the x scale can place.
    fn drawable(&self) -> Vec<PointGroup> {
        let log = self.x_scale == XScale::Log;
        self.groups
            .iter()
            .map(|group| {
                let points: Vec<Point> = group
                    .points
                    .iter()
                    .filter(|p| p.x.is_finite() && p.y.is_finite() && !(log && p.x <= 0.0))
                    .copied()
                    .collect();
                if points.len() < group.points.len() {
                    warn!(
                        "{}: {} points cannot be placed and are dropped",
                        self.title,
                        group.points.len() - points.len()
                    );
                }
                PointGroup {
                    label: group.label.clone(),
                    alpha: group.alpha,
                    points,
                }
            })
            .collect()
    }

    pub fn render(&self, path: &Path, style: &Style) -> Result<(), ChartError> {
        let root = canvas::open(path, self.figure, style)?;
        let groups = self.drawable();
        if groups.iter().all(|g| g.points.is_empty()) {
            return canvas::empty(&root, &self.title, style);
        }
        let points = || groups.iter().flat_map(|g| g.points.iter());
        let y = scale::padded_range(
            points().map(|p| p.y).chain(self.hlines.iter().map(|l| l.value)),
            false,
        );

        let mut builder = ChartBuilder::on(&root);
        builder
            .caption(&self.title, canvas::font(style, style.title_size))
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(90);

        match self.x_scale {
            XScale::Linear => {
                let x = scale::padded_range(
                    points().map(|p| p.x).chain(self.vlines.iter().map(|l| l.value)),
                    false,
                );
                let (x_lo, x_hi) = (x.start, x.end);
                let mut chart = builder.build_cartesian_2d(x, y.clone())?;
                draw_scatter!(self, chart, style, groups, (x_lo, x_hi), (y.start, y.end));
            }
            XScale::Log => {
                let x = match scale::log_range(points().map(|p| p.x)) {
                    Some(x) => x,
                    None => return canvas::empty(&root, &self.title, style),
                };
                let (x_lo, x_hi) = (x.start, x.end);
                let mut chart = builder.build_cartesian_2d(x.log_scale(), y.clone())?;
                draw_scatter!(self, chart, style, groups, (x_lo, x_hi), (y.start, y.end));
            }
        }

        root.present()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(x: f64, y: f64) -> Point {
        Point {
            x,
            y,
            radius: 4,
            color: BLUE,
        }
    }

    fn chart(x_scale: XScale, points: Vec<Point>) -> ScatterChart {
        ScatterChart {
            title: "Scatter".to_string(),
            x_desc: "x".to_string(),
            y_desc: "y".to_string(),
            figure: Figure::new(5.0, 4.0),
            x_scale,
            groups: vec![PointGroup {
                label: Some("points".to_string()),
                alpha: 0.5,
                points,
            }],
            hlines: vec![ReferenceLine::at(0.0).dashed()],
            vlines: vec![ReferenceLine::at(0.2).color(RED).dotted().label("threshold")],
            legend: Some(LegendPosition::LowerLeft),
        }
    }

    #[test]
    fn test_log_scale_drops_non_positive_x() {
        let c = chart(XScale::Log, vec![point(0.0, 1.0), point(-3.0, 1.0), point(10.0, 2.0)]);
        let groups = c.drawable();
        assert_eq!(groups[0].points, vec![point(10.0, 2.0)]);

        let c = chart(XScale::Linear, vec![point(0.0, 1.0), point(f64::NAN, 1.0)]);
        assert_eq!(c.drawable()[0].points, vec![point(0.0, 1.0)]);
    }

    #[test]
    fn test_render_linear_and_log() {
        let dir = tempfile::tempdir().unwrap();
        let points = vec![point(0.1, -30.0), point(0.2, 5.0), point(0.5, 80.0)];
        for (name, x_scale) in [("lin.png", XScale::Linear), ("log.png", XScale::Log)] {
            let path = dir.path().join(name);
            chart(x_scale, points.clone()).render(&path, &Style::default()).unwrap();
            let bytes = std::fs::read(&path).unwrap();
            assert_eq!(&bytes[1..4], b"PNG");
        }
    }

    #[test]
    fn test_render_nothing_placeable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.png");
        chart(XScale::Log, vec![point(0.0, 1.0)])
            .render(&path, &Style::default())
            .unwrap();
        assert!(path.exists());
    }
}
