use crate::{canvas, scale, ChartError, Figure, ReferenceLine};
use config::Style;
use log::warn;
use plotters::prelude::*;
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    pub color: RGBColor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarOrientation {
    /// Categories along x, values up the y axis.
    Vertical,
    /// Categories down the y axis, first bar on top.
    Horizontal,
}

#[derive(Debug, Clone)]
pub struct BarChart {
    pub title: String,
    pub x_desc: String,
    pub y_desc: String,
    pub figure: Figure,
    pub orientation: BarOrientation,
    pub bars: Vec<Bar>,
    /// Line across the value axis, usually at zero.
    pub baseline: Option<ReferenceLine>,
}

/// Index into the bar list for a category slot of the segmented axis.
/// Horizontal charts count slots bottom-up, so the order is flipped.
fn bar_at_slot(n: usize, orientation: BarOrientation, slot: u32) -> Option<usize> {
    let slot = slot as usize;
    if slot >= n {
        return None;
    }
    match orientation {
        BarOrientation::Vertical => Some(slot),
        BarOrientation::Horizontal => Some(n - 1 - slot),
    }
}

fn slot_of(n: usize, orientation: BarOrientation, index: usize) -> u32 {
    match orientation {
        BarOrientation::Vertical => index as u32,
        BarOrientation::Horizontal => (n - 1 - index) as u32,
    }
}

/// Pixels needed for the longest category label.
fn label_width(bars: &[Bar], style: &Style) -> u32 {
    let chars = bars.iter().map(|b| b.label.chars().count()).max().unwrap_or(0);
    let px = chars as f64 * style.font_pixels(style.tick_size) * 0.6 + 16.0;
    (px.ceil() as u32).clamp(60, 320)
}

impl BarChart {
    fn drawable(&self) -> Vec<Bar> {
        let bars: Vec<Bar> = self
            .bars
            .iter()
            .filter(|b| b.value.is_finite())
            .cloned()
            .collect();
        if bars.len() < self.bars.len() {
            warn!(
                "{}: {} bars without a finite value dropped",
                self.title,
                self.bars.len() - bars.len()
            );
        }
        bars
    }

    pub fn render(&self, path: &Path, style: &Style) -> Result<(), ChartError> {
        let root = canvas::open(path, self.figure, style)?;
        let bars = self.drawable();
        if bars.is_empty() {
            return canvas::empty(&root, &self.title, style);
        }
        let n = bars.len();
        let values = scale::padded_range(
            bars.iter()
                .map(|b| b.value)
                .chain(self.baseline.iter().map(|l| l.value)),
            true,
        );
        let label = |v: &SegmentValue<u32>| match v {
            SegmentValue::CenterOf(slot) => bar_at_slot(n, self.orientation, *slot)
                .map(|i| bars[i].label.clone())
                .unwrap_or_default(),
            _ => String::new(),
        };

        match self.orientation {
            BarOrientation::Vertical => {
                let mut chart = ChartBuilder::on(&root)
                    .caption(&self.title, canvas::font(style, style.title_size))
                    .margin(20)
                    .x_label_area_size(60)
                    .y_label_area_size(90)
                    .build_cartesian_2d((0u32..n as u32).into_segmented(), values)?;

                let mut mesh = chart.configure_mesh();
                mesh.x_desc(self.x_desc.as_str())
                    .y_desc(self.y_desc.as_str())
                    .x_labels(n + 1)
                    .x_label_formatter(&label)
                    .disable_x_mesh()
                    .label_style(canvas::font(style, style.tick_size))
                    .axis_desc_style(canvas::font(style, style.label_size))
                    .bold_line_style(canvas::GRID.stroke_width(1))
                    .light_line_style(WHITE.stroke_width(0));
                if !style.grid {
                    mesh.disable_mesh();
                }
                mesh.draw()?;

                chart.draw_series(bars.iter().enumerate().map(|(i, bar)| {
                    let slot = slot_of(n, self.orientation, i);
                    let mut rect = Rectangle::new(
                        [
                            (SegmentValue::Exact(slot), 0.0),
                            (SegmentValue::Exact(slot + 1), bar.value),
                        ],
                        bar.color.filled(),
                    );
                    rect.set_margin(0, 0, 6, 6);
                    rect
                }))?;

                if let Some(line) = &self.baseline {
                    draw_reference!(
                        chart,
                        line,
                        (SegmentValue::Exact(0), line.value),
                        (SegmentValue::Last, line.value)
                    );
                }
            }
            BarOrientation::Horizontal => {
                let mut chart = ChartBuilder::on(&root)
                    .caption(&self.title, canvas::font(style, style.title_size))
                    .margin(20)
                    .x_label_area_size(60)
                    .y_label_area_size(label_width(&bars, style))
                    .build_cartesian_2d(values, (0u32..n as u32).into_segmented())?;

                let mut mesh = chart.configure_mesh();
                mesh.x_desc(self.x_desc.as_str())
                    .y_desc(self.y_desc.as_str())
                    .y_labels(n + 1)
                    .y_label_formatter(&label)
                    .disable_y_mesh()
                    .label_style(canvas::font(style, style.tick_size))
                    .axis_desc_style(canvas::font(style, style.label_size))
                    .bold_line_style(canvas::GRID.stroke_width(1))
                    .light_line_style(WHITE.stroke_width(0));
                if !style.grid {
                    mesh.disable_mesh();
                }
                mesh.draw()?;

                chart.draw_series(bars.iter().enumerate().map(|(i, bar)| {
                    let slot = slot_of(n, self.orientation, i);
                    let mut rect = Rectangle::new(
                        [
                            (0.0, SegmentValue::Exact(slot)),
                            (bar.value, SegmentValue::Exact(slot + 1)),
                        ],
                        bar.color.filled(),
                    );
                    rect.set_margin(3, 3, 0, 0);
                    rect
                }))?;

                if let Some(line) = &self.baseline {
                    draw_reference!(
                        chart,
                        line,
                        (line.value, SegmentValue::Exact(0)),
                        (line.value, SegmentValue::Last)
                    );
                }
            }
        }

        root.present()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bars(values: &[f64]) -> Vec<Bar> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| Bar {
                label: format!("cat-{}", i),
                value: *v,
                color: if *v < 0.0 { RED } else { GREEN },
            })
            .collect()
    }

    fn chart(orientation: BarOrientation, values: &[f64]) -> BarChart {
        BarChart {
            title: "Bars".to_string(),
            x_desc: "x".to_string(),
            y_desc: "y".to_string(),
            figure: Figure::new(5.0, 4.0),
            orientation,
            bars: bars(values),
            baseline: Some(ReferenceLine::at(0.0)),
        }
    }

    #[test]
    fn test_slots_follow_orientation() {
        assert_eq!(bar_at_slot(3, BarOrientation::Vertical, 0), Some(0));
        assert_eq!(bar_at_slot(3, BarOrientation::Horizontal, 0), Some(2));
        assert_eq!(bar_at_slot(3, BarOrientation::Horizontal, 2), Some(0));
        assert_eq!(bar_at_slot(3, BarOrientation::Horizontal, 3), None);
        for i in 0..3 {
            let slot = slot_of(3, BarOrientation::Horizontal, i);
            assert_eq!(bar_at_slot(3, BarOrientation::Horizontal, slot), Some(i));
        }
    }

    #[test]
    fn test_render_vertical_and_horizontal() {
        let dir = tempfile::tempdir().unwrap();
        for (name, orientation) in [("v.png", BarOrientation::Vertical), ("h.png", BarOrientation::Horizontal)] {
            let path = dir.path().join(name);
            chart(orientation, &[120.0, -40.0, 3.5, f64::NAN])
                .render(&path, &Style::default())
                .unwrap();
            let bytes = std::fs::read(&path).unwrap();
            assert_eq!(&bytes[1..4], b"PNG");
        }
    }

    #[test]
    fn test_render_without_bars() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.png");
        chart(BarOrientation::Horizontal, &[]).render(&path, &Style::default()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_label_width_bounds() {
        let style = Style::default();
        assert_eq!(label_width(&[], &style), 60);
        let long = vec![Bar {
            label: "x".repeat(200),
            value: 1.0,
            color: BLACK,
        }];
        assert_eq!(label_width(&long, &style), 320);
    }
}
