use crate::{canvas, scale, ChartError, Figure, LegendPosition, ReferenceLine};
use chrono::{Datelike, NaiveDate};
use config::Style;
use log::warn;
use plotters::prelude::*;
use std::path::Path;

/// One line of a monthly chart.
#[derive(Debug, Clone)]
pub struct TimeSeries {
    pub label: String,
    pub color: RGBColor,
    pub points: Vec<(NaiveDate, f64)>,
}

#[derive(Debug, Clone)]
pub struct LineChart {
    pub title: String,
    pub x_desc: String,
    pub y_desc: String,
    pub figure: Figure,
    pub series: Vec<TimeSeries>,
    /// Horizontal thresholds, e.g. zero profit.
    pub hlines: Vec<ReferenceLine>,
    pub legend: Option<LegendPosition>,
}

/// Months counted from year 0, so consecutive months are consecutive integers.
pub fn month_index(date: NaiveDate) -> i32 {
    date.year() * 12 + date.month0() as i32
}

pub fn month_label(index: i32) -> String {
    let year = index.div_euclid(12);
    let month = index.rem_euclid(12) as u32 + 1;
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.format("%b %Y").to_string())
        .unwrap_or_default()
}

impl LineChart {
    fn indexed(&self) -> Vec<Vec<(i32, f64)>> {
        self.series
            .iter()
            .map(|series| {
                let points: Vec<(i32, f64)> = series
                    .points
                    .iter()
                    .filter(|(_, v)| v.is_finite())
                    .map(|(d, v)| (month_index(*d), *v))
                    .collect();
                if points.len() < series.points.len() {
                    warn!(
                        "{}: {} non-finite points dropped from {:?}",
                        self.title,
                        series.points.len() - points.len(),
                        series.label
                    );
                }
                points
            })
            .collect()
    }

    pub fn render(&self, path: &Path, style: &Style) -> Result<(), ChartError> {
        let root = canvas::open(path, self.figure, style)?;
        let lines = self.indexed();
        let Some((first, last)) = scale::extent(lines.iter().flatten().map(|(m, _)| *m as f64))
        else {
            return canvas::empty(&root, &self.title, style);
        };
        let (mut x_lo, mut x_hi) = (first as i32, last as i32);
        if x_lo == x_hi {
            x_lo -= 1;
            x_hi += 1;
        }
        let y_range = scale::padded_range(
            lines
                .iter()
                .flatten()
                .map(|(_, v)| *v)
                .chain(self.hlines.iter().map(|l| l.value)),
            false,
        );

        let mut chart = ChartBuilder::on(&root)
            .caption(&self.title, canvas::font(style, style.title_size))
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(90)
            .build_cartesian_2d(x_lo..x_hi, y_range)?;

        let x_fmt = |m: &i32| month_label(*m);
        let mut mesh = chart.configure_mesh();
        mesh.x_desc(self.x_desc.as_str())
            .y_desc(self.y_desc.as_str())
            .x_labels(((x_hi - x_lo + 1) as usize).min(12))
            .x_label_formatter(&x_fmt)
            .label_style(canvas::font(style, style.tick_size))
            .axis_desc_style(canvas::font(style, style.label_size))
            .bold_line_style(canvas::GRID.stroke_width(1))
            .light_line_style(WHITE.stroke_width(0));
        if !style.grid {
            mesh.disable_mesh();
        }
        mesh.draw()?;

        for line in &self.hlines {
            draw_reference!(chart, line, (x_lo, line.value), (x_hi, line.value));
        }

        for (series, points) in self.series.iter().zip(lines) {
            let color = series.color;
            chart
                .draw_series(LineSeries::new(points, color.stroke_width(2)))?
                .label(series.label.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
        }

        if let Some(position) = self.legend {
            chart
                .configure_series_labels()
                .position(position.into())
                .background_style(&WHITE.mix(0.8))
                .border_style(&BLACK.mix(0.3))
                .label_font(canvas::font(style, style.tick_size).color(&BLACK))
                .draw()?;
        }

        root.present()?;
        Ok(())
    }
}
