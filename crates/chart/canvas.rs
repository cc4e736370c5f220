use crate::backend::FontSafeBackend;
use crate::{fonts, ChartError, Figure};
use config::Style;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

pub(crate) type Canvas<'a> = DrawingArea<FontSafeBackend<BitMapBackend<'a>>, Shift>;

pub(crate) const GRID: RGBColor = RGBColor(225, 225, 225);
pub(crate) const MUTED: RGBColor = RGBColor(120, 120, 120);

pub(crate) fn open<'a>(path: &'a Path, figure: Figure, style: &Style) -> Result<Canvas<'a>, ChartError> {
    fonts::ensure_registered(style);
    let size = (style.pixels(figure.width), style.pixels(figure.height));
    let root = FontSafeBackend::new(BitMapBackend::new(path, size)).into_drawing_area();
    root.fill(&WHITE)?;
    Ok(root)
}

pub(crate) fn font(style: &Style, points: f64) -> FontDesc<'_> {
    FontDesc::new(
        FontFamily::from(style.font_family.as_str()),
        style.font_pixels(points),
        FontStyle::Normal,
    )
}

/// Titled frame with a "no data" note, for summaries without anything to draw.
pub(crate) fn empty(root: &Canvas<'_>, title: &str, style: &Style) -> Result<(), ChartError> {
    let area = root.titled(title, font(style, style.title_size))?;
    let (width, height) = area.dim_in_pixel();
    let note = font(style, style.label_size)
        .color(&MUTED)
        .pos(Pos::new(HPos::Center, VPos::Center));
    area.draw(&Text::new(
        "no data",
        (width as i32 / 2, height as i32 / 2),
        note,
    ))?;
    root.present()?;
    Ok(())
}
