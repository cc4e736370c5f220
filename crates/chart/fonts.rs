use config::Style;
use log::{info, warn};
use plotters::style::{register_font, FontStyle};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

const SYSTEM_FONTS: [&str; 8] = [
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

static REGISTERED: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Registers a TrueType font under the style's family name, once per process.
/// Returns the file in use, `None` when no font could be loaded (text is then skipped).
pub fn ensure_registered(style: &Style) -> Option<&'static Path> {
    REGISTERED
        .get_or_init(|| register(style))
        .as_deref()
}

fn register(style: &Style) -> Option<PathBuf> {
    for path in candidates(style) {
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(_) => continue,
        };
        // plotters keeps a reference to the font data for the process lifetime
        let data: &'static [u8] = Box::leak(bytes.into_boxed_slice());
        match register_font(&style.font_family, FontStyle::Normal, data) {
            Ok(()) => {
                info!("font {:?} registered as {:?}", path, style.font_family);
                return Some(path);
            }
            Err(_) => warn!("font {:?} is not a usable TrueType file", path),
        }
    }
    warn!("no usable font found, charts are drawn without text");
    None
}

fn candidates(style: &Style) -> Vec<PathBuf> {
    style
        .font_path
        .iter()
        .cloned()
        .chain(SYSTEM_FONTS.iter().map(PathBuf::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_font_is_tried_first() {
        let style = Style {
            font_path: Some(PathBuf::from("fonts/Custom.ttf")),
            ..Style::default()
        };
        let list = candidates(&style);
        assert_eq!(list[0], PathBuf::from("fonts/Custom.ttf"));
        assert_eq!(list.len(), SYSTEM_FONTS.len() + 1);
        assert_eq!(candidates(&Style::default()).len(), SYSTEM_FONTS.len());
    }
}
