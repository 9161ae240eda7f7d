//! Dark theme colors shared by both charts.

use gauss_shell_core::color::Srgb;
use plotters::style::{IntoFont, RGBColor, TextStyle};

pub const BACKGROUND: RGBColor = RGBColor(0x05, 0x05, 0x11);
/// Shell outline and page accent.
pub const ACCENT: RGBColor = RGBColor(0x00, 0xf2, 0xff);
pub const TEXT: RGBColor = RGBColor(0xff, 0xff, 0xff);
pub const GRID: RGBColor = RGBColor(0x33, 0x33, 0x33);

pub const FONT_FAMILY: &str = "sans-serif";
pub const TITLE_SIZE: f64 = 22.0;
pub const LABEL_SIZE: f64 = 14.0;

/// Whether a chart draws its captions, tick labels and axis names.
///
/// plotters is built without a font rasterizer, so only backends that emit
/// text as markup (SVG) can take [`Labels::Shown`]. Bitmap snapshots use
/// [`Labels::Hidden`] and get a plain frame instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Labels {
    Shown,
    Hidden,
}

impl Labels {
    pub fn shown(self) -> bool {
        self == Labels::Shown
    }
}

/// Converts a palette sample to a plotters color.
pub fn rgb(color: Srgb) -> RGBColor {
    let [r, g, b] = color.to_rgb8();
    RGBColor(r, g, b)
}

pub fn title_style() -> TextStyle<'static> {
    (FONT_FAMILY, TITLE_SIZE).into_font().color(&TEXT)
}

pub fn label_style() -> TextStyle<'static> {
    (FONT_FAMILY, LABEL_SIZE).into_font().color(&TEXT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gauss_shell_core::palette::Palette;

    #[test]
    fn rgb_converts_hex_exactly() {
        let accent = Srgb::from_hex("#00f2ff").unwrap();
        assert_eq!(rgb(accent), ACCENT);
        assert_eq!(rgb(Srgb::BLACK), RGBColor(0, 0, 0));
        assert_eq!(rgb(Srgb::WHITE), TEXT);
    }

    #[test]
    fn rgb_of_palette_endpoints() {
        let palette = Palette::inferno();
        assert_eq!(rgb(palette.sample(0.0)), RGBColor(0x00, 0x00, 0x04));
        assert_eq!(rgb(palette.sample(1.0)), RGBColor(0xfc, 0xff, 0xa4));
    }
}
