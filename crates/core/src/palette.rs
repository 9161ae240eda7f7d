//! Sequential color scales for the field map and the potential surface.
//!
//! A [`Palette`] is an ordered list of color stops sampled by `t` in [0, 1].
//! Stops are stored in OKLab and interpolated linearly there. The built-in
//! scales reproduce the well-known perceptual colormaps by their anchor colors.

use crate::color::{OkLab, Srgb};
use crate::error::ShellError;

/// Names accepted by [`Palette::from_name`], in listing order.
const PALETTE_NAMES: &[&str] = &["inferno", "viridis", "plasma", "magma", "monochrome"];

/// A sequential color scale sampled by interpolation.
///
/// `sample(0.0)` returns the first stop and `sample(1.0)` the last; stops are
/// evenly spaced along `t`.
#[derive(Debug, Clone)]
pub struct Palette {
    stops: Vec<OkLab>,
}

impl Palette {
    /// Creates a palette from OKLab stops. Requires at least one stop.
    pub fn new(stops: Vec<OkLab>) -> Result<Self, ShellError> {
        if stops.is_empty() {
            return Err(ShellError::InvalidPalette(
                "palette requires at least 1 color".to_string(),
            ));
        }
        Ok(Self { stops })
    }

    /// Creates a palette from `"#rrggbb"` strings.
    pub fn from_hex(hexes: &[&str]) -> Result<Self, ShellError> {
        let stops = hexes
            .iter()
            .map(|h| Srgb::from_hex(h).map(Srgb::to_oklab))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(stops)
    }

    /// Looks up a built-in palette by name (case insensitive).
    pub fn from_name(name: &str) -> Result<Self, ShellError> {
        match name.to_ascii_lowercase().as_str() {
            "inferno" => Ok(Self::inferno()),
            "viridis" => Ok(Self::viridis()),
            "plasma" => Ok(Self::plasma()),
            "magma" => Ok(Self::magma()),
            "monochrome" => Ok(Self::monochrome()),
            _ => Err(ShellError::UnknownPalette(name.to_string())),
        }
    }

    /// Names of all built-in palettes.
    pub fn list_names() -> &'static [&'static str] {
        PALETTE_NAMES
    }

    /// Number of color stops.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Always false for a constructed palette.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Samples the palette at `t`, clamped to [0, 1]. NaN samples the first stop.
    pub fn sample(&self, t: f64) -> Srgb {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let n = self.stops.len();
        if n == 1 {
            return self.stops[0].to_srgb();
        }
        let scaled = t * (n - 1) as f64;
        let idx = (scaled as usize).min(n - 2);
        let frac = scaled - idx as f64;
        self.stops[idx].lerp(self.stops[idx + 1], frac).to_srgb()
    }

    /// Maps `value` linearly from `[lo, hi]` onto the palette.
    ///
    /// A degenerate range (`hi <= lo`) samples the first stop.
    pub fn sample_range(&self, value: f64, lo: f64, hi: f64) -> Srgb {
        let span = hi - lo;
        if span.is_nan() || span <= 0.0 {
            return self.sample(0.0);
        }
        self.sample((value - lo) / span)
    }

    // -- Built-in palettes --

    /// Black through purple and orange to pale yellow. Field-map default.
    pub fn inferno() -> Self {
        Self::from_hex(&[
            "#000004", "#1b0c41", "#4a0c6b", "#781c6d", "#a52c60", "#cf4446", "#ed6925",
            "#fb9b06", "#f7d13d", "#fcffa4",
        ])
        .expect("inferno hex values are valid")
    }

    /// Dark purple through teal to yellow. Potential-surface default.
    pub fn viridis() -> Self {
        Self::from_hex(&[
            "#440154", "#482878", "#3e4989", "#31688e", "#26828e", "#1f9e89", "#35b779",
            "#6ece58", "#b5de2b", "#fde725",
        ])
        .expect("viridis hex values are valid")
    }

    /// Deep blue through magenta to yellow.
    pub fn plasma() -> Self {
        Self::from_hex(&[
            "#0d0887", "#46039f", "#7201a8", "#9c179e", "#bd3786", "#d8576b", "#ed7953",
            "#fb9f3a", "#fdca26", "#f0f921",
        ])
        .expect("plasma hex values are valid")
    }

    /// Black through purple to pale peach.
    pub fn magma() -> Self {
        Self::from_hex(&[
            "#000004", "#180f3d", "#440f76", "#721f81", "#9e2f7f", "#cd4071", "#f1605d",
            "#fd9668", "#feca8d", "#fcfdbf",
        ])
        .expect("magma hex values are valid")
    }

    /// Black to white.
    pub fn monochrome() -> Self {
        Self::from_hex(&["#000000", "#ffffff"]).expect("monochrome hex values are valid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Srgb, b: Srgb) -> bool {
        (a.r - b.r).abs() < 1e-6 && (a.g - b.g).abs() < 1e-6 && (a.b - b.b).abs() < 1e-6
    }

    #[test]
    fn new_with_empty_vec_returns_error() {
        assert!(matches!(
            Palette::new(vec![]),
            Err(ShellError::InvalidPalette(_))
        ));
    }

    #[test]
    fn from_hex_with_empty_slice_returns_error() {
        assert!(Palette::from_hex(&[]).is_err());
    }

    #[test]
    fn from_hex_with_invalid_hex_returns_error() {
        assert!(matches!(
            Palette::from_hex(&["#ff0000", "#zzzzzz"]),
            Err(ShellError::InvalidColor(_))
        ));
    }

    #[test]
    fn from_name_resolves_every_listed_palette() {
        for name in Palette::list_names() {
            let palette = Palette::from_name(name).unwrap();
            assert!(palette.len() >= 2, "{name} has {} stops", palette.len());
        }
    }

    #[test]
    fn from_name_is_case_insensitive() {
        assert!(Palette::from_name("Inferno").is_ok());
        assert!(Palette::from_name("VIRIDIS").is_ok());
    }

    #[test]
    fn from_name_unknown_returns_error() {
        assert!(matches!(
            Palette::from_name("rainbow"),
            Err(ShellError::UnknownPalette(name)) if name == "rainbow"
        ));
    }

    #[test]
    fn sample_endpoints_match_first_and_last_stop() {
        let palette = Palette::inferno();
        assert_eq!(palette.sample(0.0).to_hex(), "#000004");
        assert_eq!(palette.sample(1.0).to_hex(), "#fcffa4");
    }

    #[test]
    fn sample_clamps_t_outside_unit_interval() {
        let palette = Palette::viridis();
        assert!(close(palette.sample(-3.0), palette.sample(0.0)));
        assert!(close(palette.sample(7.5), palette.sample(1.0)));
    }

    #[test]
    fn sample_nan_returns_first_stop() {
        let palette = Palette::plasma();
        assert!(close(palette.sample(f64::NAN), palette.sample(0.0)));
    }

    #[test]
    fn single_stop_palette_is_constant() {
        let palette = Palette::from_hex(&["#00f2ff"]).unwrap();
        for t in [0.0, 0.3, 1.0] {
            assert_eq!(palette.sample(t).to_hex(), "#00f2ff");
        }
    }

    #[test]
    fn monochrome_midpoint_is_perceptual_gray() {
        let mid = Palette::monochrome().sample(0.5);
        assert!((mid.r - mid.g).abs() < 1e-6 && (mid.g - mid.b).abs() < 1e-6);
        assert!(mid.r > 0.3 && mid.r < 0.6, "mid gray = {}", mid.r);
    }

    #[test]
    fn sample_range_maps_bounds() {
        let palette = Palette::magma();
        assert!(close(palette.sample_range(2.0, 2.0, 6.0), palette.sample(0.0)));
        assert!(close(palette.sample_range(4.0, 2.0, 6.0), palette.sample(0.5)));
        assert!(close(palette.sample_range(6.0, 2.0, 6.0), palette.sample(1.0)));
    }

    #[test]
    fn sample_range_with_empty_span_uses_first_stop() {
        let palette = Palette::inferno();
        assert!(close(palette.sample_range(5.0, 3.0, 3.0), palette.sample(0.0)));
        assert!(close(palette.sample_range(5.0, 3.0, 1.0), palette.sample(0.0)));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn sample_always_produces_valid_srgb(t in -0.5_f64..=1.5) {
                for name in Palette::list_names() {
                    let c = Palette::from_name(name).unwrap().sample(t);
                    prop_assert!((0.0..=1.0).contains(&c.r), "{name} r={} at t={t}", c.r);
                    prop_assert!((0.0..=1.0).contains(&c.g), "{name} g={} at t={t}", c.g);
                    prop_assert!((0.0..=1.0).contains(&c.b), "{name} b={} at t={t}", c.b);
                }
            }

            #[test]
            fn monochrome_is_monotonic(a in 0.0_f64..=1.0, b in 0.0_f64..=1.0) {
                let palette = Palette::monochrome();
                let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
                prop_assert!(palette.sample(lo).r <= palette.sample(hi).r + 1e-12);
            }
        }
    }
}
