//! Color types used by the chart palettes.
//!
//! Colors are authored as sRGB hex strings and interpolated in OKLab, which
//! keeps the perceived lightness of a color ramp monotonic. Conversions go
//! sRGB -> linear RGB -> OKLab and back; everything is `f64`.

use crate::error::ShellError;

/// sRGB color with components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Srgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// Linear (gamma-decoded) RGB.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// OKLab perceptual color space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OkLab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

impl Srgb {
    pub const BLACK: Srgb = Srgb {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    pub const WHITE: Srgb = Srgb {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    /// Parses `"#rrggbb"` or `"rrggbb"` (case insensitive).
    pub fn from_hex(hex: &str) -> Result<Srgb, ShellError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(ShellError::InvalidColor(format!(
                "expected 6 hex digits in '{hex}'"
            )));
        }
        let channel = |range: std::ops::Range<usize>, name: &str| {
            u8::from_str_radix(&digits[range], 16)
                .map(|v| v as f64 / 255.0)
                .map_err(|e| ShellError::InvalidColor(format!("invalid {name} component: {e}")))
        };
        Ok(Srgb {
            r: channel(0..2, "red")?,
            g: channel(2..4, "green")?,
            b: channel(4..6, "blue")?,
        })
    }

    /// Quantizes to 8-bit channels with rounding; out-of-range values are clamped.
    pub fn to_rgb8(self) -> [u8; 3] {
        let q = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b)]
    }

    /// Formats as `"#rrggbb"`.
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    pub fn to_linear(self) -> LinearRgb {
        LinearRgb {
            r: decode_gamma(self.r),
            g: decode_gamma(self.g),
            b: decode_gamma(self.b),
        }
    }

    pub fn to_oklab(self) -> OkLab {
        self.to_linear().to_oklab()
    }
}

impl LinearRgb {
    /// Gamma-encodes back to sRGB. The result is not clamped.
    pub fn to_srgb(self) -> Srgb {
        Srgb {
            r: encode_gamma(self.r),
            g: encode_gamma(self.g),
            b: encode_gamma(self.b),
        }
    }

    pub fn to_oklab(self) -> OkLab {
        let l = (0.4122214708 * self.r + 0.5363325363 * self.g + 0.0514459929 * self.b).cbrt();
        let m = (0.2119034982 * self.r + 0.6806995451 * self.g + 0.1073969566 * self.b).cbrt();
        let s = (0.0883024619 * self.r + 0.2817188376 * self.g + 0.6299787005 * self.b).cbrt();
        OkLab {
            l: 0.2104542553 * l + 0.7936177850 * m - 0.0040720468 * s,
            a: 1.9779984951 * l - 2.4285922050 * m + 0.4505937099 * s,
            b: 0.0259040371 * l + 0.7827717662 * m - 0.8086757660 * s,
        }
    }
}

impl OkLab {
    pub fn to_linear(self) -> LinearRgb {
        let l = (self.l + 0.3963377774 * self.a + 0.2158037573 * self.b).powi(3);
        let m = (self.l - 0.1055613458 * self.a - 0.0638541728 * self.b).powi(3);
        let s = (self.l - 0.0894841775 * self.a - 1.2914855480 * self.b).powi(3);
        LinearRgb {
            r: 4.0767416621 * l - 3.3077115913 * m + 0.2309699292 * s,
            g: -1.2684380046 * l + 2.6097574011 * m - 0.3413193965 * s,
            b: -0.0041960863 * l - 0.7034186147 * m + 1.7076147010 * s,
        }
    }

    /// Converts to sRGB, clamping each channel into [0, 1].
    pub fn to_srgb(self) -> Srgb {
        let srgb = self.to_linear().to_srgb();
        Srgb {
            r: srgb.r.clamp(0.0, 1.0),
            g: srgb.g.clamp(0.0, 1.0),
            b: srgb.b.clamp(0.0, 1.0),
        }
    }

    /// Straight-line interpolation between two OKLab colors.
    pub fn lerp(self, other: OkLab, t: f64) -> OkLab {
        OkLab {
            l: self.l + t * (other.l - self.l),
            a: self.a + t * (other.a - self.a),
            b: self.b + t * (other.b - self.b),
        }
    }
}

fn decode_gamma(c: f64) -> f64 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn encode_gamma(c: f64) -> f64 {
    if c <= 0.0031308 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}
