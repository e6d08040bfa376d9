use std::fmt;

use palette::white_point::D65;
use palette::{FromColor, Srgb};
use thiserror::Error;

/// A perceptual hue/saturation/lightness model that can be resolved to sRGB.
///
/// Inputs are `hue` in degrees `[0, 360)`, `saturation` and `lightness` in
/// `[0, 100]`. The returned channels are red, green and blue, each in `[0, 1]`.
pub trait ColorSpace: Send + Sync {
    fn to_rgb(&self, hue: f64, saturation: f64, lightness: f64) -> [f64; 3];
}

/// The HSLuv color space, backed by [`palette::Hsluv`].
#[derive(Debug, Default, Clone, Copy)]
pub struct Hsluv;

impl ColorSpace for Hsluv {
    fn to_rgb(&self, hue: f64, saturation: f64, lightness: f64) -> [f64; 3] {
        let hsluv = palette::Hsluv::<D65, f64>::new(hue, saturation, lightness);
        let rgb = Srgb::<f64>::from_color(hsluv);
        [rgb.red, rgb.green, rgb.blue]
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid hex color {0:?}, expected #rrggbb")]
pub struct InvalidHexColor(pub String);

/// An opaque 8-bit sRGB color.
#[derive(Debug, Default, PartialEq, Eq, Hash, Clone, Copy)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Quantizes unit-range channels: scale by 255, round, clamp to `[0, 255]`.
    pub fn from_unit_channels([r, g, b]: [f64; 3]) -> Self {
        fn quantize(channel: f64) -> u8 {
            let scaled = (channel * 255.).round();
            if scaled.is_nan() {
                0
            } else {
                scaled.clamp(0., 255.) as u8
            }
        }

        Self {
            r: quantize(r),
            g: quantize(g),
            b: quantize(b),
        }
    }

    /// Returns the channels as fractions of 255.
    pub fn to_unit_channels(self) -> [f64; 3] {
        [
            self.r as f64 / 255.,
            self.g as f64 / 255.,
            self.b as f64 / 255.,
        ]
    }

    /// Lowercase `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.r, self.g, self.b)
    }
}

impl TryFrom<&str> for Rgb {
    type Error = InvalidHexColor;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let invalid = || InvalidHexColor(value.to_string());
        let digits = value.strip_prefix('#').ok_or_else(invalid)?;
        if digits.len() != 6 || !digits.bytes().all(|byte| byte.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| invalid())
        };

        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_hex_round_trip_is_exact() {
        for r in (0..=255u8).step_by(5) {
            for g in (0..=255u8).step_by(3) {
                for b in [0, 1, 15, 16, 127, 128, 254, 255] {
                    let rgb = Rgb::new(r, g, b);
                    assert_eq!(Rgb::try_from(rgb.to_hex().as_str()), Ok(rgb));
                }
            }
        }
    }

    #[test]
    fn test_hex_is_lowercase_and_zero_padded() {
        assert_eq!(Rgb::new(0x12, 0x04, 0xab).to_hex(), "#1204ab");
        assert_eq!(Rgb::new(0, 0, 0).to_hex(), "#000000");
    }

    #[test]
    fn test_invalid_hex_is_rejected() {
        for input in ["123456", "#12345", "#12345g", "#1234567", "", "#+12345"] {
            assert_eq!(
                Rgb::try_from(input),
                Err(InvalidHexColor(input.to_string())),
                "{input:?} should be rejected"
            );
        }
        assert_eq!(Rgb::try_from("#FFaa00"), Ok(Rgb::new(0xff, 0xaa, 0x00)));
    }

    #[test]
    fn test_unit_channels_are_rounded_and_clamped() {
        assert_eq!(
            Rgb::from_unit_channels([-0.2, 0.5, 1.3]),
            Rgb::new(0, 128, 255)
        );
        assert_eq!(
            Rgb::from_unit_channels([f64::NAN, 0.0, 1.0]),
            Rgb::new(0, 0, 255)
        );
        assert_eq!(Rgb::new(0, 51, 255).to_unit_channels(), [0.0, 0.2, 1.0]);
    }

    #[test]
    fn test_hsluv_extremes() {
        let space = Hsluv;
        assert_eq!(
            Rgb::from_unit_channels(space.to_rgb(240., 90., 0.)),
            Rgb::new(0, 0, 0)
        );
        assert_eq!(
            Rgb::from_unit_channels(space.to_rgb(10., 75., 100.)),
            Rgb::new(255, 255, 255)
        );

        for lightness in [10., 37., 50., 82.] {
            // Achromatic up to quantization noise.
            let gray = Rgb::from_unit_channels(space.to_rgb(5., 0., lightness));
            assert!(gray.r.abs_diff(gray.g) <= 1, "{gray:?}");
            assert!(gray.g.abs_diff(gray.b) <= 1, "{gray:?}");
        }
    }

    #[test]
    fn test_hsluv_channels_stay_in_unit_range() {
        let space = Hsluv;
        for hue in [0., 10., 60., 120., 180., 240., 290., 359.] {
            for lightness in [0., 25., 50., 75., 100.] {
                for channel in space.to_rgb(hue, 100., lightness) {
                    assert!((0.0..=1.0).contains(&channel), "{hue} {lightness} {channel}");
                }
            }
        }
    }
}
