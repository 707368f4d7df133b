use scarlet::color::RGBColor;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// Opacity the severity color is drawn with behind a list row.
pub const DEFAULT_ALPHA: f32 = 0.4;

pub const NEUTRAL: [u8; 3] = [0x88, 0x88, 0x88];
pub const HEALTHY: [u8; 3] = [0x00, 0xFF, 0x00];
pub const CAUTION: [u8; 3] = [0xFF, 0xFF, 0x00];
pub const DANGER: [u8; 3] = [0xFF, 0x00, 0x00];

/// Clinical band a systolic reading falls into.
///
/// The outer cut-offs (below 100, above 310) carry no clinical meaning
/// and both render neutral.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize, EnumIter, Display)]
#[strum(serialize_all = "snake_case")]
pub enum SeverityBand {
    Low,
    Normal,
    Elevated,
    High,
    Severe,
    OutOfRange,
}

impl SeverityBand {
    /// Inclusive systolic bounds of the band, `None` meaning unbounded.
    #[must_use]
    pub const fn bounds(self) -> (Option<i32>, Option<i32>) {
        match self {
            Self::Low => (None, Some(99)),
            Self::Normal => (Some(100), Some(119)),
            Self::Elevated => (Some(120), Some(149)),
            Self::High => (Some(150), Some(169)),
            Self::Severe => (Some(170), Some(310)),
            Self::OutOfRange => (Some(311), None),
        }
    }

    /// Reference colors blended across the band, or the single color of a
    /// constant band.
    #[must_use]
    pub const fn endpoints(self) -> ([u8; 3], [u8; 3]) {
        match self {
            Self::Low | Self::OutOfRange => (NEUTRAL, NEUTRAL),
            Self::Normal => (NEUTRAL, HEALTHY),
            Self::Elevated => (HEALTHY, CAUTION),
            Self::High => (CAUTION, DANGER),
            Self::Severe => (DANGER, DANGER),
        }
    }

    /// Position of `systolic` within the band in `[0, 1]`.
    ///
    /// Constant bands always return `0.0`. The value is only meaningful
    /// when `systolic` lies inside the band.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn fraction(self, systolic: i32) -> f32 {
        match self {
            Self::Normal => 1.0 - (120 - systolic) as f32 / 20.0,
            Self::Elevated => 1.0 - (150 - systolic) as f32 / 30.0,
            Self::High => 1.0 - (170 - systolic) as f32 / 20.0,
            Self::Low | Self::Severe | Self::OutOfRange => 0.0,
        }
    }
}

/// Returns the band a systolic reading falls into.
#[must_use]
pub const fn band(systolic: i32) -> SeverityBand {
    match systolic {
        i32::MIN..=99 => SeverityBand::Low,
        100..=119 => SeverityBand::Normal,
        120..=149 => SeverityBand::Elevated,
        150..=169 => SeverityBand::High,
        170..=310 => SeverityBand::Severe,
        _ => SeverityBand::OutOfRange,
    }
}

/// Maps a systolic reading to its severity color.
///
/// Total over all integers. Inside the blended bands each 8-bit channel
/// is interpolated linearly and truncated, so band boundaries land
/// exactly on the reference colors.
#[must_use]
#[tracing::instrument(level = "trace")]
pub fn classify(systolic: i32) -> RGBColor {
    to_rgb(classify_channels(systolic))
}

/// Same as [`classify`] but returns the raw 8-bit channels.
#[must_use]
pub fn classify_channels(systolic: i32) -> [u8; 3] {
    let band = band(systolic);
    let (from, to) = band.endpoints();
    blend(from, to, band.fraction(systolic))
}

/// The severity color of `systolic` drawn at the given opacity.
#[must_use]
#[tracing::instrument(level = "trace")]
pub fn display_color(systolic: i32, alpha: f32) -> DisplayColor {
    DisplayColor::new(classify_channels(systolic), alpha)
}

/// Per channel `from * (1 - fraction) + to * fraction`, truncated.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::suboptimal_flops
)]
pub fn blend(from: [u8; 3], to: [u8; 3], fraction: f32) -> [u8; 3] {
    let inverse = 1.0 - fraction;
    let mut blended = [0; 3];
    for (channel, (a, b)) in blended.iter_mut().zip(from.into_iter().zip(to)) {
        *channel = (f32::from(a) * inverse + f32::from(b) * fraction) as u8;
    }
    blended
}

#[must_use]
pub fn to_rgb(channels: [u8; 3]) -> RGBColor {
    RGBColor {
        r: f64::from(channels[0]) / 255.0,
        g: f64::from(channels[1]) / 255.0,
        b: f64::from(channels[2]) / 255.0,
    }
}

/// Rounds the `[0, 1]` channels of `color` back to 8 bits.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn channels(color: &RGBColor) -> [u8; 3] {
    [color.r, color.g, color.b].map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
}

/// A color with opacity, ready for drawing.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct DisplayColor {
    pub rgb: [u8; 3],
    pub alpha: f32,
}

impl DisplayColor {
    #[must_use]
    pub const fn new(rgb: [u8; 3], alpha: f32) -> Self {
        Self { rgb, alpha }
    }

    /// A fully opaque color.
    #[must_use]
    pub const fn opaque(rgb: [u8; 3]) -> Self {
        Self::new(rgb, 1.0)
    }

    #[must_use]
    pub fn color(&self) -> RGBColor {
        to_rgb(self.rgb)
    }

    /// `#RRGGBBAA` with the alpha rounded to 8 bits.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_hex(&self) -> String {
        let alpha = (self.alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02X}{:02X}{:02X}{alpha:02X}",
            self.rgb[0], self.rgb[1], self.rgb[2]
        )
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn band_edges() {
        assert_eq!(band(i32::MIN), SeverityBand::Low);
        assert_eq!(band(99), SeverityBand::Low);
        assert_eq!(band(100), SeverityBand::Normal);
        assert_eq!(band(119), SeverityBand::Normal);
        assert_eq!(band(120), SeverityBand::Elevated);
        assert_eq!(band(149), SeverityBand::Elevated);
        assert_eq!(band(150), SeverityBand::High);
        assert_eq!(band(169), SeverityBand::High);
        assert_eq!(band(170), SeverityBand::Severe);
        assert_eq!(band(310), SeverityBand::Severe);
        assert_eq!(band(311), SeverityBand::OutOfRange);
        assert_eq!(band(i32::MAX), SeverityBand::OutOfRange);
    }

    #[test]
    fn bounds_agree_with_band() {
        for severity in SeverityBand::iter() {
            let (lower, upper) = severity.bounds();
            if let Some(lower) = lower {
                assert_eq!(band(lower), severity);
            }
            if let Some(upper) = upper {
                assert_eq!(band(upper), severity);
            }
        }
    }

    #[test]
    fn fractions_at_band_edges() {
        assert_relative_eq!(SeverityBand::Normal.fraction(100), 0.0);
        assert_relative_eq!(SeverityBand::Normal.fraction(110), 0.5);
        assert_relative_eq!(SeverityBand::Normal.fraction(120), 1.0);
        assert_relative_eq!(SeverityBand::Elevated.fraction(120), 0.0);
        assert_relative_eq!(SeverityBand::Elevated.fraction(135), 0.5);
        assert_relative_eq!(SeverityBand::High.fraction(150), 0.0);
        assert_relative_eq!(SeverityBand::High.fraction(160), 0.5);
        assert_relative_eq!(SeverityBand::Severe.fraction(200), 0.0);
    }

    #[test]
    fn boundaries_hit_reference_colors() {
        assert_eq!(classify_channels(100), NEUTRAL);
        assert_eq!(classify_channels(120), HEALTHY);
        assert_eq!(classify_channels(150), CAUTION);
        assert_eq!(classify_channels(170), DANGER);
        assert_eq!(classify_channels(310), DANGER);
    }

    #[test]
    fn outside_range_is_neutral() {
        for systolic in [i32::MIN, -40, 0, 80, 99, 311, 400, i32::MAX] {
            assert_eq!(classify_channels(systolic), NEUTRAL, "systolic {systolic}");
        }
    }

    #[test]
    fn midpoints_blend_evenly() {
        assert_eq!(classify_channels(110), [68, 195, 68]);
        assert_eq!(classify_channels(135), [127, 255, 0]);
        assert_eq!(classify_channels(160), [255, 127, 0]);
    }

    #[test]
    fn continuous_across_classified_range() {
        // Largest single-unit change is the red to yellow ramp, 255 / 20.
        for systolic in 100..310 {
            let current = classify_channels(systolic);
            let next = classify_channels(systolic + 1);
            for (a, b) in current.into_iter().zip(next) {
                assert!(
                    a.abs_diff(b) <= 13,
                    "jump between {systolic} and {}: {current:?} -> {next:?}",
                    systolic + 1
                );
            }
        }
    }

    #[test]
    fn classify_is_deterministic() {
        for systolic in 90..320 {
            assert_eq!(channels(&classify(systolic)), channels(&classify(systolic)));
        }
    }

    #[test]
    fn classify_scales_to_unit_range() {
        let color = classify(170);
        assert_relative_eq!(color.r, 1.0);
        assert_relative_eq!(color.g, 0.0);
        assert_relative_eq!(color.b, 0.0);
        assert_eq!(channels(&classify(110)), [68, 195, 68]);
    }

    #[test]
    fn display_color_uses_alpha() {
        let color = display_color(170, DEFAULT_ALPHA);
        assert_eq!(color.rgb, DANGER);
        assert_relative_eq!(color.alpha, 0.4);
        assert_eq!(color.to_hex(), "#FF000066");
    }

    #[test]
    fn band_names() {
        assert_eq!(SeverityBand::OutOfRange.to_string(), "out_of_range");
        assert_eq!(SeverityBand::Normal.to_string(), "normal");
    }
}
