//! Color conversion helpers
//!
//! Converts packed `0xRRGGBB` hex values and hue/saturation/lightness triples
//! into linear `[f32; 3]` RGB components in `[0, 1]`, the format used by
//! vertex colors, materials and lights throughout the renderer.

/// A hue/saturation/lightness triple with every component in `[0, 1]`.
///
/// Hue is expressed as a fraction of a full turn (0.5 == 180 degrees).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
}

impl Hsl {
    pub const fn new(hue: f32, saturation: f32, lightness: f32) -> Self {
        Self {
            hue,
            saturation,
            lightness,
        }
    }

    /// Converts to RGB components in `[0, 1]`
    pub fn to_rgb(self) -> [f32; 3] {
        hsl_to_rgb(self.hue, self.saturation, self.lightness)
    }
}

/// Unpacks a `0xRRGGBB` value into RGB components in `[0, 1]`
pub fn hex_to_rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

/// Converts a hue/saturation/lightness triple to RGB
///
/// Hue wraps into `[0, 1)`, saturation and lightness are clamped to `[0, 1]`.
pub fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> [f32; 3] {
    let h = hue.rem_euclid(1.0);
    let s = saturation.clamp(0.0, 1.0);
    let l = lightness.clamp(0.0, 1.0);

    if s == 0.0 {
        return [l, l, l];
    }

    let high = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let low = 2.0 * l - high;

    [
        hue_to_channel(low, high, h + 1.0 / 3.0),
        hue_to_channel(low, high, h),
        hue_to_channel(low, high, h - 1.0 / 3.0),
    ]
}

fn hue_to_channel(low: f32, high: f32, t: f32) -> f32 {
    let t = if t < 0.0 {
        t + 1.0
    } else if t > 1.0 {
        t - 1.0
    } else {
        t
    };

    if t < 1.0 / 6.0 {
        low + (high - low) * 6.0 * t
    } else if t < 0.5 {
        high
    } else if t < 2.0 / 3.0 {
        low + (high - low) * 6.0 * (2.0 / 3.0 - t)
    } else {
        low
    }
}
