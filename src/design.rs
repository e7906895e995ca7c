//! Design parameters for the store icon
//!
//! Every length in [`Design`] is a fraction of the supersampled canvas edge, so the
//! artwork scales with `supersample` while the final `size` stays independent of it.
//! [`Design::geometry`] turns those fractions into the pixel values the renderer draws with.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Largest supersampled canvas edge accepted, about 1 GiB of RGBA pixels
pub const MAX_SUPERSAMPLE: u32 = 16384;

/// An RGB triple, serialized as `[r, g, b]`
pub type Rgb = [u8; 3];

/// Full description of the icon artwork
///
/// Can be overridden field by field from a JSON document; missing fields keep their defaults.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Design {
    /// Edge length of the square working canvas in pixels
    pub supersample: u32,

    /// Edge length of the saved PNG in pixels
    pub size: u32,

    /// Background color at the top row
    pub gradient_top: Rgb,

    /// Background color at the bottom row
    pub gradient_bottom: Rgb,

    /// Corner radius of the rounded square silhouette
    pub corner_radius: f32,

    /// Outer radius of the clock ring
    pub clock_radius: f32,

    /// Stroke width of the clock ring
    pub ring_width: f32,

    /// Distance of the marker centers inside the clock radius
    pub marker_inset: f32,

    /// Radius of the eight ordinary hour markers
    pub marker_radius: f32,

    /// Radius of the markers at 12, 3, 6 and 9
    pub cardinal_marker_radius: f32,

    /// Dial position of the hour hand (0-12)
    pub hour_position: f32,

    /// Hour hand length, as a fraction of the clock radius
    pub hour_hand_length: f32,

    /// Stroke width of the hour hand
    pub hour_hand_width: f32,

    /// Dial position of the minute hand (0-12)
    pub minute_position: f32,

    /// Minute hand length, as a fraction of the clock radius
    pub minute_hand_length: f32,

    /// Stroke width of the minute hand
    pub minute_hand_width: f32,

    /// Radius of the disc covering the hand pivot
    pub cap_radius: f32,

    /// Outer radius of the prohibition ring
    pub ban_radius: f32,

    /// Stroke width of the prohibition ring and slash
    pub ban_width: f32,

    /// How far the slash reaches past the inner edge of the prohibition ring
    pub slash_overlap: f32,

    /// Color of the prohibition ring and slash
    pub ban_color: Rgb,
}

impl Default for Design {
    fn default() -> Self {
        Self {
            supersample: 512,
            size: 128,
            gradient_top: [30, 30, 160],
            gradient_bottom: [10, 130, 170],
            corner_radius: 0.2,
            clock_radius: 0.28,
            ring_width: 0.025,
            marker_inset: 0.04,
            marker_radius: 0.012,
            cardinal_marker_radius: 0.018,
            hour_position: 10.0,
            hour_hand_length: 0.5,
            hour_hand_width: 0.025,
            minute_position: 2.0,
            minute_hand_length: 0.7,
            minute_hand_width: 0.018,
            cap_radius: 0.02,
            ban_radius: 0.36,
            ban_width: 0.045,
            slash_overlap: 2.0 / 512.0,
            ban_color: [230, 55, 55],
        }
    }
}

/// A straight hand anchored at the clock center
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hand {
    /// Direction in radians, 0 pointing right and growing clockwise (image y grows down)
    pub angle: f32,
    pub length: f32,
    pub width: f32,
}

impl Hand {
    /// End point of the hand relative to the given center
    pub fn tip(&self, center: f32) -> (f32, f32) {
        (
            center + self.length * self.angle.cos(),
            center + self.length * self.angle.sin(),
        )
    }
}

/// Pixel measurements derived from a [`Design`] for its supersampled canvas
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    pub canvas: u32,
    pub center: f32,
    pub corner_radius: f32,
    pub clock_radius: f32,
    pub ring_width: f32,
    pub marker_ring_radius: f32,
    pub marker_radius: f32,
    pub cardinal_marker_radius: f32,
    pub hour_hand: Hand,
    pub minute_hand: Hand,
    pub cap_radius: f32,
    pub ban_radius: f32,
    pub ban_width: f32,
    /// Distance from the center to either end of the slash
    pub slash_reach: f32,
}

impl Geometry {
    /// Center of hour marker `index` (0 is twelve o'clock, counting clockwise)
    pub fn marker_center(&self, index: u32) -> (f32, f32) {
        let angle = dial_angle(index as f32);
        (
            self.center + self.marker_ring_radius * angle.cos(),
            self.center + self.marker_ring_radius * angle.sin(),
        )
    }

    /// Radius of hour marker `index`; the quarter-hour markers are drawn larger
    pub fn marker_size(&self, index: u32) -> f32 {
        if index % 3 == 0 {
            self.cardinal_marker_radius
        } else {
            self.marker_radius
        }
    }
}

/// Angle of a dial position, with 12 o'clock straight up
pub fn dial_angle(position: f32) -> f32 {
    (position * 30.0 - 90.0).to_radians()
}

impl Design {
    /// Load a design from a JSON file, filling unspecified fields with defaults
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read design file {}", path.display()))?;
        let design: Design = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse design file {}", path.display()))?;
        Ok(design)
    }

    /// Reject designs the renderer cannot draw sensibly
    pub fn validate(&self) -> Result<()> {
        if self.supersample == 0 || self.size == 0 {
            anyhow::bail!("Canvas and output sizes must be non-zero");
        }
        if self.supersample > MAX_SUPERSAMPLE {
            anyhow::bail!(
                "Supersampled canvas {} exceeds the {} pixel limit",
                self.supersample,
                MAX_SUPERSAMPLE
            );
        }
        if self.size > self.supersample {
            anyhow::bail!(
                "Output size {} exceeds the supersampled canvas {}; the icon is only ever downscaled",
                self.size,
                self.supersample
            );
        }

        let fractions = [
            ("corner_radius", self.corner_radius),
            ("clock_radius", self.clock_radius),
            ("ring_width", self.ring_width),
            ("marker_inset", self.marker_inset),
            ("marker_radius", self.marker_radius),
            ("cardinal_marker_radius", self.cardinal_marker_radius),
            ("hour_hand_width", self.hour_hand_width),
            ("minute_hand_width", self.minute_hand_width),
            ("cap_radius", self.cap_radius),
            ("ban_radius", self.ban_radius),
            ("ban_width", self.ban_width),
            ("slash_overlap", self.slash_overlap),
        ];
        for (name, value) in fractions {
            if !value.is_finite() || value <= 0.0 || value > 0.5 {
                anyhow::bail!("{name} must be a fraction in (0, 0.5], got {value}");
            }
        }

        for (name, value) in [
            ("hour_hand_length", self.hour_hand_length),
            ("minute_hand_length", self.minute_hand_length),
        ] {
            if !value.is_finite() || value <= 0.0 || value > 1.0 {
                anyhow::bail!("{name} must be a fraction of the clock radius in (0, 1], got {value}");
            }
        }

        if !self.hour_position.is_finite() || !self.minute_position.is_finite() {
            anyhow::bail!("Hand positions must be finite");
        }

        Ok(())
    }

    /// Convert the fractional design into pixel measurements
    ///
    /// Stroke widths and radii are truncated to whole pixels; hand lengths and marker
    /// positions stay fractional.
    pub fn geometry(&self) -> Geometry {
        let canvas = self.supersample;
        let px = |fraction: f32| (canvas as f32 * fraction).trunc();

        let clock_radius = px(self.clock_radius);
        let ban_radius = px(self.ban_radius);
        let ban_width = px(self.ban_width);

        Geometry {
            canvas,
            center: (canvas / 2) as f32,
            corner_radius: px(self.corner_radius),
            clock_radius,
            ring_width: px(self.ring_width),
            marker_ring_radius: clock_radius - px(self.marker_inset),
            marker_radius: px(self.marker_radius),
            cardinal_marker_radius: px(self.cardinal_marker_radius),
            hour_hand: Hand {
                angle: dial_angle(self.hour_position),
                length: clock_radius * self.hour_hand_length,
                width: px(self.hour_hand_width),
            },
            minute_hand: Hand {
                angle: dial_angle(self.minute_position),
                length: clock_radius * self.minute_hand_length,
                width: px(self.minute_hand_width),
            },
            cap_radius: px(self.cap_radius),
            ban_radius,
            ban_width,
            slash_reach: ban_radius - (ban_width / 2.0).trunc() + px(self.slash_overlap),
        }
    }
}
