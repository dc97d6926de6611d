//! Tunables for the three motion components.
//!
//! Every field has a default, so a page can override just the values it cares
//! about with a partial JSON document.

use serde::Deserialize;

use crate::error::MotionError;
use crate::surface::Rgba;

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    pub particles: ParticleConfig,
    pub timeline: TimelineConfig,
    pub track: TrackConfig,
}

impl MotionConfig {
    pub fn from_json(json: &str) -> Result<Self, MotionError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    /// Particles created per (re)generation.
    pub count: usize,
    pub min_radius: f64,
    /// Radius is `min_radius + rand * radius_spread`.
    pub radius_spread: f64,
    /// Each velocity component is drawn from `[-max_speed, max_speed)`.
    pub max_speed: f64,
    pub glow_blur: f64,
    pub palette: Vec<Rgba>,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: 50,
            min_radius: 1.0,
            radius_spread: 2.0,
            max_speed: 0.25,
            glow_blur: 10.0,
            palette: vec![Rgba::new(255, 255, 255, 0.7), Rgba::new(255, 255, 255, 0.5)],
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// Viewport widths below this use the compact layout.
    pub breakpoint: f64,
    /// Scene height per item, in viewport heights * 100.
    pub expanded_vh_per_item: f64,
    pub compact_vh_per_item: f64,
    pub min_scene_vh: f64,
    /// Entrance offset magnitude along the timeline's cross axis (expanded).
    pub expanded_offset: f64,
    /// Entrance offset along the horizontal axis (compact).
    pub compact_offset: f64,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            breakpoint: 768.0,
            expanded_vh_per_item: 120.0,
            compact_vh_per_item: 160.0,
            min_scene_vh: 120.0,
            expanded_offset: 60.0,
            compact_offset: -50.0,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct TrackConfig {
    /// Units per second.
    pub speed: f64,
    /// Visible ratio the section must exceed before the track moves.
    pub visibility_threshold: f64,
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            speed: 80.0,
            visibility_threshold: 0.1,
        }
    }
}
