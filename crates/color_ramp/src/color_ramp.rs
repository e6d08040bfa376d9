//! # Color Ramp
//!
//! Generates graduated color ramps from hue/saturation/lightness definitions
//! and serializes them for downstream tooling.
//!
//! ## Overview
//!
//! A [`ColorDefinition`] describes one hue at one saturation, together with the
//! lightness range its ramp should span. Pairing a definition with a
//! [`StepSchedule`] yields a [`ColorRamp`]: one swatch per step, with lightness
//! spaced evenly by position. A [`Palette`] is the ordered collection of ramps
//! for one registry variant, and can be exported as JSON, CSV, DTCG design
//! tokens, or Figma color styles.

mod color_space;
mod content;
mod definition;
mod delivery;
mod export;
mod ramp;
mod registry;
mod schedule;

pub use color_space::*;
pub use content::*;
pub use definition::*;
pub use delivery::*;
pub use export::*;
pub use ramp::*;
pub use registry::*;
pub use schedule::*;

/// The appearance a chromatic palette is generated for.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Appearance {
    /// A light appearance.
    Light,
    /// A dark appearance.
    #[default]
    Dark,
}

impl Appearance {
    /// Maps an externally owned "dark mode" flag to an [`Appearance`].
    pub fn from_dark_flag(is_dark: bool) -> Self {
        if is_dark { Self::Dark } else { Self::Light }
    }

    /// Returns whether the appearance is light.
    pub fn is_light(&self) -> bool {
        match self {
            Self::Light => true,
            Self::Dark => false,
        }
    }
}
