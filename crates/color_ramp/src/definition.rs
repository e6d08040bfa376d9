use thiserror::Error;

/// A malformed color definition, step schedule, or registry.
#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigurationError {
    #[error("color definition has an empty name")]
    EmptyName,
    #[error("color {name:?}: hue {hue} is outside [0, 360)")]
    HueOutOfRange { name: String, hue: f64 },
    #[error("color {name:?}: saturation {saturation} is outside [0, 100]")]
    SaturationOutOfRange { name: String, saturation: f64 },
    #[error("color {name:?}: lightness {lightness} is outside [0, 100]")]
    LightnessOutOfRange { name: String, lightness: u8 },
    #[error("color {name:?}: minimum lightness {min} is greater than maximum lightness {max}")]
    InvertedLightness { name: String, min: u8, max: u8 },
    #[error("color {name:?} is defined more than once in the {variant} variant")]
    DuplicateName { variant: String, name: String },
    #[error(
        "light and dark variants must define the same colors in the same order \
         (light defines {light:?}, dark defines {dark:?})"
    )]
    VariantMismatch {
        light: Vec<String>,
        dark: Vec<String>,
    },
    #[error("step schedule is empty")]
    EmptySchedule,
    #[error("step label {label} is outside [0, 100]")]
    StepOutOfRange { label: u32 },
    #[error("step labels must be strictly increasing, found {previous} followed by {next}")]
    StepsNotIncreasing { previous: u32, next: u32 },
}

impl ConfigurationError {
    /// The name of the color definition at fault, if the error concerns one.
    pub fn color_name(&self) -> Option<&str> {
        match self {
            Self::HueOutOfRange { name, .. }
            | Self::SaturationOutOfRange { name, .. }
            | Self::LightnessOutOfRange { name, .. }
            | Self::InvertedLightness { name, .. }
            | Self::DuplicateName { name, .. } => Some(name),
            Self::EmptyName
            | Self::VariantMismatch { .. }
            | Self::EmptySchedule
            | Self::StepOutOfRange { .. }
            | Self::StepsNotIncreasing { .. } => None,
        }
    }
}

/// The parameters of a single ramp: one hue at one saturation, spanning a
/// lightness range.
///
/// Every field is validated on construction, so a `ColorDefinition` that
/// exists is always safe to generate from.
#[derive(Debug, PartialEq, Clone)]
pub struct ColorDefinition {
    name: String,
    hue: f64,
    saturation: f64,
    min_lightness: u8,
    max_lightness: u8,
}

impl ColorDefinition {
    pub const MAX_HUE: f64 = 360.;
    pub const MAX_SATURATION: f64 = 100.;
    pub const MAX_LIGHTNESS: u8 = 100;

    pub fn new(
        name: impl Into<String>,
        hue: f64,
        saturation: f64,
        min_lightness: u8,
        max_lightness: u8,
    ) -> Result<Self, ConfigurationError> {
        let name = name.into();

        if name.trim().is_empty() {
            return Err(ConfigurationError::EmptyName);
        }

        if !(0. ..Self::MAX_HUE).contains(&hue) {
            return Err(ConfigurationError::HueOutOfRange { name, hue });
        }

        if !(0. ..=Self::MAX_SATURATION).contains(&saturation) {
            return Err(ConfigurationError::SaturationOutOfRange { name, saturation });
        }

        for lightness in [min_lightness, max_lightness] {
            if lightness > Self::MAX_LIGHTNESS {
                return Err(ConfigurationError::LightnessOutOfRange { name, lightness });
            }
        }

        if min_lightness > max_lightness {
            return Err(ConfigurationError::InvertedLightness {
                name,
                min: min_lightness,
                max: max_lightness,
            });
        }

        Ok(Self {
            name,
            hue,
            saturation,
            min_lightness,
            max_lightness,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hue(&self) -> f64 {
        self.hue
    }

    pub fn saturation(&self) -> f64 {
        self.saturation
    }

    pub fn min_lightness(&self) -> u8 {
        self.min_lightness
    }

    pub fn max_lightness(&self) -> u8 {
        self.max_lightness
    }
}
