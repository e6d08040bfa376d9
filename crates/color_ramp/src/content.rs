use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{ColorDefinition, ConfigurationError, RampSpecRegistry, RegistryVariant, StepSchedule};

/// The serialized form of a [`RampSpecRegistry`].
///
/// Every section is optional. Missing sections are taken from the built-in
/// registry.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct RampSpecContent {
    /// Hue-bearing colors, one set per appearance.
    pub chromatic: Option<ChromaticContent>,
    /// Theme-invariant neutral colors.
    pub neutral: Option<Vec<ColorDefinitionContent>>,
    pub steps: Option<StepsContent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ChromaticContent {
    pub light: Vec<ColorDefinitionContent>,
    /// Must name the same colors as `light`, in the same order.
    pub dark: Vec<ColorDefinitionContent>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct StepsContent {
    /// Step labels for chromatic ramps. Strictly increasing, each in `0..=100`.
    pub chromatic: Option<Vec<u32>>,
    /// Step labels for neutral ramps. Strictly increasing, each in `0..=100`.
    pub neutral: Option<Vec<u32>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ColorDefinitionContent {
    pub name: String,
    /// HSLuv hue in degrees, `[0, 360)`.
    pub hue: f64,
    /// HSLuv saturation, `[0, 100]`.
    pub saturation: f64,
    /// Lightness of the first step, `[0, 100]`.
    pub min_lightness: u8,
    /// Lightness of the last step, `[0, 100]`.
    pub max_lightness: u8,
}

impl From<&ColorDefinition> for ColorDefinitionContent {
    fn from(definition: &ColorDefinition) -> Self {
        Self {
            name: definition.name().to_string(),
            hue: definition.hue(),
            saturation: definition.saturation(),
            min_lightness: definition.min_lightness(),
            max_lightness: definition.max_lightness(),
        }
    }
}

impl TryFrom<ColorDefinitionContent> for ColorDefinition {
    type Error = ConfigurationError;

    fn try_from(content: ColorDefinitionContent) -> Result<Self, Self::Error> {
        ColorDefinition::new(
            content.name,
            content.hue,
            content.saturation,
            content.min_lightness,
            content.max_lightness,
        )
    }
}

impl From<&RampSpecRegistry> for RampSpecContent {
    fn from(registry: &RampSpecRegistry) -> Self {
        let definitions = |variant| {
            registry
                .definitions(variant)
                .iter()
                .map(ColorDefinitionContent::from)
                .collect::<Vec<_>>()
        };

        Self {
            chromatic: Some(ChromaticContent {
                light: definitions(RegistryVariant::Light),
                dark: definitions(RegistryVariant::Dark),
            }),
            neutral: Some(definitions(RegistryVariant::Neutral)),
            steps: Some(StepsContent {
                chromatic: Some(registry.chromatic_schedule().labels().to_vec()),
                neutral: Some(registry.neutral_schedule().labels().to_vec()),
            }),
        }
    }
}

impl TryFrom<RampSpecContent> for RampSpecRegistry {
    type Error = ConfigurationError;

    fn try_from(content: RampSpecContent) -> Result<Self, Self::Error> {
        let builtin = RampSpecRegistry::builtin();

        fn definitions(
            content: Option<Vec<ColorDefinitionContent>>,
            builtin: &[ColorDefinition],
        ) -> Result<Vec<ColorDefinition>, ConfigurationError> {
            match content {
                Some(content) => content.into_iter().map(ColorDefinition::try_from).collect(),
                None => Ok(builtin.to_vec()),
            }
        }

        fn schedule(
            labels: Option<Vec<u32>>,
            builtin: &StepSchedule,
        ) -> Result<StepSchedule, ConfigurationError> {
            match labels {
                Some(labels) => StepSchedule::new(labels),
                None => Ok(builtin.clone()),
            }
        }

        let (light, dark) = match content.chromatic {
            Some(chromatic) => (Some(chromatic.light), Some(chromatic.dark)),
            None => (None, None),
        };
        let steps = content.steps.unwrap_or_default();

        RampSpecRegistry::new(
            definitions(light, builtin.definitions(RegistryVariant::Light))?,
            definitions(dark, builtin.definitions(RegistryVariant::Dark))?,
            definitions(content.neutral, builtin.neutral())?,
            schedule(steps.chromatic, builtin.chromatic_schedule())?,
            schedule(steps.neutral, builtin.neutral_schedule())?,
        )
    }
}
