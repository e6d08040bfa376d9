use std::collections::HashSet;
use std::sync::LazyLock;

use strum::{Display, EnumIter, EnumString};

use crate::{Appearance, ColorDefinition, ConfigurationError, StepSchedule};

/// `(name, hue, saturation, min lightness, max lightness)`
type DefinitionParams = (&'static str, f64, f64, u8, u8);

const LIGHT_PARAMS: [DefinitionParams; 7] = [
    ("Red", 10., 75., 5, 92),
    ("Orange", 30., 75., 7, 89),
    ("Yellow", 60., 80., 4, 96),
    ("Green", 120., 60., 3, 99),
    ("Cyan", 180., 75., 3, 98),
    ("Blue", 240., 75., 3, 95),
    ("Purple", 290., 75., 3, 95),
];

// Dark backgrounds need brighter, more saturated swatches.
const DARK_PARAMS: [DefinitionParams; 7] = [
    ("Red", 10., 90., 8, 93),
    ("Orange", 30., 90., 10, 93),
    ("Yellow", 60., 80., 10, 93),
    ("Green", 120., 70., 8, 98),
    ("Cyan", 180., 80., 8, 98),
    ("Blue", 240., 90., 8, 95),
    ("Purple", 290., 90., 8, 95),
];

const NEUTRAL_PARAMS: [DefinitionParams; 2] = [
    ("Neutral0", 5., 0., 0, 100),
    ("Neutral1", 10., 0., 0, 100),
];

static BUILTIN: LazyLock<RampSpecRegistry> = LazyLock::new(|| {
    fn definitions(params: &[DefinitionParams]) -> Vec<ColorDefinition> {
        params
            .iter()
            .map(|&(name, hue, saturation, min, max)| {
                ColorDefinition::new(name, hue, saturation, min, max)
                    .expect("built-in color definitions are in range")
            })
            .collect()
    }

    RampSpecRegistry {
        light: definitions(&LIGHT_PARAMS),
        dark: definitions(&DARK_PARAMS),
        neutral: definitions(&NEUTRAL_PARAMS),
        chromatic_schedule: StepSchedule::chromatic().clone(),
        neutral_schedule: StepSchedule::neutral().clone(),
    }
});

/// A set of definitions that can be turned into a palette.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Display, EnumIter, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum RegistryVariant {
    Light,
    Dark,
    Neutral,
}

impl From<Appearance> for RegistryVariant {
    fn from(appearance: Appearance) -> Self {
        match appearance {
            Appearance::Light => Self::Light,
            Appearance::Dark => Self::Dark,
        }
    }
}

/// The color definitions for every variant, and the schedules they are
/// generated against.
///
/// A registry is immutable once built.
#[derive(Debug, PartialEq, Clone)]
pub struct RampSpecRegistry {
    light: Vec<ColorDefinition>,
    dark: Vec<ColorDefinition>,
    neutral: Vec<ColorDefinition>,
    chromatic_schedule: StepSchedule,
    neutral_schedule: StepSchedule,
}

impl RampSpecRegistry {
    /// The registry shipped with the crate.
    pub fn builtin() -> &'static RampSpecRegistry {
        &BUILTIN
    }

    /// Builds a registry, checking that the light and dark variants define the
    /// same colors in the same order and that no variant repeats a name.
    pub fn new(
        light: Vec<ColorDefinition>,
        dark: Vec<ColorDefinition>,
        neutral: Vec<ColorDefinition>,
        chromatic_schedule: StepSchedule,
        neutral_schedule: StepSchedule,
    ) -> Result<Self, ConfigurationError> {
        for (variant, definitions) in [
            (RegistryVariant::Light, &light),
            (RegistryVariant::Dark, &dark),
            (RegistryVariant::Neutral, &neutral),
        ] {
            let mut seen = HashSet::new();
            for definition in definitions {
                if !seen.insert(definition.name()) {
                    return Err(ConfigurationError::DuplicateName {
                        variant: variant.to_string(),
                        name: definition.name().to_string(),
                    });
                }
            }
        }

        fn names(definitions: &[ColorDefinition]) -> Vec<String> {
            definitions
                .iter()
                .map(|definition| definition.name().to_string())
                .collect()
        }

        let (light_names, dark_names) = (names(&light), names(&dark));
        if light_names != dark_names {
            return Err(ConfigurationError::VariantMismatch {
                light: light_names,
                dark: dark_names,
            });
        }

        Ok(Self {
            light,
            dark,
            neutral,
            chromatic_schedule,
            neutral_schedule,
        })
    }

    pub fn definitions(&self, variant: RegistryVariant) -> &[ColorDefinition] {
        match variant {
            RegistryVariant::Light => &self.light,
            RegistryVariant::Dark => &self.dark,
            RegistryVariant::Neutral => &self.neutral,
        }
    }

    /// The chromatic definitions for an externally chosen appearance.
    pub fn chromatic(&self, appearance: Appearance) -> &[ColorDefinition] {
        self.definitions(appearance.into())
    }

    pub fn neutral(&self) -> &[ColorDefinition] {
        &self.neutral
    }

    pub fn schedule(&self, variant: RegistryVariant) -> &StepSchedule {
        match variant {
            RegistryVariant::Light | RegistryVariant::Dark => &self.chromatic_schedule,
            RegistryVariant::Neutral => &self.neutral_schedule,
        }
    }

    pub fn chromatic_schedule(&self) -> &StepSchedule {
        &self.chromatic_schedule
    }

    pub fn neutral_schedule(&self) -> &StepSchedule {
        &self.neutral_schedule
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;

    fn names(definitions: &[ColorDefinition]) -> Vec<&str> {
        definitions.iter().map(ColorDefinition::name).collect()
    }

    #[test]
    fn test_builtin_registry() {
        let registry = RampSpecRegistry::builtin();

        assert_eq!(
            names(registry.chromatic(Appearance::Light)),
            ["Red", "Orange", "Yellow", "Green", "Cyan", "Blue", "Purple"]
        );
        assert_eq!(
            names(registry.chromatic(Appearance::Light)),
            names(registry.chromatic(Appearance::Dark))
        );
        assert_eq!(names(registry.neutral()), ["Neutral0", "Neutral1"]);

        let light_red = &registry.chromatic(Appearance::Light)[0];
        let dark_red = &registry.chromatic(Appearance::Dark)[0];
        assert_eq!(light_red.hue(), dark_red.hue());
        assert_eq!((light_red.saturation(), light_red.min_lightness()), (75., 5));
        assert_eq!((dark_red.saturation(), dark_red.min_lightness()), (90., 8));

        assert_eq!(registry.schedule(RegistryVariant::Light), StepSchedule::chromatic());
        assert_eq!(registry.schedule(RegistryVariant::Neutral), StepSchedule::neutral());
    }

    #[test]
    fn test_builtin_params_are_all_valid() {
        let registry = RampSpecRegistry::builtin();
        assert_eq!(registry.definitions(RegistryVariant::Light).len(), LIGHT_PARAMS.len());
        assert_eq!(registry.definitions(RegistryVariant::Dark).len(), DARK_PARAMS.len());
        assert_eq!(registry.definitions(RegistryVariant::Neutral).len(), NEUTRAL_PARAMS.len());

        let rebuilt = RampSpecRegistry::new(
            registry.definitions(RegistryVariant::Light).to_vec(),
            registry.definitions(RegistryVariant::Dark).to_vec(),
            registry.neutral().to_vec(),
            registry.chromatic_schedule().clone(),
            registry.neutral_schedule().clone(),
        );
        assert_eq!(rebuilt.as_ref(), Ok(registry));
    }

    #[test]
    fn test_dark_flag_selects_variant() {
        let registry = RampSpecRegistry::builtin();
        assert_eq!(
            registry.chromatic(Appearance::from_dark_flag(true)),
            registry.definitions(RegistryVariant::Dark)
        );
        assert_eq!(
            registry.chromatic(Appearance::from_dark_flag(false)),
            registry.definitions(RegistryVariant::Light)
        );
    }

    #[test]
    fn test_variant_names() {
        assert_eq!(
            RegistryVariant::iter().map(|variant| variant.to_string()).collect::<Vec<_>>(),
            ["light", "dark", "neutral"]
        );
        assert_eq!("neutral".parse::<RegistryVariant>(), Ok(RegistryVariant::Neutral));
    }

    #[test]
    fn test_mismatched_variants_are_rejected() {
        let definition = |name: &str| ColorDefinition::new(name, 10., 50., 10, 90).unwrap();

        let error = RampSpecRegistry::new(
            vec![definition("Red"), definition("Blue")],
            vec![definition("Blue"), definition("Red")],
            vec![],
            StepSchedule::chromatic().clone(),
            StepSchedule::neutral().clone(),
        )
        .unwrap_err();
        assert!(matches!(error, ConfigurationError::VariantMismatch { .. }));

        let error = RampSpecRegistry::new(
            vec![definition("Red")],
            vec![definition("Red")],
            vec![definition("Gray"), definition("Gray")],
            StepSchedule::chromatic().clone(),
            StepSchedule::neutral().clone(),
        )
        .unwrap_err();
        assert_eq!(
            error,
            ConfigurationError::DuplicateName {
                variant: "neutral".into(),
                name: "Gray".into()
            }
        );
        assert_eq!(error.color_name(), Some("Gray"));
    }
}
