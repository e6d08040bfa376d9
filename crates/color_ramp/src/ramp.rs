use std::sync::Arc;

use crate::{
    ColorDefinition, ColorSpace, Hsluv, RampSpecRegistry, RegistryVariant, Rgb, StepSchedule,
};

/// Which text color stays legible on top of a swatch.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TextContrast {
    /// Dark text, for swatches at lightness 50 and above.
    Dark,
    /// Light text, for swatches below lightness 50.
    Light,
}

impl TextContrast {
    pub const DARK_TEXT_THRESHOLD: u8 = 50;

    pub fn for_lightness(lightness: u8) -> Self {
        if lightness >= Self::DARK_TEXT_THRESHOLD {
            Self::Dark
        } else {
            Self::Light
        }
    }

    /// Reads the lightness out of an `hsl(h,s,l)` descriptor.
    ///
    /// Returns `None` when the descriptor does not have three numeric
    /// components or the lightness is not an integer.
    pub fn for_descriptor(descriptor: &str) -> Option<Self> {
        let components = descriptor
            .trim()
            .strip_prefix("hsl(")?
            .strip_suffix(')')?
            .split(',')
            .map(str::trim)
            .collect::<Vec<_>>();

        let [hue, saturation, lightness] = components.as_slice() else {
            return None;
        };
        hue.parse::<f64>().ok()?;
        saturation.parse::<f64>().ok()?;

        lightness.parse::<u8>().ok().map(Self::for_lightness)
    }
}

/// One swatch of a [`ColorRamp`].
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct RampEntry {
    pub(crate) step_label: u32,
    pub(crate) lightness: u8,
    pub(crate) hex: String,
    pub(crate) rgb: Rgb,
    pub(crate) descriptor: String,
}

impl RampEntry {
    pub(crate) fn new(step_label: u32, lightness: u8, rgb: Rgb, hue: f64, saturation: f64) -> Self {
        Self {
            step_label,
            lightness,
            hex: rgb.to_hex(),
            rgb,
            descriptor: format!("hsl({hue},{saturation},{lightness})"),
        }
    }

    pub fn step_label(&self) -> u32 {
        self.step_label
    }

    pub fn lightness(&self) -> u8 {
        self.lightness
    }

    /// Lowercase `#rrggbb`.
    pub fn hex(&self) -> &str {
        &self.hex
    }

    pub fn rgb(&self) -> Rgb {
        self.rgb
    }

    /// `hsl(h,s,l)`, with the generated lightness.
    pub fn descriptor(&self) -> &str {
        &self.descriptor
    }

    pub fn text_contrast(&self) -> TextContrast {
        TextContrast::for_lightness(self.lightness)
    }
}

/// The swatches generated for one [`ColorDefinition`], in schedule order.
#[derive(Debug, PartialEq, Clone)]
pub struct ColorRamp {
    pub name: String,
    pub hue: f64,
    pub saturation: f64,
    pub entries: Vec<RampEntry>,
}

/// An ordered collection of ramps generated against a single schedule.
#[derive(Debug, PartialEq, Clone)]
pub struct Palette {
    schedule: StepSchedule,
    ramps: Vec<ColorRamp>,
}

impl Palette {
    pub fn new(schedule: StepSchedule, ramps: Vec<ColorRamp>) -> Self {
        Self { schedule, ramps }
    }

    /// The schedule every ramp in the palette is expected to follow.
    pub fn schedule(&self) -> &StepSchedule {
        &self.schedule
    }

    pub fn ramps(&self) -> &[ColorRamp] {
        &self.ramps
    }

    pub fn is_empty(&self) -> bool {
        self.ramps.is_empty()
    }
}

/// Returns the lightness of every schedule position, spaced evenly by index.
///
/// The labels of the schedule are never consulted, only its length.
pub fn interpolate_lightness(min_lightness: u8, max_lightness: u8, steps: usize) -> Vec<u8> {
    if steps <= 1 {
        return vec![min_lightness; steps];
    }

    let min = min_lightness as f64;
    let span = max_lightness as f64 - min;
    let last = (steps - 1) as f64;

    (0..steps)
        .map(|index| (min + span * index as f64 / last).round() as u8)
        .collect()
}

/// Turns color definitions into ramps through a [`ColorSpace`].
#[derive(Clone)]
pub struct RampGenerator {
    color_space: Arc<dyn ColorSpace>,
}

impl Default for RampGenerator {
    fn default() -> Self {
        Self::new(Arc::new(Hsluv))
    }
}

impl RampGenerator {
    pub fn new(color_space: Arc<dyn ColorSpace>) -> Self {
        Self { color_space }
    }

    pub fn ramp(&self, definition: &ColorDefinition, schedule: &StepSchedule) -> ColorRamp {
        let lightnesses = interpolate_lightness(
            definition.min_lightness(),
            definition.max_lightness(),
            schedule.len(),
        );

        let entries = schedule
            .iter()
            .zip(lightnesses)
            .map(|(step_label, lightness)| {
                let channels = self.color_space.to_rgb(
                    definition.hue(),
                    definition.saturation(),
                    lightness as f64,
                );
                RampEntry::new(
                    step_label,
                    lightness,
                    Rgb::from_unit_channels(channels),
                    definition.hue(),
                    definition.saturation(),
                )
            })
            .collect();

        ColorRamp {
            name: definition.name().to_string(),
            hue: definition.hue(),
            saturation: definition.saturation(),
            entries,
        }
    }

    pub fn palette<'a>(
        &self,
        definitions: impl IntoIterator<Item = &'a ColorDefinition>,
        schedule: &StepSchedule,
    ) -> Palette {
        let ramps = definitions
            .into_iter()
            .map(|definition| self.ramp(definition, schedule))
            .collect();

        Palette::new(schedule.clone(), ramps)
    }

    /// Generates the palette for one variant of `registry`, using the
    /// registry's schedule for that variant.
    pub fn variant_palette(
        &self,
        registry: &RampSpecRegistry,
        variant: RegistryVariant,
    ) -> Palette {
        self.palette(registry.definitions(variant), registry.schedule(variant))
    }
}

/// Generates a ramp in HSLuv.
pub fn generate_ramp(definition: &ColorDefinition, schedule: &StepSchedule) -> ColorRamp {
    RampGenerator::default().ramp(definition, schedule)
}

/// Generates one HSLuv ramp per definition, preserving their order.
pub fn generate_palette(definitions: &[ColorDefinition], schedule: &StepSchedule) -> Palette {
    RampGenerator::default().palette(definitions, schedule)
}

/// Generates the HSLuv palette for one variant of `registry`.
pub fn generate_variant_palette(registry: &RampSpecRegistry, variant: RegistryVariant) -> Palette {
    RampGenerator::default().variant_palette(registry, variant)
}
