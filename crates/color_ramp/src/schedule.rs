use std::sync::{Arc, LazyLock};

use crate::ConfigurationError;

const CHROMATIC_STEPS: [u32; 12] = [0, 10, 20, 30, 40, 50, 60, 70, 80, 90, 95, 100];

static CHROMATIC: LazyLock<StepSchedule> =
    LazyLock::new(|| StepSchedule::from_validated(CHROMATIC_STEPS.to_vec()));

static NEUTRAL: LazyLock<StepSchedule> =
    LazyLock::new(|| StepSchedule::from_validated((0..=100).step_by(2).collect()));

/// The ordered step labels of a ramp.
///
/// A schedule decides how many swatches a ramp has and what each swatch is
/// called. Labels are display metadata: lightness is interpolated by the
/// position of a step, not by its label.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct StepSchedule {
    labels: Arc<[u32]>,
}

impl StepSchedule {
    /// The largest label a schedule may contain.
    pub const MAX_LABEL: u32 = 100;

    /// Builds a schedule from strictly increasing labels in `0..=100`.
    pub fn new(labels: Vec<u32>) -> Result<Self, ConfigurationError> {
        if labels.is_empty() {
            return Err(ConfigurationError::EmptySchedule);
        }

        if let Some(&label) = labels.iter().find(|&&label| label > Self::MAX_LABEL) {
            return Err(ConfigurationError::StepOutOfRange { label });
        }

        if let Some(pair) = labels.windows(2).find(|pair| pair[0] >= pair[1]) {
            return Err(ConfigurationError::StepsNotIncreasing {
                previous: pair[0],
                next: pair[1],
            });
        }

        Ok(Self::from_validated(labels))
    }

    fn from_validated(labels: Vec<u32>) -> Self {
        Self {
            labels: labels.into(),
        }
    }

    /// The 12-step schedule used for hue-bearing ramps.
    ///
    /// Labels are not evenly spaced: the tail runs 90, 95, 100.
    pub fn chromatic() -> &'static StepSchedule {
        &CHROMATIC
    }

    /// The 51-step schedule used for neutral ramps, evenly spaced by 2.
    pub fn neutral() -> &'static StepSchedule {
        &NEUTRAL
    }

    pub fn labels(&self) -> &[u32] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = u32> + '_ {
        self.labels.iter().copied()
    }
}
