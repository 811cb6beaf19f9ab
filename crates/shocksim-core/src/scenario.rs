//! Slider domain for the hypothetical systemic supply shock.

use serde::Serialize;

use crate::format;

/// A shock percentage on the slider grid: `[-20.0, 20.0]` in steps of `0.5`.
///
/// Stored as a whole number of steps so every value on the grid is exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShockInput {
    steps: i16,
}

impl ShockInput {
    pub const MIN: f64 = -20.0;
    pub const MAX: f64 = 20.0;
    pub const STEP: f64 = 0.5;
    pub const DEFAULT: f64 = -10.0;
    /// Coarse increment for page keys.
    pub const JUMP: f64 = 5.0;

    const MIN_STEPS: i16 = -40;
    const MAX_STEPS: i16 = 40;
    const DEFAULT_STEPS: i16 = -20;
    const JUMP_STEPS: i16 = 10;

    /// Snap `value` to the nearest grid point and clamp to the domain.
    /// Non-finite input falls back to [`Self::DEFAULT`].
    #[must_use]
    pub fn new(value: f64) -> Self {
        if !value.is_finite() {
            return Self::default();
        }
        let clamped = value.clamp(Self::MIN, Self::MAX);
        let steps = (clamped / Self::STEP).round() as i16;
        Self::from_steps(steps)
    }

    /// Like [`ShockInput::new`], but rejects values outside `[MIN, MAX]`
    /// instead of clamping them. In-range values still snap to the grid.
    pub fn checked(value: f64) -> Option<Self> {
        if value.is_finite() && (Self::MIN..=Self::MAX).contains(&value) {
            Some(Self::new(value))
        } else {
            None
        }
    }

    fn from_steps(steps: i16) -> Self {
        Self {
            steps: steps.clamp(Self::MIN_STEPS, Self::MAX_STEPS),
        }
    }

    #[must_use]
    pub fn value(self) -> f64 {
        f64::from(self.steps) * Self::STEP
    }

    #[must_use]
    pub fn step_up(self) -> Self {
        Self::from_steps(self.steps + 1)
    }

    #[must_use]
    pub fn step_down(self) -> Self {
        Self::from_steps(self.steps - 1)
    }

    #[must_use]
    pub fn jump_up(self) -> Self {
        Self::from_steps(self.steps + Self::JUMP_STEPS)
    }

    #[must_use]
    pub fn jump_down(self) -> Self {
        Self::from_steps(self.steps - Self::JUMP_STEPS)
    }

    #[must_use]
    pub fn to_min(self) -> Self {
        Self::from_steps(Self::MIN_STEPS)
    }

    #[must_use]
    pub fn to_max(self) -> Self {
        Self::from_steps(Self::MAX_STEPS)
    }

    /// Back to [`Self::DEFAULT`].
    #[must_use]
    pub fn reset(self) -> Self {
        Self::default()
    }

    #[must_use]
    pub fn zero() -> Self {
        Self::from_steps(0)
    }

    #[must_use]
    pub fn is_min(self) -> bool {
        self.steps == Self::MIN_STEPS
    }

    #[must_use]
    pub fn is_max(self) -> bool {
        self.steps == Self::MAX_STEPS
    }

    /// Position on the track in `[0.0, 1.0]`.
    #[must_use]
    pub fn fraction(self) -> f64 {
        f64::from(self.steps - Self::MIN_STEPS) / f64::from(Self::MAX_STEPS - Self::MIN_STEPS)
    }

    /// `-10.0%`
    #[must_use]
    pub fn label(self) -> String {
        format::percent_1(self.value())
    }
}

impl Default for ShockInput {
    fn default() -> Self {
        Self::from_steps(Self::DEFAULT_STEPS)
    }
}

impl Serialize for ShockInput {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.value())
    }
}
