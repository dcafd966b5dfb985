use alloc::sync::Arc;

use crate::{HeightChange, OptionsError, Pointer};

/// A listener fired once per distinct committed height.
pub type OnHeightChangeCallback = Arc<dyn Fn(HeightChange) + Send + Sync>;

pub const FINE_WIDTH_THRESHOLD: f64 = 1.0;
pub const FINE_HEIGHT_INCREASE_THRESHOLD: f64 = 120.0;
pub const FINE_HEIGHT_DECREASE_THRESHOLD: f64 = 12.0;
pub const COARSE_HEIGHT_CHANGE_THRESHOLD: f64 = 160.0;
/// Browser chrome animations nudge the visual viewport width by a few pixels on touch devices.
pub const COARSE_WIDTH_THRESHOLD: f64 = 8.0;
pub const KEYBOARD_VIEWPORT_RATIO: f64 = 0.78;
pub const HEIGHT_UPDATE_DELAY_MS: u64 = 50;
pub const VISUAL_VIEWPORT_TOLERANCE: f64 = 0.5;

/// Change thresholds for one pointer modality, in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Thresholds {
    pub height_increase: f64,
    pub height_decrease: f64,
    /// A width change must be strictly greater than this to count as geometry.
    pub width: f64,
}

impl Thresholds {
    pub const FINE: Self = Self {
        height_increase: FINE_HEIGHT_INCREASE_THRESHOLD,
        height_decrease: FINE_HEIGHT_DECREASE_THRESHOLD,
        width: FINE_WIDTH_THRESHOLD,
    };

    pub const COARSE: Self = Self {
        height_increase: COARSE_HEIGHT_CHANGE_THRESHOLD,
        height_decrease: COARSE_HEIGHT_CHANGE_THRESHOLD,
        width: COARSE_WIDTH_THRESHOLD,
    };

    fn validate(&self, pointer: Pointer) -> Result<(), OptionsError> {
        for (field, value) in [
            ("height_increase", self.height_increase),
            ("height_decrease", self.height_decrease),
            ("width", self.width),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(OptionsError::InvalidThreshold {
                    pointer,
                    field,
                    value,
                });
            }
        }
        Ok(())
    }
}

/// Configuration for [`crate::Stabilizer`].
///
/// Cheap to clone: the listener is stored in an `Arc`.
#[derive(Clone)]
pub struct StabilizerOptions {
    pub fine: Thresholds,
    pub coarse: Thresholds,
    /// Height-to-screen ratio at or below which a coarse-pointer viewport is treated as having
    /// an on-screen keyboard open.
    pub keyboard_ratio: f64,
    /// Debounce window for height-only commits.
    pub debounce_ms: u64,
    /// Maximum distance between the chosen height and the raw visual-viewport height for the
    /// measurement to count as visual-viewport confirmed.
    pub visual_viewport_tolerance: f64,
    /// Refresh the effects property on every measurement, before classification.
    ///
    /// Off by default: the effects value is then only written on commit. When on, a
    /// measurement that falls back below an earlier, uncommitted reading lowers the effects
    /// value again, so it is no longer non-decreasing while a floor is set.
    pub eager_effects: bool,
    pub on_height_change: Option<OnHeightChangeCallback>,
}

impl Default for StabilizerOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl StabilizerOptions {
    pub fn new() -> Self {
        Self {
            fine: Thresholds::FINE,
            coarse: Thresholds::COARSE,
            keyboard_ratio: KEYBOARD_VIEWPORT_RATIO,
            debounce_ms: HEIGHT_UPDATE_DELAY_MS,
            visual_viewport_tolerance: VISUAL_VIEWPORT_TOLERANCE,
            eager_effects: false,
            on_height_change: None,
        }
    }

    pub fn thresholds(&self, pointer: Pointer) -> Thresholds {
        match pointer {
            Pointer::Fine => self.fine,
            Pointer::Coarse => self.coarse,
        }
    }

    pub fn with_fine_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.fine = thresholds;
        self
    }

    pub fn with_coarse_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.coarse = thresholds;
        self
    }

    pub fn with_keyboard_ratio(mut self, ratio: f64) -> Self {
        self.keyboard_ratio = ratio;
        self
    }

    pub fn with_debounce_ms(mut self, debounce_ms: u64) -> Self {
        self.debounce_ms = debounce_ms;
        self
    }

    pub fn with_visual_viewport_tolerance(mut self, tolerance: f64) -> Self {
        self.visual_viewport_tolerance = tolerance;
        self
    }

    pub fn with_eager_effects(mut self, eager_effects: bool) -> Self {
        self.eager_effects = eager_effects;
        self
    }

    pub fn with_on_height_change(
        mut self,
        on_height_change: Option<impl Fn(HeightChange) + Send + Sync + 'static>,
    ) -> Self {
        self.on_height_change = on_height_change.map(|f| Arc::new(f) as _);
        self
    }

    pub fn validate(&self) -> Result<(), OptionsError> {
        self.fine.validate(Pointer::Fine)?;
        self.coarse.validate(Pointer::Coarse)?;
        if !(self.keyboard_ratio > 0.0 && self.keyboard_ratio <= 1.0) {
            return Err(OptionsError::InvalidKeyboardRatio(self.keyboard_ratio));
        }
        if !self.visual_viewport_tolerance.is_finite() || self.visual_viewport_tolerance < 0.0 {
            return Err(OptionsError::InvalidTolerance(self.visual_viewport_tolerance));
        }
        Ok(())
    }
}

impl core::fmt::Debug for StabilizerOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StabilizerOptions")
            .field("fine", &self.fine)
            .field("coarse", &self.coarse)
            .field("keyboard_ratio", &self.keyboard_ratio)
            .field("debounce_ms", &self.debounce_ms)
            .field("visual_viewport_tolerance", &self.visual_viewport_tolerance)
            .field("eager_effects", &self.eager_effects)
            .finish_non_exhaustive()
    }
}
