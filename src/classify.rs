//! Classification of a new sample against the last accepted geometry.
//!
//! Every comparison runs on integer-rounded pixels so sub-pixel jitter never crosses a
//! threshold on its own.

use crate::{Baseline, Pointer, StabilizerOptions, Thresholds, ViewportSample};

/// Summary of why a sample was (or was not) accepted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChangeKind {
    /// No height has been accepted yet.
    Initial,
    /// Width or orientation changed.
    Geometry,
    /// The viewport stopped looking like a keyboard viewport.
    KeyboardClosed,
    HeightDecrease,
    HeightIncrease,
    /// Growth that looks like browser chrome hiding.
    Suppressed,
    Noise,
}

/// Every flag computed for one sample.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Classification {
    pub kind: ChangeKind,
    pub thresholds: Thresholds,
    pub geometry_changed: bool,
    pub is_keyboard: bool,
    pub was_keyboard: bool,
    pub height_decreased: bool,
    pub general_increase: bool,
    pub keyboard_closing: bool,
    pub suppressed_growth: bool,
    pub should_update: bool,
}

impl Classification {
    /// A height-only change is buffered behind the debounce window. Everything else that
    /// updates commits immediately.
    pub fn is_height_only(&self) -> bool {
        self.should_update
            && !self.geometry_changed
            && !matches!(self.kind, ChangeKind::Initial)
    }

    /// Keyboard-driven shrinks must not become the new effects floor.
    pub fn lock(&self) -> bool {
        !self.is_keyboard
    }
}

/// Rounds half-way cases towards positive infinity, matching browser pixel rounding.
pub(crate) fn round_px(value: f64) -> f64 {
    let truncated = value as i64 as f64;
    let fraction = value - truncated;
    if fraction >= 0.5 {
        truncated + 1.0
    } else if fraction < -0.5 {
        truncated - 1.0
    } else {
        truncated
    }
}

fn likely_keyboard(height: Option<f64>, screen: Option<f64>, pointer: Pointer, ratio: f64) -> bool {
    if !pointer.is_coarse() {
        return false;
    }
    match (height, screen) {
        (Some(h), Some(s)) if s > 0.0 => h / s <= ratio,
        _ => false,
    }
}

pub fn classify(
    sample: &ViewportSample,
    baseline: &Baseline,
    pointer: Pointer,
    options: &StabilizerOptions,
) -> Classification {
    let thresholds = options.thresholds(pointer);

    let height = round_px(sample.height);
    let last_height = baseline.height.map(round_px);
    let width = sample.width.map(round_px);
    let last_width = baseline.width.map(round_px);
    let screen = sample.screen_height.map(round_px);

    let is_keyboard = likely_keyboard(Some(height), screen, pointer, options.keyboard_ratio);
    let was_keyboard = likely_keyboard(last_height, screen, pointer, options.keyboard_ratio);

    let width_changed = match (width, last_width) {
        (Some(w), Some(lw)) => {
            let delta = w - lw;
            let delta = if delta < 0.0 { -delta } else { delta };
            delta > thresholds.width
        }
        _ => false,
    };
    let orientation_changed = match (sample.orientation, baseline.orientation) {
        (Some(now), Some(last)) => now != last,
        _ => false,
    };
    let width_presence_changed = width.is_some() != last_width.is_some();
    let geometry_changed = width_changed || orientation_changed || width_presence_changed;

    let (height_decreased, general_increase, keyboard_closing) = match last_height {
        Some(last) => (
            height <= last - thresholds.height_decrease || (is_keyboard && !was_keyboard),
            height >= last + thresholds.height_increase,
            was_keyboard && !is_keyboard,
        ),
        None => (false, false, false),
    };

    let visual_viewport_confirmed = sample.visual_viewport_height.is_some_and(|vv| {
        let delta = vv - sample.height;
        let delta = if delta < 0.0 { -delta } else { delta };
        delta < options.visual_viewport_tolerance
    });

    let suppressed_growth = pointer.is_coarse()
        && general_increase
        && !keyboard_closing
        && !geometry_changed
        && visual_viewport_confirmed
        && baseline
            .locked_height
            .map(round_px)
            .is_some_and(|locked| height > locked);

    let increase_required = keyboard_closing || (general_increase && !suppressed_growth);
    let should_update =
        last_height.is_none() || geometry_changed || height_decreased || increase_required;

    let kind = if last_height.is_none() {
        ChangeKind::Initial
    } else if geometry_changed {
        ChangeKind::Geometry
    } else if keyboard_closing {
        ChangeKind::KeyboardClosed
    } else if height_decreased {
        ChangeKind::HeightDecrease
    } else if increase_required {
        ChangeKind::HeightIncrease
    } else if suppressed_growth {
        ChangeKind::Suppressed
    } else {
        ChangeKind::Noise
    };

    stab_trace!(
        ?kind,
        height,
        ?last_height,
        ?width,
        ?last_width,
        is_keyboard,
        was_keyboard,
        should_update,
        "classify"
    );

    Classification {
        kind,
        thresholds,
        geometry_changed,
        is_keyboard,
        was_keyboard,
        height_decreased,
        general_increase,
        keyboard_closing,
        suppressed_growth,
        should_update,
    }
}
