//! Measurement collection: turning raw, optional host readings into a [`ViewportSample`].

use crate::{Orientation, ViewportSample};

/// Raw viewport readings as reported by the host.
///
/// Every field is optional: hosts fill in whatever their environment exposes and leave the rest
/// as `None`. Non-finite or non-positive values are treated the same as missing ones.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeasurementSources {
    pub visual_viewport_height: Option<f64>,
    pub visual_viewport_width: Option<f64>,
    pub inner_height: Option<f64>,
    pub inner_width: Option<f64>,
    pub client_height: Option<f64>,
    pub client_width: Option<f64>,
    pub screen_height: Option<f64>,
    pub screen_avail_height: Option<f64>,
    /// Screen orientation type, e.g. `"landscape-primary"`.
    pub orientation_type: Option<alloc::string::String>,
    /// Legacy orientation angle in degrees.
    pub orientation_angle: Option<f64>,
    /// Whether `(orientation: portrait)` matches, when the host supports media queries.
    pub portrait_match: Option<bool>,
}

impl MeasurementSources {
    /// Height precedence: visual viewport, then inner height, then root client height.
    pub fn height(&self) -> Option<f64> {
        pick_dimension([
            self.visual_viewport_height,
            self.inner_height,
            self.client_height,
        ])
    }

    pub fn width(&self) -> Option<f64> {
        pick_dimension([
            self.visual_viewport_width,
            self.inner_width,
            self.client_width,
        ])
    }

    pub fn screen(&self) -> Option<f64> {
        pick_dimension([self.screen_height, self.screen_avail_height])
    }

    pub fn orientation(&self) -> Option<Orientation> {
        if let Some(kind) = &self.orientation_type {
            return Some(if kind.starts_with("landscape") {
                Orientation::Landscape
            } else {
                Orientation::Portrait
            });
        }

        if let Some(angle) = self.orientation_angle {
            return Some(if angle == 90.0 || angle == -90.0 {
                Orientation::Landscape
            } else {
                Orientation::Portrait
            });
        }

        self.portrait_match.map(|portrait| {
            if portrait {
                Orientation::Portrait
            } else {
                Orientation::Landscape
            }
        })
    }

    /// Builds a sample, or `None` when no height source produced a usable value.
    pub fn sample(&self) -> Option<ViewportSample> {
        let height = self.height()?;
        Some(ViewportSample {
            height,
            width: self.width(),
            orientation: self.orientation(),
            screen_height: self.screen(),
            visual_viewport_height: self.visual_viewport_height.filter(|v| v.is_finite()),
        })
    }
}

/// Returns the first candidate that is finite and strictly positive.
pub fn pick_dimension<const N: usize>(candidates: [Option<f64>; N]) -> Option<f64> {
    candidates
        .into_iter()
        .flatten()
        .find(|v| v.is_finite() && *v > 0.0)
}
