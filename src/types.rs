#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Portrait,
    Landscape,
}

/// Pointer modality reported by the `(hover: none) and (pointer: coarse)` media condition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Pointer {
    #[default]
    Fine,
    Coarse,
}

impl Pointer {
    pub fn from_coarse_match(coarse: bool) -> Self {
        if coarse { Self::Coarse } else { Self::Fine }
    }

    pub fn is_coarse(self) -> bool {
        matches!(self, Self::Coarse)
    }
}

/// A single viewport measurement, built fresh for every trigger.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewportSample {
    /// Always positive and finite.
    pub height: f64,
    /// `None` means the host could not report a width, which is distinct from zero.
    pub width: Option<f64>,
    pub orientation: Option<Orientation>,
    /// Physical screen height (or available screen height), if known.
    pub screen_height: Option<f64>,
    /// The raw visual-viewport height, used to confirm the chosen height came from it.
    pub visual_viewport_height: Option<f64>,
}

impl ViewportSample {
    pub fn new(height: f64) -> Self {
        Self {
            height,
            width: None,
            orientation: None,
            screen_height: None,
            visual_viewport_height: None,
        }
    }

    pub fn with_width(mut self, width: Option<f64>) -> Self {
        self.width = width;
        self
    }

    pub fn with_orientation(mut self, orientation: Option<Orientation>) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_screen_height(mut self, screen_height: Option<f64>) -> Self {
        self.screen_height = screen_height;
        self
    }

    pub fn with_visual_viewport_height(mut self, height: Option<f64>) -> Self {
        self.visual_viewport_height = height;
        self
    }
}

/// Payload of the height-change notification.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeightChange {
    pub height: f64,
}

/// A buffered height-only commit waiting for the debounce window to elapse.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PendingUpdate {
    pub height: f64,
    /// Whether committing this height may raise the effects floor.
    pub lock: bool,
}

/// A lightweight, serializable snapshot of the classification baseline.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Baseline {
    pub height: Option<f64>,
    pub width: Option<f64>,
    pub orientation: Option<Orientation>,
    pub locked_height: Option<f64>,
}

/// The two custom properties written on the document root.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnitProperty {
    /// Tracks the committed height exactly.
    Viewport,
    /// Never drops below the locked floor while one is set.
    Effects,
}

impl UnitProperty {
    pub const ALL: [Self; 2] = [Self::Viewport, Self::Effects];

    pub fn name(self) -> &'static str {
        match self {
            Self::Viewport => crate::VIEWPORT_UNIT_PROPERTY,
            Self::Effects => crate::VIEWPORT_EFFECTS_UNIT_PROPERTY,
        }
    }
}
