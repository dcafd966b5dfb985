use viewport_stabilizer::{MeasurementSources, Publisher};

/// A listener the controller attaches to the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Listener {
    /// Window `resize`.
    Resize,
    /// Window `orientationchange`.
    OrientationChange,
    /// `resize` on the visual viewport object.
    VisualViewportResize,
    /// `change` on the coarse-pointer media query.
    PointerChange,
    /// One-shot window `pagehide`.
    PageHide,
    /// Window `pageshow`, bound for the lifetime of the installation.
    PageShow,
}

/// A host notification routed into [`crate::Controller::handle`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Trigger {
    Resize,
    OrientationChange,
    VisualViewportResize,
    PointerChange,
    PageHide,
    /// `persisted` is `true` when the page was restored from the back/forward cache.
    PageShow { persisted: bool },
}

impl Trigger {
    pub fn listener(self) -> Listener {
        match self {
            Self::Resize => Listener::Resize,
            Self::OrientationChange => Listener::OrientationChange,
            Self::VisualViewportResize => Listener::VisualViewportResize,
            Self::PointerChange => Listener::PointerChange,
            Self::PageHide => Listener::PageHide,
            Self::PageShow { .. } => Listener::PageShow,
        }
    }

    /// Triggers that lead to a new measurement.
    pub fn is_measurement(self) -> bool {
        matches!(
            self,
            Self::Resize | Self::OrientationChange | Self::VisualViewportResize
        )
    }
}

/// The embedding environment.
///
/// The [`Publisher`] half receives the published properties and height notifications; the rest
/// exposes capability checks, raw measurements and listener registration. Every capability is
/// optional: hosts report what they lack instead of failing.
pub trait Host: Publisher {
    /// Whether the host styles `height: 100dvh` or `height: 100svh` natively.
    fn supports_dynamic_viewport(&self) -> bool;

    fn measure(&self) -> MeasurementSources;

    /// Current match state of `(hover: none) and (pointer: coarse)`, or `None` when the host
    /// has no media query support.
    fn coarse_pointer_match(&self) -> Option<bool>;

    /// Attaches `listener`. Returns `false` when the host lacks the event target (for example
    /// no visual viewport object), in which case the binding is skipped.
    fn bind(&mut self, listener: Listener) -> bool;

    fn unbind(&mut self, listener: Listener);
}
