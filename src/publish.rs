use alloc::string::String;
use alloc::sync::Arc;
use core::sync::atomic::{AtomicU64, Ordering};

use crate::{HeightChange, UnitProperty};

/// Receives everything the stabilizer publishes.
///
/// Hosts typically implement this by writing custom properties on the document root and
/// dispatching a `viewportheightchange` event.
pub trait Publisher {
    fn set_property(&mut self, name: &'static str, value: &str);

    fn remove_property(&mut self, name: &'static str);

    /// Called at most once per distinct committed height.
    fn height_changed(&mut self, change: HeightChange) {
        let _ = change;
    }
}

/// A publisher that drops everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullPublisher;

impl Publisher for NullPublisher {
    fn set_property(&mut self, _name: &'static str, _value: &str) {}

    fn remove_property(&mut self, _name: &'static str) {}
}

/// Formats a height as a `1/100` viewport unit, e.g. `780.0` → `"7.8px"`.
pub fn to_viewport_unit(height: f64) -> String {
    alloc::format!("{}px", height / 100.0)
}

/// Last value written for each property, so unchanged strings are never rewritten.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct PublishedUnits {
    viewport: Option<String>,
    effects: Option<String>,
}

impl PublishedUnits {
    fn slot(&mut self, property: UnitProperty) -> &mut Option<String> {
        match property {
            UnitProperty::Viewport => &mut self.viewport,
            UnitProperty::Effects => &mut self.effects,
        }
    }

    pub(crate) fn get(&self, property: UnitProperty) -> Option<&str> {
        match property {
            UnitProperty::Viewport => self.viewport.as_deref(),
            UnitProperty::Effects => self.effects.as_deref(),
        }
    }

    /// Returns `true` when the published string changed.
    pub(crate) fn write(
        &mut self,
        property: UnitProperty,
        height: f64,
        publisher: &mut dyn Publisher,
    ) -> bool {
        let next = to_viewport_unit(height);
        let slot = self.slot(property);
        if slot.as_deref() == Some(next.as_str()) {
            return false;
        }
        publisher.set_property(property.name(), &next);
        *slot = Some(next);
        true
    }

    pub(crate) fn clear(&mut self, publisher: &mut dyn Publisher) {
        for property in UnitProperty::ALL {
            self.slot(property).take();
            publisher.remove_property(property.name());
        }
    }
}

/// Process-wide slot holding the last committed height.
///
/// Clones share the same slot; readers never wait for the change notification.
#[derive(Clone, Debug, Default)]
pub struct SharedHeight {
    bits: Arc<AtomicU64>,
}

impl SharedHeight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored height, or `None` before the first commit.
    pub fn get(&self) -> Option<f64> {
        let bits = self.bits.load(Ordering::Acquire);
        if bits == 0 {
            return None;
        }
        Some(f64::from_bits(bits))
    }

    /// Ignores values that are not finite and strictly positive.
    pub fn store(&self, height: f64) {
        if !height.is_finite() || height <= 0.0 {
            return;
        }
        self.bits.store(height.to_bits(), Ordering::Release);
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.bits, &other.bits)
    }
}
