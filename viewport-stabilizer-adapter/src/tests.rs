use crate::*;

use std::collections::{BTreeMap, HashSet};
use std::string::String;
use std::vec::Vec;

use viewport_stabilizer::{
    ChangeKind, HeightChange, MeasurementSources, Outcome, Pointer, Publisher, SharedHeight,
    StabilizerOptions, VIEWPORT_EFFECTS_UNIT_PROPERTY, VIEWPORT_UNIT_PROPERTY,
};

#[derive(Debug, Default)]
struct FakeHost {
    native: bool,
    has_visual_viewport: bool,
    coarse: Option<bool>,
    sources: MeasurementSources,
    bound: HashSet<Listener>,
    bind_log: Vec<Listener>,
    unbind_log: Vec<Listener>,
    props: BTreeMap<&'static str, String>,
    events: Vec<f64>,
}

impl FakeHost {
    fn phone() -> Self {
        let mut host = Self {
            has_visual_viewport: true,
            coarse: Some(true),
            ..Default::default()
        };
        host.resize(780.0, 400.0);
        host.sources.screen_height = Some(800.0);
        host
    }

    fn desktop() -> Self {
        let mut host = Self {
            coarse: Some(false),
            ..Default::default()
        };
        host.sources.inner_height = Some(1000.0);
        host.sources.inner_width = Some(1280.0);
        host
    }

    fn resize(&mut self, height: f64, width: f64) {
        self.sources.visual_viewport_height = Some(height);
        self.sources.visual_viewport_width = Some(width);
        self.sources.inner_height = Some(height);
        self.sources.inner_width = Some(width);
    }

    fn is_bound(&self, listener: Listener) -> bool {
        self.bound.contains(&listener)
    }
}

impl Publisher for FakeHost {
    fn set_property(&mut self, name: &'static str, value: &str) {
        self.props.insert(name, value.into());
    }

    fn remove_property(&mut self, name: &'static str) {
        self.props.remove(name);
    }

    fn height_changed(&mut self, change: HeightChange) {
        self.events.push(change.height);
    }
}

impl Host for FakeHost {
    fn supports_dynamic_viewport(&self) -> bool {
        self.native
    }

    fn measure(&self) -> MeasurementSources {
        self.sources.clone()
    }

    fn coarse_pointer_match(&self) -> Option<bool> {
        self.coarse
    }

    fn bind(&mut self, listener: Listener) -> bool {
        if listener == Listener::VisualViewportResize && !self.has_visual_viewport {
            return false;
        }
        self.bind_log.push(listener);
        self.bound.insert(listener);
        true
    }

    fn unbind(&mut self, listener: Listener) {
        self.unbind_log.push(listener);
        self.bound.remove(&listener);
    }
}

fn install(host: FakeHost) -> Controller<FakeHost> {
    match Controller::install(host, StabilizerOptions::new(), 0) {
        Installation::Stabilized(c) => c,
        Installation::Native(_) => panic!("expected stabilizer to start"),
    }
}

#[test]
fn native_dynamic_viewport_skips_everything() {
    let host = FakeHost {
        native: true,
        ..FakeHost::phone()
    };
    let installation = Controller::install(host, StabilizerOptions::new(), 0);
    assert!(installation.is_native());
    assert!(installation.controller().is_none());

    let Installation::Native(host) = installation else {
        unreachable!();
    };
    assert!(host.bind_log.is_empty());
    assert!(host.props.is_empty());
}

#[test]
fn install_binds_listeners_and_publishes() {
    let c = install(FakeHost::phone());
    let host = c.host();

    for listener in [
        Listener::PageShow,
        Listener::PointerChange,
        Listener::Resize,
        Listener::OrientationChange,
        Listener::VisualViewportResize,
        Listener::PageHide,
    ] {
        assert!(host.is_bound(listener), "{listener:?} not bound");
    }
    assert_eq!(
        host.props.get(VIEWPORT_UNIT_PROPERTY).map(String::as_str),
        Some("7.8px")
    );
    assert_eq!(host.events, [780.0]);
    assert_eq!(c.stabilizer().pointer(), Pointer::Coarse);
    assert_eq!(c.shared_height().get(), Some(780.0));
}

#[test]
fn missing_features_are_skipped() {
    let host = FakeHost {
        coarse: None,
        ..FakeHost::desktop()
    };
    let c = install(host);
    assert!(!c.host().is_bound(Listener::VisualViewportResize));
    assert!(!c.host().is_bound(Listener::PointerChange));
    assert!(c.host().is_bound(Listener::Resize));
    assert_eq!(c.stabilizer().pointer(), Pointer::Fine);
}

#[test]
fn resize_triggers_flow_through_the_stabilizer() {
    let mut c = install(FakeHost::desktop());

    c.host_mut().sources.inner_height = Some(900.0);
    let outcome = c.handle(Trigger::Resize, 100);
    assert_eq!(
        outcome,
        Some(Outcome::Deferred {
            due_ms: 150,
            kind: ChangeKind::HeightDecrease
        })
    );
    assert_eq!(c.next_deadline(), Some(150));
    assert_eq!(c.tick(150), Some(900.0));
    assert_eq!(c.host().events, [1000.0, 900.0]);

    c.host_mut().sources.inner_width = Some(800.0);
    let outcome = c.handle(Trigger::OrientationChange, 200);
    assert_eq!(outcome.and_then(|o| o.committed_height()), Some(900.0));
}

#[test]
fn pointer_change_refreshes_cached_modality() {
    let mut c = install(FakeHost::phone());
    c.host_mut().coarse = Some(false);
    assert_eq!(c.stabilizer().pointer(), Pointer::Coarse);

    assert_eq!(c.handle(Trigger::PointerChange, 10), None);
    assert_eq!(c.stabilizer().pointer(), Pointer::Fine);
}

#[test]
fn reactivation_tears_down_previous_listeners() {
    let mut c = install(FakeHost::phone());
    let first_binds = c.host().bind_log.len();

    c.activate(50);
    let host = c.host();
    assert!(host.unbind_log.contains(&Listener::Resize));
    assert_eq!(host.bind_log.len(), first_binds * 2 - 1);
    assert!(host.is_bound(Listener::Resize));
    assert!(host.is_bound(Listener::PageHide));
    assert!(c.is_active());
}

#[test]
fn page_hide_tears_down_and_clears_properties() {
    let mut c = install(FakeHost::phone());
    c.host_mut().resize(600.0, 400.0);
    c.handle(Trigger::Resize, 10);
    assert!(c.next_deadline().is_some());

    assert_eq!(c.handle(Trigger::PageHide, 20), None);
    assert!(!c.is_active());
    assert_eq!(c.next_deadline(), None);
    assert!(c.host().props.get(VIEWPORT_UNIT_PROPERTY).is_none());
    assert!(c.host().props.get(VIEWPORT_EFFECTS_UNIT_PROPERTY).is_none());
    assert!(!c.host().is_bound(Listener::Resize));
    assert!(!c.host().is_bound(Listener::PageHide));
    assert!(c.host().is_bound(Listener::PageShow));

    // Listeners are gone; stray triggers do nothing.
    assert_eq!(c.handle(Trigger::Resize, 30), None);
    assert!(!c.teardown());
}

#[test]
fn page_show_only_reactivates_cached_restores() {
    let mut c = install(FakeHost::phone());
    c.handle(Trigger::PageHide, 0);

    assert_eq!(c.handle(Trigger::PageShow { persisted: false }, 10), None);
    assert!(!c.is_active());

    let outcome = c.handle(Trigger::PageShow { persisted: true }, 20);
    assert_eq!(
        outcome,
        Some(Outcome::Committed {
            height: 780.0,
            kind: ChangeKind::Initial
        })
    );
    assert!(c.is_active());
    assert_eq!(
        c.host().props.get(VIEWPORT_UNIT_PROPERTY).map(String::as_str),
        Some("7.8px")
    );
    // Same height as before the hide: no duplicate notification.
    assert_eq!(c.host().events, [780.0]);

    assert_eq!(c.handle(Trigger::PageShow { persisted: true }, 30), None);
}

#[test]
fn missing_measurement_retries_on_animation_frame() {
    let mut host = FakeHost::desktop();
    host.sources = MeasurementSources::default();
    let mut c = install(host);
    assert!(c.wants_animation_frame());
    assert!(c.host().props.is_empty());

    assert_eq!(c.on_animation_frame(16), Some(Outcome::RetryNextFrame));
    assert!(c.wants_animation_frame());

    c.host_mut().sources.client_height = Some(640.0);
    let outcome = c.on_animation_frame(32);
    assert_eq!(outcome.and_then(|o| o.committed_height()), Some(640.0));
    assert!(!c.wants_animation_frame());
    assert_eq!(c.on_animation_frame(48), None);
}

#[test]
fn teardown_cancels_animation_frame_retry() {
    let mut host = FakeHost::desktop();
    host.sources = MeasurementSources::default();
    let mut c = install(host);
    assert!(c.teardown());
    assert!(!c.wants_animation_frame());
}

#[test]
fn suppressed_chrome_growth_keeps_effects_floor() {
    let mut c = install(FakeHost::phone());
    c.host_mut().resize(960.0, 400.0);
    assert_eq!(
        c.handle(Trigger::VisualViewportResize, 10),
        Some(Outcome::Skipped {
            kind: ChangeKind::Suppressed
        })
    );
    assert_eq!(
        c.host()
            .props
            .get(VIEWPORT_EFFECTS_UNIT_PROPERTY)
            .map(String::as_str),
        Some("7.8px")
    );
}

#[test]
fn into_host_tears_down() {
    let c = install(FakeHost::phone());
    let host = c.into_host();
    assert!(host.props.is_empty());
    assert!(!host.is_bound(Listener::Resize));
}

#[test]
fn consumers_fall_back_when_nothing_is_shared() {
    let shared = SharedHeight::new();
    assert_eq!(stable_viewport_height(&shared, Some(700.0), Some(650.0)), 700.0);
    assert_eq!(stable_viewport_height(&shared, Some(0.0), Some(650.0)), 650.0);
    assert_eq!(stable_viewport_height(&shared, None, None), 0.0);

    shared.store(812.0);
    assert_eq!(stable_viewport_height(&shared, Some(700.0), None), 812.0);
}

#[test]
fn triggers_for_unattached_listeners_are_ignored() {
    let host = FakeHost {
        coarse: None,
        ..FakeHost::desktop()
    };
    let mut c = install(host);
    c.host_mut().sources.inner_height = Some(800.0);

    assert_eq!(c.handle(Trigger::VisualViewportResize, 10), None);
    assert_eq!(c.handle(Trigger::PointerChange, 10), None);
    assert_eq!(c.next_deadline(), None);

    assert_eq!(
        c.handle(Trigger::Resize, 20),
        Some(Outcome::Deferred {
            due_ms: 70,
            kind: ChangeKind::HeightDecrease
        })
    );
}

#[test]
fn trigger_listener_mapping() {
    assert_eq!(
        Trigger::PageShow { persisted: true }.listener(),
        Listener::PageShow
    );
    assert!(Trigger::VisualViewportResize.is_measurement());
    assert!(!Trigger::PageHide.is_measurement());
}
