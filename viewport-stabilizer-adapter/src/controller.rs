use alloc::vec::Vec;

use viewport_stabilizer::{Outcome, Pointer, SharedHeight, Stabilizer, StabilizerOptions};

use crate::{Host, Listener, Trigger};

/// Result of installing a stabilizer on a host.
#[derive(Debug)]
pub enum Installation<H> {
    /// The host already has a stable dynamic viewport unit; nothing was bound.
    Native(H),
    Stabilized(Controller<H>),
}

impl<H> Installation<H> {
    pub fn controller(&self) -> Option<&Controller<H>> {
        match self {
            Self::Native(_) => None,
            Self::Stabilized(c) => Some(c),
        }
    }

    pub fn controller_mut(&mut self) -> Option<&mut Controller<H>> {
        match self {
            Self::Native(_) => None,
            Self::Stabilized(c) => Some(c),
        }
    }

    pub fn is_native(&self) -> bool {
        matches!(self, Self::Native(_))
    }
}

/// Listener set attached by one activation. Dropping it through
/// [`Controller::teardown`] is the only way listeners are detached.
#[derive(Clone, Debug, Default)]
struct Activation {
    bindings: Vec<Listener>,
}

/// A framework-neutral controller that wires a [`Stabilizer`] to a [`Host`].
///
/// Adapters drive it by calling:
/// - `handle(trigger, now_ms)` when a bound listener fires
/// - `tick(now_ms)` from a timer once `now_ms` reaches `next_deadline()`
/// - `on_animation_frame(now_ms)` on the next frame while `wants_animation_frame()` is `true`
#[derive(Debug)]
pub struct Controller<H> {
    host: H,
    stabilizer: Stabilizer,
    activation: Option<Activation>,
}

impl<H: Host> Controller<H> {
    /// Runs the capability gate, then activates.
    ///
    /// The gate runs exactly once. When the host supports a native dynamic viewport unit the
    /// host is handed back untouched.
    pub fn install(host: H, options: StabilizerOptions, now_ms: u64) -> Installation<H> {
        if host.supports_dynamic_viewport() {
            adapter_debug!("native dynamic viewport unit; stabilizer not started");
            return Installation::Native(host);
        }
        let mut c = Self::new(host, Stabilizer::new(options));
        c.host.bind(Listener::PageShow);
        c.activate(now_ms);
        Installation::Stabilized(c)
    }

    /// Wraps an existing stabilizer without binding anything. Call [`Self::activate`] to start.
    pub fn new(host: H, stabilizer: Stabilizer) -> Self {
        Self {
            host,
            stabilizer,
            activation: None,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn stabilizer(&self) -> &Stabilizer {
        &self.stabilizer
    }

    pub fn shared_height(&self) -> &SharedHeight {
        self.stabilizer.shared_height()
    }

    pub fn is_active(&self) -> bool {
        self.activation.is_some()
    }

    /// Tears down and returns the host.
    pub fn into_host(mut self) -> H {
        self.teardown();
        self.host
    }

    /// Binds all listeners and measures once.
    ///
    /// Re-activating first tears down the previous listener set.
    pub fn activate(&mut self, now_ms: u64) -> Outcome {
        self.teardown();
        self.host.unbind(Listener::PageHide);

        self.refresh_pointer();
        let mut activation = Activation::default();
        if self.host.coarse_pointer_match().is_some() {
            self.bind(&mut activation, Listener::PointerChange);
        }

        self.stabilizer.reset_baseline();

        for listener in [
            Listener::Resize,
            Listener::OrientationChange,
            Listener::VisualViewportResize,
        ] {
            self.bind(&mut activation, listener);
        }
        adapter_debug!(bindings = ?activation.bindings, "activate");
        self.activation = Some(activation);

        let outcome = self.measure(now_ms);
        self.host.bind(Listener::PageHide);
        outcome
    }

    /// Detaches every listener, cancels pending work and clears the published properties.
    ///
    /// Returns `false` when nothing was active.
    pub fn teardown(&mut self) -> bool {
        let Some(mut activation) = self.activation.take() else {
            return false;
        };
        self.stabilizer.teardown(&mut self.host);
        while let Some(listener) = activation.bindings.pop() {
            self.host.unbind(listener);
        }
        self.host.unbind(Listener::PageHide);
        adapter_debug!("teardown");
        true
    }

    /// Routes a host notification.
    ///
    /// Returns the measurement outcome for triggers that measure. Triggers whose listener is
    /// not attached by the current activation are ignored.
    pub fn handle(&mut self, trigger: Trigger, now_ms: u64) -> Option<Outcome> {
        let listener = trigger.listener();
        adapter_trace!(?trigger, now_ms, active = self.is_active(), "handle");
        if trigger.is_measurement() {
            return self.is_bound(listener).then(|| self.measure(now_ms));
        }
        match trigger {
            Trigger::PointerChange => {
                if self.is_bound(listener) {
                    self.refresh_pointer();
                }
                None
            }
            Trigger::PageHide => {
                self.teardown();
                None
            }
            Trigger::PageShow { persisted } => {
                if !persisted || self.is_active() {
                    return None;
                }
                Some(self.activate(now_ms))
            }
            _ => None,
        }
    }

    /// Commits a buffered height once its debounce window elapsed.
    pub fn tick(&mut self, now_ms: u64) -> Option<f64> {
        self.stabilizer.tick(now_ms, &mut self.host)
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.stabilizer.next_deadline()
    }

    pub fn wants_animation_frame(&self) -> bool {
        self.stabilizer.wants_animation_frame()
    }

    /// Runs a requested measurement retry.
    pub fn on_animation_frame(&mut self, now_ms: u64) -> Option<Outcome> {
        if !self.stabilizer.wants_animation_frame() {
            return None;
        }
        let sources = self.host.measure();
        self.stabilizer
            .on_animation_frame(&sources, now_ms, &mut self.host)
    }

    fn measure(&mut self, now_ms: u64) -> Outcome {
        let sources = self.host.measure();
        self.stabilizer.update(&sources, now_ms, &mut self.host)
    }

    fn refresh_pointer(&mut self) {
        let coarse = self.host.coarse_pointer_match().unwrap_or(false);
        self.stabilizer.set_pointer(Pointer::from_coarse_match(coarse));
    }

    fn is_bound(&self, listener: Listener) -> bool {
        self.activation
            .as_ref()
            .is_some_and(|a| a.bindings.contains(&listener))
    }

    fn bind(&mut self, activation: &mut Activation, listener: Listener) {
        if self.host.bind(listener) {
            activation.bindings.push(listener);
        } else {
            adapter_trace!(?listener, "host lacks listener target; skipped");
        }
    }
}
