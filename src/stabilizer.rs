use crate::classify::classify;
use crate::publish::PublishedUnits;
use crate::schedule::{Debounce, FrameRequest};
use crate::{
    Baseline, ChangeKind, Classification, HeightChange, MeasurementSources, OptionsError,
    PendingUpdate, Pointer, Publisher, SharedHeight, StabilizerOptions, UnitProperty,
    ViewportSample,
};

/// What a single measurement led to.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// No height source was usable; an animation-frame retry is requested.
    RetryNextFrame,
    /// The height was committed immediately.
    Committed { height: f64, kind: ChangeKind },
    /// A height-only change was buffered until `due_ms`.
    Deferred { due_ms: u64, kind: ChangeKind },
    /// The sample was not accepted, but it refreshed an already pending update.
    Extended { due_ms: u64, kind: ChangeKind },
    Skipped { kind: ChangeKind },
}

impl Outcome {
    pub fn committed_height(&self) -> Option<f64> {
        match self {
            Self::Committed { height, .. } => Some(*height),
            _ => None,
        }
    }
}

/// The viewport height stabilizer.
///
/// This type is UI-agnostic:
/// - It does not hold any host objects.
/// - Your adapter drives it by pushing measurements and a monotonic clock.
/// - Everything it publishes goes through a [`Publisher`] passed into each call.
///
/// Timers are modeled as host-polled deadlines: after a [`Outcome::Deferred`] the adapter should
/// call [`Stabilizer::tick`] once `now_ms` reaches [`Stabilizer::next_deadline`], and after
/// [`Outcome::RetryNextFrame`] it should call [`Stabilizer::on_animation_frame`] on the next
/// frame.
#[derive(Clone, Debug)]
pub struct Stabilizer {
    options: StabilizerOptions,
    baseline: Baseline,
    pointer: Pointer,
    debounce: Debounce,
    frame: FrameRequest,
    published: PublishedUnits,
    // Separate from `baseline.height`: the baseline may be ahead of what listeners last saw.
    last_broadcast: Option<f64>,
    shared: SharedHeight,
}

impl Default for Stabilizer {
    fn default() -> Self {
        Self::new(StabilizerOptions::default())
    }
}

impl Stabilizer {
    pub fn new(options: StabilizerOptions) -> Self {
        debug_assert!(
            options.validate().is_ok(),
            "Stabilizer::new: invalid options: {options:?}"
        );
        stab_debug!(
            debounce_ms = options.debounce_ms,
            keyboard_ratio = options.keyboard_ratio,
            "Stabilizer::new"
        );
        Self {
            options,
            baseline: Baseline::default(),
            pointer: Pointer::Fine,
            debounce: Debounce::default(),
            frame: FrameRequest::default(),
            published: PublishedUnits::default(),
            last_broadcast: None,
            shared: SharedHeight::new(),
        }
    }

    pub fn try_new(options: StabilizerOptions) -> Result<Self, OptionsError> {
        options.validate()?;
        Ok(Self::new(options))
    }

    /// Uses `shared` as the cross-component height slot instead of a private one.
    pub fn with_shared_height(mut self, shared: SharedHeight) -> Self {
        self.shared = shared;
        self
    }

    pub fn options(&self) -> &StabilizerOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: StabilizerOptions) -> Result<(), OptionsError> {
        options.validate()?;
        self.options = options;
        Ok(())
    }

    pub fn baseline(&self) -> Baseline {
        self.baseline
    }

    pub fn locked_height(&self) -> Option<f64> {
        self.baseline.locked_height
    }

    pub fn pointer(&self) -> Pointer {
        self.pointer
    }

    /// Updates the cached pointer modality. Takes effect on the next classification.
    pub fn set_pointer(&mut self, pointer: Pointer) {
        if self.pointer != pointer {
            stab_debug!(?pointer, "Stabilizer::set_pointer");
        }
        self.pointer = pointer;
    }

    pub fn pending(&self) -> Option<PendingUpdate> {
        self.debounce.pending()
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.debounce.due_ms()
    }

    pub fn wants_animation_frame(&self) -> bool {
        self.frame.is_requested()
    }

    pub fn published(&self, property: UnitProperty) -> Option<&str> {
        self.published.get(property)
    }

    pub fn shared_height(&self) -> &SharedHeight {
        &self.shared
    }

    pub fn last_broadcast(&self) -> Option<f64> {
        self.last_broadcast
    }

    /// Forgets the classification baseline and the effects floor.
    ///
    /// The next usable sample commits immediately.
    pub fn reset_baseline(&mut self) {
        self.baseline = Baseline::default();
    }

    /// Collects a sample from `sources` and runs it through the state machine.
    pub fn update(
        &mut self,
        sources: &MeasurementSources,
        now_ms: u64,
        publisher: &mut dyn Publisher,
    ) -> Outcome {
        let Some(sample) = sources.sample() else {
            if self.frame.request() {
                stab_trace!(now_ms, "no usable height; retrying next frame");
            }
            return Outcome::RetryNextFrame;
        };
        self.update_sample(&sample, now_ms, publisher)
    }

    /// Runs an already collected sample through the state machine.
    pub fn update_sample(
        &mut self,
        sample: &ViewportSample,
        now_ms: u64,
        publisher: &mut dyn Publisher,
    ) -> Outcome {
        if !sample.height.is_finite() || sample.height <= 0.0 {
            stab_warn!(height = sample.height, "ignoring sample without a usable height");
            self.frame.request();
            return Outcome::RetryNextFrame;
        }

        if self.options.eager_effects {
            let effects = self.effects_height(sample.height);
            self.published
                .write(UnitProperty::Effects, effects, publisher);
        }

        self.frame.cancel();

        let c = self.classify(sample);

        if !c.should_update {
            if sample.width.is_some() {
                self.baseline.width = sample.width;
            }
            if sample.orientation.is_some() {
                self.baseline.orientation = sample.orientation;
            }
            if self.debounce.is_scheduled() {
                let due_ms = self.buffer(sample.height, &c, now_ms);
                return Outcome::Extended {
                    due_ms,
                    kind: c.kind,
                };
            }
            return Outcome::Skipped { kind: c.kind };
        }

        self.baseline.width = sample.width;
        if sample.orientation.is_some() {
            self.baseline.orientation = sample.orientation;
        }

        if c.geometry_changed {
            self.baseline.locked_height = None;
        }

        if c.is_height_only() {
            let due_ms = self.buffer(sample.height, &c, now_ms);
            return Outcome::Deferred {
                due_ms,
                kind: c.kind,
            };
        }

        self.debounce.clear();
        self.commit(sample.height, c.lock(), publisher);
        Outcome::Committed {
            height: sample.height,
            kind: c.kind,
        }
    }

    /// Classifies `sample` against the current baseline without changing any state.
    pub fn classify(&self, sample: &ViewportSample) -> Classification {
        classify(sample, &self.baseline, self.pointer, &self.options)
    }

    /// Commits the buffered height once its debounce window has elapsed.
    ///
    /// Returns the committed height.
    pub fn tick(&mut self, now_ms: u64, publisher: &mut dyn Publisher) -> Option<f64> {
        let pending = self.debounce.poll(now_ms)?;
        self.commit(pending.height, pending.lock, publisher);
        Some(pending.height)
    }

    /// Runs the animation-frame retry, if one was requested.
    pub fn on_animation_frame(
        &mut self,
        sources: &MeasurementSources,
        now_ms: u64,
        publisher: &mut dyn Publisher,
    ) -> Option<Outcome> {
        if !self.frame.cancel() {
            return None;
        }
        Some(self.update(sources, now_ms, publisher))
    }

    /// Cancels the pending frame and debounce, clears the floor and removes both properties.
    pub fn teardown(&mut self, publisher: &mut dyn Publisher) {
        stab_debug!(
            pending = self.debounce.is_scheduled(),
            frame = self.frame.is_requested(),
            "Stabilizer::teardown"
        );
        self.frame.cancel();
        self.debounce.clear();
        self.baseline.locked_height = None;
        self.published.clear(publisher);
    }

    fn buffer(&mut self, height: f64, c: &Classification, now_ms: u64) -> u64 {
        let due_ms = self.debounce.buffer(
            PendingUpdate {
                height,
                lock: c.lock(),
            },
            now_ms,
            self.options.debounce_ms,
        );
        stab_trace!(height, due_ms, kind = ?c.kind, "buffered height update");
        due_ms
    }

    fn effects_height(&self, height: f64) -> f64 {
        match self.baseline.locked_height {
            Some(locked) if locked > height => locked,
            _ => height,
        }
    }

    fn commit(&mut self, height: f64, lock: bool, publisher: &mut dyn Publisher) {
        self.baseline.height = Some(height);
        if lock {
            let locked = self.effects_height(height);
            self.baseline.locked_height = Some(locked);
        }

        self.published
            .write(UnitProperty::Viewport, height, publisher);
        let effects = self.effects_height(height);
        self.published
            .write(UnitProperty::Effects, effects, publisher);

        self.shared.store(height);
        stab_debug!(height, lock, effects, "commit");

        if self.last_broadcast == Some(height) {
            return;
        }
        self.last_broadcast = Some(height);
        let change = HeightChange { height };
        if let Some(cb) = &self.options.on_height_change {
            cb(change);
        }
        publisher.height_changed(change);
    }
}
