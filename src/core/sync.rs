//! Projection synchronization.
//!
//! Keeps three things coherent on the UI thread: the submitted parameters,
//! the projection that came back for them, and the year being looked at.
//! Requests leave through a [`ProjectionRequester`] and their outcomes come
//! back through [`SyncCore::apply_response`], tagged with the generation they
//! were sent under. Only the most recently dispatched generation may touch
//! the cache, whatever order responses arrive in.

use std::time::{
    Duration,
    Instant,
};

use log::{
    debug,
    info,
    warn,
};

use super::{
    cache::ProjectionCache,
    errors::ProjectionFailure,
    models::{
        Field,
        Generation,
        ParameterSet,
        Projection,
        RiskLevel,
    },
    parameters::ParameterStore,
    scrub::ScrubController,
    tasks::debounce::Debouncer,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    Idle,
    PendingDebounce,
    RequestInFlight,
    Settled,
    Failed,
}

impl SyncState {
    pub fn label(&self) -> &'static str {
        match self {
            SyncState::Idle => "Idle",
            SyncState::PendingDebounce => "Waiting for input",
            SyncState::RequestInFlight => "Simulating",
            SyncState::Settled => "Up to date",
            SyncState::Failed => "Offline",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionRequest {
    pub generation: Generation,
    pub parameters: ParameterSet,
}

/// Sends a projection request somewhere and eventually reports back.
pub trait ProjectionRequester {
    fn dispatch(&self, request: ProjectionRequest);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseOutcome {
    Committed,
    Failed,
    Discarded,
}

pub struct SyncCore {
    store: ParameterStore,
    debounce: Debouncer<ParameterSet>,
    cache: ProjectionCache,
    scrub: ScrubController,
    state: SyncState,
    next_generation: u64,
    awaiting: Option<ProjectionRequest>,
    last_failure: Option<ProjectionFailure>,
}

impl SyncCore {
    pub fn new(initial: ParameterSet, debounce_window: Duration) -> Self {
        Self {
            store: ParameterStore::new(initial),
            debounce: Debouncer::new(debounce_window),
            cache: ProjectionCache::new(),
            scrub: ScrubController::default(),
            state: SyncState::Idle,
            next_generation: 0,
            awaiting: None,
            last_failure: None,
        }
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    pub fn parameters(&self) -> &ParameterSet {
        self.store.current()
    }

    pub fn cache(&self) -> &ProjectionCache {
        &self.cache
    }

    pub fn projection(&self) -> Option<&Projection> {
        self.cache.current()
    }

    pub fn offset(&self) -> u32 {
        self.scrub.offset()
    }

    pub fn horizon(&self) -> u32 {
        self.scrub.horizon()
    }

    pub fn derived_risk(&self) -> f64 {
        self.scrub.derived_risk()
    }

    pub fn is_high_risk(&self) -> bool {
        self.scrub.is_high_risk()
    }

    pub fn risk_level(&self) -> RiskLevel {
        self.scrub.risk_level()
    }

    pub fn selected_age(&self) -> i64 {
        self.scrub.selected_age(self.store.current().age, &self.cache)
    }

    /// Set while the latest request failed and nothing newer has succeeded.
    pub fn last_failure(&self) -> Option<&ProjectionFailure> {
        self.last_failure.as_ref()
    }

    pub fn is_stale(&self) -> bool {
        self.last_failure.is_some()
    }

    pub fn awaiting_generation(&self) -> Option<Generation> {
        self.awaiting.as_ref().map(|r| r.generation)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.debounce.deadline()
    }

    pub fn set_field(&mut self, field: Field, value: f64, now: Instant) -> ParameterSet {
        let snapshot = self.store.set_field(field, value);
        debug!("event=parameter_changed field={} value={}", field, value);
        self.parameters_changed(snapshot.clone(), now);
        snapshot
    }

    pub fn replace_parameters(&mut self, parameters: ParameterSet, now: Instant) -> ParameterSet {
        let snapshot = self.store.replace(parameters);
        debug!("event=parameters_replaced");
        self.parameters_changed(snapshot.clone(), now);
        snapshot
    }

    /// Schedules a request for the current parameters without editing them.
    pub fn request_refresh(&mut self, now: Instant) {
        let snapshot = self.store.current().clone();
        self.parameters_changed(snapshot, now);
    }

    fn parameters_changed(&mut self, snapshot: ParameterSet, now: Instant) {
        self.debounce.schedule(now, snapshot);
        self.state = SyncState::PendingDebounce;
    }

    pub fn set_offset(&mut self, offset: i64) -> u32 {
        self.scrub.set_offset(offset, &self.cache)
    }

    /// Sends the debounced request once its quiet window has elapsed.
    pub fn tick(&mut self, now: Instant, requester: &dyn ProjectionRequester) -> Option<Generation> {
        let parameters = self.debounce.poll(now)?;

        self.next_generation += 1;
        let generation = Generation(self.next_generation);
        let request = ProjectionRequest { generation, parameters };

        if let Some(previous) = &self.awaiting {
            debug!(
                "event=request_superseded previous={} next={}",
                previous.generation, generation
            );
        }
        info!("event=projection_dispatch generation={} age={}", generation, request.parameters.age);

        self.awaiting = Some(request.clone());
        self.state = SyncState::RequestInFlight;
        requester.dispatch(request);
        Some(generation)
    }

    pub fn apply_response(
        &mut self,
        generation: Generation,
        result: Result<Projection, ProjectionFailure>,
    ) -> ResponseOutcome {
        let request = match self.awaiting.take() {
            Some(request) if request.generation == generation => request,
            other => {
                self.awaiting = other;
                debug!(
                    "event=projection_discarded generation={} awaiting={:?}",
                    generation,
                    self.awaiting_generation()
                );
                return ResponseOutcome::Discarded;
            }
        };

        let pending = self.debounce.is_pending();

        match result {
            Ok(projection) => {
                info!(
                    "event=projection_committed generation={} points={}",
                    generation,
                    projection.len()
                );
                self.cache.replace(generation, request.parameters, projection);
                self.scrub.rederive(&self.cache);
                self.last_failure = None;
                if !pending {
                    self.state = SyncState::Settled;
                }
                ResponseOutcome::Committed
            }
            Err(failure) => {
                warn!("event=projection_failed generation={} error={}", generation, failure);
                self.last_failure = Some(failure);
                if !pending {
                    self.state = SyncState::Failed;
                }
                ResponseOutcome::Failed
            }
        }
    }
}

impl Default for SyncCore {
    fn default() -> Self {
        Self::new(
            ParameterSet::default(),
            Duration::from_millis(super::tasks::debounce::DEFAULT_DEBOUNCE_MS),
        )
    }
}
