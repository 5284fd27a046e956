//! Ownership and lifecycle of the two periodic animation tasks.

use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use rand::Rng;
use tokio::{task::JoinHandle, time::MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use super::{
    BOUNCE_TICK, BounceField, BouncingEntity, EntityKind, MatrixRain, RAIN_INTERVAL, RainFrame,
    Viewport,
};

/// A tokio task that runs `tick` every `period` until cancelled
///
/// Dropping the handle cancels the task.
pub struct PeriodicTask {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

impl PeriodicTask {
    /// Spawn on the current runtime
    ///
    /// Returns `None` (and logs) when called outside a tokio runtime.
    pub fn spawn<F>(name: &'static str, period: Duration, mut tick: F) -> Option<Self>
    where
        F: FnMut() + Send + 'static,
    {
        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(runtime) => runtime,
            Err(e) => {
                tracing::warn!("Cannot start {} task: {}", name, e);
                return None;
            }
        };

        let token = CancellationToken::new();
        let cancelled = token.clone();
        let handle = runtime.spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    _ = cancelled.cancelled() => break,
                    _ = ticker.tick() => tick(),
                }
            }
            tracing::debug!("{} task stopped", name);
        });
        tracing::debug!("{} task started", name);

        Some(Self { token, handle })
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_running(&self) -> bool {
        !self.token.is_cancelled() && !self.handle.is_finished()
    }
}

impl Drop for PeriodicTask {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Owns the bounce and rain models and starts or stops their tasks
///
/// - bounce runs while at least one entity exists
/// - rain runs while the matrix effect is on
pub struct AnimationScheduler {
    bounce: Arc<Mutex<BounceField>>,
    rain: Arc<Mutex<MatrixRain>>,
    last_frame: Arc<Mutex<Option<RainFrame>>>,
    bounce_task: Option<PeriodicTask>,
    rain_task: Option<PeriodicTask>,
}

impl AnimationScheduler {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            bounce: Arc::new(Mutex::new(BounceField::new(viewport))),
            rain: Arc::new(Mutex::new(MatrixRain::new(viewport))),
            last_frame: Arc::new(Mutex::new(None)),
            bounce_task: None,
            rain_task: None,
        }
    }

    /// Append an entity; starts the bounce task on the empty → non-empty edge
    pub fn spawn_entity(&mut self, kind: EntityKind, content: String, rng: &mut impl Rng) -> u64 {
        let id = lock(&self.bounce).spawn(kind, content, rng);
        if self.bounce_task.is_none() {
            let bounce = self.bounce.clone();
            self.bounce_task = PeriodicTask::spawn("bounce", BOUNCE_TICK, move || {
                lock(&bounce).tick();
            });
        }
        id
    }

    /// Remove every entity and release the bounce task
    pub fn clear_entities(&mut self) {
        lock(&self.bounce).clear();
        self.bounce_task = None;
    }

    /// Start or stop the rain task; repeated calls with the same value are no-ops
    pub fn set_matrix(&mut self, on: bool) {
        match (on, self.rain_task.is_some()) {
            (true, false) => {
                let rain = self.rain.clone();
                let last_frame = self.last_frame.clone();
                self.rain_task = PeriodicTask::spawn("rain", RAIN_INTERVAL, move || {
                    let frame = lock(&rain).step(&mut rand::rng());
                    *lock(&last_frame) = Some(frame);
                });
            }
            (false, true) => {
                self.rain_task = None;
                *lock(&self.last_frame) = None;
            }
            _ => {}
        }
    }

    pub fn resize(&mut self, viewport: Viewport) {
        lock(&self.bounce).resize(viewport);
        lock(&self.rain).resize(viewport);
    }

    /// Cancel both tasks and drop all entities
    pub fn teardown(&mut self) {
        self.clear_entities();
        self.set_matrix(false);
    }

    pub fn is_bouncing(&self) -> bool {
        self.bounce_task.as_ref().is_some_and(PeriodicTask::is_running)
    }

    pub fn is_raining(&self) -> bool {
        self.rain_task.as_ref().is_some_and(PeriodicTask::is_running)
    }

    pub fn entities(&self) -> Vec<BouncingEntity> {
        lock(&self.bounce).entities().to_vec()
    }

    pub fn rain_columns(&self) -> usize {
        lock(&self.rain).columns()
    }

    pub fn rain_frames(&self) -> u64 {
        lock(&self.rain).frames()
    }

    pub fn last_frame(&self) -> Option<RainFrame> {
        lock(&self.last_frame).clone()
    }
}

impl Drop for AnimationScheduler {
    fn drop(&mut self) {
        self.teardown();
    }
}
