//! In-process circuit breaker with a sliding failure-ratio window.
//!
//! Outcomes are kept with their timestamps; anything older than the sampling
//! window is dropped before the ratio is evaluated. The circuit opens once
//! the window holds at least `minimum_throughput` calls and the failure share
//! reaches `failure_ratio`.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::ports::{CircuitBreaker, CircuitBreakerConfig, CircuitBreakerMetrics, CircuitState};

#[derive(Debug)]
struct Inner {
    state: CircuitState,
    outcomes: VecDeque<(Instant, bool)>,
    opened_at: Option<Instant>,
    half_open_in_flight: u32,
    total_successes: u64,
    total_failures: u64,
    times_opened: u64,
}

impl Inner {
    fn prune(&mut self, now: Instant, window: Duration) {
        while let Some((at, _)) = self.outcomes.front() {
            if now.duration_since(*at) > window {
                self.outcomes.pop_front();
            } else {
                break;
            }
        }
    }

    fn window_failures(&self) -> u32 {
        self.outcomes.iter().filter(|(_, ok)| !ok).count() as u32
    }
}

/// Circuit breaker shared by every call through one gateway chain.
#[derive(Debug)]
pub struct InMemoryCircuitBreaker {
    name: &'static str,
    config: CircuitBreakerConfig,
    inner: Mutex<Inner>,
}

impl InMemoryCircuitBreaker {
    pub fn new(name: &'static str, config: CircuitBreakerConfig) -> Self {
        Self {
            name,
            config,
            inner: Mutex::new(Inner {
                state: CircuitState::Closed,
                outcomes: VecDeque::new(),
                opened_at: None,
                half_open_in_flight: 0,
                total_successes: 0,
                total_failures: 0,
                times_opened: 0,
            }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A poisoned lock only means a panic elsewhere; the counters are still usable.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn open(&self, inner: &mut Inner, now: Instant) {
        inner.state = CircuitState::Open;
        inner.opened_at = Some(now);
        inner.half_open_in_flight = 0;
        inner.times_opened += 1;
        tracing::error!(
            circuit = self.name,
            break_secs = self.config.break_duration.as_secs_f64(),
            "Circuit opened"
        );
    }

    /// Moves Open to HalfOpen once the break has elapsed.
    fn refresh(&self, inner: &mut Inner, now: Instant) {
        if inner.state == CircuitState::Open {
            let elapsed = inner
                .opened_at
                .map(|at| now.duration_since(at) >= self.config.break_duration)
                .unwrap_or(true);
            if elapsed {
                inner.state = CircuitState::HalfOpen;
                inner.half_open_in_flight = 0;
                tracing::info!(circuit = self.name, "Circuit half-open, allowing trial call");
            }
        }
    }
}

impl CircuitBreaker for InMemoryCircuitBreaker {
    fn state(&self) -> CircuitState {
        let mut inner = self.lock();
        self.refresh(&mut inner, Instant::now());
        inner.state
    }

    fn should_allow(&self) -> bool {
        let mut inner = self.lock();
        self.refresh(&mut inner, Instant::now());
        match inner.state {
            CircuitState::Closed => true,
            CircuitState::Open => false,
            CircuitState::HalfOpen => {
                if inner.half_open_in_flight < self.config.half_open_max_requests {
                    inner.half_open_in_flight += 1;
                    true
                } else {
                    false
                }
            }
        }
    }

    fn record_success(&self) {
        let now = Instant::now();
        let mut inner = self.lock();
        inner.total_successes += 1;

        match inner.state {
            CircuitState::HalfOpen => {
                inner.state = CircuitState::Closed;
                inner.outcomes.clear();
                inner.opened_at = None;
                inner.half_open_in_flight = 0;
                tracing::info!(circuit = self.name, "Circuit closed");
            }
            _ => {
                inner.outcomes.push_back((now, true));
                inner.prune(now, self.config.sampling_window);
            }
        }
    }

    fn record_failure(&self) {
        let now = Instant::now();
        let mut inner = self.lock();
        inner.total_failures += 1;

        match inner.state {
            CircuitState::HalfOpen => self.open(&mut inner, now),
            CircuitState::Open => {}
            CircuitState::Closed => {
                inner.outcomes.push_back((now, false));
                inner.prune(now, self.config.sampling_window);

                let calls = inner.outcomes.len() as u32;
                if calls >= self.config.minimum_throughput {
                    let ratio = f64::from(inner.window_failures()) / f64::from(calls);
                    if ratio >= self.config.failure_ratio {
                        self.open(&mut inner, now);
                    }
                }
            }
        }
    }

    fn release_trial(&self) {
        let mut inner = self.lock();
        if inner.state == CircuitState::HalfOpen && inner.half_open_in_flight > 0 {
            inner.half_open_in_flight -= 1;
            tracing::debug!(circuit = self.name, "Half-open trial released");
        }
    }

    fn reset(&self) {
        let mut inner = self.lock();
        inner.state = CircuitState::Closed;
        inner.outcomes.clear();
        inner.opened_at = None;
        inner.half_open_in_flight = 0;
    }

    fn metrics(&self) -> CircuitBreakerMetrics {
        let now = Instant::now();
        let mut inner = self.lock();
        self.refresh(&mut inner, now);
        inner.prune(now, self.config.sampling_window);

        let time_until_half_open = match (inner.state, inner.opened_at) {
            (CircuitState::Open, Some(at)) => {
                Some(self.config.break_duration.saturating_sub(now.duration_since(at)))
            }
            _ => None,
        };

        CircuitBreakerMetrics {
            state: Some(inner.state),
            total_successes: inner.total_successes,
            total_failures: inner.total_failures,
            times_opened: inner.times_opened,
            window_calls: inner.outcomes.len() as u32,
            window_failures: inner.window_failures(),
            time_until_half_open,
        }
    }
}
