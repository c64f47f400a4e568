//! Bounded polling for asynchronous remote state transitions
//!
//! Cloud mutations are acknowledged long before they complete; the only way
//! to observe completion is to re-read the resource. This module provides
//! the retry loop used for that: fixed or bounded-range intervals, a hard
//! attempt budget, no backoff.

use crate::error::{CloudError, Result};
use crate::instance::Instance;
use crate::provider::ComputeProvider;
use rand::Rng;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

/// Interval between poll attempts
#[derive(Debug, Clone, Copy)]
pub enum PollInterval {
    /// Sleep the same duration between every attempt
    Fixed(Duration),
    /// Sleep a uniformly drawn duration from `min..=max` between attempts
    Range { min: Duration, max: Duration },
}

impl PollInterval {
    fn delay(&self) -> Duration {
        match self {
            PollInterval::Fixed(interval) => *interval,
            PollInterval::Range { min, max } => {
                let ms = rand::thread_rng()
                    .gen_range(min.as_millis() as u64..=max.as_millis() as u64);
                Duration::from_millis(ms)
            }
        }
    }
}

/// Retry budget for a poll loop. Pure configuration, never mutated at
/// runtime; the attempt count doubles as the de facto timeout.
#[derive(Debug, Clone, Copy)]
pub struct PollConfig {
    pub max_attempts: u32,
    pub interval: PollInterval,
}

impl PollConfig {
    pub fn fixed(max_attempts: u32, interval: Duration) -> Self {
        Self {
            max_attempts,
            interval: PollInterval::Fixed(interval),
        }
    }

    pub fn ranged(max_attempts: u32, min: Duration, max: Duration) -> Self {
        Self {
            max_attempts,
            interval: PollInterval::Range { min, max },
        }
    }
}

/// Repeatedly invoke `probe` until `ready` accepts its result.
///
/// Every probe invocation consumes one attempt, whether it errors or
/// returns a value the predicate rejects. Sleeps the configured interval
/// between attempts, never after the last one. Once the budget is spent the
/// loop surfaces [`CloudError::Exhausted`] instead of silently succeeding.
///
/// `what` names the awaited condition in logs and the exhaustion error.
pub async fn poll_until_ready<T, F, Fut, P>(
    config: &PollConfig,
    what: &str,
    mut probe: F,
    ready: P,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
    P: Fn(&T) -> bool,
{
    for attempt in 1..=config.max_attempts {
        match probe().await {
            Ok(value) if ready(&value) => {
                tracing::debug!(what, attempt, "ready");
                return Ok(value);
            }
            Ok(_) => {
                tracing::debug!(what, attempt, "not ready yet");
            }
            Err(e) => {
                tracing::debug!(what, attempt, error = %e, "probe failed");
            }
        }

        if attempt < config.max_attempts {
            sleep(config.interval.delay()).await;
        }
    }

    Err(CloudError::Exhausted {
        what: what.to_string(),
        attempts: config.max_attempts,
    })
}

/// Poll `describe` until the instance carries a public IPv4 address.
pub async fn wait_for_network(
    provider: &dyn ComputeProvider,
    id: &str,
    config: &PollConfig,
) -> Result<Instance> {
    poll_until_ready(
        config,
        "public IPv4 address",
        || provider.describe(id),
        Instance::has_public_ip,
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::{CreateRequest, InstanceState};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn quick(max_attempts: u32) -> PollConfig {
        PollConfig::fixed(max_attempts, Duration::from_millis(1))
    }

    #[tokio::test]
    async fn test_returns_ready_value_on_kth_attempt() {
        let calls = AtomicU32::new(0);
        let value = poll_until_ready(
            &quick(10),
            "counter",
            || {
                let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                async move { Ok::<_, CloudError>(n) }
            },
            |n| *n >= 3,
        )
        .await
        .unwrap();

        assert_eq!(value, 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_first_attempt_can_succeed() {
        let calls = AtomicU32::new(0);
        let value = poll_until_ready(
            &quick(10),
            "counter",
            || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Ok::<_, CloudError>("up") }
            },
            |_| true,
        )
        .await
        .unwrap();

        assert_eq!(value, "up");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_exhausts_budget_when_never_ready() {
        let calls = AtomicU32::new(0);
        let err = poll_until_ready(
            &quick(5),
            "never",
            || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Ok::<_, CloudError>(()) }
            },
            |_| false,
        )
        .await
        .unwrap_err();

        assert_eq!(calls.load(Ordering::SeqCst), 5);
        match err {
            CloudError::Exhausted { what, attempts } => {
                assert_eq!(what, "never");
                assert_eq!(attempts, 5);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_probe_errors_consume_attempts() {
        let calls = AtomicU32::new(0);
        let err = poll_until_ready(
            &quick(4),
            "flaky",
            || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err::<(), _>(CloudError::Transport("connection reset".to_string())) }
            },
            |_| true,
        )
        .await
        .unwrap_err();

        assert_eq!(calls.load(Ordering::SeqCst), 4);
        assert!(matches!(err, CloudError::Exhausted { attempts: 4, .. }));
    }

    /// Replays a canned sequence of describe results.
    struct ScriptedProvider {
        describes: Mutex<VecDeque<Result<Instance>>>,
        calls: AtomicU32,
    }

    impl ScriptedProvider {
        fn new(describes: Vec<Result<Instance>>) -> Self {
            Self {
                describes: Mutex::new(describes.into()),
                calls: AtomicU32::new(0),
            }
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ComputeProvider for ScriptedProvider {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn create(&self, _request: &CreateRequest) -> Result<Instance> {
            unimplemented!("not used in these tests")
        }

        async fn describe(&self, _id: &str) -> Result<Instance> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.describes
                .lock()
                .unwrap()
                .pop_front()
                .expect("describe called more often than scripted")
        }

        async fn delete(&self, _id: &str) -> Result<()> {
            Ok(())
        }
    }

    fn droplet(public_ip: Option<&str>) -> Instance {
        Instance {
            id: "555".to_string(),
            name: "test-1".to_string(),
            region: "nyc1".to_string(),
            image: "ubuntu-19-10-x64".to_string(),
            state: if public_ip.is_some() {
                InstanceState::Active
            } else {
                InstanceState::Pending
            },
            public_ip: public_ip.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_network_wait_completes_once_address_assigned() {
        // Two reads without an address, then one carrying it.
        let provider = ScriptedProvider::new(vec![
            Ok(droplet(None)),
            Ok(droplet(None)),
            Ok(droplet(Some("203.0.113.5"))),
        ]);

        let instance = wait_for_network(&provider, "555", &quick(10)).await.unwrap();

        assert_eq!(provider.calls(), 3);
        assert_eq!(instance.id, "555");
        assert_eq!(instance.public_ip.as_deref(), Some("203.0.113.5"));
    }

    #[tokio::test]
    async fn test_network_wait_exhausts_on_missing_address() {
        let provider = ScriptedProvider::new(vec![
            Ok(droplet(None)),
            Ok(droplet(None)),
            Ok(droplet(None)),
        ]);

        let err = wait_for_network(&provider, "555", &quick(3)).await.unwrap_err();

        assert_eq!(provider.calls(), 3);
        assert!(matches!(err, CloudError::Exhausted { attempts: 3, .. }));
    }

    #[tokio::test]
    async fn test_network_wait_survives_transient_describe_errors() {
        let provider = ScriptedProvider::new(vec![
            Err(CloudError::Transport("connection reset".to_string())),
            Ok(droplet(Some("203.0.113.5"))),
        ]);

        let instance = wait_for_network(&provider, "555", &quick(5)).await.unwrap();

        assert_eq!(provider.calls(), 2);
        assert!(instance.has_public_ip());
    }
}
