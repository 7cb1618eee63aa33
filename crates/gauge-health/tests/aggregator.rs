//! Concurrency and failure isolation of the health aggregator.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use futures::future::BoxFuture;
use gauge_config::GaugeConfig;
use gauge_health::{DisabledProbe, HealthAggregator, HealthProbe};
use pretty_assertions::assert_eq;

struct Fixed(&'static str, bool);

impl HealthProbe for Fixed {
    fn service(&self) -> &str {
        self.0
    }

    fn check(&self) -> BoxFuture<'_, bool> {
        let healthy = self.1;
        Box::pin(async move { healthy })
    }
}

struct Panicking;

impl HealthProbe for Panicking {
    fn service(&self) -> &str {
        "panicking"
    }

    fn check(&self) -> BoxFuture<'_, bool> {
        Box::pin(async { panic!("probe blew up") })
    }
}

struct Sleeping(Duration);

impl HealthProbe for Sleeping {
    fn service(&self) -> &str {
        "sleeping"
    }

    fn check(&self) -> BoxFuture<'_, bool> {
        let delay = self.0;
        Box::pin(async move {
            tokio::time::sleep(delay).await;
            true
        })
    }
}

struct Blocking(Duration);

impl HealthProbe for Blocking {
    fn service(&self) -> &str {
        "blocking"
    }

    fn check(&self) -> BoxFuture<'_, bool> {
        let delay = self.0;
        Box::pin(async move {
            std::thread::sleep(delay);
            true
        })
    }
}

struct Counting(Arc<AtomicUsize>);

impl HealthProbe for Counting {
    fn service(&self) -> &str {
        "counting"
    }

    fn check(&self) -> BoxFuture<'_, bool> {
        Box::pin(async move {
            self.0.fetch_add(1, Ordering::SeqCst);
            true
        })
    }
}

#[tokio::test]
async fn panic_and_timeout_are_isolated() {
    let aggregator = HealthAggregator::new(Duration::from_millis(200))
        .with_probe(Fixed("up", true))
        .with_probe(Fixed("down", false))
        .with_probe(Panicking)
        .with_probe(Sleeping(Duration::from_secs(30)));

    let report = aggregator.check_all().await;

    assert_eq!(report.len(), 4);
    assert_eq!(report.get("up"), Some(true));
    assert_eq!(report.get("down"), Some(false));
    assert_eq!(report.get("panicking"), Some(false));
    assert_eq!(report.get("sleeping"), Some(false));
    assert!(!report.all_healthy());
}

#[tokio::test]
async fn probes_run_concurrently() {
    let mut aggregator = HealthAggregator::new(Duration::from_secs(5))
        .with_probe(Fixed("a", true))
        .with_probe(DisabledProbe::new("b"));
    for _ in 0..4 {
        aggregator.register(Arc::new(Sleeping(Duration::from_millis(300))));
    }

    let started = Instant::now();
    let report = aggregator.check_all().await;

    assert!(started.elapsed() < Duration::from_millis(1_000));
    assert_eq!(report.get("sleeping"), Some(true));
    assert_eq!(report.get("b"), Some(false));
}

#[tokio::test]
async fn each_probe_runs_once_per_check() {
    let calls = Arc::new(AtomicUsize::new(0));
    let aggregator =
        HealthAggregator::new(Duration::from_secs(1)).with_probe(Counting(Arc::clone(&calls)));

    aggregator.check_all().await;
    aggregator.check_all().await;

    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn unconfigured_services_are_listed_as_down() {
    let report = HealthAggregator::from_config(&GaugeConfig::default())
        .check_all()
        .await;

    let services: Vec<&str> = report.services().collect();
    assert_eq!(
        services,
        vec![
            "cache",
            "document_store",
            "object_store",
            "primary_inference",
            "secondary_inference",
            "secret_store",
        ]
    );
    assert!(services.iter().all(|s| report.get(s) == Some(false)));
}

#[tokio::test]
async fn report_serializes_to_a_flat_object() {
    let report = HealthAggregator::new(Duration::from_secs(1))
        .with_probe(Fixed("cache", true))
        .check_all()
        .await;
    assert_eq!(
        serde_json::to_string(&report).unwrap(),
        r#"{"cache":true}"#
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn thread_blocking_check_still_times_out() {
    let aggregator = HealthAggregator::new(Duration::from_millis(200))
        .with_probe(Fixed("up", true))
        .with_probe(Blocking(Duration::from_secs(2)));

    let started = Instant::now();
    let report = aggregator.check_all().await;
    let elapsed = started.elapsed();

    assert_eq!(report.get("up"), Some(true));
    assert_eq!(report.get("blocking"), Some(false));
    assert!(
        elapsed < Duration::from_millis(1500),
        "check_all waited {elapsed:?} on a blocked task"
    );
}
