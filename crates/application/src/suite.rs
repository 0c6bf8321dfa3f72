//! Suite runner: turns scenario results into recorded outcomes.

use std::sync::Arc;
use std::time::Instant;

use probe_domain::TestOutcome;
use tracing::{info, warn};

use crate::error::StepResult;
use crate::harness::Harness;
use crate::ports::HttpClient;
use crate::reporter::ReportCollector;
use crate::scenario::ScenarioContext;

/// Runs named scenarios against one harness and records their outcomes.
pub struct Suite<'r, C: HttpClient> {
    harness: Arc<Harness<C>>,
    reporter: &'r ReportCollector,
}

impl<'r, C: HttpClient> Suite<'r, C> {
    /// Creates a suite recording into `reporter`.
    pub const fn new(harness: Arc<Harness<C>>, reporter: &'r ReportCollector) -> Self {
        Self { harness, reporter }
    }

    /// Runs one scenario in a fresh context and records its outcome.
    ///
    /// A failing scenario is recorded and returned; it never stops the suite.
    pub async fn run_scenario<F>(&self, name: &str, scenario: F) -> TestOutcome
    where
        F: AsyncFnOnce(&mut ScenarioContext<C>) -> StepResult<()>,
    {
        let mut ctx = ScenarioContext::new(Arc::clone(&self.harness));
        let started = Instant::now();
        let result = scenario(&mut ctx).await;
        let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        let outcome = match result {
            Ok(()) => {
                info!(scenario = name, duration_ms, "Scenario passed");
                TestOutcome::passed(name, duration_ms)
            }
            Err(e) => {
                warn!(scenario = name, duration_ms, kind = %e.kind(), error = %e, "Scenario failed");
                TestOutcome::failed(name, duration_ms, e.kind(), e.to_string())
            }
        };

        self.reporter.record(outcome.clone());
        outcome
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::HarnessConfig;
    use crate::ports::Clock;
    use crate::test_support::MockHttpClient;
    use chrono::{DateTime, Utc};
    use pretty_assertions::assert_eq;
    use probe_domain::{FailureKind, OutcomeStatus, spec};
    use serde_json::json;

    struct UtcClock;

    impl Clock for UtcClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }

    #[tokio::test]
    async fn test_failures_are_recorded_and_suite_continues() {
        let client = Arc::new(
            MockHttpClient::new()
                .reply_text(200, "[]")
                .reply_text(200, "{}"),
        );
        let harness = Arc::new(Harness::new(client, HarnessConfig::default()));
        let collector = ReportCollector::open(Arc::new(UtcClock));
        let suite = Suite::new(harness, &collector);

        let first = suite
            .run_scenario("list objects", async |ctx| {
                let list = spec()
                    .get("https://api.restful-api.dev/objects")
                    .expect_status(200)
                    .build()?;
                ctx.run(&list).await?;
                Ok(())
            })
            .await;
        let second = suite
            .run_scenario("get unknown id", async |ctx| {
                let get = spec()
                    .get("https://api.restful-api.dev/objects/999999")
                    .expect_status(404)
                    .build()?;
                ctx.run(&get).await?;
                Ok(())
            })
            .await;
        let third = suite
            .run_scenario("uses a missing capture", async |ctx| {
                ctx.require("id")?;
                Ok(())
            })
            .await;

        assert_eq!(first.status, OutcomeStatus::Passed);
        assert_eq!(second.failure.unwrap().kind, FailureKind::Assertion);
        assert_eq!(third.failure.unwrap().kind, FailureKind::MissingInput);

        let report = collector.close().unwrap();
        assert_eq!((report.total, report.passed, report.failed), (3, 1, 2));
    }

    #[tokio::test]
    async fn test_scenarios_do_not_share_captures() {
        let client = Arc::new(MockHttpClient::new());
        let harness = Arc::new(Harness::new(client, HarnessConfig::default()));
        let collector = ReportCollector::open(Arc::new(UtcClock));
        let suite = Suite::new(harness, &collector);

        suite
            .run_scenario("sets a value", async |ctx| {
                ctx.set("id", json!("abc"));
                Ok(())
            })
            .await;
        let outcome = suite
            .run_scenario("reads it", async |ctx| {
                ctx.require("id")?;
                Ok(())
            })
            .await;

        assert!(!outcome.is_passed());
    }
}
