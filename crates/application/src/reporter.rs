//! Run report collection.
//!
//! A [`ReportCollector`] is opened at the start of a run, receives one
//! outcome per scenario and is closed exactly once, handing the finished
//! report to every registered sink.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use probe_domain::{RunReport, TestOutcome};
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::error::ReportError;
use crate::ports::{Clock, ReportSink};

/// Collects test outcomes for one run.
pub struct ReportCollector {
    run_id: Uuid,
    started_at: DateTime<Utc>,
    clock: Arc<dyn Clock>,
    sinks: Vec<Box<dyn ReportSink>>,
    outcomes: Mutex<Vec<TestOutcome>>,
}

impl ReportCollector {
    /// Starts a run, stamping its start time from `clock`.
    pub fn open(clock: Arc<dyn Clock>) -> Self {
        let run_id = Uuid::now_v7();
        let started_at = clock.now();
        debug!(%run_id, "Report run opened");
        Self {
            run_id,
            started_at,
            clock,
            sinks: Vec::new(),
            outcomes: Mutex::new(Vec::new()),
        }
    }

    /// Registers a sink. Sinks receive the report in registration order.
    pub fn add(&mut self, sink: impl ReportSink + 'static) {
        self.sinks.push(Box::new(sink));
    }

    /// Returns the id of this run.
    #[must_use]
    pub const fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Appends an outcome. Safe to call from concurrently running scenarios.
    pub fn record(&self, outcome: TestOutcome) {
        self.outcomes.lock().push(outcome);
    }

    /// Returns the number of outcomes recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.outcomes.lock().len()
    }

    /// Returns true if nothing was recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outcomes.lock().is_empty()
    }

    /// Finishes the run and writes the report to every sink.
    ///
    /// Every sink is attempted even if an earlier one fails.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Sink` for the first sink that failed.
    pub fn close(self) -> Result<RunReport, ReportError> {
        let finished_at = self.clock.now();
        let outcomes = self.outcomes.into_inner();
        let report = RunReport::new(self.run_id, self.started_at, finished_at, outcomes);

        let mut first_error = None;
        for mut sink in self.sinks {
            if let Err(e) = sink.write(&report) {
                error!(sink = sink.name(), error = %e, "Report sink failed");
                first_error.get_or_insert_with(|| ReportError::Sink {
                    sink: sink.name().to_string(),
                    message: e.to_string(),
                });
            }
        }

        info!(
            run_id = %report.run_id,
            total = report.total,
            passed = report.passed,
            failed = report.failed,
            duration_ms = report.duration_ms,
            "Run finished"
        );

        match first_error {
            Some(e) => Err(e),
            None => Ok(report),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use probe_domain::FailureKind;

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn clock() -> Arc<dyn Clock> {
        Arc::new(FixedClock(
            Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap(),
        ))
    }

    #[derive(Clone, Default)]
    struct MemorySink {
        received: Arc<Mutex<Vec<RunReport>>>,
    }

    impl ReportSink for MemorySink {
        fn name(&self) -> &str {
            "memory"
        }

        fn write(&mut self, report: &RunReport) -> Result<(), ReportError> {
            self.received.lock().push(report.clone());
            Ok(())
        }
    }

    struct BrokenSink;

    impl ReportSink for BrokenSink {
        fn name(&self) -> &str {
            "broken"
        }

        fn write(&mut self, _report: &RunReport) -> Result<(), ReportError> {
            Err(ReportError::Serialization("disk full".to_string()))
        }
    }

    #[test]
    fn test_close_without_outcomes_or_sinks() {
        let report = ReportCollector::open(clock()).close().unwrap();
        assert_eq!(report.total, 0);
        assert!(report.all_passed());
        assert!(report.outcomes.is_empty());
    }

    #[test]
    fn test_outcomes_kept_in_order_and_sent_once() {
        let sink = MemorySink::default();
        let mut collector = ReportCollector::open(clock());
        collector.add(sink.clone());

        collector.record(TestOutcome::passed("list objects", 12));
        collector.record(TestOutcome::failed(
            "get unknown id",
            8,
            FailureKind::Assertion,
            "Expected status = 404, got 200 OK",
        ));
        assert_eq!(collector.len(), 2);

        let report = collector.close().unwrap();

        let received = sink.received.lock();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0], report);
        let names: Vec<_> = report.outcomes.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["list objects", "get unknown id"]);
        assert_eq!((report.passed, report.failed), (1, 1));
    }

    #[test]
    fn test_failing_sink_does_not_starve_later_sinks() {
        let sink = MemorySink::default();
        let mut collector = ReportCollector::open(clock());
        collector.add(BrokenSink);
        collector.add(sink.clone());
        collector.record(TestOutcome::passed("list objects", 3));

        let err = collector.close().unwrap_err();

        assert!(matches!(err, ReportError::Sink { ref sink, .. } if sink == "broken"));
        assert_eq!(sink.received.lock().len(), 1);
    }

    #[test]
    fn test_concurrent_records_are_all_kept() {
        let collector = ReportCollector::open(clock());
        std::thread::scope(|scope| {
            for worker in 0..4 {
                let collector = &collector;
                scope.spawn(move || {
                    for i in 0..25 {
                        collector.record(TestOutcome::passed(format!("t{worker}-{i}"), 1));
                    }
                });
            }
        });

        assert_eq!(collector.close().unwrap().total, 100);
    }
}
