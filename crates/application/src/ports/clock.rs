//! Clock port for report timestamps

use chrono::{DateTime, Utc};

/// Port for getting the current time.
///
/// Run reports take their start and finish timestamps from this port so
/// tests can pin them.
pub trait Clock: Send + Sync {
    /// Returns the current UTC timestamp.
    fn now(&self) -> DateTime<Utc>;
}
