use chrono::{DateTime, TimeDelta, Utc};
use tracing::debug;

use crate::VesselRecord;

pub const DEFAULT_RETENTION: std::time::Duration = std::time::Duration::from_secs(24 * 60 * 60);

/// Drops vessels that never reported a position or have not been seen within the retention
/// window.
#[derive(Debug, Clone, Copy)]
pub struct EvictionPolicy {
    retention: TimeDelta,
}

/// Outcome of an eviction pass.
#[derive(Debug, Clone, Default)]
pub struct Eviction {
    pub retained: Vec<VesselRecord>,
    pub missing_position: usize,
    pub stale: usize,
}

impl Default for EvictionPolicy {
    fn default() -> Self {
        EvictionPolicy::new(DEFAULT_RETENTION)
    }
}

impl EvictionPolicy {
    pub fn new(retention: std::time::Duration) -> EvictionPolicy {
        EvictionPolicy {
            retention: TimeDelta::from_std(retention).unwrap_or(TimeDelta::MAX),
        }
    }

    pub fn apply<T>(&self, vessels: T, now: DateTime<Utc>) -> Eviction
    where
        T: IntoIterator<Item = VesselRecord>,
    {
        let mut eviction = Eviction::default();

        for vessel in vessels {
            if vessel.position().is_none() {
                eviction.missing_position += 1;
                continue;
            }
            if self.is_stale(&vessel, now) {
                eviction.stale += 1;
                continue;
            }
            eviction.retained.push(vessel);
        }

        eviction
    }

    /// Vessels with an unparseable `last_seen` are never considered stale.
    pub fn is_stale(&self, vessel: &VesselRecord, now: DateTime<Utc>) -> bool {
        match vessel.last_seen_at() {
            Some(last_seen) => now.signed_duration_since(last_seen) > self.retention,
            None => {
                debug!(
                    mmsi = %vessel.mmsi,
                    last_seen = %vessel.last_seen,
                    "retaining vessel with unparseable last_seen"
                );
                false
            }
        }
    }
}

impl Eviction {
    pub fn num_evicted(&self) -> usize {
        self.missing_position + self.stale
    }
}
