use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::{Mmsi, Snapshot, UpdateKind, VesselRecord, VesselUpdate};

/// Keyed state of every vessel seen during the session.
///
/// Updates are applied strictly in the order they are given, the store is owned and driven by a
/// single consumer.
#[derive(Debug, Default)]
pub struct VesselStore {
    vessels: HashMap<Mmsi, VesselRecord>,
}

impl VesselStore {
    pub fn new() -> VesselStore {
        VesselStore::default()
    }

    pub fn from_snapshot(snapshot: Snapshot) -> VesselStore {
        let mut store = VesselStore::new();
        store.load(snapshot);
        store
    }

    /// Populates the store from a previously persisted snapshot, returns the number of records
    /// loaded. Records keep their persisted fields, including the flag.
    pub fn load(&mut self, snapshot: Snapshot) -> usize {
        let Snapshot { ships, .. } = snapshot;
        let num_ships = ships.len();

        self.vessels.reserve(num_ships);
        for mut vessel in ships {
            vessel.normalize_position();
            self.vessels.insert(vessel.mmsi, vessel);
        }

        num_ships
    }

    /// Merges a single normalized update into the record of its vessel, creating the record on
    /// first sight.
    pub fn upsert(&mut self, update: VesselUpdate, received_at: DateTime<Utc>) {
        let VesselUpdate {
            mmsi,
            metadata_name,
            kind,
        } = update;

        let vessel = self
            .vessels
            .entry(mmsi)
            .or_insert_with(|| VesselRecord::new(mmsi, received_at));

        vessel.touch(&received_at);

        if let Some(name) = metadata_name {
            vessel.merge_metadata_name(&name);
        }

        match kind {
            UpdateKind::Position(position) => vessel.merge_position(&position),
            UpdateKind::Static(data) => vessel.merge_static(&data),
        }
    }

    pub fn get(&self, mmsi: Mmsi) -> Option<&VesselRecord> {
        self.vessels.get(&mmsi)
    }

    pub fn into_vessels(self) -> Vec<VesselRecord> {
        self.vessels.into_values().collect()
    }

    pub fn len(&self) -> usize {
        self.vessels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vessels.is_empty()
    }
}
