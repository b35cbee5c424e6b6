use std::{
    cmp::Ordering,
    fs,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use snafu::ResultExt;
use tempfile::NamedTempFile;
use tracing::{debug, instrument};

use crate::{
    VesselRecord,
    error::{
        CreateDirectorySnafu, ParseSnapshotSnafu, PersistSnapshotSnafu, ReadSnapshotSnafu, Result,
        SerializeSnapshotSnafu, WriteSnapshotSnafu,
    },
    format_timestamp,
};

/// The persisted state of all retained vessels, output of one session and input of the next.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Snapshot {
    pub updated: String,
    pub total_ships: usize,
    pub ships: Vec<VesselRecord>,
}

impl Snapshot {
    /// Wraps the given vessels, sorted for presentation, into a snapshot generated at `updated`.
    pub fn new(mut ships: Vec<VesselRecord>, updated: DateTime<Utc>) -> Snapshot {
        sort_vessels(&mut ships);
        Snapshot {
            updated: format_timestamp(&updated),
            total_ships: ships.len(),
            ships,
        }
    }

    #[instrument]
    pub fn read(path: &Path) -> Result<Snapshot> {
        let file = fs::File::open(path).context(ReadSnapshotSnafu { path })?;
        let snapshot: Snapshot =
            serde_json::from_reader(BufReader::new(file)).context(ParseSnapshotSnafu { path })?;

        debug!(num_ships = snapshot.ships.len(), "read snapshot");

        Ok(snapshot)
    }

    /// Writes the snapshot to `path` through a temporary file in the same directory, readers of
    /// `path` never observe a partially written snapshot.
    #[instrument(skip(self), fields(app.num_ships = self.ships.len()))]
    pub fn write(&self, path: &Path) -> Result<()> {
        let directory = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(directory).context(CreateDirectorySnafu { path: directory })?;

        let file = NamedTempFile::new_in(directory).context(WriteSnapshotSnafu { path })?;

        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, self).context(SerializeSnapshotSnafu)?;
        writer.flush().context(WriteSnapshotSnafu { path })?;

        let file = writer
            .into_inner()
            .map_err(|e| e.into_error())
            .context(WriteSnapshotSnafu { path })?;
        file.as_file()
            .sync_all()
            .context(WriteSnapshotSnafu { path })?;
        file.persist(path).context(PersistSnapshotSnafu { path })?;

        Ok(())
    }
}

/// Orders vessels by name with unnamed vessels last, ties are broken by identifier.
pub fn sort_vessels(vessels: &mut [VesselRecord]) {
    vessels.sort_by(compare_vessels);
}

fn compare_vessels(a: &VesselRecord, b: &VesselRecord) -> Ordering {
    a.has_unknown_name()
        .cmp(&b.has_unknown_name())
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.mmsi.cmp(&b.mmsi))
}
