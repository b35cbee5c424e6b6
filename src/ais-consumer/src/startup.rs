use std::path::{Path, PathBuf};

use ais_core::{EvictionPolicy, Snapshot, VesselStore};
use chrono::Utc;
use snafu::{OptionExt, ResultExt};
use tracing::{info, instrument, warn};

use crate::{
    aisstream::{AisSource, AisStreamClient},
    consumer::Consumer,
    error::{
        Result,
        error::{MissingApiKeySnafu, SnapshotSnafu},
    },
    settings::{Environment, Settings},
};

pub struct App {
    consumer: Consumer,
    eviction: EvictionPolicy,
    snapshot_path: PathBuf,
    ais_source: Option<AisStreamClient>,
}

impl App {
    pub fn build(settings: &Settings) -> App {
        let ais_source = match (&settings.environment, &settings.api_key) {
            (Environment::Test, _) | (_, None) => None,
            (_, Some(api_key)) => Some(AisStreamClient::new(
                api_key.clone(),
                settings.api_address.clone(),
                settings.bounding_boxes.clone(),
                settings.message_types.clone(),
            )),
        };

        App {
            consumer: Consumer::new(
                settings.listen_window,
                settings.receive_timeout,
                settings.reconnect_delay,
                settings.max_reconnect_delay,
            ),
            eviction: EvictionPolicy::new(settings.retention),
            snapshot_path: settings.snapshot_path.clone(),
            ais_source,
        }
    }

    /// Runs a single session against the configured ais stream.
    pub async fn run(&self) -> Result<Snapshot> {
        let source = self.ais_source.as_ref().context(MissingApiKeySnafu)?;
        self.run_session(source).await
    }

    /// Loads the previous snapshot, consumes `source` for the listen window and writes the new
    /// snapshot. Only a failed write fails the session.
    #[instrument(skip_all, fields(snapshot_path = %self.snapshot_path.display()))]
    pub async fn run_session<S>(&self, source: &S) -> Result<Snapshot>
    where
        S: AisSource + ?Sized,
    {
        let mut store = load_store(&self.snapshot_path);

        let stats = self.consumer.run(source, &mut store).await;
        info!(
            frames = stats.frames,
            updates = stats.updates,
            malformed = stats.malformed,
            unsupported = stats.unsupported,
            timeouts = stats.timeouts,
            connection_failures = stats.connection_failures,
            num_vessels = store.len(),
            "listen window expired"
        );

        let now = Utc::now();
        let eviction = self.eviction.apply(store.into_vessels(), now);
        info!(
            retained = eviction.retained.len(),
            missing_position = eviction.missing_position,
            stale = eviction.stale,
            "evicted vessels"
        );

        let snapshot = Snapshot::new(eviction.retained, now);
        snapshot
            .write(&self.snapshot_path)
            .context(SnapshotSnafu)?;

        info!(total_ships = snapshot.total_ships, "wrote snapshot");

        Ok(snapshot)
    }
}

/// A missing or unreadable snapshot results in a cold start with an empty store.
fn load_store(path: &Path) -> VesselStore {
    match Snapshot::read(path) {
        Ok(snapshot) => {
            let store = VesselStore::from_snapshot(snapshot);
            info!(num_vessels = store.len(), "loaded previous snapshot");
            store
        }
        Err(e) if e.is_not_found() => {
            info!("no previous snapshot, starting with an empty state");
            VesselStore::new()
        }
        Err(e) => {
            warn!("failed to load previous snapshot, starting with an empty state: {e:?}");
            VesselStore::new()
        }
    }
}
