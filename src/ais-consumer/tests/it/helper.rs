use std::{
    collections::VecDeque,
    path::PathBuf,
    sync::Mutex,
    time::Duration,
};

use ais_consumer::{
    aisstream::{AisSource, FrameStream},
    error::{Error, Result, error::StreamClosedSnafu},
    models::{AisPayload, AisStreamMessage, PositionReport, ShipStaticData},
    settings::{Environment, LogLevel, Settings},
    startup::App,
};
use ais_core::{Mmsi, Snapshot};
use async_trait::async_trait;
use futures::StreamExt;
use tempfile::TempDir;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

pub const LISTEN_WINDOW: Duration = Duration::from_millis(400);

pub struct TestHelper {
    pub app: App,
    pub source: TestSource,
    pub snapshot_path: PathBuf,
    _dir: TempDir,
}

/// Hands out one queued connection per `connect`, fails once the queue is empty.
#[derive(Default)]
pub struct TestSource {
    connections: Mutex<VecDeque<mpsc::Receiver<Result<String>>>>,
}

/// The sending half of a single connection.
pub struct AisConnection {
    out: mpsc::Sender<Result<String>>,
}

impl TestHelper {
    pub fn new() -> TestHelper {
        let dir = tempfile::tempdir().unwrap();
        let snapshot_path = dir.path().join("public").join("ships.json");
        TestHelper::with_snapshot_path(dir, snapshot_path)
    }

    /// Builds the app from the test settings after applying `modify` to them.
    pub fn with_settings(modify: impl FnOnce(&mut Settings)) -> TestHelper {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = test_settings(dir.path().join("public").join("ships.json"));
        modify(&mut settings);
        TestHelper::build(dir, settings)
    }

    pub fn with_snapshot_path(dir: TempDir, snapshot_path: PathBuf) -> TestHelper {
        TestHelper::build(dir, test_settings(snapshot_path))
    }

    fn build(dir: TempDir, settings: Settings) -> TestHelper {
        let snapshot_path = settings.snapshot_path.clone();

        TestHelper {
            app: App::build(&settings),
            source: TestSource::default(),
            snapshot_path,
            _dir: dir,
        }
    }

    /// Queues a new connection on the source.
    pub fn connection(&self) -> AisConnection {
        let (out, receiver) = mpsc::channel(100);
        self.source.connections.lock().unwrap().push_back(receiver);
        AisConnection { out }
    }

    pub async fn run(&self) -> Result<Snapshot> {
        self.app.run_session(&self.source).await
    }

    pub fn write_previous_snapshot(&self, snapshot: &Snapshot) {
        snapshot.write(&self.snapshot_path).unwrap();
    }

    pub fn read_snapshot(&self) -> Snapshot {
        Snapshot::read(&self.snapshot_path).unwrap()
    }
}

pub fn test_settings(snapshot_path: PathBuf) -> Settings {
    Settings {
        log_level: LogLevel::Debug,
        environment: Environment::Test,
        api_key: None,
        api_address: "wss://localhost".to_string(),
        bounding_boxes: vec![[[-90., -180.], [90., 180.]]],
        message_types: vec![],
        snapshot_path,
        listen_window: LISTEN_WINDOW,
        receive_timeout: Duration::from_millis(20),
        retention: Duration::from_secs(24 * 60 * 60),
        reconnect_delay: Duration::from_millis(10),
        max_reconnect_delay: Duration::from_millis(40),
    }
}

#[async_trait]
impl AisSource for TestSource {
    async fn connect(&self) -> Result<FrameStream> {
        let receiver = self.connections.lock().unwrap().pop_front();
        match receiver {
            Some(receiver) => Ok(ReceiverStream::new(receiver).boxed()),
            None => StreamClosedSnafu.fail(),
        }
    }
}

impl AisConnection {
    pub async fn send_position(&self, mmsi: Mmsi, ship_name: Option<&str>, position: PositionReport) {
        self.send_message(&AisStreamMessage::new(
            mmsi,
            ship_name,
            AisPayload::PositionReport(position),
        ))
        .await
    }

    pub async fn send_static(&self, mmsi: Mmsi, static_data: ShipStaticData) {
        self.send_message(&AisStreamMessage::new(
            mmsi,
            None,
            AisPayload::ShipStaticData(static_data),
        ))
        .await
    }

    pub async fn send_message(&self, message: &AisStreamMessage) {
        self.send_string(serde_json::to_string(message).unwrap())
            .await
    }

    pub async fn send_string(&self, val: impl Into<String>) {
        self.out.send(Ok(val.into())).await.unwrap();
    }

    pub async fn send_error(&self, error: Error) {
        self.out.send(Err(error)).await.unwrap();
    }
}
