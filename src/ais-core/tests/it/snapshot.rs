use ais_core::{
    EvictionPolicy, Mmsi, PositionUpdate, Snapshot, StaticDataUpdate, VesselStore, VesselUpdate,
};
use chrono::{Duration, TimeZone, Utc};

fn populated_store() -> VesselStore {
    let t0 = Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap();
    let mut store = VesselStore::new();

    for (i, name) in ["HAVBRIS", "ALPHA STAR", "KYSTVAKT"].into_iter().enumerate() {
        let mmsi = Mmsi::test_new(257_000_100 + i as u32);
        store.upsert(
            VesselUpdate::static_data(
                mmsi,
                StaticDataUpdate {
                    name: Some(name.to_string()),
                    ..StaticDataUpdate::test_default()
                },
            ),
            t0,
        );
        store.upsert(
            VesselUpdate::position(
                mmsi,
                PositionUpdate {
                    latitude: Some(60.123456789 + i as f64),
                    longitude: Some(-5.000001),
                    speed: Some(12.3),
                    heading: Some(511.),
                    course: Some(359.9),
                },
            ),
            t0 + Duration::hours(2 * i as i64),
        );
    }

    store
}

#[test]
fn test_written_snapshot_loads_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ships.json");

    let store = populated_store();
    let before = Snapshot::new(store.into_vessels(), Utc::now());
    before.write(&path).unwrap();

    let read = Snapshot::read(&path).unwrap();
    assert_eq!(read, before);

    let store = VesselStore::from_snapshot(read);
    let after = Snapshot::new(store.into_vessels(), Utc::now());
    assert_eq!(after.ships, before.ships);
    assert_eq!(after.total_ships, 3);
}

#[test]
fn test_snapshot_is_sorted_by_name() {
    let snapshot = Snapshot::new(populated_store().into_vessels(), Utc::now());
    let names: Vec<_> = snapshot.ships.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, vec!["ALPHA STAR", "HAVBRIS", "KYSTVAKT"]);
}

#[test]
fn test_write_creates_missing_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("public").join("data").join("ships.json");

    Snapshot::new(vec![], Utc::now()).write(&path).unwrap();

    let read = Snapshot::read(&path).unwrap();
    assert_eq!(read.total_ships, 0);
    assert!(read.ships.is_empty());
}

#[test]
fn test_write_replaces_previous_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ships.json");

    Snapshot::new(populated_store().into_vessels(), Utc::now())
        .write(&path)
        .unwrap();
    Snapshot::new(vec![], Utc::now()).write(&path).unwrap();

    assert_eq!(Snapshot::read(&path).unwrap().total_ships, 0);
    // Only the snapshot itself remains, no temporary files.
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_write_to_directory_path_fails() {
    let dir = tempfile::tempdir().unwrap();

    let result = Snapshot::new(vec![], Utc::now()).write(dir.path());

    assert!(result.is_err());
}

#[test]
fn test_missing_snapshot_is_reported_as_not_found() {
    let dir = tempfile::tempdir().unwrap();

    let error = Snapshot::read(&dir.path().join("missing.json")).unwrap_err();

    assert!(error.is_not_found());
}

#[test]
fn test_corrupt_snapshot_fails_to_parse() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ships.json");
    std::fs::write(&path, "[{\"MetaData\": {}}]").unwrap();

    let error = Snapshot::read(&path).unwrap_err();

    assert!(!error.is_not_found());
}

#[test]
fn test_snapshot_uses_documented_field_names() {
    let snapshot = Snapshot::new(populated_store().into_vessels(), Utc::now());
    let value = serde_json::to_value(&snapshot).unwrap();

    assert_eq!(value["total_ships"], 3);
    let ship = &value["ships"][0];
    for key in [
        "mmsi",
        "name",
        "flag",
        "type",
        "type_code",
        "lat",
        "lon",
        "speed",
        "heading",
        "course",
        "destination",
        "callsign",
        "imo",
        "draught",
        "length",
        "width",
        "eta",
        "last_seen",
    ] {
        assert!(ship.get(key).is_some(), "missing key {key}");
    }
    assert_eq!(ship["mmsi"], 257_000_101);
    assert_eq!(ship["type"], "Fishing");
}

#[test]
fn test_half_present_position_is_cleared_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ships.json");

    let snapshot = Snapshot::new(populated_store().into_vessels(), Utc::now());
    let mut value = serde_json::to_value(&snapshot).unwrap();
    value["ships"][0]["lon"] = serde_json::Value::Null;
    std::fs::write(&path, serde_json::to_vec(&value).unwrap()).unwrap();

    let store = VesselStore::from_snapshot(Snapshot::read(&path).unwrap());

    let vessel = store.get(Mmsi::test_new(257_000_101)).unwrap();
    assert_eq!(vessel.position(), None);
    let vessel = serde_json::to_value(vessel).unwrap();
    assert!(vessel["lat"].is_null());
    assert!(vessel["lon"].is_null());

    let eviction = EvictionPolicy::default().apply(store.into_vessels(), Utc::now());
    assert_eq!(eviction.missing_position, 1);
}

#[test]
fn test_evicted_vessels_are_absent_after_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ships.json");
    let now = Utc.with_ymd_and_hms(2024, 6, 2, 11, 0, 0).unwrap();

    let mut store = populated_store();
    // Never positioned.
    store.upsert(
        VesselUpdate::static_data(Mmsi::test_new(257_999_999), StaticDataUpdate::test_default()),
        now,
    );

    let eviction = EvictionPolicy::default().apply(store.into_vessels(), now);
    assert_eq!(eviction.missing_position, 1);
    // The first vessel was last seen 25 hours earlier.
    assert_eq!(eviction.stale, 1);

    Snapshot::new(eviction.retained, now).write(&path).unwrap();
    let store = VesselStore::from_snapshot(Snapshot::read(&path).unwrap());

    assert_eq!(store.len(), 2);
    assert!(store.get(Mmsi::test_new(257_999_999)).is_none());
    assert!(store.get(Mmsi::test_new(257_000_100)).is_none());
}
