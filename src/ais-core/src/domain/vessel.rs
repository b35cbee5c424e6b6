use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::{PositionUpdate, StaticDataUpdate, flag_of, vessel_type_text};

use super::Mmsi;

pub const UNKNOWN_NAME: &str = "Unknown";
pub const NOT_AVAILABLE: &str = "N/A";

/// Last known state of a single vessel, as persisted in the snapshot.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct VesselRecord {
    pub mmsi: Mmsi,
    pub name: String,
    pub flag: String,
    #[serde(rename = "type")]
    pub ship_type: String,
    pub type_code: i32,
    lat: Option<f64>,
    lon: Option<f64>,
    pub speed: f64,
    pub heading: f64,
    pub course: f64,
    pub destination: String,
    pub callsign: String,
    pub imo: String,
    pub draught: f64,
    pub length: i32,
    pub width: i32,
    pub eta: String,
    pub last_seen: String,
}

impl VesselRecord {
    /// Creates a skeleton record, the flag is derived here and never recomputed.
    pub fn new(mmsi: Mmsi, seen_at: DateTime<Utc>) -> VesselRecord {
        VesselRecord {
            mmsi,
            name: UNKNOWN_NAME.to_string(),
            flag: flag_of(&mmsi.to_string()).to_string(),
            ship_type: vessel_type_text(None).to_string(),
            type_code: 0,
            lat: None,
            lon: None,
            speed: 0.,
            heading: 0.,
            course: 0.,
            destination: NOT_AVAILABLE.to_string(),
            callsign: NOT_AVAILABLE.to_string(),
            imo: NOT_AVAILABLE.to_string(),
            draught: 0.,
            length: 0,
            width: 0,
            eta: NOT_AVAILABLE.to_string(),
            last_seen: format_timestamp(&seen_at),
        }
    }

    /// Returns `(latitude, longitude)` if a position has been established.
    pub fn position(&self) -> Option<(f64, f64)> {
        self.lat.zip(self.lon)
    }

    pub fn has_unknown_name(&self) -> bool {
        self.name == UNKNOWN_NAME
    }

    /// Parses `last_seen`, `None` if the stored text is not a valid RFC 3339 timestamp.
    pub fn last_seen_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.last_seen)
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }

    pub(crate) fn set_position(&mut self, latitude: f64, longitude: f64) {
        self.lat = Some(latitude);
        self.lon = Some(longitude);
    }

    /// Clears a half-present position, which can only originate from a hand-edited snapshot.
    pub(crate) fn normalize_position(&mut self) {
        if self.position().is_none() {
            self.lat = None;
            self.lon = None;
        }
    }

    pub(crate) fn touch(&mut self, seen_at: &DateTime<Utc>) {
        self.last_seen = format_timestamp(seen_at);
    }

    pub(crate) fn merge_metadata_name(&mut self, name: &str) {
        // Metadata names are noisy, single characters are discarded.
        if let Some(name) = display_text(name).filter(|n| n.chars().count() > 1) {
            self.name = name.to_string();
        }
    }

    pub(crate) fn merge_position(&mut self, update: &PositionUpdate) {
        if let (Some(latitude), Some(longitude)) = (update.latitude, update.longitude) {
            self.set_position(latitude, longitude);
        }
        self.speed = update.speed.unwrap_or_default();
        self.heading = update.heading.unwrap_or_default();
        self.course = update.course.unwrap_or_default();
    }

    pub(crate) fn merge_static(&mut self, update: &StaticDataUpdate) {
        let StaticDataUpdate {
            name,
            ship_type,
            destination,
            call_sign,
            imo_number,
            draught,
            dimension,
            eta,
        } = update;

        replace_text(&mut self.name, name.as_deref());
        replace_text(&mut self.destination, destination.as_deref());
        replace_text(&mut self.callsign, call_sign.as_deref());

        if let Some(code) = *ship_type {
            self.type_code = code;
            self.ship_type = vessel_type_text(Some(code)).to_string();
        }
        if let Some(imo) = imo_number.filter(|v| *v != 0) {
            self.imo = imo.to_string();
        }
        if let Some(draught) = *draught {
            self.draught = draught;
        }
        if let Some(dimension) = dimension {
            self.length = dimension.length();
            self.width = dimension.width();
        }
        if let Some(eta) = eta {
            self.eta = eta.to_string();
        }
    }
}

pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Strips surrounding whitespace and the `@` padding AIS uses for unused characters.
fn display_text(value: &str) -> Option<&str> {
    let value = value.trim().trim_end_matches('@').trim_end();
    (!value.is_empty()).then_some(value)
}

fn replace_text(target: &mut String, incoming: Option<&str>) {
    if let Some(value) = incoming.and_then(display_text) {
        target.clear();
        target.push_str(value);
    }
}
