use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Maritime Mobile Service Identity, the unique identifier of a vessel's AIS transponder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub struct Mmsi(u32);

/// A normalized update for a single vessel, produced from one feed message.
#[derive(Debug, Clone, PartialEq)]
pub struct VesselUpdate {
    pub mmsi: Mmsi,
    /// Ship name carried by the generic message metadata, independent of the payload kind.
    pub metadata_name: Option<String>,
    pub kind: UpdateKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UpdateKind {
    Position(PositionUpdate),
    Static(StaticDataUpdate),
}

/// Kinematic data emitted frequently by vessels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionUpdate {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub speed: Option<f64>,
    pub heading: Option<f64>,
    pub course: Option<f64>,
}

/// Slow-changing vessel and voyage data. Only the fields present in the source message are set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaticDataUpdate {
    pub name: Option<String>,
    pub ship_type: Option<i32>,
    pub destination: Option<String>,
    pub call_sign: Option<String>,
    pub imo_number: Option<u32>,
    pub draught: Option<f64>,
    pub dimension: Option<Dimension>,
    pub eta: Option<Eta>,
}

/// Distances from the position reference point to bow (a), stern (b), port (c) and
/// starboard (d), in meters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dimension {
    pub a: i32,
    pub b: i32,
    pub c: i32,
    pub d: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Eta {
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
}

impl Mmsi {
    pub fn into_inner(self) -> u32 {
        self.0
    }
}

impl Dimension {
    pub fn length(&self) -> i32 {
        self.a.saturating_add(self.b)
    }

    pub fn width(&self) -> i32 {
        self.c.saturating_add(self.d)
    }
}

impl VesselUpdate {
    pub fn position(mmsi: Mmsi, position: PositionUpdate) -> Self {
        Self {
            mmsi,
            metadata_name: None,
            kind: UpdateKind::Position(position),
        }
    }

    pub fn static_data(mmsi: Mmsi, data: StaticDataUpdate) -> Self {
        Self {
            mmsi,
            metadata_name: None,
            kind: UpdateKind::Static(data),
        }
    }

    pub fn with_metadata_name(mut self, name: impl Into<String>) -> Self {
        self.metadata_name = Some(name.into());
        self
    }
}

impl Display for Mmsi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl Display for Eta {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:02}/{:02} {:02}:{:02}",
            self.month, self.day, self.hour, self.minute
        )
    }
}

#[cfg(feature = "test")]
mod test {
    use rand::random_range;

    use super::*;

    impl Mmsi {
        pub fn test_new(mmsi: u32) -> Self {
            Self(mmsi)
        }

        /// Random identifier with a norwegian MID.
        pub fn test_random() -> Self {
            Self(257_000_000 + random_range(0..1_000_000))
        }
    }

    impl PositionUpdate {
        pub fn test_default() -> PositionUpdate {
            PositionUpdate {
                latitude: Some(60.39),
                longitude: Some(5.32),
                speed: Some(8.4),
                heading: Some(320.),
                course: Some(123.3),
            }
        }
    }

    impl StaticDataUpdate {
        pub fn test_default() -> StaticDataUpdate {
            StaticDataUpdate {
                name: Some("SJARKEN".to_string()),
                ship_type: Some(30),
                destination: Some("BERGEN".to_string()),
                call_sign: Some("LK45".to_string()),
                imo_number: Some(9_123_456),
                draught: Some(4.2),
                dimension: Some(Dimension {
                    a: 10,
                    b: 13,
                    c: 4,
                    d: 4,
                }),
                eta: Some(Eta {
                    month: 5,
                    day: 17,
                    hour: 8,
                    minute: 30,
                }),
            }
        }
    }
}
