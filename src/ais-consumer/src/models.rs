use ais_core::{
    Dimension, Eta, Mmsi, PositionUpdate, StaticDataUpdate, UpdateKind, VesselUpdate,
};
use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnError, serde_as};
use strum::{AsRefStr, EnumString};

use crate::error::{
    AisMessageError,
    ais_message_error::{MissingMetaDataSnafu, MissingMmsiSnafu},
};

/// AIS uses 511 for "heading not available".
const HEADING_NOT_AVAILABLE: f64 = 511.;

/// The message types we consume from the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr)]
pub enum AisMessageType {
    /// Class A position report.
    PositionReport,
    /// Class B position report.
    StandardClassBPositionReport,
    /// Class A static and voyage related data.
    ShipStaticData,
    /// Class B static data, split in two separately transmitted parts.
    StaticDataReport,
}

/// Convenience struct to deserialize the message type prior to attempting to deserialize the full
/// message.
#[derive(Deserialize)]
pub struct MessageType {
    #[serde(rename = "MessageType")]
    pub message_type: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AisStreamMessage {
    #[serde(rename = "MessageType")]
    pub message_type: String,
    #[serde(rename = "MetaData")]
    pub meta_data: Option<MetaData>,
    #[serde(rename = "Message")]
    pub message: AisPayload,
}

#[serde_as]
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MetaData {
    #[serde(rename = "MMSI", default)]
    #[serde_as(as = "DefaultOnError")]
    pub mmsi: Option<Mmsi>,
    #[serde(rename = "ShipName", default)]
    #[serde_as(as = "DefaultOnError")]
    pub ship_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub enum AisPayload {
    PositionReport(PositionReport),
    StandardClassBPositionReport(PositionReport),
    ShipStaticData(ShipStaticData),
    StaticDataReport(StaticDataReport),
}

/// Position data emitted every few seconds by moving vessels.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PositionReport {
    #[serde(rename = "Latitude", default)]
    #[serde_as(as = "DefaultOnError")]
    pub latitude: Option<f64>,
    #[serde(rename = "Longitude", default)]
    #[serde_as(as = "DefaultOnError")]
    pub longitude: Option<f64>,
    #[serde(rename = "Sog", default)]
    #[serde_as(as = "DefaultOnError")]
    pub speed_over_ground: Option<f64>,
    #[serde(rename = "TrueHeading", default)]
    #[serde_as(as = "DefaultOnError")]
    pub true_heading: Option<f64>,
    #[serde(rename = "Cog", default)]
    #[serde_as(as = "DefaultOnError")]
    pub course_over_ground: Option<f64>,
}

/// Vessel and voyage related data emitted every 6th minute by class A vessels.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ShipStaticData {
    #[serde(rename = "Name", default)]
    #[serde_as(as = "DefaultOnError")]
    pub name: Option<String>,
    #[serde(rename = "Type", default)]
    #[serde_as(as = "DefaultOnError")]
    pub ship_type: Option<i32>,
    #[serde(rename = "Destination", default)]
    #[serde_as(as = "DefaultOnError")]
    pub destination: Option<String>,
    #[serde(rename = "CallSign", default)]
    #[serde_as(as = "DefaultOnError")]
    pub call_sign: Option<String>,
    #[serde(rename = "ImoNumber", default)]
    #[serde_as(as = "DefaultOnError")]
    pub imo_number: Option<u32>,
    #[serde(rename = "MaximumStaticDraught", default)]
    #[serde_as(as = "DefaultOnError")]
    pub maximum_static_draught: Option<f64>,
    #[serde(rename = "Dimension", default)]
    #[serde_as(as = "DefaultOnError")]
    pub dimension: Option<AisDimension>,
    #[serde(rename = "Eta", default)]
    #[serde_as(as = "DefaultOnError")]
    pub eta: Option<AisEta>,
}

#[serde_as]
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StaticDataReport {
    #[serde(rename = "ReportA", default)]
    #[serde_as(as = "DefaultOnError")]
    pub report_a: Option<StaticReportA>,
    #[serde(rename = "ReportB", default)]
    #[serde_as(as = "DefaultOnError")]
    pub report_b: Option<StaticReportB>,
}

#[serde_as]
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StaticReportA {
    #[serde(rename = "Valid", default)]
    #[serde_as(as = "DefaultOnError")]
    pub valid: Option<bool>,
    #[serde(rename = "Name", default)]
    #[serde_as(as = "DefaultOnError")]
    pub name: Option<String>,
}

#[serde_as]
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StaticReportB {
    #[serde(rename = "Valid", default)]
    #[serde_as(as = "DefaultOnError")]
    pub valid: Option<bool>,
    #[serde(rename = "ShipType", default)]
    #[serde_as(as = "DefaultOnError")]
    pub ship_type: Option<i32>,
    #[serde(rename = "CallSign", default)]
    #[serde_as(as = "DefaultOnError")]
    pub call_sign: Option<String>,
    #[serde(rename = "Dimension", default)]
    #[serde_as(as = "DefaultOnError")]
    pub dimension: Option<AisDimension>,
}

#[serde_as]
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
pub struct AisDimension {
    #[serde(rename = "A", default)]
    #[serde_as(as = "DefaultOnError")]
    pub a: Option<i32>,
    #[serde(rename = "B", default)]
    #[serde_as(as = "DefaultOnError")]
    pub b: Option<i32>,
    #[serde(rename = "C", default)]
    #[serde_as(as = "DefaultOnError")]
    pub c: Option<i32>,
    #[serde(rename = "D", default)]
    #[serde_as(as = "DefaultOnError")]
    pub d: Option<i32>,
}

#[serde_as]
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
pub struct AisEta {
    #[serde(rename = "Month", default)]
    #[serde_as(as = "DefaultOnError")]
    pub month: Option<u32>,
    #[serde(rename = "Day", default)]
    #[serde_as(as = "DefaultOnError")]
    pub day: Option<u32>,
    #[serde(rename = "Hour", default)]
    #[serde_as(as = "DefaultOnError")]
    pub hour: Option<u32>,
    #[serde(rename = "Minute", default)]
    #[serde_as(as = "DefaultOnError")]
    pub minute: Option<u32>,
}

impl TryFrom<AisStreamMessage> for VesselUpdate {
    type Error = AisMessageError;

    fn try_from(a: AisStreamMessage) -> Result<Self, Self::Error> {
        let AisStreamMessage {
            message_type: _,
            meta_data,
            message,
        } = a;

        let MetaData {
            mmsi,
            ship_name,
        } = meta_data.ok_or_else(|| MissingMetaDataSnafu.build())?;
        let mmsi = mmsi.ok_or_else(|| MissingMmsiSnafu.build())?;

        let kind = match message {
            AisPayload::PositionReport(p) | AisPayload::StandardClassBPositionReport(p) => {
                UpdateKind::Position(p.into())
            }
            AisPayload::ShipStaticData(s) => UpdateKind::Static(s.into()),
            AisPayload::StaticDataReport(s) => UpdateKind::Static(s.into()),
        };

        Ok(VesselUpdate {
            mmsi,
            metadata_name: ship_name,
            kind,
        })
    }
}

impl From<PositionReport> for PositionUpdate {
    fn from(p: PositionReport) -> Self {
        let PositionReport {
            latitude,
            longitude,
            speed_over_ground,
            true_heading,
            course_over_ground,
        } = p;

        // 91/181 are the "not available" values, anything outside the valid range is treated
        // the same way.
        let latitude = latitude.filter(|v| (-90.0..=90.0).contains(v));
        let longitude = longitude.filter(|v| (-180.0..=180.0).contains(v));

        PositionUpdate {
            latitude,
            longitude,
            speed: speed_over_ground,
            heading: true_heading.filter(|v| *v != HEADING_NOT_AVAILABLE),
            course: course_over_ground,
        }
    }
}

impl From<ShipStaticData> for StaticDataUpdate {
    fn from(s: ShipStaticData) -> Self {
        let ShipStaticData {
            name,
            ship_type,
            destination,
            call_sign,
            imo_number,
            maximum_static_draught,
            dimension,
            eta,
        } = s;

        StaticDataUpdate {
            name,
            ship_type,
            destination,
            call_sign,
            imo_number,
            draught: maximum_static_draught,
            dimension: dimension.map(Dimension::from),
            eta: eta.map(Eta::from),
        }
    }
}

impl From<StaticDataReport> for StaticDataUpdate {
    fn from(s: StaticDataReport) -> Self {
        let report_a = s.report_a.filter(|r| r.valid != Some(false));
        let report_b = s.report_b.filter(|r| r.valid != Some(false));

        let mut update = StaticDataUpdate {
            name: report_a.and_then(|r| r.name),
            ..Default::default()
        };

        if let Some(StaticReportB {
            valid: _,
            ship_type,
            call_sign,
            dimension,
        }) = report_b
        {
            update.ship_type = ship_type;
            update.call_sign = call_sign;
            update.dimension = dimension.map(Dimension::from);
        }

        update
    }
}

impl From<AisDimension> for Dimension {
    fn from(d: AisDimension) -> Self {
        Dimension {
            a: d.a.unwrap_or_default(),
            b: d.b.unwrap_or_default(),
            c: d.c.unwrap_or_default(),
            d: d.d.unwrap_or_default(),
        }
    }
}

impl From<AisEta> for Eta {
    fn from(e: AisEta) -> Self {
        Eta {
            month: e.month.unwrap_or_default(),
            day: e.day.unwrap_or_default(),
            hour: e.hour.unwrap_or_default(),
            minute: e.minute.unwrap_or_default(),
        }
    }
}

impl AisStreamMessage {
    pub fn new(mmsi: Mmsi, ship_name: Option<&str>, message: AisPayload) -> AisStreamMessage {
        let message_type = match &message {
            AisPayload::PositionReport(_) => AisMessageType::PositionReport,
            AisPayload::StandardClassBPositionReport(_) => {
                AisMessageType::StandardClassBPositionReport
            }
            AisPayload::ShipStaticData(_) => AisMessageType::ShipStaticData,
            AisPayload::StaticDataReport(_) => AisMessageType::StaticDataReport,
        };

        AisStreamMessage {
            message_type: message_type.as_ref().to_string(),
            meta_data: Some(MetaData {
                mmsi: Some(mmsi),
                ship_name: ship_name.map(|v| v.to_string()),
            }),
            message,
        }
    }
}

#[cfg(feature = "test")]
mod test {
    use super::*;

    impl PositionReport {
        pub fn test_default() -> PositionReport {
            PositionReport {
                latitude: Some(60.39),
                longitude: Some(5.32),
                speed_over_ground: Some(8.4),
                true_heading: Some(320.),
                course_over_ground: Some(123.3),
            }
        }
    }

    impl ShipStaticData {
        pub fn test_default() -> ShipStaticData {
            ShipStaticData {
                name: Some("SJARKEN".to_string()),
                ship_type: Some(30),
                destination: Some("BERGEN".to_string()),
                call_sign: Some("LK45".to_string()),
                imo_number: Some(9_123_456),
                maximum_static_draught: Some(4.2),
                dimension: Some(AisDimension {
                    a: Some(10),
                    b: Some(13),
                    c: Some(4),
                    d: Some(4),
                }),
                eta: Some(AisEta {
                    month: Some(5),
                    day: Some(17),
                    hour: Some(8),
                    minute: Some(30),
                }),
            }
        }
    }
}
