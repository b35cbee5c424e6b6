use std::ops::RangeInclusive;

/// Maritime Identification Digit blocks per region, ordered and disjoint.
const MID_REGIONS: [(RangeInclusive<u16>, &str); 6] = [
    (201..=279, "Europe"),
    (301..=379, "North America"),
    (401..=477, "Asia"),
    (501..=578, "Oceania"),
    (601..=679, "Africa"),
    (701..=775, "South America"),
];

const UNKNOWN_FLAG: &str = "Unknown";
const INTERNATIONAL_FLAG: &str = "International";

const UNKNOWN_TYPE: &str = "Unknown/Other";

/// Derives the region of a vessel from the leading three digits (the MID) of its identifier.
pub fn flag_of(identifier: &str) -> &'static str {
    let identifier = identifier.trim();
    let Some(prefix) = identifier.get(..3) else {
        return UNKNOWN_FLAG;
    };
    if !identifier.bytes().all(|b| b.is_ascii_digit()) {
        return UNKNOWN_FLAG;
    }
    let Ok(mid) = prefix.parse::<u16>() else {
        return UNKNOWN_FLAG;
    };

    MID_REGIONS
        .iter()
        .find(|(range, _)| range.contains(&mid))
        .map(|(_, region)| *region)
        .unwrap_or(INTERNATIONAL_FLAG)
}

/// Human readable category of an AIS ship type code, a missing code is treated as 0.
pub fn vessel_type_text(code: Option<i32>) -> &'static str {
    match code.unwrap_or(0) {
        30 => "Fishing",
        31..=32 => "Tug/Towing",
        33 => "Dredger",
        34 => "Dive Vessel",
        35 => "Military Ops",
        36 => "Sailing",
        37 => "Pleasure Craft",
        52 => "Tug",
        60..=69 => "Passenger",
        70..=79 => "Cargo",
        80..=89 => "Tanker",
        90..=99 => "Other",
        _ => UNKNOWN_TYPE,
    }
}
