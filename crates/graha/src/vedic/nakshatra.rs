//! Nakshatra lookup.
//!
//! Nakshatras are 27 lunar mansions, each spanning 13°20' (360/27 degrees).
//! Each nakshatra is divided into 4 padas (quarters).

use crate::chart::Planet;
use crate::geometry::normalize_degrees;
use serde::Serialize;

pub const NAKSHATRA_SEGMENT_SIZE: f64 = 360.0 / 27.0;
pub const PADA_SIZE: f64 = NAKSHATRA_SEGMENT_SIZE / 4.0;

// (slug, vimshottari lord)
pub const NAKSHATRA_ORDER: [(&str, Planet); 27] = [
    ("ashwini", Planet::Ketu),
    ("bharani", Planet::Venus),
    ("krittika", Planet::Sun),
    ("rohini", Planet::Moon),
    ("mrigashira", Planet::Mars),
    ("ardra", Planet::Rahu),
    ("punarvasu", Planet::Jupiter),
    ("pushya", Planet::Saturn),
    ("ashlesha", Planet::Mercury),
    ("magha", Planet::Ketu),
    ("purva_phalguni", Planet::Venus),
    ("uttara_phalguni", Planet::Sun),
    ("hasta", Planet::Moon),
    ("chitra", Planet::Mars),
    ("swati", Planet::Rahu),
    ("vishakha", Planet::Jupiter),
    ("anuradha", Planet::Saturn),
    ("jyeshtha", Planet::Mercury),
    ("mula", Planet::Ketu),
    ("purva_ashadha", Planet::Venus),
    ("uttara_ashadha", Planet::Sun),
    ("shravana", Planet::Moon),
    ("dhanishta", Planet::Mars),
    ("shatabhisha", Planet::Rahu),
    ("purva_bhadrapada", Planet::Jupiter),
    ("uttara_bhadrapada", Planet::Saturn),
    ("revati", Planet::Mercury),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NakshatraRecord {
    pub index: usize,
    pub id: &'static str,
    pub lord: Planet,
    pub start: f64,
    pub end: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NakshatraPlacement {
    #[serde(flatten)]
    pub record: NakshatraRecord,
    pub longitude: f64,
    /// Degrees elapsed inside the nakshatra
    pub offset: f64,
    /// Fraction of the nakshatra traversed, in [0, 1)
    pub progress: f64,
    pub pada: u8,
}

fn build_nakshatra_table() -> Vec<NakshatraRecord> {
    NAKSHATRA_ORDER
        .iter()
        .enumerate()
        .map(|(index, (id, lord))| {
            let start = index as f64 * NAKSHATRA_SEGMENT_SIZE;
            NakshatraRecord {
                index,
                id,
                lord: *lord,
                start,
                end: start + NAKSHATRA_SEGMENT_SIZE,
            }
        })
        .collect()
}

lazy_static::lazy_static! {
    static ref NAKSHATRA_TABLE: Vec<NakshatraRecord> = build_nakshatra_table();
}

/// Nakshatra containing a longitude, with progress and pada.
pub fn nakshatra_of(longitude: f64) -> NakshatraPlacement {
    let lon = normalize_degrees(longitude);
    let index = ((lon / NAKSHATRA_SEGMENT_SIZE) as usize).min(NAKSHATRA_TABLE.len() - 1);
    let record = NAKSHATRA_TABLE[index].clone();

    let offset = (lon - record.start).max(0.0);
    let pada = ((offset / PADA_SIZE) as u8 + 1).min(4);

    NakshatraPlacement {
        longitude: lon,
        offset,
        progress: (offset / NAKSHATRA_SEGMENT_SIZE).min(1.0),
        pada,
        record,
    }
}
