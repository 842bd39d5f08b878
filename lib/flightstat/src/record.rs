use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// City identifier. Ordered byte-wise; that order breaks every ranking tie.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct CityKey(String);

impl CityKey {
    pub fn new(name: impl Into<String>) -> Self { Self(name.into()) }
    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for CityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl From<&str> for CityKey {
    fn from(s: &str) -> Self { Self(s.to_string()) }
}

impl From<String> for CityKey {
    fn from(s: String) -> Self { Self(s) }
}

impl Borrow<str> for CityKey {
    fn borrow(&self) -> &str { &self.0 }
}

/// A record exactly as stored in the corpus. `None` is the null-marker; a key
/// missing from the JSON object deserializes to `None` as well.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct RawRecord {
    pub date: Option<String>,
    pub origin_city: Option<CityKey>,
    pub destination_city: Option<CityKey>,
    pub flight_duration_secs: Option<u32>,
    pub passengers_on_board: Option<u32>,
}

/// Field names in corpus order.
pub const FIELDS: [&str; 5] = ["date", "origin_city", "destination_city", "flight_duration_secs", "passengers_on_board"];

impl RawRecord {
    /// Replaces field `idx` (an index into [`FIELDS`]) with the null-marker.
    pub fn null_field(&mut self, idx: usize) {
        match idx % FIELDS.len() {
            0 => self.date = None,
            1 => self.origin_city = None,
            2 => self.destination_city = None,
            3 => self.flight_duration_secs = None,
            _ => self.passengers_on_board = None,
        }
    }

    pub fn null_count(&self) -> usize {
        [
            self.date.is_none(),
            self.origin_city.is_none(),
            self.destination_city.is_none(),
            self.flight_duration_secs.is_none(),
            self.passengers_on_board.is_none(),
        ]
        .iter()
        .filter(|&&n| n)
        .count()
    }

    /// The clean form of this record, or `None` if any field is missing.
    pub fn into_clean(self) -> Option<FlightRecord> {
        Some(FlightRecord {
            date: self.date?,
            origin_city: self.origin_city?,
            destination_city: self.destination_city?,
            flight_duration_secs: self.flight_duration_secs?,
            passengers_on_board: self.passengers_on_board?,
        })
    }
}

/// A clean record: every field present.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct FlightRecord {
    pub date: String,
    pub origin_city: CityKey,
    pub destination_city: CityKey,
    pub flight_duration_secs: u32,
    pub passengers_on_board: u32,
}

impl From<FlightRecord> for RawRecord {
    fn from(r: FlightRecord) -> Self {
        RawRecord {
            date: Some(r.date),
            origin_city: Some(r.origin_city),
            destination_city: Some(r.destination_city),
            flight_duration_secs: Some(r.flight_duration_secs),
            passengers_on_board: Some(r.passengers_on_board),
        }
    }
}
