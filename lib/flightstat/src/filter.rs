use crate::record::{FlightRecord, RawRecord};
use serde::Serialize;
use std::ops::AddAssign;

/// Clean/dirty counts for some span of records (one file, or a whole run).
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct FilterTally {
    pub clean: u64,
    pub dirty: u64,
}

impl AddAssign for FilterTally {
    fn add_assign(&mut self, rhs: Self) {
        self.clean += rhs.clean;
        self.dirty += rhs.dirty;
    }
}

/// A record is clean iff none of its five fields is the null-marker.
pub fn is_clean(record: &RawRecord) -> bool {
    record.date.is_some()
        && record.origin_city.is_some()
        && record.destination_city.is_some()
        && record.flight_duration_secs.is_some()
        && record.passengers_on_board.is_some()
}

#[derive(Default, Clone, Copy, Debug)]
pub struct RecordFilter;

impl RecordFilter {
    /// Passes clean records through and counts the outcome in `tally`.
    pub fn admit(&self, record: RawRecord, tally: &mut FilterTally) -> Option<FlightRecord> {
        match record.into_clean() {
            Some(clean) => {
                tally.clean += 1;
                Some(clean)
            }
            None => {
                tally.dirty += 1;
                None
            }
        }
    }
}
