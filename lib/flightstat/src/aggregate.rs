use crate::api::Reducer;
use crate::record::{CityKey, FlightRecord};
use std::collections::BTreeMap;

/// Destination city to every recorded flight duration (seconds).
pub type DurationIndex = BTreeMap<CityKey, Vec<u32>>;
/// City to passengers arrived minus passengers departed.
pub type NetFlowIndex = BTreeMap<CityKey, i64>;

/// Owns both running indices for the duration of one reduce.
#[derive(Default, Debug)]
pub struct Aggregator {
    durations: DurationIndex,
    net_flow: NetFlowIndex,
    records: u64,
}

impl Aggregator {
    pub fn new() -> Self { Self::default() }

    pub fn absorb(&mut self, record: &FlightRecord) {
        let passengers = i64::from(record.passengers_on_board);
        self.durations
            .entry(record.destination_city.clone())
            .or_default()
            .push(record.flight_duration_secs);
        *self.net_flow.entry(record.origin_city.clone()).or_insert(0) -= passengers;
        *self.net_flow.entry(record.destination_city.clone()).or_insert(0) += passengers;
        self.records += 1;
    }

    pub fn records(&self) -> u64 { self.records }

    pub fn durations(&self) -> &DurationIndex { &self.durations }

    pub fn net_flow(&self) -> &NetFlowIndex { &self.net_flow }

    /// Sum over every known city. Zero whenever the aggregator is at rest.
    pub fn net_flow_total(&self) -> i64 {
        self.net_flow.values().sum()
    }

    /// Freezes the indices. Duration multisets come out sorted ascending.
    pub fn finish(self) -> Aggregates {
        let mut durations = self.durations;
        for values in durations.values_mut() {
            values.sort_unstable();
        }
        Aggregates { durations, net_flow: self.net_flow, records: self.records }
    }
}

impl Reducer for Aggregator {
    type ValueIn = FlightRecord;

    fn do_reduce<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = Self::ValueIn>,
    {
        for record in values {
            self.absorb(&record);
        }
    }
}

/// Immutable result of the reduce step.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Aggregates {
    pub durations: DurationIndex,
    pub net_flow: NetFlowIndex,
    pub records: u64,
}

impl Aggregates {
    pub fn net_flow_total(&self) -> i64 {
        self.net_flow.values().sum()
    }
}
