use crate::api::Mapper;
use crate::filter::{FilterTally, RecordFilter};
use crate::record::{FlightRecord, RawRecord};

/// Map side of the analysis: drops dirty records, emits clean ones.
#[derive(Default, Clone, Copy, Debug)]
pub struct FlightMapper {
    filter: RecordFilter,
}

impl FlightMapper {
    pub fn new() -> Self { Self::default() }
}

impl Mapper for FlightMapper {
    type Input = RawRecord;
    type Output = FlightRecord;

    fn do_map<I, F>(&self, input: I, emit: &mut F) -> u64
    where
        I: IntoIterator<Item = Self::Input>,
        F: FnMut(Self::Output),
    {
        let mut tally = FilterTally::default();
        for record in input {
            if let Some(clean) = self.filter.admit(record, &mut tally) {
                emit(clean);
            }
        }
        tally.dirty
    }
}
