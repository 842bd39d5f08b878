use crate::aggregate::NetFlowIndex;
use crate::record::CityKey;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CityFlow {
    pub city: CityKey,
    pub net_flow: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Extrema {
    /// Greatest net inflow.
    pub max_arrival: CityFlow,
    /// Smallest (most negative) net flow.
    pub max_departure: CityFlow,
}

/// Both extremes of `net_flow`; ties go to the smaller city key.
/// `None` when the index is empty.
pub fn find_extrema(net_flow: &NetFlowIndex) -> Option<Extrema> {
    let mut iter = net_flow.iter();
    let (first_city, &first_flow) = iter.next()?;
    let (mut hi, mut lo) = ((first_city, first_flow), (first_city, first_flow));
    // Keys arrive ascending, so strict comparison keeps the first (smallest) key on ties.
    for (city, &flow) in iter {
        if flow > hi.1 {
            hi = (city, flow);
        }
        if flow < lo.1 {
            lo = (city, flow);
        }
    }
    Some(Extrema {
        max_arrival: CityFlow { city: hi.0.clone(), net_flow: hi.1 },
        max_departure: CityFlow { city: lo.0.clone(), net_flow: lo.1 },
    })
}
