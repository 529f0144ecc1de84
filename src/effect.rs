//! Effects - side effects declared by the reducer

use crate::state::{RequestId, ResolvedLocation};

/// Side effects that can be triggered by actions
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Remember the query in durable storage
    PersistQuery { query: String },
    /// Pipeline step 1: resolve the query to a location
    Geocode { request: RequestId, query: String },
    /// Pipeline step 2: current conditions at the location
    FetchCurrent {
        request: RequestId,
        location: ResolvedLocation,
    },
    /// Pipeline step 3: daily forecast at the location
    FetchDaily {
        request: RequestId,
        location: ResolvedLocation,
    },
}
