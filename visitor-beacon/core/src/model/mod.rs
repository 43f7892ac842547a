// Values flowing through the visit pipeline. Everything here lives for the
// duration of a single request.

mod client_info;
mod geo;
mod lookup;
mod risk;

pub use self::{
    client_info::BrowserMetadata,
    geo::GeoInfo,
    lookup::{Enrichment, Lookup},
    risk::RiskInfo,
};
