pub mod enrichment;
pub mod error;
pub mod notifier;
pub mod redirect;
pub mod report;

pub use self::{
    enrichment::EnrichmentClient,
    notifier::Notifier,
    redirect::RedirectPolicy,
    report::{Report, UserAgentInfo},
};
