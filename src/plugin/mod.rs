//! The host-facing plugin: static details, option resolution and the decision.

pub mod decision;
pub mod options;
pub mod response;
pub mod schema;

pub use decision::{decide, decide_resolved, DecisionResult, DecisionSummary};
pub use options::{
    resolve_options, AudioCodec, Container, OptionSet, RawOptions, ResolvedOptions, Tune,
};
pub use response::HostResponse;
pub use schema::{details, OptionSpec, PluginDetails, OPTION_SCHEMA};
