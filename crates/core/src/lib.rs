//! `countryguide-core` — recommendation contract building blocks.
//!
//! This crate contains the **pure** request/response types exchanged with the
//! recommendation service (no HTTP, no session state).

pub mod contract;
pub mod criteria;
pub mod error;
pub mod query;

pub use contract::{
    BestMatch, Capital, RecommendationEntry, RecommendationRequest, RecommendationResponse,
};
pub use criteria::{CriteriaScore, Criterion, criterion_label};
pub use error::{PayloadError, PayloadResult};
pub use query::Query;
