//! `countryguide-client`
//!
//! **Responsibility:** own the lifecycle of one recommendation query.
//!
//! This crate provides:
//! - `RecommendationSession`: query text, pending/success/failure state, one
//!   outstanding call at a time
//! - `RecommendationService`: the seam to the external recommendation engine,
//!   with a `reqwest` implementation of `POST /api/v1/recommend`
//! - `ClientConfig`: endpoint and transport settings from the environment
//!
//! The recommendation engine itself is external; this client only shapes its
//! responses for display.

pub mod config;
pub mod error;
pub mod service;
pub mod session;

pub use config::{ClientConfig, ConfigError};
pub use error::ServiceError;
pub use service::{HttpRecommendationService, RecommendationService};
pub use session::{
    RecommendationSession, SessionPhase, SessionState, SessionStatus, SubmitOutcome,
    SubmitRejection,
};
