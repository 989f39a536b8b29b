//! `countryguide-transform`
//!
//! **Responsibility:** shape recommendation payloads for display.
//!
//! Everything here is a pure function of its input:
//! - No I/O, no hidden state, no counters.
//! - Identical input always yields identical output.
//! - Safe to call concurrently from any number of callers.
//!
//! Rendering (colors, layout, clamping bar widths) stays with the caller.

pub mod listing;
pub mod progress;
pub mod radar;
pub mod view;

pub use listing::{
    BestMatchBanner, RecommendationCard, best_match_banner, cluster_label, recommendation_cards,
    score_label,
};
pub use progress::{ProgressRow, progress_rows, try_progress_rows};
pub use radar::{FULL_SCALE, RadarPoint, radar_series, try_radar_series};
pub use view::RecommendationView;
