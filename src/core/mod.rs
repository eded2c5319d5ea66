// Core algorithm exports
pub mod availability;
pub mod filters;
pub mod ranking;
pub mod scoring;

pub use availability::covers_range;
pub use filters::{apply_filters, matches_location, matches_room_type, within_budget};
pub use ranking::{Ranker, DEFAULT_SECTION};
pub use scoring::{
    calculate_match_score, match_color, match_label, GREAT_MATCH_MIN, PERFECT_MATCH_MIN,
};
