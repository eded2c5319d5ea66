//! NurseNest Match - listing search and matching for travel-nurse housing
//!
//! This library provides the listing search core used by the NurseNest
//! marketplace: a filter pipeline with a never-empty fallback, a
//! preference-driven match scorer, and stable ranking with section
//! grouping.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{match_color, match_label, Ranker};
pub use models::{
    GuestPreferences, Listing, ListingGroup, MatchScore, MatchTier, RankedView, RoomType,
    ScoringWeights, SearchFilters, SearchListingsRequest, SearchListingsResponse, SearchTab,
};
