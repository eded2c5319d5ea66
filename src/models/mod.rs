// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    GuestPreferences, Listing, ListingGroup, ListingId, MatchScore, MatchTier, RankedView,
    RoomType, RoomTypeFilter, ScoringWeights, SearchFilters, SearchTab,
};
pub use requests::SearchListingsRequest;
pub use responses::{ErrorResponse, HealthResponse, ListingsResponse, SearchListingsResponse};
