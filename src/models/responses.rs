use serde::{Deserialize, Serialize};

use crate::models::domain::{Listing, ListingGroup, RankedView};

/// Response for the listing search endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchListingsResponse {
    pub groups: Vec<ListingGroup>,
    #[serde(rename = "topMatches")]
    pub top_matches: Vec<Listing>,
    #[serde(rename = "totalResults")]
    pub total_results: usize,
}

impl From<RankedView> for SearchListingsResponse {
    fn from(view: RankedView) -> Self {
        Self {
            groups: view.groups,
            top_matches: view.top_matches,
            total_results: view.total_results,
        }
    }
}

/// Response for the raw listings endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingsResponse {
    pub listings: Vec<Listing>,
    pub total: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
