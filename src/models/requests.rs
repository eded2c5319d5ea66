use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{ListingId, MatchTier, RoomTypeFilter, SearchFilters, SearchTab};

/// Request to search listings
///
/// Enum-ish string fields (room type, tab, tier) are parsed leniently:
/// unknown values degrade to their unconstrained defaults instead of
/// rejecting the request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SearchListingsRequest {
    #[validate(length(max = 200))]
    #[serde(default)]
    pub location: String,
    #[serde(alias = "max_budget", rename = "maxBudget", default)]
    pub max_budget: Option<u32>,
    #[serde(alias = "room_type", rename = "roomType", default)]
    pub room_type: Option<String>,
    #[serde(alias = "start_date", rename = "startDate", default)]
    pub start_date: Option<String>,
    #[serde(alias = "end_date", rename = "endDate", default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub tab: Option<String>,
    #[serde(alias = "match_tier", alias = "tier", rename = "matchTier", default)]
    pub match_tier: Option<String>,
    #[serde(alias = "favorite_ids", rename = "favoriteIds", default)]
    pub favorite_ids: Vec<ListingId>,
}

impl SearchListingsRequest {
    pub fn filters(&self) -> SearchFilters {
        SearchFilters {
            location: self.location.clone(),
            max_budget: self.max_budget,
            room_type: RoomTypeFilter::parse(self.room_type.as_deref()),
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
        }
    }

    pub fn tab(&self) -> SearchTab {
        SearchTab::parse(self.tab.as_deref())
    }

    pub fn tier(&self) -> MatchTier {
        MatchTier::parse(self.match_tier.as_deref())
    }

    pub fn favorites(&self) -> HashSet<ListingId> {
        self.favorite_ids.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RoomType;

    #[test]
    fn test_minimal_request_deserializes() {
        let req: SearchListingsRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.location, "");
        assert_eq!(req.filters(), SearchFilters::default());
        assert_eq!(req.tab(), SearchTab::All);
        assert_eq!(req.tier(), MatchTier::All);
    }

    #[test]
    fn test_full_request_parses_enums() {
        let req: SearchListingsRequest = serde_json::from_str(
            r#"{
                "location": "Denver",
                "maxBudget": 2000,
                "roomType": "private-room",
                "startDate": "2026-02-01",
                "endDate": "2026-04-30",
                "tab": "favorites",
                "matchTier": "great",
                "favoriteIds": [1, 5]
            }"#,
        )
        .unwrap();

        let filters = req.filters();
        assert_eq!(filters.max_budget, Some(2000));
        assert_eq!(filters.room_type, RoomTypeFilter::Only(RoomType::PrivateRoom));
        assert_eq!(req.tab(), SearchTab::Favorites);
        assert_eq!(req.tier(), MatchTier::Great);
        assert!(req.favorites().contains(&5));
    }

    #[test]
    fn test_unknown_enum_strings_degrade() {
        let req: SearchListingsRequest = serde_json::from_str(
            r#"{"roomType": "yurt", "tab": "archived", "matchTier": "mediocre"}"#,
        )
        .unwrap();

        assert_eq!(req.filters().room_type, RoomTypeFilter::Any);
        assert_eq!(req.tab(), SearchTab::All);
        assert_eq!(req.tier(), MatchTier::All);
    }
}
