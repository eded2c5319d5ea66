use serde::{Deserialize, Serialize};

/// Opaque listing identifier, stable across re-filtering
pub type ListingId = u64;

/// Room type offered by a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoomType {
    PrivateRoom,
    EntirePlace,
    Shared,
}

impl RoomType {
    /// Human-readable label for match reasons and presentation
    pub fn label(&self) -> &'static str {
        match self {
            RoomType::PrivateRoom => "Private room",
            RoomType::EntirePlace => "Entire place",
            RoomType::Shared => "Shared room",
        }
    }
}

/// A rentable housing unit near a hospital
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    pub id: ListingId,
    pub title: String,
    pub city: String,
    pub state: String,
    pub hospital: String,
    #[serde(rename = "hospitalCity", default)]
    pub hospital_city: Option<String>,
    #[serde(rename = "hospitalState", default)]
    pub hospital_state: Option<String>,
    #[serde(rename = "minutesToHospital", default)]
    pub minutes_to_hospital: u32,
    #[serde(rename = "pricePerMonth")]
    pub price_per_month: u32,
    #[serde(rename = "roomType")]
    pub room_type: RoomType,
    // Availability dates stay raw strings so a malformed value degrades to
    // "unconstrained" instead of failing deserialization of the whole record.
    #[serde(rename = "availableFrom", default)]
    pub available_from: Option<String>,
    #[serde(rename = "availableTo", default)]
    pub available_to: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub perks: Vec<String>,
    #[serde(default)]
    pub rating: Option<f32>,
    #[serde(rename = "reviewCount", default)]
    pub review_count: Option<u32>,
    #[serde(default)]
    pub section: Option<String>,
    // Derived per search pass, never persisted
    #[serde(rename = "matchScore", default, skip_serializing_if = "Option::is_none")]
    pub match_score: Option<MatchScore>,
}

impl Listing {
    /// Composed "City, State" label, matched by the location filter
    pub fn location_label(&self) -> String {
        format!("{}, {}", self.city, self.state)
    }

    /// Overall match score, if one has been attached this pass
    pub fn overall_score(&self) -> Option<f64> {
        self.match_score.as_ref().map(|m| m.overall)
    }
}

/// Compatibility score attached to a listing for one search pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchScore {
    pub overall: f64,
    /// Most important reason first
    pub reasons: Vec<String>,
}

/// Room-type constraint with an explicit unconstrained sentinel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoomTypeFilter {
    #[default]
    Any,
    Only(RoomType),
}

impl RoomTypeFilter {
    /// Parse the wire value; blank or unrecognized values degrade to `Any`
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_lowercase()).as_deref() {
            Some("private-room") => RoomTypeFilter::Only(RoomType::PrivateRoom),
            Some("entire-place") => RoomTypeFilter::Only(RoomType::EntirePlace),
            Some("shared") => RoomTypeFilter::Only(RoomType::Shared),
            _ => RoomTypeFilter::Any,
        }
    }
}

/// Raw filter state as the client sends it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchFilters {
    /// Free-text location query; empty or whitespace-only is a no-op
    pub location: String,
    /// Monthly budget ceiling; `Some(0)` is a real constraint
    pub max_budget: Option<u32>,
    pub room_type: RoomTypeFilter,
    /// ISO dates; the date filter only applies when both are present
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Preference snapshot derived 1:1 from the filter state, with the
/// `Any` sentinel and blank strings mapped to absent fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GuestPreferences {
    pub location: Option<String>,
    pub max_budget: Option<u32>,
    pub room_type: Option<RoomType>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl GuestPreferences {
    pub fn from_filters(filters: &SearchFilters) -> Self {
        let location = match filters.location.trim() {
            "" => None,
            q => Some(q.to_string()),
        };
        let room_type = match filters.room_type {
            RoomTypeFilter::Any => None,
            RoomTypeFilter::Only(rt) => Some(rt),
        };
        Self {
            location,
            max_budget: filters.max_budget,
            room_type,
            start_date: filters.start_date.clone(),
            end_date: filters.end_date.clone(),
        }
    }

    /// Whether these preferences drive ranking; the scorer is never
    /// invoked when neither a location nor a budget is set
    pub fn is_active(&self) -> bool {
        self.location.is_some() || self.max_budget.is_some()
    }
}

/// Match-quality threshold selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchTier {
    #[default]
    All,
    Great,
    Perfect,
}

impl MatchTier {
    /// Parse the wire value; blank or unrecognized values degrade to `All`
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_lowercase()).as_deref() {
            Some("great") => MatchTier::Great,
            Some("perfect") => MatchTier::Perfect,
            _ => MatchTier::All,
        }
    }
}

/// Result scope selected in the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchTab {
    #[default]
    All,
    Favorites,
}

impl SearchTab {
    /// Parse the wire value; blank or unrecognized values degrade to `All`
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_lowercase()).as_deref() {
            Some("favorites") => SearchTab::Favorites,
            _ => SearchTab::All,
        }
    }
}

/// One display bucket of the grouped result list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingGroup {
    pub title: String,
    pub items: Vec<Listing>,
}

/// Output of one full search pass
#[derive(Debug, Clone)]
pub struct RankedView {
    pub groups: Vec<ListingGroup>,
    /// Non-exclusive subset of the displayed list with perfect-tier scores
    pub top_matches: Vec<Listing>,
    pub total_results: usize,
}

/// Scoring weights
#[derive(Debug, Clone, Copy)]
pub struct ScoringWeights {
    pub location: f64,
    pub budget: f64,
    pub room_type: f64,
    pub dates: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            location: 0.40,
            budget: 0.30,
            room_type: 0.20,
            dates: 0.10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filters_with_location(location: &str) -> SearchFilters {
        SearchFilters {
            location: location.to_string(),
            ..SearchFilters::default()
        }
    }

    #[test]
    fn test_preferences_from_blank_filters_are_inactive() {
        let prefs = GuestPreferences::from_filters(&filters_with_location("   "));
        assert_eq!(prefs.location, None);
        assert!(!prefs.is_active());
    }

    #[test]
    fn test_budget_alone_activates_preferences() {
        let filters = SearchFilters {
            max_budget: Some(0),
            ..SearchFilters::default()
        };
        let prefs = GuestPreferences::from_filters(&filters);
        // A zero budget is a real constraint, not an absent one
        assert_eq!(prefs.max_budget, Some(0));
        assert!(prefs.is_active());
    }

    #[test]
    fn test_room_type_filter_parse_degrades_to_any() {
        assert_eq!(RoomTypeFilter::parse(None), RoomTypeFilter::Any);
        assert_eq!(RoomTypeFilter::parse(Some("any")), RoomTypeFilter::Any);
        assert_eq!(RoomTypeFilter::parse(Some("castle")), RoomTypeFilter::Any);
        assert_eq!(
            RoomTypeFilter::parse(Some("private-room")),
            RoomTypeFilter::Only(RoomType::PrivateRoom)
        );
    }

    #[test]
    fn test_tier_and_tab_parse() {
        assert_eq!(MatchTier::parse(Some("Perfect")), MatchTier::Perfect);
        assert_eq!(MatchTier::parse(Some("bogus")), MatchTier::All);
        assert_eq!(SearchTab::parse(Some("favorites")), SearchTab::Favorites);
        assert_eq!(SearchTab::parse(None), SearchTab::All);
    }

    #[test]
    fn test_listing_wire_names() {
        let json = r#"{
            "id": 7,
            "title": "Sunny room near Denver Health",
            "city": "Denver",
            "state": "CO",
            "hospital": "Denver Health",
            "pricePerMonth": 1800,
            "roomType": "private-room"
        }"#;

        let listing: Listing = serde_json::from_str(json).unwrap();
        assert_eq!(listing.id, 7);
        assert_eq!(listing.room_type, RoomType::PrivateRoom);
        assert_eq!(listing.location_label(), "Denver, CO");
        assert!(listing.match_score.is_none());
    }
}
