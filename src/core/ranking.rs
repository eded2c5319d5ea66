use std::collections::HashSet;

use crate::core::{
    filters::apply_filters,
    scoring::{calculate_match_score, GREAT_MATCH_MIN, PERFECT_MATCH_MIN},
};
use crate::models::{
    GuestPreferences, Listing, ListingGroup, ListingId, MatchTier, RankedView, ScoringWeights,
    SearchFilters, SearchTab,
};

/// Bucket title for listings that carry no section label
pub const DEFAULT_SECTION: &str = "More places to stay";

/// Main search orchestrator - composes the full pipeline
///
/// # Pipeline stages
/// 1. Filter: location, budget, room type, date range (with fallback)
/// 2. Tab scoping: intersect with favorites when that tab is active
/// 3. Scoring and stable ranking, when preferences are active
/// 4. Tier threshold filter
/// 5. Top-matches subset and section grouping
#[derive(Debug, Clone)]
pub struct Ranker {
    weights: ScoringWeights,
}

impl Ranker {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    /// Attach match scores and sort descending by overall score
    ///
    /// A pass-through when the preferences carry neither a location nor a
    /// budget: no scores are attached and the input order is preserved.
    /// The sort is stable, so equal scores keep their prior relative order.
    pub fn rank(&self, mut listings: Vec<Listing>, preferences: &GuestPreferences) -> Vec<Listing> {
        if !preferences.is_active() {
            for listing in &mut listings {
                listing.match_score = None;
            }
            return listings;
        }

        for listing in &mut listings {
            listing.match_score =
                Some(calculate_match_score(listing, preferences, &self.weights));
        }

        listings.sort_by(|a, b| {
            b.overall_score()
                .partial_cmp(&a.overall_score())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        listings
    }

    /// Keep only listings at or above the tier's score threshold
    ///
    /// Listings without a score only pass the `All` tier; callers apply
    /// tiers to ranked lists.
    pub fn apply_tier(listings: Vec<Listing>, tier: MatchTier) -> Vec<Listing> {
        let min_score = match tier {
            MatchTier::All => return listings,
            MatchTier::Great => GREAT_MATCH_MIN,
            MatchTier::Perfect => PERFECT_MATCH_MIN,
        };

        listings
            .into_iter()
            .filter(|listing| listing.overall_score().map_or(false, |s| s >= min_score))
            .collect()
    }

    /// Non-exclusive perfect-tier subset of a ranked list; the listings
    /// remain in the main grouped output
    pub fn top_matches(listings: &[Listing]) -> Vec<Listing> {
        listings
            .iter()
            .filter(|listing| {
                listing
                    .overall_score()
                    .map_or(false, |s| s >= PERFECT_MATCH_MIN)
            })
            .cloned()
            .collect()
    }

    /// Partition by section label: first-seen group order, per-group
    /// insertion order, every listing in exactly one group
    pub fn group_by_section(listings: &[Listing]) -> Vec<ListingGroup> {
        let mut groups: Vec<ListingGroup> = Vec::new();

        for listing in listings {
            let title = listing.section.as_deref().unwrap_or(DEFAULT_SECTION);
            match groups.iter_mut().find(|g| g.title == title) {
                Some(group) => group.items.push(listing.clone()),
                None => groups.push(ListingGroup {
                    title: title.to_string(),
                    items: vec![listing.clone()],
                }),
            }
        }

        groups
    }

    /// Intersect with the caller's favorite ids, preserving order
    ///
    /// An empty intersection is a legitimate empty result; the filter
    /// fallback never applies here.
    pub fn scope_to_favorites(
        listings: Vec<Listing>,
        favorites: &HashSet<ListingId>,
    ) -> Vec<Listing> {
        listings
            .into_iter()
            .filter(|listing| favorites.contains(&listing.id))
            .collect()
    }

    /// The full pure reducer: same input tuple, same output, every time
    pub fn build_view(
        &self,
        listings: &[Listing],
        filters: &SearchFilters,
        tab: SearchTab,
        favorites: &HashSet<ListingId>,
        tier: MatchTier,
    ) -> RankedView {
        let filtered = apply_filters(listings, filters);

        let scoped = match tab {
            SearchTab::All => filtered,
            SearchTab::Favorites => Self::scope_to_favorites(filtered, favorites),
        };

        let preferences = GuestPreferences::from_filters(filters);
        let ranked = self.rank(scoped, &preferences);

        // The tier selector only means something once scores exist
        let visible = if preferences.is_active() {
            Self::apply_tier(ranked, tier)
        } else {
            ranked
        };

        let top_matches = Self::top_matches(&visible);
        let total_results = visible.len();
        let groups = Self::group_by_section(&visible);

        RankedView {
            groups,
            top_matches,
            total_results,
        }
    }
}

impl Default for Ranker {
    fn default() -> Self {
        Self::with_default_weights()
    }
}
