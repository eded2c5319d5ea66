use crate::core::availability::covers_range;
use crate::models::{Listing, RoomTypeFilter, SearchFilters};

/// Case-insensitive substring match against city, state, hospital name,
/// or the composed "City, State" label
///
/// An empty or whitespace-only query keeps everything.
#[inline]
pub fn matches_location(listing: &Listing, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }

    listing.city.to_lowercase().contains(&needle)
        || listing.state.to_lowercase().contains(&needle)
        || listing.hospital.to_lowercase().contains(&needle)
        || listing.location_label().to_lowercase().contains(&needle)
}

/// Budget ceiling check; an absent budget keeps everything
#[inline]
pub fn within_budget(listing: &Listing, max_budget: Option<u32>) -> bool {
    match max_budget {
        Some(budget) => listing.price_per_month <= budget,
        None => true,
    }
}

/// Room-type check; the `Any` sentinel keeps everything
#[inline]
pub fn matches_room_type(listing: &Listing, filter: RoomTypeFilter) -> bool {
    match filter {
        RoomTypeFilter::Any => true,
        RoomTypeFilter::Only(room_type) => listing.room_type == room_type,
    }
}

/// Date-range check; only applies when BOTH requested dates are present
#[inline]
pub fn covers_requested_dates(
    listing: &Listing,
    start_date: Option<&str>,
    end_date: Option<&str>,
) -> bool {
    match (start_date, end_date) {
        (Some(start), Some(end)) => covers_range(listing, start, end),
        _ => true,
    }
}

/// Apply the filter pipeline in fixed order: location, budget, room type,
/// date range
///
/// Fallback rule: an over-filtered empty result reverts to the original
/// unfiltered set. The UI never shows zero results while the repository
/// has listings; only an empty repository (or tab scoping, upstream of
/// this function) produces an empty list.
pub fn apply_filters(listings: &[Listing], filters: &SearchFilters) -> Vec<Listing> {
    let filtered: Vec<Listing> = listings
        .iter()
        .filter(|listing| matches_location(listing, &filters.location))
        .filter(|listing| within_budget(listing, filters.max_budget))
        .filter(|listing| matches_room_type(listing, filters.room_type))
        .filter(|listing| {
            covers_requested_dates(
                listing,
                filters.start_date.as_deref(),
                filters.end_date.as_deref(),
            )
        })
        .cloned()
        .collect();

    // Single, isolated fallback step: never narrow a non-empty input to nothing
    if filtered.is_empty() && !listings.is_empty() {
        return listings.to_vec();
    }

    filtered
}
