use chrono::NaiveDate;

use crate::models::Listing;

/// Parse an ISO `YYYY-MM-DD` date; malformed input degrades to `None`
/// so the caller treats that side as unconstrained
#[inline]
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

/// Check whether a listing's stated availability window covers the
/// requested inclusive `[start, end]` range
///
/// A listing with no window is always available. A missing or malformed
/// date on either side of either window relaxes that bound instead of
/// failing the check.
#[inline]
pub fn covers_range(listing: &Listing, start: &str, end: &str) -> bool {
    let available_from = listing.available_from.as_deref().and_then(parse_date);
    let available_to = listing.available_to.as_deref().and_then(parse_date);

    window_contains(available_from, available_to, parse_date(start), parse_date(end))
}

/// Containment over optional bounds: each comparison only applies when
/// both of its sides parsed
#[inline]
pub fn window_contains(
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> bool {
    if let (Some(from), Some(start)) = (from, start) {
        if start < from {
            return false;
        }
    }
    if let (Some(to), Some(end)) = (to, end) {
        if end > to {
            return false;
        }
    }
    true
}
