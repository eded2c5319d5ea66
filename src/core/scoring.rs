use crate::core::filters::matches_location;
use crate::models::{GuestPreferences, Listing, MatchScore, ScoringWeights};

/// Scores at or above this are perfect-tier matches
pub const PERFECT_MATCH_MIN: f64 = 90.0;
/// Scores at or above this are great-tier matches
pub const GREAT_MATCH_MIN: f64 = 75.0;

/// Calculate a match score (0-100) for a listing against the guest's
/// stated preferences
///
/// Scoring formula:
/// score = 100 * weighted_avg over the PRESENT preference dimensions of (
///     location_score * 0.40 +      # city/state/hospital hit
///     budget_score   * 0.30 +      # closer to the ceiling = tighter fit
///     room_score     * 0.20 +      # exact room-type match
///     dates_score    * 0.10        # availability covers the request
/// )
///
/// Absent preference fields contribute neither score nor weight, so the
/// result only reflects what the guest actually asked for. Deterministic:
/// no clock or randomness anywhere below.
pub fn calculate_match_score(
    listing: &Listing,
    preferences: &GuestPreferences,
    weights: &ScoringWeights,
) -> MatchScore {
    let mut pairs: Vec<(f64, f64)> = Vec::with_capacity(4);
    let mut reasons: Vec<String> = Vec::new();

    if let Some(query) = &preferences.location {
        let location_score = if matches_location(listing, query) { 1.0 } else { 0.0 };
        if location_score > 0.0 {
            reasons.push(location_reason(listing, query));
        }
        pairs.push((location_score, weights.location));
    }

    if let Some(budget) = preferences.max_budget {
        let budget_score = calculate_budget_score(listing.price_per_month, budget);
        if listing.price_per_month <= budget {
            reasons.push(budget_reason(listing.price_per_month, budget));
        }
        pairs.push((budget_score, weights.budget));
    }

    if let Some(room_type) = preferences.room_type {
        let room_score = if listing.room_type == room_type { 1.0 } else { 0.0 };
        if room_score > 0.0 {
            reasons.push(format!("{} as requested", room_type.label()));
        }
        pairs.push((room_score, weights.room_type));
    }

    if let (Some(start), Some(end)) = (&preferences.start_date, &preferences.end_date) {
        let dates_score = if super::availability::covers_range(listing, start, end) {
            1.0
        } else {
            0.0
        };
        if dates_score > 0.0 {
            reasons.push("Available for your dates".to_string());
        }
        pairs.push((dates_score, weights.dates));
    }

    let overall = (weighted_avg(&pairs) * 100.0).min(100.0).max(0.0);

    // A high score must always come with at least one reason, even when it
    // was earned through partial fits that produced none above
    if reasons.is_empty() && overall >= GREAT_MATCH_MIN {
        reasons.push("Strong overall fit".to_string());
    }

    MatchScore { overall, reasons }
}

/// Budget fit (0-1)
///
/// Within budget the fit rises from 0.5 toward 1.0 as the price approaches
/// the ceiling, so tightening the budget toward the exact price never
/// lowers the score. Over budget the fit continues down from 0.5 and
/// floors at zero once the overage reaches 25%.
#[inline]
fn calculate_budget_score(price_per_month: u32, max_budget: u32) -> f64 {
    let price = price_per_month as f64;
    let budget = max_budget as f64;

    if price_per_month <= max_budget {
        if max_budget == 0 {
            return 1.0;
        }
        0.5 + 0.5 * (price / budget)
    } else {
        if max_budget == 0 {
            return 0.0;
        }
        let overage = (price - budget) / budget;
        (0.5 - 2.0 * overage).max(0.0)
    }
}

/// Weighted average over (score, weight) pairs; zero total weight scores zero
#[inline]
fn weighted_avg(pairs: &[(f64, f64)]) -> f64 {
    let numerator: f64 = pairs.iter().map(|(score, weight)| score * weight).sum();
    let denominator: f64 = pairs.iter().map(|(_, weight)| weight).sum();
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

fn location_reason(listing: &Listing, query: &str) -> String {
    let needle = query.trim().to_lowercase();
    let in_area = listing.city.to_lowercase().contains(&needle)
        || listing.state.to_lowercase().contains(&needle)
        || listing.location_label().to_lowercase().contains(&needle);

    if in_area {
        format!("In {}", listing.location_label())
    } else {
        format!("Close to {}", listing.hospital)
    }
}

fn budget_reason(price_per_month: u32, max_budget: u32) -> String {
    let headroom = max_budget - price_per_month;
    if headroom > 0 {
        format!("${} under your monthly budget", headroom)
    } else {
        "Right at your budget".to_string()
    }
}

/// Label for a numeric score, fixed tier breakpoints
#[inline]
pub fn match_label(score: f64) -> &'static str {
    if score >= PERFECT_MATCH_MIN {
        "Perfect match"
    } else if score >= GREAT_MATCH_MIN {
        "Great match"
    } else {
        "Good match"
    }
}

/// Color token for a numeric score, same breakpoints as `match_label`
#[inline]
pub fn match_color(score: f64) -> &'static str {
    if score >= PERFECT_MATCH_MIN {
        "emerald"
    } else if score >= GREAT_MATCH_MIN {
        "sky"
    } else {
        "slate"
    }
}
