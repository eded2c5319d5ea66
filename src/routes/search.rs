use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::core::Ranker;
use crate::models::{
    ErrorResponse, HealthResponse, ListingsResponse, SearchListingsRequest,
    SearchListingsResponse,
};
use crate::services::{CacheKey, ListingRepository, SearchCache};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<ListingRepository>,
    pub cache: Arc<SearchCache>,
    pub ranker: Ranker,
}

/// Configure all listing routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/listings", web::get().to(list_listings))
        .route("/listings/search", web::post().to(search_listings));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Raw listing snapshot endpoint
///
/// GET /api/v1/listings
async fn list_listings(state: web::Data<AppState>) -> impl Responder {
    match state.repository.fetch_listings().await {
        Ok(listings) => {
            let total = listings.len();
            HttpResponse::Ok().json(ListingsResponse { listings, total })
        }
        Err(e) => {
            tracing::error!("Failed to fetch listings: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch listings".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Search listings endpoint
///
/// POST /api/v1/listings/search
///
/// Request body:
/// ```json
/// {
///   "location": "Denver",
///   "maxBudget": 2000,
///   "roomType": "private-room",
///   "startDate": "2026-02-01",
///   "endDate": "2026-04-30",
///   "tab": "all",
///   "matchTier": "all",
///   "favoriteIds": [1, 5]
/// }
/// ```
async fn search_listings(
    state: web::Data<AppState>,
    req: web::Json<SearchListingsRequest>,
) -> impl Responder {
    // Validate request
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for search request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let filters = req.filters();
    let tab = req.tab();
    let tier = req.tier();
    let favorites = req.favorites();

    tracing::info!(
        "Searching listings: location={:?}, budget={:?}, tab={:?}, tier={:?}",
        filters.location,
        filters.max_budget,
        tab,
        tier
    );

    let cache_key = CacheKey::search(&filters, tab, tier, &req.favorite_ids);
    if let Ok(cached) = state.cache.get::<SearchListingsResponse>(&cache_key).await {
        tracing::debug!("Serving search from cache");
        return HttpResponse::Ok().json(cached);
    }

    let listings = match state.repository.fetch_listings().await {
        Ok(listings) => listings,
        Err(e) => {
            tracing::error!("Failed to fetch listings for search: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch listings".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let view = state
        .ranker
        .build_view(&listings, &filters, tab, &favorites, tier);

    let response = SearchListingsResponse::from(view);

    tracing::info!(
        "Returning {} listings in {} groups ({} top matches)",
        response.total_results,
        response.groups.len(),
        response.top_matches.len()
    );

    if let Err(e) = state.cache.set(&cache_key, &response).await {
        tracing::warn!("Failed to cache search response: {}", e);
    }

    HttpResponse::Ok().json(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_check_response() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            timestamp: chrono::Utc::now(),
        };

        assert_eq!(response.status, "healthy");
    }
}
