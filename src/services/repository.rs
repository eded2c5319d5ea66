use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use thiserror::Error;

use crate::models::{Listing, RoomType};

/// Errors that can occur when fetching listings
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Listing data source
///
/// Either bundled demo data or a remote HTTP endpoint serving the same
/// JSON shape. The search pipeline only ever sees the resolved snapshot;
/// fetch failures stay at this boundary.
pub struct ListingRepository {
    source: ListingSource,
}

enum ListingSource {
    Demo(Vec<Listing>),
    Remote {
        base_url: String,
        api_key: Option<String>,
        client: Client,
    },
}

impl ListingRepository {
    /// Repository backed by the bundled demo listings
    pub fn demo() -> Self {
        Self {
            source: ListingSource::Demo(seed_listings()),
        }
    }

    /// Repository backed by a remote listings endpoint
    pub fn remote(base_url: String, api_key: Option<String>) -> Result<Self, RepositoryError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            source: ListingSource::Remote {
                base_url,
                api_key,
                client,
            },
        })
    }

    /// Fetch the current listing snapshot
    pub async fn fetch_listings(&self) -> Result<Vec<Listing>, RepositoryError> {
        match &self.source {
            ListingSource::Demo(listings) => Ok(listings.clone()),
            ListingSource::Remote {
                base_url,
                api_key,
                client,
            } => fetch_remote(client, base_url, api_key.as_deref()).await,
        }
    }
}

/// GET `{base_url}/listings`, expecting `{"listings": [...], "total": n}`
///
/// Individual documents that fail to parse are skipped rather than
/// failing the whole snapshot.
async fn fetch_remote(
    client: &Client,
    base_url: &str,
    api_key: Option<&str>,
) -> Result<Vec<Listing>, RepositoryError> {
    let url = format!("{}/listings", base_url.trim_end_matches('/'));

    tracing::debug!("Fetching listings from: {}", url);

    let mut request = client.get(&url);
    if let Some(key) = api_key {
        request = request.header("X-Api-Key", key);
    }

    let response = request.send().await?;

    if !response.status().is_success() {
        return Err(RepositoryError::ApiError(format!(
            "Failed to fetch listings: {}",
            response.status()
        )));
    }

    let json: Value = response.json().await?;

    let total = json.get("total").and_then(|t| t.as_u64()).unwrap_or(0);

    let documents = json
        .get("listings")
        .and_then(|d| d.as_array())
        .ok_or_else(|| RepositoryError::InvalidResponse("Missing listings array".into()))?;

    let listings: Vec<Listing> = documents
        .iter()
        .filter_map(|doc| serde_json::from_value(doc.clone()).ok())
        .collect();

    tracing::debug!("Fetched {} listings (total: {})", listings.len(), total);

    Ok(listings)
}

/// Bundled demo listings used when no remote repository is configured
pub fn seed_listings() -> Vec<Listing> {
    fn listing(
        id: u64,
        title: &str,
        city: &str,
        state: &str,
        hospital: &str,
        minutes: u32,
        price: u32,
        room_type: RoomType,
        window: Option<(&str, &str)>,
        rating: Option<f32>,
        reviews: Option<u32>,
        section: &str,
    ) -> Listing {
        Listing {
            id,
            title: title.to_string(),
            city: city.to_string(),
            state: state.to_string(),
            hospital: hospital.to_string(),
            hospital_city: Some(city.to_string()),
            hospital_state: Some(state.to_string()),
            minutes_to_hospital: minutes,
            price_per_month: price,
            room_type,
            available_from: window.map(|(from, _)| from.to_string()),
            available_to: window.map(|(_, to)| to.to_string()),
            tags: vec!["furnished".to_string(), "utilities-included".to_string()],
            perks: vec!["wifi".to_string(), "washer-dryer".to_string()],
            rating,
            review_count: reviews,
            section: Some(section.to_string()),
            match_score: None,
        }
    }

    vec![
        listing(
            1,
            "Sunny private room 8 minutes from Denver Health",
            "Denver",
            "CO",
            "Denver Health",
            8,
            1800,
            RoomType::PrivateRoom,
            Some(("2026-01-01", "2026-12-31")),
            Some(4.9),
            Some(34),
            "Stays for you",
        ),
        listing(
            2,
            "Quiet garden studio near Saint Joseph",
            "Denver",
            "CO",
            "Saint Joseph Hospital",
            12,
            2200,
            RoomType::EntirePlace,
            Some(("2026-02-01", "2026-08-31")),
            Some(4.7),
            Some(19),
            "Stays for you",
        ),
        listing(
            3,
            "Shared townhome walkable to Dell Seton",
            "Austin",
            "TX",
            "Dell Seton Medical Center",
            10,
            1400,
            RoomType::Shared,
            None,
            Some(4.5),
            Some(11),
            "Near top hospitals",
        ),
        listing(
            4,
            "Entire condo by Banner University",
            "Phoenix",
            "AZ",
            "Banner University Medical Center",
            15,
            2500,
            RoomType::EntirePlace,
            Some(("2026-03-01", "2026-09-30")),
            Some(4.8),
            Some(27),
            "Near top hospitals",
        ),
        listing(
            5,
            "Private room steps from Harborview",
            "Seattle",
            "WA",
            "Harborview Medical Center",
            6,
            2100,
            RoomType::PrivateRoom,
            None,
            Some(4.6),
            Some(42),
            "Stays for you",
        ),
        listing(
            6,
            "Basement suite near UCHealth Anschutz",
            "Aurora",
            "CO",
            "UCHealth University of Colorado Hospital",
            9,
            1600,
            RoomType::PrivateRoom,
            Some(("2026-01-15", "2026-06-15")),
            None,
            None,
            "New this week",
        ),
        listing(
            7,
            "Bright loft close to Ascension Seton",
            "Austin",
            "TX",
            "Ascension Seton Medical Center",
            14,
            1900,
            RoomType::EntirePlace,
            None,
            Some(4.4),
            Some(8),
            "New this week",
        ),
        listing(
            8,
            "Shared apartment near Swedish First Hill",
            "Seattle",
            "WA",
            "Swedish Medical Center First Hill",
            11,
            1300,
            RoomType::Shared,
            Some(("2026-02-15", "2026-11-30")),
            Some(4.2),
            Some(15),
            "Near top hospitals",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_repository_snapshot() {
        let repo = ListingRepository::demo();
        let listings = tokio_test::block_on(repo.fetch_listings()).unwrap();

        assert_eq!(listings.len(), 8);
        assert!(listings.iter().all(|l| l.match_score.is_none()));
    }

    #[test]
    fn test_seed_ids_are_unique() {
        let listings = seed_listings();
        let mut ids: Vec<u64> = listings.iter().map(|l| l.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), listings.len());
    }

    #[test]
    fn test_seed_sections_cover_demo_buckets() {
        let listings = seed_listings();
        let sections: Vec<&str> = listings
            .iter()
            .filter_map(|l| l.section.as_deref())
            .collect();
        assert!(sections.contains(&"Stays for you"));
        assert!(sections.contains(&"Near top hospitals"));
        assert!(sections.contains(&"New this week"));
    }
}
