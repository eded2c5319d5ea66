// Integration tests for NurseNest Match

use std::collections::HashSet;

use nursenest_match::core::Ranker;
use nursenest_match::models::{
    Listing, MatchTier, RoomType, RoomTypeFilter, SearchFilters, SearchTab,
};
use nursenest_match::services::ListingRepository;

fn create_listing(
    id: u64,
    city: &str,
    state: &str,
    hospital: &str,
    price: u32,
    room_type: RoomType,
    section: &str,
) -> Listing {
    Listing {
        id,
        title: format!("Listing {}", id),
        city: city.to_string(),
        state: state.to_string(),
        hospital: hospital.to_string(),
        hospital_city: None,
        hospital_state: None,
        minutes_to_hospital: 10,
        price_per_month: price,
        room_type,
        available_from: None,
        available_to: None,
        tags: vec![],
        perks: vec![],
        rating: None,
        review_count: None,
        section: Some(section.to_string()),
        match_score: None,
    }
}

fn demo_market() -> Vec<Listing> {
    vec![
        create_listing(1, "Denver", "CO", "Denver Health", 1800, RoomType::PrivateRoom, "Stays for you"),
        create_listing(2, "Denver", "CO", "Saint Joseph", 2600, RoomType::EntirePlace, "Stays for you"),
        create_listing(3, "Austin", "TX", "Dell Seton", 1500, RoomType::Shared, "Near top hospitals"),
        create_listing(4, "Aurora", "CO", "UCHealth Anschutz", 1600, RoomType::PrivateRoom, "New this week"),
        create_listing(5, "Seattle", "WA", "Harborview", 2100, RoomType::PrivateRoom, "Near top hospitals"),
    ]
}

#[test]
fn test_end_to_end_search_with_preferences() {
    let ranker = Ranker::with_default_weights();
    let listings = demo_market();

    let filters = SearchFilters {
        location: "Denver".to_string(),
        max_budget: Some(2000),
        ..SearchFilters::default()
    };

    let view = ranker.build_view(
        &listings,
        &filters,
        SearchTab::All,
        &HashSet::new(),
        MatchTier::All,
    );

    // Only the in-budget Denver listing survives both filters
    assert_eq!(view.total_results, 1);
    assert_eq!(view.groups.len(), 1);
    let best = &view.groups[0].items[0];
    assert_eq!(best.id, 1);

    // A close listing+preference pair scores great-tier with reasons
    let score = best.match_score.as_ref().unwrap();
    assert!(score.overall >= 75.0);
    assert!(!score.reasons.is_empty());
}

#[test]
fn test_end_to_end_overfiltered_search_falls_back() {
    let ranker = Ranker::with_default_weights();
    let listings = demo_market();

    let filters = SearchFilters {
        location: "Denver".to_string(),
        max_budget: Some(100),
        room_type: RoomTypeFilter::Only(RoomType::Shared),
        ..SearchFilters::default()
    };

    let view = ranker.build_view(
        &listings,
        &filters,
        SearchTab::All,
        &HashSet::new(),
        MatchTier::All,
    );

    // The fallback keeps the full market visible, ranked by fit
    assert_eq!(view.total_results, listings.len());

    let displayed: Vec<u64> = view
        .groups
        .iter()
        .flat_map(|g| g.items.iter().map(|l| l.id))
        .collect();
    let mut sorted = displayed.clone();
    sorted.sort_unstable();
    assert_eq!(sorted, vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_end_to_end_results_sorted_and_grouped() {
    let ranker = Ranker::with_default_weights();
    let listings = demo_market();

    let filters = SearchFilters {
        location: "CO".to_string(),
        max_budget: Some(2000),
        ..SearchFilters::default()
    };

    let view = ranker.build_view(
        &listings,
        &filters,
        SearchTab::All,
        &HashSet::new(),
        MatchTier::All,
    );

    // Scores descend across the flattened group order
    let flattened: Vec<f64> = view
        .groups
        .iter()
        .flat_map(|g| g.items.iter().filter_map(|l| l.overall_score()))
        .collect();
    assert_eq!(flattened.len(), view.total_results);

    let all_scores: Vec<f64> = {
        let mut scores = flattened.clone();
        scores.sort_by(|a, b| b.partial_cmp(a).unwrap());
        scores
    };
    // Grouping preserves the ranked order within each section bucket
    for group in &view.groups {
        let scores: Vec<f64> = group.items.iter().filter_map(|l| l.overall_score()).collect();
        for pair in scores.windows(2) {
            assert!(pair[0] >= pair[1], "group items out of ranked order");
        }
    }
    assert_eq!(flattened.iter().cloned().fold(f64::MIN, f64::max), all_scores[0]);
}

#[test]
fn test_end_to_end_empty_favorites_shows_nothing() {
    let ranker = Ranker::with_default_weights();
    let listings = demo_market();

    let filters = SearchFilters {
        location: "Denver".to_string(),
        ..SearchFilters::default()
    };

    let view = ranker.build_view(
        &listings,
        &filters,
        SearchTab::Favorites,
        &HashSet::new(),
        MatchTier::All,
    );

    // Tab scoping is the one legitimate empty result; no fallback applies
    assert_eq!(view.total_results, 0);
    assert!(view.groups.is_empty());
    assert!(view.top_matches.is_empty());
}

#[test]
fn test_end_to_end_favorites_tab_ranks_subset() {
    let ranker = Ranker::with_default_weights();
    let listings = demo_market();
    let favorites: HashSet<u64> = [2, 4].into_iter().collect();

    let view = ranker.build_view(
        &listings,
        &SearchFilters {
            max_budget: Some(3000),
            ..SearchFilters::default()
        },
        SearchTab::Favorites,
        &favorites,
        MatchTier::All,
    );

    assert_eq!(view.total_results, 2);
    let ids: HashSet<u64> = view
        .groups
        .iter()
        .flat_map(|g| g.items.iter().map(|l| l.id))
        .collect();
    assert_eq!(ids, favorites);
}

#[test]
fn test_end_to_end_date_window_excludes_listing() {
    let ranker = Ranker::with_default_weights();
    let mut listings = demo_market();
    listings[0].available_from = Some("2024-05-01".to_string());
    listings[0].available_to = Some("2024-06-05".to_string());

    let filters = SearchFilters {
        location: "Denver".to_string(),
        start_date: Some("2024-06-01".to_string()),
        end_date: Some("2024-06-10".to_string()),
        ..SearchFilters::default()
    };

    let view = ranker.build_view(
        &listings,
        &filters,
        SearchTab::All,
        &HashSet::new(),
        MatchTier::All,
    );

    // The request extends past listing 1's window; only listing 2 remains
    let ids: Vec<u64> = view
        .groups
        .iter()
        .flat_map(|g| g.items.iter().map(|l| l.id))
        .collect();
    assert_eq!(ids, vec![2]);
}

#[test]
fn test_end_to_end_tier_narrows_to_perfect() {
    let ranker = Ranker::with_default_weights();
    let listings = demo_market();

    let filters = SearchFilters {
        location: "Denver".to_string(),
        max_budget: Some(2000),
        ..SearchFilters::default()
    };

    let view = ranker.build_view(
        &listings,
        &filters,
        SearchTab::All,
        &HashSet::new(),
        MatchTier::Perfect,
    );

    for group in &view.groups {
        for listing in &group.items {
            assert!(listing.overall_score().unwrap() >= 90.0);
        }
    }
    // Top matches mirror the perfect-tier display list here
    assert_eq!(view.top_matches.len(), view.total_results);
}

#[test]
fn test_search_is_referentially_transparent() {
    let ranker = Ranker::with_default_weights();
    let listings = demo_market();
    let filters = SearchFilters {
        location: "CO".to_string(),
        max_budget: Some(2200),
        ..SearchFilters::default()
    };
    let favorites: HashSet<u64> = [1, 2, 3].into_iter().collect();

    let first = ranker.build_view(&listings, &filters, SearchTab::Favorites, &favorites, MatchTier::Great);
    let second = ranker.build_view(&listings, &filters, SearchTab::Favorites, &favorites, MatchTier::Great);

    assert_eq!(first.total_results, second.total_results);
    let first_ids: Vec<u64> = first.groups.iter().flat_map(|g| g.items.iter().map(|l| l.id)).collect();
    let second_ids: Vec<u64> = second.groups.iter().flat_map(|g| g.items.iter().map(|l| l.id)).collect();
    assert_eq!(first_ids, second_ids);
}

#[tokio::test]
async fn test_remote_repository_fetch() {
    let mut server = mockito::Server::new_async().await;

    let body = serde_json::json!({
        "total": 2,
        "listings": [
            {
                "id": 10,
                "title": "Room near Harborview",
                "city": "Seattle",
                "state": "WA",
                "hospital": "Harborview Medical Center",
                "pricePerMonth": 2100,
                "roomType": "private-room",
                "section": "Near top hospitals"
            },
            {
                "id": 11,
                "title": "Condo near Swedish",
                "city": "Seattle",
                "state": "WA",
                "hospital": "Swedish Medical Center",
                "pricePerMonth": 2500,
                "roomType": "entire-place"
            }
        ]
    });

    let mock = server
        .mock("GET", "/listings")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await;

    let repository = ListingRepository::remote(server.url(), None).unwrap();
    let listings = repository.fetch_listings().await.unwrap();

    mock.assert_async().await;
    assert_eq!(listings.len(), 2);
    assert_eq!(listings[0].id, 10);
    assert_eq!(listings[1].room_type, RoomType::EntirePlace);
}

#[tokio::test]
async fn test_remote_repository_skips_bad_documents() {
    let mut server = mockito::Server::new_async().await;

    let body = serde_json::json!({
        "listings": [
            { "id": 1, "title": "Valid", "city": "Denver", "state": "CO",
              "hospital": "Denver Health", "pricePerMonth": 1800, "roomType": "shared" },
            { "id": "not-a-number" }
        ]
    });

    server
        .mock("GET", "/listings")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await;

    let repository = ListingRepository::remote(server.url(), None).unwrap();
    let listings = repository.fetch_listings().await.unwrap();

    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].id, 1);
}

#[tokio::test]
async fn test_remote_repository_error_status() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("GET", "/listings")
        .with_status(503)
        .create_async()
        .await;

    let repository = ListingRepository::remote(server.url(), None).unwrap();
    assert!(repository.fetch_listings().await.is_err());
}
