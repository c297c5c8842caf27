//! Behavior-driven tests for the YTS provider facade.
//!
//! These tests verify HOW host filters become catalog queries and HOW the
//! catalog's payload becomes the records a host displays.

mod support;

use std::sync::Arc;

use serde_json::{json, Value};
use support::{empty_listing, ok_envelope, ScriptedHttpClient};
use yts_core::{
    CatalogProvider, ContentType, FilterRequest, ListingResult, PassthroughSanitizer,
    ProviderArgs, ProviderErrorKind, SortOrder, Sorter, YtsProvider,
};

const MIRROR: &str = "https://yts.example/";

fn torrent(quality: &str, hash: &str) -> Value {
    json!({
        "url": format!("https://yts.example/torrent/download/{hash}"),
        "hash": hash,
        "quality": quality,
        "size": "1.9 GB",
        "size_bytes": 2_040_109_465_u64,
        "seeds": 310,
        "peers": 42,
    })
}

fn listing_body(movie_count: u64, page_number: u64, movies: Vec<Value>) -> String {
    ok_envelope(json!({
        "movie_count": movie_count,
        "limit": 50,
        "page_number": page_number,
        "movies": movies,
    }))
}

async fn fetch_with(body: &str, filters: FilterRequest) -> (ListingResult, Arc<ScriptedHttpClient>) {
    let client = Arc::new(ScriptedHttpClient::new().ok(MIRROR, body));
    let provider = YtsProvider::with_http_client(ProviderArgs::new(MIRROR), client.clone())
        .expect("valid args");
    let listing = provider.fetch(filters).await.expect("listing should succeed");
    (listing, client)
}

fn sent_query(client: &ScriptedHttpClient) -> String {
    let urls = client.urls();
    assert_eq!(urls.len(), 1, "exactly one request expected");
    urls[0]
        .split_once('?')
        .map(|(_, query)| query.to_owned())
        .unwrap_or_default()
}

// =============================================================================
// Provider: Query Mapping
// =============================================================================

#[tokio::test]
async fn when_host_sends_no_filters_system_requests_seeded_defaults() {
    // Given/When: An unfiltered listing request
    let (_, client) = fetch_with(&empty_listing(), FilterRequest::new()).await;

    // Then: Only the default parameters are sent
    assert_eq!(
        sent_query(&client),
        "limit=50&sort_by=seeds&with_rt_ratings=true"
    );
}

#[tokio::test]
async fn when_host_filters_by_all_genres_system_omits_the_genre() {
    let (_, client) = fetch_with(&empty_listing(), FilterRequest::new().with_genre("All")).await;

    assert!(!sent_query(&client).contains("genre="));
}

#[tokio::test]
async fn when_host_combines_filters_system_maps_each_one() {
    // Given: Page, keywords, genre, ascending order and trending sorter
    let filters = FilterRequest::new()
        .with_page(3)
        .with_keywords("blade runner")
        .with_genre("Action")
        .with_order(SortOrder::from_flag(1))
        .with_sorter(Sorter::from_label("trending"));

    // When: The listing is fetched
    let (_, client) = fetch_with(&empty_listing(), filters).await;

    // Then: Every filter lands in the query
    assert_eq!(
        sent_query(&client),
        "genre=Action&limit=50&order_by=asc&page=3&query_term=blade%20runner\
         &sort_by=trending_score&with_rt_ratings=true"
    );
}

#[tokio::test]
async fn when_adapter_has_quality_and_language_system_sends_them() {
    let client = Arc::new(ScriptedHttpClient::new().ok(MIRROR, &empty_listing()));
    let provider = YtsProvider::with_http_client(
        ProviderArgs::new(MIRROR)
            .with_quality("720p")
            .with_translation("fr"),
        client.clone(),
    )
    .expect("valid args");

    provider
        .fetch(FilterRequest::new().with_sorter(Sorter::from_label("last added")))
        .await
        .expect("listing should succeed");

    let query = sent_query(&client);
    assert!(query.contains("quality=720p"));
    assert!(query.contains("lang=fr"));
    assert!(query.contains("sort_by=date_added"));
}

// =============================================================================
// Provider: Normalization
// =============================================================================

#[tokio::test]
async fn when_catalog_lists_3d_releases_system_hides_them() {
    // Given: One movie with 1080p + 3D and one movie with only 3D
    let body = listing_body(
        2,
        1,
        vec![
            json!({
                "imdb_code": "tt1856101",
                "title_english": "Blade Runner 2049",
                "year": 2017,
                "genres": ["Drama", "Sci-Fi"],
                "rating": 8.0,
                "runtime": 164,
                "medium_cover_image": "https://img.yts.example/medium.jpg",
                "background_image_original": "https://img.yts.example/bg.jpg",
                "description_full": "A young blade runner discovers a secret.",
                "yt_trailer_code": "gCcx85zbxz4",
                "mpa_rating": "R",
                "torrents": [torrent("1080p", "HASH1080"), torrent("3D", "HASH3D")],
            }),
            json!({
                "imdb_code": "tt0000003",
                "title_english": "Stereo Only",
                "torrents": [torrent("3D", "ONLY3D")],
            }),
        ],
    );

    // When: The listing is fetched
    let (listing, _) = fetch_with(&body, FilterRequest::new()).await;

    // Then: Only the 2D movie and its 2D torrent survive
    assert_eq!(listing.results.len(), 1);
    let record = &listing.results[0];
    assert_eq!(record.content_type, ContentType::Movie);
    assert_eq!(record.imdb_id, "tt1856101");
    assert_eq!(record.runtime, Some(164));
    assert_eq!(record.qualities().collect::<Vec<_>>(), vec!["1080p"]);
    assert_eq!(
        record.trailer.as_deref(),
        Some("https://www.youtube.com/watch?v=gCcx85zbxz4")
    );

    let link = &record.torrents["1080p"];
    assert!(link.magnet.starts_with("magnet:?xt=urn:btih:HASH1080&tr=udp://"));
    assert_eq!(link.seed, 310);
    assert_eq!(link.peer, 42);
}

#[tokio::test]
async fn when_more_movies_exist_than_pages_seen_system_reports_has_more() {
    let (listing, _) = fetch_with(&listing_body(120, 2, vec![]), FilterRequest::new()).await;
    assert!(listing.has_more);

    let (listing, _) = fetch_with(&listing_body(90, 2, vec![]), FilterRequest::new()).await;
    assert!(!listing.has_more);

    let (listing, _) = fetch_with(&listing_body(100, 2, vec![]), FilterRequest::new()).await;
    assert!(!listing.has_more, "exact multiple means no further page");

    let body = ok_envelope(json!({ "movie_count": 10, "limit": 50, "movies": [] }));
    let (listing, _) = fetch_with(&body, FilterRequest::new()).await;
    assert!(!listing.has_more, "unknown page number means no further page");
}

#[tokio::test]
async fn when_catalog_text_contains_markup_system_sanitizes_it() {
    let body = listing_body(
        1,
        1,
        vec![json!({
            "imdb_code": "tt0113277",
            "title_english": "Heat &amp; Dust",
            "description_full": "<p>A <b>crew</b> of thieves.</p>",
            "torrents": [torrent("720p", "HEAT")],
        })],
    );

    let (listing, _) = fetch_with(&body, FilterRequest::new()).await;

    let record = &listing.results[0];
    assert_eq!(record.title, "Heat & Dust");
    assert_eq!(record.synopsis, "A crew of thieves.");
}

#[tokio::test]
async fn when_passthrough_sanitizer_is_installed_system_keeps_raw_text() {
    let body = listing_body(
        1,
        1,
        vec![json!({
            "imdb_code": "tt0113277",
            "title_english": "Heat &amp; Dust",
            "torrents": [torrent("720p", "HEAT")],
        })],
    );
    let client = Arc::new(ScriptedHttpClient::new().ok(MIRROR, &body));
    let provider = YtsProvider::with_http_client(ProviderArgs::new(MIRROR), client)
        .expect("valid args")
        .with_sanitizer(Arc::new(PassthroughSanitizer));

    let listing = provider
        .fetch(FilterRequest::new())
        .await
        .expect("listing should succeed");

    assert_eq!(listing.results[0].title, "Heat &amp; Dust");
}

#[tokio::test]
async fn when_one_movie_is_mistyped_system_keeps_the_rest_of_the_page() {
    // Given: A movie with a string runtime next to a well-formed movie
    let body = listing_body(
        2,
        1,
        vec![
            json!({
                "imdb_code": "tt0000001",
                "runtime": "91",
                "torrents": [torrent("720p", "ONE")],
            }),
            json!({
                "imdb_code": "tt0000002",
                "runtime": 104,
                "torrents": [torrent("1080p", "TWO")],
            }),
        ],
    );

    // When: The listing is fetched
    let (listing, _) = fetch_with(&body, FilterRequest::new()).await;

    // Then: Both movies survive; only the mistyped field is dropped
    let ids: Vec<_> = listing.results.iter().map(|r| r.imdb_id.as_str()).collect();
    assert_eq!(ids, vec!["tt0000001", "tt0000002"]);
    assert_eq!(listing.results[0].runtime, None);
    assert_eq!(listing.results[1].runtime, Some(104));
}

#[tokio::test]
async fn when_listing_payload_is_malformed_system_reports_invalid_payload() {
    let client = Arc::new(
        ScriptedHttpClient::new().ok(MIRROR, &ok_envelope(json!({ "movies": "none" }))),
    );
    let provider =
        YtsProvider::with_http_client(ProviderArgs::new(MIRROR), client).expect("valid args");

    let error = provider
        .fetch(FilterRequest::new())
        .await
        .expect_err("malformed payload should fail");

    assert_eq!(error.kind(), ProviderErrorKind::InvalidPayload);
}

// =============================================================================
// Provider: Detail, Random and Identity
// =============================================================================

#[tokio::test]
async fn when_host_requests_detail_system_returns_cached_record_without_network() {
    // Given: A record from a previous listing
    let body = listing_body(
        1,
        1,
        vec![json!({
            "imdb_code": "tt0133093",
            "title_english": "The Matrix",
            "torrents": [torrent("1080p", "NEO")],
        })],
    );
    let (listing, _) = fetch_with(&body, FilterRequest::new()).await;
    let cached = listing.results[0].clone();

    let client = Arc::new(ScriptedHttpClient::new());
    let provider = YtsProvider::with_http_client(ProviderArgs::new(MIRROR), client.clone())
        .expect("valid args");

    // When: Detail is requested
    let detail = provider
        .detail("tt0133093", cached.clone())
        .await
        .expect("detail never fails");

    // Then: The cached record is returned untouched and nothing is sent
    assert_eq!(detail, cached);
    assert!(client.requests().is_empty());
}

#[tokio::test]
async fn when_host_requests_random_movie_system_returns_sanitized_payload() {
    let body = ok_envelope(json!({
        "movie": { "imdb_code": "tt0816692", "title": "<i>Interstellar</i>" }
    }));
    let client = Arc::new(ScriptedHttpClient::new().ok(MIRROR, &body));
    let provider = YtsProvider::with_http_client(ProviderArgs::new(MIRROR), client.clone())
        .expect("valid args");

    let movie = provider.random().await.expect("random should succeed");

    assert_eq!(movie["movie"]["title"], "Interstellar");
    assert!(client.urls()[0].starts_with("https://yts.example/api/v2/get_random_movie.json?"));
}

#[tokio::test]
async fn when_host_collects_ids_system_uses_imdb_codes_in_order() {
    let body = listing_body(
        2,
        1,
        vec![
            json!({ "imdb_code": "tt0000010", "torrents": [torrent("720p", "A")] }),
            json!({ "imdb_code": "tt0000020", "torrents": [torrent("1080p", "B")] }),
        ],
    );
    let client = Arc::new(ScriptedHttpClient::new().ok(MIRROR, &body));
    let provider =
        YtsProvider::with_http_client(ProviderArgs::new(MIRROR), client).expect("valid args");

    let listing = provider
        .fetch(FilterRequest::new())
        .await
        .expect("listing should succeed");

    assert_eq!(provider.extract_ids(&listing), vec!["tt0000010", "tt0000020"]);
    assert_eq!(provider.config().unique_id, "imdb_id");
}
