//! ItineraryStore against a live server on an ephemeral port.

mod support;

use shiori_rust::api::WeekdayLocale;
use shiori_rust::client::{ItineraryStore, StoreError};
use shiori_rust::db::LocalRepository;
use shiori_rust::http::create_router;

async fn spawn_server() -> (String, LocalRepository) {
    let (state, repo) = support::local_state("http://127.0.0.1:1");
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}", addr), repo)
}

async fn spawn_prefixed_server(prefix: &str) -> String {
    let (state, _repo) = support::local_state("http://127.0.0.1:1");
    let app = axum::Router::new().nest(prefix, create_router(state));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}{}", addr, prefix)
}

#[tokio::test]
async fn test_base_url_with_path_prefix() {
    let base_url = spawn_prefixed_server("/shiori").await;
    let mut store = ItineraryStore::new(&base_url).unwrap();

    let id = store
        .add_itinerary(support::kyoto_trip("a@example.jp"))
        .await
        .unwrap();

    let mut fresh = ItineraryStore::new(&format!("{}/", base_url)).unwrap();
    fresh.fetch_itineraries().await.unwrap();
    assert_eq!(fresh.itineraries().len(), 1);

    fresh.remove_itinerary(id).await.unwrap();
    assert!(fresh.itineraries().is_empty());
}

#[tokio::test]
async fn test_add_fetch_and_remove() {
    let (base_url, repo) = spawn_server().await;
    let mut store = ItineraryStore::new(&base_url).unwrap();

    let id = store
        .add_itinerary(support::kyoto_trip("hanako@example.jp"))
        .await
        .unwrap();
    assert_eq!(store.itineraries().len(), 1);
    assert_eq!(store.title(id), Some("京都旅行"));
    assert_eq!(repo.itinerary_count(), 1);

    let days = store.generate_date_list(id, WeekdayLocale::Ja);
    let names: Vec<_> = days.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["Day1", "Day2", "Day3"]);

    let mut fresh = ItineraryStore::new(&base_url).unwrap();
    fresh.fetch_itineraries().await.unwrap();
    assert_eq!(fresh.itineraries(), store.itineraries());

    store.remove_itinerary(id).await.unwrap();
    assert!(store.itineraries().is_empty());
    assert_eq!(repo.itinerary_count(), 0);
}

#[tokio::test]
async fn test_fetch_by_user() {
    let (base_url, _repo) = spawn_server().await;
    let mut store = ItineraryStore::new(&base_url).unwrap();
    store
        .add_itinerary(support::kyoto_trip("a@example.jp"))
        .await
        .unwrap();
    store
        .add_itinerary(support::kyoto_trip("b+trip@example.jp"))
        .await
        .unwrap();

    store.fetch_itineraries_by_user("b+trip@example.jp").await.unwrap();
    assert_eq!(store.itineraries().len(), 1);
    assert_eq!(store.itineraries()[0].user_email, "b+trip@example.jp");
}

#[tokio::test]
async fn test_server_rejection_leaves_state_unchanged() {
    let (base_url, repo) = spawn_server().await;
    let mut store = ItineraryStore::new(&base_url).unwrap();
    let id = store
        .add_itinerary(support::kyoto_trip("a@example.jp"))
        .await
        .unwrap();

    let reversed = shiori_rust::api::NewItinerary::new(
        "bad",
        support::date(2024, 9, 9),
        support::date(2024, 9, 1),
        "a@example.jp",
    );
    let err = store.add_itinerary(reversed).await.unwrap_err();
    assert!(matches!(err, StoreError::Status { status: 400, .. }));
    assert_eq!(store.itineraries().len(), 1);

    repo.clear();
    let err = store.remove_itinerary(id).await.unwrap_err();
    assert!(matches!(err, StoreError::Status { status: 404, .. }));
    assert_eq!(store.itineraries().len(), 1);
}
