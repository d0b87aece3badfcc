#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use serde_json::{json, Value};
use shiori_rust::api::NewItinerary;
use shiori_rust::db::{FullRepository, LocalRepository};
use shiori_rust::http::AppState;
use shiori_rust::places::{GooglePlacesClient, PlacesClient, PlacesConfig};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// Variables are restored on unwind, and access is serialized because the
/// environment is shared by every test thread.
///
/// `changes` is a list of `(key, value)` pairs; `None` removes the variable.
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn kyoto_trip(email: &str) -> NewItinerary {
    NewItinerary::new("京都旅行", date(2024, 9, 5), date(2024, 9, 7), email)
}

/// Details `result` for a well-known temple.
pub fn kinkakuji_result() -> Value {
    json!({
        "name": "金閣寺",
        "formatted_address": "日本、〒603-8361 京都府京都市北区金閣寺町１",
        "geometry": { "location": { "lat": 35.0393744, "lng": 135.7292213 } },
        "place_id": "ChIJvUbrwCCoAWARX2QiHCsn5A4",
        "types": ["tourist_attraction", "place_of_worship", "point_of_interest"],
        "photos": [
            { "photo_reference": "kinkaku-photo-1", "width": 4032, "height": 3024 },
            { "photo_reference": "kinkaku-photo-2", "width": 1024, "height": 768 }
        ]
    })
}

pub fn ok_envelope(result: Value) -> Value {
    json!({ "html_attributions": [], "result": result, "status": "OK" })
}

pub fn places_client(base_url: &str) -> Arc<dyn PlacesClient> {
    let client = GooglePlacesClient::new(PlacesConfig::with_base_url(base_url, "test-key"))
        .expect("client builds");
    Arc::new(client)
}

/// App state over a fresh local repository; the repository handle is
/// returned too so tests can inspect what was stored.
pub fn local_state(places_base_url: &str) -> (AppState, LocalRepository) {
    let repo = LocalRepository::new();
    let shared = Arc::new(repo.clone()) as Arc<dyn FullRepository>;
    (AppState::new(shared, places_client(places_base_url)), repo)
}
