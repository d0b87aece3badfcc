//! Client-side itinerary state.
//!
//! [`ItineraryStore`] keeps the itineraries a frontend has loaded and keeps
//! them in sync with the HTTP API. A failed call is logged and leaves the
//! cached list untouched.

pub mod error;

pub use error::{StoreError, StoreResult};

use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use tracing::{error, warn};

use crate::api::{
    CreateItineraryResponse, DayEntry, Itinerary, ItineraryId, NewItinerary, WeekdayLocale,
};
use crate::services::generate_date_list;

#[derive(Debug, Clone)]
pub struct ItineraryStore {
    base_url: Url,
    http: Client,
    itineraries: Vec<Itinerary>,
}

impl ItineraryStore {
    pub fn new(base_url: &str) -> StoreResult<Self> {
        Self::with_client(base_url, Client::new())
    }

    pub fn with_client(base_url: &str, http: Client) -> StoreResult<Self> {
        // A trailing slash keeps any path prefix when endpoints are joined.
        let base_url = Url::parse(&format!("{}/", base_url.trim_end_matches('/')))
            .map_err(|e| StoreError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        Ok(Self {
            base_url,
            http,
            itineraries: Vec::new(),
        })
    }

    pub fn itineraries(&self) -> &[Itinerary] {
        &self.itineraries
    }

    fn endpoint(&self, path: &str) -> StoreResult<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| StoreError::InvalidUrl(format!("{}: {}", path, e)))
    }

    /// Replace the cached list with every itinerary on the server.
    pub async fn fetch_itineraries(&mut self) -> StoreResult<()> {
        let url = self.endpoint("/api/itineraries")?;
        let result = send(self.http.get(url)).await;
        self.itineraries = logged(result, "Error fetching itineraries")?;
        Ok(())
    }

    /// Replace the cached list with the itineraries owned by `user_email`.
    pub async fn fetch_itineraries_by_user(&mut self, user_email: &str) -> StoreResult<()> {
        let url = self.endpoint("/api/itineraries/byUser")?;
        let result = send(self.http.get(url).query(&[("userEmail", user_email)])).await;
        self.itineraries = logged(result, "Error fetching itineraries")?;
        Ok(())
    }

    /// Create an itinerary on the server and cache it under the returned id.
    pub async fn add_itinerary(&mut self, itinerary: NewItinerary) -> StoreResult<ItineraryId> {
        let url = self.endpoint("/api/itineraries")?;
        let result: StoreResult<CreateItineraryResponse> =
            send(self.http.post(url).json(&itinerary)).await;
        let created = logged(result, "Error adding itinerary")?;

        self.itineraries.push(itinerary.with_id(created.itinerary_id));
        Ok(created.itinerary_id)
    }

    /// Delete an itinerary on the server and drop it from the cache.
    pub async fn remove_itinerary(&mut self, itinerary_id: ItineraryId) -> StoreResult<()> {
        let url = self.endpoint(&format!("/api/itineraries/{}", itinerary_id))?;
        let result = match self.http.delete(url).send().await {
            Ok(response) => check_status(response).await.map(|_| ()),
            Err(e) => Err(e.into()),
        };
        logged(result, "Error deleting itinerary")?;

        self.itineraries.retain(|it| it.itinerary_id != itinerary_id);
        Ok(())
    }

    fn find(&self, itinerary_id: ItineraryId) -> Option<&Itinerary> {
        let found = self
            .itineraries
            .iter()
            .find(|it| it.itinerary_id == itinerary_id);
        if found.is_none() {
            warn!("Itinerary with id {} not found", itinerary_id);
        }
        found
    }

    /// Date list of a cached itinerary; empty when it is not cached.
    pub fn generate_date_list(
        &self,
        itinerary_id: ItineraryId,
        locale: WeekdayLocale,
    ) -> Vec<DayEntry> {
        self.find(itinerary_id)
            .map(|it| generate_date_list(it.start_date, it.end_date, locale))
            .unwrap_or_default()
    }

    pub fn title(&self, itinerary_id: ItineraryId) -> Option<&str> {
        self.find(itinerary_id).map(|it| it.title.as_str())
    }
}

async fn check_status(response: Response) -> StoreResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(StoreError::Status {
        status: status.as_u16(),
        body,
    })
}

async fn send<T: DeserializeOwned>(request: RequestBuilder) -> StoreResult<T> {
    let response = check_status(request.send().await?).await?;
    Ok(response.json().await?)
}

fn logged<T>(result: StoreResult<T>, what: &str) -> StoreResult<T> {
    if let Err(e) = &result {
        error!("{}: {}", what, e);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn cached_store() -> ItineraryStore {
        let mut store = ItineraryStore::new("http://127.0.0.1:1/").unwrap();
        store.itineraries.push(
            NewItinerary::new(
                "北海道",
                NaiveDate::from_ymd_opt(2024, 9, 5).unwrap(),
                NaiveDate::from_ymd_opt(2024, 9, 6).unwrap(),
                "a@example.jp",
            )
            .with_id(ItineraryId::new(7)),
        );
        store
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        assert!(matches!(
            ItineraryStore::new("not a url"),
            Err(StoreError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_title_and_date_list_from_cache() {
        let store = cached_store();
        assert_eq!(store.title(ItineraryId::new(7)), Some("北海道"));
        assert_eq!(store.title(ItineraryId::new(8)), None);

        let days = store.generate_date_list(ItineraryId::new(7), WeekdayLocale::Ja);
        assert_eq!(days.len(), 2);
        assert_eq!(days[1].display_date, "9/6 金");
        assert!(store
            .generate_date_list(ItineraryId::new(8), WeekdayLocale::Ja)
            .is_empty());
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let store = ItineraryStore::new("http://host:8080/shiori").unwrap();
        assert_eq!(
            store.endpoint("/api/itineraries").unwrap().as_str(),
            "http://host:8080/shiori/api/itineraries"
        );

        let store = ItineraryStore::new("http://host:8080/shiori/").unwrap();
        assert_eq!(
            store.endpoint("/api/itineraries/3").unwrap().as_str(),
            "http://host:8080/shiori/api/itineraries/3"
        );

        let store = ItineraryStore::new("http://host:8080").unwrap();
        assert_eq!(
            store.endpoint("/api/itineraries").unwrap().as_str(),
            "http://host:8080/api/itineraries"
        );
    }

    #[tokio::test]
    async fn test_transport_failure_keeps_state() {
        let mut store = cached_store();
        let err = store.fetch_itineraries().await.unwrap_err();
        assert!(matches!(err, StoreError::Transport(_)));
        assert_eq!(store.itineraries().len(), 1);
    }
}
