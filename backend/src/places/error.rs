use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlacesError {
    #[error("Places API request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Place not found: {place_id}")]
    NotFound { place_id: String },

    #[error("Invalid Places API request: {message}")]
    InvalidRequest { message: String },

    #[error("Places API returned status {status}: {message}")]
    Status { status: String, message: String },

    #[error("Unexpected Places API response: {message}")]
    Decode { message: String },

    #[error("Places client configuration error: {message}")]
    Configuration { message: String },
}

impl PlacesError {
    /// Map a non-`OK` response status to an error.
    pub fn from_status(status: &str, place_id: &str, message: Option<String>) -> Self {
        let message = message.unwrap_or_else(|| status.to_string());
        match status {
            "NOT_FOUND" | "ZERO_RESULTS" => PlacesError::NotFound {
                place_id: place_id.to_string(),
            },
            "INVALID_REQUEST" => PlacesError::InvalidRequest { message },
            _ => PlacesError::Status {
                status: status.to_string(),
                message,
            },
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        PlacesError::Decode {
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, PlacesError::NotFound { .. })
    }
}

pub type PlacesResult<T> = std::result::Result<T, PlacesError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_mapping() {
        assert!(PlacesError::from_status("NOT_FOUND", "abc", None).is_not_found());
        assert!(matches!(
            PlacesError::from_status("INVALID_REQUEST", "abc", Some("bad id".into())),
            PlacesError::InvalidRequest { message } if message == "bad id"
        ));

        let err = PlacesError::from_status("REQUEST_DENIED", "abc", None);
        assert_eq!(
            err.to_string(),
            "Places API returned status REQUEST_DENIED: REQUEST_DENIED"
        );
    }
}
