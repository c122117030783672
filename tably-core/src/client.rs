//! Blocking HTTP clients for the two external collaborators: the room
//! persistence service and the meal suggestion source.
//!
//! Both are consumed as opaque providers. Submission failures surface a
//! classified error and are never retried automatically; suggestion failures
//! are recovered by the caller with the built-in fallback lists.

use crate::errors::{Result, TablyError};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

pub const DEFAULT_API_BASE: &str = "https://api.tably.app/";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ============================================================================
// Persistence service
// ============================================================================

#[derive(Debug, Serialize)]
struct CreateRoomRequest<'a> {
    title: &'a str,
    timer_minutes: u16,
}

/// The created resource as returned by the backend
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedRoom {
    pub room_id: String,
    pub share_code: String,
}

pub struct RoomService {
    base: Url,
    client: reqwest::blocking::Client,
}

impl RoomService {
    pub fn new(base: &str) -> Result<Self> {
        Ok(Self {
            base: Url::parse(base)?,
            client: reqwest::blocking::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()?,
        })
    }

    /// Submit a finished configuration. Consumed only from the summary step.
    pub fn create_room(&self, title: &str, timer_minutes: u16) -> Result<CreatedRoom> {
        let url = self.base.join("rooms")?;
        debug!("POST {} (title={:?})", url, title);
        let response = self
            .client
            .post(url)
            .json(&CreateRoomRequest { title, timer_minutes })
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().unwrap_or_default();
            return Err(TablyError::Backend {
                status: status.as_u16(),
                message,
            });
        }
        let room: CreatedRoom = response.json()?;
        info!("🏠 Room created: {} (code {})", room.room_id, room.share_code);
        Ok(room)
    }
}

// ============================================================================
// Suggestion source
// ============================================================================

/// Suggestion buckets; mirrors the fallback table in [`crate::suggestions`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SuggestionCategory {
    General,
    Morning,
    Evening,
    Cooking,
    DineOut,
}

impl SuggestionCategory {
    pub fn all() -> &'static [SuggestionCategory] {
        &[
            SuggestionCategory::General,
            SuggestionCategory::Morning,
            SuggestionCategory::Evening,
            SuggestionCategory::Cooking,
            SuggestionCategory::DineOut,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SuggestionCategory::General => "general",
            SuggestionCategory::Morning => "morning",
            SuggestionCategory::Evening => "evening",
            SuggestionCategory::Cooking => "cooking",
            SuggestionCategory::DineOut => "dine-out",
        }
    }

    pub fn from_str_loose(s: &str) -> Option<SuggestionCategory> {
        Self::all()
            .iter()
            .copied()
            .find(|c| c.as_str() == s.trim().to_lowercase())
    }
}

#[derive(Debug, Deserialize)]
struct SuggestionsResponse {
    suggestions: Vec<String>,
}

pub struct SuggestionSource {
    base: Url,
    client: reqwest::blocking::Client,
}

impl SuggestionSource {
    pub fn new(base: &str) -> Result<Self> {
        Ok(Self {
            base: Url::parse(base)?,
            client: reqwest::blocking::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()?,
        })
    }

    /// Fetch the suggestion list for one category. Callers substitute
    /// [`crate::suggestions::fallback_for`] on any error so the UI never
    /// blocks on this provider.
    pub fn fetch(&self, category: SuggestionCategory) -> Result<Vec<String>> {
        let mut url = self.base.join("suggestions")?;
        url.query_pairs_mut().append_pair("category", category.as_str());
        debug!("GET {}", url);
        let response = self.client.get(url).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(TablyError::Backend {
                status: status.as_u16(),
                message: response.text().unwrap_or_default(),
            });
        }
        let body: SuggestionsResponse = response.json()?;
        Ok(body.suggestions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::Method::{GET, POST};
    use httpmock::MockServer;

    #[test]
    fn create_room_parses_the_created_resource() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/rooms")
                .json_body(serde_json::json!({
                    "title": "Friday Dinner",
                    "timer_minutes": 30,
                }));
            then.status(201).json_body(serde_json::json!({
                "room_id": "r-1138",
                "share_code": "TABLY-9QK4",
            }));
        });

        let service = RoomService::new(&server.base_url()).unwrap();
        let room = service.create_room("Friday Dinner", 30).unwrap();
        mock.assert();
        assert_eq!(
            room,
            CreatedRoom {
                room_id: "r-1138".to_string(),
                share_code: "TABLY-9QK4".to_string(),
            }
        );
    }

    #[test]
    fn create_room_surfaces_backend_failures() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/rooms");
            then.status(503).body("maintenance");
        });

        let service = RoomService::new(&server.base_url()).unwrap();
        let err = service.create_room("Dinner", 30).unwrap_err();
        match err {
            TablyError::Backend { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "maintenance");
            }
            other => panic!("expected backend error, got {:?}", other),
        }
    }

    #[test]
    fn fetch_suggestions_by_category() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/suggestions")
                .query_param("category", "evening");
            then.status(200).json_body(serde_json::json!({
                "suggestions": ["ramen", "tacos"],
            }));
        });

        let source = SuggestionSource::new(&server.base_url()).unwrap();
        let list = source.fetch(SuggestionCategory::Evening).unwrap();
        mock.assert();
        assert_eq!(list, vec!["ramen".to_string(), "tacos".to_string()]);
    }

    #[test]
    fn suggestion_failure_is_an_error_for_the_caller_to_recover() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/suggestions");
            then.status(500);
        });

        let source = SuggestionSource::new(&server.base_url()).unwrap();
        assert!(source.fetch(SuggestionCategory::General).is_err());
    }

    #[test]
    fn category_names_round_trip() {
        for category in SuggestionCategory::all() {
            assert_eq!(
                SuggestionCategory::from_str_loose(category.as_str()),
                Some(*category)
            );
        }
        assert_eq!(SuggestionCategory::from_str_loose("brunch"), None);
    }
}
