//! Wire models exchanged between the gateway and the explorer client.
//!
//! Field names follow the gateway's JSON contract (camelCase, `type` for the
//! media type). Values missing upstream are carried as `None` and serialized
//! as `null`.

use serde::{Deserialize, Serialize};

/// Placeholder used for joined name lists with no entries
pub const NOT_AVAILABLE: &str = "N/A";

/// Minimal anime record for the random-discovery view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimeSummary {
    pub id: u32,
    pub title: String,
    pub title_japanese: Option<String>,
    /// Best available cover URL, empty when upstream has none
    pub image: String,
    #[serde(rename = "type")]
    pub media_type: Option<String>,
    pub episodes: Option<u32>,
    pub score: Option<f64>,
}

/// Expanded anime record fetched on demand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimeDetail {
    pub id: u32,
    pub title: String,
    pub title_japanese: Option<String>,
    pub status: Option<String>,
    /// Human-readable air date range, e.g. "Apr 5, 2009 to Jul 4, 2010"
    pub aired: Option<String>,
    pub duration: Option<String>,
    pub rating: Option<String>,
    pub source: Option<String>,
    /// Studio names joined with ", ", or "N/A"
    pub studios: String,
    /// Genre names joined with ", ", or "N/A"
    pub genres: String,
    pub popularity: Option<u32>,
    pub synopsis: Option<String>,
    pub score: Option<f64>,
    pub episodes: Option<u32>,
    #[serde(rename = "type")]
    pub media_type: Option<String>,
}

/// One gallery picture
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PictureRef {
    pub large: Option<String>,
    pub small: Option<String>,
}

impl PictureRef {
    /// URL to display: large if present, otherwise small
    pub fn best_url(&self) -> Option<&str> {
        self.large.as_deref().or(self.small.as_deref())
    }
}

/// Liveness response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub message: String,
    /// RFC 3339 UTC timestamp with millisecond precision
    pub timestamp: String,
}

/// Error body returned by the gateway on any upstream failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Short label naming the failed operation
    pub error: String,
    /// Description of the underlying failure
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_summary_wire_names() {
        let summary = AnimeSummary {
            id: 21,
            title: "One Piece".to_string(),
            title_japanese: Some("ONE PIECE".to_string()),
            image: "https://cdn.example/21l.jpg".to_string(),
            media_type: Some("TV".to_string()),
            episodes: None,
            score: Some(8.72),
        };

        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 21,
                "title": "One Piece",
                "titleJapanese": "ONE PIECE",
                "image": "https://cdn.example/21l.jpg",
                "type": "TV",
                "episodes": null,
                "score": 8.72
            })
        );
    }

    #[test]
    fn test_detail_accepts_null_fields() {
        let detail: AnimeDetail = serde_json::from_value(json!({
            "id": 1,
            "title": "Cowboy Bebop",
            "titleJapanese": null,
            "status": null,
            "aired": null,
            "duration": null,
            "rating": null,
            "source": null,
            "studios": "N/A",
            "genres": "N/A",
            "popularity": null,
            "synopsis": null,
            "score": null,
            "episodes": null,
            "type": null
        }))
        .unwrap();

        assert_eq!(detail.studios, NOT_AVAILABLE);
        assert!(detail.media_type.is_none());
    }

    #[test]
    fn test_picture_best_url() {
        let both = PictureRef {
            large: Some("l.jpg".to_string()),
            small: Some("s.jpg".to_string()),
        };
        assert_eq!(both.best_url(), Some("l.jpg"));

        let small_only = PictureRef {
            large: None,
            small: Some("s.jpg".to_string()),
        };
        assert_eq!(small_only.best_url(), Some("s.jpg"));

        let neither = PictureRef {
            large: None,
            small: None,
        };
        assert_eq!(neither.best_url(), None);
    }
}
