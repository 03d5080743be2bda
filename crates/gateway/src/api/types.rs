//! Jikan API v4 response types.
//!
//! Jikan omits or nulls fields freely, so every field below the `data`
//! envelope is optional or defaulted. Only the envelope itself is required.

use serde::{Deserialize, Serialize};

/// Single-object envelope (`{"data": {...}}`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub data: Option<T>,
}

/// List envelope (`{"data": [...]}`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub data: Option<Vec<T>>,
}

/// Anime entry as returned by `/random/anime` and `/anime/{id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimePayload {
    pub mal_id: Option<u32>,
    pub images: Option<AnimeImages>,

    // Titles
    pub title: Option<String>,
    pub title_japanese: Option<String>,

    // Type and status
    #[serde(rename = "type")]
    pub anime_type: Option<String>,
    pub source: Option<String>,
    pub episodes: Option<u32>,
    pub status: Option<String>,

    // Dates
    pub aired: Option<Aired>,
    pub duration: Option<String>,
    pub rating: Option<String>,

    // Scores and rankings
    pub score: Option<f64>,
    pub popularity: Option<u32>,

    pub synopsis: Option<String>,

    // Studios and genres; null is treated as empty
    #[serde(deserialize_with = "null_as_empty")]
    pub studios: Vec<MalEntity>,
    #[serde(deserialize_with = "null_as_empty")]
    pub genres: Vec<MalEntity>,
}

/// Anime images
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimeImages {
    pub jpg: Option<ImageSet>,
    pub webp: Option<ImageSet>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageSet {
    pub image_url: Option<String>,
    pub small_image_url: Option<String>,
    pub large_image_url: Option<String>,
}

/// Aired dates; only the prose rendering is projected
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Aired {
    pub from: Option<String>,
    pub to: Option<String>,
    pub string: Option<String>,
}

/// MAL entity (genre, studio, producer, etc.)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MalEntity {
    pub mal_id: Option<u32>,
    #[serde(rename = "type")]
    pub entity_type: Option<String>,
    pub name: Option<String>,
    pub url: Option<String>,
}

/// Entry of `/anime/{id}/pictures`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PicturePayload {
    pub jpg: Option<ImageSet>,
    pub webp: Option<ImageSet>,
}

/// Error response from Jikan API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JikanError {
    pub status: Option<u16>,
    #[serde(rename = "type")]
    pub error_type: Option<String>,
    pub message: Option<String>,
    pub error: Option<String>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sparse_anime_payload() {
        let response: DataResponse<AnimePayload> = serde_json::from_value(json!({
            "data": { "mal_id": 42 }
        }))
        .unwrap();

        let anime = response.data.unwrap();
        assert_eq!(anime.mal_id, Some(42));
        assert!(anime.images.is_none());
        assert!(anime.aired.is_none());
        assert!(anime.studios.is_empty());
    }

    #[test]
    fn test_null_collections_and_nested_objects() {
        let anime: AnimePayload = serde_json::from_value(json!({
            "mal_id": 7,
            "images": { "jpg": null },
            "aired": null,
            "studios": null,
            "genres": [{ "name": "Action" }, {}]
        }))
        .unwrap();

        assert!(anime.images.unwrap().jpg.is_none());
        assert!(anime.studios.is_empty());
        assert_eq!(anime.genres.len(), 2);
        assert!(anime.genres[1].name.is_none());
    }

    #[test]
    fn test_missing_envelope_is_none() {
        let response: ListResponse<PicturePayload> =
            serde_json::from_value(json!({ "pagination": {} })).unwrap();
        assert!(response.data.is_none());
    }

    #[test]
    fn test_jikan_error_body() {
        let error: JikanError = serde_json::from_value(json!({
            "status": 404,
            "type": "BadResponseException",
            "message": "Resource does not exist",
            "error": "404 on https://myanimelist.net/anime/0/"
        }))
        .unwrap();

        assert_eq!(error.status, Some(404));
        assert_eq!(error.message.as_deref(), Some("Resource does not exist"));
    }
}
