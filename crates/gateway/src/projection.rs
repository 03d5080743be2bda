//! Projection of Jikan payloads onto the gateway's simplified shapes.
//!
//! Every nested accessor defaults: a missing `images`, `images.jpg`, `aired`
//! or entity name is treated as absent. Only a missing `mal_id` is fatal,
//! since nothing downstream can address an anime without it.

use crate::api::types::{AnimePayload, ImageSet, MalEntity, PicturePayload};
use crate::error::{GatewayError, Result};
use shared::{AnimeDetail, AnimeSummary, PictureRef, NOT_AVAILABLE};

/// Build the random-discovery summary
pub fn summarize(anime: AnimePayload) -> Result<AnimeSummary> {
    let id = require_id(&anime)?;
    let image = best_image(&anime);

    Ok(AnimeSummary {
        id,
        title: anime.title.unwrap_or_default(),
        title_japanese: anime.title_japanese,
        image,
        media_type: anime.anime_type,
        episodes: anime.episodes,
        score: anime.score,
    })
}

/// Build the expanded detail record
pub fn detail(anime: AnimePayload) -> Result<AnimeDetail> {
    let id = require_id(&anime)?;

    Ok(AnimeDetail {
        id,
        title: anime.title.unwrap_or_default(),
        title_japanese: anime.title_japanese,
        status: anime.status,
        aired: anime.aired.and_then(|aired| aired.string),
        duration: anime.duration,
        rating: anime.rating,
        source: anime.source,
        studios: join_names(&anime.studios),
        genres: join_names(&anime.genres),
        popularity: anime.popularity,
        synopsis: anime.synopsis,
        score: anime.score,
        episodes: anime.episodes,
        media_type: anime.anime_type,
    })
}

/// Map each gallery entry to its large and small jpg URLs
pub fn pictures(entries: Vec<PicturePayload>) -> Vec<PictureRef> {
    entries
        .into_iter()
        .map(|picture| {
            let jpg = picture.jpg.unwrap_or_default();
            PictureRef {
                large: jpg.large_image_url,
                small: jpg.image_url,
            }
        })
        .collect()
}

/// Join entity names with ", " in upstream order, or "N/A" when there are none
pub fn join_names(entities: &[MalEntity]) -> String {
    let names: Vec<&str> = entities
        .iter()
        .filter_map(|entity| entity.name.as_deref())
        .filter(|name| !name.is_empty())
        .collect();

    if names.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        names.join(", ")
    }
}

/// Large jpg, else default jpg, else empty
fn best_image(anime: &AnimePayload) -> String {
    let jpg: Option<&ImageSet> = anime.images.as_ref().and_then(|images| images.jpg.as_ref());

    jpg.and_then(|set| {
        set.large_image_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .or(set.image_url.as_deref())
    })
    .unwrap_or_default()
    .to_string()
}

fn require_id(anime: &AnimePayload) -> Result<u32> {
    anime
        .mal_id
        .ok_or_else(|| GatewayError::MalformedResponse("anime entry has no mal_id".to_string()))
}
