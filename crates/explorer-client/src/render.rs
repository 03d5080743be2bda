//! Plain-text rendering of explorer state.

use crate::backend::GatewayApi;
use crate::session::{ExplorerSession, Phase};
use shared::{AnimeDetail, AnimeSummary, PictureRef, NOT_AVAILABLE};
use std::fmt::Display;
use std::fmt::Write;

fn or_na<T: Display>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Loading line shown while a fetch is in flight
pub fn loading_message(phase: Phase) -> Option<&'static str> {
    match phase {
        Phase::FetchingSummary => Some("Summoning a random anime..."),
        Phase::FetchingDetail => Some("Loading details and gallery..."),
        _ => None,
    }
}

pub fn render_error(message: &str) -> String {
    format!("!! Error\n   {}\n", message)
}

pub fn render_summary(summary: &AnimeSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", summary.title);
    if let Some(native) = &summary.title_japanese {
        let _ = writeln!(out, "   {}", native);
    }
    let _ = writeln!(
        out,
        "   Score: {}   Type: {}   Episodes: {}",
        or_na(summary.score),
        or_na(summary.media_type.as_deref()),
        or_na(summary.episodes)
    );
    if !summary.image.is_empty() {
        let _ = writeln!(out, "   Cover: {}", summary.image);
    }
    let _ = writeln!(out, "   MAL ID: {}", summary.id);
    out
}

pub fn render_detail(detail: &AnimeDetail) -> String {
    let rows = [
        ("Status", or_na(detail.status.as_deref())),
        ("Aired", or_na(detail.aired.as_deref())),
        ("Duration", or_na(detail.duration.as_deref())),
        ("Rating", or_na(detail.rating.as_deref())),
        ("Source", or_na(detail.source.as_deref())),
        ("Studios", detail.studios.clone()),
        ("Genres", detail.genres.clone()),
        ("Popularity", or_na(detail.popularity.map(|rank| format!("#{}", rank)))),
    ];

    let mut out = String::new();
    let _ = writeln!(out, "-- Details --");
    for (label, value) in rows {
        let _ = writeln!(out, "   {:<11}{}", label, value);
    }
    if let Some(synopsis) = &detail.synopsis {
        let _ = writeln!(out, "\n   Synopsis\n   {}", synopsis);
    }
    out
}

pub fn render_gallery(pictures: &[PictureRef]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "-- Gallery ({} Images) --", pictures.len());
    for (index, picture) in pictures.iter().enumerate() {
        let _ = writeln!(
            out,
            "   Image {}: {}",
            index + 1,
            picture.best_url().unwrap_or(NOT_AVAILABLE)
        );
    }
    out
}

/// Everything the session currently holds, error banner first
pub fn render_session<G: GatewayApi>(session: &ExplorerSession<G>) -> String {
    let mut out = String::new();

    if let Some(message) = session.error() {
        out.push_str(&render_error(message));
    }
    if let Some(summary) = session.summary() {
        out.push_str(&render_summary(summary));
    }
    if let Some(detail) = session.detail() {
        out.push_str(&render_detail(detail));
    }
    if !session.pictures().is_empty() {
        out.push_str(&render_gallery(session.pictures()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> AnimeSummary {
        AnimeSummary {
            id: 5114,
            title: "Fullmetal Alchemist: Brotherhood".to_string(),
            title_japanese: None,
            image: String::new(),
            media_type: Some("TV".to_string()),
            episodes: Some(64),
            score: None,
        }
    }

    #[test]
    fn test_summary_marks_missing_values() {
        let text = render_summary(&summary());
        assert!(text.contains("== Fullmetal Alchemist: Brotherhood =="));
        assert!(text.contains("Score: N/A"));
        assert!(text.contains("Episodes: 64"));
        assert!(!text.contains("Cover:"));
    }

    #[test]
    fn test_detail_rows() {
        let detail = AnimeDetail {
            id: 5114,
            title: "Fullmetal Alchemist: Brotherhood".to_string(),
            title_japanese: None,
            status: Some("Finished Airing".to_string()),
            aired: None,
            duration: None,
            rating: None,
            source: Some("Manga".to_string()),
            studios: "Bones".to_string(),
            genres: "N/A".to_string(),
            popularity: Some(3),
            synopsis: None,
            score: Some(9.1),
            episodes: Some(64),
            media_type: Some("TV".to_string()),
        };

        let text = render_detail(&detail);
        assert!(text.contains("Studios    Bones"));
        assert!(text.contains("Aired      N/A"));
        assert!(text.contains("Popularity #3"));
        assert!(!text.contains("Synopsis"));
    }

    #[test]
    fn test_gallery_prefers_large() {
        let pictures = vec![
            PictureRef {
                large: Some("l.jpg".to_string()),
                small: Some("s.jpg".to_string()),
            },
            PictureRef {
                large: None,
                small: Some("s2.jpg".to_string()),
            },
        ];

        let text = render_gallery(&pictures);
        assert!(text.contains("(2 Images)"));
        assert!(text.contains("Image 1: l.jpg"));
        assert!(text.contains("Image 2: s2.jpg"));
    }

    #[test]
    fn test_loading_messages() {
        assert!(loading_message(Phase::FetchingSummary).is_some());
        assert!(loading_message(Phase::FetchingDetail).is_some());
        assert!(loading_message(Phase::SummaryReady).is_none());
    }
}
