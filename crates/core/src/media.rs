// Hero media sources

use serde::{Deserialize, Serialize};

/// Player flags for embedded YouTube clips: muted background loop, no chrome.
const EMBED_PARAMS: &str =
    "autoplay=1&mute=1&loop=1&controls=0&showinfo=0&rel=0&disablekb=1&modestbranding=1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    #[default]
    Video,
    Image,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaSource {
    #[serde(default)]
    pub kind: MediaKind,
    pub src: String,
    #[serde(default)]
    pub poster: Option<String>,
}

/// What the renderer should actually mount for a media source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaElement {
    YouTubeEmbed { url: String },
    Video { src: String, poster: Option<String> },
    Image { src: String },
}

impl MediaSource {
    pub fn video(src: impl Into<String>) -> Self {
        Self { kind: MediaKind::Video, src: src.into(), poster: None }
    }

    pub fn image(src: impl Into<String>) -> Self {
        Self { kind: MediaKind::Image, src: src.into(), poster: None }
    }

    pub fn element(&self) -> MediaElement {
        match self.kind {
            MediaKind::Image => MediaElement::Image { src: self.src.clone() },
            MediaKind::Video => match youtube_embed_url(&self.src) {
                Some(url) => MediaElement::YouTubeEmbed { url },
                None => MediaElement::Video {
                    src: self.src.clone(),
                    poster: self.poster.clone(),
                },
            },
        }
    }
}

/// Turn a YouTube link into an autoplaying, muted, looping embed URL.
///
/// Returns `None` for anything that is not a youtube.com link. Embed links
/// get the player flags appended; watch links are rewritten to the embed
/// path and get a single-item playlist so `loop=1` takes effect.
pub fn youtube_embed_url(src: &str) -> Option<String> {
    if !src.contains("youtube.com") {
        return None;
    }
    if src.contains("embed") {
        let sep = if src.contains('?') { '&' } else { '?' };
        return Some(format!("{}{}{}", src, sep, EMBED_PARAMS));
    }
    let video_id = src.split("v=").nth(1).unwrap_or_default();
    Some(format!(
        "{}?{}&playlist={}",
        src.replace("watch?v=", "embed/"),
        EMBED_PARAMS,
        video_id
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watch_url_rewritten() {
        let url = youtube_embed_url("https://www.youtube.com/watch?v=abc123").unwrap();
        assert!(url.starts_with("https://www.youtube.com/embed/abc123?autoplay=1"));
        assert!(url.ends_with("&playlist=abc123"));
    }

    #[test]
    fn test_embed_url_gets_params_appended() {
        let url = youtube_embed_url("https://www.youtube.com/embed/xyz").unwrap();
        assert_eq!(url, format!("https://www.youtube.com/embed/xyz?{}", EMBED_PARAMS));

        let url = youtube_embed_url("https://www.youtube.com/embed/xyz?start=4").unwrap();
        assert!(url.contains("?start=4&autoplay=1"));
    }

    #[test]
    fn test_non_youtube_is_plain_video() {
        assert!(youtube_embed_url("https://cdn.example.com/field.mp4").is_none());
        let media = MediaSource {
            kind: MediaKind::Video,
            src: "https://cdn.example.com/field.mp4".into(),
            poster: Some("poster.jpg".into()),
        };
        assert_eq!(
            media.element(),
            MediaElement::Video {
                src: "https://cdn.example.com/field.mp4".into(),
                poster: Some("poster.jpg".into()),
            }
        );
    }

    #[test]
    fn test_image_kind_ignores_youtube() {
        let media = MediaSource::image("https://www.youtube.com/watch?v=abc");
        assert!(matches!(media.element(), MediaElement::Image { .. }));
    }
}
