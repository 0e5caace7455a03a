//! Video URL recognition
//!
//! YouTube and Vimeo page URLs are rewritten into their embeddable player
//! URLs; any other URL is played by a native video element.

use url::Url;

use crate::model::Embed;

/// Parse a user-typed URL, tolerating a missing scheme
fn parse_loose(raw: &str) -> Option<Url> {
    let raw = raw.trim();
    match Url::parse(raw) {
        Ok(url) if url.has_host() => Some(url),
        _ => Url::parse(&format!("https://{}", raw)).ok(),
    }
}

fn is_youtube_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn host_of(url: &Url) -> Option<String> {
    url.host_str()
        .map(|host| host.trim_start_matches("www.").trim_start_matches("m.").to_ascii_lowercase())
}

/// The video identifier of a YouTube URL
pub fn youtube_id(raw: &str) -> Option<String> {
    let url = parse_loose(raw)?;
    let host = host_of(&url)?;
    let mut segments = url.path_segments()?.filter(|s| !s.is_empty());
    let id = match host.as_str() {
        "youtu.be" => segments.next().map(str::to_string),
        "youtube.com" | "youtube-nocookie.com" => match segments.next() {
            Some("watch") => url
                .query_pairs()
                .find(|(key, _)| key == "v")
                .map(|(_, value)| value.into_owned()),
            Some("embed") | Some("shorts") | Some("live") | Some("v") => {
                segments.next().map(str::to_string)
            }
            _ => None,
        },
        _ => None,
    }?;
    is_youtube_id(&id).then_some(id)
}

/// The numeric video identifier of a Vimeo URL
pub fn vimeo_id(raw: &str) -> Option<String> {
    let url = parse_loose(raw)?;
    let host = host_of(&url)?;
    let segments: Vec<&str> = url.path_segments()?.filter(|s| !s.is_empty()).collect();
    let candidate = match host.as_str() {
        "vimeo.com" => segments.iter().find(|s| s.chars().all(|c| c.is_ascii_digit())),
        "player.vimeo.com" => match segments.as_slice() {
            ["video", id, ..] => Some(id),
            _ => None,
        },
        _ => None,
    }?;
    (!candidate.is_empty() && candidate.chars().all(|c| c.is_ascii_digit()))
        .then(|| candidate.to_string())
}

/// The embeddable player URL for a recognized platform
pub fn embed_url(raw: &str) -> Option<String> {
    if let Some(id) = youtube_id(raw) {
        return Some(format!("https://www.youtube.com/embed/{}", id));
    }
    vimeo_id(raw).map(|id| format!("https://player.vimeo.com/video/{}", id))
}

/// Resolve a video URL into an embed block; blank input yields nothing
pub fn resolve_video(raw: &str, width: u32, height: u32) -> Option<Embed> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let embed = match embed_url(raw) {
        Some(src) => Embed::Frame { src, width, height },
        None => Embed::Video {
            src: raw.to_string(),
        },
    };
    tracing::debug!(src = embed.src(), "resolved video");
    Some(embed)
}
