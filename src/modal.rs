use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

pub const DEFAULT_TITLE: &str = "Project";

pub const EMBED_ALLOW: [&str; 7] = [
    "accelerometer",
    "autoplay",
    "clipboard-write",
    "encrypted-media",
    "gyroscope",
    "picture-in-picture",
    "fullscreen",
];

// The variant is decided once, at open, from the card source alone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Player {
    Embed(EmbedFrame),
    Native(NativePlayer),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmbedFrame {
    pub url: String,
    pub allow: &'static [&'static str],
    pub allow_fullscreen: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NativePlayer {
    pub url: String,
    pub controls: bool,
    pub autoplay: bool,
    pub plays_inline: bool,
}

impl Player {
    pub fn for_source(source: &str) -> Player {
        static EMBED_HOST_RE: Lazy<Regex> =
            Lazy::new(|| Regex::new(r"(?i)youtube|youtu\.be").expect("valid embed host regex"));
        if EMBED_HOST_RE.is_match(source) {
            Player::Embed(EmbedFrame {
                url: embed_url(source),
                allow: &EMBED_ALLOW,
                allow_fullscreen: true,
            })
        } else {
            Player::Native(NativePlayer {
                url: source.to_string(),
                controls: true,
                autoplay: true,
                plays_inline: true,
            })
        }
    }

    pub fn url(&self) -> &str {
        match self {
            Player::Embed(frame) => &frame.url,
            Player::Native(native) => &native.url,
        }
    }

    pub fn is_embed(&self) -> bool {
        matches!(self, Player::Embed(_))
    }
}

// Already-embed sources pass through unchanged, so the rewrite is
// idempotent.
pub fn embed_url(source: &str) -> String {
    if source.contains("embed") {
        return source.to_string();
    }
    if let Some(rewritten) = short_link_embed(source) {
        return rewritten;
    }
    source.replace("watch?v=", "embed/")
}

fn short_link_embed(source: &str) -> Option<String> {
    let parsed = Url::parse(source).ok()?;
    if !parsed.host_str()?.eq_ignore_ascii_case("youtu.be") {
        return None;
    }
    let id = parsed
        .path_segments()?
        .next()
        .filter(|segment| !segment.is_empty())?
        .to_string();
    let mut rewritten = format!("https://www.youtube.com/embed/{id}");
    if let Some(query) = parsed.query() {
        rewritten.push('?');
        rewritten.push_str(query);
    }
    Some(rewritten)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpenModal {
    pub title: String,
    pub player: Player,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SharePayload {
    pub title: String,
    pub url: String,
}

// At most one player exists at a time; opening drops the prior element
// before building the next one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Modal {
    open: Option<OpenModal>,
    hidden: bool,
}

impl Default for Modal {
    fn default() -> Self {
        Modal {
            open: None,
            hidden: true,
        }
    }
}

impl Modal {
    pub fn new() -> Self {
        Modal::default()
    }

    pub fn open(&mut self, source: &str, title: &str) {
        self.open = None;
        let title = title.trim();
        let title = if title.is_empty() {
            DEFAULT_TITLE.to_string()
        } else {
            title.to_string()
        };
        self.open = Some(OpenModal {
            title,
            player: Player::for_source(source),
        });
        self.hidden = false;
    }

    pub fn close(&mut self) {
        self.open = None;
        self.hidden = true;
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn current(&self) -> Option<&OpenModal> {
        self.open.as_ref()
    }

    pub fn title(&self) -> Option<&str> {
        self.open.as_ref().map(|open| open.title.as_str())
    }

    pub fn share(&self, site_url: &str) -> Option<SharePayload> {
        self.open.as_ref().map(|open| SharePayload {
            title: open.title.clone(),
            url: site_url.to_string(),
        })
    }

    // only natively played files expose a download source
    pub fn download_url(&self) -> Option<&str> {
        match &self.open {
            Some(OpenModal {
                player: Player::Native(native),
                ..
            }) => Some(&native.url),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn watch_url_rewrites_to_embed_path() {
        assert_eq!(
            embed_url("https://www.youtube.com/watch?v=abc123"),
            "https://www.youtube.com/embed/abc123"
        );
    }

    #[test]
    fn short_link_rewrites_to_canonical_embed() {
        assert_eq!(
            embed_url("https://youtu.be/abc123"),
            "https://www.youtube.com/embed/abc123"
        );
    }

    #[test]
    fn short_link_keeps_query() {
        assert_eq!(
            embed_url("https://youtu.be/abc123?t=30"),
            "https://www.youtube.com/embed/abc123?t=30"
        );
    }

    #[test]
    fn embed_rewrite_is_idempotent() {
        let sources = [
            "https://www.youtube.com/watch?v=abc123",
            "https://youtu.be/abc123",
            "https://www.youtube.com/embed/abc123",
            "https://cdn.example.com/clip.mp4",
        ];
        for source in sources {
            let once = embed_url(source);
            assert_eq!(embed_url(&once), once, "rewriting {source} twice drifted");
        }
    }

    #[test]
    fn classification_is_case_insensitive() {
        assert!(Player::for_source("https://WWW.YOUTUBE.COM/watch?v=x").is_embed());
        assert!(Player::for_source("https://YouTu.Be/x").is_embed());
        assert!(!Player::for_source("https://cdn.example.com/x.mp4").is_embed());
    }

    #[test]
    fn short_link_opens_as_embed() {
        let mut modal = Modal::new();
        modal.open("https://youtu.be/abc123", "Demo");
        let open = modal.current().unwrap();
        assert_eq!(open.title, "Demo");
        match &open.player {
            Player::Embed(frame) => {
                assert!(frame.url.ends_with("embed/abc123"));
                assert!(frame.allow_fullscreen);
                assert_eq!(frame.allow, &EMBED_ALLOW);
            }
            other => panic!("expected embed player, got {other:?}"),
        }
    }

    #[test]
    fn direct_file_opens_native_with_default_title() {
        let mut modal = Modal::new();
        modal.open("https://cdn.example.com/v.mp4", "");
        let open = modal.current().unwrap();
        assert_eq!(open.title, DEFAULT_TITLE);
        match &open.player {
            Player::Native(native) => {
                assert_eq!(native.url, "https://cdn.example.com/v.mp4");
                assert!(native.controls && native.autoplay && native.plays_inline);
            }
            other => panic!("expected native player, got {other:?}"),
        }
    }

    #[test]
    fn blank_title_falls_back_to_default() {
        let mut modal = Modal::new();
        modal.open("https://cdn.example.com/v.mp4", "   ");
        assert_eq!(modal.title(), Some(DEFAULT_TITLE));
    }

    #[test]
    fn reopening_replaces_previous_player() {
        let mut modal = Modal::new();
        modal.open("https://www.youtube.com/watch?v=first", "First");
        modal.open("https://cdn.example.com/second.mp4", "Second");
        let open = modal.current().unwrap();
        assert_eq!(open.title, "Second");
        assert_eq!(open.player.url(), "https://cdn.example.com/second.mp4");
        assert!(!open.player.is_embed());
    }

    #[test]
    fn closing_a_closed_modal_is_a_noop() {
        let mut modal = Modal::new();
        let before = modal.clone();
        modal.close();
        assert_eq!(modal, before);
        modal.open("https://youtu.be/x", "X");
        modal.close();
        modal.close();
        assert_eq!(modal, before);
    }

    #[test]
    fn hidden_flag_tracks_open_state() {
        let mut modal = Modal::new();
        assert!(modal.is_hidden());
        modal.open("https://youtu.be/x", "X");
        assert!(!modal.is_hidden());
        modal.close();
        assert!(modal.is_hidden());
    }

    #[test]
    fn share_reports_title_and_site_url() {
        let mut modal = Modal::new();
        assert_eq!(modal.share("https://studio.example"), None);
        modal.open("https://youtu.be/x", "Showcase");
        let payload = modal.share("https://studio.example").unwrap();
        assert_eq!(payload.title, "Showcase");
        assert_eq!(payload.url, "https://studio.example");
    }

    #[test]
    fn download_is_native_only() {
        let mut modal = Modal::new();
        assert_eq!(modal.download_url(), None);
        modal.open("https://cdn.example.com/v.mp4", "Clip");
        assert_eq!(modal.download_url(), Some("https://cdn.example.com/v.mp4"));
        modal.open("https://youtu.be/x", "Embed");
        assert_eq!(modal.download_url(), None);
    }
}
