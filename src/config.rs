use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const DEFAULT_ENV_PREFIX: &str = "REEL";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub endpoint: EndpointConfig,
    #[serde(default)]
    pub gallery: GalleryConfig,
    #[serde(default)]
    pub ui: UIConfig,
    #[serde(default)]
    pub player: PlayerConfig,
    #[serde(default)]
    pub download: DownloadConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EndpointConfig {
    // empty submit_url disables submissions
    #[serde(default)]
    pub submit_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_endpoint_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            submit_url: String::new(),
            user_agent: default_user_agent(),
            timeout: default_endpoint_timeout(),
        }
    }
}

fn default_user_agent() -> String {
    "reel-tui/0.1 (+https://github.com/editkaro/reel-tui)".to_string()
}

fn default_endpoint_timeout() -> Duration {
    Duration::from_secs(10)
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GalleryConfig {
    #[serde(default)]
    pub manifest: Option<PathBuf>,
    #[serde(default = "default_site_url")]
    pub site_url: String,
    #[serde(default = "default_status_ttl", with = "humantime_serde")]
    pub status_ttl: Duration,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            manifest: None,
            site_url: default_site_url(),
            status_ttl: default_status_ttl(),
        }
    }
}

fn default_site_url() -> String {
    "https://editkaro.in/portfolio".to_string()
}

fn default_status_ttl() -> Duration {
    Duration::from_secs(4)
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UIConfig {
    #[serde(default = "default_theme")]
    pub theme: String,
}

impl Default for UIConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
        }
    }
}

fn default_theme() -> String {
    "default".into()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerConfig {
    #[serde(default = "default_video_command")]
    pub video_command: Vec<String>,
    #[serde(default = "default_video_detach")]
    pub video_detach: bool,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            video_command: default_video_command(),
            video_detach: default_video_detach(),
        }
    }
}

fn default_video_command() -> Vec<String> {
    vec!["mpv".into(), "--fs".into(), "%URL%".into()]
}

fn default_video_detach() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DownloadConfig {
    #[serde(default = "default_download_dir")]
    pub dir: Option<PathBuf>,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            dir: default_download_dir(),
        }
    }
}

fn default_download_dir() -> Option<PathBuf> {
    dirs::download_dir().map(|dir| dir.join("reel-tui"))
}

#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    pub config_file: Option<PathBuf>,
    pub env_prefix: Option<String>,
}

pub fn load(options: LoadOptions) -> Result<Config> {
    let mut cfg = Config::default();

    if let Some(path) = options.config_file.as_ref() {
        if path.exists() {
            let from_file = read_config_file(path)?;
            cfg = merge_config(cfg, from_file);
        }
    } else if let Some(default_path) = default_config_path() {
        if default_path.exists() {
            let from_file = read_config_file(&default_path)?;
            cfg = merge_config(cfg, from_file);
        }
    }

    let prefix = options.env_prefix.as_deref().unwrap_or(DEFAULT_ENV_PREFIX);
    for (key, value) in collect_env(prefix) {
        apply_env_value(&mut cfg, &key, value);
    }

    Ok(cfg)
}

fn read_config_file(path: &Path) -> Result<Config> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file at {}", path.display()))?;
    let config: Config = serde_yaml::from_str(&data)
        .with_context(|| format!("Failed to parse config file at {}", path.display()))?;
    Ok(config)
}

fn merge_config(mut base: Config, other: Config) -> Config {
    if !other.endpoint.submit_url.is_empty() {
        base.endpoint.submit_url = other.endpoint.submit_url;
    }
    if !other.endpoint.user_agent.is_empty() {
        base.endpoint.user_agent = other.endpoint.user_agent;
    }
    base.endpoint.timeout = other.endpoint.timeout;

    if other.gallery.manifest.is_some() {
        base.gallery.manifest = other.gallery.manifest;
    }
    if !other.gallery.site_url.is_empty() {
        base.gallery.site_url = other.gallery.site_url;
    }
    base.gallery.status_ttl = other.gallery.status_ttl;

    if !other.ui.theme.is_empty() {
        base.ui.theme = other.ui.theme;
    }

    if !other.player.video_command.is_empty() {
        base.player.video_command = other.player.video_command;
    }
    base.player.video_detach = other.player.video_detach;

    if other.download.dir.is_some() {
        base.download.dir = other.download.dir;
    }

    base
}

fn collect_env(prefix: &str) -> HashMap<String, String> {
    let mut map: HashMap<String, String> = HashMap::new();
    let upper_prefix = format!("{}_", prefix.to_uppercase());

    for (key, value) in env::vars() {
        if let Some(stripped) = key.strip_prefix(&upper_prefix) {
            let normalized = stripped.to_ascii_lowercase().replace("__", ".");
            map.insert(normalized, value);
        }
    }

    map
}

fn apply_env_value(cfg: &mut Config, key: &str, value: String) {
    match key {
        "endpoint.submit_url" => cfg.endpoint.submit_url = value,
        "endpoint.user_agent" => cfg.endpoint.user_agent = value,
        "endpoint.timeout" => {
            if let Ok(duration) = humantime::parse_duration(&value) {
                cfg.endpoint.timeout = duration;
            }
        }
        "gallery.manifest" => cfg.gallery.manifest = Some(PathBuf::from(value)),
        "gallery.site_url" => cfg.gallery.site_url = value,
        "gallery.status_ttl" => {
            if let Ok(duration) = humantime::parse_duration(&value) {
                cfg.gallery.status_ttl = duration;
            }
        }
        "ui.theme" => cfg.ui.theme = value,
        "player.video_command" => {
            cfg.player.video_command = value
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
        "player.video_detach" => {
            cfg.player.video_detach = matches!(value.as_str(), "1" | "true" | "TRUE" | "True");
        }
        "download.dir" => cfg.download.dir = Some(PathBuf::from(value)),
        _ => {}
    }
}

pub fn default_path() -> Option<PathBuf> {
    default_config_path()
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("reel-tui").join("config.yaml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::tempdir;

    fn hermetic(dir: &Path) -> LoadOptions {
        LoadOptions {
            config_file: Some(dir.join("missing.yaml")),
            env_prefix: Some("REELUNSET".into()),
        }
    }

    #[test]
    fn load_defaults_without_files() {
        let dir = tempdir().unwrap();
        let cfg = load(hermetic(dir.path())).unwrap();
        assert_eq!(cfg.ui.theme, "default");
        assert_eq!(cfg.endpoint.timeout, Duration::from_secs(10));
        assert_eq!(cfg.gallery.status_ttl, Duration::from_secs(4));
        assert_eq!(cfg.player.video_command, default_video_command());
        assert!(cfg.endpoint.submit_url.is_empty());
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(
            &path,
            "endpoint:\n  submit_url: https://sink.example/submit\n  timeout: 30s\ngallery:\n  site_url: https://studio.example\n",
        )
        .unwrap();
        let cfg = load(LoadOptions {
            config_file: Some(path),
            env_prefix: Some("REELUNSET".into()),
        })
        .unwrap();
        assert_eq!(cfg.endpoint.submit_url, "https://sink.example/submit");
        assert_eq!(cfg.endpoint.timeout, Duration::from_secs(30));
        assert_eq!(cfg.gallery.site_url, "https://studio.example");
        assert_eq!(cfg.ui.theme, "default");
    }

    #[test]
    fn file_scalars_survive_unset_env() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(
            &path,
            "endpoint:\n  timeout: 30s\ngallery:\n  status_ttl: 9s\nui:\n  theme: dracula\nplayer:\n  video_detach: false\n",
        )
        .unwrap();
        let cfg = load(LoadOptions {
            config_file: Some(path),
            env_prefix: Some("REELFILETEST".into()),
        })
        .unwrap();
        assert_eq!(cfg.endpoint.timeout, Duration::from_secs(30));
        assert_eq!(cfg.gallery.status_ttl, Duration::from_secs(9));
        assert_eq!(cfg.ui.theme, "dracula");
        assert!(!cfg.player.video_detach);
    }

    #[test]
    fn env_overrides() {
        let dir = tempdir().unwrap();
        env::set_var("REELENVTEST_UI__THEME", "dracula");
        env::set_var("REELENVTEST_GALLERY__STATUS_TTL", "9s");
        let cfg = load(LoadOptions {
            config_file: Some(dir.path().join("missing.yaml")),
            env_prefix: Some("REELENVTEST".into()),
        })
        .unwrap();
        assert_eq!(cfg.ui.theme, "dracula");
        assert_eq!(cfg.gallery.status_ttl, Duration::from_secs(9));
        env::remove_var("REELENVTEST_UI__THEME");
        env::remove_var("REELENVTEST_GALLERY__STATUS_TTL");
    }

    #[test]
    fn env_video_command_splits_on_commas() {
        let dir = tempdir().unwrap();
        env::set_var("REELCMDTEST_PLAYER__VIDEO_COMMAND", "vlc, --play-and-exit, %URL%");
        let cfg = load(LoadOptions {
            config_file: Some(dir.path().join("missing.yaml")),
            env_prefix: Some("REELCMDTEST".into()),
        })
        .unwrap();
        assert_eq!(cfg.player.video_command, vec!["vlc", "--play-and-exit", "%URL%"]);
        env::remove_var("REELCMDTEST_PLAYER__VIDEO_COMMAND");
    }
}
