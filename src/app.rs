use std::sync::Arc;

use anyhow::{Context, Result};

use crate::catalog;
use crate::config;
use crate::data::{self, SubmissionService};
use crate::endpoint;
use crate::ui;

pub fn run() -> Result<()> {
    let cfg = config::load(config::LoadOptions::default()).context("load config")?;
    let config_path = config::default_path();
    let display_path = friendly_path(config_path.as_ref());

    if cfg.ui.theme != "default" {
        log::debug!("unknown ui.theme {:?}, using the default palette", cfg.ui.theme);
    }

    let cards = match &cfg.gallery.manifest {
        Some(path) => catalog::load_file(path)
            .with_context(|| format!("load catalog {}", path.display()))?,
        None => catalog::builtin(),
    };

    let mut submission_service: Option<Arc<dyn SubmissionService + Send + Sync>> = None;
    let status: String;

    if cfg.endpoint.submit_url.trim().is_empty() {
        status = format!(
            "Browsing {} reels. Set endpoint.submit_url in {} to enable submissions.",
            cards.len(),
            display_path
        );
    } else {
        match endpoint::Client::new(endpoint::ClientConfig {
            submit_url: cfg.endpoint.submit_url.clone(),
            user_agent: cfg.endpoint.user_agent.clone(),
            timeout: Some(cfg.endpoint.timeout),
            http_client: None,
        }) {
            Ok(client) => {
                let service: Arc<dyn SubmissionService + Send + Sync> =
                    Arc::new(data::EndpointSubmissionService::new(Arc::new(client)));
                submission_service = Some(service);
                status = format!(
                    "Browsing {} reels. Enter plays, / searches, n subscribes, c contacts.",
                    cards.len()
                );
            }
            Err(err) => {
                log::warn!("submission endpoint disabled: {err:?}");
                status = format!("Submission endpoint unavailable: {err}");
            }
        }
    }

    let options = ui::Options {
        status_message: status,
        cards,
        submission_service,
        config: cfg,
        config_path: display_path,
    };

    let mut model = ui::Model::new(options);
    model.run()?;

    Ok(())
}

fn friendly_path(path: Option<&std::path::PathBuf>) -> String {
    if let Some(path) = path {
        if let Some(home) = dirs::home_dir() {
            if let Ok(stripped) = path.strip_prefix(&home) {
                let mut display = String::from("~");
                if !stripped.as_os_str().is_empty() {
                    display.push_str(&format!("/{}", stripped.display()));
                }
                return display;
            }
        }
        path.display().to_string()
    } else {
        "~/.config/reel-tui/config.yaml".to_string()
    }
}
