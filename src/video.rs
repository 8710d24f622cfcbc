use std::process::{Command, Stdio};

use anyhow::{anyhow, Context, Result};

// Every %URL% placeholder is substituted; a template without one gets
// the URL appended as the final argument.
pub fn build_player_command(template: &[String], url: &str) -> Result<(String, Vec<String>)> {
    let mut parts = template.iter();
    let program = parts
        .next()
        .ok_or_else(|| anyhow!("player command is empty"))?
        .clone();
    let mut args: Vec<String> = parts.map(|arg| arg.replace("%URL%", url)).collect();
    let substituted = program.contains("%URL%") || template[1..].iter().any(|arg| arg.contains("%URL%"));
    let program = program.replace("%URL%", url);
    if !substituted {
        args.push(url.to_string());
    }
    Ok((program, args))
}

// With detach the child is left running; otherwise block until it
// exits and report a non-zero status.
pub fn spawn_external_player(template: &[String], url: &str, detach: bool) -> Result<()> {
    if url.trim().is_empty() {
        return Err(anyhow!("video playback url missing"));
    }
    let (program, args) = build_player_command(template, url)?;
    log::debug!("launching {} {:?}", program, args);

    let mut command = Command::new(&program);
    command.args(&args);
    command.stdin(Stdio::null());
    command.stdout(Stdio::null());
    command.stderr(Stdio::null());

    let mut child = command
        .spawn()
        .with_context(|| format!("launch {} to play {}", program, url))?;

    if !detach {
        let status = child
            .wait()
            .with_context(|| format!("wait for {} playing {}", program, url))?;
        if !status.success() {
            return Err(anyhow!(
                "{} exited with status {:?} for {}",
                program,
                status.code(),
                url
            ));
        }
    }
    Ok(())
}

pub fn open_embed(url: &str) -> Result<()> {
    if url.trim().is_empty() {
        return Err(anyhow!("embed url missing"));
    }
    webbrowser::open(url).with_context(|| format!("open browser for {}", url))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|part| part.to_string()).collect()
    }

    #[test]
    fn substitutes_url_placeholder() {
        let (program, args) = build_player_command(
            &template(&["mpv", "--fs", "%URL%"]),
            "https://cdn.example.com/v.mp4",
        )
        .unwrap();
        assert_eq!(program, "mpv");
        assert_eq!(args, vec!["--fs", "https://cdn.example.com/v.mp4"]);
    }

    #[test]
    fn appends_url_when_template_has_no_placeholder() {
        let (program, args) =
            build_player_command(&template(&["vlc", "--play-and-exit"]), "https://a/b.mp4")
                .unwrap();
        assert_eq!(program, "vlc");
        assert_eq!(args, vec!["--play-and-exit", "https://a/b.mp4"]);
    }

    #[test]
    fn substitutes_inside_composite_argument() {
        let (_, args) = build_player_command(
            &template(&["sh", "-c", "play '%URL%'"]),
            "https://a/b.mp4",
        )
        .unwrap();
        assert_eq!(args, vec!["-c", "play 'https://a/b.mp4'"]);
    }

    #[test]
    fn empty_template_is_an_error() {
        assert!(build_player_command(&[], "https://a/b.mp4").is_err());
    }
}
