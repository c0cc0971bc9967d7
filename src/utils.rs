use std::{
    io::{self, BufRead, Write},
    time::Duration,
};

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use indicatif::{ProgressBar, ProgressStyle};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Cleans user input down to the bare playlist id.
///
/// Accepts `https://open.spotify.com/playlist/<id>?si=...`,
/// `spotify:playlist:<id>` or the id itself.
pub fn extract_playlist_id(url_or_id: &str) -> String {
    let input = url_or_id.trim();

    let id = if let Some((_, rest)) = input.split_once("playlist/") {
        rest
    } else if let Some(rest) = input.strip_prefix("spotify:playlist:") {
        rest
    } else {
        input
    };

    id.split(['?', '#', '/'])
        .next()
        .unwrap_or_default()
        .to_string()
}

/// `"<title> by <artist1>, <artist2>, ..."`
pub fn song_descriptor<S: AsRef<str>>(title: &str, artists: &[S]) -> String {
    let names: Vec<&str> = artists.iter().map(|a| a.as_ref()).collect();
    format!("{} by {}", title, names.join(", "))
}

/// Milliseconds as `m:ss`.
pub fn format_duration(duration_ms: u64) -> String {
    let total = duration_ms / 1000;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Prints `question` and reads one trimmed line from `input`.
pub fn prompt_from<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
) -> io::Result<String> {
    write!(output, "{question}")?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

pub fn prompt(question: &str) -> io::Result<String> {
    prompt_from(&mut io::stdin().lock(), &mut io::stdout(), question)
}

/// `[Y/n]` question; anything but an explicit no counts as yes.
pub fn confirm_from<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
) -> io::Result<bool> {
    let answer = prompt_from(input, output, &format!("{question} [Y/n]: "))?;
    Ok(!matches!(answer.to_lowercase().as_str(), "n" | "no"))
}

pub fn confirm(question: &str) -> io::Result<bool> {
    confirm_from(&mut io::stdin().lock(), &mut io::stdout(), question)
}

/// Steady-ticking spinner used around network calls.
pub fn spinner(message: impl Into<String>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}
