//! Input resolution: environment value first, interactive prompt otherwise.

use crate::config::{DEFAULT_COUNT, DEFAULT_DURATION_SECS, MAX_DURATION_SECS, MIN_DURATION_SECS};
use std::io::{self, BufRead, Write};

/// Source of interactive answers.
pub trait Prompter {
    /// Shows `question` and returns the raw line typed in reply.
    fn ask(&mut self, question: &str) -> io::Result<String>;
}

/// Reads answers from standard input.
#[derive(Debug, Default)]
pub struct StdinPrompter;

impl Prompter for StdinPrompter {
    fn ask(&mut self, question: &str) -> io::Result<String> {
        let mut stdout = io::stdout();
        stdout.write_all(question.as_bytes())?;
        stdout.flush()?;

        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(line)
    }
}

/// Resolves one input field.
///
/// Uses `env_value` when it is set and non-empty, otherwise asks `question`.
/// The answer is trimmed before `parse` sees it; `parse` owns validation and fallback.
pub fn resolve<T>(
    prompter: &mut dyn Prompter,
    env_value: Option<&str>,
    question: &str,
    parse: impl FnOnce(&str) -> T,
) -> io::Result<T> {
    let raw = match env_value.filter(|v| !v.is_empty()) {
        Some(value) => value.to_string(),
        None => prompter.ask(question)?,
    };
    Ok(parse(raw.trim()))
}

/// What a run produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// One or more images from a prompt.
    #[default]
    Image,
    /// A short video animated from a source image.
    Video,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Image => write!(f, "image"),
            Self::Video => write!(f, "video"),
        }
    }
}

/// `v` or `video` (any case) selects video; anything else is image.
pub fn parse_mode(input: &str) -> Mode {
    match input.trim().to_lowercase().as_str() {
        "v" | "video" => Mode::Video,
        _ => Mode::Image,
    }
}

/// Parses an image count. Empty, non-numeric or zero input gives [`DEFAULT_COUNT`].
///
/// Negative values are passed through untouched and left for the API to reject.
pub fn parse_count(input: &str) -> i32 {
    match parse_leading_int(input) {
        Some(0) | None => DEFAULT_COUNT,
        Some(n) => i32::try_from(n).unwrap_or(DEFAULT_COUNT),
    }
}

/// Parses a video duration in seconds.
///
/// Anything outside `MIN_DURATION_SECS..=MAX_DURATION_SECS` becomes
/// [`DEFAULT_DURATION_SECS`], not the nearest bound.
pub fn parse_duration(input: &str) -> u32 {
    match parse_leading_int(input) {
        Some(n) if (i64::from(MIN_DURATION_SECS)..=i64::from(MAX_DURATION_SECS)).contains(&n) => {
            n as u32
        }
        _ => DEFAULT_DURATION_SECS,
    }
}

/// Reads an optional sign and the leading run of digits, ignoring any tail
/// (`"12s"` is 12, `"abc"` is `None`).
pub fn parse_leading_int(input: &str) -> Option<i64> {
    let s = input.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    let value: i64 = rest[..digits_len].parse().ok()?;
    Some(if negative { -value } else { value })
}
