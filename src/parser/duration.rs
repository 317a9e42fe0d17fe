use std::sync::LazyLock;

use regex::Regex;

static HOURS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([0-9]+)h").unwrap());
static MINUTES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([0-9]+)m").unwrap());

/// Convert a running time like "1h 51m" into minutes.
///
/// Hour and minute tokens are looked up independently and only the leftmost
/// of each counts. Text without either token yields 0.
pub fn parse_duration(text: &str) -> u32 {
    let hours = first_number(&HOURS_RE, text);
    let minutes = first_number(&MINUTES_RE, text);
    hours.saturating_mul(60).saturating_add(minutes)
}

fn first_number(re: &Regex, text: &str) -> u32 {
    re.captures(text)
        .and_then(|c| c[1].parse::<u32>().ok())
        .unwrap_or(0)
}
