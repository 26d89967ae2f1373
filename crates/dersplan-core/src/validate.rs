use std::fmt;

use regex::Regex;

use crate::schedule::Activity;

pub const READING_TITLE: &str = "Kitap Okuma";
pub const READING_MINUTES: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reject {
    EmptyTitle,
    InvalidDuration,
    InvalidTime,
}

impl fmt::Display for Reject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Reject::EmptyTitle => "Lütfen bir başlık girin (örn: Matematik).",
            Reject::InvalidDuration => "Süreyi pozitif bir tam sayı (dakika) olarak girin.",
            Reject::InvalidTime => {
                "Başlangıç saatini HH:MM formatında girin (ör. 14:30) veya boş bırakın."
            }
        };
        f.write_str(msg)
    }
}

impl std::error::Error for Reject {}

pub fn validate_title(raw: &str) -> Result<String, Reject> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(Reject::EmptyTitle);
    }
    Ok(title.to_string())
}

// Parse failure and non-positive values read the same to the user.
pub fn validate_duration(raw: &str) -> Result<i64, Reject> {
    match raw.trim().parse::<i64>() {
        Ok(minutes) if minutes > 0 => Ok(minutes),
        _ => Err(Reject::InvalidDuration),
    }
}

// Strict 24-hour HH:MM, two digits each; empty input means no start time.
pub fn validate_start(raw: &str) -> Result<Option<String>, Reject> {
    let text = raw.trim();
    if text.is_empty() {
        return Ok(None);
    }

    let clock_re = Regex::new(r"^(?P<hour>\d{2}):(?P<minute>\d{2})$")
        .map_err(|_| Reject::InvalidTime)?;
    let captures = clock_re.captures(text).ok_or(Reject::InvalidTime)?;

    let hour = captures
        .name("hour")
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .ok_or(Reject::InvalidTime)?;
    let minute = captures
        .name("minute")
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .ok_or(Reject::InvalidTime)?;

    if hour > 23 || minute > 59 {
        return Err(Reject::InvalidTime);
    }

    Ok(Some(text.to_string()))
}

pub fn build_activity(title: String, duration: i64, start: Option<String>) -> Activity {
    Activity::new(title, duration, start)
}

// Trusted constant, not routed through validation.
pub fn reading_session() -> Activity {
    Activity::new(READING_TITLE.to_string(), READING_MINUTES, None)
}

#[cfg(test)]
mod tests {
    use super::{
        Reject, reading_session, validate_duration, validate_start, validate_title,
    };

    #[test]
    fn title_is_trimmed_and_must_be_nonempty() {
        assert_eq!(validate_title("  Matematik "), Ok("Matematik".to_string()));
        assert_eq!(validate_title(""), Err(Reject::EmptyTitle));
        assert_eq!(validate_title("   "), Err(Reject::EmptyTitle));
    }

    #[test]
    fn duration_must_be_a_positive_integer() {
        assert_eq!(validate_duration("1"), Ok(1));
        assert_eq!(validate_duration("120"), Ok(120));
        assert_eq!(validate_duration("0"), Err(Reject::InvalidDuration));
        assert_eq!(validate_duration("-5"), Err(Reject::InvalidDuration));
        assert_eq!(validate_duration("abc"), Err(Reject::InvalidDuration));
    }

    #[test]
    fn start_time_is_strict_hh_mm_or_absent() {
        assert_eq!(validate_start(""), Ok(None));
        assert_eq!(validate_start("09:30"), Ok(Some("09:30".to_string())));
        assert_eq!(validate_start("23:59"), Ok(Some("23:59".to_string())));
        assert_eq!(validate_start("9:30"), Err(Reject::InvalidTime));
        assert_eq!(validate_start("25:00"), Err(Reject::InvalidTime));
        assert_eq!(validate_start("12:60"), Err(Reject::InvalidTime));
        assert_eq!(validate_start("foo"), Err(Reject::InvalidTime));
    }

    #[test]
    fn reading_session_is_the_fixed_block() {
        let reading = reading_session();
        assert_eq!(reading.title, "Kitap Okuma");
        assert_eq!(reading.duration, 30);
        assert_eq!(reading.start, None);
    }
}
