//! Parsing dates typed on the command line. Everything is UTC, matching the
//! calendar's day slots.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Midnight UTC today.
pub fn start_of_today() -> DateTime<Utc> {
    midnight(Utc::now().date_naive())
}

fn midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}

/// Start of the given day: an RFC 3339 timestamp is taken as is, anything
/// else ("2025-05-15", "today", "next fri") is read as a date at midnight UTC.
pub fn parse_date_start(input: &str) -> Result<DateTime<Utc>> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(midnight(date));
    }

    Ok(midnight(parse_fuzzy(input)?.date()))
}

/// Event start: RFC 3339, "2025-03-20 15:00", or natural language such as
/// "tomorrow at 6pm". Times without an offset are read as UTC.
pub fn parse_start(input: &str) -> Result<DateTime<Utc>> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(naive.and_utc());
        }
    }

    let dt = parse_fuzzy(input)?;
    if has_time_component(input) {
        Ok(dt.and_utc())
    } else {
        Ok(midnight(dt.date()))
    }
}

fn parse_fuzzy(input: &str) -> Result<NaiveDateTime> {
    let expanded = expand_abbreviations(input);
    fuzzydate::parse(&expanded)
        .map_err(|_| anyhow::anyhow!("Could not parse date/time: \"{}\"", input))
}

/// Expand common abbreviations that fuzzydate doesn't handle.
fn expand_abbreviations(input: &str) -> String {
    let abbrevs = [
        ("mon", "monday"),
        ("tue", "tuesday"),
        ("tues", "tuesday"),
        ("wed", "wednesday"),
        ("thu", "thursday"),
        ("thur", "thursday"),
        ("thurs", "thursday"),
        ("fri", "friday"),
        ("sat", "saturday"),
        ("sun", "sunday"),
        ("jan", "january"),
        ("feb", "february"),
        ("mar", "march"),
        ("apr", "april"),
        ("jun", "june"),
        ("jul", "july"),
        ("aug", "august"),
        ("sep", "september"),
        ("sept", "september"),
        ("oct", "october"),
        ("nov", "november"),
        ("dec", "december"),
    ];

    input
        .to_lowercase()
        .split_whitespace()
        .map(|word| {
            abbrevs
                .iter()
                .find(|(abbr, _)| *abbr == word)
                .map(|(_, full)| *full)
                .unwrap_or(word)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whether the input names a time of day (noon, 6pm, 18:30, "at 6").
fn has_time_component(input: &str) -> bool {
    let lower = input.to_lowercase();

    if lower.contains("noon") || lower.contains("midnight") {
        return true;
    }

    let words: Vec<&str> = lower.split_whitespace().collect();
    for (i, word) in words.iter().enumerate() {
        let starts_with_digit = word.starts_with(|c: char| c.is_ascii_digit());

        // 6pm, 11am, 18:30
        if starts_with_digit && (word.ends_with("am") || word.ends_with("pm") || word.contains(':')) {
            return true;
        }
        // 6 pm
        if (*word == "am" || *word == "pm")
            && i > 0
            && words[i - 1].chars().all(|c| c.is_ascii_digit())
        {
            return true;
        }
        // at 6
        if *word == "at"
            && words
                .get(i + 1)
                .is_some_and(|next| next.starts_with(|c: char| c.is_ascii_digit()))
        {
            return true;
        }
    }

    false
}
