//! Date-of-birth and passout-year normalization.
//!
//! Both normalizers are best-effort: an unparsable value is returned cleaned
//! but otherwise unchanged, with a warning.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

// ═══════════════════════════════════════════════════════════
// Date of birth
// ═══════════════════════════════════════════════════════════

/// Field order of a numeric date layout.
#[derive(Debug, Clone, Copy)]
enum Order {
    Dmy,
    Ymd,
    Mdy,
}

/// Numeric layouts, tried in order. First successful parse wins.
///
/// `%d`/`%m` accept one or two digits, `%Y` exactly four, `%y` exactly two.
static DATE_LAYOUTS: LazyLock<Vec<(Regex, Order)>> = LazyLock::new(|| {
    vec![
        // %d/%m/%Y
        (Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{4})$").unwrap(), Order::Dmy),
        // %d-%m-%Y
        (Regex::new(r"^(\d{1,2})-(\d{1,2})-(\d{4})$").unwrap(), Order::Dmy),
        // %Y-%m-%d
        (Regex::new(r"^(\d{4})-(\d{1,2})-(\d{1,2})$").unwrap(), Order::Ymd),
        // %d/%m/%y
        (Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{2})$").unwrap(), Order::Dmy),
        // %d-%m-%y
        (Regex::new(r"^(\d{1,2})-(\d{1,2})-(\d{2})$").unwrap(), Order::Dmy),
        // %Y/%m/%d
        (Regex::new(r"^(\d{4})/(\d{1,2})/(\d{1,2})$").unwrap(), Order::Ymd),
        // %m/%d/%Y
        (Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{4})$").unwrap(), Order::Mdy),
        // %m-%d-%Y
        (Regex::new(r"^(\d{1,2})-(\d{1,2})-(\d{4})$").unwrap(), Order::Mdy),
    ]
});

static SEPARATOR_NOISE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[,.\n\t\r]+").unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static ORDINAL_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)(?:st|nd|rd|th|ª)").unwrap());
static MONTH_NAME_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{1,2})[-/]([a-zA-Z]{3,})[-/](\d{2,4})").unwrap());

const MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// Strip punctuation noise and ordinal suffixes ("23rd" → "23").
pub fn clean_date_text(raw: &str) -> String {
    let text = SEPARATOR_NOISE.replace_all(raw.trim(), " ");
    let text = WHITESPACE.replace_all(&text, " ");
    let text = ORDINAL_SUFFIX.replace_all(&text, "$1");
    text.trim().to_string()
}

/// Two-digit `%y` years: 69–99 → 19xx, 00–68 → 20xx.
fn expand_short_year(year: i32) -> i32 {
    if year >= 69 {
        1900 + year
    } else {
        2000 + year
    }
}

fn parse_numeric(text: &str) -> Option<NaiveDate> {
    DATE_LAYOUTS.iter().find_map(|(re, order)| {
        let caps = re.captures(text)?;
        let parts: Vec<&str> = (1..=3).map(|i| &caps[i]).collect();
        let (y, m, d) = match order {
            Order::Dmy => (parts[2], parts[1], parts[0]),
            Order::Ymd => (parts[0], parts[1], parts[2]),
            Order::Mdy => (parts[2], parts[0], parts[1]),
        };
        let mut year: i32 = y.parse().ok()?;
        if y.len() == 2 {
            year = expand_short_year(year);
        }
        if year < 1 {
            return None;
        }
        NaiveDate::from_ymd_opt(year, m.parse().ok()?, d.parse().ok()?)
    })
}

/// "23-Feb-1993" style dates. The day and year are carried over verbatim,
/// only the month is resolved.
fn parse_month_name(text: &str, pivot: u32) -> Option<String> {
    let caps = MONTH_NAME_DATE.captures(text)?;
    let (day, month, year) = (&caps[1], &caps[2], &caps[3]);

    let prefix = month[..3].to_lowercase();
    let month_num = MONTHS.iter().position(|m| *m == prefix)? + 1;

    let year = if year.len() == 2 {
        let short: u32 = year.parse().ok()?;
        let century = if short > pivot { "19" } else { "20" };
        format!("{century}{year}")
    } else {
        year.to_string()
    };

    Some(format!("{day:0>2}-{month_num:02}-{year}"))
}

/// Reformat a date of birth to `dd-mm-yyyy`.
///
/// Returns the cleaned text unchanged when no layout matches.
pub fn format_dob(raw: &str, pivot: u32) -> String {
    let text = clean_date_text(raw);

    if let Some(date) = parse_numeric(&text) {
        return date.format("%d-%m-%Y").to_string();
    }
    if let Some(formatted) = parse_month_name(&text, pivot) {
        return formatted;
    }

    tracing::warn!(len = text.len(), "Could not parse date of birth");
    tracing::debug!(value = %text, "Unparsed date of birth");
    text
}

// ═══════════════════════════════════════════════════════════
// Passout year
// ═══════════════════════════════════════════════════════════

static DIGIT_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]+").unwrap());

/// Replace characters OCR confuses with digits.
fn substitute_lookalikes(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '!' | 'I' | 'l' | 'i' => '1',
            'S' | 's' => '5',
            'O' | 'o' => '0',
            other => other,
        })
        .collect()
}

/// Normalize a passout year to four digits.
///
/// "2010-12" style ranges resolve to the end year; short years are assumed to
/// be in the 2000s.
pub fn normalize_passout_year(raw: &str) -> String {
    let text = substitute_lookalikes(raw.trim());
    let runs: Vec<&str> = DIGIT_RUN.find_iter(&text).map(|m| m.as_str()).collect();

    let Some(last) = runs.last() else {
        tracing::warn!(len = text.len(), "No digits found in passout year");
        tracing::debug!(value = %text, "Unparsed passout year");
        return text;
    };

    if runs.len() >= 2 && last.len() <= 2 {
        return format!("20{last:0>2}");
    }

    let digits: String = runs.concat();
    match digits.len() {
        n if n >= 4 => digits[n - 4..].to_string(),
        3 => format!("2{digits}"),
        _ => format!("20{digits:0>2}"),
    }
}
