//! Offset expression parsing
//!
//! Grammar (case-insensitive): optional `+`/`-`, digits, then a unit word
//! (`Day`, `Working Day`, `Business Day`, `Month`, `Year`). The unit word
//! is matched as a prefix, so plural forms and trailing text are ignored.
//! `Working Day` and `Business Day` are the same unit.

/// Unit of a diary offset expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetUnit {
    Day,
    WorkingDay,
    Month,
    Year,
}

/// A parsed offset: signed magnitude + unit. `"-14 Days"` parses to a
/// magnitude of -14.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Offset {
    pub magnitude: i32,
    pub unit: OffsetUnit,
}

/// Parse a free-text offset expression. Returns `None` when the text does
/// not match the grammar; callers treat that as a zero offset (reference
/// date unmodified) rather than a failure.
pub fn parse_offset(text: &str) -> Option<Offset> {
    let text = text.trim();
    let (negative, rest) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };

    let rest = rest.trim_start();
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }
    // Magnitudes beyond i32 are treated as unparseable.
    let magnitude: i32 = rest[..digits_end].parse().ok()?;

    let unit_text = rest[digits_end..].trim_start().to_lowercase();
    let unit = if unit_text.starts_with("working day") || unit_text.starts_with("business day") {
        OffsetUnit::WorkingDay
    } else if unit_text.starts_with("day") {
        OffsetUnit::Day
    } else if unit_text.starts_with("month") {
        OffsetUnit::Month
    } else if unit_text.starts_with("year") {
        OffsetUnit::Year
    } else {
        return None;
    };

    Some(Offset {
        magnitude: if negative { -magnitude } else { magnitude },
        unit,
    })
}
