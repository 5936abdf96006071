//! Weekday vocabulary.
//!
//! Stored and provider data spell weekdays several ways ("Monday",
//! "Mondays", "monday"). Everything is folded into [`chrono::Weekday`] here.

use chrono::Weekday;

const SPELLINGS: &[(&str, Weekday)] = &[
    ("monday", Weekday::Mon),
    ("mondays", Weekday::Mon),
    ("tuesday", Weekday::Tue),
    ("tuesdays", Weekday::Tue),
    ("wednesday", Weekday::Wed),
    ("wednesdays", Weekday::Wed),
    ("thursday", Weekday::Thu),
    ("thursdays", Weekday::Thu),
    ("friday", Weekday::Fri),
    ("fridays", Weekday::Fri),
    ("saturday", Weekday::Sat),
    ("saturdays", Weekday::Sat),
    ("sunday", Weekday::Sun),
    ("sundays", Weekday::Sun),
];

/// Parses a weekday name, case-insensitive, singular or plural.
///
/// Returns `None` for anything outside the table, including abbreviations.
///
/// ```
/// use animehub::domain::parse_weekday;
/// use chrono::Weekday;
///
/// assert_eq!(parse_weekday("Mondays"), Some(Weekday::Mon));
/// assert_eq!(parse_weekday(" sunday "), Some(Weekday::Sun));
/// assert_eq!(parse_weekday("Someday"), None);
/// ```
#[must_use]
pub fn parse_weekday(raw: &str) -> Option<Weekday> {
    let key = raw.trim().to_lowercase();
    SPELLINGS
        .iter()
        .find(|(spelling, _)| *spelling == key)
        .map(|(_, day)| *day)
}

#[must_use]
pub const fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Provider-style plural spelling, as MyAnimeList reports broadcasts.
#[must_use]
pub const fn plural_weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Mondays",
        Weekday::Tue => "Tuesdays",
        Weekday::Wed => "Wednesdays",
        Weekday::Thu => "Thursdays",
        Weekday::Fri => "Fridays",
        Weekday::Sat => "Saturdays",
        Weekday::Sun => "Sundays",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_singular_and_plural() {
        assert_eq!(parse_weekday("Monday"), Some(Weekday::Mon));
        assert_eq!(parse_weekday("Mondays"), Some(Weekday::Mon));
        assert_eq!(parse_weekday("TUESDAYS"), Some(Weekday::Tue));
        assert_eq!(parse_weekday("wednesday"), Some(Weekday::Wed));
    }

    #[test]
    fn rejects_unknown_spellings() {
        assert_eq!(parse_weekday(""), None);
        assert_eq!(parse_weekday("Mon"), None);
        assert_eq!(parse_weekday("Unknown"), None);
        assert_eq!(parse_weekday("Mondayss"), None);
    }

    #[test]
    fn names_parse_back() {
        for day in [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ] {
            assert_eq!(parse_weekday(weekday_name(day)), Some(day));
            assert_eq!(parse_weekday(plural_weekday_name(day)), Some(day));
        }
    }
}
