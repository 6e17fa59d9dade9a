// Resolution of human date expressions ("tomorrow", "next friday", "June 11") to YYYY-MM-DD
use crate::error::{FlightError, Result};
use crate::offer::Outcome;
use chrono::{Datelike, Duration, Local, NaiveDate, Weekday};
use tracing::{debug, error};

pub const INVALID_DATE_FORMAT: &str =
    "Invalid date format. Try providing a relative date or an absolute date in the format YYYY-MM-DD";

pub trait DateParser {
    fn parse(&self, input: &str) -> Result<NaiveDate>;
}

// Parses relative expressions against a fixed anchor day
#[derive(Debug, Clone, Copy)]
pub struct RelativeDateParser {
    today: NaiveDate,
}

impl Default for RelativeDateParser {
    fn default() -> Self {
        Self::new(Local::now().date_naive())
    }
}

impl RelativeDateParser {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    fn unparseable(input: &str) -> FlightError {
        FlightError::DateParse(format!("unrecognised date expression '{}'", input))
    }

    fn offset_days(&self, days: i64) -> Option<NaiveDate> {
        self.today.checked_add_signed(Duration::try_days(days)?)
    }

    fn keyword(&self, text: &str) -> Option<NaiveDate> {
        match text {
            "today" | "now" => Some(self.today),
            "tomorrow" => self.offset_days(1),
            "yesterday" => self.offset_days(-1),
            "next week" => self.offset_days(7),
            "last week" => self.offset_days(-7),
            _ => None,
        }
    }

    // "+3", "-2"
    fn signed_days(&self, text: &str) -> Option<NaiveDate> {
        let sign = match text.chars().next()? {
            '+' => 1,
            '-' => -1,
            _ => return None,
        };
        let digits = text[1..].trim();
        if !digits.starts_with(|c: char| c.is_ascii_digit()) {
            return None;
        }
        let days: i64 = digits.parse().ok()?;
        self.offset_days(days.checked_mul(sign)?)
    }

    // "in 3 days", "2 weeks from now", "5 days ago"
    fn counted_units(&self, text: &str) -> Option<NaiveDate> {
        let words: Vec<&str> = text.split_whitespace().collect();
        let (count, unit, direction) = match words.as_slice() {
            ["in", count, unit] => (*count, *unit, 1),
            [count, unit, "from", "now"] | [count, unit, "later"] => (*count, *unit, 1),
            [count, unit, "ago"] => (*count, *unit, -1),
            _ => return None,
        };

        let count: i64 = match count {
            "a" | "an" | "one" => 1,
            other => other.parse().ok()?,
        };
        let per_unit = match unit.trim_end_matches('s') {
            "day" => 1,
            "week" => 7,
            _ => return None,
        };
        self.offset_days(count.checked_mul(per_unit)?.checked_mul(direction)?)
    }

    // "friday", "this friday", "next fri", "last monday"
    fn weekday_reference(&self, text: &str) -> Option<NaiveDate> {
        let (qualifier, name) = match text.split_once(' ') {
            Some((qualifier, name)) => (qualifier, name.trim()),
            None => ("", text),
        };
        let weekday = name.parse::<Weekday>().ok()?;

        let today = self.today.weekday().num_days_from_monday() as i64;
        let target = weekday.num_days_from_monday() as i64;
        let ahead = (target - today).rem_euclid(7);

        let days = match qualifier {
            "" | "this" => ahead,
            "next" => {
                if ahead == 0 {
                    7
                } else {
                    ahead
                }
            }
            "last" => {
                if ahead == 0 {
                    -7
                } else {
                    ahead - 7
                }
            }
            _ => return None,
        };
        self.offset_days(days)
    }

    fn absolute(&self, text: &str) -> Option<NaiveDate> {
        let cleaned = text.replace(',', " ");
        let cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");

        const WITH_YEAR: [&str; 8] = [
            "%Y-%m-%d", "%m/%d/%Y", "%B %d %Y", "%b %d %Y", "%d %B %Y", "%d %b %Y", "%Y/%m/%d",
            "%m-%d-%Y",
        ];
        if let Some(date) = WITH_YEAR
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(&cleaned, fmt).ok())
        {
            return Some(date);
        }

        // Without a year: the current year
        let with_year = format!("{} {}", cleaned, self.today.year());
        ["%m/%d %Y", "%B %d %Y", "%b %d %Y", "%d %B %Y", "%d %b %Y"]
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(&with_year, fmt).ok())
    }
}

impl DateParser for RelativeDateParser {
    fn parse(&self, input: &str) -> Result<NaiveDate> {
        let text = input.trim().to_lowercase();
        if text.is_empty() {
            return Err(Self::unparseable(input));
        }

        self.keyword(&text)
            .or_else(|| self.signed_days(&text))
            .or_else(|| self.counted_units(&text))
            .or_else(|| self.weekday_reference(&text))
            .or_else(|| self.absolute(&text))
            .ok_or_else(|| Self::unparseable(input))
    }
}

/// Resolves with today's date as the anchor.
pub fn resolve_date(input: &str) -> Outcome<String> {
    resolve_date_with(&RelativeDateParser::default(), input)
}

// The failure message is fixed; parser detail only goes to the log
pub fn resolve_date_with<P: DateParser>(parser: &P, input: &str) -> Outcome<String> {
    match parser.parse(input) {
        Ok(date) => {
            let resolved = date.format("%Y-%m-%d").to_string();
            debug!(input, resolved = %resolved, "Resolved date");
            Outcome::success(resolved)
        }
        Err(e) => {
            error!(input, error = %e, "Could not resolve date");
            Outcome::failure(INVALID_DATE_FORMAT)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    // A Wednesday
    fn parser() -> RelativeDateParser {
        RelativeDateParser::new(NaiveDate::from_ymd_opt(2025, 6, 11).unwrap())
    }

    #[test_case("today", "2025-06-11"; "#1 today")]
    #[test_case("Tomorrow", "2025-06-12"; "#2 tomorrow")]
    #[test_case("yesterday", "2025-06-10"; "#3 yesterday")]
    #[test_case("+3", "2025-06-14"; "#4 plus days")]
    #[test_case("-11", "2025-05-31"; "#5 minus days")]
    #[test_case("in 3 days", "2025-06-14"; "#6 in days")]
    #[test_case("2 weeks from now", "2025-06-25"; "#7 weeks from now")]
    #[test_case("a week ago", "2025-06-04"; "#8 week ago")]
    #[test_case("next week", "2025-06-18"; "#9 next week")]
    #[test_case("friday", "2025-06-13"; "#10 bare weekday")]
    #[test_case("wednesday", "2025-06-11"; "#11 bare weekday is today")]
    #[test_case("next wednesday", "2025-06-18"; "#12 next same weekday")]
    #[test_case("next mon", "2025-06-16"; "#13 abbreviated weekday")]
    #[test_case("last friday", "2025-06-06"; "#14 last weekday")]
    #[test_case("2025-12-24", "2025-12-24"; "#15 iso")]
    #[test_case("07/04/2026", "2026-07-04"; "#16 us numeric")]
    #[test_case("June 20", "2025-06-20"; "#17 month day")]
    #[test_case("Jan 5, 2026", "2026-01-05"; "#18 abbreviated month with year")]
    #[test_case("  3 March 2026 ", "2026-03-03"; "#19 day month year")]
    fn test_resolves_expressions(input: &str, expected: &str) {
        let outcome = resolve_date_with(&parser(), input);
        assert_eq!(outcome, Outcome::success(expected.to_string()));
    }

    #[test_case(""; "#1 empty")]
    #[test_case("not a date!!"; "#2 gibberish")]
    #[test_case("2025-02-30"; "#3 impossible day")]
    #[test_case("next blursday"; "#4 unknown weekday")]
    #[test_case("in many days"; "#5 non numeric count")]
    #[test_case("in 9223372036854775807 weeks"; "#6 week count overflows")]
    #[test_case("--9223372036854775808"; "#7 double sign")]
    #[test_case("+9223372036854775807"; "#8 day count out of range")]
    #[test_case("9223372036854775807 days ago"; "#9 past count out of range")]
    fn test_rejects_with_fixed_message(input: &str) {
        let outcome = resolve_date_with(&parser(), input);
        assert_eq!(outcome, Outcome::failure(INVALID_DATE_FORMAT));
    }

    #[test]
    fn test_parser_error_detail_is_not_surfaced() {
        let err = parser().parse("whenever").unwrap_err();
        assert!(matches!(err, FlightError::DateParse(_)));

        let outcome = resolve_date_with(&parser(), "whenever");
        assert!(!outcome.error_message().unwrap().contains("whenever"));
    }

    #[test]
    fn test_resolve_date_uses_today() {
        let outcome = resolve_date("tomorrow");
        let value = outcome.value().unwrap();

        let parsed = NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap();
        assert_eq!(value.len(), 10);
        assert!(parsed > Local::now().date_naive() - Duration::days(1));
    }
}
