// Offer filters; a filter that would leave nothing has no effect
use crate::error::Result;
use crate::offer::Offer;
use crate::time_of_day::{HeuristicMode, TimeOfDay};
use tracing::info;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub airline_code: Option<String>,
    pub time_of_day: Option<TimeOfDay>,
}

impl FilterCriteria {
    // Empty strings mean "no filter"; an unknown day-part label is rejected here
    pub fn new(airline_code: Option<&str>, time_of_day: Option<&str>) -> Result<Self> {
        let time_of_day = match time_of_day.filter(|label| !label.is_empty()) {
            Some(label) => Some(label.parse::<TimeOfDay>()?),
            None => None,
        };

        Ok(Self {
            airline_code: airline_code
                .filter(|code| !code.is_empty())
                .map(str::to_string),
            time_of_day,
        })
    }

    // Airline first, then time of day on whatever the airline filter left
    pub fn apply(&self, offers: Vec<Offer>, mode: HeuristicMode) -> Vec<Offer> {
        let mut filtered = offers;

        if let Some(code) = &self.airline_code {
            info!(airline = %code, "Filtering for {} flights", code);
            filtered = filter_by_airline(filtered, code);
            info!(remaining = filtered.len(), "Offers after airline filter");
        }

        if let Some(time_of_day) = self.time_of_day {
            info!(time_of_day = %time_of_day, "Filtering for {} flights", time_of_day);
            filtered = filter_by_time_of_day(filtered, time_of_day, mode);
            info!(remaining = filtered.len(), "Offers after time of day filter");
        }

        filtered
    }
}

pub fn filter_by_airline(offers: Vec<Offer>, airline_code: &str) -> Vec<Offer> {
    let wanted = airline_code.to_uppercase();
    keep_matching_or_all(offers, |offer| offer.airline_code().to_uppercase() == wanted)
}

pub fn filter_by_time_of_day(
    offers: Vec<Offer>,
    time_of_day: TimeOfDay,
    mode: HeuristicMode,
) -> Vec<Offer> {
    keep_matching_or_all(offers, |offer| {
        time_of_day.matches_timestamp(&offer.departure_time(), mode)
    })
}

fn keep_matching_or_all<F>(offers: Vec<Offer>, predicate: F) -> Vec<Offer>
where
    F: Fn(&Offer) -> bool,
{
    if !offers.iter().any(&predicate) {
        return offers;
    }
    offers.into_iter().filter(|offer| predicate(offer)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FlightError;
    use crate::offer::fixtures::{ids, offer};
    use test_case::test_case;

    fn sample_offers() -> Vec<Offer> {
        vec![
            offer("off_1", "120.00", "BA", 1, "2025-06-11T08:30:00"),
            offer("off_2", "95.00", "AA", 2, "2025-06-11T14:00:00"),
            offer("off_3", "180.00", "BA", 1, "2025-06-11T19:15:00"),
            offer("off_4", "60.00", "U2", 3, "2025-06-11T02:10:00"),
        ]
    }

    #[test_case(Some("BA"), None, vec!["off_1", "off_3"]; "#1 airline")]
    #[test_case(Some("ba"), None, vec!["off_1", "off_3"]; "#2 airline is case insensitive")]
    #[test_case(Some("ZZ"), None, vec!["off_1", "off_2", "off_3", "off_4"]; "#3 unknown airline keeps everything")]
    #[test_case(None, Some("afternoon"), vec!["off_2"]; "#4 time of day")]
    #[test_case(Some("BA"), Some("evening"), vec!["off_3"]; "#5 airline then time of day")]
    #[test_case(Some("BA"), Some("afternoon"), vec!["off_1", "off_3"]; "#6 time of day falls back to airline set")]
    #[test_case(Some(""), Some(""), vec!["off_1", "off_2", "off_3", "off_4"]; "#7 empty strings do not filter")]
    fn test_criteria_apply(airline: Option<&str>, time_of_day: Option<&str>, expected: Vec<&str>) {
        let criteria = FilterCriteria::new(airline, time_of_day).unwrap();
        let filtered = criteria.apply(sample_offers(), HeuristicMode::Corrected);
        assert_eq!(ids(&filtered), expected);
    }

    #[test]
    fn test_airline_miss_returns_input_unchanged() {
        let input = sample_offers();
        let filtered = filter_by_airline(input.clone(), "XX");
        assert_eq!(filtered, input);
    }

    #[test]
    fn test_time_of_day_respects_mode() {
        let legacy = filter_by_time_of_day(sample_offers(), TimeOfDay::Evening, HeuristicMode::Legacy);
        let corrected =
            filter_by_time_of_day(sample_offers(), TimeOfDay::Evening, HeuristicMode::Corrected);

        // Legacy evening also takes the 02:10 departure
        assert_eq!(ids(&legacy), vec!["off_3", "off_4"]);
        assert_eq!(ids(&corrected), vec!["off_3"]);

        let night = filter_by_time_of_day(sample_offers(), TimeOfDay::Night, HeuristicMode::Legacy);
        assert_eq!(night.len(), 4);
    }

    #[test]
    fn test_empty_input_stays_empty() {
        assert!(filter_by_airline(Vec::new(), "BA").is_empty());
        assert!(filter_by_time_of_day(Vec::new(), TimeOfDay::Morning, HeuristicMode::Legacy).is_empty());
    }

    #[test]
    fn test_invalid_time_of_day_is_rejected() {
        let err = FilterCriteria::new(None, Some("teatime")).unwrap_err();
        assert!(matches!(err, FlightError::InvalidArgument(_)));
    }
}
