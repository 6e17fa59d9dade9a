// Best-offer selection: filter, then take the lowest score
use crate::error::{FlightError, Result};
use crate::filter::FilterCriteria;
use crate::offer::Offer;
use crate::scoring::{OfferScorer, ScoreBounds};
use crate::time_of_day::HeuristicMode;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, Default)]
pub struct OfferSelector {
    scorer: OfferScorer,
}

impl OfferSelector {
    pub fn new(mode: HeuristicMode) -> Self {
        Self {
            scorer: OfferScorer::new(mode),
        }
    }

    pub fn mode(&self) -> HeuristicMode {
        self.scorer.mode
    }

    /// Picks the best offer after applying the optional airline and day-part filters.
    ///
    /// Ties go to the earliest offer in input order. Fails with `InvalidArgument` for an
    /// unknown day-part label and with `EmptyOfferSet` when there is nothing to choose from.
    pub fn select_best(
        &self,
        offers: Vec<Offer>,
        airline_code: Option<&str>,
        time_of_day: Option<&str>,
    ) -> Result<Offer> {
        let criteria = FilterCriteria::new(airline_code, time_of_day)?;
        self.select_with(offers, &criteria)
    }

    pub fn select_with(&self, offers: Vec<Offer>, criteria: &FilterCriteria) -> Result<Offer> {
        info!(count = offers.len(), "Getting best offer from {} offers", offers.len());

        let candidates = criteria.apply(offers, self.scorer.mode);
        let bounds = ScoreBounds::from_offers(&candidates).ok_or(FlightError::EmptyOfferSet)?;

        let mut best: Option<(f64, Offer)> = None;
        for offer in candidates {
            let score = self.scorer.score(&offer, &bounds);
            debug!(offer_id = offer.id(), score, "Scored offer");

            let better = match &best {
                Some((best_score, _)) => score < *best_score,
                None => true,
            };
            if better {
                best = Some((score, offer));
            }
        }

        best.map(|(_, offer)| offer).ok_or(FlightError::EmptyOfferSet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::offer::fixtures::offer;

    fn cheap_two_stop_and_pricey_direct() -> Vec<Offer> {
        vec![
            offer("cheap", "100.00", "BA", 2, "2025-06-11T08:30:00"),
            offer("direct", "200.00", "AA", 1, "2025-06-11T14:00:00"),
        ]
    }

    #[test]
    fn test_legacy_selection_minimises_segments() {
        let selector = OfferSelector::new(HeuristicMode::Legacy);
        let best = selector
            .select_best(cheap_two_stop_and_pricey_direct(), None, None)
            .unwrap();
        assert_eq!(best.id(), "direct");
    }

    #[test]
    fn test_corrected_selection_accounts_for_cost() {
        let selector = OfferSelector::new(HeuristicMode::Corrected);
        let best = selector
            .select_best(cheap_two_stop_and_pricey_direct(), None, None)
            .unwrap();
        assert_eq!(best.id(), "cheap");
    }

    #[test]
    fn test_ties_go_to_first_offer() {
        let offers = vec![
            offer("first", "300.00", "BA", 1, "2025-06-11T08:30:00"),
            offer("second", "100.00", "BA", 1, "2025-06-11T09:30:00"),
            offer("third", "100.00", "BA", 1, "2025-06-11T10:30:00"),
        ];

        let legacy = OfferSelector::new(HeuristicMode::Legacy);
        assert_eq!(legacy.select_best(offers.clone(), None, None).unwrap().id(), "first");

        let corrected = OfferSelector::new(HeuristicMode::Corrected);
        assert_eq!(corrected.select_best(offers, None, None).unwrap().id(), "second");
    }

    #[test]
    fn test_selection_stays_within_filtered_set() {
        let offers = vec![
            offer("ba_morning", "150.00", "BA", 2, "2025-06-11T08:30:00"),
            offer("aa_morning", "90.00", "AA", 1, "2025-06-11T09:00:00"),
            offer("ba_evening", "120.00", "BA", 1, "2025-06-11T20:00:00"),
            offer("ba_morning_direct", "300.00", "BA", 1, "2025-06-11T07:45:00"),
        ];

        for mode in [HeuristicMode::Legacy, HeuristicMode::Corrected] {
            let best = OfferSelector::new(mode)
                .select_best(offers.clone(), Some("ba"), Some("morning"))
                .unwrap();
            assert!(["ba_morning", "ba_morning_direct"].contains(&best.id()));
        }

        let legacy = OfferSelector::new(HeuristicMode::Legacy)
            .select_best(offers.clone(), Some("BA"), Some("morning"))
            .unwrap();
        assert_eq!(legacy.id(), "ba_morning_direct");
    }

    #[test]
    fn test_filters_fall_back_when_nothing_matches() {
        let offers = cheap_two_stop_and_pricey_direct();
        let best = OfferSelector::new(HeuristicMode::Legacy)
            .select_best(offers, Some("LH"), Some("afternoon"))
            .unwrap();
        assert_eq!(best.id(), "direct");
    }

    #[test]
    fn test_empty_offer_set() {
        let selector = OfferSelector::default();
        assert_eq!(
            selector.select_best(Vec::new(), None, None).unwrap_err(),
            FlightError::EmptyOfferSet
        );
        assert_eq!(
            selector.select_best(Vec::new(), Some("BA"), Some("night")).unwrap_err(),
            FlightError::EmptyOfferSet
        );
    }

    #[test]
    fn test_invalid_label_fails_before_scoring() {
        let err = OfferSelector::default()
            .select_best(cheap_two_stop_and_pricey_direct(), None, Some("dawn"))
            .unwrap_err();
        assert!(matches!(err, FlightError::InvalidArgument(_)));
    }
}
