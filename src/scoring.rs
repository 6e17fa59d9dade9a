// Weighted offer scoring; lower scores are better
use crate::offer::Offer;
use crate::time_of_day::HeuristicMode;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

pub const COST_WEIGHT: f64 = 0.7;
pub const SEGMENTS_WEIGHT: f64 = 0.3;

// Min-max normalisation; a zero-width range always yields 0
pub fn normalize(value: f64, min: f64, max: f64) -> f64 {
    if max - min == 0.0 {
        return 0.0;
    }
    (value - min) / (max - min)
}

// Ranges of the candidate set an offer is scored against
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBounds {
    pub min_cost: Decimal,
    pub max_cost: Decimal,
    pub max_segments: usize,
}

impl ScoreBounds {
    // None for an empty candidate set
    pub fn from_offers(offers: &[Offer]) -> Option<Self> {
        let first = offers.first()?;
        let initial = Self {
            min_cost: first.total_amount(),
            max_cost: first.total_amount(),
            max_segments: first.num_segments(),
        };

        Some(offers.iter().skip(1).fold(initial, |bounds, offer| Self {
            min_cost: bounds.min_cost.min(offer.total_amount()),
            max_cost: bounds.max_cost.max(offer.total_amount()),
            max_segments: bounds.max_segments.max(offer.num_segments()),
        }))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OfferScorer {
    pub cost_weight: f64,
    pub segments_weight: f64,
    pub mode: HeuristicMode,
}

impl Default for OfferScorer {
    fn default() -> Self {
        Self::new(HeuristicMode::default())
    }
}

impl OfferScorer {
    pub fn new(mode: HeuristicMode) -> Self {
        Self {
            cost_weight: COST_WEIGHT,
            segments_weight: SEGMENTS_WEIGHT,
            mode,
        }
    }

    pub fn score(&self, offer: &Offer, bounds: &ScoreBounds) -> f64 {
        let min_cost = to_f64(bounds.min_cost);
        // Legacy scoring normalises cost against (min, min), which always gives 0
        let cost_upper = match self.mode {
            HeuristicMode::Legacy => min_cost,
            HeuristicMode::Corrected => to_f64(bounds.max_cost),
        };

        let normalized_cost = normalize(to_f64(offer.total_amount()), min_cost, cost_upper);
        let normalized_segments =
            normalize(offer.num_segments() as f64, 0.0, bounds.max_segments as f64);

        self.cost_weight * normalized_cost + self.segments_weight * normalized_segments
    }
}

fn to_f64(amount: Decimal) -> f64 {
    amount.to_f64().unwrap_or(f64::MAX)
}
