//! Price banding and tier slicing.
//!
//! Bands come from the live price distribution as soon as one priced
//! product exists: p25/p75 by nearest-rank indexing split the range into
//! `low [0, p25)`, `mid [p25, p75)`, `high [p75, +inf)`. Until then a
//! budget-derived bootstrap stands in. Bands are recomputed after every
//! hydration batch — they are never frozen before the response.

use shopscout_core::{PriceBand, PriceBands, Product};

/// Maximum products returned per tier.
pub const TIER_CAP: usize = 5;

/// Products assigned to the three tiers, each ascending by price and
/// capped at [`TIER_CAP`].
#[derive(Debug, Default, Clone)]
pub struct TierSlices {
    pub low: Vec<Product>,
    pub mid: Vec<Product>,
    pub high: Vec<Product>,
}

impl TierSlices {
    /// Total tier-assigned product count — the loop's yield measure.
    #[must_use]
    pub fn len(&self) -> usize {
        self.low.len() + self.mid.len() + self.high.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Budget-derived bootstrap bands, used only while no priced product
/// exists. Bounds scale monotonically with the budget and are clamped to
/// at least 5 so tiny budgets still produce usable intervals.
#[must_use]
pub fn fallback_bands(budget: f64) -> PriceBands {
    let low_max = (budget * 0.35).max(5.0);
    let mid_max = (budget * 0.75).max(low_max);
    PriceBands {
        low: PriceBand { min: 0.0, max: low_max },
        mid: PriceBand { min: low_max, max: mid_max },
        high: PriceBand { min: mid_max, max: f64::INFINITY },
        avg: budget,
    }
}

/// Bands from the live distribution. `None` when no prices exist yet —
/// the caller keeps its budget bootstrap in that case.
#[must_use]
pub fn bands_from_products(products: &[Product]) -> Option<PriceBands> {
    if products.is_empty() {
        return None;
    }

    let mut prices: Vec<f64> = products.iter().map(|p| p.price).collect();
    prices.sort_by(f64::total_cmp);

    let avg = prices.iter().sum::<f64>() / prices.len() as f64;
    let p25 = prices[percentile_index(prices.len(), 0.25)];
    let p75 = prices[percentile_index(prices.len(), 0.75)];

    Some(PriceBands {
        low: PriceBand { min: 0.0, max: p25 },
        mid: PriceBand { min: p25, max: p75 },
        high: PriceBand { min: p75, max: f64::INFINITY },
        avg,
    })
}

/// Nearest-rank position: `floor((n - 1) × percentile)`, clamped to the
/// valid index range.
fn percentile_index(n: usize, percentile: f64) -> usize {
    let raw = ((n - 1) as f64 * percentile).floor();
    // floor of a non-negative product; the cast cannot lose sign
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let index = raw as usize;
    index.min(n - 1)
}

/// Assigns products to tiers by band, ascending by price, capped at
/// [`TIER_CAP`] per tier.
#[must_use]
pub fn slice_tiers(products: &[Product], bands: &PriceBands) -> TierSlices {
    let mut sorted: Vec<Product> = products.to_vec();
    sorted.sort_by(|a, b| a.price.total_cmp(&b.price));

    let mut slices = TierSlices::default();
    for product in sorted {
        let tier = if bands.low.contains(product.price) {
            &mut slices.low
        } else if bands.mid.contains(product.price) {
            &mut slices.mid
        } else {
            &mut slices.high
        };
        if tier.len() < TIER_CAP {
            tier.push(product);
        }
    }
    slices
}
