use crate::core::ids::{ItemId, ParticipantId};
use crate::core::participant::Participant;
use rand::distributions::WeightedIndex;
use rand::prelude::*;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::convert::TryFrom;

/// Read-only `item_id -> base_price` lookup (§6, "Catalog collaborator").
pub trait Catalog {
    fn item_ids(&self) -> &[ItemId];
    fn base_price(&self, item_id: &ItemId) -> Option<Decimal>;
}

/// An in-memory catalog, loadable from a JSON object of `item_id: price`.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    prices: HashMap<String, Decimal>,
    ids: Vec<ItemId>,
}

impl StaticCatalog {
    pub fn from_map(prices: HashMap<String, Decimal>) -> Self {
        let ids = prices.keys().map(|k| ItemId::new(k.clone())).collect();
        Self { prices, ids }
    }

    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, std::io::Error> {
        let text = std::fs::read_to_string(path)?;
        let prices: HashMap<String, Decimal> = serde_json::from_str(&text)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(Self::from_map(prices))
    }

    /// A small deterministic catalog for `generate`/demo use when no
    /// `catalog_path` is configured. Values are spread uniformly across
    /// `value_range`, a simplification of the source's log-normal
    /// weighting (see DESIGN.md).
    pub fn synthetic(num_watches: u32, value_range: (f64, f64), rng: &mut impl Rng) -> Self {
        let (lo, hi) = value_range;
        let mut prices = HashMap::with_capacity(num_watches as usize);
        for i in 0..num_watches {
            let value = rng.gen_range(lo..=hi);
            let decimal = Decimal::try_from(value).unwrap_or(Decimal::ZERO).round_dp(2);
            prices.insert(format!("W{:05}", i + 1), decimal);
        }
        Self::from_map(prices)
    }
}

impl Catalog for StaticCatalog {
    fn item_ids(&self) -> &[ItemId] {
        &self.ids
    }

    fn base_price(&self, item_id: &ItemId) -> Option<Decimal> {
        self.prices.get(item_id.as_str()).copied()
    }
}

/// `generate(count, period_index, catalog) -> Vec<Participant>` (§6,
/// "User-generator collaborator"). `rng` is `dyn`-typed rather than
/// generic so the trait stays object-safe.
pub trait ParticipantGenerator {
    fn generate(
        &self,
        count: u32,
        period_index: u32,
        catalog: &dyn Catalog,
        rng: &mut dyn RngCore,
    ) -> Vec<Participant>;
}

/// The crate's built-in deterministic generator, grounded in
/// `generate_users.py`'s `_generate_user_profile`: value-weighted item
/// choice (power-law weighting favoring cheaper items), ±10% value
/// variation, `min_acceptable = 0.7 * have_value`,
/// `max_top_up = 0.4 * have_value`.
pub struct DefaultGenerator;

impl ParticipantGenerator for DefaultGenerator {
    fn generate(
        &self,
        count: u32,
        period_index: u32,
        catalog: &dyn Catalog,
        rng: &mut dyn RngCore,
    ) -> Vec<Participant> {
        let items = catalog.item_ids();
        if items.is_empty() || count == 0 {
            return Vec::new();
        }

        let prices: Vec<f64> = items
            .iter()
            .map(|id| decimal_to_f64(catalog.base_price(id).unwrap_or(Decimal::ZERO)))
            .collect();
        let min_v = prices.iter().cloned().fold(f64::INFINITY, f64::min);
        let max_v = prices.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let span = (max_v - min_v).max(f64::EPSILON);
        let weights: Vec<f64> = prices
            .iter()
            .map(|v| {
                let normalized = (v - min_v) / span;
                1.0 / (normalized.sqrt() + 0.1)
            })
            .collect();
        let dist = WeightedIndex::new(&weights).expect("catalog must carry positive weights");

        (0..count)
            .map(|i| {
                let idx = dist.sample(rng);
                let item_id = items[idx].clone();
                let variation: f64 = rng.gen_range(-0.1..=0.1);
                let have_value = round2(prices[idx] * (1.0 + variation));
                let min_acceptable = round2(have_value * 0.7);
                let max_top_up = round2(have_value * 0.4);
                Participant::new(
                    ParticipantId::new(format!("U{:03}_{:05}", period_index, i + 1)),
                    item_id,
                    decimal_from_f64(have_value),
                    decimal_from_f64(min_acceptable),
                    decimal_from_f64(max_top_up),
                    period_index,
                )
            })
            .collect()
    }
}

fn decimal_to_f64(d: Decimal) -> f64 {
    d.to_string().parse::<f64>().unwrap_or(0.0)
}

fn decimal_from_f64(v: f64) -> Decimal {
    Decimal::try_from(v).unwrap_or(Decimal::ZERO).round_dp(2)
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
