//! Fraud assignment.
//!
//! Picks exactly `target_fraud_count` rows, biased toward high risk but
//! not a plain top-K cut:
//!   1. rank rows by risk score, descending
//!   2. keep the top `max(target * 10, 10% of rows)` as the candidate pool
//!   3. weight each candidate by sigmoid(risk - 4.0)
//!   4. draw `target` candidates without replacement, proportional to weight
//!
//! Step 4 removes each pick from the pool, so it runs exactly `target`
//! iterations. The pool is enlarged to hold at least `target` rows.

use crate::{
    config::GeneratorConfig,
    row_synthesis::ScoredRow,
    rng::DatasetRng,
    types::RowIndex,
};
use serde::Serialize;
use std::collections::BTreeSet;

const CANDIDATE_MULTIPLIER: usize = 10;
const CANDIDATE_MIN_SHARE: f64 = 0.10;
const WEIGHT_CENTER: f64 = 4.0;

/// The run's fraud target, drawn once before any row exists.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FraudPlan {
    pub fraud_rate: f64,
    pub target_fraud_count: usize,
}

impl FraudPlan {
    /// Uniform rate in the configured range; count is `round(rows * rate)`, at least 1.
    pub fn draw(config: &GeneratorConfig, rng: &mut DatasetRng) -> Self {
        let fraud_rate = rng.uniform(config.fraud_rate_min, config.fraud_rate_max);
        let target_fraud_count = target_count(config.row_count, fraud_rate);
        Self {
            fraud_rate,
            target_fraud_count,
        }
    }
}

/// `max(1, round(rows * rate))`, never more than `rows`.
pub fn target_count(rows: usize, fraud_rate: f64) -> usize {
    let raw = (rows as f64 * fraud_rate).round() as usize;
    raw.max(1).min(rows)
}

/// Candidate pool size for `rows` rows and a given target.
///
/// Starts from `max(target * 10, floor(rows * 0.10))`, is capped at `rows`,
/// then enlarged to at least `target` so the draw loop always completes.
pub fn candidate_pool_size(rows: usize, target: usize) -> usize {
    let by_target = target.saturating_mul(CANDIDATE_MULTIPLIER);
    let by_share = (rows as f64 * CANDIDATE_MIN_SHARE) as usize;
    let pool = by_target.max(by_share).min(rows);
    if pool < target {
        log::warn!("candidate pool {pool} smaller than target {target}; enlarging");
    }
    pool.max(target)
}

pub fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

/// Row indices sorted by risk, highest first. Ties keep generation order.
pub fn rank_by_risk(rows: &[ScoredRow]) -> Vec<RowIndex> {
    let mut order: Vec<RowIndex> = (0..rows.len()).collect();
    order.sort_by(|&a, &b| rows[b].risk_score.total_cmp(&rows[a].risk_score));
    order
}

/// Outcome of fraud selection: the chosen rows plus the pool they came from.
#[derive(Debug, Clone, PartialEq)]
pub struct FraudSelection {
    pub selected: BTreeSet<RowIndex>,
    pub candidate_pool_size: usize,
}

/// Stage 3: choose which rows become fraud.
pub fn select_fraud(rows: &[ScoredRow], plan: &FraudPlan, rng: &mut DatasetRng) -> FraudSelection {
    let target = plan.target_fraud_count.min(rows.len());
    let pool_size = candidate_pool_size(rows.len(), target);

    let ranked = rank_by_risk(rows);
    let mut candidates: Vec<(RowIndex, f64)> = ranked[..pool_size]
        .iter()
        .map(|&i| (i, sigmoid(rows[i].risk_score - WEIGHT_CENTER)))
        .collect();

    log::debug!(
        "fraud pool: {pool_size} candidates, risk range {:.3}..{:.3}",
        candidates.last().map(|&(i, _)| rows[i].risk_score).unwrap_or(0.0),
        candidates.first().map(|&(i, _)| rows[i].risk_score).unwrap_or(0.0)
    );

    let mut selected = BTreeSet::new();
    for _ in 0..target {
        let pick = draw_and_remove(&mut candidates, rng);
        selected.insert(pick);
    }

    FraudSelection {
        selected,
        candidate_pool_size: pool_size,
    }
}

/// One roulette-wheel draw over the remaining candidates, removing the pick.
/// Weights are renormalized implicitly by scaling the roll to the remaining total.
fn draw_and_remove(candidates: &mut Vec<(RowIndex, f64)>, rng: &mut DatasetRng) -> RowIndex {
    let total: f64 = candidates.iter().map(|&(_, w)| w).sum();
    let roll = rng.next_f64();

    let slot = if total.is_finite() && total > 0.0 {
        let target = roll * total;
        let mut cumulative = 0.0;
        candidates
            .iter()
            .position(|&(_, w)| {
                cumulative += w;
                target < cumulative
            })
            .unwrap_or(candidates.len() - 1)
    } else {
        // Degenerate weights: take the highest-risk remaining candidate.
        0
    };

    // `remove` keeps the remaining candidates in risk order.
    candidates.remove(slot).0
}

/// A ScoredRow plus its final fraud label.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledRow {
    pub row: ScoredRow,
    pub is_fraud: bool,
}

/// Attach labels without mutating the scored rows. Order is preserved.
pub fn label_rows(rows: Vec<ScoredRow>, selection: &FraudSelection) -> Vec<LabeledRow> {
    rows.into_iter()
        .enumerate()
        .map(|(i, row)| LabeledRow {
            is_fraud: selection.selected.contains(&i),
            row,
        })
        .collect()
}
