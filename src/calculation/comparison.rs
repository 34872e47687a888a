//! Reconciliation of competing provider quotes.
//!
//! When every provider's TCE lies within a narrow spread, the quotes are
//! treated as interchangeable and the most profitable (highest) one is
//! recommended. Once the spread is material, the cheapest quote wins.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, Provider, SelectionRule};

use super::cost::round_money;

/// Default spread tolerance, percent.
pub const DEFAULT_SPREAD_TOLERANCE_PERCENT: Decimal = Decimal::from_parts(4, 0, 0, false, 0);

/// The reconciled choice among provider quotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// The winning provider.
    pub provider: Provider,
    /// The winner's TCE.
    pub tce: Decimal,
    /// Spread between highest and lowest TCE, percent (unrounded).
    /// `None` when the lowest TCE is not positive and the spread is unbounded.
    pub spread_percent: Option<Decimal>,
    /// Branch that picked the winner.
    pub rule: SelectionRule,
}

impl Selection {
    /// The spread for display: rounded to 2 dp, `0` when unbounded.
    pub fn display_spread(&self) -> Decimal {
        self.spread_percent.map(round_money).unwrap_or(Decimal::ZERO)
    }

    /// Records this decision as an audit step.
    pub fn audit_step(
        &self,
        candidates: &[(Provider, Decimal)],
        tolerance_percent: Decimal,
        step_number: u32,
    ) -> AuditStep {
        let spread = self
            .spread_percent
            .map(|s| round_money(s).to_string())
            .unwrap_or_else(|| "unbounded".to_string());
        let branch = match self.rule {
            SelectionRule::HighestWithinTolerance => "within tolerance, highest TCE wins",
            SelectionRule::LowestAboveTolerance => "above tolerance, lowest TCE wins",
        };

        AuditStep {
            step_number,
            rule_id: "spread_reconciliation".to_string(),
            rule_name: "Spread Reconciliation".to_string(),
            input: serde_json::json!({
                "candidates": candidates
                    .iter()
                    .map(|(provider, tce)| serde_json::json!({
                        "provider": provider.as_str(),
                        "tce": tce.to_string(),
                    }))
                    .collect::<Vec<_>>(),
                "tolerance_percent": tolerance_percent.to_string(),
            }),
            output: serde_json::json!({
                "provider": self.provider.as_str(),
                "tce": self.tce.to_string(),
                "spread_percent": spread,
            }),
            reasoning: format!(
                "Spread {}% vs tolerance {}%: {}; selected {} at {}",
                spread, tolerance_percent, branch, self.provider, self.tce
            ),
        }
    }
}

/// Computes `(max − min) / min × 100`.
///
/// Returns `Some(0)` when all values are equal, and `None` when the
/// minimum is not positive while values differ.
pub fn spread_percent(tces: &[Decimal]) -> Option<Decimal> {
    let min = tces.iter().copied().min()?;
    let max = tces.iter().copied().max()?;

    if max == min {
        Some(Decimal::ZERO)
    } else if min <= Decimal::ZERO {
        None
    } else {
        Some((max - min) / min * Decimal::ONE_HUNDRED)
    }
}

/// Picks a winning provider from `(provider, tce)` candidates.
///
/// Candidates are scanned in the given order and ties go to the first
/// candidate seen.
///
/// # Examples
///
/// ```
/// use eor_quote_engine::calculation::{select_provider, DEFAULT_SPREAD_TOLERANCE_PERCENT};
/// use eor_quote_engine::models::Provider;
/// use rust_decimal::Decimal;
///
/// let candidates = [
///     (Provider::Deel, Decimal::from(100_000)),
///     (Provider::Remote, Decimal::from(102_000)),
///     (Provider::Oyster, Decimal::from(101_000)),
/// ];
/// let selection = select_provider(&candidates, DEFAULT_SPREAD_TOLERANCE_PERCENT).unwrap();
/// assert_eq!(selection.provider, Provider::Remote);
/// ```
pub fn select_provider(
    candidates: &[(Provider, Decimal)],
    tolerance_percent: Decimal,
) -> EngineResult<Selection> {
    let Some(&first) = candidates.first() else {
        return Err(EngineError::ProviderUnavailable {
            provider: "all".to_string(),
            reason: "no provider quotes to compare".to_string(),
        });
    };

    let tces: Vec<Decimal> = candidates.iter().map(|(_, tce)| *tce).collect();
    let spread = spread_percent(&tces);
    let within_tolerance = spread.is_some_and(|s| s <= tolerance_percent);

    let (provider, tce) = candidates.iter().skip(1).fold(first, |best, &candidate| {
        let better = if within_tolerance {
            candidate.1 > best.1
        } else {
            candidate.1 < best.1
        };
        if better { candidate } else { best }
    });

    Ok(Selection {
        provider,
        tce,
        spread_percent: spread,
        rule: if within_tolerance {
            SelectionRule::HighestWithinTolerance
        } else {
            SelectionRule::LowestAboveTolerance
        },
    })
}
