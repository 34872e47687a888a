//! Margin, risk and viability validation of a chosen quote.
//!
//! Validation decides whether a reconciled quote can be approved
//! automatically or must go to manual review. It is pure; every threshold
//! comes from [`ValidationThresholds`].

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::ValidationThresholds;
use crate::models::{AuditStep, ServiceType, ValidationResult};

use super::cost::round_money;

const BASE_RISK_SCORE: i64 = 50;
const MAX_RISK_SCORE: i64 = 100;

/// Percentage margin left after the assumed internal costs.
///
/// Zero when `tce` is not positive.
pub fn margin_percent(tce: Decimal, internal_cost_ratio: Decimal) -> Decimal {
    if tce <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let internal_costs = tce * internal_cost_ratio;
    (tce - internal_costs) / tce * Decimal::ONE_HUNDRED
}

/// Scores a quote from 0 (safe) to 100 (risky).
///
/// Adjustments are additive from a base of 50, then scaled by the service
/// type's multiplier, clamped and rounded:
///
/// | Condition | Adjustment |
/// |---|---|
/// | tce > max_tce | +20 |
/// | tce > 70% of max_tce | +10 |
/// | salary / tce < 0.6 | +15 |
/// | salary / tce > 0.9 | −10 |
/// | high-risk country | +10 |
/// | low-risk country | −5 |
pub fn risk_score(
    tce: Decimal,
    salary: Decimal,
    country_code: &str,
    service_type: ServiceType,
    thresholds: &ValidationThresholds,
) -> u32 {
    let mut score = Decimal::from(BASE_RISK_SCORE);

    if tce > thresholds.max_tce {
        score += Decimal::from(20);
    } else if tce > thresholds.max_tce * Decimal::new(7, 1) {
        score += Decimal::from(10);
    }

    if tce > Decimal::ZERO {
        let salary_ratio = salary / tce;
        if salary_ratio < Decimal::new(6, 1) {
            score += Decimal::from(15);
        } else if salary_ratio > Decimal::new(9, 1) {
            score -= Decimal::from(10);
        }
    }

    let country = country_code.trim().to_ascii_uppercase();
    if thresholds.high_risk_countries.contains(&country) {
        score += Decimal::from(10);
    } else if thresholds.low_risk_countries.contains(&country) {
        score -= Decimal::from(5);
    }

    let scaled = (score * service_type.risk_multiplier())
        .max(Decimal::ZERO)
        .min(Decimal::from(MAX_RISK_SCORE))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

    scaled.to_u32().unwrap_or(MAX_RISK_SCORE as u32)
}

/// Cash-flow viability check.
///
/// Contractors pass automatically. Others fail when the TCE exceeds the
/// maximum, or when `(salary × 1.2) / (tce / 12)` falls below the
/// configured ratio.
pub fn acid_test(
    tce: Decimal,
    salary: Decimal,
    service_type: ServiceType,
    thresholds: &ValidationThresholds,
) -> bool {
    if !service_type.requires_acid_test() {
        return true;
    }
    if tce > thresholds.max_tce {
        return false;
    }
    if tce <= Decimal::ZERO {
        return true;
    }

    let monthly_tce = tce / Decimal::from(12);
    let cash_flow_ratio = salary * Decimal::new(12, 1) / monthly_tce;
    cash_flow_ratio >= thresholds.cash_flow_ratio_threshold
}

/// Validates a chosen quote.
///
/// # Arguments
///
/// * `tce` - The chosen provider's total cost of employment
/// * `salary` - The salary the chosen quote was computed for
/// * `country_code` - Country of the hire
/// * `service_type` - Engagement category (see [`ServiceType::from_role`])
/// * `thresholds` - Configured validation thresholds
///
/// # Returns
///
/// The validation result. Manual review is required when any error is
/// raised, the risk score exceeds its threshold, the margin is below the
/// service type's minimum, or the TCE exceeds the maximum.
///
/// # Examples
///
/// ```
/// use eor_quote_engine::calculation::validate;
/// use eor_quote_engine::config::ValidationThresholds;
/// use eor_quote_engine::models::ServiceType;
/// use rust_decimal::Decimal;
///
/// let result = validate(
///     Decimal::from(130_000),
///     Decimal::from(100_000),
///     "DE",
///     ServiceType::FullTimeEmployee,
///     &ValidationThresholds::default(),
/// );
/// assert!(result.is_valid);
/// assert_eq!(result.margin_percent, Decimal::from(20));
/// assert!(!result.requires_manual_review);
/// ```
pub fn validate(
    tce: Decimal,
    salary: Decimal,
    country_code: &str,
    service_type: ServiceType,
    thresholds: &ValidationThresholds,
) -> ValidationResult {
    let mut warnings = Vec::new();
    let mut errors = Vec::new();

    // Gates compare the raw margin; only the reported figure is rounded.
    let raw_margin = margin_percent(tce, thresholds.internal_cost_ratio);
    let margin = round_money(raw_margin);
    let min_margin = thresholds.min_margin_for(service_type);
    let below_minimum = raw_margin < min_margin;

    if below_minimum {
        errors.push(format!(
            "Margin {}% is below the {}% minimum for {} quotes",
            margin,
            min_margin,
            service_type.as_str()
        ));
    }
    if raw_margin < thresholds.target_margin {
        warnings.push(format!(
            "Margin {}% is below the {}% target",
            margin, thresholds.target_margin
        ));
    }
    if raw_margin <= thresholds.margin_risk_threshold {
        warnings.push(format!(
            "Margin {}% is at or below the {}% risk threshold",
            margin, thresholds.margin_risk_threshold
        ));
    }

    let risk_score = risk_score(tce, salary, country_code, service_type, thresholds);
    let acid_test_passed = acid_test(tce, salary, service_type, thresholds);
    if !acid_test_passed {
        warnings.push("Cash-flow acid test failed".to_string());
    }

    let exceeds_max_tce = tce > thresholds.max_tce;
    let requires_manual_review = !errors.is_empty()
        || risk_score > thresholds.risk_score_threshold
        || below_minimum
        || exceeds_max_tce;

    ValidationResult {
        is_valid: errors.is_empty(),
        warnings,
        errors,
        risk_score,
        margin_percent: margin,
        acid_test_passed,
        requires_manual_review,
        service_type,
    }
}

/// Records a validation result as an audit step.
pub fn validation_audit_step(
    tce: Decimal,
    salary: Decimal,
    country_code: &str,
    result: &ValidationResult,
    step_number: u32,
) -> AuditStep {
    AuditStep {
        step_number,
        rule_id: "quote_validation".to_string(),
        rule_name: "Margin and Risk Validation".to_string(),
        input: serde_json::json!({
            "tce": tce.to_string(),
            "salary": salary.to_string(),
            "country_code": country_code,
            "service_type": result.service_type.as_str(),
        }),
        output: serde_json::json!({
            "margin_percent": result.margin_percent.to_string(),
            "risk_score": result.risk_score,
            "acid_test_passed": result.acid_test_passed,
            "requires_manual_review": result.requires_manual_review,
            "errors": result.errors,
        }),
        reasoning: format!(
            "Margin {}%, risk score {}, acid test {}: {}",
            result.margin_percent,
            result.risk_score,
            if result.acid_test_passed { "passed" } else { "failed" },
            if result.requires_manual_review {
                "manual review required"
            } else {
                "auto-approved"
            }
        ),
    }
}
