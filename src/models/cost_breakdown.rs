//! Cost breakdown models.
//!
//! [`CostBreakdown`] is the single canonical result of a cost calculation.
//! Each provider presents it under its own field naming convention through
//! [`ProviderQuoteBody::project`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Provider;

/// The employer cost of one annual salary in one country.
///
/// All monetary values are rounded to 2 decimal places.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostBreakdown {
    /// Annual gross salary.
    pub salary: Decimal,
    /// Employer payroll tax.
    pub employer_tax: Decimal,
    /// Mandatory benefits cost.
    pub benefits_cost: Decimal,
    /// Flat provider fees.
    pub fixed_fees: Decimal,
    /// Termination reserve amortized over the probation period.
    pub termination_amortization: Decimal,
    /// Total cost of employment.
    pub tce: Decimal,
}

impl CostBreakdown {
    /// Sum of every component except the total.
    pub fn component_sum(&self) -> Decimal {
        self.salary
            + self.employer_tax
            + self.benefits_cost
            + self.fixed_fees
            + self.termination_amortization
    }

    /// Everything the employer pays on top of salary.
    pub fn overhead(&self) -> Decimal {
        self.tce - self.salary
    }
}

/// Identifies where a quote is for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteContext {
    /// Country code.
    pub country_code: String,
    /// Currency the figures are expressed in.
    pub currency_code: String,
}

/// `deel` response shape: snake_case with nested employer costs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeelQuote {
    /// Always "deel".
    pub provider: String,
    /// Country code.
    pub country: String,
    /// Currency code.
    pub currency: String,
    /// Annual salary.
    pub salary: Decimal,
    /// Employer-side cost components.
    pub employer_costs: DeelEmployerCosts,
    /// Total cost of employment.
    pub total_cost: Decimal,
}

/// Employer-side components of a [`DeelQuote`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeelEmployerCosts {
    /// Employer tax.
    pub tax: Decimal,
    /// Benefits.
    pub benefits: Decimal,
    /// Fees.
    pub fees: Decimal,
    /// Termination reserve.
    pub termination_reserve: Decimal,
}

/// `remote` response shape: flat camelCase fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteQuote {
    /// Always "remote".
    pub provider: String,
    /// Country code.
    pub country_code: String,
    /// Currency code.
    pub currency_code: String,
    /// Annual salary.
    pub gross_salary: Decimal,
    /// Employer tax.
    pub employer_contributions: Decimal,
    /// Benefits.
    pub benefits_cost: Decimal,
    /// Fees.
    pub platform_fee: Decimal,
    /// Termination reserve.
    pub severance_accrual: Decimal,
    /// Total cost of employment.
    pub total_employment_cost: Decimal,
}

/// A labelled line in an [`OysterQuote`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OysterLine {
    /// Line label.
    pub label: String,
    /// Line amount.
    pub amount: Decimal,
}

/// Body of an [`OysterQuote`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OysterQuoteBody {
    /// Country code.
    pub country_code: String,
    /// Currency code.
    pub currency: String,
    /// Annual salary.
    pub annual_salary: Decimal,
    /// Cost lines, salary excluded.
    pub breakdown: Vec<OysterLine>,
    /// Total cost of employment.
    pub total: Decimal,
}

/// `oyster` response shape: a wrapped quote with line items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OysterQuote {
    /// Always "oyster".
    pub provider: String,
    /// The quote body.
    pub quote: OysterQuoteBody,
}

/// A provider-shaped quote response.
///
/// The variants carry the same numbers under different field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProviderQuoteBody {
    /// `deel` shape.
    Deel(DeelQuote),
    /// `remote` shape.
    Remote(RemoteQuote),
    /// `oyster` shape.
    Oyster(OysterQuote),
}

impl ProviderQuoteBody {
    /// Projects a canonical breakdown into the provider's response shape.
    ///
    /// # Example
    ///
    /// ```
    /// use eor_quote_engine::models::{CostBreakdown, Provider, ProviderQuoteBody, QuoteContext};
    /// use rust_decimal::Decimal;
    ///
    /// let costs = CostBreakdown {
    ///     salary: Decimal::new(100_000, 0),
    ///     employer_tax: Decimal::new(7_650, 0),
    ///     benefits_cost: Decimal::new(20_000, 0),
    ///     fixed_fees: Decimal::new(600, 0),
    ///     termination_amortization: Decimal::new(12_500, 0),
    ///     tce: Decimal::new(140_750, 0),
    /// };
    /// let context = QuoteContext { country_code: "US".into(), currency_code: "USD".into() };
    ///
    /// let body = ProviderQuoteBody::project(Provider::Remote, &context, &costs);
    /// let json = serde_json::to_value(&body).unwrap();
    /// assert_eq!(json["totalEmploymentCost"], "140750");
    /// ```
    pub fn project(provider: Provider, context: &QuoteContext, costs: &CostBreakdown) -> Self {
        match provider {
            Provider::Deel => ProviderQuoteBody::Deel(DeelQuote {
                provider: provider.to_string(),
                country: context.country_code.clone(),
                currency: context.currency_code.clone(),
                salary: costs.salary,
                employer_costs: DeelEmployerCosts {
                    tax: costs.employer_tax,
                    benefits: costs.benefits_cost,
                    fees: costs.fixed_fees,
                    termination_reserve: costs.termination_amortization,
                },
                total_cost: costs.tce,
            }),
            Provider::Remote => ProviderQuoteBody::Remote(RemoteQuote {
                provider: provider.to_string(),
                country_code: context.country_code.clone(),
                currency_code: context.currency_code.clone(),
                gross_salary: costs.salary,
                employer_contributions: costs.employer_tax,
                benefits_cost: costs.benefits_cost,
                platform_fee: costs.fixed_fees,
                severance_accrual: costs.termination_amortization,
                total_employment_cost: costs.tce,
            }),
            Provider::Oyster => ProviderQuoteBody::Oyster(OysterQuote {
                provider: provider.to_string(),
                quote: OysterQuoteBody {
                    country_code: context.country_code.clone(),
                    currency: context.currency_code.clone(),
                    annual_salary: costs.salary,
                    breakdown: vec![
                        OysterLine {
                            label: "Employer taxes".to_string(),
                            amount: costs.employer_tax,
                        },
                        OysterLine {
                            label: "Benefits".to_string(),
                            amount: costs.benefits_cost,
                        },
                        OysterLine {
                            label: "Fees".to_string(),
                            amount: costs.fixed_fees,
                        },
                        OysterLine {
                            label: "Termination reserve".to_string(),
                            amount: costs.termination_amortization,
                        },
                    ],
                    total: costs.tce,
                },
            }),
        }
    }
}
