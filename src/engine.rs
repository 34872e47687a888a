//! The quote engine.
//!
//! [`QuoteEngine`] owns the rate tables, the contract and quote stores,
//! the random source and the scheduler, and exposes every operation the
//! HTTP layer needs. It is shared across handlers behind an `Arc`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use chrono::Utc;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::calculation::{
    MAX_SALARY, SimulatedQuote, build_primary_table, derive_provider_table, fallback_table,
    select_provider, simulate_quote, validate, validation_audit_step,
};
use crate::config::{EngineSettings, RateSource};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditTrace, Contract, ContractInput, CountryRateEntry, Provider, ProviderCosts, QuoteQuery,
    QuoteRecord, QuoteStatus, ReviewAction, ServiceType,
};
use crate::scheduler::{Scheduler, TokioScheduler};
use crate::store::{
    ContractStore, ProviderRateTables, QuoteStore, RateTable, RateTableStore, ReadyTransition,
};

/// Result of a single-provider quote request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuoteOutcome {
    /// Costs computed synchronously.
    Immediate(SimulatedQuote),
    /// A pending contract that becomes ready after the configured delay.
    Deferred(Contract),
}

/// Number of countries a provider covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderCoverage {
    /// Provider.
    pub provider: Provider,
    /// Countries in its rate table.
    pub countries: usize,
}

/// State of the loaded rate tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateTablesSummary {
    /// True when the fallback table is in use.
    pub degraded: bool,
    /// Coverage per provider, in provider order.
    pub providers: Vec<ProviderCoverage>,
}

/// Composition root for quoting, comparison and review.
pub struct QuoteEngine {
    rates: RateTableStore,
    source: Arc<dyn RateSource>,
    settings: Arc<EngineSettings>,
    contracts: HashMap<Provider, Arc<ContractStore>>,
    quotes: QuoteStore,
    scheduler: Arc<dyn Scheduler>,
    rng: Mutex<StdRng>,
}

impl QuoteEngine {
    /// Creates an engine that schedules contracts on tokio.
    ///
    /// Rate tables are loaded immediately; unusable seed data installs the
    /// fallback table rather than failing.
    pub fn new(source: Arc<dyn RateSource>, settings: EngineSettings) -> Self {
        Self::with_scheduler(source, settings, Arc::new(TokioScheduler))
    }

    /// Creates an engine with an explicit scheduler.
    pub fn with_scheduler(
        source: Arc<dyn RateSource>,
        settings: EngineSettings,
        scheduler: Arc<dyn Scheduler>,
    ) -> Self {
        let rng = match settings.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let tables = load_tables(source.as_ref());

        Self {
            rates: RateTableStore::new(tables),
            source,
            settings: Arc::new(settings),
            contracts: Provider::ALL
                .into_iter()
                .map(|provider| (provider, Arc::new(ContractStore::new())))
                .collect(),
            quotes: QuoteStore::new(),
            scheduler,
            rng: Mutex::new(rng),
        }
    }

    /// The active settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// True when the fallback rate table is in use.
    pub fn is_degraded(&self) -> bool {
        self.rates.snapshot().is_degraded()
    }

    /// Describes the currently loaded rate tables.
    pub fn rate_summary(&self) -> RateTablesSummary {
        summarize(&self.rates.snapshot())
    }

    /// Re-derives every provider table from the rate source and swaps them
    /// in atomically.
    ///
    /// In-flight readers keep the snapshot they started with.
    pub fn reload_rate_tables(&self) -> RateTablesSummary {
        let tables = load_tables(self.source.as_ref());
        let summary = summarize(&tables);
        self.rates.replace(tables);

        info!(
            degraded = summary.degraded,
            providers = summary.providers.len(),
            "Rate tables reloaded"
        );
        summary
    }

    /// Country codes a provider covers, in order.
    pub fn countries(&self, provider: Provider) -> EngineResult<Vec<String>> {
        let snapshot = self.rates.snapshot();
        Ok(provider_table(&snapshot, provider)?.country_codes())
    }

    /// A provider's rate entry for a country, including its role bands.
    pub fn country_entry(&self, provider: Provider, country_code: &str) -> EngineResult<CountryRateEntry> {
        let snapshot = self.rates.snapshot();
        provider_table(&snapshot, provider)?
            .get(country_code)
            .cloned()
            .ok_or_else(|| EngineError::CountryNotFound {
                provider: provider.to_string(),
                country: country_code.to_string(),
            })
    }

    /// Quotes a single provider.
    ///
    /// # Arguments
    ///
    /// * `provider` - The provider to quote
    /// * `country_code` - Country to hire in
    /// * `salary` - Requested annual salary
    /// * `role` - Optional role title
    /// * `async_mode` - When true, return a pending contract instead of costs
    ///
    /// # Returns
    ///
    /// Costs immediately, or a pending contract. An unsupported country
    /// fails with `CountryNotFound` in both modes and creates no contract.
    pub fn compute_quote(
        &self,
        provider: Provider,
        country_code: &str,
        salary: Decimal,
        role: Option<&str>,
        async_mode: bool,
    ) -> EngineResult<QuoteOutcome> {
        let snapshot = self.rates.snapshot();
        let table = provider_table(&snapshot, provider)?;
        let quote = simulate_quote(
            provider,
            table,
            country_code,
            salary,
            role,
            &self.settings,
            &mut *self.rng(),
        )?;

        if !async_mode {
            return Ok(QuoteOutcome::Immediate(quote));
        }

        let contract = Contract::pending(
            provider,
            ContractInput {
                country_code: quote.country_code.clone(),
                salary,
                role: role.map(str::to_string),
            },
            quote.currency_code.clone(),
        );
        let store = self.contract_store(provider)?;
        store.insert(contract.clone());

        let contract_id = contract.id;
        let costs = quote.costs;
        self.scheduler.schedule(
            self.settings.contract_ready_delay(),
            Box::new(move || match store.mark_ready(contract_id, costs) {
                ReadyTransition::Applied => {
                    info!(contract_id = %contract_id, provider = %provider, "Contract ready");
                }
                transition => {
                    error!(
                        contract_id = %contract_id,
                        provider = %provider,
                        transition = ?transition,
                        "Contract ready transition did not apply"
                    );
                    debug_assert!(false, "contract {} transition {:?}", contract_id, transition);
                }
            }),
        );

        info!(
            contract_id = %contract.id,
            provider = %provider,
            country = %contract.input.country_code,
            delay_ms = self.settings.contract_ready_delay_ms,
            "Contract created"
        );
        Ok(QuoteOutcome::Deferred(contract))
    }

    /// Current state of a provider's contract.
    pub fn contract_status(&self, provider: Provider, contract_id: Uuid) -> EngineResult<Contract> {
        self.contract_store(provider)?.get(contract_id)
    }

    /// Quotes every provider, reconciles, validates and stores the result.
    ///
    /// All providers are evaluated against one rate-table snapshot. Any
    /// provider failure fails the whole comparison. A salary above
    /// [`MAX_SALARY`] is rejected before any provider is quoted.
    pub fn compare_providers(&self, query: QuoteQuery) -> EngineResult<QuoteRecord> {
        if query.salary > MAX_SALARY {
            return Err(EngineError::InvalidInput {
                field: "salary".to_string(),
                message: format!("must not exceed {}", MAX_SALARY),
            });
        }

        let start_time = Instant::now();
        let snapshot = self.rates.snapshot();
        let mut audit_trace = AuditTrace::default();
        let mut provider_costs = Vec::with_capacity(Provider::ALL.len());

        {
            let mut rng = self.rng();
            for provider in Provider::ALL {
                let quote = provider_table(&snapshot, provider)
                    .and_then(|table| {
                        simulate_quote(
                            provider,
                            table,
                            &query.country_code,
                            query.salary,
                            Some(query.role.as_str()),
                            &self.settings,
                            &mut *rng,
                        )
                    })
                    .map_err(|err| match err {
                        EngineError::CountryNotFound { .. } => err,
                        other => EngineError::ProviderUnavailable {
                            provider: provider.to_string(),
                            reason: other.to_string(),
                        },
                    })?;

                audit_trace
                    .steps
                    .push(quote.audit_step(audit_trace.next_step_number()));
                provider_costs.push(ProviderCosts {
                    provider,
                    currency_code: quote.currency_code,
                    costs: quote.costs,
                });
            }
        }

        let candidates: Vec<(Provider, Decimal)> = provider_costs
            .iter()
            .map(|pc| (pc.provider, pc.costs.tce))
            .collect();
        let tolerance = self.settings.spread_tolerance_percent;
        let selection = select_provider(&candidates, tolerance)?;
        audit_trace.steps.push(selection.audit_step(
            &candidates,
            tolerance,
            audit_trace.next_step_number(),
        ));

        let chosen_salary = provider_costs
            .iter()
            .find(|pc| pc.provider == selection.provider)
            .map_or(query.salary, |pc| pc.costs.salary);
        let service_type = ServiceType::from_role(&query.role);
        let validation = validate(
            selection.tce,
            chosen_salary,
            &query.country_code,
            service_type,
            &self.settings.validation,
        );
        audit_trace.steps.push(validation_audit_step(
            selection.tce,
            chosen_salary,
            &query.country_code,
            &validation,
            audit_trace.next_step_number(),
        ));
        audit_trace.duration_us = start_time.elapsed().as_micros() as u64;

        let record = QuoteRecord {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            query,
            provider_costs,
            chosen_provider: selection.provider,
            spread_percent: selection.display_spread(),
            selection_rule: selection.rule,
            requires_manual_review: validation.requires_manual_review,
            status: QuoteStatus::initial(validation.requires_manual_review),
            validation,
            audit_trace,
            review_history: vec![],
        };
        self.quotes.insert(record.clone());

        info!(
            quote_id = %record.id,
            country = %record.query.country_code,
            provider = %record.chosen_provider,
            tce = %selection.tce,
            spread_percent = %record.spread_percent,
            risk_score = record.validation.risk_score,
            status = record.status.as_str(),
            duration_us = record.audit_trace.duration_us,
            "Comparison completed"
        );
        Ok(record)
    }

    /// Applies a reviewer action (`approve` or `reject`, any case).
    ///
    /// The action is parsed before the record is looked up; an invalid
    /// action leaves every record unchanged.
    pub fn review_quote(&self, quote_id: Uuid, action: &str) -> EngineResult<QuoteRecord> {
        let action: ReviewAction = action.parse()?;
        let record = self.quotes.review(quote_id, action)?;

        info!(
            quote_id = %quote_id,
            action = %action,
            status = record.status.as_str(),
            "Quote reviewed"
        );
        Ok(record)
    }

    /// A stored comparison.
    pub fn quote(&self, quote_id: Uuid) -> EngineResult<QuoteRecord> {
        self.quotes.get(quote_id)
    }

    /// Stored comparisons, newest first, optionally filtered by status.
    pub fn list_quotes(&self, status: Option<QuoteStatus>) -> Vec<QuoteRecord> {
        self.quotes.list(status)
    }

    fn contract_store(&self, provider: Provider) -> EngineResult<Arc<ContractStore>> {
        self.contracts
            .get(&provider)
            .cloned()
            .ok_or_else(|| unavailable(provider, "no contract store"))
    }

    fn rng(&self) -> MutexGuard<'_, StdRng> {
        self.rng.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn unavailable(provider: Provider, reason: &str) -> EngineError {
    EngineError::ProviderUnavailable {
        provider: provider.to_string(),
        reason: reason.to_string(),
    }
}

fn provider_table(tables: &ProviderRateTables, provider: Provider) -> EngineResult<&RateTable> {
    tables
        .table(provider)
        .ok_or_else(|| unavailable(provider, "rate table not loaded"))
}

/// Builds the primary table and derives every secondary provider from it.
fn build_tables(source: &dyn RateSource) -> EngineResult<ProviderRateTables> {
    let primary = build_primary_table(source.load_primary()?)?;

    let mut tables = HashMap::new();
    for provider in Provider::secondaries() {
        let spec = source.load_adjustment(provider)?.unwrap_or_default();
        let table = derive_provider_table(&primary, &spec)?;
        debug!(provider = %provider, countries = table.len(), "Derived provider rate table");
        tables.insert(provider, table);
    }
    tables.insert(Provider::PRIMARY, primary);

    Ok(ProviderRateTables::new(tables))
}

/// Builds the tables, installing the fallback set when the data is unusable.
fn load_tables(source: &dyn RateSource) -> ProviderRateTables {
    match build_tables(source) {
        Ok(tables) => tables,
        Err(err) => {
            warn!(error = %err, "Rate data unavailable, using fallback table");
            ProviderRateTables::degraded(fallback_table())
        }
    }
}

fn summarize(tables: &ProviderRateTables) -> RateTablesSummary {
    RateTablesSummary {
        degraded: tables.is_degraded(),
        providers: Provider::ALL
            .into_iter()
            .map(|provider| ProviderCoverage {
                provider,
                countries: tables.table(provider).map_or(0, RateTable::len),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StaticRateSource;
    use crate::models::{ContractStatus, DerivationSpec, ProviderAdjustmentSpec, SelectionRule};
    use crate::scheduler::ManualScheduler;
    use std::collections::BTreeSet;
    use std::str::FromStr;
    use std::time::Duration;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_entry(code: &str) -> CountryRateEntry {
        CountryRateEntry {
            country_code: code.to_string(),
            employer_tax_rate: dec("0.2"),
            benefits_percent: dec("0.05"),
            fixed_fees: dec("3000"),
            probation_months: 6,
            currency_code: "EUR".to_string(),
            currency_symbol: "€".to_string(),
            notes: String::new(),
            role_bands: vec![crate::models::RoleBand {
                title: "Software Engineer".to_string(),
                min_salary: dec("60000"),
                max_salary: dec("100000"),
                seniority_levels: BTreeSet::new(),
                description: String::new(),
            }],
        }
    }

    fn fees_delta(delta: &str) -> ProviderAdjustmentSpec {
        ProviderAdjustmentSpec::Derived(DerivationSpec {
            fixed_fees_delta: dec(delta),
            ..DerivationSpec::default()
        })
    }

    /// DE at 100000: 100000 + 20000 + 5000 + 3000 + 25000 = 153000 for
    /// the primary; remote and oyster shift the fixed fees.
    fn create_source(remote_delta: &str, oyster_delta: &str) -> StaticRateSource {
        StaticRateSource::new(vec![create_entry("DE"), create_entry("FR")])
            .with_adjustment(Provider::Remote, fees_delta(remote_delta))
            .with_adjustment(Provider::Oyster, fees_delta(oyster_delta))
    }

    fn settings() -> EngineSettings {
        EngineSettings {
            rate_jitter_percent: Decimal::ZERO,
            rng_seed: Some(42),
            ..EngineSettings::default()
        }
    }

    fn create_engine(source: StaticRateSource, settings: EngineSettings) -> (QuoteEngine, Arc<ManualScheduler>) {
        let scheduler = Arc::new(ManualScheduler::new());
        let engine = QuoteEngine::with_scheduler(Arc::new(source), settings, scheduler.clone());
        (engine, scheduler)
    }

    fn query(role: &str) -> QuoteQuery {
        QuoteQuery {
            country_code: "DE".to_string(),
            salary: dec("100000"),
            currency: "EUR".to_string(),
            role: role.to_string(),
        }
    }

    #[test]
    fn test_sync_quote_uses_primary_table() {
        let (engine, _) = create_engine(create_source("2000", "-1000"), settings());

        let outcome = engine
            .compute_quote(Provider::Deel, "de", dec("100000"), None, false)
            .unwrap();

        match outcome {
            QuoteOutcome::Immediate(quote) => {
                assert_eq!(quote.costs.tce, dec("153000"));
                assert_eq!(quote.country_code, "DE");
            }
            other => panic!("Expected Immediate, got {:?}", other),
        }
    }

    #[test]
    fn test_oversized_salary_is_rejected_without_contract() {
        let (engine, scheduler) = create_engine(create_source("0", "0"), settings());
        let salary = dec("70000000000000000000000000000");

        for async_mode in [false, true] {
            match engine.compute_quote(Provider::Deel, "DE", salary, None, async_mode) {
                Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "salary"),
                other => panic!("Expected InvalidInput, got {:?}", other),
            }
        }
        assert_eq!(scheduler.pending(), 0);

        let mut oversized = query("Engineer");
        oversized.salary = salary;
        assert!(matches!(
            engine.compare_providers(oversized),
            Err(EngineError::InvalidInput { .. })
        ));
        assert!(engine.list_quotes(None).is_empty());
    }

    #[test]
    fn test_async_contract_ready_only_after_delay() {
        let (engine, scheduler) = create_engine(create_source("2000", "-1000"), settings());

        let contract = match engine
            .compute_quote(Provider::Remote, "DE", dec("100000"), None, true)
            .unwrap()
        {
            QuoteOutcome::Deferred(contract) => contract,
            other => panic!("Expected Deferred, got {:?}", other),
        };
        assert_eq!(contract.status, ContractStatus::Pending);

        scheduler.advance(Duration::from_millis(1999));
        let pending = engine.contract_status(Provider::Remote, contract.id).unwrap();
        assert_eq!(pending.status, ContractStatus::Pending);
        assert!(pending.costs.is_none());

        scheduler.advance(Duration::from_millis(1));
        let ready = engine.contract_status(Provider::Remote, contract.id).unwrap();
        assert_eq!(ready.status, ContractStatus::Ready);
        assert_eq!(ready.costs.unwrap().tce, dec("155000"));

        scheduler.advance(Duration::from_secs(60));
        assert!(engine.contract_status(Provider::Remote, contract.id).unwrap().is_ready());
    }

    #[test]
    fn test_async_unknown_country_creates_no_contract() {
        let (engine, scheduler) = create_engine(create_source("0", "0"), settings());

        let result = engine.compute_quote(Provider::Oyster, "ZZ", dec("100000"), None, true);

        assert!(matches!(result, Err(EngineError::CountryNotFound { .. })));
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_contract_unknown_to_other_provider() {
        let (engine, _) = create_engine(create_source("0", "0"), settings());
        let QuoteOutcome::Deferred(contract) = engine
            .compute_quote(Provider::Remote, "DE", dec("100000"), None, true)
            .unwrap()
        else {
            panic!("Expected Deferred");
        };

        assert!(matches!(
            engine.contract_status(Provider::Oyster, contract.id),
            Err(EngineError::RecordNotFound { .. })
        ));
    }

    #[test]
    fn test_narrow_spread_recommends_highest() {
        let (engine, _) = create_engine(create_source("2000", "-1000"), settings());

        let record = engine.compare_providers(query("Senior Software Engineer")).unwrap();

        // 153000 / 155000 / 152000: spread 1.97%
        assert_eq!(record.chosen_provider, Provider::Remote);
        assert_eq!(record.selection_rule, SelectionRule::HighestWithinTolerance);
        assert_eq!(record.spread_percent, dec("1.97"));
        assert_eq!(record.provider_costs.len(), 3);
        assert_eq!(record.validation.service_type, ServiceType::FullTimeEmployee);
        assert!(!record.requires_manual_review);
        assert_eq!(record.status, QuoteStatus::Approved);
        assert_eq!(record.audit_trace.steps.len(), 5);
        assert_eq!(record.audit_trace.steps[3].rule_id, "spread_reconciliation");
        assert_eq!(engine.quote(record.id).unwrap(), record);
    }

    #[test]
    fn test_wide_spread_recommends_lowest() {
        let (engine, _) = create_engine(create_source("20000", "-1000"), settings());

        let record = engine.compare_providers(query("Backend Developer")).unwrap();

        assert_eq!(record.chosen_provider, Provider::Oyster);
        assert_eq!(record.selection_rule, SelectionRule::LowestAboveTolerance);
        assert_eq!(record.chosen_costs().unwrap().tce, dec("152000"));
    }

    #[test]
    fn test_comparison_fails_whole_on_unknown_country() {
        let (engine, _) = create_engine(create_source("0", "0"), settings());
        let mut unknown = query("Engineer");
        unknown.country_code = "ZZ".to_string();

        assert!(matches!(
            engine.compare_providers(unknown),
            Err(EngineError::CountryNotFound { .. })
        ));
        assert!(engine.list_quotes(None).is_empty());
    }

    #[test]
    fn test_low_margin_goes_to_review_queue() {
        let mut settings = settings();
        settings.validation.internal_cost_ratio = dec("0.9");
        let (engine, _) = create_engine(create_source("0", "0"), settings);

        let record = engine.compare_providers(query("Engineer")).unwrap();

        assert!(record.requires_manual_review);
        assert!(!record.validation.errors.is_empty());
        assert_eq!(record.status, QuoteStatus::Pending);
        assert_eq!(engine.list_quotes(Some(QuoteStatus::Pending)).len(), 1);
        assert!(engine.list_quotes(Some(QuoteStatus::Approved)).is_empty());
    }

    #[test]
    fn test_review_lifecycle() {
        let mut settings = settings();
        settings.validation.internal_cost_ratio = dec("0.9");
        let (engine, _) = create_engine(create_source("0", "0"), settings);
        let record = engine.compare_providers(query("Engineer")).unwrap();

        match engine.review_quote(record.id, "maybe") {
            Err(EngineError::InvalidAction { action }) => assert_eq!(action, "maybe"),
            other => panic!("Expected InvalidAction, got {:?}", other),
        }
        assert_eq!(engine.quote(record.id).unwrap().status, QuoteStatus::Pending);

        let approved = engine.review_quote(record.id, "APPROVE").unwrap();
        assert_eq!(approved.status, QuoteStatus::Approved);

        assert!(matches!(
            engine.review_quote(Uuid::new_v4(), "approve"),
            Err(EngineError::RecordNotFound { .. })
        ));
    }

    #[test]
    fn test_empty_seed_data_installs_fallback() {
        let (engine, _) = create_engine(StaticRateSource::new(vec![]), settings());

        assert!(engine.is_degraded());
        for provider in Provider::ALL {
            assert_eq!(engine.countries(provider).unwrap(), vec!["US".to_string()]);
        }
        assert!(engine.rate_summary().degraded);
    }

    struct SwappableSource {
        primary: Mutex<Vec<CountryRateEntry>>,
    }

    impl RateSource for SwappableSource {
        fn load_primary(&self) -> EngineResult<Vec<CountryRateEntry>> {
            Ok(self.primary.lock().unwrap().clone())
        }

        fn load_adjustment(&self, _provider: Provider) -> EngineResult<Option<ProviderAdjustmentSpec>> {
            Ok(None)
        }
    }

    #[test]
    fn test_reload_swaps_tables() {
        let source = Arc::new(SwappableSource {
            primary: Mutex::new(vec![create_entry("DE")]),
        });
        let engine = QuoteEngine::with_scheduler(
            source.clone(),
            settings(),
            Arc::new(ManualScheduler::new()),
        );
        assert_eq!(engine.countries(Provider::Oyster).unwrap(), vec!["DE".to_string()]);

        source.primary.lock().unwrap().push(create_entry("nl"));
        let summary = engine.reload_rate_tables();

        assert!(!summary.degraded);
        assert!(summary.providers.iter().all(|p| p.countries == 2));
        assert!(engine.country_entry(Provider::Remote, "NL").is_ok());

        source.primary.lock().unwrap().clear();
        assert!(engine.reload_rate_tables().degraded);
        assert!(engine.is_degraded());
    }

    #[test]
    fn test_country_entry_not_found() {
        let (engine, _) = create_engine(create_source("0", "0"), settings());
        match engine.country_entry(Provider::Deel, "zz") {
            Err(EngineError::CountryNotFound { provider, country }) => {
                assert_eq!(provider, "deel");
                assert_eq!(country, "zz");
            }
            other => panic!("Expected CountryNotFound, got {:?}", other),
        }
    }
}
