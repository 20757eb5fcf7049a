//! In-memory calculator session.
//!
//! A [`PricingSession`] owns the current inputs, the scenario list and the
//! formula toggles. It is never persisted. Derived values are recomputed on
//! demand from the current state, so every read reflects the last mutation.

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::calculations::{
    CalculationResult, DEFAULT_WHAT_IF_DELTAS, ScenarioRow, WhatIfRow, get_result,
    get_scenario_rows, get_what_if,
};
use crate::models::{
    FormulaLine, FormulaVisibility, InputField, PricingInputs, Scenario, ScenarioError,
    ScenarioSet,
};
use crate::report;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PricingSession {
    inputs: PricingInputs,
    scenarios: ScenarioSet,
    formulas: FormulaVisibility,
}

impl PricingSession {
    /// A session at the default inputs with only the preset scenarios.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_inputs(inputs: PricingInputs) -> Self {
        Self {
            inputs,
            ..Default::default()
        }
    }

    pub fn inputs(&self) -> &PricingInputs {
        &self.inputs
    }

    pub fn scenarios(&self) -> &ScenarioSet {
        &self.scenarios
    }

    pub fn formulas(&self) -> &FormulaVisibility {
        &self.formulas
    }

    /// Clamps and stores one input, returning the stored value.
    pub fn set_field(
        &mut self,
        field: InputField,
        value: Decimal,
    ) -> Decimal {
        let stored = self.inputs.set(field, value);
        debug!(field = field.as_str(), requested = %value, stored = %stored, "input updated");
        stored
    }

    /// Restores the default inputs. Custom scenarios and formula toggles are kept.
    pub fn reset(&mut self) {
        self.inputs.reset();
        info!(
            custom_scenarios = self.scenarios.custom().len(),
            "inputs reset to defaults"
        );
    }

    pub fn add_scenario(
        &mut self,
        name: &str,
        transaction_fee_percent: Decimal,
        freight_per_thousand: Decimal,
    ) -> Result<&Scenario, ScenarioError> {
        self.scenarios
            .add_custom(name, transaction_fee_percent, freight_per_thousand)
    }

    pub fn push_scenario(
        &mut self,
        scenario: Scenario,
    ) {
        self.scenarios.push_custom(scenario);
    }

    pub fn remove_scenario(
        &mut self,
        custom_index: usize,
    ) -> Result<Scenario, ScenarioError> {
        self.scenarios.remove_custom(custom_index)
    }

    pub fn toggle_formula(
        &mut self,
        line: FormulaLine,
    ) -> bool {
        self.formulas.toggle(line)
    }

    pub fn show_all_formulas(&mut self) {
        self.formulas = FormulaVisibility::all();
    }

    pub fn result(&self) -> CalculationResult {
        get_result(&self.inputs)
    }

    pub fn scenario_rows(&self) -> Vec<ScenarioRow> {
        get_scenario_rows(&self.inputs, &self.scenarios)
    }

    pub fn what_if(&self) -> Vec<WhatIfRow> {
        get_what_if(&self.inputs, &DEFAULT_WHAT_IF_DELTAS)
    }

    /// Formula explanation for `line` when it is toggled on.
    pub fn visible_formula(
        &self,
        line: FormulaLine,
    ) -> Option<String> {
        self.formulas
            .is_shown(line)
            .then(|| report::formula_text(line, &self.inputs, &self.result()))
    }

    pub fn export_text(&self) -> String {
        report::export_text(&self.inputs, &self.result())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use tracing_subscriber::fmt::format::FmtSpan;

    use super::*;

    /// Initializes tracing subscriber for tests that go through logging paths.
    fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_span_events(FmtSpan::NONE)
            .with_test_writer()
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    #[test]
    fn set_field_recomputes_result() {
        let _guard = init_test_tracing();
        let mut session = PricingSession::new();

        session.set_field(InputField::DealerCost, dec!(20000));

        assert_eq!(session.result().total, dec!(11700));
    }

    #[test]
    fn set_field_clamps_before_recompute() {
        let _guard = init_test_tracing();
        let mut session = PricingSession::new();

        let stored = session.set_field(InputField::BuyerPercentage, dec!(150));

        assert_eq!(stored, dec!(100));
        // base 10000, fee 700, freight 500
        assert_eq!(session.result().total, dec!(11200));
    }

    #[test]
    fn reset_restores_defaults_and_keeps_custom_scenarios() {
        let _guard = init_test_tracing();
        let mut session =
            PricingSession::with_inputs(PricingInputs::new(dec!(1), dec!(2), dec!(3), dec!(4)));
        session.add_scenario("Promo", dec!(4), dec!(25)).unwrap();
        session.toggle_formula(FormulaLine::Freight);

        session.reset();

        assert_eq!(*session.inputs(), PricingInputs::default());
        assert_eq!(session.scenarios().custom().len(), 1);
        assert_eq!(session.scenarios().custom()[0].name(), "Promo");
        assert!(session.formulas().is_shown(FormulaLine::Freight));
    }

    #[test]
    fn blank_scenario_is_not_added() {
        let _guard = init_test_tracing();
        let mut session = PricingSession::new();

        let result = session.add_scenario("", dec!(4), dec!(25)).cloned();

        assert_eq!(result, Err(ScenarioError::BlankName));
        assert_eq!(session.scenario_rows().len(), 4);
    }

    #[test]
    fn scenario_rows_track_input_changes() {
        let mut session = PricingSession::new();
        session.set_field(InputField::FreightPerThousand, dec!(0));

        let rows = session.scenario_rows();

        // "No Freight" now matches the current configuration.
        assert_eq!(rows[3].difference, dec!(0));
        assert_eq!(rows[0].difference, dec!(500));
    }

    #[test]
    fn visible_formula_follows_toggle() {
        let mut session = PricingSession::new();

        assert_eq!(session.visible_formula(FormulaLine::BuyerBase), None);
        session.toggle_formula(FormulaLine::BuyerBase);

        assert_eq!(
            session.visible_formula(FormulaLine::BuyerBase).as_deref(),
            Some("Formula: $10,000 × 50% ÷ 100 = $5,000.00")
        );
    }

    #[test]
    fn what_if_uses_default_deltas() {
        let session = PricingSession::new();

        let rows = session.what_if();

        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].new_fee, dec!(5));
        assert_eq!(rows[0].difference, dec!(-100));
    }
}
