use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use super::InputField;

/// Errors raised while editing a [`ScenarioSet`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScenarioError {
    /// Custom scenarios need a non-blank name.
    #[error("scenario name must not be blank")]
    BlankName,

    /// The index does not refer to a custom scenario.
    #[error("no custom scenario at index {index} (have {len})")]
    CustomIndexOutOfRange { index: usize, len: usize },
}

/// A named alternative `(fee, freight)` pair used only for comparison.
///
/// Scenarios are never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scenario {
    name: String,
    transaction_fee_percent: Decimal,
    freight_per_thousand: Decimal,
}

impl Scenario {
    /// Creates a scenario, trimming the name and clamping fee and freight with
    /// the same policy as the calculator inputs.
    pub fn new(
        name: &str,
        transaction_fee_percent: Decimal,
        freight_per_thousand: Decimal,
    ) -> Result<Self, ScenarioError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ScenarioError::BlankName);
        }
        Ok(Self {
            name: name.to_string(),
            transaction_fee_percent: InputField::TransactionFeePercent
                .clamp(transaction_fee_percent),
            freight_per_thousand: InputField::FreightPerThousand.clamp(freight_per_thousand),
        })
    }

    const fn preset(
        name: &'static str,
        fee: u32,
        freight: u32,
    ) -> (&'static str, Decimal, Decimal) {
        (
            name,
            Decimal::from_parts(fee, 0, 0, false, 0),
            Decimal::from_parts(freight, 0, 0, false, 0),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn transaction_fee_percent(&self) -> Decimal {
        self.transaction_fee_percent
    }

    pub fn freight_per_thousand(&self) -> Decimal {
        self.freight_per_thousand
    }
}

/// Built-in scenarios, always listed first.
pub const PRESET_SCENARIOS: [(&str, Decimal, Decimal); 4] = [
    Scenario::preset("Standard", 7, 50),
    Scenario::preset("Low Fee", 5, 50),
    Scenario::preset("High Fee", 10, 50),
    Scenario::preset("No Freight", 7, 0),
];

/// Ordered scenario list: the four presets followed by user-added scenarios in
/// insertion order. Names are not required to be unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioSet {
    presets: Vec<Scenario>,
    custom: Vec<Scenario>,
}

impl Default for ScenarioSet {
    fn default() -> Self {
        let presets = PRESET_SCENARIOS
            .iter()
            .map(|(name, fee, freight)| Scenario {
                name: (*name).to_string(),
                transaction_fee_percent: *fee,
                freight_per_thousand: *freight,
            })
            .collect();

        Self {
            presets,
            custom: Vec::new(),
        }
    }
}

impl ScenarioSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// All scenarios in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Scenario> {
        self.presets.iter().chain(self.custom.iter())
    }

    pub fn presets(&self) -> &[Scenario] {
        &self.presets
    }

    pub fn custom(&self) -> &[Scenario] {
        &self.custom
    }

    pub fn len(&self) -> usize {
        self.presets.len() + self.custom.len()
    }

    /// Always false: the presets cannot be removed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends an already-built scenario to the custom list.
    pub fn push_custom(
        &mut self,
        scenario: Scenario,
    ) {
        debug!(name = %scenario.name, "custom scenario added");
        self.custom.push(scenario);
    }

    /// Builds and appends a custom scenario.
    ///
    /// A blank name is rejected and nothing is added.
    pub fn add_custom(
        &mut self,
        name: &str,
        transaction_fee_percent: Decimal,
        freight_per_thousand: Decimal,
    ) -> Result<&Scenario, ScenarioError> {
        let scenario = Scenario::new(name, transaction_fee_percent, freight_per_thousand)
            .inspect_err(|e| warn!(name, "custom scenario rejected: {}", e))?;
        self.push_custom(scenario);
        Ok(&self.custom[self.custom.len() - 1])
    }

    /// Removes the custom scenario at `index` (0-based among custom scenarios).
    pub fn remove_custom(
        &mut self,
        index: usize,
    ) -> Result<Scenario, ScenarioError> {
        if index >= self.custom.len() {
            return Err(ScenarioError::CustomIndexOutOfRange {
                index,
                len: self.custom.len(),
            });
        }
        let removed = self.custom.remove(index);
        debug!(name = %removed.name, index, "custom scenario removed");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn names(set: &ScenarioSet) -> Vec<&str> {
        set.iter().map(Scenario::name).collect()
    }

    #[test]
    fn new_set_contains_presets_in_order() {
        let set = ScenarioSet::new();

        assert_eq!(
            names(&set),
            vec!["Standard", "Low Fee", "High Fee", "No Freight"]
        );
        assert_eq!(set.presets()[3].transaction_fee_percent(), dec!(7));
        assert_eq!(set.presets()[3].freight_per_thousand(), dec!(0));
    }

    #[test]
    fn custom_scenarios_follow_presets_in_insertion_order() {
        let mut set = ScenarioSet::new();

        set.add_custom("Promo", dec!(4), dec!(25)).unwrap();
        set.add_custom("Promo", dec!(6), dec!(30)).unwrap();

        assert_eq!(set.len(), 6);
        assert_eq!(
            names(&set),
            vec!["Standard", "Low Fee", "High Fee", "No Freight", "Promo", "Promo"]
        );
    }

    #[test]
    fn blank_name_is_rejected_and_nothing_is_added() {
        let mut set = ScenarioSet::new();

        let result = set.add_custom("   ", dec!(4), dec!(25)).cloned();

        assert_eq!(result, Err(ScenarioError::BlankName));
        assert!(set.custom().is_empty());
    }

    #[test]
    fn custom_name_is_trimmed() {
        let mut set = ScenarioSet::new();

        let added = set.add_custom("  Promo  ", dec!(4), dec!(25)).unwrap();

        assert_eq!(added.name(), "Promo");
    }

    #[test]
    fn custom_values_are_clamped() {
        let scenario = Scenario::new("Odd", dec!(120), dec!(-3)).unwrap();

        assert_eq!(scenario.transaction_fee_percent(), dec!(100));
        assert_eq!(scenario.freight_per_thousand(), dec!(0));
    }

    #[test]
    fn remove_custom_keeps_presets() {
        let mut set = ScenarioSet::new();
        set.add_custom("A", dec!(1), dec!(1)).unwrap();
        set.add_custom("B", dec!(2), dec!(2)).unwrap();

        let removed = set.remove_custom(0).unwrap();

        assert_eq!(removed.name(), "A");
        assert_eq!(
            names(&set),
            vec!["Standard", "Low Fee", "High Fee", "No Freight", "B"]
        );
    }

    #[test]
    fn remove_custom_out_of_range_is_an_error() {
        let mut set = ScenarioSet::new();

        let result = set.remove_custom(0);

        assert_eq!(
            result,
            Err(ScenarioError::CustomIndexOutOfRange { index: 0, len: 0 })
        );
        assert_eq!(set.len(), 4);
    }
}
