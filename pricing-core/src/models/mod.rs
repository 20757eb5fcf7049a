mod formula;
mod inputs;
mod scenario;

pub use formula::{FormulaLine, FormulaVisibility};
pub use inputs::{
    DEFAULT_BUYER_PERCENTAGE, DEFAULT_DEALER_COST, DEFAULT_FREIGHT_PER_THOUSAND,
    DEFAULT_TRANSACTION_FEE_PERCENT, InputField, MAX_DEALER_COST, MAX_FREIGHT_PER_THOUSAND,
    PricingInputs,
};
pub use scenario::{PRESET_SCENARIOS, Scenario, ScenarioError, ScenarioSet};
