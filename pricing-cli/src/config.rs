//! Optional TOML configuration.
//!
//! ```toml
//! log_level = "debug"
//!
//! [inputs]
//! dealer_cost = 12000
//! buyer_percentage = 40
//! transaction_fee_percent = 6.5
//! freight_per_thousand = 45
//!
//! [[scenarios]]
//! name = "Dealer promo"
//! transaction_fee_percent = 4
//! freight_per_thousand = 25
//! ```
//!
//! Every key is optional. Inputs go through the same clamping as values typed
//! on the command line, and scenarios with a blank name are skipped.

use std::path::{Path, PathBuf};

use pricing_core::{InputField, PricingSession};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub log_level: Option<String>,
    #[serde(default)]
    pub inputs: InputsConfig,
    #[serde(default)]
    pub scenarios: Vec<ScenarioConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputsConfig {
    pub dealer_cost: Option<Decimal>,
    pub buyer_percentage: Option<Decimal>,
    pub transaction_fee_percent: Option<Decimal>,
    pub freight_per_thousand: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    pub name: String,
    pub transaction_fee_percent: Decimal,
    pub freight_per_thousand: Decimal,
}

impl InputsConfig {
    fn values(&self) -> [(InputField, Option<Decimal>); 4] {
        [
            (InputField::DealerCost, self.dealer_cost),
            (InputField::BuyerPercentage, self.buyer_percentage),
            (InputField::TransactionFeePercent, self.transaction_fee_percent),
            (InputField::FreightPerThousand, self.freight_per_thousand),
        ]
    }
}

impl Config {
    pub fn from_toml_str(input: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(input)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Writes configured inputs and custom scenarios into `session`.
    pub fn apply(
        &self,
        session: &mut PricingSession,
    ) {
        for (field, value) in self.inputs.values() {
            if let Some(value) = value {
                session.set_field(field, value);
            }
        }

        for scenario in &self.scenarios {
            if let Err(e) = session.add_scenario(
                &scenario.name,
                scenario.transaction_fee_percent,
                scenario.freight_per_thousand,
            ) {
                warn!("config scenario ignored: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn empty_config_is_default() {
        let config = Config::from_toml_str("").unwrap();

        assert_eq!(config, Config::default());
    }

    #[test]
    fn full_config_parses() {
        let config = Config::from_toml_str(
            r#"
log_level = "debug"

[inputs]
dealer_cost = 12000
buyer_percentage = "40"
transaction_fee_percent = 6.5

[[scenarios]]
name = "Dealer promo"
transaction_fee_percent = 4
freight_per_thousand = 25
"#,
        )
        .unwrap();

        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(config.inputs.dealer_cost, Some(dec!(12000)));
        assert_eq!(config.inputs.buyer_percentage, Some(dec!(40)));
        assert_eq!(config.inputs.transaction_fee_percent, Some(dec!(6.5)));
        assert_eq!(config.inputs.freight_per_thousand, None);
        assert_eq!(config.scenarios.len(), 1);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Config::from_toml_str("currency = \"EUR\"").is_err());
    }

    #[test]
    fn apply_clamps_inputs_and_skips_blank_scenarios() {
        let config = Config::from_toml_str(
            r#"
[inputs]
buyer_percentage = 150
freight_per_thousand = -5

[[scenarios]]
name = "  "
transaction_fee_percent = 4
freight_per_thousand = 25

[[scenarios]]
name = "Kept"
transaction_fee_percent = 4
freight_per_thousand = 25
"#,
        )
        .unwrap();
        let mut session = PricingSession::new();

        config.apply(&mut session);

        assert_eq!(session.inputs().buyer_percentage(), dec!(100));
        assert_eq!(session.inputs().freight_per_thousand(), dec!(0));
        assert_eq!(session.inputs().dealer_cost(), dec!(10000));
        assert_eq!(session.scenarios().custom().len(), 1);
        assert_eq!(session.scenarios().custom()[0].name(), "Kept");
    }

    #[test]
    fn missing_file_is_read_error() {
        let err = Config::load(Path::new("/definitely/not/here.toml")).unwrap_err();

        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
