use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{clamp_percent, clamp_range};

/// Dealer cost restored by [`PricingInputs::reset`].
pub const DEFAULT_DEALER_COST: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);
/// Buyer-pays percentage restored by [`PricingInputs::reset`].
pub const DEFAULT_BUYER_PERCENTAGE: Decimal = Decimal::from_parts(50, 0, 0, false, 0);
/// Transaction fee percentage restored by [`PricingInputs::reset`].
pub const DEFAULT_TRANSACTION_FEE_PERCENT: Decimal = Decimal::from_parts(7, 0, 0, false, 0);
/// Freight contribution per $1,000 restored by [`PricingInputs::reset`].
pub const DEFAULT_FREIGHT_PER_THOUSAND: Decimal = Decimal::from_parts(50, 0, 0, false, 0);

/// Largest accepted dealer cost, $1,000,000,000,000.
///
/// Together with [`MAX_FREIGHT_PER_THOUSAND`] this keeps every product and
/// sum in the calculator well inside `Decimal` range.
pub const MAX_DEALER_COST: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);
/// Largest accepted freight contribution per $1,000, also 10^12.
pub const MAX_FREIGHT_PER_THOUSAND: Decimal = MAX_DEALER_COST;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputField {
    DealerCost,
    BuyerPercentage,
    TransactionFeePercent,
    FreightPerThousand,
}

impl InputField {
    pub const ALL: [InputField; 4] = [
        Self::DealerCost,
        Self::BuyerPercentage,
        Self::TransactionFeePercent,
        Self::FreightPerThousand,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DealerCost => "dealer-cost",
            Self::BuyerPercentage => "buyer-percent",
            Self::TransactionFeePercent => "fee",
            Self::FreightPerThousand => "freight",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "dealer-cost" => Some(Self::DealerCost),
            "buyer-percent" => Some(Self::BuyerPercentage),
            "fee" => Some(Self::TransactionFeePercent),
            "freight" => Some(Self::FreightPerThousand),
            _ => None,
        }
    }

    pub fn to_long_str(&self) -> &'static str {
        match self {
            Self::DealerCost => "Total Dealer Cost ($)",
            Self::BuyerPercentage => "Buyer Pays % of Dealer Cost (%)",
            Self::TransactionFeePercent => "Transaction Fee (%)",
            Self::FreightPerThousand => "Buyer Freight Contribution ($ per $1,000 dealer cost)",
        }
    }

    fn log_name(&self) -> &'static str {
        match self {
            Self::DealerCost => "dealer_cost",
            Self::BuyerPercentage => "buyer_percentage",
            Self::TransactionFeePercent => "transaction_fee_percent",
            Self::FreightPerThousand => "freight_per_thousand",
        }
    }

    /// Applies this field's clamping policy to a raw value.
    pub fn clamp(
        &self,
        value: Decimal,
    ) -> Decimal {
        match self {
            Self::DealerCost => clamp_range(self.log_name(), value, MAX_DEALER_COST),
            Self::FreightPerThousand => {
                clamp_range(self.log_name(), value, MAX_FREIGHT_PER_THOUSAND)
            }
            Self::BuyerPercentage | Self::TransactionFeePercent => {
                clamp_percent(self.log_name(), value)
            }
        }
    }
}

/// The four user-editable inputs of the calculator.
///
/// Fields are private so every write goes through the clamping policy:
/// dealer cost and freight are clamped to `[0, 10^12]`, both percentages to
/// `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PricingInputs {
    dealer_cost: Decimal,
    buyer_percentage: Decimal,
    transaction_fee_percent: Decimal,
    freight_per_thousand: Decimal,
}

impl Default for PricingInputs {
    fn default() -> Self {
        Self {
            dealer_cost: DEFAULT_DEALER_COST,
            buyer_percentage: DEFAULT_BUYER_PERCENTAGE,
            transaction_fee_percent: DEFAULT_TRANSACTION_FEE_PERCENT,
            freight_per_thousand: DEFAULT_FREIGHT_PER_THOUSAND,
        }
    }
}

impl PricingInputs {
    /// Builds a clamped set of inputs.
    pub fn new(
        dealer_cost: Decimal,
        buyer_percentage: Decimal,
        transaction_fee_percent: Decimal,
        freight_per_thousand: Decimal,
    ) -> Self {
        let mut inputs = Self::default();
        inputs.set_dealer_cost(dealer_cost);
        inputs.set_buyer_percentage(buyer_percentage);
        inputs.set_transaction_fee_percent(transaction_fee_percent);
        inputs.set_freight_per_thousand(freight_per_thousand);
        inputs
    }

    pub fn dealer_cost(&self) -> Decimal {
        self.dealer_cost
    }

    pub fn buyer_percentage(&self) -> Decimal {
        self.buyer_percentage
    }

    pub fn transaction_fee_percent(&self) -> Decimal {
        self.transaction_fee_percent
    }

    pub fn freight_per_thousand(&self) -> Decimal {
        self.freight_per_thousand
    }

    pub fn set_dealer_cost(
        &mut self,
        value: Decimal,
    ) {
        self.dealer_cost = InputField::DealerCost.clamp(value);
    }

    pub fn set_buyer_percentage(
        &mut self,
        value: Decimal,
    ) {
        self.buyer_percentage = InputField::BuyerPercentage.clamp(value);
    }

    pub fn set_transaction_fee_percent(
        &mut self,
        value: Decimal,
    ) {
        self.transaction_fee_percent = InputField::TransactionFeePercent.clamp(value);
    }

    pub fn set_freight_per_thousand(
        &mut self,
        value: Decimal,
    ) {
        self.freight_per_thousand = InputField::FreightPerThousand.clamp(value);
    }

    /// Returns the stored (already clamped) value of `field`.
    pub fn get(
        &self,
        field: InputField,
    ) -> Decimal {
        match field {
            InputField::DealerCost => self.dealer_cost,
            InputField::BuyerPercentage => self.buyer_percentage,
            InputField::TransactionFeePercent => self.transaction_fee_percent,
            InputField::FreightPerThousand => self.freight_per_thousand,
        }
    }

    /// Clamps `value` and stores it in `field`. Returns the stored value.
    pub fn set(
        &mut self,
        field: InputField,
        value: Decimal,
    ) -> Decimal {
        match field {
            InputField::DealerCost => self.set_dealer_cost(value),
            InputField::BuyerPercentage => self.set_buyer_percentage(value),
            InputField::TransactionFeePercent => self.set_transaction_fee_percent(value),
            InputField::FreightPerThousand => self.set_freight_per_thousand(value),
        }
        self.get(field)
    }

    /// Restores `10000 / 50 / 7 / 50`.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
