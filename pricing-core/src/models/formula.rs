use serde::{Deserialize, Serialize};

/// A result line whose formula explanation can be shown or hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormulaLine {
    BuyerBase,
    TransactionFee,
    Freight,
}

impl FormulaLine {
    pub const ALL: [FormulaLine; 3] = [Self::BuyerBase, Self::TransactionFee, Self::Freight];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BuyerBase => "buyer-base",
            Self::TransactionFee => "fee",
            Self::Freight => "freight",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "buyer-base" => Some(Self::BuyerBase),
            "fee" => Some(Self::TransactionFee),
            "freight" => Some(Self::Freight),
            _ => None,
        }
    }
}

/// Which formula explanations are currently expanded. All hidden by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormulaVisibility {
    pub buyer_base: bool,
    pub transaction_fee: bool,
    pub freight: bool,
}

impl FormulaVisibility {
    pub fn all() -> Self {
        Self {
            buyer_base: true,
            transaction_fee: true,
            freight: true,
        }
    }

    pub fn is_shown(
        &self,
        line: FormulaLine,
    ) -> bool {
        match line {
            FormulaLine::BuyerBase => self.buyer_base,
            FormulaLine::TransactionFee => self.transaction_fee,
            FormulaLine::Freight => self.freight,
        }
    }

    /// Flips one line and returns its new state.
    pub fn toggle(
        &mut self,
        line: FormulaLine,
    ) -> bool {
        let flag = match line {
            FormulaLine::BuyerBase => &mut self.buyer_base,
            FormulaLine::TransactionFee => &mut self.transaction_fee,
            FormulaLine::Freight => &mut self.freight,
        };
        *flag = !*flag;
        *flag
    }
}
