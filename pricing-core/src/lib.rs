pub mod calculations;
pub mod format;
pub mod models;
pub mod report;
pub mod session;

pub use calculations::{CalculationResult, PriceChange, ScenarioRow, WhatIfRow};
pub use models::*;
pub use session::PricingSession;
