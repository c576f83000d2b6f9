//! Engine configuration

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

use core_kernel::money::{to_cents, Cents};
use core_kernel::Timezone;
use domain_credit::SolverConfig;

/// Engine configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// User's timezone, used to decide what "today" is
    pub timezone: Timezone,
    /// Category of the wallet expense that mirrors internal project funding
    pub investment_category: String,
    /// Slack when deciding that a credit is fully paid, in major units
    pub settlement_tolerance: Decimal,
    /// Slack when deciding that a goal's monthly quota is covered, in major units
    pub quota_tolerance: Decimal,
    /// Bisection settings for the interest-rate solver
    pub solver: SolverConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            timezone: Timezone::default(),
            investment_category: "Inversión".to_string(),
            settlement_tolerance: dec!(1.00),
            quota_tolerance: dec!(1.00),
            solver: SolverConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Loads configuration from environment
    ///
    /// Variables use the `FINANCE` prefix and `__` for nesting, e.g.
    /// `FINANCE__TIMEZONE=America/Bogota` or `FINANCE__SOLVER__ITERATIONS=40`.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(
                config::Environment::with_prefix("FINANCE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Sets the timezone
    pub fn with_timezone(mut self, timezone: Timezone) -> Self {
        self.timezone = timezone;
        self
    }

    pub fn settlement_tolerance_cents(&self) -> Cents {
        to_cents(self.settlement_tolerance)
    }

    pub fn quota_tolerance_cents(&self) -> Cents {
        to_cents(self.quota_tolerance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.investment_category, "Inversión");
        assert_eq!(config.settlement_tolerance_cents(), Cents::new(100));
        assert_eq!(config.quota_tolerance_cents(), Cents::new(100));
        assert_eq!(config.solver.iterations, 20);
        assert_eq!(config.solver.upper_pct, 1000.0);
    }

    #[test]
    fn test_partial_document_keeps_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"timezone": "Europe/Madrid", "solver": {"iterations": 40}}"#)
                .unwrap();

        assert_eq!(config.timezone, Timezone::parse("Europe/Madrid").unwrap());
        assert_eq!(config.solver.iterations, 40);
        assert_eq!(config.solver.tolerance, 0.01);
        assert_eq!(config.quota_tolerance, dec!(1));
    }
}
