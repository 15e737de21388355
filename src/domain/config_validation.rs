//! Configuration validation.
//!
//! Validates all config fields before any data is loaded.

use crate::domain::error::PairsimError;
use crate::ports::config_port::ConfigPort;

pub fn validate_simulation_config(config: &dyn ConfigPort) -> Result<(), PairsimError> {
    validate_trades_file(config)?;
    validate_investment(config)?;
    Ok(())
}

fn validate_trades_file(config: &dyn ConfigPort) -> Result<(), PairsimError> {
    match config.get_string("data", "trades_file") {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(PairsimError::ConfigMissing {
            section: "data".to_string(),
            key: "trades_file".to_string(),
        }),
    }
}

/// Only the syntax is checked here. The range is checked on the resolved
/// value, after command-line overrides, by `performance::validate_investment`.
fn validate_investment(config: &dyn ConfigPort) -> Result<(), PairsimError> {
    config
        .get_double("simulation", "investment")
        .map(|_| ())
        .map_err(|reason| PairsimError::ConfigInvalid {
            section: "simulation".to_string(),
            key: "investment".to_string(),
            reason,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::file_config_adapter::FileConfigAdapter;

    fn config(content: &str) -> FileConfigAdapter {
        FileConfigAdapter::from_string(content).unwrap()
    }

    #[test]
    fn valid_config_passes() {
        let c = config("[data]\ntrades_file = trades.csv\n[simulation]\ninvestment = 50000\n");
        assert!(validate_simulation_config(&c).is_ok());
    }

    #[test]
    fn investment_is_optional() {
        let c = config("[data]\ntrades_file = trades.csv\n");
        assert!(validate_simulation_config(&c).is_ok());
    }

    #[test]
    fn missing_trades_file() {
        let c = config("[simulation]\ninvestment = 50000\n");
        let err = validate_simulation_config(&c).unwrap_err();
        assert!(matches!(err, PairsimError::ConfigMissing { key, .. } if key == "trades_file"));
    }

    #[test]
    fn blank_trades_file() {
        let c = config("[data]\ntrades_file =\n");
        let err = validate_simulation_config(&c).unwrap_err();
        assert!(matches!(err, PairsimError::ConfigMissing { .. }));
    }

    #[test]
    fn non_positive_investment_left_to_override() {
        for value in ["0", "-500"] {
            let c = config(&format!(
                "[data]\ntrades_file = t.csv\n[simulation]\ninvestment = {value}\n"
            ));
            assert!(validate_simulation_config(&c).is_ok());
        }
    }

    #[test]
    fn non_numeric_investment() {
        let c = config("[data]\ntrades_file = t.csv\n[simulation]\ninvestment = lots\n");
        let err = validate_simulation_config(&c).unwrap_err();
        assert!(matches!(err, PairsimError::ConfigInvalid { key, .. } if key == "investment"));
    }
}
