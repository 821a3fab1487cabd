//! Gatekeeper configuration

use serde::{Deserialize, Serialize};

/// Configuration for validation rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Require the client and billing terms sections the row formatter needs
    pub require_sections: bool,

    /// Reject contacts whose type is not `DSP` or `Accounts Payable`
    pub validate_contact_types: bool,

    /// Reject more than one contact of the same type
    pub validate_contact_count: bool,

    /// Reject plan catalog rows whose label is not one of the fixed ranges
    pub validate_plan_labels: bool,

    /// Reject unparseable term dates and a start date after the end date
    pub validate_term_dates: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            require_sections: true,
            validate_contact_types: true,
            validate_contact_count: false,
            validate_plan_labels: true,
            validate_term_dates: true,
        }
    }
}

impl ValidationConfig {
    /// Create a permissive configuration (only what formatting needs)
    pub fn permissive() -> Self {
        Self {
            require_sections: true,
            validate_contact_types: false,
            validate_contact_count: false,
            validate_plan_labels: false,
            validate_term_dates: false,
        }
    }

    /// Create a strict configuration (all validations enabled)
    pub fn strict() -> Self {
        Self {
            require_sections: true,
            validate_contact_types: true,
            validate_contact_count: true,
            validate_plan_labels: true,
            validate_term_dates: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ValidationConfig::default();
        assert!(config.require_sections);
        assert!(config.validate_contact_types);
        assert!(!config.validate_contact_count);
    }

    #[test]
    fn test_permissive_config() {
        let config = ValidationConfig::permissive();
        assert!(config.require_sections);
        assert!(!config.validate_plan_labels);
        assert!(!config.validate_term_dates);
    }

    #[test]
    fn test_strict_config() {
        let config = ValidationConfig::strict();
        assert!(config.validate_contact_count);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: ValidationConfig = toml::from_str("validate_contact_count = true").unwrap();
        assert!(config.validate_contact_count);
        assert!(config.validate_term_dates);
    }
}
