//! Assembly options and the context that carries them
//!
//! Options are plain serde structs so they can be stored next to a
//! simulation and reloaded:
//!
//! ```json
//! {
//!   "parallel": true,
//!   "cache_weak_form": true,
//!   "quadrature": { "near_field_order": 4, "coincident_order": 6 }
//! }
//! ```
//!
//! Missing fields take their defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::error::Result;
use crate::core::integration::QuadratureOptions;

/// Options controlling weak-form assembly
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssemblyOptions {
    /// Distribute test elements over worker threads (default: true)
    pub parallel: bool,
    /// Keep the assembled weak form in the boundary operator (default: true)
    pub cache_weak_form: bool,
    /// Log assembly summaries at info level (default: false)
    pub verbose: bool,
    /// Quadrature parameters
    pub quadrature: QuadratureOptions,
}

impl Default for AssemblyOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            cache_weak_form: true,
            verbose: false,
            quadrature: QuadratureOptions::default(),
        }
    }
}

impl AssemblyOptions {
    /// Check that every parameter is in range
    pub fn validate(&self) -> Result<()> {
        self.quadrature.validate()
    }

    /// Parse and validate options from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        let options: AssemblyOptions = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Load and validate options from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Save options to a JSON file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

/// Shared assembly settings for a family of operators.
///
/// Operators hold the context through an `Arc`; it is read-only after
/// construction.
#[derive(Debug, Clone, Default)]
pub struct Context {
    options: AssemblyOptions,
}

impl Context {
    /// Create a context after validating `options`
    pub fn new(options: AssemblyOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    /// Assembly options
    pub fn options(&self) -> &AssemblyOptions {
        &self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::BemError;

    #[test]
    fn test_defaults() {
        let options = AssemblyOptions::default();
        assert!(options.parallel);
        assert!(options.cache_weak_form);
        assert!(!options.verbose);
        assert!(options.validate().is_ok());
        assert_eq!(Context::default().options(), &options);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let options = AssemblyOptions::from_json_str(
            r#"{ "parallel": false, "quadrature": { "coincident_order": 8 } }"#,
        )
        .unwrap();
        assert!(!options.parallel);
        assert!(options.cache_weak_form);
        assert_eq!(options.quadrature.coincident_order, 8);
        assert_eq!(
            options.quadrature.near_field_order,
            QuadratureOptions::default().near_field_order
        );
    }

    #[test]
    fn test_invalid_json() {
        let err = AssemblyOptions::from_json_str("{ parallel: ").unwrap_err();
        assert!(matches!(err, BemError::Config(_)));
    }

    #[test]
    fn test_out_of_range_options_rejected() {
        let err = AssemblyOptions::from_json_str(r#"{ "quadrature": { "far_field_order": 0 } }"#)
            .unwrap_err();
        assert!(matches!(err, BemError::InvalidOptions(_)));

        let options = AssemblyOptions {
            quadrature: QuadratureOptions {
                max_subelements: 1,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(Context::new(options).is_err());
    }

    #[test]
    fn test_file_round_trip() {
        let path = std::env::temp_dir().join(format!(
            "bem-operators-options-{}.json",
            std::process::id()
        ));
        let options = AssemblyOptions {
            verbose: true,
            ..Default::default()
        };
        options.to_file(&path).unwrap();
        let loaded = AssemblyOptions::from_file(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(loaded, options);
    }

    #[test]
    fn test_missing_file() {
        let err = AssemblyOptions::from_file("/nonexistent/bem-options.json").unwrap_err();
        assert!(matches!(err, BemError::Io(_)));
    }
}
