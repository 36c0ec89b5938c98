#![deny(missing_docs)]

//! # Recipe Configuration
//!
//! The immutable options driving one patch run. A configuration is produced
//! once per recipe invocation, validated, and never mutated; recipes must be
//! serializable, so the CLI can load them from YAML or JSON files.

use crate::error::{RecipeError, RecipeResult};
use crate::tree::Annotation;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

fn default_true() -> bool {
    true
}

/// Options for one structural-patch recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeConfig {
    /// Display name, used in reports.
    pub name: String,

    /// Human-readable description of what the recipe does.
    #[serde(default)]
    pub description: Option<String>,

    /// Fully qualified name of the class to patch, e.g. `com.acme.FooBar`.
    pub target_fqn: String,

    /// Field names whose presence marks the patch as already applied.
    #[serde(default)]
    pub marker_fields: Vec<String>,

    /// Whether pre-existing fields are removed before insertion.
    #[serde(default = "default_true")]
    pub prune_fields: bool,

    /// Template text with positional `#{}` placeholders, instantiated into
    /// new members. May be empty for annotation-only recipes.
    #[serde(default)]
    pub template: String,

    /// Positional arguments substituted into the template, in order.
    #[serde(default)]
    pub template_args: Vec<String>,

    /// Annotations appended to the target declaration.
    #[serde(default)]
    pub annotations: Vec<Annotation>,

    /// Qualified names the inserted code requires, merged into the file's
    /// import block by the caller.
    #[serde(default)]
    pub imports: Vec<String>,

    /// Superclass to set on the target declaration, if any.
    #[serde(default)]
    pub extend_with: Option<String>,
}

impl RecipeConfig {
    /// Checks the configuration for structural problems before a run.
    ///
    /// Template arity is not checked here; only the template engine knows
    /// the placeholder count (see `Template`).
    pub fn validate(&self) -> RecipeResult<()> {
        if self.name.trim().is_empty() {
            return Err(RecipeError::General("Recipe name must not be empty".into()));
        }
        if !is_qualified_name(&self.target_fqn) {
            return Err(RecipeError::General(format!(
                "Invalid target class name: '{}'",
                self.target_fqn
            )));
        }
        for marker in &self.marker_fields {
            if !is_identifier(marker) {
                return Err(RecipeError::General(format!(
                    "Invalid marker field name: '{}'",
                    marker
                )));
            }
        }
        for import in &self.imports {
            if !is_qualified_name(import) {
                return Err(RecipeError::General(format!(
                    "Invalid import: '{}'",
                    import
                )));
            }
        }
        Ok(())
    }
}

/// Whether `s` is a plain identifier.
pub(crate) fn is_identifier(s: &str) -> bool {
    static IDENT_RE: OnceLock<Regex> = OnceLock::new();
    let re = IDENT_RE.get_or_init(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("Invalid regex"));
    re.is_match(s)
}

/// Whether `s` is a dot-separated chain of identifiers.
pub(crate) fn is_qualified_name(s: &str) -> bool {
    static QUALIFIED_RE: OnceLock<Regex> = OnceLock::new();
    let re = QUALIFIED_RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*(\.[A-Za-z_$][A-Za-z0-9_$]*)*$").expect("Invalid regex")
    });
    re.is_match(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal() -> RecipeConfig {
        RecipeConfig {
            name: "test".into(),
            description: None,
            target_fqn: "com.acme.Foo".into(),
            marker_fields: vec![],
            prune_fields: true,
            template: String::new(),
            template_args: vec![],
            annotations: vec![],
            imports: vec![],
            extend_with: None,
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(minimal().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_target() {
        let mut cfg = minimal();
        cfg.target_fqn = "com.acme.Foo Bar".into();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_marker() {
        let mut cfg = minimal();
        cfg.marker_fields = vec!["not a name".into()];
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_import() {
        let mut cfg = minimal();
        cfg.imports = vec!["org.springframework..Configuration".into()];
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_yaml_round_trip() {
        let cfg = RecipeConfig {
            marker_fields: vec!["usersPath".into()],
            annotations: vec![Annotation::marker("Configuration")],
            imports: vec!["org.springframework.context.annotation.Configuration".into()],
            ..minimal()
        };
        // serde derives are exercised through JSON here; the CLI adds YAML.
        let text = serde_json::to_string(&cfg).unwrap();
        let back: RecipeConfig = serde_json::from_str(&text).unwrap();
        assert_eq!(cfg, back);
    }
}
