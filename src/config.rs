//! Declarative rewrite configuration.
//!
//! Loaded once at policy activation (YAML or JSON through serde) and shared
//! read-only across requests. Every field defaults, so `{}` deserializes to
//! the no-op configuration.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// One requested parameter insertion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryParamDirective {
    /// Parameter name; may contain `{{...}}` expressions resolved per request.
    pub name: String,

    /// Parameter value; may contain `{{...}}` expressions resolved per request.
    pub value: String,

    /// `false` (default): replace the key's whole value sequence.
    /// `true`: append the value at the end of the existing sequence.
    #[serde(default)]
    pub append_to_existing_array: bool,
}

impl QueryParamDirective {
    /// A replacing directive (the default mode).
    pub fn set(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            append_to_existing_array: false,
        }
    }

    /// An appending directive.
    pub fn append(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            append_to_existing_array: true,
        }
    }
}

/// Complete configuration for one rewrite policy instance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RewriteConfig {
    /// Discard every inbound parameter before any directive runs.
    pub clear_all: bool,

    /// Insertions, applied in declaration order after the clear phase.
    pub add_query_parameters: Vec<QueryParamDirective>,

    /// Keys to delete entirely, applied in declaration order after the whole
    /// add phase. Matched as literal strings, never rendered.
    pub remove_query_parameters: Vec<String>,
}

impl RewriteConfig {
    /// Reject directives the transformer cannot apply meaningfully.
    ///
    /// A blank name would silently produce a nameless parameter; that is a
    /// configuration defect, so it fails here rather than being skipped at
    /// request time.
    pub fn validate(&self) -> Result<()> {
        for directive in &self.add_query_parameters {
            if directive.name.trim().is_empty() {
                return Err(Error::Config(
                    "add directive with blank parameter name".to_string(),
                ));
            }
        }
        for name in &self.remove_query_parameters {
            if name.trim().is_empty() {
                return Err(Error::Config(
                    "remove directive with blank parameter name".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// `true` if applying this configuration can never change a map.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        !self.clear_all
            && self.add_query_parameters.is_empty()
            && self.remove_query_parameters.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn deserialize_from_yaml() {
        let yaml = r"
clear_all: true
add_query_parameters:
  - name: api-version
    value: '2'
  - name: tag
    value: '{{attrs.user}}'
    append_to_existing_array: true
remove_query_parameters:
  - debug
";
        let config: RewriteConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(config.clear_all);
        assert_eq!(config.add_query_parameters.len(), 2);
        assert!(!config.add_query_parameters[0].append_to_existing_array);
        assert!(config.add_query_parameters[1].append_to_existing_array);
        assert_eq!(config.remove_query_parameters, vec!["debug".to_string()]);
    }

    #[test]
    fn deserialize_empty_yaml_produces_noop() {
        let config: RewriteConfig = serde_yaml::from_str("{}").unwrap();
        assert!(config.is_noop());
        config.validate().unwrap();
    }

    #[test]
    fn append_flag_defaults_to_false() {
        let json = r#"{"add_query_parameters": [{"name": "foo", "value": "bar"}]}"#;
        let config: RewriteConfig = serde_json::from_str(json).unwrap();
        assert!(!config.add_query_parameters[0].append_to_existing_array);
    }

    #[test]
    fn clear_all_alone_is_not_noop() {
        let config = RewriteConfig {
            clear_all: true,
            ..Default::default()
        };
        assert!(!config.is_noop());
    }

    #[test]
    fn validate_rejects_blank_add_name() {
        let config = RewriteConfig {
            add_query_parameters: vec![QueryParamDirective::set("  ", "value")],
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("blank"));
    }

    #[test]
    fn validate_rejects_blank_remove_name() {
        let config = RewriteConfig {
            remove_query_parameters: vec![String::new()],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_accepts_expression_names() {
        let config = RewriteConfig {
            add_query_parameters: vec![QueryParamDirective::set("{{attrs.key}}", "v")],
            ..Default::default()
        };
        config.validate().unwrap();
    }
}
