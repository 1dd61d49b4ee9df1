//! Expression rendering for directive names and values.
//!
//! The transformer never interprets expressions itself; it calls through the
//! [`Render`] trait so the gateway can plug in its real expression engine.
//! Two implementations ship with the crate: [`PassthroughRender`] for static
//! configurations and tests, and [`ContextRender`] resolving `{{dotted.path}}`
//! placeholders against a per-request JSON context.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::{Error, Result};

/// Resolves embedded dynamic expressions in a configured string against
/// per-request context.
///
/// Must be deterministic for a given request context, otherwise the rewrite
/// itself stops being deterministic.
pub trait Render: Send + Sync {
    /// Resolve `raw` to a literal string, or fail with a render error.
    fn render(&self, raw: &str) -> Result<String>;
}

/// Identity renderer: every string resolves to itself.
///
/// The right choice when a configuration carries no expressions, and the
/// standard stub in tests (mirrors an expression engine that echoes input).
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughRender;

impl Render for PassthroughRender {
    fn render(&self, raw: &str) -> Result<String> {
        Ok(raw.to_string())
    }
}

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{(\w[\w.-]*)\}\}").expect("static regex"));

/// Renders `{{dotted.path}}` placeholders against a request-scoped JSON
/// context (request attributes, headers, auth claims — whatever the gateway
/// binds per request).
///
/// Dotted paths walk objects by key; a numeric segment indexes arrays
/// (`claims.roles.0`). A placeholder whose path resolves to nothing, or to a
/// JSON container, fails the render: an unresolvable expression must abort
/// the request rather than silently injecting an empty parameter.
#[derive(Debug, Clone)]
pub struct ContextRender {
    context: Value,
}

impl ContextRender {
    /// Bind a renderer to one request's context.
    #[must_use]
    pub fn new(context: Value) -> Self {
        Self { context }
    }

    fn resolve(&self, path: &str) -> Option<&Value> {
        let mut current = &self.context;
        for segment in path.split('.') {
            current = match current {
                Value::Object(map) => map.get(segment)?,
                Value::Array(arr) => arr.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(current)
    }
}

impl Render for ContextRender {
    fn render(&self, raw: &str) -> Result<String> {
        let mut result = raw.to_string();
        for cap in PLACEHOLDER.captures_iter(raw) {
            let placeholder = &cap[0];
            let path = &cap[1];
            let resolved = self
                .resolve(path)
                .ok_or_else(|| Error::render(raw, format!("unknown reference '{path}'")))?;
            let literal = match resolved {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                Value::Null | Value::Array(_) | Value::Object(_) => {
                    return Err(Error::render(
                        raw,
                        format!("reference '{path}' is not a scalar"),
                    ));
                }
            };
            result = result.replace(placeholder, &literal);
        }
        Ok(result)
    }
}
