//! The rewrite engine: clear, add, remove — in that order, always.
//!
//! ```text
//! Inbound QueryParams
//!       │
//!       ▼
//! ┌───────────┐
//! │  Rewrite  │──▶ clear ──▶ add (render + encode) ──▶ remove
//! └───────────┘
//!       │
//!       ▼
//! Rewritten QueryParams (forwarded upstream)
//! ```
//!
//! Phase order is the correctness contract: clear runs before any directive
//! is considered, and removal runs strictly after the whole add phase, so an
//! add and a remove of the same key always results in removal.

use tracing::{debug, trace};

use crate::config::RewriteConfig;
use crate::params::QueryParams;
use crate::render::Render;
use crate::Result;

/// A compiled rewrite policy instance.
///
/// Stateless across calls; one instance serves many concurrent requests.
/// [`apply`](Self::apply) computes on a copy of the input: a failed render
/// leaves the caller's map exactly as it was.
#[derive(Debug, Clone)]
pub struct QueryParamsRewrite {
    config: RewriteConfig,
}

impl QueryParamsRewrite {
    /// Build a rewrite from a validated configuration.
    ///
    /// Fails fast on configuration defects (blank directive names) instead
    /// of skipping directives at request time.
    pub fn new(config: RewriteConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Borrow the underlying configuration.
    #[must_use]
    pub fn config(&self) -> &RewriteConfig {
        &self.config
    }

    /// Rewrite `params` into a new map.
    ///
    /// Deterministic for a deterministic renderer: identical inputs yield an
    /// identical output, including key and value ordering. The input map is
    /// never mutated.
    pub fn apply(&self, params: &QueryParams, render: &dyn Render) -> Result<QueryParams> {
        if self.config.is_noop() {
            return Ok(params.clone());
        }

        // Clear phase.
        let mut result = if self.config.clear_all {
            debug!(cleared = params.len(), "cleared inbound query parameters");
            QueryParams::new()
        } else {
            params.clone()
        };

        self.apply_adds(&mut result, render)?;
        self.apply_removes(&mut result);

        debug!(
            added = self.config.add_query_parameters.len(),
            removed = self.config.remove_query_parameters.len(),
            keys = result.len(),
            "query parameters rewritten"
        );
        Ok(result)
    }

    // ── Add phase ───────────────────────────────────────────────────────

    fn apply_adds(&self, result: &mut QueryParams, render: &dyn Render) -> Result<()> {
        for directive in &self.config.add_query_parameters {
            let name = encode_spaces(&render.render(&directive.name)?);
            let value = encode_spaces(&render.render(&directive.value)?);
            trace!(
                name = %name,
                append = directive.append_to_existing_array,
                "applying add directive"
            );
            if directive.append_to_existing_array {
                result.append(name, value);
            } else {
                result.set(name, value);
            }
        }
        Ok(())
    }

    // ── Remove phase ────────────────────────────────────────────────────

    fn apply_removes(&self, result: &mut QueryParams) {
        for name in &self.config.remove_query_parameters {
            // Literal key match; removal targets are never rendered.
            if result.remove(name).is_some() {
                trace!(name = %name, "removed query parameter");
            }
        }
    }
}

/// Replace every literal space (U+0020) with `%20`.
///
/// Intentionally partial encoding: `&`, `=`, `'`, `%` and already
/// percent-encoded sequences pass through untouched, so pre-encoded
/// operator values are never double-encoded.
fn encode_spaces(s: &str) -> String {
    s.replace(' ', "%20")
}
