//! The policy-chain seam.
//!
//! The gateway holds an ordered list of `Arc<dyn Policy>` values per route
//! and drives each one against the request before forwarding upstream. How
//! policies are scheduled, and how a failure turns into an HTTP response,
//! belongs to the chain; this crate only implements the seam.

use crate::params::QueryParams;
use crate::render::Render;
use crate::rewrite::QueryParamsRewrite;
use crate::Result;

/// One step in the gateway's request-policy chain.
///
/// A failing policy aborts the chain for this request; the map passed to
/// `on_request` must not be left half-rewritten on failure.
pub trait Policy: Send + Sync {
    /// Policy name, for chain diagnostics and logs.
    fn name(&self) -> &str;

    /// Rewrite the request's query parameters in place.
    fn on_request(&self, params: &mut QueryParams, render: &dyn Render) -> Result<()>;
}

impl Policy for QueryParamsRewrite {
    fn name(&self) -> &str {
        "transform-queryparams"
    }

    fn on_request(&self, params: &mut QueryParams, render: &dyn Render) -> Result<()> {
        // Compute on a copy, swap only on success: the chain never observes
        // a partially rewritten map.
        *params = self.apply(params, render)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{QueryParamDirective, RewriteConfig};
    use crate::render::{ContextRender, PassthroughRender};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn on_request_rewrites_in_place() {
        let policy = QueryParamsRewrite::new(RewriteConfig {
            add_query_parameters: vec![QueryParamDirective::set("foo", "bar")],
            remove_query_parameters: vec!["old".to_string()],
            ..Default::default()
        })
        .unwrap();

        let mut params = QueryParams::from_iter([("old", "value")]);
        policy.on_request(&mut params, &PassthroughRender).unwrap();
        assert_eq!(params, QueryParams::from_iter([("foo", "bar")]));
    }

    #[test]
    fn on_request_failure_leaves_map_untouched() {
        let policy = QueryParamsRewrite::new(RewriteConfig {
            add_query_parameters: vec![QueryParamDirective::set("u", "{{attrs.missing}}")],
            ..Default::default()
        })
        .unwrap();

        let before = QueryParams::from_iter([("a", "1")]);
        let mut params = before.clone();
        let render = ContextRender::new(json!({}));
        assert!(policy.on_request(&mut params, &render).is_err());
        assert_eq!(params, before);
    }

    #[test]
    fn policy_is_shareable_across_requests() {
        let policy: Arc<dyn Policy> = Arc::new(
            QueryParamsRewrite::new(RewriteConfig {
                add_query_parameters: vec![QueryParamDirective::set("v", "1")],
                ..Default::default()
            })
            .unwrap(),
        );
        assert_eq!(policy.name(), "transform-queryparams");

        // Two independent request-scoped maps through the same instance.
        let mut first = QueryParams::new();
        let mut second = QueryParams::from_iter([("x", "y")]);
        policy.on_request(&mut first, &PassthroughRender).unwrap();
        policy.on_request(&mut second, &PassthroughRender).unwrap();
        assert_eq!(first.first("v"), Some("1"));
        assert_eq!(second.first("v"), Some("1"));
        assert_eq!(second.first("x"), Some("y"));
    }
}
