//! Query-parameter rewrite policy for an API gateway's request chain.
//!
//! Given the inbound request's query parameters and a declarative
//! configuration, produces the parameter set the request is forwarded
//! upstream with. Three phases, always in this order:
//!
//! 1. **Clear** — `clear_all` discards every inbound parameter.
//! 2. **Add** — ordered set/append directives, with `{{...}}` expression
//!    rendering and space-only `%20` encoding of names and values.
//! 3. **Remove** — ordered literal key deletions.
//!
//! # Example
//!
//! ```rust
//! use queryparams_rewrite::{
//!     PassthroughRender, QueryParamDirective, QueryParams, QueryParamsRewrite, RewriteConfig,
//! };
//!
//! let rewrite = QueryParamsRewrite::new(RewriteConfig {
//!     add_query_parameters: vec![QueryParamDirective::set("api-version", "2")],
//!     remove_query_parameters: vec!["debug".to_string()],
//!     ..Default::default()
//! })?;
//!
//! let inbound = QueryParams::from_query_string("debug=1&q=rust");
//! let upstream = rewrite.apply(&inbound, &PassthroughRender)?;
//! assert_eq!(upstream.to_query_string(), "q=rust&api-version=2");
//! # Ok::<(), queryparams_rewrite::Error>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod params;
pub mod policy;
pub mod render;
pub mod rewrite;

pub use config::{QueryParamDirective, RewriteConfig};
pub use error::{Error, Result};
pub use params::QueryParams;
pub use policy::Policy;
pub use render::{ContextRender, PassthroughRender, Render};
pub use rewrite::QueryParamsRewrite;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Setup tracing/logging for embedders and examples.
pub fn setup_tracing(level: &str, format: Option<&str>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::registry().with(filter);

    match format {
        Some("json") => {
            subscriber.with(fmt::layer().json()).init();
        }
        _ => {
            subscriber.with(fmt::layer()).init();
        }
    }

    Ok(())
}
