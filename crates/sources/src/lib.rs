//! PokeProxy - Sources
//!
//! Network boundaries that receive signed Pokemon and hand them to the
//! pipeline.
//!
//! # Available Sources
//!
//! - **HTTP** - `POST /stream` ingestion plus `/health` and `/stats`
//!
//! # Example
//!
//! ```ignore
//! use pokeproxy_sources::http::{HttpSource, HttpSourceConfig};
//! use tokio_util::sync::CancellationToken;
//!
//! let source = HttpSource::new(HttpSourceConfig::with_port(8000), pipeline);
//! source.run(CancellationToken::new()).await?;
//! ```

pub mod http;

pub use http::{HttpSource, HttpSourceConfig, HttpSourceError};
