//! Tilewire - CLI tools for wiring a self-hosted map tile server into the
//! configuration artifacts around it.
//!
//! This library provides the core functionality for the two tilewire
//! binaries, including:
//! - Ingress rule merging for tunnel-proxy YAML configs (idempotent,
//!   fallback-sentinel aware, backup-first)
//! - Style JSON rewriting for MapLibre/Mapbox GL documents (tiles, glyphs,
//!   sprite)
//!
//! # Example
//!
//! ```
//! use tilewire::ingress::{IngressRule, MergeOutcome, merge_rule};
//!
//! let mut doc = serde_yaml_ng::from_str("ingress:\n- service: http_status:404\n").unwrap();
//!
//! let rule = IngressRule {
//!     service: "http://127.0.0.1:8080".to_string(),
//!     hostname: Some("tiles.example.com".to_string()),
//!     path: None,
//! };
//!
//! let outcome = merge_rule(&mut doc, &rule).unwrap();
//! assert_eq!(outcome, MergeOutcome::Modified);
//! ```

pub mod error;
pub mod ingress;
pub mod style;

pub use error::{Result, TilewireError};
