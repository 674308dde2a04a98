//! Ingress rule merging for tunnel-proxy YAML configs.
//!
//! This module handles:
//! - Config document loading and saving
//! - Structural rule deduplication
//! - Fallback-sentinel-aware insertion
//! - Timestamped pre-write backups

pub mod backup;
pub mod document;
pub mod merge;
pub mod rule;

pub use backup::{backup_path, write_backup};
pub use document::{load_document, parse_document, save_document};
pub use merge::{FALLBACK_SERVICE, MergeOutcome, merge_rule};
pub use rule::IngressRule;
