//! Style JSON rewriting for MapLibre/Mapbox GL documents.
//!
//! This module handles:
//! - Loading a style from disk or fetching the upstream original
//! - Rewriting remote tile sources to a local tile server endpoint
//! - Glyph and sprite URL rewiring

pub mod document;
pub mod rewrite;

pub use document::{
	DEFAULT_REMOTE_STYLE_URL, load_mapping_file, load_style_from_file, load_style_from_url,
	parse_mapping, resolve_mapping, save_style,
};
pub use rewrite::{FieldChange, LocalEndpoint, RewriteReport, rewrite_style};
