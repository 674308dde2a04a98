use crate::error::{Result, TilewireError};
use serde::Serialize;
use serde_yaml_ng::Value;

/// A single ingress rule destined for the tunnel-proxy config.
///
/// Optional fields are omitted entirely from the serialized mapping, so two
/// rules that differ only in which fields are present never compare equal.
#[derive(Debug, Clone, Serialize)]
pub struct IngressRule {
	/// Local service URL to route to (e.g. `http://127.0.0.1:8080`).
	pub service: String,

	/// Hostname-based match (e.g. `tiles.example.com`).
	#[serde(skip_serializing_if = "Option::is_none")]
	pub hostname: Option<String>,

	/// Path-based match (e.g. `/data/*`).
	#[serde(skip_serializing_if = "Option::is_none")]
	pub path: Option<String>,
}

impl IngressRule {
	/// Convert the rule to a YAML mapping for comparison and insertion.
	pub fn to_value(&self) -> Result<Value> {
		serde_yaml_ng::to_value(self).map_err(|source| TilewireError::YamlSerialize { source })
	}
}
