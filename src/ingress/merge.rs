use crate::error::{Result, TilewireError};
use crate::ingress::rule::IngressRule;
use serde_yaml_ng::{Mapping, Value};

/// Service string marking the catch-all fallback rule, which must stay last.
pub const FALLBACK_SERVICE: &str = "http_status:404";

/// Outcome of merging a rule into a config document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
	/// An identical rule already existed; the document was not touched.
	Unchanged,
	/// The rule was inserted.
	Modified,
}

/// Merge `rule` into the `ingress` sequence of a parsed config document.
///
/// The sequence is created if absent. An existing rule that is structurally
/// identical to the new one (same fields, same presence) leaves the document
/// untouched. Otherwise the rule is inserted immediately before the fallback
/// sentinel, or appended when no sentinel exists. Fields outside `ingress`
/// are not touched.
pub fn merge_rule(doc: &mut Value, rule: &IngressRule) -> Result<MergeOutcome> {
	// An empty config file parses to null; treat it as an empty mapping.
	if doc.is_null() {
		*doc = Value::Mapping(Mapping::new());
	}

	let root = doc.as_mapping_mut().ok_or(TilewireError::NotAMapping)?;

	let slot = root
		.entry(Value::String("ingress".to_string()))
		.or_insert_with(|| Value::Sequence(Vec::new()));

	// `ingress:` with no value parses to null; treat it as an empty list.
	if slot.is_null() {
		*slot = Value::Sequence(Vec::new());
	}

	let rules = slot
		.as_sequence_mut()
		.ok_or(TilewireError::IngressNotASequence)?;

	let new_value = rule.to_value()?;

	if rules.iter().any(|existing| *existing == new_value) {
		return Ok(MergeOutcome::Unchanged);
	}

	match fallback_index(rules) {
		Some(idx) => rules.insert(idx, new_value),
		None => rules.push(new_value),
	}

	Ok(MergeOutcome::Modified)
}

/// Index of the first fallback sentinel rule, if any.
fn fallback_index(rules: &[Value]) -> Option<usize> {
	rules
		.iter()
		.position(|rule| rule.get("service").and_then(Value::as_str) == Some(FALLBACK_SERVICE))
}
