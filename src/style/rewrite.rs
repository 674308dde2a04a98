use regex::Regex;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::LazyLock;

static REMOTE_URL: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^https?://").expect("pattern is valid"));

/// Local tile server endpoint resolved from the CLI flags.
#[derive(Debug)]
pub struct LocalEndpoint {
	base: String,
}

impl LocalEndpoint {
	/// Resolve the base URL from the port and optional override.
	///
	/// The override has any trailing slash removed and any trailing `/data`
	/// suffix stripped, so `https://tiles.example.com/data/` and
	/// `https://tiles.example.com` resolve to the same endpoint. Without an
	/// override the base is `http://localhost:<port>`.
	pub fn resolve(port: u16, base_url: Option<&str>) -> Self {
		let base = match base_url {
			Some(url) => {
				let trimmed = url.trim_end_matches('/');
				let trimmed = trimmed.strip_suffix("/data").unwrap_or(trimmed);
				trimmed.to_string()
			}
			None => format!("http://localhost:{port}"),
		};

		LocalEndpoint { base }
	}

	/// Tile URL template served by the local tile server.
	///
	/// Always the merged v3 endpoint; the mapped MBTiles basename does not
	/// appear in the template (it only gates whether a source is rewritten).
	pub fn tiles_url(&self) -> String {
		format!("{}/data/v3/{{z}}/{{x}}/{{y}}.pbf", self.base)
	}

	/// Glyphs URL template.
	pub fn glyphs_url(&self) -> String {
		format!("{}/fonts/{{fontstack}}/{{range}}.pbf", self.base)
	}

	/// Sprite base URL.
	pub fn sprite_url(&self) -> String {
		format!("{}/local1-versatiles/basics/sprites@2x", self.base)
	}
}

/// A single before/after field rewrite, reported for display.
#[derive(Debug)]
pub struct FieldChange {
	/// Which field changed (e.g. `glyphs`, `sprite[0].url`).
	pub field: String,

	/// Value before the rewrite.
	pub before: String,

	/// Value after the rewrite.
	pub after: String,
}

/// Accumulated results of a style rewrite.
#[derive(Debug, Default)]
pub struct RewriteReport {
	/// Names of tile sources whose `tiles` were replaced.
	pub rewritten_sources: Vec<String>,

	/// Non-fatal warnings (remote sources with no mapping entry).
	pub warnings: Vec<String>,

	/// Before/after pairs for glyph and sprite rewrites.
	pub changes: Vec<FieldChange>,
}

/// Rewrite remote tile sources, glyphs, and sprite URLs in place.
///
/// Tile sources are only touched when they contain at least one remote URL
/// and the mapping has a non-empty entry for them; everything else is left
/// alone and reported. Glyph and sprite fields are rewritten whenever
/// present.
pub fn rewrite_style(
	style: &mut Value,
	mapping: &HashMap<String, String>,
	endpoint: &LocalEndpoint,
) -> RewriteReport {
	let mut report = RewriteReport::default();

	rewrite_tile_sources(style, mapping, endpoint, &mut report);
	rewrite_glyphs(style, endpoint, &mut report);
	rewrite_sprite(style, endpoint, &mut report);

	report
}

/// Whether a tile URL points at a remote host.
fn is_remote_url(url: &str) -> bool {
	REMOTE_URL.is_match(url)
}

fn rewrite_tile_sources(
	style: &mut Value,
	mapping: &HashMap<String, String>,
	endpoint: &LocalEndpoint,
	report: &mut RewriteReport,
) {
	let Some(sources) = style.get_mut("sources").and_then(Value::as_object_mut) else {
		return;
	};

	for (name, source) in sources.iter_mut() {
		let Some(obj) = source.as_object_mut() else {
			continue;
		};
		let Some(tiles) = obj.get("tiles").and_then(Value::as_array) else {
			continue;
		};
		if !tiles
			.iter()
			.any(|tile| tile.as_str().is_some_and(is_remote_url))
		{
			continue;
		}

		// An empty basename behaves the same as a missing entry.
		let mapped = mapping.get(name).filter(|basename| !basename.is_empty());
		if mapped.is_none() {
			report.warnings.push(format!(
				"No mapping provided for source '{name}', leaving tiles unchanged"
			));
			continue;
		}

		obj.insert("tiles".to_string(), json!([endpoint.tiles_url()]));
		// Prefer xyz, but never override an explicit scheme.
		obj.entry("scheme").or_insert_with(|| json!("xyz"));
		report.rewritten_sources.push(name.clone());
	}
}

fn rewrite_glyphs(style: &mut Value, endpoint: &LocalEndpoint, report: &mut RewriteReport) {
	let Some(glyphs) = style.get_mut("glyphs") else {
		return;
	};

	let before = glyphs.as_str().unwrap_or_default().to_string();
	let after = endpoint.glyphs_url();
	*glyphs = Value::String(after.clone());

	report.changes.push(FieldChange {
		field: "glyphs".to_string(),
		before,
		after,
	});
}

fn rewrite_sprite(style: &mut Value, endpoint: &LocalEndpoint, report: &mut RewriteReport) {
	let Some(sprite) = style.get_mut("sprite") else {
		return;
	};

	let after = endpoint.sprite_url();
	match sprite {
		Value::String(url) => {
			let before = url.clone();
			*url = after.clone();
			report.changes.push(FieldChange {
				field: "sprite".to_string(),
				before,
				after,
			});
		}
		Value::Array(entries) => {
			for (idx, entry) in entries.iter_mut().enumerate() {
				let Some(url) = entry.get_mut("url") else {
					continue;
				};
				let before = url.as_str().unwrap_or_default().to_string();
				*url = Value::String(after.clone());
				report.changes.push(FieldChange {
					field: format!("sprite[{idx}].url"),
					before,
					after: after.clone(),
				});
			}
		}
		_ => {}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn localhost() -> LocalEndpoint {
		LocalEndpoint::resolve(8080, None)
	}

	#[test]
	fn test_default_base_is_localhost_port() {
		let endpoint = LocalEndpoint::resolve(9090, None);

		assert_eq!(
			endpoint.tiles_url(),
			"http://localhost:9090/data/v3/{z}/{x}/{y}.pbf"
		);
	}

	#[test]
	fn test_base_override_strips_data_suffix() {
		let endpoint = LocalEndpoint::resolve(8080, Some("https://tiles.example.com/data/"));

		assert_eq!(
			endpoint.tiles_url(),
			"https://tiles.example.com/data/v3/{z}/{x}/{y}.pbf"
		);
		assert_eq!(
			endpoint.glyphs_url(),
			"https://tiles.example.com/fonts/{fontstack}/{range}.pbf"
		);
	}

	#[test]
	fn test_base_override_trailing_slash_only() {
		let endpoint = LocalEndpoint::resolve(8080, Some("https://tiles.example.com/"));

		assert_eq!(
			endpoint.sprite_url(),
			"https://tiles.example.com/local1-versatiles/basics/sprites@2x"
		);
	}

	#[test]
	fn test_mapped_source_rewritten() {
		let mut style = json!({
			"sources": {
				"s1": {"tiles": ["https://a/tiles"]}
			}
		});
		let mapping = HashMap::from([("s1".to_string(), "india-latest".to_string())]);

		let report = rewrite_style(&mut style, &mapping, &localhost());

		assert_eq!(report.rewritten_sources, vec!["s1"]);
		assert!(report.warnings.is_empty());
		assert_eq!(
			style["sources"]["s1"]["tiles"],
			json!(["http://localhost:8080/data/v3/{z}/{x}/{y}.pbf"])
		);
		assert_eq!(style["sources"]["s1"]["scheme"], json!("xyz"));
	}

	#[test]
	fn test_basename_is_not_interpolated() {
		// The mapped basename gates the rewrite but never appears in the
		// generated URL.
		let mut style_a = json!({"sources": {"s1": {"tiles": ["https://a/tiles"]}}});
		let mut style_b = style_a.clone();
		let mapping_a = HashMap::from([("s1".to_string(), "india-latest".to_string())]);
		let mapping_b = HashMap::from([("s1".to_string(), "other-region".to_string())]);

		rewrite_style(&mut style_a, &mapping_a, &localhost());
		rewrite_style(&mut style_b, &mapping_b, &localhost());

		assert_eq!(style_a, style_b);
	}

	#[test]
	fn test_unmapped_source_warns_and_is_untouched() {
		let mut style = json!({"sources": {"s1": {"tiles": ["https://a/tiles"]}}});
		let before = style.clone();

		let report = rewrite_style(&mut style, &HashMap::new(), &localhost());

		assert_eq!(style, before);
		assert!(report.rewritten_sources.is_empty());
		assert_eq!(report.warnings.len(), 1);
		assert!(report.warnings[0].contains("s1"));
	}

	#[test]
	fn test_empty_basename_counts_as_unmapped() {
		let mut style = json!({"sources": {"s1": {"tiles": ["https://a/tiles"]}}});
		let before = style.clone();
		let mapping = HashMap::from([("s1".to_string(), String::new())]);

		let report = rewrite_style(&mut style, &mapping, &localhost());

		assert_eq!(style, before);
		assert_eq!(report.warnings.len(), 1);
	}

	#[test]
	fn test_local_only_source_ignored() {
		let mut style = json!({"sources": {"s1": {"tiles": ["/tiles/{z}/{x}/{y}.pbf"]}}});
		let before = style.clone();
		let mapping = HashMap::from([("s1".to_string(), "india-latest".to_string())]);

		let report = rewrite_style(&mut style, &mapping, &localhost());

		assert_eq!(style, before);
		assert!(report.rewritten_sources.is_empty());
		assert!(report.warnings.is_empty());
	}

	#[test]
	fn test_source_without_tiles_ignored() {
		let mut style = json!({"sources": {"hills": {"type": "raster-dem", "url": "https://a/dem"}}});
		let before = style.clone();

		let report = rewrite_style(&mut style, &HashMap::new(), &localhost());

		assert_eq!(style, before);
		assert!(report.warnings.is_empty());
	}

	#[test]
	fn test_explicit_scheme_preserved() {
		let mut style = json!({
			"sources": {"s1": {"tiles": ["https://a/tiles"], "scheme": "tms"}}
		});
		let mapping = HashMap::from([("s1".to_string(), "india-latest".to_string())]);

		rewrite_style(&mut style, &mapping, &localhost());

		assert_eq!(style["sources"]["s1"]["scheme"], json!("tms"));
	}

	#[test]
	fn test_glyphs_overwritten() {
		let mut style = json!({"glyphs": "https://a/fonts/{fontstack}/{range}.pbf"});

		let report = rewrite_style(&mut style, &HashMap::new(), &localhost());

		assert_eq!(
			style["glyphs"],
			json!("http://localhost:8080/fonts/{fontstack}/{range}.pbf")
		);
		assert_eq!(report.changes.len(), 1);
		assert_eq!(report.changes[0].field, "glyphs");
		assert_eq!(report.changes[0].before, "https://a/fonts/{fontstack}/{range}.pbf");
	}

	#[test]
	fn test_missing_glyphs_left_absent() {
		let mut style = json!({"sources": {}});

		let report = rewrite_style(&mut style, &HashMap::new(), &localhost());

		assert!(style.get("glyphs").is_none());
		assert!(report.changes.is_empty());
	}

	#[test]
	fn test_sprite_string_overwritten() {
		let mut style = json!({"sprite": "https://a/sprites/basics"});

		let report = rewrite_style(&mut style, &HashMap::new(), &localhost());

		assert_eq!(
			style["sprite"],
			json!("http://localhost:8080/local1-versatiles/basics/sprites@2x")
		);
		assert_eq!(report.changes.len(), 1);
		assert_eq!(report.changes[0].field, "sprite");
	}

	#[test]
	fn test_sprite_array_urls_overwritten() {
		let mut style = json!({
			"sprite": [
				{"id": "default", "url": "https://a/sprites/basics"},
				{"id": "extra", "url": "https://a/sprites/extra"}
			]
		});

		let report = rewrite_style(&mut style, &HashMap::new(), &localhost());

		let expected = "http://localhost:8080/local1-versatiles/basics/sprites@2x";
		assert_eq!(style["sprite"][0]["url"], json!(expected));
		assert_eq!(style["sprite"][1]["url"], json!(expected));
		// Ids are untouched.
		assert_eq!(style["sprite"][0]["id"], json!("default"));
		assert_eq!(style["sprite"][1]["id"], json!("extra"));
		assert_eq!(report.changes.len(), 2);
		assert_eq!(report.changes[1].field, "sprite[1].url");
	}

	#[test]
	fn test_document_without_sources_is_noop() {
		let mut style = json!({"version": 8});
		let before = style.clone();

		let report = rewrite_style(&mut style, &HashMap::new(), &localhost());

		assert_eq!(style, before);
		assert!(report.rewritten_sources.is_empty());
		assert!(report.warnings.is_empty());
		assert!(report.changes.is_empty());
	}
}
