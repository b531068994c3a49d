//! Scan links for printing tags in bulk.
//!
//! Each tag ID is a prefix followed by a number zero-padded to three digits, and its link is the
//! scan page URL with the ID under the `id` query key.

use crate::contact::encode_uri_component;

const LOCAL_HOST_MARKERS: [&str; 3] = ["localhost", "127.0.0.1", "webcontainer"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanLink {
	pub tag_id: String,
	pub url: String,
}

/// Trims the base, drops one trailing `/`, and assumes `https://` when no scheme is given.
/// A blank base yields `None`.
pub fn clean_base_url(raw: &str) -> Option<String> {
	let trimmed = raw.trim();
	let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);

	if trimmed.is_empty() {
		return None;
	}

	let lower = trimmed.to_ascii_lowercase();

	if lower.starts_with("http://") || lower.starts_with("https://") {
		Some(trimmed.to_string())
	} else {
		Some(format!("https://{trimmed}"))
	}
}

/// Whether links on this base only resolve on the machine that printed them.
pub fn is_local_base(raw: &str) -> bool {
	let lower = raw.trim().to_ascii_lowercase();
	let lower = lower.strip_suffix('/').unwrap_or(&lower);

	LOCAL_HOST_MARKERS.iter().any(|marker| lower.contains(marker)) || lower.ends_with(".local")
}

pub fn tag_id(prefix: &str, number: u32) -> String {
	format!("{prefix}{number:03}")
}

/// Appends `id=<tag_id>` to an already cleaned base, after `&` when the base has a query.
pub fn scan_link(clean_base: &str, tag_id: &str) -> String {
	let separator = if clean_base.contains('?') { '&' } else { '?' };

	format!("{clean_base}{separator}id={}", encode_uri_component(tag_id))
}

/// `count` consecutive links starting at `start`. Empty for a blank base; numbering stops at
/// `u32::MAX`.
pub fn scan_links(base: &str, prefix: &str, start: u32, count: u32) -> Vec<ScanLink> {
	let Some(base) = clean_base_url(base) else {
		return Vec::new();
	};

	(0..count)
		.map_while(|offset| start.checked_add(offset))
		.map(|number| {
			let tag_id = tag_id(prefix, number);
			let url = scan_link(&base, &tag_id);

			ScanLink { tag_id, url }
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn numbers_are_padded_to_three_digits() {
		assert_eq!(tag_id("ITEM_", 1), "ITEM_001");
		assert_eq!(tag_id("ITEM_", 42), "ITEM_042");
		assert_eq!(tag_id("ITEM_", 999), "ITEM_999");
		assert_eq!(tag_id("", 1234), "1234");
	}

	#[test]
	fn base_urls_are_cleaned() {
		assert_eq!(
			clean_base_url("  https://tags.example/scan/ ").as_deref(),
			Some("https://tags.example/scan")
		);
		assert_eq!(clean_base_url("tags.example").as_deref(), Some("https://tags.example"));
		assert_eq!(clean_base_url("HTTP://tags.example").as_deref(), Some("HTTP://tags.example"));
		assert_eq!(clean_base_url("   "), None);
		assert_eq!(clean_base_url("/"), None);
	}

	#[test]
	fn separator_follows_existing_query() {
		assert_eq!(scan_link("https://tags.example", "A1"), "https://tags.example?id=A1");
		assert_eq!(
			scan_link("https://tags.example/?ref=print", "A1"),
			"https://tags.example/?ref=print&id=A1"
		);
	}

	#[test]
	fn ids_are_escaped_in_links() {
		assert_eq!(
			scan_link("https://tags.example", "shelf 7/B"),
			"https://tags.example?id=shelf%207%2FB"
		);
	}

	#[test]
	fn batch_covers_the_requested_range() {
		let links = scan_links("tags.example/", "ITEM_", 9, 3);

		assert_eq!(
			links.iter().map(|link| link.url.as_str()).collect::<Vec<_>>(),
			[
				"https://tags.example?id=ITEM_009",
				"https://tags.example?id=ITEM_010",
				"https://tags.example?id=ITEM_011",
			]
		);
		assert_eq!(links[0].tag_id, "ITEM_009");
		assert!(scan_links("", "ITEM_", 1, 6).is_empty());
		assert_eq!(scan_links("tags.example", "T", u32::MAX, 3).len(), 1);
	}

	#[test]
	fn local_hosts_are_flagged() {
		assert!(is_local_base("http://localhost:5173/"));
		assert!(is_local_base("http://127.0.0.1:8080"));
		assert!(is_local_base("https://abc.webcontainer.io"));
		assert!(is_local_base("http://printer.local/"));
		assert!(!is_local_base("https://tags.example"));
	}
}
