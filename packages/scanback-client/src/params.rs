use reqwest::Url;

const ID_KEY: &str = "id";

/// Tag ID carried by a scanned link under the `id` query key.
///
/// Accepts a full URL or a bare query string (`?id=...`). An absent or empty ID yields `None`,
/// which opens the landing view.
pub fn tag_id_from_link(link: &str) -> Option<String> {
	let link = link.trim();
	let url = match Url::parse(link) {
		Ok(url) => url,
		Err(_) => {
			let query = link.strip_prefix('?').unwrap_or(link);

			Url::parse(&format!("http://scan.invalid/?{query}")).ok()?
		},
	};

	url.query_pairs()
		.find(|(key, _)| key == ID_KEY)
		.map(|(_, value)| value.into_owned())
		.filter(|id| !id.is_empty())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn reads_id_from_full_urls() {
		assert_eq!(
			tag_id_from_link("https://tags.example/scan?id=DEMO_TEST"),
			Some("DEMO_TEST".to_string())
		);
		assert_eq!(
			tag_id_from_link("https://tags.example/?ref=qr&id=shelf%207%2FB"),
			Some("shelf 7/B".to_string())
		);
	}

	#[test]
	fn reads_id_from_bare_queries() {
		assert_eq!(tag_id_from_link("?id=DEMO_TEST"), Some("DEMO_TEST".to_string()));
		assert_eq!(tag_id_from_link("id=DEMO_TEST"), Some("DEMO_TEST".to_string()));
	}

	#[test]
	fn missing_or_empty_id_is_none() {
		assert_eq!(tag_id_from_link("https://tags.example/"), None);
		assert_eq!(tag_id_from_link("https://tags.example/?id="), None);
		assert_eq!(tag_id_from_link(""), None);
	}
}
