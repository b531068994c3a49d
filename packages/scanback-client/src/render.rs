//! Plain-text panels for each [`View`], framed by the tag header and an ID footer.

use std::fmt::Write as _;

use crate::controller::{ErrorKind, View};

const HEADER: &str = "SCAN TO RETURN";
const RULE_WIDTH: usize = 48;

pub fn render(view: &View, tag_id: Option<&str>) -> String {
	let mut out = String::new();
	let rule = "=".repeat(RULE_WIDTH);

	let _ = writeln!(out, "{rule}\n{HEADER:^RULE_WIDTH$}\n{rule}");

	body(&mut out, view);

	if let Some(tag_id) = tag_id {
		let _ = writeln!(out, "{}\nID: {tag_id}", "-".repeat(RULE_WIDTH));
	}

	out
}

fn body(out: &mut String, view: &View) {
	match view {
		View::Landing => {
			out.push_str("Lost & Found, Reimagined.\n\n");
			out.push_str(
				"Create free, privacy-focused QR code labels for your valuables. When lost, finders \
				 can contact you via WhatsApp without seeing your phone number.\n\n",
			);
			out.push_str(
				"1. Generate Codes: create and print QR codes for your keys, wallet, or laptop.\n",
			);
			out.push_str(
				"2. Activate Tag: scan the code yourself first. Enter your item name and WhatsApp \
				 number to link them.\n",
			);
			out.push_str(
				"3. Get Notified: if lost, the finder scans the code and gets a direct WhatsApp \
				 link to chat with you.\n",
			);
		},
		View::Loading => out.push_str("Scanning Database...\n"),
		View::Unclaimed { submitting, notice } => {
			out.push_str("Activate New Tag\n\n");
			out.push_str("Item name (e.g., MacBook Pro, Blue Wallet)\n");
			out.push_str("WhatsApp number: digits only, include country code (e.g., 1 for USA).\n");

			if let Some(notice) = notice {
				let _ = writeln!(out, "\n! {notice}");
			}
			if *submitting {
				out.push_str("\nActivating...\n");
			}
		},
		View::Success { .. } => {
			out.push_str("Activation Successful!\nYour tag is now active.\n\n");
			out.push_str("Switching to Finder View...\n");
		},
		View::Claimed { contact_reference } => {
			out.push_str("Owner Found!\n");
			out.push_str("This item is registered. Please contact the owner to arrange a return.\n\n");
			let _ = writeln!(out, "Chat on WhatsApp: {contact_reference}");
		},
		View::Error { kind, message } => {
			let _ = writeln!(out, "Connection Error\n{message}\n");

			if *kind != ErrorKind::Rejected {
				out.push_str("Troubleshooting:\n");
				out.push_str("1. Check your Internet connection.\n");
				out.push_str("2. Ensure the record service allows anonymous access.\n");
			}

			out.push_str("\nRetry\n");
		},
	}
}

#[cfg(test)]
mod tests {
	use scanback_domain::ContactReference;

	use super::*;

	#[test]
	fn every_panel_carries_the_header() {
		let views = [
			View::Landing,
			View::Loading,
			View::unclaimed(),
			View::Claimed { contact_reference: ContactReference::from_link("https://wa.me/1") },
		];

		for view in views {
			assert!(render(&view, None).contains(HEADER));
		}
	}

	#[test]
	fn footer_shows_the_tag_id() {
		let text = render(&View::Loading, Some("DEMO_TEST"));

		assert!(text.trim_end().ends_with("ID: DEMO_TEST"));
		assert!(!render(&View::Landing, None).contains("ID:"));
	}

	#[test]
	fn claimed_panel_shows_the_link() {
		let link = "https://wa.me/15550123456?text=Hi";
		let text = render(
			&View::Claimed { contact_reference: ContactReference::from_link(link) },
			Some("DEMO_TEST"),
		);

		assert!(text.contains("Owner Found!"));
		assert!(text.contains(link));
	}

	#[test]
	fn unclaimed_panel_shows_the_last_failure() {
		let text = render(
			&View::Unclaimed { submitting: false, notice: Some("Failed to activate tag.".to_string()) },
			Some("DEMO_TEST"),
		);

		assert!(text.contains("Activate New Tag"));
		assert!(text.contains("! Failed to activate tag."));
	}

	#[test]
	fn landing_explains_the_three_steps() {
		let text = render(&View::Landing, None);

		assert!(text.contains("Lost & Found, Reimagined."));
		assert!(text.contains("Generate Codes"));
		assert!(text.contains("Activate Tag"));
		assert!(text.contains("Get Notified"));
	}
}
