//! Finite-state machine behind the scanning page.
//!
//! [`transition`] is pure: it maps a view and an event to the next view and never performs I/O.
//! [`Controller`] wraps it with the tag ID and a generation counter so that results of requests
//! started before a teardown are dropped instead of applied.

use scanback_domain::{ContactReference, Resolution};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
	Timeout,
	Transport,
	Malformed,
	Rejected,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum View {
	/// No tag ID on the entry link.
	Landing,
	Loading,
	/// Activation form. `notice` holds the last activation failure.
	Unclaimed {
		submitting: bool,
		notice: Option<String>,
	},
	Success {
		contact_reference: ContactReference,
	},
	Claimed {
		contact_reference: ContactReference,
	},
	Error {
		kind: ErrorKind,
		message: String,
	},
}
impl View {
	pub fn unclaimed() -> Self {
		Self::Unclaimed { submitting: false, notice: None }
	}

	pub fn contact_reference(&self) -> Option<&ContactReference> {
		match self {
			Self::Success { contact_reference } | Self::Claimed { contact_reference } =>
				Some(contact_reference),
			_ => None,
		}
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
	ResolveSucceeded(Resolution),
	ResolveFailed { kind: ErrorKind, message: String },
	ActivateRequested,
	ActivateSucceeded { contact_reference: ContactReference },
	ActivateFailed { message: String },
	SuccessDelayElapsed,
	RetryRequested,
}

/// Next view for `event`. Pairs that make no sense leave the view unchanged.
pub fn transition(view: &View, event: Event) -> View {
	match (view, event) {
		(View::Loading, Event::ResolveSucceeded(Resolution::New)) => View::unclaimed(),
		(View::Loading, Event::ResolveSucceeded(Resolution::Found { contact_reference })) =>
			View::Claimed { contact_reference },
		(View::Loading, Event::ResolveFailed { kind, message }) => View::Error { kind, message },
		(View::Unclaimed { submitting: false, .. }, Event::ActivateRequested) =>
			View::Unclaimed { submitting: true, notice: None },
		(View::Unclaimed { submitting: true, .. }, Event::ActivateSucceeded { contact_reference }) =>
			View::Success { contact_reference },
		(View::Unclaimed { submitting: true, .. }, Event::ActivateFailed { message }) =>
			View::Unclaimed { submitting: false, notice: Some(message) },
		(View::Success { contact_reference }, Event::SuccessDelayElapsed) =>
			View::Claimed { contact_reference: contact_reference.clone() },
		(View::Error { .. }, Event::RetryRequested) => View::Loading,
		(view, _) => view.clone(),
	}
}

/// Identifies the controller generation a request was started in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug)]
pub struct Controller {
	tag_id: Option<String>,
	view: View,
	generation: u64,
	closed: bool,
}
impl Controller {
	/// Starts in `Loading` for a non-empty tag ID and in `Landing` otherwise.
	pub fn open(tag_id: Option<&str>) -> Self {
		let tag_id = tag_id.filter(|id| !id.is_empty()).map(str::to_string);
		let view = if tag_id.is_some() { View::Loading } else { View::Landing };

		Self { tag_id, view, generation: 0, closed: false }
	}

	pub fn tag_id(&self) -> Option<&str> {
		self.tag_id.as_deref()
	}

	pub fn view(&self) -> &View {
		&self.view
	}

	pub fn is_closed(&self) -> bool {
		self.closed
	}

	pub fn ticket(&self) -> Ticket {
		Ticket(self.generation)
	}

	/// Applies `event` and reports whether the view changed.
	pub fn apply(&mut self, event: Event) -> bool {
		if self.closed {
			return false;
		}

		let next = transition(&self.view, event);

		if next == self.view {
			return false;
		}

		self.view = next;

		true
	}

	/// Like [`Controller::apply`], but drops the event when `ticket` predates a teardown.
	pub fn apply_if_current(&mut self, ticket: Ticket, event: Event) -> bool {
		if ticket != self.ticket() {
			return false;
		}

		self.apply(event)
	}

	pub fn teardown(&mut self) {
		self.generation += 1;
		self.closed = true;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn reference() -> ContactReference {
		ContactReference::from_link("https://wa.me/1?text=hi")
	}

	#[test]
	fn entry_without_id_lands() {
		assert_eq!(Controller::open(None).view(), &View::Landing);
		assert_eq!(Controller::open(Some("")).view(), &View::Landing);
		assert_eq!(Controller::open(Some("DEMO_TEST")).view(), &View::Loading);
	}

	#[test]
	fn resolve_outcomes_leave_loading() {
		assert_eq!(transition(&View::Loading, Event::ResolveSucceeded(Resolution::New)), View::unclaimed());
		assert_eq!(
			transition(
				&View::Loading,
				Event::ResolveSucceeded(Resolution::Found { contact_reference: reference() })
			),
			View::Claimed { contact_reference: reference() }
		);
		assert_eq!(
			transition(
				&View::Loading,
				Event::ResolveFailed { kind: ErrorKind::Timeout, message: "slow".to_string() }
			),
			View::Error { kind: ErrorKind::Timeout, message: "slow".to_string() }
		);
	}

	#[test]
	fn activation_runs_through_success_to_claimed() {
		let submitting = transition(&View::unclaimed(), Event::ActivateRequested);

		assert_eq!(submitting, View::Unclaimed { submitting: true, notice: None });

		let success =
			transition(&submitting, Event::ActivateSucceeded { contact_reference: reference() });

		assert_eq!(success, View::Success { contact_reference: reference() });
		assert_eq!(
			transition(&success, Event::SuccessDelayElapsed),
			View::Claimed { contact_reference: reference() }
		);
	}

	#[test]
	fn failed_activation_reenables_the_form() {
		let submitting = View::Unclaimed { submitting: true, notice: None };
		let failed =
			transition(&submitting, Event::ActivateFailed { message: "Failed to activate tag.".to_string() });

		assert_eq!(
			failed,
			View::Unclaimed { submitting: false, notice: Some("Failed to activate tag.".to_string()) }
		);
		assert_eq!(
			transition(&failed, Event::ActivateRequested),
			View::Unclaimed { submitting: true, notice: None }
		);
	}

	#[test]
	fn nonsensical_events_are_ignored() {
		let submitting = View::Unclaimed { submitting: true, notice: None };

		assert_eq!(transition(&submitting, Event::ActivateRequested), submitting);
		assert_eq!(transition(&View::Landing, Event::ResolveSucceeded(Resolution::New)), View::Landing);
		assert_eq!(transition(&View::Loading, Event::RetryRequested), View::Loading);
		assert_eq!(
			transition(&View::Claimed { contact_reference: reference() }, Event::ActivateRequested),
			View::Claimed { contact_reference: reference() }
		);
		assert_eq!(
			transition(
				&View::unclaimed(),
				Event::ActivateSucceeded { contact_reference: reference() }
			),
			View::unclaimed()
		);
	}

	#[test]
	fn retry_returns_to_loading() {
		let error = View::Error { kind: ErrorKind::Transport, message: "down".to_string() };

		assert_eq!(transition(&error, Event::RetryRequested), View::Loading);
	}

	#[test]
	fn events_after_teardown_are_discarded() {
		let mut controller = Controller::open(Some("DEMO_TEST"));
		let ticket = controller.ticket();

		controller.teardown();

		assert!(!controller.apply_if_current(ticket, Event::ResolveSucceeded(Resolution::New)));
		assert!(!controller.apply(Event::ResolveSucceeded(Resolution::New)));
		assert_eq!(controller.view(), &View::Loading);
		assert!(controller.is_closed());
	}
}
