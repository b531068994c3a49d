use std::{
	sync::{Arc, Mutex, MutexGuard, PoisonError},
	time::Duration,
};

use tokio::sync::watch;

use crate::{
	Error, Operation, Result,
	api::RecordApi,
	controller::{Controller, Event, Ticket, View},
};
use scanback_domain::{ContactReference, wire::ActivatePayload};

/// Drives one scan: owns the controller, issues the network calls it asks for, and publishes
/// every view change on a watch channel.
///
/// The controller lock is never held across an await, so a teardown from another task takes
/// effect while a request is still in flight.
pub struct Session {
	api: Arc<dyn RecordApi>,
	controller: Mutex<Controller>,
	views: watch::Sender<View>,
	success_delay: Duration,
	messaging_base: String,
}
impl Session {
	pub fn new(api: Arc<dyn RecordApi>, tag_id: Option<&str>, cfg: &scanback_config::Client) -> Self {
		Self::with_settings(
			api,
			tag_id,
			Duration::from_millis(cfg.success_delay_ms),
			cfg.messaging_base.clone(),
		)
	}

	pub fn with_settings(
		api: Arc<dyn RecordApi>,
		tag_id: Option<&str>,
		success_delay: Duration,
		messaging_base: impl Into<String>,
	) -> Self {
		let controller = Controller::open(tag_id);
		let (views, _) = watch::channel(controller.view().clone());

		Self {
			api,
			controller: Mutex::new(controller),
			views,
			success_delay,
			messaging_base: messaging_base.into(),
		}
	}

	pub fn tag_id(&self) -> Option<String> {
		self.controller().tag_id().map(str::to_string)
	}

	pub fn view(&self) -> View {
		self.controller().view().clone()
	}

	pub fn subscribe(&self) -> watch::Receiver<View> {
		self.views.subscribe()
	}

	/// Resolves the tag when the session opened in `Loading`. A landing session makes no call.
	pub async fn start(&self) -> View {
		let pending = {
			let controller = self.controller();

			match (controller.view(), controller.tag_id()) {
				(View::Loading, Some(tag_id)) => Some((tag_id.to_string(), controller.ticket())),
				_ => None,
			}
		};

		match pending {
			Some((tag_id, ticket)) => self.run_resolve(tag_id, ticket).await,
			None => self.view(),
		}
	}

	/// Re-runs resolve with the same tag ID from an error view.
	pub async fn retry(&self) -> View {
		let pending = {
			let mut controller = self.controller();

			if !controller.apply(Event::RetryRequested) {
				return controller.view().clone();
			}

			self.publish(&controller);

			controller.tag_id().map(|tag_id| (tag_id.to_string(), controller.ticket()))
		};

		match pending {
			Some((tag_id, ticket)) => self.run_resolve(tag_id, ticket).await,
			None => self.view(),
		}
	}

	/// Activates the tag for `item` and `contact`.
	///
	/// Local refusals (no tag ID, empty fields, a form that is not accepting input) return `Err`
	/// without touching the view. Remote failures come back as an `Unclaimed` view carrying a
	/// notice. On success the view passes through `Success` and settles on `Claimed` after the
	/// configured delay.
	pub async fn submit(&self, item: &str, contact: &str) -> Result<View> {
		let (payload, ticket) = {
			let mut controller = self.controller();
			let tag_id = controller.tag_id().ok_or(Error::MissingTagId)?.to_string();

			if !matches!(controller.view(), View::Unclaimed { submitting: false, .. }) {
				return Err(Error::NotSubmittable);
			}

			let payload = ActivatePayload {
				id: tag_id,
				item: item.to_string(),
				phone: contact.to_string(),
			};

			if let Some(field) = payload.blank_field() {
				return Err(Error::EmptyField { field });
			}

			controller.apply(Event::ActivateRequested);
			self.publish(&controller);

			(payload, controller.ticket())
		};

		match self.api.activate(&payload).await {
			Ok(()) => {
				let contact_reference =
					ContactReference::derive(&self.messaging_base, &payload.item, &payload.phone);

				tracing::info!(tag_id = %payload.id, "Tag activated.");

				let view = self.apply_if_current(ticket, Event::ActivateSucceeded { contact_reference });

				if !matches!(view, View::Success { .. }) {
					return Ok(view);
				}

				tokio::time::sleep(self.success_delay).await;

				Ok(self.apply_if_current(ticket, Event::SuccessDelayElapsed))
			},
			Err(err) => {
				tracing::warn!(tag_id = %payload.id, error = %err, "Activation failed.");

				let message = err.user_message(Operation::Activate);

				Ok(self.apply_if_current(ticket, Event::ActivateFailed { message }))
			},
		}
	}

	/// Ends the session. Results of requests still in flight are dropped.
	pub fn teardown(&self) {
		self.controller().teardown();
	}

	async fn run_resolve(&self, tag_id: String, ticket: Ticket) -> View {
		let event = match self.api.resolve(&tag_id).await {
			Ok(resolution) => Event::ResolveSucceeded(resolution),
			Err(err) => {
				tracing::warn!(%tag_id, error = %err, "Resolve failed.");

				Event::ResolveFailed { kind: err.kind(), message: err.user_message(Operation::Resolve) }
			},
		};

		self.apply_if_current(ticket, event)
	}

	fn apply_if_current(&self, ticket: Ticket, event: Event) -> View {
		let mut controller = self.controller();

		if controller.apply_if_current(ticket, event) {
			self.publish(&controller);
		} else if controller.is_closed() {
			tracing::debug!("Dropped a result that arrived after teardown.");
		}

		controller.view().clone()
	}

	fn publish(&self, controller: &Controller) {
		self.views.send_replace(controller.view().clone());
	}

	fn controller(&self) -> MutexGuard<'_, Controller> {
		self.controller.lock().unwrap_or_else(PoisonError::into_inner)
	}
}
