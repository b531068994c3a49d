use std::{future::Future, pin::Pin, time::Duration};

use reqwest::{Client, Url, header::CONTENT_TYPE};

use crate::{Error, Result};
use scanback_domain::{
	ContactReference, Resolution,
	wire::{ActivatePayload, RESULT_FOUND, RESULT_NEW, RESULT_SUCCESS, Reply},
};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

const PREVIEW_CHARS: usize = 120;

/// The two calls the controller makes against the record service.
pub trait RecordApi
where
	Self: Send + Sync,
{
	fn resolve<'a>(&'a self, tag_id: &'a str) -> BoxFuture<'a, Result<Resolution>>;

	fn activate<'a>(&'a self, payload: &'a ActivatePayload) -> BoxFuture<'a, Result<()>>;
}

/// [`RecordApi`] over HTTP. Every request carries the configured timeout.
///
/// Status codes are not consulted: the record service answers application errors with 200 and a
/// JSON body, so the body alone decides the outcome.
#[derive(Clone, Debug)]
pub struct HttpRecordApi {
	client: Client,
	url: Url,
}
impl HttpRecordApi {
	pub fn new(cfg: &scanback_config::Client) -> Result<Self> {
		scanback_config::validate_client(cfg)?;

		let url = Url::parse(cfg.record_service_url.trim()).map_err(|err| {
			scanback_config::Error::Validation {
				message: format!("client.record_service_url is not a valid URL: {err}."),
			}
		})?;
		let client = Client::builder()
			.timeout(Duration::from_millis(cfg.timeout_ms))
			.build()
			.map_err(Error::Http)?;

		Ok(Self { client, url })
	}

	pub fn url(&self) -> &Url {
		&self.url
	}

	async fn fetch_reply(&self, request: reqwest::RequestBuilder) -> Result<Reply> {
		let res = request.send().await.map_err(Error::from_send)?;
		let status = res.status();
		let body = res.text().await.map_err(Error::from_send)?;

		tracing::debug!(%status, bytes = body.len(), "Record service replied.");

		parse_reply(&body)
	}
}
impl RecordApi for HttpRecordApi {
	fn resolve<'a>(&'a self, tag_id: &'a str) -> BoxFuture<'a, Result<Resolution>> {
		Box::pin(async move {
			let request = self.client.get(self.url.clone()).query(&[("id", tag_id)]);
			let reply = self.fetch_reply(request).await?;

			interpret_resolve(reply)
		})
	}

	fn activate<'a>(&'a self, payload: &'a ActivatePayload) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move {
			// text/plain keeps browser callers out of CORS preflight; the service ignores the type.
			let body = serde_json::to_string(payload)?;
			let request = self
				.client
				.post(self.url.clone())
				.header(CONTENT_TYPE, "text/plain;charset=utf-8")
				.body(body);
			let reply = self.fetch_reply(request).await?;

			interpret_activate(reply)
		})
	}
}

fn parse_reply(body: &str) -> Result<Reply> {
	serde_json::from_str(body)
		.map_err(|_| Error::Malformed { preview: body.chars().take(PREVIEW_CHARS).collect() })
}

fn interpret_resolve(reply: Reply) -> Result<Resolution> {
	match reply.result() {
		Some(RESULT_NEW) => Ok(Resolution::New),
		Some(RESULT_FOUND) => match reply.wa_link.as_deref().filter(|link| !link.is_empty()) {
			Some(link) =>
				Ok(Resolution::Found { contact_reference: ContactReference::from_link(link) }),
			None => Err(Error::Rejected { message: reply.message().map(str::to_string) }),
		},
		_ => Err(Error::Rejected { message: reply.message().map(str::to_string) }),
	}
}

fn interpret_activate(reply: Reply) -> Result<()> {
	match reply.result() {
		Some(RESULT_SUCCESS) => Ok(()),
		_ => Err(Error::Rejected { message: reply.message().map(str::to_string) }),
	}
}
