use axum::{
	Json, Router,
	body::Bytes,
	extract::{Query, State},
	http::{Method, StatusCode, header::CONTENT_TYPE},
	response::{IntoResponse, Response},
	routing::get,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};

use crate::state::AppState;
use scanback_config::Security;
use scanback_domain::{
	Resolution,
	wire::{ActivatePayload, ActivateReply, RESULT_ERROR, ResolveReply},
};
use scanback_service::{Error as ServiceError, resolve::OWNER_FOUND_MESSAGE};

pub const TAGS_PATH: &str = "/v1/tags";

const INVALID_BODY_MESSAGE: &str =
	"Request body must be a JSON object with id, item, and phone.";

pub fn router(state: AppState, security: &Security) -> Router {
	let router = Router::new()
		.route("/health", get(health))
		.route(TAGS_PATH, get(resolve).post(activate))
		.with_state(state);

	if security.cors_allow_any_origin { router.layer(cors_layer()) } else { router }
}

// Browsers send activations as text/plain simple requests; GET and POST from any origin is all
// a static tag page needs.
fn cors_layer() -> CorsLayer {
	CorsLayer::new()
		.allow_origin(Any)
		.allow_methods([Method::GET, Method::POST])
		.allow_headers([CONTENT_TYPE])
}

async fn health() -> StatusCode {
	StatusCode::OK
}

#[derive(Debug, Deserialize)]
struct ResolveParams {
	id: Option<String>,
}

async fn resolve(
	State(state): State<AppState>,
	Query(params): Query<ResolveParams>,
) -> Result<Json<ResolveReply>, ApiError> {
	let tag_id = params.id.unwrap_or_default();
	let reply = match state.service.resolve(&tag_id).await? {
		Resolution::New => ResolveReply::New,
		Resolution::Found { contact_reference } => ResolveReply::Found {
			wa_link: contact_reference,
			message: Some(OWNER_FOUND_MESSAGE.to_string()),
		},
	};

	Ok(Json(reply))
}

// The body is read raw because clients post JSON labelled text/plain.
async fn activate(
	State(state): State<AppState>,
	body: Bytes,
) -> Result<Json<ActivateReply>, ApiError> {
	let payload: ActivatePayload = serde_json::from_slice(&body).map_err(|err| {
		tracing::debug!(error = %err, "Rejected unparsable activation body.");

		ApiError::new(StatusCode::OK, INVALID_BODY_MESSAGE)
	})?;

	state.service.activate(payload).await?;

	Ok(Json(ActivateReply::Success))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	result: &'static str,
	message: String,
}

/// Error reply in the contract's shape. Application errors keep status 200 like every other
/// reply; only conditions an operator should see in access logs change the status.
#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	message: String,
}
impl ApiError {
	fn new(status: StatusCode, message: impl Into<String>) -> Self {
		Self { status, message: message.into() }
	}
}
impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		match err {
			ServiceError::InvalidRequest { message } => Self::new(StatusCode::OK, message),
			ServiceError::Busy => Self::new(StatusCode::SERVICE_UNAVAILABLE, err.to_string()),
			ServiceError::Storage { .. } => {
				tracing::error!(error = %err, "Tag table access failed.");

				Self::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
			},
		}
	}
}
impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { result: RESULT_ERROR, message: self.message };

		(self.status, Json(body)).into_response()
	}
}
