use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use folio_core_contact_contracts::ContactFeatureService;
use folio_models::contact::{SubmissionOutcome, SubmissionResponse};

use crate::extractors::contact_form::ApiContactForm;

pub fn router(service: Arc<impl ContactFeatureService>) -> Router<()> {
    Router::new()
        .route("/contact", routing::post(submit))
        .with_state(service)
}

async fn submit(
    service: State<Arc<impl ContactFeatureService>>,
    ApiContactForm(form): ApiContactForm,
) -> Response {
    let outcome = service.submit(form).await;

    let status = match outcome {
        SubmissionOutcome::Success { .. } => StatusCode::OK,
        SubmissionOutcome::Rejected { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        SubmissionOutcome::Failed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (status, Json(SubmissionResponse::from(outcome))).into_response()
}
