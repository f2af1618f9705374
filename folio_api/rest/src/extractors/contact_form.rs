use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Response},
    Form, Json,
};
use folio_models::contact::{ContactForm, FieldErrors, SubmissionOutcome, SubmissionResponse};
use tracing::debug;

/// A contact form submitted either as JSON or as an urlencoded HTML form.
#[derive(Debug)]
pub struct ApiContactForm(pub ContactForm);

#[async_trait]
impl<S: Send + Sync> FromRequest<S> for ApiContactForm {
    type Rejection = Response;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let urlencoded = request
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"));

        let result = if urlencoded {
            Form::<ContactForm>::from_request(request, state)
                .await
                .map(|Form(form)| form)
                .map_err(|rejection| rejection.body_text())
        } else {
            Json::<ContactForm>::from_request(request, state)
                .await
                .map(|Json(form)| form)
                .map_err(|rejection| rejection.body_text())
        };

        result.map(Self).map_err(|detail| {
            debug!(%detail, "Rejected malformed contact form");
            let outcome = SubmissionOutcome::Rejected {
                errors: FieldErrors::general(detail),
            };
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(SubmissionResponse::from(outcome)),
            )
                .into_response()
        })
    }
}
