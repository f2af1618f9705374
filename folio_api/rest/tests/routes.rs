use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use folio_api_rest::{RestServer, RestServerConfig, REQUEST_ID_HEADER};
use folio_core_contact_contracts::MockContactFeatureService;
use folio_core_health_contracts::{HealthStatus, MockHealthFeatureService};
use folio_models::contact::{
    ContactField, ContactForm, ContactMessageId, FieldErrors, SubmissionOutcome,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

fn router(
    health: MockHealthFeatureService,
    contact: MockContactFeatureService,
    config: RestServerConfig,
) -> Router {
    RestServer::new(health, contact, config).router()
}

fn form() -> ContactForm {
    ContactForm {
        name: Some("Al".into()),
        email: Some("a@b.com".into()),
        subject: Some("Hi there".into()),
        message: Some("This is a test message.".into()),
    }
}

fn post_json(body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/contact")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn submit_ok() {
    // Arrange
    let contact = MockContactFeatureService::new().with_submit(
        form(),
        SubmissionOutcome::Success {
            contact_id: ContactMessageId::from(7),
        },
    );
    let sut = router(
        MockHealthFeatureService::new(),
        contact,
        Default::default(),
    );

    // Act
    let response = sut
        .oneshot(post_json(json!({
            "name": "Al",
            "email": "a@b.com",
            "subject": "Hi there",
            "message": "This is a test message.",
            "website": "ignored",
        })))
        .await
        .unwrap();

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key(REQUEST_ID_HEADER));
    assert_eq!(
        json_body(response).await,
        json!({
            "success": true,
            "message": "Message sent successfully!",
            "contactId": 7,
        })
    );
}

#[tokio::test]
async fn submit_urlencoded() {
    // Arrange
    let contact = MockContactFeatureService::new().with_submit(
        form(),
        SubmissionOutcome::Success {
            contact_id: ContactMessageId::from(1),
        },
    );
    let sut = router(
        MockHealthFeatureService::new(),
        contact,
        Default::default(),
    );

    // Act
    let response = sut
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/contact")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(
                    "name=Al&email=a%40b.com&subject=Hi+there&message=This+is+a+test+message.",
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn submit_rejected() {
    // Arrange
    let mut submitted = form();
    submitted.name = Some("A".into());

    let contact = MockContactFeatureService::new().with_submit(
        submitted,
        SubmissionOutcome::Rejected {
            errors: [(
                ContactField::Name,
                "Name must be at least 2 characters".to_owned(),
            )]
            .into_iter()
            .collect(),
        },
    );
    let sut = router(
        MockHealthFeatureService::new(),
        contact,
        Default::default(),
    );

    // Act
    let response = sut
        .oneshot(post_json(json!({
            "name": "A",
            "email": "a@b.com",
            "subject": "Hi there",
            "message": "This is a test message.",
        })))
        .await
        .unwrap();

    // Assert
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        json_body(response).await,
        json!({
            "success": false,
            "message": "Invalid form data. Please check the details.",
            "errors": {"name": ["Name must be at least 2 characters"]},
        })
    );
}

#[tokio::test]
async fn submit_failed() {
    // Arrange
    let contact = MockContactFeatureService::new().with_submit(
        form(),
        SubmissionOutcome::Failed {
            errors: FieldErrors::general("Failed to send message. Please try again later."),
        },
    );
    let sut = router(
        MockHealthFeatureService::new(),
        contact,
        Default::default(),
    );

    // Act
    let response = sut
        .oneshot(post_json(serde_json::to_value(form()).unwrap()))
        .await
        .unwrap();

    // Assert
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json_body(response).await,
        json!({
            "success": false,
            "message": "Failed to send message. Please try again later.",
            "errors": {"_": ["Failed to send message. Please try again later."]},
        })
    );
}

#[tokio::test]
async fn submit_malformed_body() {
    // Arrange
    let sut = router(
        MockHealthFeatureService::new(),
        MockContactFeatureService::new(),
        Default::default(),
    );

    // Act
    let response = sut
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/contact")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{\"name\": "))
                .unwrap(),
        )
        .await
        .unwrap();

    // Assert
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert_eq!(body["success"], json!(false));
    assert_eq!(
        body["message"],
        json!("Invalid form data. Please check the details.")
    );
    assert_eq!(body["errors"]["_"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn health_ok() {
    // Arrange
    let health = MockHealthFeatureService::new().with_get_status(HealthStatus { database: true });
    let sut = router(health, MockContactFeatureService::new(), Default::default());

    // Act
    let response = sut
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({"http": true, "database": true})
    );
}

#[tokio::test]
async fn health_database_down() {
    // Arrange
    let health = MockHealthFeatureService::new().with_get_status(HealthStatus { database: false });
    let sut = router(health, MockContactFeatureService::new(), Default::default());

    // Act
    let response = sut
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    // Assert
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json_body(response).await,
        json!({"http": true, "database": false})
    );
}

#[tokio::test]
async fn cors_preflight() {
    // Arrange
    let config = RestServerConfig::new(&["http://localhost:3000".into()]).unwrap();
    let sut = router(
        MockHealthFeatureService::new(),
        MockContactFeatureService::new(),
        config,
    );

    // Act
    let response = sut
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/contact")
                .header(header::ORIGIN, "http://localhost:3000")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // Assert
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:3000"
    );
}

#[test]
fn invalid_allowed_origin() {
    RestServerConfig::new(&["http://localhost\n".into()]).unwrap_err();
}
