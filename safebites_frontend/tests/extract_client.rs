use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use pretty_assertions::assert_eq;
use safebites_frontend::api::{ApiClient, UploadError};
use safebites_frontend::config::ClientConfig;
use safebites_frontend::image_ref::ImageRef;
use safebites_frontend::models::SafetyVerdict;
use safebites_frontend::navigation::{NavParams, ResultsScreen, RESULTS_PARAM};
use safebites_frontend::report::ResultsReport;
use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq)]
struct ReceivedField {
    name: String,
    file_name: Option<String>,
    content_type: Option<String>,
    bytes: Vec<u8>,
}

#[derive(Clone)]
struct FakeService {
    received: Arc<Mutex<Vec<ReceivedField>>>,
    reply: Arc<dyn Fn() -> Response + Send + Sync>,
}

async fn extract(State(service): State<FakeService>, mut multipart: Multipart) -> Response {
    while let Some(field) = multipart.next_field().await.expect("multipart field") {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.expect("field bytes").to_vec();
        service.received.lock().unwrap().push(ReceivedField {
            name,
            file_name,
            content_type,
            bytes,
        });
    }
    (service.reply)()
}

/// Serves `/extract` on an ephemeral port from a background runtime.
fn spawn_service(
    reply: impl Fn() -> Response + Send + Sync + 'static,
) -> (String, Arc<Mutex<Vec<ReceivedField>>>) {
    let received = Arc::new(Mutex::new(Vec::new()));
    let service = FakeService {
        received: received.clone(),
        reply: Arc::new(reply),
    };
    let app = Router::new()
        .route("/extract", post(extract))
        .with_state(service);

    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    listener.set_nonblocking(true).expect("nonblocking listener");
    let addr = listener.local_addr().unwrap();
    std::thread::spawn(move || {
        let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::from_std(listener).expect("tokio listener");
            axum::serve(listener, app).await.expect("serve");
        });
    });
    (format!("http://{addr}/extract"), received)
}

fn client(endpoint: &str) -> ApiClient {
    ApiClient::new(&ClientConfig::with_endpoint(endpoint).unwrap()).unwrap()
}

fn sample_body() -> Value {
    json!({
        "analysis": {"count": 2, "gmp_count": 1, "avg_level": 1.5, "max_level": 3},
        "detected_additives": [
            {"additive": "Sodium Benzoate", "detected_level": "2.1", "max_level": "3.0"}
        ],
        "can_consume": "unsafe"
    })
}

#[test]
fn file_upload_sends_single_image_field() {
    let (endpoint, received) = spawn_service(|| Json(sample_body()).into_response());
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Label.PNG");
    std::fs::write(&path, b"\x89PNG fake").unwrap();

    let body = client(&endpoint)
        .extract(&ImageRef::from(path))
        .expect("upload succeeds");
    assert_eq!(body, sample_body());

    let received = received.lock().unwrap();
    assert_eq!(
        *received,
        vec![ReceivedField {
            name: "image".into(),
            file_name: Some("Label.PNG".into()),
            content_type: Some("image/png".into()),
            bytes: b"\x89PNG fake".to_vec(),
        }]
    );
}

#[test]
fn data_uri_upload_uses_decoded_bytes() {
    let (endpoint, received) = spawn_service(|| Json(json!({"can_consume": "safe"})).into_response());
    let image = ImageRef::parse("data:image/webp;base64,aGVsbG8=").unwrap();

    client(&endpoint).extract(&image).expect("upload succeeds");

    let received = received.lock().unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].file_name.as_deref(), Some("photo.jpg"));
    assert_eq!(received[0].content_type.as_deref(), Some("image/webp"));
    assert_eq!(received[0].bytes, b"hello");
}

#[test]
fn success_body_is_handed_off_unchanged() {
    let body = json!({
        "analysis": {"count": 2, "gmp_count": 1, "avg_level": 1.5, "max_level": 3},
        "detected_additives": [
            {"additive": "Sodium Benzoate", "detected_level": "2.1", "max_level": "3.0"}
        ],
        "can_consume": "unsafe",
        "model_version": "2024-11"
    });
    let reply = body.clone();
    let (endpoint, _) = spawn_service(move || Json(reply.clone()).into_response());
    let image = ImageRef::parse("data:image/jpeg;base64,/9j/4AAQ").unwrap();

    let returned = client(&endpoint).extract(&image).unwrap();
    let params = NavParams::with_results(&returned);
    let forwarded: Value = serde_json::from_str(params.get(RESULTS_PARAM).unwrap()).unwrap();
    assert_eq!(forwarded, body);

    let screen = ResultsScreen::from_params(&params);
    let result = screen.result().expect("results load");
    assert_eq!(result.can_consume, SafetyVerdict::Unsafe);
    let report = ResultsReport::from_result(result);
    assert_eq!(report.cards.len(), 1);
    assert_eq!(report.cards[0].name, "Sodium Benzoate");
    assert_eq!(report.verdict.label, "unsafe");
}

#[test]
fn error_status_carries_body_text() {
    let (endpoint, _) = spawn_service(|| {
        (StatusCode::UNPROCESSABLE_ENTITY, "no text found on label").into_response()
    });
    let image = ImageRef::parse("data:image/png;base64,aGVsbG8=").unwrap();

    let err = client(&endpoint).extract(&image).unwrap_err();
    match &err {
        UploadError::Status { status, body } => {
            assert_eq!(*status, StatusCode::UNPROCESSABLE_ENTITY);
            assert_eq!(body, "no text found on label");
        }
        other => panic!("expected status error, got {other:?}"),
    }
    assert!(err.to_string().starts_with("upload failed"));
}

#[test]
fn non_json_success_is_malformed() {
    let (endpoint, _) = spawn_service(|| (StatusCode::OK, "<html>ok</html>").into_response());
    let image = ImageRef::parse("data:image/png;base64,aGVsbG8=").unwrap();

    let err = client(&endpoint).extract(&image).unwrap_err();
    assert!(matches!(err, UploadError::MalformedResponse(_)), "{err:?}");
}

#[test]
fn unreachable_service_is_transport_error() {
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let image = ImageRef::parse("data:image/png;base64,aGVsbG8=").unwrap();

    let err = client(&format!("http://127.0.0.1:{port}/extract"))
        .extract(&image)
        .unwrap_err();
    assert!(matches!(err, UploadError::Transport(_)), "{err:?}");
    assert!(err.to_string().starts_with("upload failed"));
}

#[test]
fn unreadable_file_never_hits_the_network() {
    let (endpoint, received) = spawn_service(|| Json(sample_body()).into_response());
    let dir = tempfile::tempdir().unwrap();

    let err = client(&endpoint)
        .extract(&ImageRef::from(dir.path().join("gone.jpg")))
        .unwrap_err();
    assert!(matches!(err, UploadError::Image(_)), "{err:?}");
    assert!(received.lock().unwrap().is_empty());
}
