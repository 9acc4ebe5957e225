use super::*;

use axum::body::{Body, to_bytes};
use axum::http::Request;
use tower::ServiceExt;

const TOKEN_BODY: &str = r#"{"access_token":"a.b.c","refresh_token":"r.s.t","token_type":"Bearer"}"#;

/// Stand-in access backend on an ephemeral port. Sign-in accepts only the
/// form-encoded `alice`/`pw` pair; registration always reports a duplicate.
async fn spawn_backend() -> String {
    let backend = Router::new()
        .route(
            AUTHORIZE_PATH,
            post(|headers: HeaderMap, body: String| async move {
                let form = headers
                    .get(header::CONTENT_TYPE)
                    .is_some_and(|ct| ct.as_bytes().starts_with(b"application/x-www-form-urlencoded"));
                if form && body == "login=alice&password=pw" {
                    ([(header::CONTENT_TYPE, "application/json")], TOKEN_BODY).into_response()
                } else {
                    (StatusCode::BAD_REQUEST, Json(serde_json::json!({ "detail": "User not found" }))).into_response()
                }
            }),
        )
        .route(
            REGISTER_PATH,
            post(|Json(body): Json<serde_json::Value>| async move {
                let detail = format!("{} already exists", body["username"].as_str().unwrap_or("?"));
                (StatusCode::BAD_REQUEST, Json(serde_json::json!({ "detail": detail })))
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, backend).await.unwrap();
    });
    format!("http://{addr}/")
}

async fn post_to(app: Router, path: &str, content_type: &str, body: &'static str) -> (StatusCode, String, String) {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(body))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_owned())
        .unwrap_or_default();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, content_type, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn sign_in_form_is_forwarded_and_token_returned() {
    let app = routes(AccessProxy::new(Some(spawn_backend().await)).unwrap());
    let (status, content_type, body) =
        post_to(app, AUTHORIZE_PATH, "application/x-www-form-urlencoded", "login=alice&password=pw").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type, "application/json");
    assert_eq!(body, TOKEN_BODY);
}

#[tokio::test]
async fn backend_rejection_passes_through() {
    let app = routes(AccessProxy::new(Some(spawn_backend().await)).unwrap());
    let (status, _, body) = post_to(
        app,
        REGISTER_PATH,
        "application/json",
        r#"{"email":"a@b.com","username":"alice","password":"pw"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains(r#""detail":"alice already exists""#), "body {body}");
}

#[tokio::test]
async fn missing_upstream_answers_unavailable_with_detail() {
    let app = routes(AccessProxy::new(None).unwrap());
    let (status, content_type, body) = post_to(app, REGISTER_PATH, "application/json", "{}").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(content_type, "application/json");
    assert!(body.contains("access backend is not configured"), "body {body}");
}

#[tokio::test]
async fn unreachable_upstream_is_bad_gateway() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let app = routes(AccessProxy::new(Some(format!("http://{addr}"))).unwrap());
    let (status, _, body) = post_to(app, AUTHORIZE_PATH, "application/x-www-form-urlencoded", "login=a&password=b").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body.contains("\"detail\""), "body {body}");
}

#[test]
fn upstream_url_joins_base_and_path() {
    assert_eq!(upstream_url("http://api:8000", AUTHORIZE_PATH), "http://api:8000/access/authorize");
    assert_eq!(upstream_url("http://api:8000/", REGISTER_PATH), "http://api:8000/access/register");
}
