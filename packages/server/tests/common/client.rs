//! In-process HTTP client for the router.
//!
//! Builds the full application over the in-memory doubles and drives it with
//! `tower::ServiceExt::oneshot`, so no socket, database or provider is needed.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use server_core::domains::auth::JwtService;
use server_core::kernel::{InMemoryStore, MockImageStorage, MockTwilio, ServerDeps};
use server_core::server::{build_app, AppOptions, AxumAppState};
use std::sync::Arc;
use tower::ServiceExt;

pub const TEST_JWT_SECRET: &str = "test_secret_key";
pub const TEST_JWT_ISSUER: &str = "test_issuer";

const BOUNDARY: &str = "homecook-test-boundary";

/// Response status plus the parsed JSON body (`Value::Null` when empty).
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

/// One part of a multipart form.
pub enum Part<'a> {
    Text(&'a str, &'a str),
    File {
        name: &'a str,
        file_name: &'a str,
        content_type: &'a str,
        bytes: &'a [u8],
    },
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryStore>,
    pub twilio: Arc<MockTwilio>,
    pub images: Arc<MockImageStorage>,
    pub jwt: Arc<JwtService>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_twilio(MockTwilio::new())
    }

    pub fn with_twilio(twilio: MockTwilio) -> Self {
        let store = Arc::new(InMemoryStore::new());
        let twilio = Arc::new(twilio);
        let images = Arc::new(MockImageStorage::new());
        let jwt = Arc::new(JwtService::new(TEST_JWT_SECRET, TEST_JWT_ISSUER.to_string()));

        let deps = ServerDeps::new(
            store.clone(),
            store.clone(),
            store.clone(),
            twilio.clone(),
            images.clone(),
            jwt.clone(),
        );
        let router = build_app(AxumAppState::new(deps, None), &AppOptions::default());

        Self {
            router,
            store,
            twilio,
            images,
            jwt,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        TestResponse { status, body }
    }

    pub async fn post_json(&self, path: &str, body: Value) -> TestResponse {
        let request = Request::builder()
            .method(Method::POST)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> TestResponse {
        let mut builder = Request::builder().method(Method::GET).uri(path);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn post_multipart(
        &self,
        path: &str,
        token: Option<&str>,
        parts: &[Part<'_>],
    ) -> TestResponse {
        let mut builder = Request::builder()
            .method(Method::POST)
            .uri(path)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            );
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        self.send(builder.body(Body::from(multipart_body(parts))).unwrap())
            .await
    }

    /// Register through the public route for `role`, then log in with a
    /// provider-approved code. Returns the session token.
    pub async fn register_and_login(&self, phone: &str, role: &str) -> String {
        let registered = match role {
            "chef" => {
                self.post_json(
                    "/chef/register",
                    serde_json::json!({ "phone": phone, "name": "Test Chef", "bio": "Curries" }),
                )
                .await
            }
            _ => {
                self.post_json(
                    "/auth/signup",
                    serde_json::json!({ "phone": phone, "name": "Test Customer" }),
                )
                .await
            }
        };
        assert_eq!(registered.status, StatusCode::CREATED, "{}", registered.body);

        self.twilio.set_code(phone, "123456");
        let verified = self
            .post_json(
                "/auth/verify-otp",
                serde_json::json!({ "phone": phone, "otp": "123456", "role": role }),
            )
            .await;
        assert_eq!(verified.status, StatusCode::OK, "{}", verified.body);

        verified.body["data"]["token"]
            .as_str()
            .expect("token in verify-otp response")
            .to_string()
    }
}

fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name)
                        .as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File {
                name,
                file_name,
                content_type,
                bytes,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                        name, file_name, content_type
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}
