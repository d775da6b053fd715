//! A wiremock stand-in for reqres.in, shaped after the live responses.

#![allow(dead_code)]

use std::sync::Once;
use std::time::Duration;

use serde_json::{Value, json};
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Match, Mock, MockServer, Request, Respond, ResponseTemplate};

pub const TOKEN: &str = "QpwL5tke4Pnpja7X4";
pub const CREATED_ID: &str = "457";

static INIT: Once = Once::new();

pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

pub fn user(id: u64) -> Value {
    json!({
        "id": id,
        "email": format!("user{id}@reqres.in"),
        "first_name": "George",
        "last_name": "Bluth",
        "avatar": format!("https://reqres.in/img/faces/{id}-image.jpg"),
    })
}

pub fn resource(id: u64) -> Value {
    json!({
        "id": id,
        "name": "true red",
        "year": 2000 + id,
        "color": "#BF1932",
        "pantone_value": "19-1664",
    })
}

pub fn page_of(data: Vec<Value>) -> Value {
    json!({
        "page": 1,
        "per_page": 6,
        "total": 12,
        "total_pages": 2,
        "data": data,
        "support": {"url": "https://reqres.in/#support-heading", "text": "Thanks!"},
    })
}

fn users_page() -> Value {
    page_of((1..=6).map(user).collect())
}

fn resources_page() -> Value {
    page_of((1..=6).map(resource).collect())
}

fn id_from_path(request: &Request) -> Option<u64> {
    request.url.path_segments()?.next_back()?.parse().ok()
}

/// Answers `/api/{kind}/{id}` with the record for that id.
struct ById(fn(u64) -> Value);

impl Respond for ById {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        match id_from_path(request) {
            Some(id) => ResponseTemplate::new(200).set_body_json(json!({"data": (self.0)(id)})),
            None => ResponseTemplate::new(404).set_body_json(json!({})),
        }
    }
}

/// Echoes the JSON request body back with extra fields added.
struct Echo {
    status: u16,
    extra: Value,
}

impl Respond for Echo {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let Ok(Value::Object(mut body)) = request.body_json::<Value>() else {
            return ResponseTemplate::new(400).set_body_json(json!({"error": "Invalid JSON"}));
        };
        if let Value::Object(extra) = &self.extra {
            body.extend(extra.clone());
        }
        ResponseTemplate::new(self.status).set_body_json(Value::Object(body))
    }
}

/// Matches JSON bodies that lack `field`.
pub struct MissingField(pub &'static str);

impl Match for MissingField {
    fn matches(&self, request: &Request) -> bool {
        request
            .body_json::<Value>()
            .map(|body| body.get(self.0).is_none())
            .unwrap_or(true)
    }
}

/// Mounts every endpoint the catalogue touches.
pub async fn mount_reqres(server: &MockServer) {
    // Specific cases first: lower priority numbers win over the catch-alls.
    Mock::given(method("GET"))
        .and(path_regex(r"^/api/(users|unknown)/25$"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({})))
        .with_priority(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/users"))
        .and(query_param("delay", "3"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(users_page())
                .set_delay(Duration::from_secs(3)),
        )
        .with_priority(1)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path_regex(r"^/api/(register|login)$"))
        .and(MissingField("password"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": "Missing password"})))
        .with_priority(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(users_page()))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/unknown"))
        .respond_with(ResponseTemplate::new(200).set_body_json(resources_page()))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/api/users/\d+$"))
        .respond_with(ById(user))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/api/unknown/\d+$"))
        .respond_with(ById(resource))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/users"))
        .respond_with(Echo {
            status: 201,
            extra: json!({"id": CREATED_ID, "createdAt": "2026-10-19T09:12:44.512Z"}),
        })
        .mount(server)
        .await;

    for verb in ["PUT", "PATCH"] {
        Mock::given(method(verb))
            .and(path_regex(r"^/api/users/\d+$"))
            .respond_with(Echo {
                status: 200,
                extra: json!({"updatedAt": "2026-10-19T09:12:45.031Z"}),
            })
            .mount(server)
            .await;
    }

    Mock::given(method("DELETE"))
        .and(path_regex(r"^/api/users/\d+$"))
        .respond_with(ResponseTemplate::new(204))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/register"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 4, "token": TOKEN})))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": TOKEN})))
        .mount(server)
        .await;
}

pub async fn reqres_stub() -> MockServer {
    init_tracing();
    let server = MockServer::start().await;
    mount_reqres(&server).await;
    server
}
