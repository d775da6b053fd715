//! # reqres.in check catalogue
//!
//! The full set of checks against the reqres.in API as one ordered table.
//! Listing and create checks capture ids and tokens that the single-item,
//! update, delete and login checks after them read back.

use std::time::Duration;

use serde_json::json;

use crate::context::ContextKey;
use crate::http::ApiRequest;
use crate::testing::{Assertion, Scenario, Severity, Suite};

pub const LIST_FIELDS: [&str; 5] = ["page", "per_page", "total", "total_pages", "data"];
pub const USER_FIELDS: [&str; 5] = ["id", "email", "first_name", "last_name", "avatar"];
pub const RESOURCE_FIELDS: [&str; 5] = ["id", "name", "year", "color", "pantone_value"];
pub const CREATED_USER_FIELDS: [&str; 4] = ["name", "job", "id", "createdAt"];

/// Seconds the delayed listing asks the server to wait.
pub const DELAY_SECONDS: u64 = 3;
/// Tolerance on either side of [`DELAY_SECONDS`].
pub const DELAY_TOLERANCE: Duration = Duration::from_millis(500);

pub const NOT_FOUND_ID: u32 = 25;
pub const LOGIN_EMAIL: &str = "eve.holt@reqres.in";
pub const REGISTER_PASSWORD: &str = "pistol";
pub const LOGIN_PASSWORD: &str = "cityslicka";
pub const MISSING_PASSWORD: &str = "Missing password";

/// Every request with a JSON body declares it explicitly.
fn json_request(request: ApiRequest, body: serde_json::Value) -> ApiRequest {
    request.header("Content-Type", "application/json").json(body)
}

pub fn reqres_suite() -> Suite {
    let mut scenarios = Vec::new();
    scenarios.extend(user_retrieval());
    scenarios.extend(resource_retrieval());
    scenarios.push(delayed_response());
    scenarios.extend(user_lifecycle());
    scenarios.extend(registration_and_login());
    Suite::new(scenarios)
}

fn listing(name: &str, request: ApiRequest) -> Scenario {
    Scenario::new(name, request)
        .expect(Assertion::status(200))
        .expect(Assertion::fields_present("", &LIST_FIELDS))
}

fn not_found(name: &str, path: String) -> Scenario {
    Scenario::new(name, ApiRequest::get(path))
        .expect(Assertion::status(404))
        .expect(Assertion::EmptyBody)
}

fn user_retrieval() -> Vec<Scenario> {
    vec![
        listing("List of Users", ApiRequest::get("/api/users").query("page", 1))
            .feature("User List Retrieval", "Get list of users from API")
            .severity(Severity::Critical)
            .description("This test verifies that the API returns the list of users correctly for the specified page.")
            .capture(ContextKey::UserId, "/data/0/id"),
        Scenario::new("Single User", ApiRequest::get("/api/users/{{user_id}}"))
            .feature("User Retrieval", "Get single user from API")
            .severity(Severity::Critical)
            .description(
                "This test verifies that the API returns the details of a single user correctly for the specified user ID.",
            )
            .expect(Assertion::status(200))
            .expect(Assertion::fields_present("/data", &USER_FIELDS))
            .expect(Assertion::field_matches_context("/data/id", ContextKey::UserId)),
        not_found("Single User Not Found", format!("/api/users/{NOT_FOUND_ID}"))
            .feature("User Retrieval", "Get single user not found")
            .description("This test verifies that the API returns a 404 status code when a user is not found."),
    ]
}

fn resource_retrieval() -> Vec<Scenario> {
    vec![
        listing("List of Resources", ApiRequest::get("/api/unknown"))
            .feature("Resource Retrieval", "Get list of resources")
            .severity(Severity::Critical)
            .description("This test verifies that the API returns the list of resources correctly.")
            .capture(ContextKey::ResourceId, "/data/0/id"),
        Scenario::new("Single Resource", ApiRequest::get("/api/unknown/{{resource_id}}"))
            .feature("Resource Retrieval", "Get single resource")
            .severity(Severity::Critical)
            .description(
                "This test verifies that the API returns the details of a single resource correctly for the specified resource ID.",
            )
            .expect(Assertion::status(200))
            .expect(Assertion::fields_present("/data", &RESOURCE_FIELDS))
            .expect(Assertion::field_matches_context("/data/id", ContextKey::ResourceId)),
        not_found("Single Resource Not Found", format!("/api/unknown/{NOT_FOUND_ID}"))
            .feature("Resource Retrieval", "Get single resource not found")
            .description("This test verifies that the API returns a 404 status code when a resource is not found."),
    ]
}

fn delayed_response() -> Scenario {
    let nominal = Duration::from_secs(DELAY_SECONDS);
    listing("Delayed Response", ApiRequest::get("/api/users").query("delay", DELAY_SECONDS))
        .feature("User Retrieval", "Get delayed response")
        .severity(Severity::Minor)
        .description("This test verifies that the API handles delayed responses correctly.")
        .expect(Assertion::elapsed_within(nominal - DELAY_TOLERANCE, nominal + DELAY_TOLERANCE))
}

fn user_lifecycle() -> Vec<Scenario> {
    let created = json!({"name": "morpheus", "job": "leader"});
    let updated = json!({"name": "morpheus", "job": "zion resident"});

    let update = |request: ApiRequest, verb: &str| {
        Scenario::new("User Update", json_request(request, updated.clone()))
            .feature("User Update", format!("Update an existing user with {verb}"))
            .severity(Severity::Critical)
            .description(format!(
                "This test verifies that an existing user is updated successfully via a {verb} request."
            ))
            .expect(Assertion::status(200))
            .expect(Assertion::field_equals("/name", updated["name"].clone()))
            .expect(Assertion::field_equals("/job", updated["job"].clone()))
    };

    vec![
        Scenario::new("User Created", json_request(ApiRequest::post("/api/users"), created.clone()))
            .feature("User Creation", "Create a new user")
            .severity(Severity::Critical)
            .description("This test verifies that a new user is created successfully via a POST request.")
            .smoke()
            .expect(Assertion::status(201))
            .expect(Assertion::fields_present("", &CREATED_USER_FIELDS))
            .expect(Assertion::field_equals("/name", created["name"].clone()))
            .expect(Assertion::field_equals("/job", created["job"].clone()))
            .expect(Assertion::field_not_null("/id"))
            .expect(Assertion::field_not_null("/createdAt"))
            .capture(ContextKey::CreatedUserId, "/id"),
        update(ApiRequest::put("/api/users/{{created_user_id}}"), "PUT").smoke(),
        update(ApiRequest::patch("/api/users/{{created_user_id}}"), "PATCH"),
        Scenario::new("Delete User", ApiRequest::delete("/api/users/{{created_user_id}}"))
            .feature("User Deletion", "Delete an existing user")
            .severity(Severity::Critical)
            .description("This test verifies that an existing user is deleted successfully via a DELETE request.")
            .smoke()
            .expect(Assertion::status(204))
            .expect(Assertion::EmptyBody),
    ]
}

fn registration_and_login() -> Vec<Scenario> {
    let email_only = json!({"email": LOGIN_EMAIL});

    vec![
        Scenario::new(
            "Successful Registration",
            json_request(
                ApiRequest::post("/api/register"),
                json!({"email": LOGIN_EMAIL, "password": REGISTER_PASSWORD}),
            ),
        )
        .feature("User Registration", "Register a new user successfully")
        .severity(Severity::Critical)
        .description("This test verifies that a new user is registered successfully via a POST request.")
        .smoke()
        .expect(Assertion::status(200))
        .expect(Assertion::field_not_null("/id"))
        .expect(Assertion::field_not_null("/token"))
        .capture(ContextKey::RegisteredUserId, "/id")
        .capture(ContextKey::Token, "/token"),
        Scenario::new(
            "Unsuccessful Registration",
            json_request(ApiRequest::post("/api/register"), email_only.clone()),
        )
        .feature("User Registration", "Register a new user unsuccessfully")
        .description("This test verifies that an unsuccessful registration returns the correct error response.")
        .expect(Assertion::status(400))
        .expect(Assertion::field_equals("/error", json!(MISSING_PASSWORD))),
        Scenario::new(
            "LOGIN - SUCCESSFUL",
            json_request(
                ApiRequest::post("/api/login"),
                json!({"email": LOGIN_EMAIL, "password": LOGIN_PASSWORD}),
            ),
        )
        .feature("User Login", "Login successfully")
        .severity(Severity::Critical)
        .description("This test verifies that a user can log in successfully via a POST request.")
        .smoke()
        .expect(Assertion::status(200))
        .expect(Assertion::field_not_null("/token"))
        .expect(Assertion::field_matches_context("/token", ContextKey::Token)),
        Scenario::new("LOGIN - UNSUCCESSFUL", json_request(ApiRequest::post("/api/login"), email_only))
            .feature("User Login", "Login unsuccessfully")
            .description("This test verifies that an unsuccessful login returns the correct error response.")
            .expect(Assertion::status(400))
            .expect(Assertion::field_equals("/error", json!(MISSING_PASSWORD))),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpMethod;
    use crate::testing::{Filter, Tag};

    fn position(suite: &Suite, name: &str, method: HttpMethod) -> usize {
        suite
            .scenarios()
            .iter()
            .position(|s| s.name == name && s.request.method == method)
            .unwrap()
    }

    #[test]
    fn catalogue_covers_every_endpoint() {
        let suite = reqres_suite();
        assert_eq!(suite.scenarios().len(), 15);
        assert!(suite.scenarios().iter().all(|s| s.has_tag(Tag::Regression)));
    }

    #[test]
    fn producers_run_before_consumers() {
        let suite = reqres_suite();
        let create = position(&suite, "User Created", HttpMethod::Post);
        assert!(create < position(&suite, "User Update", HttpMethod::Put));
        assert!(create < position(&suite, "User Update", HttpMethod::Patch));
        assert!(create < position(&suite, "Delete User", HttpMethod::Delete));
        assert!(position(&suite, "List of Users", HttpMethod::Get) < position(&suite, "Single User", HttpMethod::Get));
        assert!(
            position(&suite, "Successful Registration", HttpMethod::Post)
                < position(&suite, "LOGIN - SUCCESSFUL", HttpMethod::Post)
        );
    }

    #[test]
    fn smoke_subset_matches_markers() {
        let suite = reqres_suite();
        let filter = Filter {
            tag: Some(Tag::Smoke),
            name: None,
        };
        let smoke: Vec<_> = suite
            .select(&filter)
            .map(|s| format!("{} {}", s.request.method, s.name))
            .collect();
        assert_eq!(
            smoke,
            [
                "POST User Created",
                "PUT User Update",
                "DELETE Delete User",
                "POST Successful Registration",
                "POST LOGIN - SUCCESSFUL",
            ]
        );
    }

    #[test]
    fn delayed_band_is_half_a_second_either_side() {
        let suite = reqres_suite();
        let delayed = &suite.scenarios()[position(&suite, "Delayed Response", HttpMethod::Get)];
        assert_eq!(delayed.request.display_target(), "/api/users?delay=3");
        assert!(delayed.assertions.contains(&Assertion::elapsed_within(
            Duration::from_millis(2500),
            Duration::from_millis(3500)
        )));
    }

    #[test]
    fn every_check_is_labelled() {
        for scenario in reqres_suite().scenarios() {
            assert!(!scenario.feature.is_empty(), "{} has no feature", scenario.name);
            assert!(!scenario.story.is_empty(), "{} has no story", scenario.name);
            assert!(scenario.description.starts_with("This test verifies"), "{}", scenario.name);
        }
    }

    #[test]
    fn json_requests_declare_content_type() {
        for scenario in reqres_suite().scenarios() {
            let declared = scenario
                .request
                .headers
                .iter()
                .any(|(name, value)| name == "Content-Type" && value == "application/json");
            assert_eq!(declared, scenario.request.body.is_some(), "{}", scenario.name);
        }
    }

    #[test]
    fn not_found_checks_expect_empty_body() {
        let suite = reqres_suite();
        for name in ["Single User Not Found", "Single Resource Not Found"] {
            let scenario = &suite.scenarios()[position(&suite, name, HttpMethod::Get)];
            assert_eq!(scenario.assertions, [Assertion::status(404), Assertion::EmptyBody]);
        }
    }
}
