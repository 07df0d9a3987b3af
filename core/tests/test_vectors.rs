//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected results. Request bodies are compared as parsed JSON so field
//! ordering does not matter.

use serde_json::Value;
use users_core::{
    AuthSession, AuthToken, ClassifiedError, GraphqlClient, HttpRequest, HttpResponse, LoginInput, LoginPayload,
    Page, UserSummary,
};

const ENDPOINT: &str = "http://localhost:4000/graphql";

fn client() -> GraphqlClient {
    GraphqlClient::new(ENDPOINT)
}

fn simulated(sim: &Value) -> HttpResponse {
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        headers: Vec::new(),
        body: sim["body"].as_str().unwrap().to_string(),
    }
}

fn check_request(name: &str, req: &HttpRequest, expected: &Value) {
    assert_eq!(req.url, ENDPOINT, "{name}: url");

    let expected_headers: Vec<(String, String)> = expected["headers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|h| {
            let arr = h.as_array().unwrap();
            (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
        })
        .collect();
    assert_eq!(req.headers, expected_headers, "{name}: headers");

    let body: Value = serde_json::from_str(&req.body).unwrap();
    assert_eq!(body["operationName"], expected["operation_name"], "{name}: operationName");
    assert_eq!(body["variables"], expected["variables"], "{name}: variables");
    assert!(body["query"].as_str().is_some_and(|q| !q.is_empty()), "{name}: query");
}

fn check_classified(name: &str, err: ClassifiedError, expected: &Value) {
    match expected["kind"].as_str().unwrap() {
        "Application" => assert_eq!(
            err,
            ClassifiedError::Application(expected["message"].as_str().unwrap().to_string()),
            "{name}"
        ),
        "Network" => assert_eq!(err, ClassifiedError::Network, "{name}"),
        "Unknown" => assert_eq!(err, ClassifiedError::Unknown, "{name}"),
        other => panic!("{name}: unknown expected kind: {other}"),
    }
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[test]
fn login_test_vectors() {
    let raw = include_str!("../../test-vectors/login.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input: LoginInput = serde_json::from_value(case["input"].clone()).unwrap();

        let req = c.build_login(&input).unwrap();
        check_request(name, &req, &case["expected_request"]);

        let result = c.parse_login(simulated(&case["simulated_response"]));
        if let Some(expected_error) = case.get("expected_error") {
            check_classified(name, ClassifiedError::from(result.unwrap_err()), expected_error);
        } else {
            let expected: LoginPayload = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(result.unwrap(), expected, "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[test]
fn users_test_vectors() {
    let raw = include_str!("../../test-vectors/users.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();
    let auth = AuthSession::signed_in(AuthToken::new(vectors["token"].as_str().unwrap()));

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let page: Page = serde_json::from_value(case["page"].clone()).unwrap();

        let req = c.build_users(&auth, page).unwrap();
        check_request(name, &req, &case["expected_request"]);

        let result = c.parse_users(simulated(&case["simulated_response"])).unwrap();
        let expected = &case["expected_result"];
        let items: Vec<UserSummary> = serde_json::from_value(expected["items"].clone()).unwrap();
        assert_eq!(result.items, items, "{name}: items");
        assert_eq!(u64::from(result.total_count), expected["total_count"].as_u64().unwrap(), "{name}: count");
        assert_eq!(Value::Bool(result.has_next), expected["has_next"], "{name}: has_next");
        assert_eq!(Value::Bool(result.has_previous), expected["has_previous"], "{name}: has_previous");
        assert_eq!(result.page, page, "{name}: page");
    }
}

// ---------------------------------------------------------------------------
// Error classification
// ---------------------------------------------------------------------------

#[test]
fn error_test_vectors() {
    let raw = include_str!("../../test-vectors/errors.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let err = c.parse_create_user(simulated(&case["response"])).unwrap_err();
        check_classified(name, ClassifiedError::from(err), &case["expected"]);
    }
}
