//! Stateless GraphQL request builder and response parser for the users API.
//!
//! # Design
//! `GraphqlClient` holds only the endpoint URL. Each operation is split into
//! a `build_*` method that produces an `HttpRequest` and a `parse_*` method
//! that consumes an `HttpResponse`. Credentials come in per call through an
//! `AuthSession`; the client never stores them.
//!
//! Responses are read through the GraphQL envelope: a non-empty `errors`
//! array wins over everything else, including the HTTP status.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::AuthSession;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{CreateUserInput, LoginInput, LoginPayload, Page, PageResult, User, UserConnection, UserSummary};

pub const LOGIN_MUTATION: &str = "mutation Login($email: String!, $password: String!) {
  login(data: { email: $email, password: $password }) {
    token
    user { id email }
  }
}";

pub const CREATE_USER_MUTATION: &str = "mutation CreateUser($data: UserInput!) {
  createUser(data: $data) { id name phone birthDate email role }
}";

pub const USERS_QUERY: &str = "query Users($data: PageInput) {
  users(data: $data) {
    nodes { id name email }
    count
    pageInfo { offset limit hasNextPage hasPreviousPage }
  }
}";

pub const USER_QUERY: &str = "query User($id: ID!) {
  user(id: $id) { id name phone birthDate email role }
}";

#[derive(Deserialize)]
struct Envelope {
    data: Option<Value>,
    #[serde(default)]
    errors: Option<Vec<ErrorEntry>>,
}

#[derive(Deserialize)]
struct ErrorEntry {
    message: String,
}

/// Synchronous, stateless client for the users GraphQL API.
#[derive(Debug, Clone)]
pub struct GraphqlClient {
    endpoint: String,
}

impl GraphqlClient {
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn build_login(&self, input: &LoginInput) -> Result<HttpRequest, ApiError> {
        let variables = json!({ "email": input.email, "password": input.password });
        self.operation(&AuthSession::anonymous(), "Login", LOGIN_MUTATION, variables)
    }

    pub fn build_create_user(&self, auth: &AuthSession, input: &CreateUserInput) -> Result<HttpRequest, ApiError> {
        let data = serde_json::to_value(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        self.operation(auth, "CreateUser", CREATE_USER_MUTATION, json!({ "data": data }))
    }

    pub fn build_users(&self, auth: &AuthSession, page: Page) -> Result<HttpRequest, ApiError> {
        let variables = json!({ "data": { "offset": page.offset, "limit": page.limit } });
        self.operation(auth, "Users", USERS_QUERY, variables)
    }

    pub fn build_user(&self, auth: &AuthSession, id: &str) -> Result<HttpRequest, ApiError> {
        self.operation(auth, "User", USER_QUERY, json!({ "id": id }))
    }

    pub fn parse_login(&self, response: HttpResponse) -> Result<LoginPayload, ApiError> {
        required(decode(response, "login")?, "login")
    }

    pub fn parse_create_user(&self, response: HttpResponse) -> Result<User, ApiError> {
        required(decode(response, "createUser")?, "createUser")
    }

    pub fn parse_users(&self, response: HttpResponse) -> Result<PageResult<UserSummary>, ApiError> {
        let conn: UserConnection = required(decode(response, "users")?, "users")?;
        Ok(conn.into())
    }

    /// `Ok(None)` when the server has no user with that id.
    pub fn parse_user(&self, response: HttpResponse) -> Result<Option<User>, ApiError> {
        match decode(response, "user")? {
            Value::Null => Ok(None),
            value => from_value(value).map(Some),
        }
    }

    fn operation(
        &self,
        auth: &AuthSession,
        name: &str,
        query: &str,
        variables: Value,
    ) -> Result<HttpRequest, ApiError> {
        let body = json!({ "operationName": name, "query": query, "variables": variables });
        let body = serde_json::to_string(&body).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        let mut headers = vec![("content-type".to_string(), "application/json".to_string())];
        if let Some(token) = auth.token() {
            headers.push(("authorization".to_string(), token.as_str().to_string()));
        }
        Ok(HttpRequest {
            url: self.endpoint.clone(),
            headers,
            body,
        })
    }
}

/// Unwrap the GraphQL envelope and return `data.<field>` (possibly null).
fn decode(response: HttpResponse, field: &'static str) -> Result<Value, ApiError> {
    let envelope = serde_json::from_str::<Envelope>(&response.body);

    if let Ok(Envelope { errors: Some(errors), .. }) = &envelope {
        if !errors.is_empty() {
            return Err(ApiError::Graphql {
                messages: errors.iter().map(|e| e.message.clone()).collect(),
            });
        }
    }
    if !response.is_success() {
        return Err(ApiError::HttpError {
            status: response.status,
            body: response.body,
        });
    }

    let envelope = envelope.map_err(|e| ApiError::DeserializationError(e.to_string()))?;
    let mut data = envelope.data.ok_or(ApiError::MissingData("data"))?;
    Ok(data.get_mut(field).map(Value::take).unwrap_or(Value::Null))
}

fn required<T: DeserializeOwned>(value: Value, field: &'static str) -> Result<T, ApiError> {
    if value.is_null() {
        return Err(ApiError::MissingData(field));
    }
    from_value(value)
}

fn from_value<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::DeserializationError(e.to_string()))
}
