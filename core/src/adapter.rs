//! Boundary between the sessions and the backend.
//!
//! # Design
//! Sessions only see the three traits below, each returning a
//! `ClassifiedError` on failure. `GraphqlAdapter` is the real implementation:
//! `GraphqlClient` builds and parses, a host `Transport` moves bytes, and the
//! adapter owns the `AuthSession` that authorizes every call after login.

use tracing::{debug, warn};

use crate::auth::{AuthSession, AuthToken, TokenStore};
use crate::client::GraphqlClient;
use crate::error::{ApiError, ClassifiedError};
use crate::form::{FormKind, SubmitRequest, SubmitSuccess};
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::navigation::NavigationIntent;
use crate::types::{CreateUserInput, LoginInput, LoginPayload, Page, PageResult, User, UserSummary};
use crate::validation::{FieldName, FieldSet};

/// Sends a validated form to the backend.
pub trait RemoteCallAdapter {
    fn call(&mut self, request: &SubmitRequest) -> Result<SubmitSuccess, ClassifiedError>;
}

/// Fetches one page of a collection.
pub trait PagedFetch {
    type Item;

    fn fetch(&mut self, page: Page) -> Result<PageResult<Self::Item>, ClassifiedError>;
}

/// Looks up a single user; `Ok(None)` when it does not exist.
pub trait UserLookup {
    fn fetch_user(&mut self, id: &str) -> Result<Option<User>, ClassifiedError>;
}

pub struct GraphqlAdapter<T> {
    client: GraphqlClient,
    transport: T,
    auth: AuthSession,
}

impl<T: Transport> GraphqlAdapter<T> {
    pub fn new(client: GraphqlClient, transport: T) -> Self {
        Self {
            client,
            transport,
            auth: AuthSession::anonymous(),
        }
    }

    pub fn with_session(mut self, auth: AuthSession) -> Self {
        self.auth = auth;
        self
    }

    pub fn auth(&self) -> &AuthSession {
        &self.auth
    }

    pub fn sign_out(&mut self) {
        self.auth.sign_out();
    }

    /// Sign out and clear `store`, returning the login intent.
    pub fn log_out<S: TokenStore + ?Sized>(&mut self, store: &mut S) -> NavigationIntent {
        self.auth.log_out(store)
    }

    /// Runs the `login` mutation and, on success, signs the session in.
    pub fn login(&mut self, input: &LoginInput) -> Result<LoginPayload, ApiError> {
        let request = self.client.build_login(input)?;
        let response = self.round_trip(request)?;
        let payload = self.client.parse_login(response)?;
        self.auth.sign_in(AuthToken::new(payload.token.clone()));
        Ok(payload)
    }

    pub fn create_user(&mut self, input: &CreateUserInput) -> Result<User, ApiError> {
        let request = self.client.build_create_user(&self.auth, input)?;
        let response = self.round_trip(request)?;
        self.client.parse_create_user(response)
    }

    pub fn users(&mut self, page: Page) -> Result<PageResult<UserSummary>, ApiError> {
        let request = self.client.build_users(&self.auth, page)?;
        let response = self.round_trip(request)?;
        self.client.parse_users(response)
    }

    pub fn user(&mut self, id: &str) -> Result<Option<User>, ApiError> {
        let request = self.client.build_user(&self.auth, id)?;
        let response = self.round_trip(request)?;
        self.client.parse_user(response)
    }

    fn round_trip(&mut self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let response = self.transport.execute(request)?;
        debug!(status = response.status, "graphql response");
        Ok(response)
    }
}

impl<T: Transport> RemoteCallAdapter for GraphqlAdapter<T> {
    fn call(&mut self, request: &SubmitRequest) -> Result<SubmitSuccess, ClassifiedError> {
        let result = match request.kind {
            FormKind::Login => self
                .login(&login_input(&request.fields))
                .map(|payload| SubmitSuccess::LoggedIn {
                    token: AuthToken::new(payload.token),
                    user: payload.user,
                }),
            FormKind::CreateUser => create_user_input(&request.fields)
                .and_then(|input| self.create_user(&input))
                .map(SubmitSuccess::UserCreated),
        };
        result.map_err(|err| {
            warn!(kind = ?request.kind, error = %err, "submission failed");
            ClassifiedError::from(err)
        })
    }
}

impl<T: Transport> PagedFetch for GraphqlAdapter<T> {
    type Item = UserSummary;

    fn fetch(&mut self, page: Page) -> Result<PageResult<UserSummary>, ClassifiedError> {
        self.users(page).map_err(|err| {
            warn!(offset = page.offset, limit = page.limit, error = %err, "users query failed");
            ClassifiedError::from(err)
        })
    }
}

impl<T: Transport> UserLookup for GraphqlAdapter<T> {
    fn fetch_user(&mut self, id: &str) -> Result<Option<User>, ClassifiedError> {
        self.user(id).map_err(|err| {
            warn!(id, error = %err, "user query failed");
            ClassifiedError::from(err)
        })
    }
}

fn login_input(fields: &FieldSet) -> LoginInput {
    LoginInput {
        email: fields.get(FieldName::Email).trim().to_string(),
        password: fields.get(FieldName::Password).to_string(),
    }
}

fn create_user_input(fields: &FieldSet) -> Result<CreateUserInput, ApiError> {
    let role = fields
        .get(FieldName::Role)
        .parse()
        .map_err(|e: crate::types::UnknownRole| ApiError::SerializationError(e.to_string()))?;
    Ok(CreateUserInput {
        name: fields.get(FieldName::Name).split_whitespace().collect::<Vec<_>>().join(" "),
        phone: fields.get(FieldName::Phone).to_string(),
        birth_date: fields.get(FieldName::BirthDate).trim().to_string(),
        email: fields.get(FieldName::Email).trim().to_string(),
        role,
    })
}
