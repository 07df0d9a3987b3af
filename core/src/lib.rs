//! Client core for the users administration app.
//!
//! # Overview
//! Validation and session state machines for the login, user-creation,
//! user-list and user-detail screens, plus the GraphQL layer they talk to.
//! The presentation layer renders session state and feeds input events in;
//! it also carries out the effects sessions return (persist a token,
//! navigate).
//!
//! # Design
//! - Host-does-IO: `GraphqlClient` builds `HttpRequest` values and parses
//!   `HttpResponse` values; a host `Transport` executes them.
//! - Sessions never call the network on their own. Transitions return an
//!   explicit request (`SubmitRequest`, `FetchRequest`, `DetailRequest`) and
//!   at most one is in flight per session.
//! - Remote failures reach sessions only as `ClassifiedError`.
//! - Credentials live in an explicit `AuthSession`, never in globals.

pub mod adapter;
pub mod auth;
pub mod client;
pub mod config;
pub mod detail;
pub mod error;
pub mod form;
pub mod http;
pub mod list;
pub mod navigation;
pub mod types;
pub mod validation;

pub use adapter::{GraphqlAdapter, PagedFetch, RemoteCallAdapter, UserLookup};
pub use auth::{AuthSession, AuthToken, MemoryTokenStore, TokenStore};
pub use client::GraphqlClient;
pub use config::{ClientConfig, ConfigError};
pub use detail::{DetailRequest, DetailSession, DetailState};
pub use error::{ApiError, ClassifiedError};
pub use form::{FormEffect, FormKind, FormSession, SubmissionStatus, SubmitOutcome, SubmitRequest, SubmitSuccess};
pub use http::{HttpRequest, HttpResponse, Transport, TransportError};
pub use list::{FetchRequest, ListSession, ListStatus};
pub use navigation::NavigationIntent;
pub use types::{CreateUserInput, LoginInput, LoginPayload, LoginUser, Page, PageResult, Role, User, UserSummary};
pub use validation::{validate, validate_now, ErrorKey, ErrorSet, FieldName, FieldSet};
