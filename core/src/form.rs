//! Form session: one form's lifecycle from input to submission outcome.
//!
//! # Design
//! `FormSession` is a plain state machine. `submit` never performs I/O; it
//! either rejects the input locally or hands back a `SubmitRequest` for the
//! host to execute, and `complete` folds the outcome back in. Exactly one
//! request is in flight per session: `submit` is ignored while `Submitting`,
//! and completions carrying a stale attempt number are dropped.
//!
//! Both the login form and the user-creation form are this type; the
//! `FormKind` descriptor selects fields, rules, and the post-submit route.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::adapter::RemoteCallAdapter;
use crate::auth::AuthToken;
use crate::error::ClassifiedError;
use crate::navigation::NavigationIntent;
use crate::types::{LoginUser, User};
use crate::validation::{self, ErrorSet, FieldName, FieldSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormKind {
    Login,
    CreateUser,
}

impl FormKind {
    pub fn fields(self) -> &'static [FieldName] {
        match self {
            FormKind::Login => &[FieldName::Email, FieldName::Password],
            FormKind::CreateUser => &[
                FieldName::Name,
                FieldName::Phone,
                FieldName::BirthDate,
                FieldName::Email,
                FieldName::Role,
            ],
        }
    }

    pub fn success_message(self) -> &'static str {
        match self {
            FormKind::Login => "Login realizado com sucesso!",
            FormKind::CreateUser => "Usuário adicionado com sucesso!",
        }
    }

    /// Where the host should go after a successful submission.
    pub fn destination(self) -> NavigationIntent {
        match self {
            FormKind::Login | FormKind::CreateUser => NavigationIntent::Home,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

/// A validated form ready to be sent by a `RemoteCallAdapter`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRequest {
    pub attempt: u64,
    pub kind: FormKind,
    pub fields: FieldSet,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitSuccess {
    LoggedIn { token: AuthToken, user: LoginUser },
    UserCreated(User),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A submission is already in flight.
    Ignored,
    /// Validation failed; see `FormSession::errors`.
    Rejected,
    Dispatch(SubmitRequest),
}

/// Side effects the host must carry out after a completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEffect {
    PersistToken(AuthToken),
    Navigate(NavigationIntent),
}

#[derive(Debug, Clone)]
pub struct FormSession {
    kind: FormKind,
    fields: FieldSet,
    errors: ErrorSet,
    status: SubmissionStatus,
    success_message: Option<&'static str>,
    attempt: u64,
    last_success: Option<SubmitSuccess>,
}

impl FormSession {
    pub fn new(kind: FormKind) -> Self {
        Self {
            kind,
            fields: FieldSet::new(),
            errors: ErrorSet::default(),
            status: SubmissionStatus::Idle,
            success_message: None,
            attempt: 0,
            last_success: None,
        }
    }

    pub fn kind(&self) -> FormKind {
        self.kind
    }

    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    pub fn errors(&self) -> &ErrorSet {
        &self.errors
    }

    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    pub fn success_message(&self) -> Option<&'static str> {
        self.success_message
    }

    pub fn server_error(&self) -> Option<&str> {
        self.errors.server()
    }

    pub fn last_success(&self) -> Option<&SubmitSuccess> {
        self.last_success.as_ref()
    }

    pub fn is_submitting(&self) -> bool {
        self.status == SubmissionStatus::Submitting
    }

    /// Store a raw value. Validation waits for the next `submit`.
    pub fn set_field(&mut self, name: FieldName, value: impl Into<String>) {
        self.fields.set(name, value);
    }

    pub fn submit(&mut self, today: NaiveDate) -> SubmitOutcome {
        if self.is_submitting() {
            debug!(kind = ?self.kind, attempt = self.attempt, "submit ignored, request in flight");
            return SubmitOutcome::Ignored;
        }

        let errors = validation::validate(&self.fields, self.kind, today);
        if !errors.is_empty() {
            debug!(kind = ?self.kind, fields = ?errors.failing_fields(), "submit rejected by validation");
            self.errors = errors;
            self.status = SubmissionStatus::Idle;
            self.success_message = None;
            return SubmitOutcome::Rejected;
        }

        self.attempt += 1;
        self.errors.clear();
        self.status = SubmissionStatus::Submitting;
        debug!(kind = ?self.kind, attempt = self.attempt, "submit dispatched");
        SubmitOutcome::Dispatch(SubmitRequest {
            attempt: self.attempt,
            kind: self.kind,
            fields: self.fields.clone(),
        })
    }

    /// Fold the adapter's answer for `attempt` into the session.
    pub fn complete(&mut self, attempt: u64, result: Result<SubmitSuccess, ClassifiedError>) -> Vec<FormEffect> {
        if !self.is_submitting() || attempt != self.attempt {
            debug!(kind = ?self.kind, attempt, current = self.attempt, "stale completion discarded");
            return Vec::new();
        }

        match result {
            Ok(success) => {
                info!(kind = ?self.kind, attempt, "submission succeeded");
                self.status = SubmissionStatus::Succeeded;
                self.success_message = Some(self.kind.success_message());
                self.errors.clear();

                let mut effects = Vec::with_capacity(2);
                if let SubmitSuccess::LoggedIn { token, .. } = &success {
                    effects.push(FormEffect::PersistToken(token.clone()));
                }
                effects.push(FormEffect::Navigate(self.kind.destination()));
                self.last_success = Some(success);
                effects
            }
            Err(err) => {
                info!(kind = ?self.kind, attempt, error = %err, "submission failed");
                self.status = SubmissionStatus::Failed;
                self.success_message = None;
                self.errors.set_server(err.form_message());
                Vec::new()
            }
        }
    }

    /// `submit`, then run the request through `adapter` and `complete` it.
    pub fn submit_with<A: RemoteCallAdapter + ?Sized>(&mut self, adapter: &mut A, today: NaiveDate) -> Vec<FormEffect> {
        match self.submit(today) {
            SubmitOutcome::Dispatch(request) => {
                let result = adapter.call(&request);
                self.complete(request.attempt, result)
            }
            SubmitOutcome::Ignored | SubmitOutcome::Rejected => Vec::new(),
        }
    }
}
