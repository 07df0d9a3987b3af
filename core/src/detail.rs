//! Detail session for a single user record.

use tracing::debug;

use crate::adapter::UserLookup;
use crate::error::ClassifiedError;
use crate::navigation::NavigationIntent;
use crate::types::User;

pub const LOADING_MESSAGE: &str = "Carregando...";
pub const NOT_FOUND_MESSAGE: &str = "Usuário não encontrado.";
pub const DETAIL_GENERIC_MESSAGE: &str = "Ocorreu um erro ao carregar os detalhes do usuário.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailState {
    Loading,
    Loaded(User),
    NotFound,
    Errored(ClassifiedError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRequest {
    pub id: String,
}

#[derive(Debug, Clone)]
pub struct DetailSession {
    id: String,
    state: DetailState,
}

impl DetailSession {
    pub fn new(id: impl Into<String>) -> (Self, DetailRequest) {
        let session = Self {
            id: id.into(),
            state: DetailState::Loading,
        };
        let request = DetailRequest { id: session.id.clone() };
        (session, request)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn user(&self) -> Option<&User> {
        match &self.state {
            DetailState::Loaded(user) => Some(user),
            _ => None,
        }
    }

    /// Status line for every state except `Loaded`.
    pub fn message(&self) -> Option<&'static str> {
        match &self.state {
            DetailState::Loading => Some(LOADING_MESSAGE),
            DetailState::Loaded(_) => None,
            DetailState::NotFound => Some(NOT_FOUND_MESSAGE),
            DetailState::Errored(err) => Some(err.query_message(DETAIL_GENERIC_MESSAGE)),
        }
    }

    pub fn retry(&mut self) -> Option<DetailRequest> {
        if !matches!(self.state, DetailState::Errored(_)) {
            return None;
        }
        self.state = DetailState::Loading;
        Some(DetailRequest { id: self.id.clone() })
    }

    pub fn complete(&mut self, request: &DetailRequest, result: Result<Option<User>, ClassifiedError>) {
        if self.state != DetailState::Loading || request.id != self.id {
            debug!(id = %request.id, "stale detail discarded");
            return;
        }
        self.state = match result {
            Ok(Some(user)) => DetailState::Loaded(user),
            Ok(None) => DetailState::NotFound,
            Err(err) => DetailState::Errored(err),
        };
        debug!(id = %self.id, state = ?self.state, "detail completed");
    }

    pub fn drive<L: UserLookup + ?Sized>(&mut self, request: DetailRequest, lookup: &mut L) {
        let result = lookup.fetch_user(&request.id);
        self.complete(&request, result);
    }

    /// The back button.
    pub fn back(&self) -> NavigationIntent {
        NavigationIntent::Back
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{NETWORK_MESSAGE, QUERY_MESSAGE};
    use crate::types::Role;

    struct Lookup(Vec<Result<Option<User>, ClassifiedError>>);

    impl UserLookup for Lookup {
        fn fetch_user(&mut self, _id: &str) -> Result<Option<User>, ClassifiedError> {
            self.0.remove(0)
        }
    }

    fn user() -> User {
        User {
            id: "7".to_string(),
            name: "Ana Lima".to_string(),
            phone: "11987654321".to_string(),
            birth_date: "1990-04-01".to_string(),
            email: "ana@example.com".to_string(),
            role: Role::Admin,
        }
    }

    #[test]
    fn loads_user() {
        let (mut session, request) = DetailSession::new("7");
        assert_eq!(session.message(), Some(LOADING_MESSAGE));
        session.drive(request, &mut Lookup(vec![Ok(Some(user()))]));
        assert_eq!(session.user(), Some(&user()));
        assert_eq!(session.message(), None);
    }

    #[test]
    fn missing_user() {
        let (mut session, request) = DetailSession::new("404");
        session.drive(request, &mut Lookup(vec![Ok(None)]));
        assert_eq!(session.state(), &DetailState::NotFound);
        assert_eq!(session.message(), Some(NOT_FOUND_MESSAGE));
        assert_eq!(session.retry(), None);
    }

    #[test]
    fn error_messages_and_retry() {
        let (mut session, request) = DetailSession::new("7");
        let mut lookup = Lookup(vec![
            Err(ClassifiedError::Network),
            Err(ClassifiedError::Application("x".to_string())),
            Ok(Some(user())),
        ]);
        session.drive(request, &mut lookup);
        assert_eq!(session.message(), Some(NETWORK_MESSAGE));

        let request = session.retry().unwrap();
        session.drive(request, &mut lookup);
        assert_eq!(session.message(), Some(QUERY_MESSAGE));

        let request = session.retry().unwrap();
        session.drive(request, &mut lookup);
        assert!(session.user().is_some());
    }

    #[test]
    fn completion_outside_loading_is_ignored() {
        let (mut session, request) = DetailSession::new("7");
        session.complete(&request, Ok(None));
        session.complete(&request, Ok(Some(user())));
        assert_eq!(session.state(), &DetailState::NotFound);
    }
}
