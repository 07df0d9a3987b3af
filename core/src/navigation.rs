//! Navigation intents emitted by sessions. Routing itself belongs to the host.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationIntent {
    Login,
    Home,
    AddUser,
    UserDetails(String),
    Back,
}

impl NavigationIntent {
    /// Route path, or `None` for history-relative intents.
    pub fn path(&self) -> Option<String> {
        match self {
            NavigationIntent::Login => Some("/".to_string()),
            NavigationIntent::Home => Some("/home".to_string()),
            NavigationIntent::AddUser => Some("/add-user".to_string()),
            NavigationIntent::UserDetails(id) => Some(format!("/users/{id}")),
            NavigationIntent::Back => None,
        }
    }
}

impl fmt::Display for NavigationIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.path() {
            Some(path) => f.write_str(&path),
            None => f.write_str("<back>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes() {
        assert_eq!(NavigationIntent::Home.path().as_deref(), Some("/home"));
        assert_eq!(NavigationIntent::UserDetails("42".to_string()).path().as_deref(), Some("/users/42"));
        assert_eq!(NavigationIntent::Back.path(), None);
    }
}
