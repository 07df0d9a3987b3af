//! Domain DTOs for the users API.
//!
//! # Design
//! Field names follow the GraphQL schema (`camelCase` on the wire). The role
//! set is closed; `Role` accepts any casing on input and always writes the
//! upper-case form the API expects.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Closed set of user roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Admin, Role::User];

    /// Canonical wire identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::User => "USER",
        }
    }

    /// Label shown in role pickers.
    pub fn label(self) -> &'static str {
        match self {
            Role::Admin => "Administrador",
            Role::User => "Usuário",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role `{0}`")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

impl TryFrom<String> for Role {
    type Error = UnknownRole;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

/// Full user record, as returned by `user(id)` and `createUser`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub birth_date: String,
    pub email: String,
    pub role: Role,
}

/// Row of the paginated user list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Account identity returned with a login token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginUser {
    pub id: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginPayload {
    pub token: String,
    pub user: LoginUser,
}

/// Payload of the `createUser` mutation. `birth_date` is `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserInput {
    pub name: String,
    pub phone: String,
    pub birth_date: String,
    pub email: String,
    pub role: Role,
}

/// Window of a paged query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub offset: u32,
    pub limit: u32,
}

impl Page {
    /// Window for 1-based page `number`.
    pub fn numbered(number: u32, limit: u32) -> Self {
        Page {
            offset: number.saturating_sub(1).saturating_mul(limit),
            limit,
        }
    }
}

/// One fetched page of a collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub total_count: u32,
    pub has_next: bool,
    pub has_previous: bool,
    pub page: Page,
}

/// `pageInfo` block of a paged GraphQL connection.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub offset: u32,
    pub limit: u32,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

/// Wire shape of the `users` query result.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserConnection {
    pub nodes: Vec<UserSummary>,
    pub count: u32,
    pub page_info: PageInfo,
}

impl From<UserConnection> for PageResult<UserSummary> {
    fn from(conn: UserConnection) -> Self {
        PageResult {
            items: conn.nodes,
            total_count: conn.count,
            has_next: conn.page_info.has_next_page,
            has_previous: conn.page_info.has_previous_page,
            page: Page {
                offset: conn.page_info.offset,
                limit: conn.page_info.limit,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parses_any_casing() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("USER".parse::<Role>().unwrap(), Role::User);
        assert_eq!(" User ".parse::<Role>().unwrap(), Role::User);
        assert!("guest".parse::<Role>().is_err());
    }

    #[test]
    fn role_serializes_upper_case() {
        assert_eq!(serde_json::to_value(Role::Admin).unwrap(), "ADMIN");
        let role: Role = serde_json::from_str(r#""user""#).unwrap();
        assert_eq!(role, Role::User);
    }

    #[test]
    fn create_user_input_uses_camel_case() {
        let input = CreateUserInput {
            name: "Ana Lima".to_string(),
            phone: "11987654321".to_string(),
            birth_date: "1990-04-01".to_string(),
            email: "ana@example.com".to_string(),
            role: Role::User,
        };
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json["birthDate"], "1990-04-01");
        assert_eq!(json["role"], "USER");
        assert!(json.get("birth_date").is_none());
    }

    #[test]
    fn numbered_page_offsets() {
        assert_eq!(Page::numbered(1, 20), Page { offset: 0, limit: 20 });
        assert_eq!(Page::numbered(3, 20), Page { offset: 40, limit: 20 });
    }

    #[test]
    fn connection_converts_to_page_result() {
        let conn: UserConnection = serde_json::from_str(
            r#"{"nodes":[{"id":"1","name":"Ana Lima","email":"ana@example.com"}],
                "count":41,
                "pageInfo":{"offset":20,"limit":20,"hasNextPage":true,"hasPreviousPage":true}}"#,
        )
        .unwrap();
        let page = PageResult::from(conn);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total_count, 41);
        assert!(page.has_next);
        assert_eq!(page.page, Page { offset: 20, limit: 20 });
    }
}
