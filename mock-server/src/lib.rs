use std::{collections::HashSet, sync::Arc};

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "abc1234";

pub const INVALID_CREDENTIALS: &str = "Invalid email or password";
pub const UNAUTHENTICATED: &str = "Operation requires authentication";
pub const EMAIL_IN_USE: &str = "Email already in use";

const DEFAULT_LIMIT: u32 = 10;

const FIRST_NAMES: [&str; 8] = ["Larissa", "João", "Maria", "Pedro", "Ana", "Lucas", "Beatriz", "Rafael"];
const LAST_NAMES: [&str; 3] = ["Sanches", "Silva", "Sousa"];

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub birth_date: String,
    pub email: String,
    pub role: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInput {
    pub name: String,
    pub phone: String,
    pub birth_date: String,
    pub email: String,
    pub role: String,
}

#[derive(Deserialize)]
pub struct PageInput {
    #[serde(default)]
    pub offset: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphqlRequest {
    pub operation_name: Option<String>,
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub variables: Value,
}

#[derive(Debug, Default)]
pub struct Db {
    users: Vec<User>,
    passwords: Vec<(String, String)>,
    tokens: HashSet<String>,
    next_id: u64,
}

impl Db {
    /// One admin account plus `sample_users` list entries.
    pub fn seeded(sample_users: usize) -> Self {
        let mut db = Db::default();
        db.insert(UserInput {
            name: "Admin Taqtile".to_string(),
            phone: "11999999999".to_string(),
            birth_date: "1990-01-01".to_string(),
            email: ADMIN_EMAIL.to_string(),
            role: "ADMIN".to_string(),
        });
        db.passwords.push((ADMIN_EMAIL.to_string(), ADMIN_PASSWORD.to_string()));
        for i in 0..sample_users {
            let first = FIRST_NAMES[i % FIRST_NAMES.len()];
            let last = LAST_NAMES[(i / FIRST_NAMES.len()) % LAST_NAMES.len()];
            db.insert(UserInput {
                name: format!("{first} {last}"),
                phone: format!("119{:08}", i),
                birth_date: format!("19{:02}-0{}-1{}", 70 + i % 30, 1 + i % 9, i % 10),
                email: format!("user{i}@example.com"),
                role: "USER".to_string(),
            });
        }
        db
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    fn insert(&mut self, input: UserInput) -> User {
        self.next_id += 1;
        let user = User {
            id: self.next_id.to_string(),
            name: input.name,
            phone: input.phone,
            birth_date: input.birth_date,
            email: input.email,
            role: input.role.to_uppercase(),
        };
        self.users.push(user.clone());
        user
    }
}

pub type SharedDb = Arc<RwLock<Db>>;

pub fn app() -> Router {
    app_with(Db::seeded(24))
}

pub fn app_with(db: Db) -> Router {
    let db: SharedDb = Arc::new(RwLock::new(db));
    Router::new().route("/graphql", post(graphql)).with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

type GraphqlReply = (StatusCode, Json<Value>);

fn data(field: &str, value: Value) -> GraphqlReply {
    (StatusCode::OK, Json(json!({ "data": { field: value } })))
}

fn error(status: StatusCode, message: &str) -> GraphqlReply {
    (status, Json(json!({ "data": null, "errors": [{ "message": message }] })))
}

async fn graphql(State(db): State<SharedDb>, headers: HeaderMap, Json(req): Json<GraphqlRequest>) -> GraphqlReply {
    let operation = req.operation_name.as_deref().unwrap_or_default();
    tracing::info!(operation, "graphql request");

    if operation == "Login" {
        return login(&db, &req.variables).await;
    }

    let token = headers.get("authorization").and_then(|v| v.to_str().ok());
    let authorized = match token {
        Some(token) => db.read().await.tokens.contains(token),
        None => false,
    };
    if !authorized && matches!(operation, "CreateUser" | "Users" | "User") {
        return error(StatusCode::OK, UNAUTHENTICATED);
    }

    match operation {
        "CreateUser" => create_user(&db, &req.variables).await,
        "Users" => users(&db, &req.variables).await,
        "User" => user(&db, &req.variables).await,
        _ => error(StatusCode::BAD_REQUEST, "Unknown operation"),
    }
}

async fn login(db: &SharedDb, variables: &Value) -> GraphqlReply {
    let email = variables["email"].as_str().unwrap_or_default();
    let password = variables["password"].as_str().unwrap_or_default();

    let mut db = db.write().await;
    let valid = db.passwords.iter().any(|(e, p)| e == email && p == password);
    let Some(user) = db.users.iter().find(|u| u.email == email).cloned().filter(|_| valid) else {
        return error(StatusCode::OK, INVALID_CREDENTIALS);
    };
    let token = Uuid::new_v4().to_string();
    db.tokens.insert(token.clone());
    data("login", json!({ "token": token, "user": { "id": user.id, "email": user.email } }))
}

async fn create_user(db: &SharedDb, variables: &Value) -> GraphqlReply {
    let input: UserInput = match serde_json::from_value(variables["data"].clone()) {
        Ok(input) => input,
        Err(e) => return error(StatusCode::OK, &format!("Invalid input: {e}")),
    };
    if !matches!(input.role.to_uppercase().as_str(), "ADMIN" | "USER") {
        return error(StatusCode::OK, "Invalid role");
    }

    let mut db = db.write().await;
    if db.users.iter().any(|u| u.email.eq_ignore_ascii_case(&input.email)) {
        return error(StatusCode::OK, EMAIL_IN_USE);
    }
    let user = db.insert(input);
    data("createUser", json!(user))
}

async fn users(db: &SharedDb, variables: &Value) -> GraphqlReply {
    let page: PageInput = if variables["data"].is_null() {
        PageInput {
            offset: 0,
            limit: DEFAULT_LIMIT,
        }
    } else {
        match serde_json::from_value(variables["data"].clone()) {
            Ok(page) => page,
            Err(e) => return error(StatusCode::OK, &format!("Invalid page: {e}")),
        }
    };

    let db = db.read().await;
    let count = db.users.len() as u32;
    let nodes: Vec<Value> = db
        .users
        .iter()
        .skip(page.offset as usize)
        .take(page.limit as usize)
        .map(|u| json!({ "id": u.id, "name": u.name, "email": u.email }))
        .collect();
    data(
        "users",
        json!({
            "nodes": nodes,
            "count": count,
            "pageInfo": {
                "offset": page.offset,
                "limit": page.limit,
                "hasNextPage": page.offset.saturating_add(page.limit) < count,
                "hasPreviousPage": page.offset > 0,
            }
        }),
    )
}

async fn user(db: &SharedDb, variables: &Value) -> GraphqlReply {
    let id = variables["id"].as_str().unwrap_or_default();
    let db = db.read().await;
    let found = db.users.iter().find(|u| u.id == id).map(|u| json!(u));
    data("user", found.unwrap_or(Value::Null))
}
