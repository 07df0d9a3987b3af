//! Field validation for the login and user-creation forms.
//!
//! `validate` is pure: every rule for every field of the form kind runs, and
//! the returned `ErrorSet` holds one message per failing field. The calendar
//! date is a parameter so birth-date checks are deterministic.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::form::FormKind;
use crate::types::Role;

static PHONE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{10,11}$").expect("valid regex"));
static EMAIL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));

pub const BIRTH_DATE_FORMAT: &str = "%Y-%m-%d";

pub const NAME_MESSAGE: &str = "O nome deve conter pelo menos 2 palavras distintas.";
pub const PHONE_MESSAGE: &str = "O telefone deve conter apenas dígitos e ter 10 ou 11 dígitos.";
pub const BIRTH_DATE_MISSING_MESSAGE: &str = "Por favor, digite uma data de nascimento válida.";
pub const BIRTH_DATE_FUTURE_MESSAGE: &str = "A data de nascimento não pode ser no futuro.";
pub const EMAIL_MISSING_MESSAGE: &str = "Por favor, digite o seu email.";
pub const EMAIL_MESSAGE: &str = "Por favor, digite um email válido.";
pub const ROLE_MESSAGE: &str = "O cargo deve ser um dos seguintes: ADMINISTRADOR, USUÁRIO.";
pub const PASSWORD_MISSING_MESSAGE: &str = "Por favor, digite a sua senha.";
pub const PASSWORD_LENGTH_MESSAGE: &str = "A senha deve ter pelo menos 7 caracteres.";
pub const PASSWORD_CHARSET_MESSAGE: &str = "A senha deve conter pelo menos um dígito e uma letra.";

pub const PASSWORD_MIN_LEN: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldName {
    Name,
    Phone,
    BirthDate,
    Email,
    Role,
    Password,
}

impl FieldName {
    /// Input name used by the presentation layer.
    pub fn as_str(self) -> &'static str {
        match self {
            FieldName::Name => "name",
            FieldName::Phone => "phone",
            FieldName::BirthDate => "birthDate",
            FieldName::Email => "email",
            FieldName::Role => "role",
            FieldName::Password => "password",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current raw values of a form's inputs. Unset fields read as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSet {
    values: BTreeMap<FieldName, String>,
}

impl FieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: FieldName, value: impl Into<String>) {
        self.values.insert(name, value.into());
    }

    pub fn with(mut self, name: FieldName, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: FieldName) -> &str {
        self.values.get(&name).map(String::as_str).unwrap_or("")
    }
}

/// Slot in an `ErrorSet`: one per field, plus a submission-level slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorKey {
    Field(FieldName),
    Server,
}

/// Messages keyed by field. A missing key means the field is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorSet {
    messages: BTreeMap<ErrorKey, String>,
}

impl ErrorSet {
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn field(&self, name: FieldName) -> Option<&str> {
        self.messages.get(&ErrorKey::Field(name)).map(String::as_str)
    }

    pub fn server(&self) -> Option<&str> {
        self.messages.get(&ErrorKey::Server).map(String::as_str)
    }

    pub fn insert(&mut self, key: ErrorKey, message: impl Into<String>) {
        self.messages.insert(key, message.into());
    }

    pub fn set_server(&mut self, message: impl Into<String>) {
        self.insert(ErrorKey::Server, message);
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (ErrorKey, &str)> {
        self.messages.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Names of the failing fields, in field order.
    pub fn failing_fields(&self) -> Vec<FieldName> {
        self.messages
            .keys()
            .filter_map(|key| match key {
                ErrorKey::Field(name) => Some(*name),
                ErrorKey::Server => None,
            })
            .collect()
    }
}

/// Validate `fields` against the rules of `kind` as of `today`.
pub fn validate(fields: &FieldSet, kind: FormKind, today: NaiveDate) -> ErrorSet {
    let mut errors = ErrorSet::default();
    for &name in kind.fields() {
        let value = fields.get(name);
        let failure = match name {
            FieldName::Name => check_name(value),
            FieldName::Phone => check_phone(value),
            FieldName::BirthDate => check_birth_date(value, today),
            FieldName::Email => check_email(value),
            FieldName::Role => check_role(value),
            FieldName::Password => check_password(value),
        };
        if let Some(message) = failure {
            errors.insert(ErrorKey::Field(name), message);
        }
    }
    errors
}

/// `validate` against the local calendar date.
pub fn validate_now(fields: &FieldSet, kind: FormKind) -> ErrorSet {
    validate(fields, kind, chrono::Local::now().date_naive())
}

fn check_name(value: &str) -> Option<&'static str> {
    (value.split_whitespace().count() < 2).then_some(NAME_MESSAGE)
}

fn check_phone(value: &str) -> Option<&'static str> {
    (!PHONE.is_match(value)).then_some(PHONE_MESSAGE)
}

fn check_birth_date(value: &str, today: NaiveDate) -> Option<&'static str> {
    match NaiveDate::parse_from_str(value.trim(), BIRTH_DATE_FORMAT) {
        Err(_) => Some(BIRTH_DATE_MISSING_MESSAGE),
        Ok(date) if date > today => Some(BIRTH_DATE_FUTURE_MESSAGE),
        Ok(_) => None,
    }
}

fn check_email(value: &str) -> Option<&'static str> {
    if value.trim().is_empty() {
        Some(EMAIL_MISSING_MESSAGE)
    } else if !EMAIL.is_match(value) {
        Some(EMAIL_MESSAGE)
    } else {
        None
    }
}

fn check_role(value: &str) -> Option<&'static str> {
    value.parse::<Role>().is_err().then_some(ROLE_MESSAGE)
}

fn check_password(value: &str) -> Option<&'static str> {
    if value.trim().is_empty() {
        Some(PASSWORD_MISSING_MESSAGE)
    } else if value.chars().count() < PASSWORD_MIN_LEN {
        Some(PASSWORD_LENGTH_MESSAGE)
    } else if !value.chars().any(|c| c.is_ascii_digit()) || !value.chars().any(|c| c.is_ascii_alphabetic()) {
        Some(PASSWORD_CHARSET_MESSAGE)
    } else {
        None
    }
}
