//! Input validation for contact payloads.
//!
//! Validation runs on the raw request body, before CPF normalization, and
//! reports at most one reason per field. Uniqueness is not checked here
//! because it needs the store; see [`crate::resource`].

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::cpf;

pub const NAME_MAX_LEN: usize = 255;
pub const EMAIL_MAX_LEN: usize = 255;

// ─── Payload ─────────────────────────────────────────────────────────────────

/// A single JSON field as submitted, before any interpretation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Field {
  /// The key was absent from the body.
  #[default]
  Missing,
  /// The key was present with a `null` value.
  Null,
  Text(String),
  /// Present, but a number, bool, array or object.
  NotText,
}

impl<'de> Deserialize<'de> for Field {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
      Value::Null => Self::Null,
      Value::String(s) => Self::Text(s),
      _ => Self::NotText,
    })
  }
}

impl From<&str> for Field {
  fn from(s: &str) -> Self { Self::Text(s.to_owned()) }
}

/// The body of a create or update request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContactPayload {
  pub name:  Field,
  pub email: Field,
  pub cpf:   Field,
}

impl ContactPayload {
  /// A payload with all three fields present as text.
  pub fn new(name: &str, email: &str, cpf: &str) -> Self {
    Self { name: name.into(), email: email.into(), cpf: cpf.into() }
  }
}

// ─── Errors ──────────────────────────────────────────────────────────────────

/// Failing fields mapped to human-readable reasons.
///
/// Serialises as `{"field": ["reason", ...], ...}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
  pub fn new() -> Self { Self::default() }

  pub fn add(&mut self, field: &str, reason: impl Into<String>) {
    self.0.entry(field.to_owned()).or_default().push(reason.into());
  }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  pub fn contains(&self, field: &str) -> bool { self.0.contains_key(field) }

  /// Names of the failing fields, in lexical order.
  pub fn fields(&self) -> impl Iterator<Item = &str> { self.0.keys().map(String::as_str) }

  pub fn reasons(&self, field: &str) -> &[String] {
    self.0.get(field).map(Vec::as_slice).unwrap_or_default()
  }
}

impl fmt::Display for ValidationErrors {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut first = true;
    for (field, reasons) in &self.0 {
      for reason in reasons {
        if !first {
          f.write_str("; ")?;
        }
        write!(f, "{field}: {reason}")?;
        first = false;
      }
    }
    Ok(())
  }
}

// ─── Validation ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
  /// Every field is required.
  Create,
  /// Absent fields are skipped; present ones must be valid.
  Update,
}

/// Fields that passed validation, trimmed. `None` means "not supplied"
/// (update only). `cpf` is still in its raw, possibly punctuated form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidatedFields {
  pub name:  Option<String>,
  pub email: Option<String>,
  pub cpf:   Option<String>,
}

/// Fields of a valid create request; every one is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateFields {
  pub name:  String,
  pub email: String,
  /// Raw, possibly punctuated.
  pub cpf:   String,
}

/// Create-mode validation: a missing field is always reported, so success
/// carries all three values.
pub fn validate_create(payload: &ContactPayload) -> Result<CreateFields, ValidationErrors> {
  let mut errors = ValidationErrors::new();

  let name = check_field(&mut errors, "name", &payload.name, Mode::Create, check_name);
  let email = check_field(&mut errors, "email", &payload.email, Mode::Create, check_email);
  let cpf = check_field(&mut errors, "cpf", &payload.cpf, Mode::Create, check_cpf);

  match (name, email, cpf) {
    (Some(name), Some(email), Some(cpf)) if errors.is_empty() => {
      Ok(CreateFields { name, email, cpf })
    }
    _ => Err(errors),
  }
}

pub fn validate(
  payload: &ContactPayload,
  mode: Mode,
) -> Result<ValidatedFields, ValidationErrors> {
  let mut errors = ValidationErrors::new();

  let fields = ValidatedFields {
    name:  check_field(&mut errors, "name", &payload.name, mode, check_name),
    email: check_field(&mut errors, "email", &payload.email, mode, check_email),
    cpf:   check_field(&mut errors, "cpf", &payload.cpf, mode, check_cpf),
  };

  if errors.is_empty() { Ok(fields) } else { Err(errors) }
}

fn check_field(
  errors: &mut ValidationErrors,
  field: &str,
  value: &Field,
  mode: Mode,
  rules: fn(&str) -> Result<(), String>,
) -> Option<String> {
  let text = match value {
    Field::Missing if mode == Mode::Update => return None,
    Field::Text(s) if !s.trim().is_empty() => s.trim(),
    Field::NotText => {
      errors.add(field, format!("The {field} field must be a string."));
      return None;
    }
    Field::Missing | Field::Null | Field::Text(_) => {
      errors.add(field, format!("The {field} field is required."));
      return None;
    }
  };

  match rules(text) {
    Ok(()) => Some(text.to_owned()),
    Err(reason) => {
      errors.add(field, reason);
      None
    }
  }
}

fn too_long(field: &str, max: usize) -> String {
  format!("The {field} field must not be greater than {max} characters.")
}

fn check_name(value: &str) -> Result<(), String> {
  if value.chars().count() > NAME_MAX_LEN {
    return Err(too_long("name", NAME_MAX_LEN));
  }
  Ok(())
}

fn check_email(value: &str) -> Result<(), String> {
  if value.chars().count() > EMAIL_MAX_LEN {
    return Err(too_long("email", EMAIL_MAX_LEN));
  }
  if !is_valid_email(value) {
    return Err("The email field must be a valid email address.".to_owned());
  }
  Ok(())
}

fn check_cpf(value: &str) -> Result<(), String> {
  if value.chars().count() > cpf::MAX_LEN {
    return Err(too_long("cpf", cpf::MAX_LEN));
  }
  if !cpf::is_acceptable_raw(value) {
    return Err("The cpf may only contain digits and optional punctuation.".to_owned());
  }
  if cpf::normalize(value).is_empty() {
    return Err("The cpf must contain at least one digit.".to_owned());
  }
  Ok(())
}

/// `local@domain` where the domain has at least two dot-separated labels.
pub fn is_valid_email(value: &str) -> bool {
  let Some((local, domain)) = value.split_once('@') else {
    return false;
  };

  let local_ok = !local.is_empty()
    && local.len() <= 64
    && !local.starts_with('.')
    && !local.ends_with('.')
    && !local.contains("..")
    && local
      .chars()
      .all(|c| !c.is_whitespace() && !c.is_control() && !matches!(c, '@' | '(' | ')' | ',' | ':' | ';' | '<' | '>' | '[' | ']' | '\\' | '"'));

  let labels: Vec<&str> = domain.split('.').collect();
  let domain_ok = labels.len() >= 2
    && labels.iter().all(|label| {
      !label.is_empty()
        && label.len() <= 63
        && !label.starts_with('-')
        && !label.ends_with('-')
        && label.chars().all(|c| c.is_alphanumeric() || c == '-')
    });

  local_ok && domain_ok
}

#[cfg(test)]
mod tests {
  use super::*;

  fn payload(json: &str) -> ContactPayload {
    serde_json::from_str(json).unwrap()
  }

  #[test]
  fn field_states_from_json() {
    let p = payload(r#"{"name": null, "email": 42, "cpf": "1"}"#);
    assert_eq!(p.name, Field::Null);
    assert_eq!(p.email, Field::NotText);
    assert_eq!(p.cpf, Field::Text("1".into()));

    let p = payload("{}");
    assert_eq!(p.name, Field::Missing);
  }

  #[test]
  fn empty_create_cites_exactly_the_three_fields() {
    let errors = validate_create(&payload("{}")).unwrap_err();
    assert_eq!(errors.fields().collect::<Vec<_>>(), ["cpf", "email", "name"]);
    assert_eq!(errors.reasons("name"), ["The name field is required."]);
  }

  #[test]
  fn create_yields_every_field() {
    let fields =
      validate_create(&ContactPayload::new("Ana", "ana@example.com", "1.2-3")).unwrap();
    assert_eq!(
      fields,
      CreateFields {
        name:  "Ana".into(),
        email: "ana@example.com".into(),
        cpf:   "1.2-3".into(),
      }
    );

    let errors = validate_create(&payload(r#"{"name": "Ana"}"#)).unwrap_err();
    assert_eq!(errors.fields().collect::<Vec<_>>(), ["cpf", "email"]);
  }

  #[test]
  fn empty_update_is_accepted() {
    let fields = validate(&payload("{}"), Mode::Update).unwrap();
    assert_eq!(fields, ValidatedFields::default());
  }

  #[test]
  fn present_but_blank_fails_on_update() {
    let errors =
      validate(&payload(r#"{"name": "   ", "email": null}"#), Mode::Update).unwrap_err();
    assert!(errors.contains("name"));
    assert!(errors.contains("email"));
    assert!(!errors.contains("cpf"));
  }

  #[test]
  fn non_string_is_rejected() {
    let errors = validate(&payload(r#"{"cpf": 12345678900}"#), Mode::Update).unwrap_err();
    assert_eq!(errors.reasons("cpf"), ["The cpf field must be a string."]);
  }

  #[test]
  fn values_are_trimmed_and_cpf_kept_raw() {
    let fields = validate(
      &ContactPayload::new("  John Doe ", " john@example.com", "123.456.789-00 "),
      Mode::Create,
    )
    .unwrap();
    assert_eq!(fields.name.as_deref(), Some("John Doe"));
    assert_eq!(fields.email.as_deref(), Some("john@example.com"));
    assert_eq!(fields.cpf.as_deref(), Some("123.456.789-00"));
  }

  #[test]
  fn length_limits() {
    let long_name = "a".repeat(NAME_MAX_LEN + 1);
    let long_cpf = "1".repeat(cpf::MAX_LEN + 1);
    let errors = validate(
      &ContactPayload::new(&long_name, "a@example.com", &long_cpf),
      Mode::Create,
    )
    .unwrap_err();
    assert_eq!(errors.fields().collect::<Vec<_>>(), ["cpf", "name"]);

    let max_name = "é".repeat(NAME_MAX_LEN);
    assert!(validate(&ContactPayload::new(&max_name, "a@example.com", "1"), Mode::Create).is_ok());
  }

  #[test]
  fn cpf_charset_and_digits() {
    let errors = validate(&ContactPayload::new("A", "a@example.com", "123abc"), Mode::Create)
      .unwrap_err();
    assert_eq!(
      errors.reasons("cpf"),
      ["The cpf may only contain digits and optional punctuation."]
    );

    let errors =
      validate(&ContactPayload::new("A", "a@example.com", "..-"), Mode::Create).unwrap_err();
    assert_eq!(errors.reasons("cpf"), ["The cpf must contain at least one digit."]);
  }

  #[test]
  fn email_syntax() {
    for ok in ["john@example.com", "first.last+tag@sub.example.com.br", "x@a-b.io"] {
      assert!(is_valid_email(ok), "{ok}");
    }
    for bad in [
      "plainaddress",
      "@example.com",
      "john@",
      "john@example",
      "john@@example.com",
      "jo hn@example.com",
      "john@-example.com",
      "john@example..com",
      ".john@example.com",
    ] {
      assert!(!is_valid_email(bad), "{bad}");
    }
  }

  #[test]
  fn display_lists_every_reason() {
    let errors = validate(&payload(r#"{"email": "nope"}"#), Mode::Update).unwrap_err();
    assert_eq!(
      errors.to_string(),
      "email: The email field must be a valid email address."
    );
  }
}
