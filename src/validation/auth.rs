use serde_json::Value;

use super::{rules, Outcome};
use crate::auth::repo_types::Currency;

const EMAIL_REQUIRED: &str = "Email is required";
const EMAIL_INVALID: &str = "Please enter a valid email address";
const PASSWORD_REQUIRED: &str = "Password is required";

/// A registration payload that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub currency: Option<Currency>,
}

/// A login payload that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

pub fn register(payload: &Value) -> Outcome<RegisterInput> {
    let obj = rules::object(payload)?;

    let name = rules::required(obj, "name", "Name is required")?;
    let name = rules::filled("name", name, "Name is required")?;
    rules::min_chars(name, 2, "Name must be at least 2 characters long")?;

    let email = email_field(obj)?;

    let password = rules::required(obj, "password", PASSWORD_REQUIRED)?;
    let password = rules::filled("password", password, PASSWORD_REQUIRED)?;
    rules::min_chars(password, 6, "Password must be at least 6 characters long")?;

    let currency = obj
        .get("currency")
        .map(|v| {
            rules::one_of::<Currency>(v, "Currency must be one of the following: INR, USD, EUR, GBP")
        })
        .transpose()?;

    Ok(RegisterInput {
        name: name.to_string(),
        email,
        password: password.to_string(),
        currency,
    })
}

pub fn login(payload: &Value) -> Outcome<LoginInput> {
    let obj = rules::object(payload)?;
    let email = email_field(obj)?;
    let password = rules::required(obj, "password", PASSWORD_REQUIRED)?;
    let password = rules::filled("password", password, PASSWORD_REQUIRED)?;
    Ok(LoginInput {
        email,
        password: password.to_string(),
    })
}

fn email_field(obj: &rules::Payload) -> Outcome<String> {
    let email = rules::required(obj, "email", EMAIL_REQUIRED)?;
    let email = rules::non_blank("email", email, EMAIL_REQUIRED)?;
    rules::email(email, EMAIL_INVALID)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn register_err(payload: Value) -> String {
        register(&payload).unwrap_err().message().to_string()
    }

    fn login_err(payload: Value) -> String {
        login(&payload).unwrap_err().message().to_string()
    }

    #[test]
    fn register_accepts_valid_payload_and_normalizes_email() {
        let input = register(&json!({
            "name": "Anas Ahmad",
            "email": "AnasAhmad0239@Gmail.com",
            "password": "canttellyou"
        }))
        .unwrap();
        assert_eq!(input.email, "anasahmad0239@gmail.com");
        assert_eq!(input.name, "Anas Ahmad");
        assert_eq!(input.currency, None);
    }

    #[test]
    fn register_reads_optional_currency() {
        let input = register(&json!({
            "name": "Jo", "email": "jo@example.com", "password": "secret", "currency": "EUR"
        }))
        .unwrap();
        assert_eq!(input.currency, Some(Currency::EUR));
    }

    #[test]
    fn register_messages_per_field() {
        assert_eq!(
            register_err(json!({ "email": "e@test.com", "password": "secret" })),
            "Name is required"
        );
        assert_eq!(
            register_err(json!({ "name": "A", "email": "e@test.com", "password": "secret" })),
            "Name must be at least 2 characters long"
        );
        assert_eq!(
            register_err(json!({ "name": "Bad Email", "password": "secret" })),
            "Email is required"
        );
        assert_eq!(
            register_err(json!({ "name": "Bad Email", "email": "bademailcom", "password": "secret" })),
            "Please enter a valid email address"
        );
        assert_eq!(
            register_err(json!({ "name": "No Pass", "email": "e@test.com" })),
            "Password is required"
        );
        assert_eq!(
            register_err(json!({ "name": "Short", "email": "e@test.com", "password": "ab" })),
            "Password must be at least 6 characters long"
        );
        assert_eq!(
            register_err(json!({
                "name": "Cur", "email": "e@test.com", "password": "secret", "currency": "JPY"
            })),
            "Currency must be one of the following: INR, USD, EUR, GBP"
        );
    }

    #[test]
    fn register_reports_first_violation_in_declaration_order() {
        assert_eq!(
            register_err(json!({ "name": "A", "email": "nope", "password": "x" })),
            "Name must be at least 2 characters long"
        );
        assert_eq!(
            register_err(json!({ "name": "Okay", "email": "nope", "password": "x" })),
            "Please enter a valid email address"
        );
        assert_eq!(register_err(json!({})), "Name is required");
    }

    #[test]
    fn register_rejects_wrong_types() {
        assert_eq!(
            register_err(json!({ "name": 42, "email": "e@test.com", "password": "secret" })),
            "\"name\" must be a string"
        );
        assert_eq!(register_err(json!(["not", "an", "object"])), "\"value\" must be of type object");
    }

    #[test]
    fn login_messages() {
        assert_eq!(login_err(json!({ "password": "wrongpassword" })), "Email is required");
        assert_eq!(
            login_err(json!({ "email": "bademail", "password": "wrongpassword" })),
            "Please enter a valid email address"
        );
        assert_eq!(login_err(json!({ "email": "admin@gmail.com" })), "Password is required");
        assert_eq!(
            login_err(json!({ "email": "admin@gmail.com", "password": "" })),
            "Password is required"
        );
    }

    #[test]
    fn register_counts_whitespace_as_content() {
        let input = register(&json!({
            "name": " A", "email": "jo@example.com", "password": "      "
        }))
        .unwrap();
        assert_eq!(input.name, " A");
        assert_eq!(input.password, "      ");
        assert_eq!(
            register_err(json!({ "name": "Jo", "email": "jo@example.com", "password": "     " })),
            "Password must be at least 6 characters long"
        );
        assert_eq!(
            register_err(json!({ "name": "", "email": "jo@example.com", "password": "secret" })),
            "Name is required"
        );
    }

    #[test]
    fn login_accepts_whitespace_password() {
        let input = login(&json!({ "email": "admin@gmail.com", "password": "   " })).unwrap();
        assert_eq!(input.password, "   ");
    }

    #[test]
    fn login_does_not_apply_password_length() {
        let input = login(&json!({ "email": "Admin@Gmail.com", "password": "ab" })).unwrap();
        assert_eq!(input.email, "admin@gmail.com");
        assert_eq!(input.password, "ab");
    }
}
