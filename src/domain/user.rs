use super::Violations;
use crate::constants::users::{MIN_PASSWORD_LENGTH, MIN_USERNAME_LENGTH};

/// Candidate user as received from a client, before validation.
#[derive(Debug, Clone, Default)]
pub struct UserDraft {
    pub username: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
}

/// A user that passed the payload checks. The plaintext password only lives
/// here until it has been hashed.
#[derive(Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub name: String,
    pub password: String,
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("username", &self.username)
            .field("name", &self.name)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Checks a creation payload, stopping at the first failure: password first,
/// then username. The username is stored trimmed. Username uniqueness needs the store and is checked by the
/// user service afterwards.
pub fn validate_new_user(draft: UserDraft) -> Result<NewUser, Violations> {
    let password = match draft.password {
        Some(password) if password.chars().count() >= MIN_PASSWORD_LENGTH => password,
        Some(_) => {
            return Err(Violations::single(
                "password",
                format!("password must be at least {MIN_PASSWORD_LENGTH} characters long"),
            ));
        }
        None => return Err(Violations::single("password", "password is required")),
    };

    let username = draft.username.unwrap_or_default().trim().to_string();
    if username.chars().count() < MIN_USERNAME_LENGTH {
        return Err(Violations::single(
            "username",
            format!("username must be at least {MIN_USERNAME_LENGTH} characters long"),
        ));
    }

    Ok(NewUser {
        username,
        name: draft.name.unwrap_or_default(),
        password,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(username: &str, password: Option<&str>) -> UserDraft {
        UserDraft {
            username: Some(username.to_string()),
            name: Some("Ana Banana".to_string()),
            password: password.map(str::to_string),
        }
    }

    #[test]
    fn accepts_valid_user() {
        let user = validate_new_user(draft("lubenica", Some("123456"))).unwrap();
        assert_eq!(user.username, "lubenica");
        assert_eq!(user.name, "Ana Banana");
    }

    #[test]
    fn missing_password_is_rejected() {
        let violations = validate_new_user(draft("jagodicabobica", None)).unwrap_err();
        assert_eq!(violations.as_slice()[0].field, "password");
    }

    #[test]
    fn short_password_is_rejected() {
        let violations = validate_new_user(draft("jagodicabobica", Some("12"))).unwrap_err();
        assert_eq!(violations.as_slice()[0].field, "password");
    }

    #[test]
    fn short_username_is_rejected() {
        let violations = validate_new_user(draft("ab", Some("123456"))).unwrap_err();
        assert_eq!(violations.as_slice()[0].field, "username");
    }

    #[test]
    fn username_is_trimmed() {
        let user = validate_new_user(draft("  lubenica ", Some("123456"))).unwrap();
        assert_eq!(user.username, "lubenica");

        let violations = validate_new_user(draft("  ab  ", Some("123456"))).unwrap_err();
        assert_eq!(violations.as_slice()[0].field, "username");
    }

    #[test]
    fn password_is_checked_before_username() {
        let violations = validate_new_user(draft("ab", None)).unwrap_err();
        assert_eq!(violations.as_slice().len(), 1);
        assert_eq!(violations.as_slice()[0].field, "password");
    }

    #[test]
    fn debug_output_hides_password() {
        let user = validate_new_user(draft("lubenica", Some("secret-pass"))).unwrap();
        assert!(!format!("{user:?}").contains("secret-pass"));
    }
}
