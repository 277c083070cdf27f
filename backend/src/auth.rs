use shared::UserEntry;

pub const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Returns the username when both fields match a configured user exactly.
pub fn validate(users: &[UserEntry], username: &str, password: &str) -> Option<String> {
    users
        .iter()
        .find(|user| user.username == username && user.password == password)
        .map(|user| user.username.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn users() -> Vec<UserEntry> {
        vec![
            UserEntry {
                username: "admin".to_string(),
                password: "password123".to_string(),
            },
            UserEntry {
                username: "test@test.com".to_string(),
                password: "@password!".to_string(),
            },
        ]
    }

    #[test]
    fn accepts_exact_credentials() {
        assert_eq!(validate(&users(), "admin", "password123").as_deref(), Some("admin"));
        assert_eq!(
            validate(&users(), "test@test.com", "@password!").as_deref(),
            Some("test@test.com")
        );
    }

    #[test]
    fn rejects_wrong_or_partial_credentials() {
        assert_eq!(validate(&users(), "admin", "password456"), None);
        assert_eq!(validate(&users(), "Admin", "password123"), None);
        assert_eq!(validate(&users(), "admin ", "password123"), None);
        assert_eq!(validate(&[], "admin", "password123"), None);
    }
}
