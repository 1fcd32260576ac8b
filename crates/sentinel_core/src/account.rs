//! Demo sign-in helpers. The remembered email never touches the verdict pipeline.

pub const NOT_SIGNED_IN_LABEL: &str = "Not signed in (demo)";

pub fn normalize_login_email(raw: &str) -> String {
    raw.trim().to_string()
}

pub fn signed_in_label(email: Option<&str>) -> String {
    match email.filter(|email| !email.is_empty()) {
        Some(email) => format!("Signed in as: {email}"),
        None => NOT_SIGNED_IN_LABEL.to_string(),
    }
}
