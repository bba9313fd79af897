//! Domain-qualified user identifiers for directory binds.

/// Separator between login domain and username (`CORP\jdoe`).
pub const DOMAIN_SEPARATOR: char = '\\';

/// Qualify `username` with `login_domain`.
///
/// Usernames that already carry a domain, and any username when no domain
/// is configured, are returned as-is.
pub fn compose_external_id(username: &str, login_domain: &str) -> String {
    if login_domain.is_empty() || username.contains(DOMAIN_SEPARATOR) {
        return username.to_string();
    }
    format!("{login_domain}{DOMAIN_SEPARATOR}{username}")
}
