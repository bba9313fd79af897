//! Search filter and attribute list construction.
//!
//! Attribute names are passed through [`sanitize_attr`] and assertion values
//! through RFC 4515 escaping, so configured names and user-supplied input
//! cannot change the structure of the generated filter.

use ldap3::ldap_escape;

use crate::attr::sanitize_attr;
use crate::config::SchemaConfig;
use crate::entry::OBJECT_CLASS_ATTRIBUTE;

/// Escape a filter assertion value (`*`, `(`, `)`, `\` and NUL).
pub fn escape_filter_value(value: &str) -> String {
    ldap_escape(value).into_owned()
}

/// `(<attr>=<value>)` with the attribute sanitized and the value escaped.
pub fn equality_filter(attr: &str, value: &str) -> String {
    format!("({}={})", sanitize_attr(attr), escape_filter_value(value))
}

/// `(objectClass=<class>)`.
pub fn object_class_filter(object_class: &str) -> String {
    equality_filter(OBJECT_CLASS_ATTRIBUTE, object_class)
}

/// Filter matching the user whose login attribute equals `username`.
pub fn user_login_filter(schema: &SchemaConfig, username: &str) -> String {
    format!(
        "(&{}{})",
        object_class_filter(&schema.user_object_class),
        equality_filter(&schema.user_login_attribute, username)
    )
}

/// Filter matching every group entry.
pub fn group_filter(schema: &SchemaConfig) -> String {
    object_class_filter(&schema.group_object_class)
}

/// Attributes to request when searching for a user.
pub fn user_search_attributes(member_of_attribute: &str, schema: &SchemaConfig) -> Vec<String> {
    attribute_list(&[
        member_of_attribute,
        OBJECT_CLASS_ATTRIBUTE,
        schema.user_object_class.as_str(),
        schema.user_login_attribute.as_str(),
        schema.user_name_attribute.as_str(),
    ])
}

/// Attributes to request when searching for a group.
pub fn group_search_attributes(member_of_attribute: &str, schema: &SchemaConfig) -> Vec<String> {
    attribute_list(&[
        member_of_attribute,
        OBJECT_CLASS_ATTRIBUTE,
        schema.group_object_class.as_str(),
        schema.user_login_attribute.as_str(),
        schema.group_name_attribute.as_str(),
    ])
}

fn attribute_list(names: &[&str]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        let name = sanitize_attr(name);
        if !name.is_empty() && !out.contains(&name) {
            out.push(name);
        }
    }
    out
}
