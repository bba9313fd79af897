//! Principal resolution from directory entries.
//!
//! A principal's name must survive the entry moving around the directory
//! tree, so users are identified by the most stable value available:
//!
//! 1. the configured login attribute (`uid`, `sAMAccountName`)
//! 2. the configured name attribute (`cn`)
//! 3. the raw DN, which changes whenever the entry is moved
//!
//! Groups have no login-equivalent attribute and are always identified by DN.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::{DirectoryConfig, SchemaConfig};
use crate::entry::{has_object_class, AttributeSet, DirectoryEntry};
use crate::errors::{ConfigError, PrincipalError};
use crate::external_id::compose_external_id;

/// Separator between scope and identifier in a principal name.
pub const SCOPE_SEPARATOR: &str = "://";

/// Kind of directory object a principal stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrincipalType {
    User,
    Group,
}

impl PrincipalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrincipalType::User => "user",
            PrincipalType::Group => "group",
        }
    }
}

impl fmt::Display for PrincipalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Provider-agnostic identity record for a user or group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    /// `<scope>://<identifier>`, stable for users with a login or name value.
    pub principal_name: String,
    pub display_name: String,
    pub login_name: String,
    pub principal_type: PrincipalType,
    /// Name of the identity source that issued this principal.
    pub provider: String,
    /// Always true on this path: the entry is the authenticating subject or
    /// one of its groups.
    pub is_self: bool,
}

impl Principal {
    /// The identifier part of the principal name, without the scope.
    pub fn identifier(&self) -> &str {
        self.principal_name
            .split_once(SCOPE_SEPARATOR)
            .map_or(self.principal_name.as_str(), |(_, id)| id)
    }

    /// The scope part of the principal name.
    pub fn scope(&self) -> &str {
        self.principal_name
            .split_once(SCOPE_SEPARATOR)
            .map_or("", |(scope, _)| scope)
    }
}

/// Classify an entry by its object classes. The user class is checked first.
pub fn classify_entry(attrs: &AttributeSet, schema: &SchemaConfig) -> Option<PrincipalType> {
    if has_object_class(attrs, &schema.user_object_class) {
        Some(PrincipalType::User)
    } else if has_object_class(attrs, &schema.group_object_class) {
        Some(PrincipalType::Group)
    } else {
        None
    }
}

/// Build a [`Principal`] from a directory entry's attributes.
///
/// Fails with [`PrincipalError::UnknownEntryType`] when the entry is neither
/// a user nor a group under `schema`. Missing or empty naming attributes are
/// not errors; they fall back as described in the module docs.
pub fn resolve_principal(
    attrs: &AttributeSet,
    dn: &str,
    scope: &str,
    provider_name: &str,
    schema: &SchemaConfig,
) -> Result<Principal, PrincipalError> {
    let principal_type =
        classify_entry(attrs, schema).ok_or_else(|| PrincipalError::UnknownEntryType {
            dn: dn.to_string(),
            object_classes: attrs.object_classes().to_vec(),
        })?;

    let name_attribute = match principal_type {
        PrincipalType::User => &schema.user_name_attribute,
        PrincipalType::Group => &schema.group_name_attribute,
    };
    let account_name = attrs.first_value(name_attribute).unwrap_or_default();

    let (login_name, identifier) = match principal_type {
        PrincipalType::User => {
            let login_value = attrs
                .first_non_empty(&schema.user_login_attribute)
                .unwrap_or_default();
            let login_name = if login_value.is_empty() {
                account_name
            } else {
                login_value
            };
            let identifier = if !login_value.is_empty() {
                login_value
            } else if !account_name.is_empty() {
                debug!(
                    dn,
                    login_attribute = %schema.user_login_attribute,
                    "no login value, identifying user by name attribute"
                );
                account_name
            } else {
                warn!(
                    dn,
                    login_attribute = %schema.user_login_attribute,
                    name_attribute = %name_attribute,
                    "no login or name value, identifying user by DN (not stable across moves)"
                );
                dn
            };
            (login_name, identifier)
        }
        PrincipalType::Group => (account_name, dn),
    };

    let principal = Principal {
        principal_name: format!("{scope}{SCOPE_SEPARATOR}{identifier}"),
        display_name: account_name.to_string(),
        login_name: login_name.to_string(),
        principal_type,
        provider: provider_name.to_string(),
        is_self: true,
    };
    debug!(
        dn,
        principal_name = %principal.principal_name,
        principal_type = %principal_type,
        "resolved principal"
    );
    Ok(principal)
}

/// Principals from `incoming` whose names are not already in `existing`.
///
/// Duplicates inside `incoming` are collapsed as well; order is preserved.
pub fn dedup_principals(existing: &[Principal], incoming: Vec<Principal>) -> Vec<Principal> {
    let mut seen: HashSet<String> = existing
        .iter()
        .map(|p| p.principal_name.clone())
        .collect();
    incoming
        .into_iter()
        .filter(|p| seen.insert(p.principal_name.clone()))
        .collect()
}

// ---------------------------------------------------------------------------
// Configured resolver
// ---------------------------------------------------------------------------

/// Resolves entries for one configured identity source, picking the user or
/// group scope from the entry's classification.
#[derive(Debug, Clone)]
pub struct DirectoryResolver {
    config: DirectoryConfig,
}

impl DirectoryResolver {
    /// Validate `config` and wrap it.
    pub fn new(config: DirectoryConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &DirectoryConfig {
        &self.config
    }

    /// Resolve a search result into a principal.
    pub fn resolve(&self, entry: &DirectoryEntry) -> Result<Principal, PrincipalError> {
        let schema = &self.config.schema;
        let scope = match classify_entry(&entry.attrs, schema) {
            Some(PrincipalType::Group) => self.config.group_scope(),
            _ => self.config.user_scope(),
        };
        resolve_principal(&entry.attrs, &entry.dn, &scope, &self.config.provider, schema)
    }

    /// Username to bind with, qualified with the configured login domain.
    pub fn external_id(&self, username: &str) -> String {
        compose_external_id(username, self.config.login_domain.as_deref().unwrap_or(""))
    }
}
