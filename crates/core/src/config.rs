//! TOML-based configuration for a directory identity source.
//!
//! ```toml
//! provider = "openldap"
//! login_domain = "CORP"
//!
//! [schema]
//! user_object_class = "inetOrgPerson"
//! user_name_attribute = "cn"
//! user_login_attribute = "uid"
//! group_object_class = "groupOfNames"
//! group_name_attribute = "cn"
//! ```
//!
//! Schema keys also accept their camelCase spelling (`userObjectClass`).

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::attr::is_valid_attr;
use crate::errors::ConfigError;

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

/// How to read users and groups out of directory entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaConfig {
    /// `objectClass` value marking a user entry.
    #[serde(alias = "userObjectClass")]
    pub user_object_class: String,

    /// Attribute holding a user's display name.
    #[serde(alias = "userNameAttribute")]
    pub user_name_attribute: String,

    /// Attribute holding a user's login, which should not change when the
    /// entry moves.
    #[serde(alias = "userLoginAttribute")]
    pub user_login_attribute: String,

    /// `objectClass` value marking a group entry.
    #[serde(alias = "groupObjectClass")]
    pub group_object_class: String,

    /// Attribute holding a group's display and login name.
    #[serde(alias = "groupNameAttribute")]
    pub group_name_attribute: String,
}

impl SchemaConfig {
    /// OpenLDAP defaults (`inetOrgPerson` users keyed by `uid`).
    pub fn openldap() -> Self {
        Self {
            user_object_class: "inetOrgPerson".into(),
            user_name_attribute: "cn".into(),
            user_login_attribute: "uid".into(),
            group_object_class: "groupOfNames".into(),
            group_name_attribute: "cn".into(),
        }
    }

    /// Active Directory defaults (`person` users keyed by `sAMAccountName`).
    pub fn active_directory() -> Self {
        Self {
            user_object_class: "person".into(),
            user_name_attribute: "name".into(),
            user_login_attribute: "sAMAccountName".into(),
            group_object_class: "group".into(),
            group_name_attribute: "name".into(),
        }
    }

    /// Check that object classes are set and attribute names are usable in
    /// search filters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("schema.user_object_class", &self.user_object_class),
            ("schema.group_object_class", &self.group_object_class),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: field.into(),
                    detail: "object class must not be empty".into(),
                });
            }
        }

        for (field, value) in [
            ("schema.user_name_attribute", &self.user_name_attribute),
            ("schema.user_login_attribute", &self.user_login_attribute),
            ("schema.group_name_attribute", &self.group_name_attribute),
        ] {
            check_attr(field, value)?;
        }

        Ok(())
    }
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self::openldap()
    }
}

fn check_attr(field: &str, value: &str) -> Result<(), ConfigError> {
    if is_valid_attr(value) {
        return Ok(());
    }
    Err(ConfigError::InvalidValue {
        field: field.into(),
        detail: format!("'{value}' is not a valid attribute name or OID"),
    })
}

// ---------------------------------------------------------------------------
// Identity source
// ---------------------------------------------------------------------------

/// One directory-backed identity source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// Provider name stamped on every principal (e.g. `openldap`).
    pub provider: String,

    /// Scope for user principals. Defaults to `<provider>_user`.
    #[serde(default)]
    pub user_scope: Option<String>,

    /// Scope for group principals. Defaults to `<provider>_group`.
    #[serde(default)]
    pub group_scope: Option<String>,

    /// Domain prepended to bare usernames before binding (`CORP\jdoe`).
    #[serde(default)]
    pub login_domain: Option<String>,

    /// Attribute listing the groups an entry belongs to.
    #[serde(default = "default_member_of")]
    pub member_of_attribute: String,

    #[serde(default)]
    pub schema: SchemaConfig,
}

fn default_member_of() -> String {
    "memberOf".into()
}

impl DirectoryConfig {
    /// Config for `provider` with default scopes and the given schema.
    pub fn new(provider: impl Into<String>, schema: SchemaConfig) -> Self {
        Self {
            provider: provider.into(),
            user_scope: None,
            group_scope: None,
            login_domain: None,
            member_of_attribute: default_member_of(),
            schema,
        }
    }

    /// Load a [`DirectoryConfig`] from a TOML file. The result is not
    /// validated; call [`validate`](Self::validate) afterwards.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        info!(path = %path.display(), "loading directory configuration");

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parse a [`DirectoryConfig`] from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: DirectoryConfig =
            toml::from_str(contents).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        debug!(provider = %config.provider, "directory configuration parsed");
        Ok(config)
    }

    /// Convenience: load and validate in one call.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config = Self::load_from_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate that required fields are present and attribute names are
    /// safe to use in filters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.provider.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "provider".into(),
                detail: "provider must not be empty".into(),
            });
        }
        for (field, scope) in [
            ("user_scope", &self.user_scope),
            ("group_scope", &self.group_scope),
        ] {
            if let Some(scope) = scope {
                if scope.is_empty() || scope.contains(crate::principal::SCOPE_SEPARATOR) {
                    return Err(ConfigError::InvalidValue {
                        field: field.into(),
                        detail: format!("'{scope}' is not a usable scope"),
                    });
                }
            }
        }
        check_attr("member_of_attribute", &self.member_of_attribute)?;
        self.schema.validate()
    }

    pub fn user_scope(&self) -> String {
        self.user_scope
            .clone()
            .unwrap_or_else(|| format!("{}_user", self.provider))
    }

    pub fn group_scope(&self) -> String {
        self.group_scope
            .clone()
            .unwrap_or_else(|| format!("{}_group", self.provider))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_defaults() {
        let config = DirectoryConfig::from_toml_str(r#"provider = "openldap""#).unwrap();
        assert_eq!(config.schema, SchemaConfig::openldap());
        assert_eq!(config.member_of_attribute, "memberOf");
        assert_eq!(config.user_scope(), "openldap_user");
        assert_eq!(config.group_scope(), "openldap_group");
        assert!(config.login_domain.is_none());
        config.validate().unwrap();
    }

    #[test]
    fn test_full_config() {
        let toml_str = r#"
provider = "activedirectory"
user_scope = "ad_user"
login_domain = "CORP"
member_of_attribute = "memberOf"

[schema]
user_object_class = "user"
user_name_attribute = "cn"
user_login_attribute = "sAMAccountName"
group_object_class = "group"
group_name_attribute = "cn"
"#;
        let config = DirectoryConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(config.user_scope(), "ad_user");
        assert_eq!(config.group_scope(), "activedirectory_group");
        assert_eq!(config.login_domain.as_deref(), Some("CORP"));
        assert_eq!(config.schema.user_login_attribute, "sAMAccountName");
        config.validate().unwrap();
    }

    #[test]
    fn test_camel_case_schema_keys() {
        let toml_str = r#"
provider = "openldap"

[schema]
userObjectClass = "person"
userNameAttribute = "cn"
userLoginAttribute = "uid"
groupObjectClass = "groupOfNames"
groupNameAttribute = "cn"
"#;
        let config = DirectoryConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(config.schema.user_object_class, "person");
        assert_eq!(config.schema.user_login_attribute, "uid");
    }

    #[test]
    fn test_parse_error() {
        let result = DirectoryConfig::from_toml_str("provider = ");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));

        let result = DirectoryConfig::from_toml_str("login_domain = \"CORP\"");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_invalid_attribute_rejected() {
        let mut config = DirectoryConfig::new("openldap", SchemaConfig::openldap());
        config.schema.user_login_attribute = "u(id)".into();
        match config.validate() {
            Err(ConfigError::InvalidValue { field, .. }) => {
                assert_eq!(field, "schema.user_login_attribute");
            }
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn test_oid_attribute_accepted() {
        let mut config = DirectoryConfig::new("openldap", SchemaConfig::openldap());
        config.schema.user_name_attribute = "2.5.4.3".into();
        config.validate().unwrap();
    }

    #[test]
    fn test_empty_object_class_rejected() {
        let mut schema = SchemaConfig::active_directory();
        schema.group_object_class = " ".into();
        assert!(matches!(
            schema.validate(),
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "schema.group_object_class"
        ));
    }

    #[test]
    fn test_empty_provider_rejected() {
        let config = DirectoryConfig::new("", SchemaConfig::openldap());
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "provider"
        ));
    }

    #[test]
    fn test_bad_scope_rejected() {
        let mut config = DirectoryConfig::new("openldap", SchemaConfig::openldap());
        config.group_scope = Some("ldap://groups".into());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("directory.toml");
        std::fs::write(&path, "provider = \"openldap\"\nlogin_domain = \"EXAMPLE\"\n").unwrap();

        let config = DirectoryConfig::load(&path).unwrap();
        assert_eq!(config.provider, "openldap");
        assert_eq!(config.login_domain.as_deref(), Some("EXAMPLE"));
    }

    #[test]
    fn test_load_nonexistent() {
        let result = DirectoryConfig::load("/nonexistent/directory.toml");
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }
}
