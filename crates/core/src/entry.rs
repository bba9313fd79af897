//! Directory entries as handed over by the directory client.
//!
//! An [`AttributeSet`] keeps attributes in the order they were received and
//! answers lookups first-match-wins, so a repeated attribute name never
//! shadows the earlier one.

use ldap3::SearchEntry;

use crate::config::SchemaConfig;
use crate::errors::PrincipalError;
use crate::principal::{resolve_principal, Principal};

/// Name of the multi-valued attribute listing an entry's object classes.
pub const OBJECT_CLASS_ATTRIBUTE: &str = "objectClass";

/// Ordered `(name, values)` pairs for a single directory entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeSet {
    attrs: Vec<(String, Vec<String>)>,
}

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`push`](Self::push).
    pub fn with<I, S>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(name, values);
        self
    }

    /// Append an attribute. Earlier attributes with the same name win.
    pub fn push<I, S>(&mut self, name: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attrs
            .push((name.into(), values.into_iter().map(Into::into).collect()));
    }

    /// All values of the first attribute called `name`.
    pub fn values(&self, name: &str) -> Option<&[String]> {
        self.attrs
            .iter()
            .find(|(attr, _)| attr == name)
            .map(|(_, values)| values.as_slice())
    }

    /// First value of `name`, which may be the empty string.
    pub fn first_value(&self, name: &str) -> Option<&str> {
        self.values(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// First value of `name`, treating an empty first value as absent.
    pub fn first_non_empty(&self, name: &str) -> Option<&str> {
        self.first_value(name).filter(|v| !v.is_empty())
    }

    /// Whether `name` is present with at least one value.
    pub fn has_values(&self, name: &str) -> bool {
        self.values(name).is_some_and(|values| !values.is_empty())
    }

    /// The entry's object classes, empty when the attribute is missing.
    pub fn object_classes(&self) -> &[String] {
        self.values(OBJECT_CLASS_ATTRIBUTE).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.attrs
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }
}

impl FromIterator<(String, Vec<String>)> for AttributeSet {
    fn from_iter<T: IntoIterator<Item = (String, Vec<String>)>>(iter: T) -> Self {
        Self {
            attrs: iter.into_iter().collect(),
        }
    }
}

/// Whether any `objectClass` value of `attrs` equals `object_class`.
pub fn has_object_class(attrs: &AttributeSet, object_class: &str) -> bool {
    attrs.object_classes().iter().any(|c| c == object_class)
}

/// A directory search result: DN plus string attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub dn: String,
    pub attrs: AttributeSet,
}

impl DirectoryEntry {
    pub fn new(dn: impl Into<String>, attrs: AttributeSet) -> Self {
        Self {
            dn: dn.into(),
            attrs,
        }
    }

    /// Resolve this entry with an explicit scope. See [`resolve_principal`].
    pub fn to_principal(
        &self,
        scope: &str,
        provider_name: &str,
        schema: &SchemaConfig,
    ) -> Result<Principal, PrincipalError> {
        resolve_principal(&self.attrs, &self.dn, scope, provider_name, schema)
    }
}

impl From<SearchEntry> for DirectoryEntry {
    /// Binary attributes are dropped. The client returns attributes as a hash
    /// map, so they are sorted by name to keep lookups deterministic.
    fn from(entry: SearchEntry) -> Self {
        let mut attrs: Vec<(String, Vec<String>)> = entry.attrs.into_iter().collect();
        attrs.sort_by(|a, b| a.0.cmp(&b.0));
        Self {
            dn: entry.dn,
            attrs: attrs.into_iter().collect(),
        }
    }
}
