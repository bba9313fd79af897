//! dirprincipal core library.
//!
//! Turns directory (LDAP-style) search results into provider-agnostic
//! principals with stable names, and provides the attribute name, filter and
//! bind-identifier helpers used around those searches. Nothing here performs
//! network I/O; the directory client and the authentication flow live in the
//! caller.

pub mod attr;
pub mod config;
pub mod entry;
pub mod errors;
pub mod external_id;
pub mod filter;
pub mod principal;

// Re-exports for convenience.
pub use attr::{is_valid_attr, sanitize_attr};
pub use config::{DirectoryConfig, SchemaConfig};
pub use entry::{AttributeSet, DirectoryEntry};
pub use errors::{ConfigError, CoreError, PrincipalError};
pub use external_id::compose_external_id;
pub use principal::{resolve_principal, DirectoryResolver, Principal, PrincipalType};
