//! External capabilities the sync run depends on.
//!
//! The publisher and reconciler only ever talk to the parameter store and the
//! identity service through these traits, so tests can swap in recording or
//! canned implementations.

pub mod aws;

use crate::error::Result;

/// The kind of parameter being stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterKind {
    /// Stored as a plain `String` parameter.
    Plain,
    /// Stored as a `SecureString` parameter.
    Secret,
}

impl ParameterKind {
    /// The parameter store's type name for this kind.
    pub fn type_name(&self) -> &'static str {
        match self {
            ParameterKind::Plain => "String",
            ParameterKind::Secret => "SecureString",
        }
    }
}

/// Idempotent upsert access to a remote key-value parameter store.
pub trait ParameterStore {
    /// Upsert one parameter. Failures are fatal to the run; callers do not
    /// retry.
    fn put(
        &self,
        name: &str,
        value: &str,
        kind: ParameterKind,
        overwrite: bool,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Derives a fully-qualified secret reference for a parameter name.
pub trait SecretResolver {
    /// Resolve `name` to a reference string a container runtime can fetch at
    /// launch. Each call performs its own identity lookup; results are not
    /// cached across keys.
    fn resolve(&self, name: &str) -> impl std::future::Future<Output = Result<String>> + Send;
}
