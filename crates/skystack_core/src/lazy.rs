//! Deferred name resolution.
//!
//! Some resource names are not known when a configuration is assembled, only
//! when it is rendered. A [`LazyName`] carries either a concrete value or a
//! [`NameRequest`] token that is resolved explicitly, at render time, against
//! a [`NamingContext`].

use serde::{Deserialize, Serialize};
use tracing::debug;

/// A name that is either known up front or derived at render time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LazyName {
    /// Concrete value supplied by the caller.
    Resolved(String),
    /// Placeholder resolved against the naming context when rendering.
    Deferred(NameRequest),
}

impl LazyName {
    /// Resolve to a concrete string. Deterministic: the same context always
    /// yields the same name.
    pub fn resolve(&self, ctx: &NamingContext) -> String {
        match self {
            LazyName::Resolved(name) => name.clone(),
            LazyName::Deferred(request) => {
                let name = ctx.unique_name(request.max_length, request.separator);
                debug!("Resolved deferred name to '{}'", name);
                name
            }
        }
    }

    /// The concrete value, if one was supplied up front.
    pub fn as_resolved(&self) -> Option<&str> {
        match self {
            LazyName::Resolved(name) => Some(name),
            LazyName::Deferred(_) => None,
        }
    }
}

/// Parameters for a deferred name derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameRequest {
    /// Maximum length of the generated name.
    pub max_length: usize,
    /// Separator joining the context path segments.
    pub separator: char,
}

impl NameRequest {
    pub fn new(max_length: usize, separator: char) -> Self {
        Self {
            max_length,
            separator,
        }
    }
}

/// Explicit naming context for deferred name generation.
///
/// Replaces scope-global naming state with a value the caller passes in:
/// the position of a construct in its containing scope (path segments plus
/// the construct's own id). Name generation is a pure function of the
/// context and the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingContext {
    scope_path: Vec<String>,
    id: String,
}

impl NamingContext {
    /// Create a context from scope path segments and the construct id.
    pub fn new<I, S>(scope_path: I, id: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            scope_path: scope_path.into_iter().map(Into::into).collect(),
            id: id.into(),
        }
    }

    /// Append a scope segment, returning the nested context.
    pub fn nested(&self, id: impl Into<String>) -> Self {
        let mut scope_path = self.scope_path.clone();
        scope_path.push(self.id.clone());
        Self {
            scope_path,
            id: id.into(),
        }
    }

    /// Derive a unique lowercase identifier from the context.
    ///
    /// Each segment is reduced to alphanumerics and hyphens, segments are
    /// joined with `separator`, the result is lowercased and truncated to
    /// `max_length`. A separator left dangling by truncation is trimmed.
    pub fn unique_name(&self, max_length: usize, separator: char) -> String {
        let mut name = self
            .scope_path
            .iter()
            .chain(std::iter::once(&self.id))
            .map(|segment| sanitize(segment))
            .filter(|segment| !segment.is_empty())
            .collect::<Vec<_>>()
            .join(&separator.to_string())
            .to_lowercase();

        if name.len() > max_length {
            name.truncate(max_length);
        }
        name.trim_end_matches(separator).to_string()
    }
}

fn sanitize(segment: &str) -> String {
    segment
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect()
}
