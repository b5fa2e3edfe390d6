//! Identity resolution
//!
//! Resolving a member id to a display name is an external capability that
//! may fail. Failure is always non-fatal: call sites go through
//! [`display_name_or_key`], which degrades to the raw key, so a dead lookup
//! backend can never block a command.

use indexmap::IndexMap;

use crate::error::ResolveError;

pub(crate) trait Resolver {
    fn resolve(&self, group_id: &str, member_id: &str) -> Result<String, ResolveError>;
}

/// Resolver backed by a group's persisted id → display-name cache.
pub(crate) struct CacheResolver {
    names: IndexMap<String, String>,
}

impl CacheResolver {
    pub(crate) fn new(names: IndexMap<String, String>) -> Self {
        Self { names }
    }
}

impl Resolver for CacheResolver {
    fn resolve(&self, group_id: &str, member_id: &str) -> Result<String, ResolveError> {
        self.names
            .get(member_id)
            .cloned()
            .ok_or_else(|| ResolveError::NotFound {
                group: group_id.to_string(),
                member: member_id.to_string(),
            })
    }
}

/// Resolve with the mandatory fallback: the raw key stands in for a name
/// the backend cannot produce, keeping orderings total.
pub(crate) fn display_name_or_key(
    resolver: &dyn Resolver,
    group_id: &str,
    member_id: &str,
) -> String {
    resolver
        .resolve(group_id, member_id)
        .unwrap_or_else(|_| member_id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_hit_resolves() {
        let mut names = IndexMap::new();
        names.insert("u1".to_string(), "田中".to_string());
        let resolver = CacheResolver::new(names);
        assert_eq!(resolver.resolve("g1", "u1"), Ok("田中".to_string()));
    }

    #[test]
    fn cache_miss_is_not_found() {
        let resolver = CacheResolver::new(IndexMap::new());
        assert_eq!(
            resolver.resolve("g1", "u9"),
            Err(ResolveError::NotFound {
                group: "g1".to_string(),
                member: "u9".to_string(),
            })
        );
    }

    #[test]
    fn fallback_returns_raw_key() {
        let resolver = CacheResolver::new(IndexMap::new());
        assert_eq!(display_name_or_key(&resolver, "g1", "u9"), "u9");
    }
}
