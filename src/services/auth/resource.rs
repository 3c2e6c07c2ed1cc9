//! Request fields guards may inspect (path params, JSON body, query string).
//!
//! Lookup is always precedence-ordered and returns the first source that has a
//! non-empty value for the field. The order is part of each guard's contract:
//! - ownership: body → path → query (`OWNER_PRECEDENCE`)
//! - community: path → body → query (`COMMUNITY_PRECEDENCE`)
use std::collections::HashMap;

use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Body,
    Path,
    Query,
}

pub const OWNER_PRECEDENCE: [Source; 3] = [Source::Body, Source::Path, Source::Query];
pub const COMMUNITY_PRECEDENCE: [Source; 3] = [Source::Path, Source::Body, Source::Query];

#[derive(Debug, Clone, Default)]
pub struct ResourceDescriptor {
    path: HashMap<String, String>,
    body: Map<String, Value>,
    query: HashMap<String, String>,
}

impl ResourceDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_path(mut self, path: HashMap<String, String>) -> Self {
        self.path = path;
        self
    }

    pub fn with_query(mut self, query: HashMap<String, String>) -> Self {
        self.query = query;
        self
    }

    /// Only JSON objects contribute fields; any other body shape is ignored.
    pub fn with_body(mut self, body: Value) -> Self {
        if let Value::Object(map) = body {
            self.body = map;
        }
        self
    }

    pub fn path_param(mut self, key: &str, value: &str) -> Self {
        self.path.insert(key.to_string(), value.to_string());
        self
    }

    pub fn query_param(mut self, key: &str, value: &str) -> Self {
        self.query.insert(key.to_string(), value.to_string());
        self
    }

    /// First non-empty value for `field` across `order`.
    pub fn lookup(&self, field: &str, order: [Source; 3]) -> Option<String> {
        order.into_iter().find_map(|source| self.get(source, field))
    }

    /// Like `lookup`, trying each name within a source before moving on.
    pub fn lookup_any(&self, fields: &[&str], order: [Source; 3]) -> Option<String> {
        order
            .into_iter()
            .find_map(|source| fields.iter().find_map(|f| self.get(source, f)))
    }

    fn get(&self, source: Source, field: &str) -> Option<String> {
        let value = match source {
            Source::Path => self.path.get(field).cloned(),
            Source::Query => self.query.get(field).cloned(),
            Source::Body => match self.body.get(field)? {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            },
        };
        value.filter(|v| !v.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn owner_precedence_prefers_body() {
        let resource = ResourceDescriptor::new()
            .with_body(json!({ "user": "from-body" }))
            .path_param("user", "from-path")
            .query_param("user", "from-query");

        assert_eq!(resource.lookup("user", OWNER_PRECEDENCE).as_deref(), Some("from-body"));
        assert_eq!(resource.lookup("user", COMMUNITY_PRECEDENCE).as_deref(), Some("from-path"));
    }

    #[test]
    fn falls_through_to_later_sources() {
        let resource = ResourceDescriptor::new()
            .with_body(json!({ "user": "" }))
            .query_param("user", "from-query");

        assert_eq!(resource.lookup("user", OWNER_PRECEDENCE).as_deref(), Some("from-query"));
    }

    #[test]
    fn non_scalar_body_values_are_absent() {
        let resource = ResourceDescriptor::new()
            .with_body(json!({ "user": { "id": "x" }, "count": 7, "flag": true }));

        assert_eq!(resource.lookup("user", OWNER_PRECEDENCE), None);
        assert_eq!(resource.lookup("flag", OWNER_PRECEDENCE), None);
        assert_eq!(resource.lookup("count", OWNER_PRECEDENCE).as_deref(), Some("7"));
    }

    #[test]
    fn non_object_body_is_ignored() {
        let resource = ResourceDescriptor::new().with_body(json!(["user"]));
        assert_eq!(resource.lookup("user", OWNER_PRECEDENCE), None);
    }

    #[test]
    fn lookup_any_checks_every_alias_per_source() {
        let resource = ResourceDescriptor::new()
            .with_body(json!({ "community": "C-body" }))
            .path_param("communityId", "C-path");

        assert_eq!(
            resource
                .lookup_any(&["communityId", "community"], COMMUNITY_PRECEDENCE)
                .as_deref(),
            Some("C-path")
        );
        assert_eq!(
            resource
                .lookup_any(&["communityId", "community"], OWNER_PRECEDENCE)
                .as_deref(),
            Some("C-body")
        );
    }
}
