//! Recursive redaction of sensitive fields in JSON trees.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::constants::{MASK_TOKEN, MAX_SUBSTITUTE_NODES, PII_LOCATION, PII_SCALARS, PII_SIM_ID};

/// Field-name tables that drive [`redact`]
///
/// Fixed once constructed; share it by reference between threads. The
/// [`Default`] policy masks the personal data found in Zont device listings.
///
/// Substitutes are kept in redacted form: every builder call, and
/// deserialization, re-applies the policy to each substitute until it no longer
/// changes. A substitute that never settles, such as two rules whose substitutes
/// keep triggering each other, or one that grows past 1024 nodes while settling, is
/// replaced by an empty object.
///
/// Deserializes from JSON such as
/// `{"scalars": ["phone"], "mappings": {"sim_id": {}}, "sequences": {"loc": {"loc": []}}}`;
/// missing tables are empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PolicyTables")]
pub struct RedactionPolicy {
    scalars: BTreeSet<String>,
    mappings: BTreeMap<String, Value>,
    sequences: BTreeMap<String, Value>,
}

/// Policy tables as written in configuration, before substitutes are settled
#[derive(Deserialize)]
struct PolicyTables {
    #[serde(default)]
    scalars: BTreeSet<String>,
    #[serde(default)]
    mappings: BTreeMap<String, Value>,
    #[serde(default)]
    sequences: BTreeMap<String, Value>,
}

impl From<PolicyTables> for RedactionPolicy {
    fn from(tables: PolicyTables) -> Self {
        Self {
            scalars: tables.scalars,
            mappings: tables.mappings,
            sequences: tables.sequences,
        }
        .settle()
    }
}

impl Default for RedactionPolicy {
    fn default() -> Self {
        Self::empty()
            .with_scalars(PII_SCALARS)
            .with_mapping(
                PII_SIM_ID,
                json!({ "sim_id": { "operator": MASK_TOKEN, "id": MASK_TOKEN } }),
            )
            .with_sequence(PII_LOCATION, json!({ "loc": [] }))
    }
}

impl RedactionPolicy {
    /// Policy that redacts nothing
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            scalars: BTreeSet::new(),
            mappings: BTreeMap::new(),
            sequences: BTreeMap::new(),
        }
    }

    /// Mask scalar values of the named fields
    #[must_use]
    pub fn with_scalars<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scalars.extend(names.into_iter().map(Into::into));
        self.settle()
    }

    /// Replace any object holding an object-valued `name` field with `substitute`
    #[must_use]
    pub fn with_mapping(mut self, name: impl Into<String>, substitute: Value) -> Self {
        self.mappings.insert(name.into(), substitute);
        self.settle()
    }

    /// Replace any object holding an array-valued `name` field with `substitute`
    #[must_use]
    pub fn with_sequence(mut self, name: impl Into<String>, substitute: Value) -> Self {
        self.sequences.insert(name.into(), substitute);
        self.settle()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scalars.is_empty() && self.mappings.is_empty() && self.sequences.is_empty()
    }

    /// Redact `node` in place, see [`redact`]
    pub fn redact(&self, node: &mut Value) {
        redact(node, self);
    }

    /// Substitute for `node` when one of its fields matches a container rule
    fn container_substitute(&self, key: &str, value: &Value) -> Option<&Value> {
        match value {
            Value::Object(_) => self.mappings.get(key),
            Value::Array(_) => self.sequences.get(key),
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => None,
        }
    }

    /// Bring every substitute to a tree the policy leaves unchanged
    fn settle(mut self) -> Self {
        let rounds = self.mappings.len() + self.sequences.len() + 1;
        loop {
            let mut pending = (Vec::new(), Vec::new());
            for _ in 0..rounds {
                pending = (self.unsettled(&self.mappings), self.unsettled(&self.sequences));
                if pending.0.is_empty() && pending.1.is_empty() {
                    return self;
                }
                self.mappings.extend(pending.0.iter().cloned());
                self.sequences.extend(pending.1.iter().cloned());
            }

            // {} is always settled, so every pass here shrinks the set of live substitutes
            for (name, _) in pending.0 {
                tracing::warn!(field = %name, "mapping substitute does not settle, using {{}}");
                self.mappings.insert(name, Value::Object(Map::new()));
            }
            for (name, _) in pending.1 {
                tracing::warn!(field = %name, "sequence substitute does not settle, using {{}}");
                self.sequences.insert(name, Value::Object(Map::new()));
            }
        }
    }

    /// Substitutes of `table` that one more redaction pass would change, with their next form
    fn unsettled(&self, table: &BTreeMap<String, Value>) -> Vec<(String, Value)> {
        table
            .iter()
            .filter_map(|(name, substitute)| {
                let next = redacted(substitute.clone(), self);
                if next == *substitute {
                    return None;
                }
                if node_count(&next) > MAX_SUBSTITUTE_NODES {
                    tracing::warn!(field = %name, "substitute keeps growing, using {{}}");
                    return Some((name.clone(), Value::Object(Map::new())));
                }
                Some((name.clone(), next))
            })
            .collect()
    }
}

fn node_count(node: &Value) -> usize {
    match node {
        Value::Object(map) => 1 + map.values().map(node_count).sum::<usize>(),
        Value::Array(items) => 1 + items.iter().map(node_count).sum::<usize>(),
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => 1,
    }
}

/// Redact sensitive fields of `node` in place
///
/// Walks the tree depth-first. Within an object, fields are visited in order:
/// - an object or array field named in the policy's container tables replaces the
///   **whole enclosing object** with the configured substitute, dropping its siblings
///   and any fields not yet visited
/// - other object and array fields are redacted recursively, then checked against
///   the tables again, since a nested substitute can change the field's shape
/// - scalar fields named in the scalar table become `"***"`
///
/// Arrays are redacted element by element. Scalars are left untouched. Applying the
/// same policy twice gives the same tree as applying it once.
///
/// # Example
/// ```
/// use serde_json::json;
/// use zont_api::{redact, RedactionPolicy};
///
/// let mut device = json!({"id": 42, "phone": "+75555555555", "users": [{"password": "x"}]});
/// redact(&mut device, &RedactionPolicy::default());
/// assert_eq!(device, json!({"id": 42, "phone": "***", "users": [{"password": "***"}]}));
/// ```
pub fn redact(node: &mut Value, policy: &RedactionPolicy) {
    match node {
        Value::Object(map) => {
            if let Some(substitute) = redact_object(map, policy) {
                *node = substitute;
            }
        }
        Value::Array(items) => {
            for item in items {
                redact(item, policy);
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {}
    }
}

/// By-value form of [`redact`]
#[must_use]
pub fn redacted(mut node: Value, policy: &RedactionPolicy) -> Value {
    redact(&mut node, policy);
    node
}

/// Redact the fields of an object without ever replacing the object itself
///
/// Used for records such as a device entry, whose identity must survive
/// redaction. A field matching a container rule takes the substitute's own
/// entry for that field when it has one (`{"loc": []}` gives `[]`), else the
/// whole substitute. Every other field is redacted as by [`redact`].
///
/// # Example
/// ```
/// use serde_json::json;
/// use zont_api::{redact_fields, RedactionPolicy};
///
/// let mut device = json!({"id": 42, "loc": [55.7, 37.6], "phone": "+7555"});
/// if let Some(fields) = device.as_object_mut() {
///     redact_fields(fields, &RedactionPolicy::default());
/// }
/// assert_eq!(device, json!({"id": 42, "loc": [], "phone": "***"}));
/// ```
pub fn redact_fields(map: &mut Map<String, Value>, policy: &RedactionPolicy) {
    for (key, value) in map.iter_mut() {
        if let Some(substitute) = redact_field(key, value, policy) {
            *value = substitute.get(key.as_str()).unwrap_or(substitute).clone();
        }
    }
}

/// Redact the fields of `map`, or return the substitute for the whole object
fn redact_object(map: &mut Map<String, Value>, policy: &RedactionPolicy) -> Option<Value> {
    for (key, value) in map.iter_mut() {
        if let Some(substitute) = redact_field(key, value, policy) {
            tracing::trace!(field = %key, "replacing enclosing object");
            return Some(substitute.clone());
        }
    }
    None
}

/// Redact one field in place, or return the substitute its enclosing object gets
fn redact_field<'p>(
    key: &str,
    value: &mut Value,
    policy: &'p RedactionPolicy,
) -> Option<&'p Value> {
    if let Some(substitute) = policy.container_substitute(key, value) {
        return Some(substitute);
    }
    if value.is_object() || value.is_array() {
        redact(value, policy);
        if let Some(substitute) = policy.container_substitute(key, value) {
            return Some(substitute);
        }
    }
    let is_scalar = !(value.is_object() || value.is_array());
    if is_scalar && policy.scalars.contains(key) {
        *value = Value::String(MASK_TOKEN.to_owned());
    }
    None
}
