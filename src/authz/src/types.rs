//! Core access control types

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Role identifier (e.g., "ROLE_ADMIN")
pub type RoleId = String;

/// Ordered set of roles; ordering keeps expansion output deterministic
pub type RoleSet = BTreeSet<RoleId>;

/// Build a role set from anything string-like
pub fn role_set<I, S>(roles: I) -> RoleSet
where
    I: IntoIterator<Item = S>,
    S: Into<RoleId>,
{
    roles.into_iter().map(Into::into).collect()
}

/// Resource being checked (a movie, a book, ...)
///
/// The engine only reads it; voters look up the attributes they care about.
///
/// A serialized resource may omit `type`; it then falls back to the id
/// prefix, as in [`Resource::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ResourceDef")]
pub struct Resource {
    /// Resource identifier (e.g., "movie:42")
    pub id: String,

    /// Resource type (movie, book, ...)
    #[serde(rename = "type")]
    pub resource_type: String,

    /// Additional attributes (e.g., content_age, released_at)
    #[serde(default)]
    pub attributes: HashMap<String, String>,
}

#[derive(Deserialize)]
struct ResourceDef {
    id: String,
    #[serde(rename = "type", default)]
    resource_type: Option<String>,
    #[serde(default)]
    attributes: HashMap<String, String>,
}

impl From<ResourceDef> for Resource {
    fn from(def: ResourceDef) -> Self {
        let resource_type = def
            .resource_type
            .unwrap_or_else(|| type_from_id(&def.id));

        Self {
            id: def.id,
            resource_type,
            attributes: def.attributes,
        }
    }
}

fn type_from_id(id: &str) -> String {
    id.split(':').next().unwrap_or("resource").to_string()
}

impl Resource {
    /// Create a new resource from an ID string
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        let resource_type = type_from_id(&id);

        Self {
            id,
            resource_type,
            attributes: HashMap::new(),
        }
    }

    /// Add an attribute to the resource
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Raw attribute value
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Attribute as an integer
    ///
    /// Dates such as `1994-09-23` yield their leading year.
    pub fn attribute_i64(&self, key: &str) -> Option<i64> {
        let raw = self.attribute(key)?.trim();
        if let Ok(value) = raw.parse::<i64>() {
            return Some(value);
        }

        let digits: String = raw.chars().take_while(|c| c.is_ascii_digit()).collect();
        if digits.is_empty() || !raw[digits.len()..].starts_with('-') {
            return None;
        }
        digits.parse().ok()
    }
}
