// Record parsing — typed decoding of the three export shapes.
//
// Export formats drift between platform versions, so every field is decoded
// leniently: a missing field, or a field of the wrong JSON kind, contributes
// nothing instead of failing the whole file.
//
//   followers  [ { "string_list_data": [ { "value": "<handle>" } ] } ]
//   following  { "relationships_following": [ { "title": "<handle>" } ] }
//   topics     { "topics_your_topics": [ { "string_map_data": { "Name": { "value": "<topic>" } } } ] }

use std::collections::BTreeSet;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::identity::{normalize, IdentityKind};

/// Which of a person's export files a raw JSON value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Followers,
    Following,
    Topics,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Followers, Category::Following, Category::Topics];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Followers => "followers",
            Category::Following => "following",
            Category::Topics => "topics",
        }
    }

    /// The kind of identity this category's entries name.
    pub fn identity_kind(&self) -> IdentityKind {
        match self {
            Category::Followers | Category::Following => IdentityKind::Account,
            Category::Topics => IdentityKind::Topic,
        }
    }

    /// Parse the lowercase file-suffix form (`followers`, `following`, `topics`).
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix.to_ascii_lowercase().as_str() {
            "followers" => Some(Category::Followers),
            "following" => Some(Category::Following),
            "topics" => Some(Category::Topics),
            _ => None,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One raw export value tagged with the category it belongs to.
#[derive(Debug, Clone)]
pub struct RawRecord {
    pub category: Category,
    pub value: Value,
}

impl RawRecord {
    pub fn new(category: Category, value: Value) -> Self {
        Self { category, value }
    }

    /// Extract this record's normalized identity set.
    pub fn identities(&self) -> BTreeSet<String> {
        parse(self.category, &self.value)
    }
}

/// Deserialize a field, falling back to its default when the JSON has the
/// wrong shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

/// Decode every element of a JSON array independently, dropping the ones
/// that don't match `T`.
fn decode_each<T: DeserializeOwned>(items: Vec<Value>) -> impl Iterator<Item = T> {
    items.into_iter().filter_map(|item| T::deserialize(item).ok())
}

#[derive(Debug, Default, Deserialize)]
struct StringValue {
    #[serde(default, deserialize_with = "lenient")]
    value: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct FollowerEntry {
    #[serde(default, deserialize_with = "lenient")]
    string_list_data: Vec<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct FollowingExport {
    #[serde(default, deserialize_with = "lenient")]
    relationships_following: Vec<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct FollowingEntry {
    #[serde(default, deserialize_with = "lenient")]
    title: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct TopicsExport {
    #[serde(default, deserialize_with = "lenient")]
    topics_your_topics: Vec<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct TopicEntry {
    #[serde(default, deserialize_with = "lenient")]
    string_map_data: TopicFields,
}

#[derive(Debug, Default, Deserialize)]
struct TopicFields {
    #[serde(rename = "Name", default, deserialize_with = "lenient")]
    name: StringValue,
}

/// Collect raw strings into a normalized set, dropping empties.
fn collect<I>(kind: IdentityKind, raw: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = Option<String>>,
{
    raw.into_iter()
        .map(|s| normalize(kind, s.as_deref()))
        .filter(|s| !s.is_empty())
        .collect()
}

/// Followers export: a top-level array of entries holding value lists.
pub fn parse_followers(value: &Value) -> BTreeSet<String> {
    let Some(entries) = value.as_array() else {
        return BTreeSet::new();
    };
    let values = decode_each::<FollowerEntry>(entries.clone())
        .flat_map(|entry| decode_each::<StringValue>(entry.string_list_data))
        .map(|v| v.value);
    collect(IdentityKind::Account, values)
}

/// Following export: an object whose `relationships_following` entries carry a `title`.
pub fn parse_following(value: &Value) -> BTreeSet<String> {
    if !value.is_object() {
        return BTreeSet::new();
    }
    let export = FollowingExport::deserialize(value).unwrap_or_default();
    let titles = decode_each::<FollowingEntry>(export.relationships_following).map(|e| e.title);
    collect(IdentityKind::Account, titles)
}

/// Topics export: an object whose `topics_your_topics` entries carry `Name.value`.
pub fn parse_topics(value: &Value) -> BTreeSet<String> {
    if !value.is_object() {
        return BTreeSet::new();
    }
    let export = TopicsExport::deserialize(value).unwrap_or_default();
    let names = decode_each::<TopicEntry>(export.topics_your_topics)
        .map(|e| e.string_map_data.name.value);
    collect(IdentityKind::Topic, names)
}

/// Dispatch to the parser for `category`.
pub fn parse(category: Category, value: &Value) -> BTreeSet<String> {
    match category {
        Category::Followers => parse_followers(value),
        Category::Following => parse_following(value),
        Category::Topics => parse_topics(value),
    }
}
