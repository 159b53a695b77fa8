//! The document tree a style file is serialized from.
//!
//! A node is either a [`Branch`] (one nesting level per path segment) or a
//! [`Leaf`] carrying a token's resolved value. Merging two trees unions
//! branches key by key and layers leaves field by field, which is how
//! per-theme passes over the same tokens end up in one file.

use indexmap::{map::Entry, IndexMap};
use serde::{ser::SerializeMap, Serialize, Serializer};

use crate::error::{CoreError, Result};

pub type Branch = IndexMap<String, Node>;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Node {
    Branch(Branch),
    Leaf(Leaf),
}

/// One resolved value: what Style Dictionary reads as `value` and `type`.
#[derive(Debug, Clone, PartialEq)]
pub struct LeafValue {
    pub value: String,
    pub type_: String,
    pub collection: Option<String>,
}
impl LeafValue {
    pub fn new(value: impl Into<String>, type_: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            type_: type_.into(),
            collection: None,
        }
    }
    pub fn with_collection(mut self, collection: Option<String>) -> Self {
        self.collection = collection;
        self
    }
    fn merged(&self, other: &LeafValue) -> LeafValue {
        LeafValue {
            value: other.value.clone(),
            type_: other.type_.clone(),
            collection: other.collection.clone().or_else(|| self.collection.clone()),
        }
    }
    fn serialize_fields<M: SerializeMap>(&self, map: &mut M) -> Result<(), M::Error> {
        map.serialize_entry("value", &self.value)?;
        map.serialize_entry("type", &self.type_)?;
        if let Some(collection) = &self.collection {
            map.serialize_entry("collection", collection)?;
        }
        Ok(())
    }
}
impl Serialize for LeafValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        self.serialize_fields(&mut map)?;
        map.end()
    }
}

/// A token's entry. `base` is written inline, `themes` as one nested object
/// per theme key, `description` last.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Leaf {
    pub base: Option<LeafValue>,
    pub themes: IndexMap<String, LeafValue>,
    pub description: Option<String>,
}
impl Leaf {
    pub fn base(value: LeafValue) -> Self {
        Self {
            base: Some(value),
            ..Default::default()
        }
    }
    pub fn themed(theme: impl Into<String>, value: LeafValue) -> Self {
        let mut themes = IndexMap::new();
        themes.insert(theme.into(), value);
        Self {
            themes,
            ..Default::default()
        }
    }
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }
    /// Field union, `other` winning on conflicts.
    pub fn merged(&self, other: &Leaf) -> Leaf {
        let base = match (&self.base, &other.base) {
            (Some(ours), Some(theirs)) => Some(ours.merged(theirs)),
            (ours, theirs) => theirs.clone().or_else(|| ours.clone()),
        };
        let mut themes = self.themes.clone();
        for (key, theirs) in &other.themes {
            let value = match themes.get(key) {
                Some(ours) => ours.merged(theirs),
                None => theirs.clone(),
            };
            themes.insert(key.clone(), value);
        }
        Leaf {
            base,
            themes,
            description: other.description.clone().or_else(|| self.description.clone()),
        }
    }
}
impl Serialize for Leaf {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if let Some(base) = &self.base {
            base.serialize_fields(&mut map)?;
        }
        for (theme, value) in &self.themes {
            map.serialize_entry(theme, value)?;
        }
        if let Some(description) = &self.description {
            map.serialize_entry("description", description)?;
        }
        map.end()
    }
}

/// Recursively merges `b` into a copy of `a`. Keys keep `a`'s order, keys new
/// in `b` are appended.
pub fn deep_merge(a: &Branch, b: &Branch) -> Result<Branch> {
    let mut merged = a.clone();
    merge_into(&mut merged, b.clone())?;
    Ok(merged)
}

/// [`deep_merge`] in place: `b` is consumed and `a` grows.
pub fn merge_into(a: &mut Branch, b: Branch) -> Result<()> {
    merge_branch(a, b, &mut Vec::new())
}

fn merge_branch(a: &mut Branch, b: Branch, path: &mut Vec<String>) -> Result<()> {
    for (key, theirs) in b {
        path.push(key.clone());
        match a.entry(key) {
            Entry::Occupied(mut ours) => merge_node(ours.get_mut(), theirs, path)?,
            Entry::Vacant(slot) => {
                slot.insert(theirs);
            }
        }
        path.pop();
    }
    Ok(())
}

fn merge_node(ours: &mut Node, theirs: Node, path: &mut Vec<String>) -> Result<()> {
    match (ours, theirs) {
        (Node::Branch(ours), Node::Branch(theirs)) => merge_branch(ours, theirs, path),
        (Node::Leaf(ours), Node::Leaf(theirs)) => {
            *ours = ours.merged(&theirs);
            Ok(())
        }
        _ => Err(CoreError::ShapeConflict { path: path.join(".") }),
    }
}

/// A finished style file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub disclaimer: Option<String>,
    pub root: Branch,
}
impl Document {
    pub fn merge(&self, other: &Document) -> Result<Document> {
        Ok(Document {
            disclaimer: other.disclaimer.clone().or_else(|| self.disclaimer.clone()),
            root: deep_merge(&self.root, &other.root)?,
        })
    }
    /// JSON text, indented by `indent` spaces per level; 0 means compact.
    pub fn to_json(&self, indent: usize) -> Result<String> {
        if indent == 0 {
            return Ok(serde_json::to_string(self)?);
        }
        let pad = " ".repeat(indent);
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(pad.as_bytes());
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut serializer)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}
impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if let Some(disclaimer) = &self.disclaimer {
            map.serialize_entry("_comment", disclaimer)?;
        }
        for (key, node) in &self.root {
            map.serialize_entry(key, node)?;
        }
        map.end()
    }
}
