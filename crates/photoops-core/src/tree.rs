//! In-memory model of a decoded metadata tag tree.
//!
//! The decoder hands us a nested mapping of tag name to value. A value is
//! either a scalar leaf or another tree (a sub-IFD such as `exif_ifd`,
//! `gps_ifd` or `maker_note`). Children keep the order they were declared in,
//! because the geometry search resolves conflicts by traversal order.
//!
//! Nothing here validates shape. A scalar where a subtree was expected (or the
//! other way round) simply reads as absent data through the typed accessors.

use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A leaf value in the tag tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Text(String),
    Integer(i64),
    Float(f64),
    Numbers(Vec<f64>),
    /// A list outside the model (rational pairs, string lists). Kept verbatim
    /// for pass-through but reads as absent through every accessor.
    Other(serde_json::Value),
}

impl Scalar {
    /// Borrow the value as text, if it is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Scalar::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Render single-valued scalars as text.
    ///
    /// Decoders are inconsistent about whether identifiers such as serial
    /// numbers come out as strings or integers; both are accepted here.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Scalar::Text(s) => Some(s.clone()),
            Scalar::Integer(i) => Some(i.to_string()),
            Scalar::Float(f) => Some(f.to_string()),
            Scalar::Numbers(_) | Scalar::Other(_) => None,
        }
    }

    /// Numeric value of a single-valued numeric scalar.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Integer(i) => Some(*i as f64),
            Scalar::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Non-negative integral value, accepting integral floats.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Scalar::Integer(i) => u64::try_from(*i).ok(),
            Scalar::Float(f) if f.is_finite() && *f >= 0.0 && f.fract() == 0.0 => {
                Some(*f as u64)
            }
            _ => None,
        }
    }

    /// Borrow a numeric sequence.
    pub fn as_numbers(&self) -> Option<&[f64]> {
        match self {
            Scalar::Numbers(v) => Some(v.as_slice()),
            _ => None,
        }
    }
}

/// A value in the tag tree: either a leaf or a nested IFD.
#[derive(Debug, Clone, PartialEq)]
pub enum TagValue {
    Scalar(Scalar),
    Tree(TagTree),
}

impl TagValue {
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            TagValue::Scalar(s) => Some(s),
            TagValue::Tree(_) => None,
        }
    }

    pub fn as_tree(&self) -> Option<&TagTree> {
        match self {
            TagValue::Tree(t) => Some(t),
            TagValue::Scalar(_) => None,
        }
    }
}

/// An ordered, immutable mapping of tag name to value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagTree {
    entries: Vec<(String, TagValue)>,
}

impl TagTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start building a tree programmatically.
    pub fn builder() -> TagTreeBuilder {
        TagTreeBuilder::default()
    }

    /// Number of direct children.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over direct children in declared order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TagValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Look up a direct child. The first declaration wins on duplicates.
    pub fn get(&self, name: &str) -> Option<&TagValue> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value)
    }

    /// Direct scalar child.
    pub fn scalar(&self, name: &str) -> Option<&Scalar> {
        self.get(name).and_then(TagValue::as_scalar)
    }

    /// Direct text child.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.scalar(name).and_then(Scalar::as_text)
    }

    /// Direct subtree child.
    pub fn subtree(&self, name: &str) -> Option<&TagTree> {
        self.get(name).and_then(TagValue::as_tree)
    }

    /// Resolve a nested path such as `["ifd0", "maker_note", "lens_type"]`.
    ///
    /// Any missing or non-tree intermediate yields `None`.
    pub fn lookup(&self, path: &[&str]) -> Option<&TagValue> {
        let (last, parents) = path.split_last()?;
        let mut node = self;
        for name in parents {
            node = node.subtree(name)?;
        }
        node.get(last)
    }

    pub fn scalar_at(&self, path: &[&str]) -> Option<&Scalar> {
        self.lookup(path).and_then(TagValue::as_scalar)
    }

    pub fn text_at(&self, path: &[&str]) -> Option<&str> {
        self.scalar_at(path).and_then(Scalar::as_text)
    }

    pub fn subtree_at(&self, path: &[&str]) -> Option<&TagTree> {
        self.lookup(path).and_then(TagValue::as_tree)
    }

    /// Nesting depth; a tree of only scalars has depth 1.
    pub fn depth(&self) -> usize {
        1 + self
            .entries
            .iter()
            .filter_map(|(_, value)| value.as_tree())
            .map(TagTree::depth)
            .max()
            .unwrap_or(0)
    }

    /// Return a copy of this tree with the node at `path` removed.
    ///
    /// The receiver is left untouched. Missing paths yield an identical copy.
    pub fn pruned(&self, path: &[&str]) -> TagTree {
        let Some((first, rest)) = path.split_first() else {
            return self.clone();
        };
        let entries = self
            .entries
            .iter()
            .filter(|(name, _)| !(rest.is_empty() && name == first))
            .map(|(name, value)| match value {
                TagValue::Tree(child) if !rest.is_empty() && name == first => {
                    (name.clone(), TagValue::Tree(child.pruned(rest)))
                }
                _ => (name.clone(), value.clone()),
            })
            .collect();
        TagTree { entries }
    }
}

/// Incremental constructor for [`TagTree`].
#[derive(Debug, Default)]
pub struct TagTreeBuilder {
    entries: Vec<(String, TagValue)>,
}

impl TagTreeBuilder {
    pub fn scalar(mut self, name: impl Into<String>, value: Scalar) -> Self {
        self.entries.push((name.into(), TagValue::Scalar(value)));
        self
    }

    pub fn text(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.scalar(name, Scalar::Text(value.into()))
    }

    pub fn integer(self, name: impl Into<String>, value: i64) -> Self {
        self.scalar(name, Scalar::Integer(value))
    }

    pub fn float(self, name: impl Into<String>, value: f64) -> Self {
        self.scalar(name, Scalar::Float(value))
    }

    pub fn numbers(self, name: impl Into<String>, values: impl Into<Vec<f64>>) -> Self {
        self.scalar(name, Scalar::Numbers(values.into()))
    }

    pub fn subtree(mut self, name: impl Into<String>, tree: TagTree) -> Self {
        self.entries.push((name.into(), TagValue::Tree(tree)));
        self
    }

    pub fn build(self) -> TagTree {
        TagTree {
            entries: self.entries,
        }
    }
}

// ── serde ───────────────────────────────────────────────────────────────────

impl Serialize for TagTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl Serialize for TagValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TagValue::Scalar(scalar) => scalar.serialize(serializer),
            TagValue::Tree(tree) => tree.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for TagTree {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(TagTreeVisitor)
    }
}

impl<'de> Deserialize<'de> for TagValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(TagValueVisitor)
    }
}

struct TagTreeVisitor;

impl<'de> Visitor<'de> for TagTreeVisitor {
    type Value = TagTree;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of tag names to values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<TagTree, A::Error> {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        // Null-valued tags carry no information and are dropped on load.
        while let Some((name, value)) = map.next_entry::<String, Option<TagValue>>()? {
            if let Some(value) = value {
                entries.push((name, value));
            }
        }
        Ok(TagTree { entries })
    }
}

struct TagValueVisitor;

impl<'de> Visitor<'de> for TagValueVisitor {
    type Value = TagValue;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a string, number, list or nested tag map")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<TagValue, E> {
        Ok(TagValue::Scalar(Scalar::Integer(i64::from(v))))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<TagValue, E> {
        Ok(TagValue::Scalar(Scalar::Integer(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<TagValue, E> {
        Ok(TagValue::Scalar(match i64::try_from(v) {
            Ok(i) => Scalar::Integer(i),
            Err(_) => Scalar::Float(v as f64),
        }))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<TagValue, E> {
        Ok(TagValue::Scalar(Scalar::Float(v)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<TagValue, E> {
        Ok(TagValue::Scalar(Scalar::Text(v.to_string())))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<TagValue, E> {
        Ok(TagValue::Scalar(Scalar::Text(v)))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<TagValue, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element::<serde_json::Value>()? {
            items.push(item);
        }
        let numbers: Option<Vec<f64>> = items.iter().map(serde_json::Value::as_f64).collect();
        Ok(TagValue::Scalar(match numbers {
            Some(values) => Scalar::Numbers(values),
            None => Scalar::Other(serde_json::Value::Array(items)),
        }))
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<TagValue, A::Error> {
        TagTreeVisitor.visit_map(map).map(TagValue::Tree)
    }
}
