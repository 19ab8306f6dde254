//! Source document shape detection.
//!
//! Curated documents come in five layouts. Detection is an ordered list of
//! structural predicates and the first match wins:
//!
//! 1. `FlatList` — the document is an array of entries.
//! 2. `TaggedList` — an object with a `careerSkills` array.
//! 3. `Grouped` — an object with a `learnConcepts` array of
//!    `{category, sources}` groups.
//! 4. `GroupedRemaining` — same as `Grouped`, under `learnConcepts_remaining`.
//! 5. `Bucketed` — any other object; its array-valued properties are
//!    concatenated in property order.
//!
//! Anything else (scalars, null) is `Unrecognized` and yields no entries.

use serde_json::{Map, Value};

pub const TAGGED_LIST_KEY: &str = "careerSkills";
pub const GROUPED_KEY: &str = "learnConcepts";
pub const GROUPED_REMAINING_KEY: &str = "learnConcepts_remaining";

const GROUP_LABEL_KEY: &str = "category";
const GROUP_SOURCES_KEY: &str = "sources";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DocumentShape<'a> {
    FlatList(&'a [Value]),
    TaggedList(&'a [Value]),
    Grouped(&'a [Value]),
    GroupedRemaining(&'a [Value]),
    Bucketed(&'a Map<String, Value>),
    Unrecognized,
}

impl<'a> DocumentShape<'a> {
    pub fn detect(doc: &'a Value) -> Self {
        let obj = match doc {
            Value::Array(items) => return Self::FlatList(items),
            Value::Object(obj) => obj,
            _ => return Self::Unrecognized,
        };

        if let Some(items) = array_field(obj, TAGGED_LIST_KEY) {
            Self::TaggedList(items)
        } else if let Some(groups) = array_field(obj, GROUPED_KEY) {
            Self::Grouped(groups)
        } else if let Some(groups) = array_field(obj, GROUPED_REMAINING_KEY) {
            Self::GroupedRemaining(groups)
        } else {
            Self::Bucketed(obj)
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::FlatList(_) => "flat_list",
            Self::TaggedList(_) => "tagged_list",
            Self::Grouped(_) => "grouped",
            Self::GroupedRemaining(_) => "grouped_remaining",
            Self::Bucketed(_) => "bucketed",
            Self::Unrecognized => "unrecognized",
        }
    }

    /// Raw entries for the category whose title starts with `title_token`.
    /// The token only matters for the grouped shapes.
    pub fn entries(&self, title_token: &str) -> Vec<&'a Value> {
        match *self {
            Self::FlatList(items) | Self::TaggedList(items) => items.iter().collect(),
            Self::Grouped(groups) | Self::GroupedRemaining(groups) => {
                match find_group_sources(groups, title_token) {
                    Some(sources) => sources.iter().collect(),
                    None => Vec::new(),
                }
            }
            Self::Bucketed(obj) => obj
                .values()
                .filter_map(Value::as_array)
                .flatten()
                .collect(),
            Self::Unrecognized => Vec::new(),
        }
    }
}

fn array_field<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a [Value]> {
    obj.get(key).and_then(Value::as_array).map(Vec::as_slice)
}

/// Group matching rule: the first group whose label contains `title_token`
/// (case-sensitive substring). Groups without a string label never match.
/// A matched group without a `sources` array contributes nothing.
fn find_group_sources<'a>(groups: &'a [Value], title_token: &str) -> Option<&'a [Value]> {
    let group = groups.iter().find(|g| {
        g.get(GROUP_LABEL_KEY)
            .and_then(Value::as_str)
            .is_some_and(|label| label.contains(title_token))
    })?;
    array_field(group.as_object()?, GROUP_SOURCES_KEY)
}
