use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::ser::{PrettyFormatter, Serializer};

/// Scraped API, keyed by name in document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    pub types: IndexMap<String, TypeEntry>,
    #[serde(default)]
    pub methods: IndexMap<String, MethodEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeEntry {
    pub name: String,
    pub href: String,
    #[serde(default)]
    pub description: Vec<String>,
    #[serde(default)]
    pub fields: Vec<FieldEntry>,
    #[serde(default)]
    pub subtypes: Vec<String>,
    #[serde(default)]
    pub subtype_of: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MethodEntry {
    pub name: String,
    pub href: String,
    #[serde(default)]
    pub description: Vec<String>,
    #[serde(default)]
    pub fields: Vec<FieldEntry>,
    #[serde(default)]
    pub returns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldEntry {
    pub name: String,
    pub types: Vec<String>,
    pub required: bool,
    pub description: String,
}

impl TypeEntry {
    pub(crate) fn new(name: String, href: String) -> Self {
        Self {
            name,
            href,
            ..Self::default()
        }
    }
}

impl MethodEntry {
    pub(crate) fn new(name: String, href: String) -> Self {
        Self {
            name,
            href,
            ..Self::default()
        }
    }
}

impl Schema {
    /// Records every parent listed in `subtypes` on the child's `subtype_of`.
    pub fn link_subtypes(&mut self) {
        let links = self
            .types
            .values()
            .flat_map(|parent| {
                parent
                    .subtypes
                    .iter()
                    .map(move |child| (child.clone(), parent.name.clone()))
            })
            .collect::<Vec<_>>();

        for (child, parent) in links {
            match self.types.get_mut(&child) {
                Some(entry) => entry.subtype_of.push(parent),
                None => log::warn!("Unknown subtype {} of {}", child, parent),
            }
        }
    }

    /// JSON with four-space indentation.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        let mut buf = Vec::new();
        let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        self.serialize(&mut ser)?;
        Ok(String::from_utf8(buf).expect("serde_json writes UTF-8"))
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }
}
