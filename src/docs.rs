use crate::{
    parser::Kind,
    schema::{FieldEntry, Schema, TypeEntry},
};
use regex::Regex;
use std::{borrow::Cow, sync::LazyLock};

const WIDTH: usize = 79;
const OPTIONAL: &str = "Optional. ";

static RE_WORD_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(.)([A-Z][a-z]+)").unwrap());
static RE_CASE_CHANGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z0-9])([A-Z])").unwrap());

/// `ChatMemberOwner` -> `chat_member_owner`
pub fn snake_case(name: &str) -> String {
    let name = RE_WORD_START.replace_all(name, "${1}_${2}");
    RE_CASE_CHANGE
        .replace_all(&name, "${1}_${2}")
        .to_lowercase()
}

/// Renders Markdown documentation for a type.
///
/// Object types named in fields link to their `href` when `schema` knows them.
pub fn render_type(entry: &TypeEntry, schema: &Schema) -> String {
    let mut out = format!("# {}\n\n", entry.name);

    for line in &entry.description {
        for wrapped in wrap(line, "") {
            out.push_str(&wrapped);
            out.push('\n');
        }
    }

    if !entry.subtype_of.is_empty() {
        let parents = entry
            .subtype_of
            .iter()
            .map(|parent| describe_object(parent, schema))
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&format!("\nSubtype of {}.\n", parents));
    }

    if !entry.fields.is_empty() {
        out.push_str("\nParameters:\n");
        for field in &entry.fields {
            out.push('\n');
            out.push_str(&render_field(field, schema));
        }
    }

    out
}

fn render_field(field: &FieldEntry, schema: &Schema) -> String {
    let types = field
        .types
        .iter()
        .map(|ty| describe(&Kind::parse(ty), schema))
        .collect::<Vec<_>>()
        .join(" | ");
    let optional = if field.required { "" } else { ", *optional*" };
    let mut out = format!("- **{}** ({}{}):\n", field.name, types, optional);

    let mut description = field
        .description
        .strip_prefix(OPTIONAL)
        .unwrap_or(&field.description)
        .replace('\n', " ");
    if !description.is_empty() {
        if !description.ends_with('.') {
            description.push('.');
        }
        for line in wrap(&description, "  ") {
            out.push_str(&line);
            out.push('\n');
        }
    }

    out
}

fn describe(kind: &Kind, schema: &Schema) -> String {
    match kind {
        Kind::Integer => "``Integer``".to_string(),
        Kind::String => "``String``".to_string(),
        Kind::Boolean => "``Boolean``".to_string(),
        Kind::Float => "``Float``".to_string(),
        Kind::Array(inner) => format!("List of {}", describe(inner, schema)),
        Kind::Object(name) => describe_object(name, schema),
    }
}

fn describe_object(name: &str, schema: &Schema) -> String {
    match schema.types.get(name) {
        Some(entry) => format!("[{}]({})", name, entry.href),
        None => format!("`{}`", name),
    }
}

/// Fills `text` to `WIDTH` columns without splitting words.
fn wrap<'a>(text: &'a str, indent: &'a str) -> Vec<Cow<'a, str>> {
    textwrap::wrap(
        text,
        textwrap::Options::new(WIDTH)
            .initial_indent(indent)
            .subsequent_indent(indent)
            .word_separator(textwrap::WordSeparator::AsciiSpace)
            .word_splitter(textwrap::WordSplitter::NoHyphenation)
            .break_words(false),
    )
}
