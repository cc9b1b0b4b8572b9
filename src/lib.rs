mod docs;
mod extractor;
mod parser;
mod schema;
mod util;

pub use docs::{render_type, snake_case};
pub use extractor::{Extractor, ExtractorError};
pub use parser::{infer_returns, normalize, split_types, EntityKind, Kind, ParseError};
pub use schema::{FieldEntry, MethodEntry, Schema, TypeEntry};

pub const BOT_API_DOCS_URL: &str = "https://core.telegram.org/bots/api";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Extractor: {0}")]
    Extractor(
        #[from]
        #[source]
        ExtractorError,
    ),
}

/// Walks the documentation page and returns the schema with `subtype_of` filled in.
pub fn get(html_doc: &str) -> Result<Schema, Error> {
    let extractor = Extractor::from_str(html_doc);
    let mut schema = extractor.extract()?;
    schema.link_subtypes();
    Ok(schema)
}
