mod kind;
mod returns;

pub use kind::{normalize, split_types, Kind};
pub use returns::infer_returns;

use crate::{schema::FieldEntry, util::ElementRefExt};
use scraper::ElementRef;

type Result<T> = std::result::Result<T, ParseError>;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Expected {expected} cells in a field row, found {found}")]
    CellCount { expected: usize, found: usize },
    #[error("Failed to extract return type from description: {0:?}")]
    ReturnTypeNotFound(String),
}

/// Whether a documentation section describes a type or a method.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum EntityKind {
    Type,
    Method,
}

impl EntityKind {
    /// Types are `Field | Type | Description`,
    /// methods are `Parameter | Type | Required | Description`.
    pub fn cells(self) -> usize {
        match self {
            EntityKind::Type => 3,
            EntityKind::Method => 4,
        }
    }
}

pub(crate) fn parse_field_row(kind: EntityKind, cells: &[ElementRef]) -> Result<FieldEntry> {
    if cells.len() != kind.cells() {
        return Err(ParseError::CellCount {
            expected: kind.cells(),
            found: cells.len(),
        });
    }

    let name = cells[0].plain_text().trim().to_string();
    let types = split_types(cells[1].plain_text().trim());
    let (required, description) = match kind {
        EntityKind::Type => {
            let description = cells[2].lines().join("\n");
            (!description.starts_with("Optional. "), description)
        }
        EntityKind::Method => (
            cells[2].plain_text().trim() == "Yes",
            cells[3].lines().join("\n"),
        ),
    };

    Ok(FieldEntry {
        name,
        types,
        required,
        description,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn parse_row(kind: EntityKind, row: &str) -> Result<FieldEntry> {
        let html = Html::parse_fragment(&format!("<table><tbody>{}</tbody></table>", row));
        let td = Selector::parse("td").unwrap();
        let cells = html.select(&td).collect::<Vec<_>>();
        parse_field_row(kind, &cells)
    }

    #[test]
    fn type_row() {
        let field = parse_row(
            EntityKind::Type,
            "<tr><td>id</td><td>Integer</td><td>Unique identifier for this user or bot.</td></tr>",
        )
        .unwrap();
        assert_eq!(field.name, "id");
        assert_eq!(field.types, vec!["Integer"]);
        assert!(field.required);
        assert_eq!(field.description, "Unique identifier for this user or bot.");
    }

    #[test]
    fn optional_type_row() {
        let field = parse_row(
            EntityKind::Type,
            "<tr><td>last_name</td><td>String</td><td><em>Optional</em>. User's or bot's last name</td></tr>",
        )
        .unwrap();
        assert!(!field.required);
        assert_eq!(field.description, "Optional. User's or bot's last name");
    }

    #[test]
    fn optional_word_elsewhere_is_required() {
        let field = parse_row(
            EntityKind::Type,
            "<tr><td>text</td><td>String</td><td>Text of the button. Optional fields are ignored.</td></tr>",
        )
        .unwrap();
        assert!(field.required);

        let field = parse_row(
            EntityKind::Type,
            "<tr><td>text</td><td>String</td><td>Optional.No space after the marker</td></tr>",
        )
        .unwrap();
        assert!(field.required);
    }

    #[test]
    fn multiline_description() {
        let field = parse_row(
            EntityKind::Type,
            "<tr><td>type</td><td>String</td><td>Type of the entity.<br>Currently, can be \u{201c}mention\u{201d}</td></tr>",
        )
        .unwrap();
        assert_eq!(
            field.description,
            "Type of the entity.\nCurrently, can be \"mention\""
        );
    }

    #[test]
    fn method_row() {
        let field = parse_row(
            EntityKind::Method,
            "<tr><td>chat_id</td><td>Integer or String</td><td>Yes</td><td>Unique identifier for the target chat</td></tr>",
        )
        .unwrap();
        assert_eq!(field.name, "chat_id");
        assert_eq!(field.types, vec!["Integer", "String"]);
        assert!(field.required);

        let field = parse_row(
            EntityKind::Method,
            "<tr><td>offset</td><td>Integer</td><td>Optional</td><td>Identifier of the first update to be returned</td></tr>",
        )
        .unwrap();
        assert!(!field.required);
        assert_eq!(field.description, "Identifier of the first update to be returned");
    }

    #[test]
    fn wrong_cell_count() {
        let err = parse_row(
            EntityKind::Method,
            "<tr><td>id</td><td>Integer</td><td>Unique identifier</td></tr>",
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ParseError::CellCount {
                expected: 4,
                found: 3
            }
        ));
    }
}
