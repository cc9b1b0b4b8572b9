use crate::{
    parser::{infer_returns, parse_field_row, EntityKind},
    schema::{MethodEntry, Schema, TypeEntry},
    util::{ElementRefExt, StrExt},
    BOT_API_DOCS_URL,
};
use itertools::Itertools;
use scraper::{ElementRef, Html, Selector};

#[derive(Debug, thiserror::Error)]
pub enum ExtractorError {
    #[error("No `#dev_page_content` container found in document")]
    NoContent,
    #[error("Failed to extract return type of `{method}`")]
    ReturnTypeNotFound { method: String },
}

pub struct Extractor {
    doc: Html,
    docs_url: String,
    strict_returns: bool,
}

impl Extractor {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Self {
        Self {
            doc: Html::parse_document(s),
            docs_url: BOT_API_DOCS_URL.to_string(),
            strict_returns: false,
        }
    }

    /// Base of every entity `href`.
    pub fn docs_url(mut self, url: impl Into<String>) -> Self {
        self.docs_url = url.into();
        self
    }

    /// Fail instead of warning when a method's return type cannot be inferred.
    pub fn strict_returns(mut self, strict: bool) -> Self {
        self.strict_returns = strict;
        self
    }

    pub fn extract(&self) -> Result<Schema, ExtractorError> {
        let content = Selector::parse("div#dev_page_content").unwrap();
        let tr = Selector::parse("tbody tr").unwrap();
        let td = Selector::parse("td").unwrap();
        let li = Selector::parse("li").unwrap();

        let content = self
            .doc
            .select(&content)
            .next()
            .ok_or(ExtractorError::NoContent)?;

        let mut walker = Walker {
            docs_url: &self.docs_url,
            schema: Schema::default(),
            state: State::Idle,
        };

        for elem in content.children().filter_map(ElementRef::wrap) {
            match elem.value().name() {
                "h3" | "hr" => walker.state = State::Idle,
                "h4" => walker.heading(elem),
                "p" => walker.paragraph(elem),
                "table" => walker.table(elem, &tr, &td),
                "ul" => walker.list(elem, &li),
                _ => {}
            }
        }

        let schema = walker.schema;
        for method in schema.methods.values() {
            if method.returns.is_empty() {
                if self.strict_returns {
                    return Err(ExtractorError::ReturnTypeNotFound {
                        method: method.name.clone(),
                    });
                }
                log::warn!("No return type found for {}", method.name);
            }
        }

        Ok(schema)
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
enum State {
    Idle,
    InType(String),
    InMethod(String),
}

struct Walker<'a> {
    docs_url: &'a str,
    schema: Schema,
    state: State,
}

impl Walker<'_> {
    fn heading(&mut self, elem: ElementRef) {
        self.state = State::Idle;

        let anchor = match elem.anchor_name() {
            Some(anchor) if !anchor.contains('-') => anchor,
            _ => {
                log::debug!("Skipping heading {:?}", elem.plain_text());
                return;
            }
        };
        let name = elem.plain_text().trim().to_string();
        if !name.chars().next().map_or(false, char::is_alphabetic) {
            log::debug!("Skipping heading {:?}", name);
            return;
        }

        let href = format!("{}#{}", self.docs_url, anchor);
        if name.is_first_letter_uppercase() {
            self.schema
                .types
                .entry(name.clone())
                .or_insert_with(|| TypeEntry::new(name.clone(), href));
            log::info!("{}", name);
            self.state = State::InType(name);
        } else if name.is_first_letter_lowercase() {
            self.schema
                .methods
                .entry(name.clone())
                .or_insert_with(|| MethodEntry::new(name.clone(), href));
            log::info!("{}", name);
            self.state = State::InMethod(name);
        } else {
            log::debug!("Skipping heading {:?}", name);
        }
    }

    fn paragraph(&mut self, elem: ElementRef) {
        match &self.state {
            State::Idle => {}
            State::InType(name) => self.schema.types[name].description.extend(elem.lines()),
            State::InMethod(name) => {
                let method = &mut self.schema.methods[name];
                method.description.extend(elem.lines());
                if let Ok(returns) = infer_returns(&method.description.join("\n")) {
                    method.returns = returns;
                }
            }
        }
    }

    fn table(&mut self, elem: ElementRef, tr: &Selector, td: &Selector) {
        let (kind, name) = match &self.state {
            State::Idle => return,
            State::InType(name) => (EntityKind::Type, name),
            State::InMethod(name) => (EntityKind::Method, name),
        };

        let fields = elem
            .select(tr)
            .filter_map(|row| {
                let cells = row.select(td).collect_vec();
                match parse_field_row(kind, &cells) {
                    Ok(field) => Some(field),
                    Err(err) => {
                        log::error!("Error: {}", name);
                        log::debug!("{}: {}", name, err);
                        None
                    }
                }
            })
            .collect_vec();

        match kind {
            EntityKind::Type => self.schema.types[name].fields = fields,
            EntityKind::Method => self.schema.methods[name].fields = fields,
        }
    }

    fn list(&mut self, elem: ElementRef, li: &Selector) {
        let name = match &self.state {
            State::InType(name) => name,
            State::Idle | State::InMethod(_) => return,
        };

        let subtypes = elem
            .select(li)
            .flat_map(|item| item.lines())
            .filter(|line| !line.is_empty())
            .collect_vec();
        let entry = &mut self.schema.types[name];
        entry
            .description
            .extend(subtypes.iter().map(|subtype| format!("- {}", subtype)));
        entry.subtypes = subtypes;
    }
}
