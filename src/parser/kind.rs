const ARRAY_OF: &str = "Array of ";

/// Maps a documentation type token to its canonical name.
///
/// `Array of X` keeps its prefix and `X` is normalized recursively.
pub fn normalize(s: &str) -> String {
    match s {
        "Float number" => "Float".to_string(),
        "Int" => "Integer".to_string(),
        "True" | "Bool" => "Boolean".to_string(),
        _ => match s.strip_prefix(ARRAY_OF) {
            Some(inner) => [ARRAY_OF, &normalize(inner)].concat(),
            None => s.to_string(),
        },
    }
}

/// Splits a `Type` column cell into the list of canonical alternatives.
///
/// `A or B` gives a union, `A, B and C` is read as an enumeration of alternatives.
/// A leading `Array of` applies to every alternative of its `or` branch.
pub fn split_types(s: &str) -> Vec<String> {
    s.split(" or ")
        .flat_map(|alternative| {
            let alternative = alternative.trim();
            let mut prefix = String::new();
            let mut rest = alternative;
            while let Some(inner) = rest.strip_prefix(ARRAY_OF) {
                prefix.push_str(ARRAY_OF);
                rest = inner;
            }

            rest.split(", ")
                .flat_map(|part| part.split(" and "))
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(|token| {
                    let token = normalize(token);
                    if token.starts_with(ARRAY_OF) {
                        token
                    } else {
                        [prefix.as_str(), &token].concat()
                    }
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Structured view of a canonical type name.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Kind {
    Integer,
    String,
    Boolean,
    Float,
    Array(Box<Kind>),
    Object(String),
}

impl Kind {
    pub fn parse(s: &str) -> Self {
        match normalize(s).as_str() {
            "Integer" => Self::Integer,
            "String" => Self::String,
            "Boolean" => Self::Boolean,
            "Float" => Self::Float,
            s => match s.strip_prefix(ARRAY_OF) {
                Some(inner) => Self::Array(Box::new(Self::parse(inner))),
                None => Self::Object(s.to_string()),
            },
        }
    }
}
