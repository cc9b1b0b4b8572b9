use ego_tree::iter::Edge;
use scraper::{ElementRef, Node};

pub trait StrExt {
    #[allow(clippy::wrong_self_convention)]
    fn is_first_letter_lowercase(self) -> bool;

    #[allow(clippy::wrong_self_convention)]
    fn is_first_letter_uppercase(self) -> bool;
}

impl<'a> StrExt for &'a str {
    fn is_first_letter_lowercase(self) -> bool {
        self.chars().next().map_or(false, char::is_lowercase)
    }

    fn is_first_letter_uppercase(self) -> bool {
        self.chars().next().map_or(false, char::is_uppercase)
    }
}

pub trait ElementRefExt {
    /// Visible text with `<br>` turned into `\n` and emoji images into their `alt`.
    fn plain_text(&self) -> String;

    /// Visible text split into trimmed lines, curly double quotes replaced with `"`.
    fn lines(&self) -> Vec<String>;

    /// `name` attribute of the first anchor inside the element.
    fn anchor_name(&self) -> Option<&str>;
}

impl<'a> ElementRefExt for ElementRef<'a> {
    fn plain_text(&self) -> String {
        self.traverse()
            .filter_map(|edge| {
                if let Edge::Open(node) = edge {
                    return match node.value() {
                        Node::Text(text) => Some(text.as_ref()),
                        Node::Element(elem) if elem.name() == "img" => elem.attr("alt"),
                        Node::Element(elem) if elem.name() == "br" => Some("\n"),
                        _ => None,
                    };
                }

                None
            })
            .collect()
    }

    fn lines(&self) -> Vec<String> {
        self.plain_text()
            .replace(|c: char| c == '\u{201c}' || c == '\u{201d}', "\"")
            .split('\n')
            .map(|line| line.trim().to_string())
            .collect()
    }

    fn anchor_name(&self) -> Option<&str> {
        self.descendants()
            .filter_map(ElementRef::wrap)
            .find(|elem| elem.value().name() == "a")
            .and_then(|a| a.value().attr("name"))
    }
}
