use super::{
    kind::{normalize, split_types},
    ParseError,
};
use crate::util::StrExt;
use regex::Regex;
use std::sync::LazyLock;

// `On success, ... .` or `Returns ... [on success].`
static RE_ON_SUCCESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:on success,|returns)([^.]*?)(?:\s*on success)?(?:\.|$)").unwrap()
});

static RE_IS_RETURNED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)([^.]*?)\s*is returned").unwrap());

static RE_ARRAY_OF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)((?:array of )+)(\w+)").unwrap());

/// Guesses the types a method returns from its description.
pub fn infer_returns(description: &str) -> Result<Vec<String>, ParseError> {
    let clause = RE_ON_SUCCESS
        .captures(description)
        .or_else(|| RE_IS_RETURNED.captures(description))
        .and_then(|caps| caps.get(1))
        .ok_or_else(|| ParseError::ReturnTypeNotFound(description.to_string()))?
        .as_str();

    Ok(types_from_clause(clause))
}

fn types_from_clause(clause: &str) -> Vec<String> {
    let longest_array = RE_ARRAY_OF
        .captures_iter(clause)
        .max_by_key(|caps| caps[0].len());

    if let Some(caps) = longest_array {
        let depth = caps[1].len() / "array of ".len();
        let inner = normalize(&caps[2]);
        return vec!["Array of ".repeat(depth) + &inner];
    }

    clause
        .split_whitespace()
        .map(|token| token.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|token| token.is_first_letter_uppercase())
        .flat_map(split_types)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("On success, the sent Message is returned.", &["Message"])]
    #[case(
        "Returns basic information about the bot in the form of a User object.",
        &["User"]
    )]
    #[case("An Array of Update objects is returned.", &["Array of Update"])]
    #[case("Returns True on success.", &["Boolean"])]
    #[case("Use this method to close the bot instance. Returns True on success. Requires no parameters.", &["Boolean"])]
    #[case(
        "Use this method to get a file. On success, a File object is returned.",
        &["File"]
    )]
    #[case(
        "On success, an array of MessageId of the sent messages is returned.",
        &["Array of MessageId"]
    )]
    #[case(
        "Returns Array of Array of PhotoSize on success.",
        &["Array of Array of PhotoSize"]
    )]
    #[case(
        "On success, if the message is not an inline message, the edited Message is returned, otherwise True is returned.",
        &["Message", "Boolean"]
    )]
    fn return_types(#[case] description: &str, #[case] expected: &[&str]) {
        assert_eq!(infer_returns(description).unwrap(), expected);
    }

    #[test]
    fn duplicates_are_kept() {
        assert_eq!(
            infer_returns("Returns the Message or Message object.").unwrap(),
            vec!["Message", "Message"]
        );
    }

    #[test]
    fn on_success_suffix_is_not_captured() {
        let caps = RE_ON_SUCCESS
            .captures("Returns the uploaded File on success.")
            .unwrap();
        assert_eq!(&caps[1], " the uploaded File");
    }

    #[test]
    fn no_return_clause() {
        let description = "Use this method to receive incoming updates.";
        match infer_returns(description) {
            Err(ParseError::ReturnTypeNotFound(text)) => assert_eq!(text, description),
            other => panic!("unexpected: {:?}", other),
        }
    }
}
