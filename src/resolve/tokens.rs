//! Inline token replacement for literal template text.

use crate::data::ContractData;
use crate::format::PLACEHOLDER;
use regex::{Captures, Regex};
use std::sync::OnceLock;

/// Replaces inline markers with record values, leaving surrounding text
/// untouched.
///
/// Recognized markers:
///
/// - `(______)Kennel name`: the kennel name
/// - `(____)`: the kennel name
/// - `((KENNEL NAME))`: the named field, uppercased
/// - `{buyerName}`: the named field as-is
///
/// All markers are found in one left-to-right scan, so substituted values
/// are never scanned again. A known field with no value renders as
/// [`PLACEHOLDER`]; a marker naming an unknown field is left verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenReplacer;

fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(concat!(
            r"(?P<label>\(_{2,}\)\s*Kennel name)",
            r"|(?P<blank>\(_{2,}\))",
            r"|\(\((?P<upper>[A-Z][A-Z ]*)\)\)",
            r"|\{(?P<field>[A-Za-z][A-Za-z0-9]*)\}",
        ))
        .expect("valid token pattern")
    })
}

impl TokenReplacer {
    /// Create a replacer with the standard marker patterns.
    pub const fn new() -> Self {
        Self
    }

    /// Replace every marker in `text`.
    pub fn replace(&self, text: &str, data: &ContractData) -> String {
        token_pattern()
            .replace_all(text, |caps: &Captures| {
                if caps.name("label").is_some() || caps.name("blank").is_some() {
                    return value_or_placeholder(&data.kennel_name).to_string();
                }
                if let Some(name) = caps.name("upper") {
                    let name = name.as_str().trim();
                    return match lookup_upper(name, data) {
                        Some(value) => value_or_placeholder(&value).to_uppercase(),
                        None => {
                            log::warn!("Unknown template token (({}))", name);
                            caps[0].to_string()
                        }
                    };
                }
                let name = caps.name("field").map_or("", |m| m.as_str());
                match data.field(name) {
                    Some(value) if value.is_blank() => PLACEHOLDER.to_string(),
                    Some(value) => value.to_string(),
                    None => {
                        log::warn!("Unknown template field {{{}}}", name);
                        caps[0].to_string()
                    }
                }
            })
            .into_owned()
    }
}

fn value_or_placeholder(value: &str) -> &str {
    crate::format::or_placeholder(value)
}

/// Resolve an uppercase token name such as `KENNEL NAME`.
///
/// The name is first tried as a camelCase record field (`kennelName`), then
/// against a few short aliases.
fn lookup_upper(name: &str, data: &ContractData) -> Option<String> {
    if let Some(value) = data.field(&to_camel_case(name)) {
        return Some(value.to_string());
    }

    let field = match name {
        "BREEDER" => "breederName",
        "BUYER" | "PURCHASER" => "buyerName",
        "KENNEL" => "kennelName",
        "SIRE" => "sireName",
        "DAM" => "damName",
        "PRICE" => "salePrice",
        "DATE" => "agreementDate",
        _ => return None,
    };
    data.field(field).map(|v| v.to_string())
}

fn to_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for (i, word) in name.split_whitespace().enumerate() {
        let lower = word.to_lowercase();
        if i == 0 {
            out.push_str(&lower);
        } else {
            let mut chars = lower.chars();
            if let Some(first) = chars.next() {
                out.extend(first.to_uppercase());
                out.push_str(chars.as_str());
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data() -> ContractData {
        ContractData {
            kennel_name: "Iron Bully Kennels".to_string(),
            breeder_name: "Jo Smith".to_string(),
            buyer_name: "Sam Lee".to_string(),
            state: "Texas".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_upper_token() {
        let replacer = TokenReplacer::new();
        assert_eq!(
            replacer.replace("((KENNEL NAME)) guarantees the puppy", &data()),
            "IRON BULLY KENNELS guarantees the puppy"
        );
        assert_eq!(
            replacer.replace("laws of ((STATE)).", &data()),
            "laws of TEXAS."
        );
        assert_eq!(
            replacer.replace("((BREEDER)) and ((BUYER))", &data()),
            "JO SMITH and SAM LEE"
        );
    }

    #[test]
    fn test_kennel_label_and_blank() {
        let replacer = TokenReplacer::new();
        assert_eq!(
            replacer.replace("Sold by (______)Kennel name to Buyer", &data()),
            "Sold by Iron Bully Kennels to Buyer"
        );
        assert_eq!(
            replacer.replace("return the puppy to (____) within 72 hours", &data()),
            "return the puppy to Iron Bully Kennels within 72 hours"
        );
    }

    #[test]
    fn test_field_reference() {
        let replacer = TokenReplacer::new();
        assert_eq!(
            replacer.replace("Buyer: {buyerName}, Breeder: {breederName}", &data()),
            "Buyer: Sam Lee, Breeder: Jo Smith"
        );
    }

    #[test]
    fn test_blank_values_become_placeholder() {
        let replacer = TokenReplacer::new();
        let empty = ContractData::default();
        assert_eq!(
            replacer.replace("((KENNEL NAME)) / {buyerName} / (___)", &empty),
            format!("{0} / {0} / {0}", PLACEHOLDER)
        );
    }

    #[test]
    fn test_unknown_markers_left_verbatim() {
        let replacer = TokenReplacer::new();
        assert_eq!(
            replacer.replace("((FAVORITE TOY)) and {favoriteToy}", &data()),
            "((FAVORITE TOY)) and {favoriteToy}"
        );
    }

    #[test]
    fn test_text_without_markers_unchanged() {
        let replacer = TokenReplacer::new();
        let text = "The Buyer agrees to provide (a) food and (b) shelter.";
        assert_eq!(replacer.replace(text, &data()), text);
    }

    #[test]
    fn test_substituted_values_are_not_rescanned() {
        let replacer = TokenReplacer::new();
        let data = ContractData {
            kennel_name: "{buyerName} ((STATE))".to_string(),
            ..data()
        };
        assert_eq!(
            replacer.replace("Sold by (____) to {buyerName}", &data),
            "Sold by {buyerName} ((STATE)) to Sam Lee"
        );
    }

    #[test]
    fn test_nested_blank_inside_parentheses() {
        let replacer = TokenReplacer::new();
        assert_eq!(
            replacer.replace("Kennel ((___))", &data()),
            "Kennel (Iron Bully Kennels)"
        );
    }

    #[test]
    fn test_to_camel_case() {
        assert_eq!(to_camel_case("KENNEL NAME"), "kennelName");
        assert_eq!(to_camel_case("STATE"), "state");
        assert_eq!(to_camel_case("BUYER FULL ADDRESS"), "buyerFullAddress");
    }
}
