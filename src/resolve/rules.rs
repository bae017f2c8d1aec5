//! Dynamic clause rules.
//!
//! Each rule pairs a text matcher with a generator. A generator receives the
//! trimmed literal text and the contract record and returns the clause to
//! render in its place; most ignore the literal wording entirely.

use crate::data::ContractData;
use crate::format::{join_non_empty, or_placeholder, PLACEHOLDER};
use regex::{Captures, Regex};
use std::fmt;
use std::sync::OnceLock;

/// Builds the replacement text for a matched block.
pub type Generator = fn(&str, &ContractData) -> String;

/// How a rule recognizes its block. Matching is case-sensitive and applies
/// to the text with leading whitespace removed.
#[derive(Clone, Copy)]
pub enum Matcher {
    /// Text starts with the string
    Prefix(&'static str),
    /// Text starts with any of the strings
    AnyPrefix(&'static [&'static str]),
    /// Text contains the string
    Contains(&'static str),
    /// Text starts with the first string and contains the second
    PrefixAndContains(&'static str, &'static str),
    /// Arbitrary predicate
    Predicate(fn(&str) -> bool),
}

impl Matcher {
    /// Test trimmed block text.
    pub fn matches(&self, text: &str) -> bool {
        match *self {
            Matcher::Prefix(prefix) => text.starts_with(prefix),
            Matcher::AnyPrefix(prefixes) => prefixes.iter().any(|p| text.starts_with(p)),
            Matcher::Contains(needle) => text.contains(needle),
            Matcher::PrefixAndContains(prefix, needle) => {
                text.starts_with(prefix) && text.contains(needle)
            }
            Matcher::Predicate(predicate) => predicate(text),
        }
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Matcher::Prefix(p) => f.debug_tuple("Prefix").field(p).finish(),
            Matcher::AnyPrefix(p) => f.debug_tuple("AnyPrefix").field(p).finish(),
            Matcher::Contains(n) => f.debug_tuple("Contains").field(n).finish(),
            Matcher::PrefixAndContains(p, n) => {
                f.debug_tuple("PrefixAndContains").field(p).field(n).finish()
            }
            Matcher::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

/// A matcher paired with the generator for its clause.
#[derive(Clone, Copy)]
pub struct DynamicRule {
    /// Stable rule name, shown by template inspection
    pub name: &'static str,
    /// Block recognizer
    pub matcher: Matcher,
    /// Clause generator
    pub generate: Generator,
}

impl DynamicRule {
    /// Create a rule.
    pub const fn new(name: &'static str, matcher: Matcher, generate: Generator) -> Self {
        Self {
            name,
            matcher,
            generate,
        }
    }

    /// Test trimmed block text.
    pub fn matches(&self, text: &str) -> bool {
        self.matcher.matches(text)
    }

    /// Produce the clause for a matched block.
    pub fn apply(&self, text: &str, data: &ContractData) -> String {
        (self.generate)(text, data)
    }
}

impl fmt::Debug for DynamicRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicRule")
            .field("name", &self.name)
            .field("matcher", &self.matcher)
            .finish_non_exhaustive()
    }
}

/// The standard contract rules in match order.
pub fn default_rules() -> Vec<DynamicRule> {
    vec![
        DynamicRule::new("agreement_dated", Matcher::Prefix("This Agreement dated"), agreement_dated),
        DynamicRule::new(
            "agreement_entered",
            Matcher::Prefix("This Agreement is made and entered into this"),
            agreement_entered,
        ),
        DynamicRule::new(
            "consideration",
            Matcher::Prefix("In Consideration of the total sum of"),
            consideration,
        ),
        DynamicRule::new("by_and_between", Matcher::Prefix("By and between"), by_and_between),
        DynamicRule::new(
            "purpose",
            Matcher::Prefix("For the purpose of setting forth the terms"),
            purpose,
        ),
        DynamicRule::new("born_on", Matcher::Prefix("Born on"), born_on),
        DynamicRule::new("sire", Matcher::Prefix("Sire:"), sire),
        DynamicRule::new("dam", Matcher::Prefix("Dam:"), dam),
        DynamicRule::new("jurisdiction", Matcher::Predicate(has_jurisdiction_blanks), jurisdiction),
        DynamicRule::new("signed_on", Matcher::Prefix("Signed on"), signed_on),
        DynamicRule::new(
            "notary_state",
            Matcher::PrefixAndContains("STATE OF", ")"),
            notary_state,
        ),
        DynamicRule::new(
            "notary_county",
            Matcher::PrefixAndContains("COUNTY", ")SS"),
            notary_county,
        ),
        DynamicRule::new(
            "notary_acknowledgment",
            Matcher::PrefixAndContains("On this _", "day of"),
            notary_acknowledgment,
        ),
        DynamicRule::new(
            "pet_clause",
            Matcher::AnyPrefix(&[
                "The puppy is sold as a pet",
                "If \"No Registration\"",
                "If \u{201c}No Registration\u{201d}",
                "The Buyer affirms that their purchase",
                "The General Health Guarantee also becomes null",
            ]),
            keep_if_pet,
        ),
        DynamicRule::new(
            "full_rights_clause",
            Matcher::Prefix("The puppy is sold with breeding rights"),
            keep_if_full_rights,
        ),
    ]
}

fn agreement_dated(_text: &str, data: &ContractData) -> String {
    let contact = join_non_empty(
        [
            Some(or_placeholder(&data.buyer_name)),
            Some(data.buyer_full_address.as_str()),
            Some(data.buyer_phone.as_str()),
            Some(data.buyer_email.as_str()),
        ],
        ", ",
    );
    format!(
        "This Agreement dated {} is between (Buyer: {}) herein referred to as Buyer and {} of {} herein referred to as Breeder.",
        or_placeholder(&data.agreement_date),
        contact,
        or_placeholder(&data.breeder_name),
        or_placeholder(&data.kennel_name),
    )
}

fn agreement_entered(_text: &str, data: &ContractData) -> String {
    format!(
        "This Agreement is made and entered into this {}",
        or_placeholder(&data.signing_date)
    )
}

fn consideration(_text: &str, data: &ContractData) -> String {
    let price = if data.sale_price_amount.trim().is_empty() {
        PLACEHOLDER.to_string()
    } else {
        format!("${}", data.sale_price_amount)
    };
    let noun = if data.puppy_count == 1 { "puppy" } else { "puppies" };
    format!(
        "In Consideration of the total sum of {} ({}) and the mutual promises contained herein, Breeder has agreed to sell, and Buyer has agreed to purchase {} ({} male {} female) {} {}.",
        price,
        or_placeholder(&data.sale_price_words),
        data.puppy_count,
        data.male_count,
        data.female_count,
        data.breed,
        noun,
    )
}

fn by_and_between(_text: &str, data: &ContractData) -> String {
    format!(
        "By and between {} (Breeder) and {} (Buyer),",
        or_placeholder(&data.breeder_name),
        or_placeholder(&data.buyer_name)
    )
}

fn purpose(_text: &str, data: &ContractData) -> String {
    format!(
        "For the purpose of setting forth the terms and conditions of purchase by the Buyer of a Purebred {} from the litter born on {}. Out of {} (Sire), and {} (Dam). For {} the Breeder agrees to sell and buyer agrees to purchase a {} female, {} male companion puppy from the litter described above subject to the following terms.",
        data.breed,
        or_placeholder(&data.puppy_dob_long),
        or_placeholder(&data.sire_name),
        or_placeholder(&data.dam_name),
        or_placeholder(&data.sale_price),
        data.female_count,
        data.male_count,
    )
}

fn born_on(_text: &str, data: &ContractData) -> String {
    format!("Born on {}", or_placeholder(&data.puppy_dob_long))
}

fn sire(_text: &str, data: &ContractData) -> String {
    format!("Sire: {}", or_placeholder(&data.sire_name))
}

fn dam(_text: &str, data: &ContractData) -> String {
    format!("Dam: {}", or_placeholder(&data.dam_name))
}

/// Matches "State of ____, County of ____" and its parenthesized and
/// comma-less variants.
fn jurisdiction_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"State of (\(?)_{2,}(\)?)(,?) County of (\(?)_{2,}(\)?)")
            .expect("valid jurisdiction pattern")
    })
}

fn has_jurisdiction_blanks(text: &str) -> bool {
    jurisdiction_pattern().is_match(text)
}

/// Replaces only the blanks; the rest of the sentence is kept.
fn jurisdiction(text: &str, data: &ContractData) -> String {
    let state = or_placeholder(&data.state);
    let county = or_placeholder(&data.county);
    jurisdiction_pattern()
        .replace_all(text, |caps: &Captures| {
            format!(
                "State of {}{}{}{} County of {}{}{}",
                &caps[1], state, &caps[2], &caps[3], &caps[4], county, &caps[5]
            )
        })
        .into_owned()
}

fn signed_on(_text: &str, data: &ContractData) -> String {
    format!("Signed on {}", or_placeholder(&data.signing_date))
}

fn notary_state(text: &str, data: &ContractData) -> String {
    let suffix = text.find(')').map(|i| &text[i..]).unwrap_or("");
    format!("STATE OF {} {}", or_placeholder(&data.state), suffix)
}

fn notary_county(_text: &str, data: &ContractData) -> String {
    format!("COUNTY OF {} )SS.:", or_placeholder(&data.county))
}

fn notary_acknowledgment(_text: &str, data: &ContractData) -> String {
    format!(
        "On this {}, before me, the undersigned, a Notary Public in and for said State, personally appeared _____________________, personally known to me or proved to me on the basis of satisfactory evidence to be the individual whose name is subscribed to the within Instrument and acknowledged to me that s/he/they executed the same in her/his/their capacity, and that by her/his/their signature on the instrument, the individuals, or the person upon behalf of which the individuals acted, executed the instrument.",
        or_placeholder(&data.signing_date)
    )
}

fn keep_if_pet(text: &str, data: &ContractData) -> String {
    if data.is_pet {
        text.to_string()
    } else {
        String::new()
    }
}

fn keep_if_full_rights(text: &str, data: &ContractData) -> String {
    if data.is_full_rights {
        text.to_string()
    } else {
        String::new()
    }
}
