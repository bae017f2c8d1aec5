//! Mapping from domain records to the flat contract record.

use super::domain::{BreederSettings, Client, ContractInput, Dog, ParentDog, RegistrationType, SaleTerms};
use super::record::ContractData;
use crate::format::{
    format_amount, format_contract_date, format_price, format_price_words,
    format_signature_date, DateMode,
};

/// Breed named in the contract when the dog record has none.
pub const DEFAULT_BREED: &str = "American Bully";

/// Build the contract record for one sale.
///
/// Pure and total: every absent optional field maps to an empty string (or
/// the documented default) instead of failing.
pub fn build_contract_data(
    breeder: &BreederSettings,
    client: &Client,
    dog: &Dog,
    terms: &SaleTerms,
    sire: Option<&ParentDog>,
    dam: Option<&ParentDog>,
) -> ContractData {
    let male_count = terms.male_count.unwrap_or(0);
    let female_count = terms.female_count.unwrap_or(0);
    let puppy_count = match male_count.saturating_add(female_count) {
        0 => 1,
        n => n,
    };

    let is_full_rights = terms.registration_type == Some(RegistrationType::FullRights);

    let agreement_date = terms
        .agreement_date
        .as_deref()
        .filter(|d| !d.trim().is_empty())
        .or(terms.sale_date.as_deref());

    let state = breeder
        .jurisdiction_state
        .as_ref()
        .filter(|s| !s.trim().is_empty())
        .or(breeder.address.state.as_ref());

    let balance_due = match (terms.price, terms.deposit) {
        (Some(price), Some(deposit)) => format_price(price - deposit),
        _ => String::new(),
    };

    ContractData {
        breeder_name: text(&breeder.breeder_name),
        kennel_name: text(&breeder.kennel_name),
        kennel_address: breeder.address.one_line(),
        kennel_phone: text(&breeder.phone),
        kennel_email: text(&breeder.email),
        state: text(&state.cloned()),
        county: text(&breeder.jurisdiction_county),

        buyer_name: text(&client.name),
        buyer_full_address: client.address.one_line(),
        buyer_phone: text(&client.phone),
        buyer_email: text(&client.email),

        puppy_name: text(&dog.name),
        puppy_sex: sex_word(dog.sex.as_deref()).to_string(),
        puppy_color: text(&dog.color),
        breed: dog
            .breed
            .as_deref()
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .unwrap_or(DEFAULT_BREED)
            .to_string(),
        puppy_dob_long: format_contract_date(dog.date_of_birth.as_deref(), DateMode::Long),
        puppy_dob_short: format_contract_date(dog.date_of_birth.as_deref(), DateMode::Short),
        puppy_registration: text(&dog.registration_number),
        puppy_microchip: text(&dog.microchip),
        sire_name: parent_name(sire),
        dam_name: parent_name(dam),

        sale_price_amount: terms.price.map(format_amount).unwrap_or_default(),
        sale_price: terms.price.map(format_price).unwrap_or_default(),
        sale_price_words: terms.price.map(format_price_words).unwrap_or_default(),
        deposit_amount: terms.deposit.map(format_price).unwrap_or_default(),
        balance_due,

        puppy_count,
        male_count,
        female_count,
        is_pet: !is_full_rights,
        is_full_rights,

        agreement_date: format_contract_date(agreement_date, DateMode::Long),
        agreement_date_short: format_contract_date(agreement_date, DateMode::Short),
        signing_date: format_signature_date(agreement_date),
        sale_id: text(&terms.sale_id),
    }
}

impl ContractInput {
    /// Build the contract record for this input.
    pub fn to_contract_data(&self) -> ContractData {
        build_contract_data(
            &self.breeder,
            &self.client,
            &self.dog,
            &self.terms,
            self.sire.as_ref(),
            self.dam.as_ref(),
        )
    }
}

fn text(value: &Option<String>) -> String {
    value.as_deref().map(str::trim).unwrap_or("").to_string()
}

fn parent_name(parent: Option<&ParentDog>) -> String {
    parent.map(|p| text(&p.name)).unwrap_or_default()
}

/// Sex code to the word used in the contract.
fn sex_word(code: Option<&str>) -> &'static str {
    match code.map(|c| c.trim().to_ascii_lowercase()).as_deref() {
        Some("m") | Some("male") => "male",
        Some("f") | Some("female") => "female",
        _ => "",
    }
}
