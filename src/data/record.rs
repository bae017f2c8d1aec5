//! The flat contract data record.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fully resolved values for one contract.
///
/// Every field has a defined value; text that the source records lack is an
/// empty string and renders as a placeholder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContractData {
    pub breeder_name: String,
    pub kennel_name: String,
    pub kennel_address: String,
    pub kennel_phone: String,
    pub kennel_email: String,
    /// Governing state
    pub state: String,
    /// Governing county
    pub county: String,

    pub buyer_name: String,
    pub buyer_full_address: String,
    pub buyer_phone: String,
    pub buyer_email: String,

    pub puppy_name: String,
    /// "male", "female" or empty
    pub puppy_sex: String,
    pub puppy_color: String,
    pub breed: String,
    /// "December 10, 2025"
    #[serde(rename = "puppyDOBLong")]
    pub puppy_dob_long: String,
    /// "12/10/2025"
    #[serde(rename = "puppyDOBShort")]
    pub puppy_dob_short: String,
    pub puppy_registration: String,
    pub puppy_microchip: String,
    pub sire_name: String,
    pub dam_name: String,

    /// Two-decimal amount without symbol, e.g. "2500.00"
    pub sale_price_amount: String,
    /// Currency string, e.g. "$2,500.00"
    pub sale_price: String,
    pub sale_price_words: String,
    pub deposit_amount: String,
    pub balance_due: String,

    pub puppy_count: u32,
    pub male_count: u32,
    pub female_count: u32,
    pub is_pet: bool,
    pub is_full_rights: bool,

    /// Long-form agreement date
    pub agreement_date: String,
    pub agreement_date_short: String,
    /// "10th day of December, 2025"
    pub signing_date: String,
    pub sale_id: String,
}

/// Record field names accepted by [`ContractData::field`].
pub const FIELD_NAMES: &[&str] = &[
    "breederName",
    "kennelName",
    "kennelAddress",
    "kennelPhone",
    "kennelEmail",
    "state",
    "county",
    "buyerName",
    "buyerFullAddress",
    "buyerPhone",
    "buyerEmail",
    "puppyName",
    "puppySex",
    "puppyColor",
    "breed",
    "puppyDOBLong",
    "puppyDOBShort",
    "puppyRegistration",
    "puppyMicrochip",
    "sireName",
    "damName",
    "salePriceAmount",
    "salePrice",
    "salePriceWords",
    "depositAmount",
    "balanceDue",
    "puppyCount",
    "maleCount",
    "femaleCount",
    "isPet",
    "isFullRights",
    "agreementDate",
    "agreementDateShort",
    "signingDate",
    "saleId",
];

/// A single primitive record value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Count(u32),
    Flag(bool),
}

impl FieldValue {
    /// Whether the value has nothing to show.
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::Count(_) | FieldValue::Flag(_) => false,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Count(n) => write!(f, "{}", n),
            FieldValue::Flag(b) => write!(f, "{}", b),
        }
    }
}

impl ContractData {
    /// Look up a field by its camelCase record name.
    pub fn field(&self, name: &str) -> Option<FieldValue> {
        let text = |s: &String| Some(FieldValue::Text(s.clone()));
        match name {
            "breederName" => text(&self.breeder_name),
            "kennelName" => text(&self.kennel_name),
            "kennelAddress" => text(&self.kennel_address),
            "kennelPhone" => text(&self.kennel_phone),
            "kennelEmail" => text(&self.kennel_email),
            "state" => text(&self.state),
            "county" => text(&self.county),
            "buyerName" => text(&self.buyer_name),
            "buyerFullAddress" => text(&self.buyer_full_address),
            "buyerPhone" => text(&self.buyer_phone),
            "buyerEmail" => text(&self.buyer_email),
            "puppyName" => text(&self.puppy_name),
            "puppySex" => text(&self.puppy_sex),
            "puppyColor" => text(&self.puppy_color),
            "breed" => text(&self.breed),
            "puppyDOBLong" => text(&self.puppy_dob_long),
            "puppyDOBShort" => text(&self.puppy_dob_short),
            "puppyRegistration" => text(&self.puppy_registration),
            "puppyMicrochip" => text(&self.puppy_microchip),
            "sireName" => text(&self.sire_name),
            "damName" => text(&self.dam_name),
            "salePriceAmount" => text(&self.sale_price_amount),
            "salePrice" => text(&self.sale_price),
            "salePriceWords" => text(&self.sale_price_words),
            "depositAmount" => text(&self.deposit_amount),
            "balanceDue" => text(&self.balance_due),
            "puppyCount" => Some(FieldValue::Count(self.puppy_count)),
            "maleCount" => Some(FieldValue::Count(self.male_count)),
            "femaleCount" => Some(FieldValue::Count(self.female_count)),
            "isPet" => Some(FieldValue::Flag(self.is_pet)),
            "isFullRights" => Some(FieldValue::Flag(self.is_full_rights)),
            "agreementDate" => text(&self.agreement_date),
            "agreementDateShort" => text(&self.agreement_date_short),
            "signingDate" => text(&self.signing_date),
            "saleId" => text(&self.sale_id),
            _ => None,
        }
    }
}
