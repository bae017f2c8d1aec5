//! Domain record shapes consumed by the contract data builder.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Postal address fields as stored on breeder and client records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    /// Street line 1
    pub address_line1: Option<String>,
    /// Street line 2
    pub address_line2: Option<String>,
    /// City
    pub city: Option<String>,
    /// State or province
    pub state: Option<String>,
    /// Postal code
    pub postal_code: Option<String>,
}

impl Address {
    /// Single-line form with empty parts skipped.
    pub fn one_line(&self) -> String {
        crate::format::format_address(
            self.address_line1.as_deref(),
            self.address_line2.as_deref(),
            self.city.as_deref(),
            self.state.as_deref(),
            self.postal_code.as_deref(),
        )
    }
}

/// Kennel-wide settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreederSettings {
    /// Breeder's legal name
    pub breeder_name: Option<String>,
    /// Kennel name
    pub kennel_name: Option<String>,
    /// Kennel address
    #[serde(flatten)]
    pub address: Address,
    /// Kennel phone
    pub phone: Option<String>,
    /// Kennel email
    pub email: Option<String>,
    /// State whose law governs the agreement
    pub jurisdiction_state: Option<String>,
    /// County whose courts hear disputes
    pub jurisdiction_county: Option<String>,
}

/// A buyer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Client {
    /// Full name
    pub name: Option<String>,
    /// Mailing address
    #[serde(flatten)]
    pub address: Address,
    /// Phone number
    pub phone: Option<String>,
    /// Email address
    pub email: Option<String>,
}

/// The puppy being sold.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dog {
    /// Registered or call name
    pub name: Option<String>,
    /// Sex code ("M"/"F" or "male"/"female")
    pub sex: Option<String>,
    /// Breed
    pub breed: Option<String>,
    /// Coat color
    pub color: Option<String>,
    /// Date of birth (ISO date)
    pub date_of_birth: Option<String>,
    /// Registration number
    pub registration_number: Option<String>,
    /// Microchip number
    pub microchip: Option<String>,
}

/// Sire or dam of the litter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParentDog {
    /// Registered name
    pub name: Option<String>,
    /// Registration number
    pub registration_number: Option<String>,
}

/// Registration rights conveyed with the sale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationType {
    /// Companion sale, no breeding rights
    #[default]
    Pet,
    /// Full breeding rights
    FullRights,
}

/// Negotiated terms of one sale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaleTerms {
    /// Sale identifier
    pub sale_id: Option<String>,
    /// Date the sale was recorded
    pub sale_date: Option<String>,
    /// Date written into the agreement; defaults to `sale_date`
    pub agreement_date: Option<String>,
    /// Total price in dollars
    pub price: Option<f64>,
    /// Deposit already paid
    pub deposit: Option<f64>,
    /// Number of male puppies in the sale
    pub male_count: Option<u32>,
    /// Number of female puppies in the sale
    pub female_count: Option<u32>,
    /// Registration rights; pet when unset
    pub registration_type: Option<RegistrationType>,
}

/// Everything needed to build one contract, as a single JSON document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractInput {
    /// Breeder settings
    pub breeder: BreederSettings,
    /// Buyer
    pub client: Client,
    /// Puppy
    pub dog: Dog,
    /// Sale terms
    pub terms: SaleTerms,
    /// Sire, when known
    pub sire: Option<ParentDog>,
    /// Dam, when known
    pub dam: Option<ParentDog>,
}

impl ContractInput {
    /// Parse one input record from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::InvalidInput(e.to_string()))
    }

    /// Parse an array of input records from JSON.
    pub fn list_from_json(json: &str) -> Result<Vec<Self>> {
        serde_json::from_str(json).map_err(|e| Error::InvalidInput(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_contract_input() {
        let json = r#"{
            "breeder": { "breeder_name": "Jo Smith", "kennel_name": "Iron Bully", "city": "Austin" },
            "client": { "name": "Sam Lee", "address_line1": "1 Elm St", "state": "TX" },
            "dog": { "name": "Tank", "sex": "M" },
            "terms": { "price": 2500, "male_count": 1, "registration_type": "full_rights" },
            "sire": { "name": "Duke" }
        }"#;
        let input = ContractInput::from_json(json).unwrap();
        assert_eq!(input.breeder.address.city.as_deref(), Some("Austin"));
        assert_eq!(input.client.address.one_line(), "1 Elm St, TX");
        assert_eq!(input.terms.price, Some(2500.0));
        assert_eq!(
            input.terms.registration_type,
            Some(RegistrationType::FullRights)
        );
        assert!(input.dam.is_none());
    }

    #[test]
    fn test_empty_input_is_valid() {
        let input = ContractInput::from_json("{}").unwrap();
        assert_eq!(input, ContractInput::default());
    }

    #[test]
    fn test_invalid_input() {
        let err = ContractInput::from_json(r#"{ "terms": { "price": "lots" } }"#).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }
}
