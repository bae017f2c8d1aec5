//! Contract data: domain records in, flat contract record out.
//!
//! The domain types mirror the shapes owned by the record-management layer
//! (breeder settings, clients, dogs, sale terms). The builder maps them into
//! a [`ContractData`] record with every fallback spelled out.

mod builder;
mod domain;
mod record;

pub use builder::{build_contract_data, DEFAULT_BREED};
pub use domain::{Address, BreederSettings, Client, ContractInput, Dog, ParentDog, RegistrationType, SaleTerms};
pub use record::{ContractData, FieldValue, FIELD_NAMES};
