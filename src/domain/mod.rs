//! Core domain types and logic.

pub mod bar;
pub mod ledger;
pub mod transaction;
pub mod config;
pub mod config_validation;
pub mod reference;
pub mod engine;
pub mod summary;
pub mod error;
