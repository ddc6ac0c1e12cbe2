//! Net salary estimation engine for Italian employees
//!
//! This crate turns a gross annual salary into a net take-home breakdown,
//! applying national income-tax brackets, regional and municipal surtaxes,
//! social-security withholding, tax credits and low-income relief, plus
//! optional benefits (meal vouchers, supplementary pension, welfare).
//!
//! Rule sets for different tax years are expressed as data
//! ([`config::TaxRules`]) so historical behaviour stays reproducible.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
