//! Core library components.
//!
//! This module contains the reusable logic: the secret model and its
//! conversions, the diff engine, the YAML codec, the validation engine,
//! and the KMS and store collaborators they are handed.

pub mod cipher;
pub mod collection;
pub mod config;
pub mod constants;
pub mod domain;
pub mod store;
pub mod sync;
pub mod types;
pub mod validation;
pub mod yaml;
