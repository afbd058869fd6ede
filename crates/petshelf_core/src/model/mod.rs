//! Domain model for the pet catalog.
//!
//! # Responsibility
//! - Define the canonical pet record and its mutation payload.
//! - Keep per-field validation rules next to the data they protect.
//!
//! # Invariants
//! - A stored record's `id` is assigned by the store, never by callers.
//! - Write paths validate payloads before any SQL mutation.

pub mod pet;
