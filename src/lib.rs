//! Pawpath
//!
//! Pawpath is the booking and shopping core of a pet-walking service: a
//! step-by-step walk booking workflow, a pricing deriver for walks and a
//! shopping cart for the pet mall, all backed by YAML catalog fixtures.

pub mod booking;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod discounts;
pub mod flags;
pub mod observability;
pub mod payment;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod summary;
pub mod walkers;
