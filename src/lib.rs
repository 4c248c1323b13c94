//! Movie Catalog - catalog, accounts and premium payments.
//!
//! Users buy a premium window through a hosted card checkout. A payment is
//! settled by whichever of client verification or the gateway webhook
//! confirms it first; the store's compare-and-set guarantees premium is
//! granted once per payment.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
