//! Common identifier types

pub mod aggregate_id;

pub use aggregate_id::{OrderId, PartnerId};
