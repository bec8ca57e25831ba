//! Wire types shared between the AgriLink pages and the marketplace backend.

pub mod domain;
pub mod usecases;
