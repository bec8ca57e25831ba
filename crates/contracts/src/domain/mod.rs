pub mod common;
pub mod logistics_partner;
