pub mod aggregate;

pub use aggregate::LogisticsPartner;
