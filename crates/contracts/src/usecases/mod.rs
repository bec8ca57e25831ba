pub mod assign_logistics;
pub mod common;
pub mod predict_price;
