pub mod request;
pub mod response;

pub use request::{assign_logistics_path, AssignLogisticsRequest};
pub use response::AssignLogisticsResponse;
