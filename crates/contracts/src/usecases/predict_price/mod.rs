pub mod request;
pub mod response;

pub use request::PredictPriceRoute;
pub use response::PredictPriceResponse;
