pub mod logistics;
pub mod price_suggestion;
pub mod search;
pub mod voice;
