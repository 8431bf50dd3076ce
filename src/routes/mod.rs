pub mod analyze;
pub mod health;
pub mod json;

pub use analyze::analyze_handler;
pub use health::health_handler;
pub use json::AppJson;
