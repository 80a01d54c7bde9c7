pub mod advisor;
pub mod calculator;


pub use advisor::{suggest_support, SupportSuggestion};
pub use calculator::{project_delivery, project_delivery_legacy};
