pub mod chat;
pub mod health_checks;

pub use chat::*;
pub use health_checks::*;
