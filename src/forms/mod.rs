pub mod chat;
pub mod credentials;

pub use chat::*;
pub use credentials::*;
