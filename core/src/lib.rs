pub mod optional;
pub mod error;
pub mod app;

pub use error::OptionalError;
pub use optional::Optional;
