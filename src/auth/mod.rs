pub mod extractor;
pub mod password;

pub use extractor::AuthUser;
