pub mod card;
pub mod error;

pub use card::card;
pub use error::error_page;
