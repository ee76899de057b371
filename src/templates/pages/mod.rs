pub mod home;
pub mod listings;

pub use home::{home_page, search_form};
pub use listings::listings_page;
