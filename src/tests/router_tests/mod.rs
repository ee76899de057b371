mod export_tests;
mod listings_tests;
