// Test utilities shared by the unit tests
pub mod utils;
