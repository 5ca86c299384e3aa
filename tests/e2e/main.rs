#[path = "../utils/mod.rs"]
mod utils;

mod basic_test;
mod request_test;
