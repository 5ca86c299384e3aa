pub mod test_drain;
