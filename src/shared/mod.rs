pub mod constants;
pub mod memory_store;
#[cfg(test)]
pub mod test_helpers;
pub mod types;
pub mod validation;
