//! Gateway implementations

pub mod http;
pub mod memory;
