pub mod call;
pub mod serve;
pub mod tools;

#[cfg(test)]
#[path = "call_test.rs"]
mod call_test;
