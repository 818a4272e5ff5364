//! MCP server exposing Plane projects and issues as tools.
//!
//! Layers, leaf first: [`config`] → [`client`] → [`schema`] → [`services`] →
//! [`mcp`], with [`cli`] wiring them into the `plane-mcp` binary.

pub mod cli;
pub mod client;
pub mod config;
pub mod mcp;
pub mod schema;
pub mod services;

mod serde_utils;

#[cfg(test)]
mod config_test;
#[cfg(test)]
mod test_support;
