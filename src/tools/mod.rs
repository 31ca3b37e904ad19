//! MCP tool inputs for the Zammad server.
//!
//! This module contains the input types for the MCP tools that expose
//! Zammad operations.

mod inputs;

pub use inputs::*;
