//! Common types used throughout the client
//!
//! Shared type aliases for the loosely typed parts of the API: connector
//! and destination `config` blocks, schema listings, and fields models do
//! not name.

use std::collections::HashMap;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// Generic key-value map with string keys and values
pub type StringMap = HashMap<String, String>;
