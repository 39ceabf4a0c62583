//! Utility functions used by the transport
//!
//! This module contains the encoding and JSON helpers shared by the
//! configuration and transport modules.

pub mod base64;
pub mod json;

pub use self::base64::{basic_authorization, encode_base64};
pub use self::json::merge_json_objects;
