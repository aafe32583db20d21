//! Helpers shared by the request handlers.
//!
//! Session principal resolution for the access gate and a JSON extractor whose rejections
//! render as validation errors.

pub mod json;
pub mod principal;
