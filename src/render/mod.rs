//! Rendering module for machine-readable views of extraction output.

mod json;

pub use json::{document_to_json, sidecar_path, to_json, write_sidecar, JsonFormat};
