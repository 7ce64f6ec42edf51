//! Crate-level tests exercising the public pipeline.
