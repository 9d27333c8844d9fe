//! # Services
//!
//! Collaborators the error pipeline receives errors from.
//!
//! - **Validation** (`validation`) - request body decoding, struct validation and
//!   the custom rule registry

pub mod validation;
