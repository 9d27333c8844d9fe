//! # HTTP Request Handlers
//!
//! Demo endpoints that drive the error pipeline end to end.
//!
//! ## Available Handlers
//!
//! - **Health Check** (`health_check`) - Application health monitoring
//! - **Maintenance** (`maintenance`) - A passthrough error without a status
//! - **Parse** (`parse`) - Number and date time parsing of query parameters
//! - **Widget** (`widget`) - Body binding, validation and lookups

mod health_check;
mod maintenance;
mod parse;
mod widget;

pub use health_check::*;
pub use maintenance::*;
pub use parse::*;
pub use widget::*;
