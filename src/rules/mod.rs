//! Rule implementations for clibscan.
//!
//! Pure functions that turn analysis output into issues. Each function takes
//! only the inputs it needs and returns one issue type.
//!
//! ## Module Structure
//!
//! - `duplicate`: categories declared at several locations
//! - `circular`: embed/dependency cycles
//! - `unused`: declared but never used categories
//! - `missing`: page components without a matching category
//! - `parse_error`: files that could not be read or parsed

pub mod circular;
pub mod duplicate;
pub mod missing;
pub mod parse_error;
pub mod unused;
