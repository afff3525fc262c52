//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` create/update DTOs for the write paths

pub mod achievement;
pub mod lecturer;
pub mod reference;
pub mod report;
pub mod role;
pub mod session;
pub mod student;
pub mod user;
