/*
[INPUT]:  Provider schema definitions and serde requirements
[OUTPUT]: Typed Rust structs/enums for the on-ramp pipeline
[POS]:    Data layer - type definitions
[UPDATE]: When provider schema changes or new types added
*/

pub mod address;
pub mod enums;
pub mod models;
pub mod requests;
pub mod responses;

pub use address::{is_valid_address, validate_destination};
pub use enums::*;
pub use models::*;
pub use requests::*;
pub use responses::*;
