/*
[INPUT]:  Gateway and controller data requirements
[OUTPUT]: Shared type definitions and re-exports
[POS]:    Data layer - module wiring for types
[UPDATE]: When adding new type modules
*/

pub mod enums;
pub mod models;
pub mod requests;

pub use enums::*;
pub use models::*;
pub use requests::*;
