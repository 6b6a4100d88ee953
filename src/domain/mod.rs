pub mod badges;
pub mod boards;
pub mod fields;
pub mod format;
pub mod models;
pub mod scoring;
pub mod search;

pub use models::*;
