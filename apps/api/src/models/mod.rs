pub mod blueprint;
pub mod document;
