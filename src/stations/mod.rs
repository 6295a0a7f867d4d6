pub mod aggregate;
pub mod directory;
pub mod merge;
pub mod reader;
