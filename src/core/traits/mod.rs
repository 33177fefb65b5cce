pub mod backend;
pub mod prompt;
