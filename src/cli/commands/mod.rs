pub mod decrypt;
pub mod encrypt;
pub mod keys;
pub mod report_helpers;
