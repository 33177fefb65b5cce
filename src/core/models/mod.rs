pub mod key_identity;
pub mod outcome;
pub mod request;
