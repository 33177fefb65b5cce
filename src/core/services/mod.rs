pub mod key_catalog;
pub mod naming;
pub mod orchestrator;
