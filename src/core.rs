pub mod config;
pub mod form;
pub mod grouping;
pub mod measurement;
pub mod severity;
pub mod store;
