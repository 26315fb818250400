pub mod error;
pub mod id;
pub mod service;
pub mod store;
pub mod validation;
