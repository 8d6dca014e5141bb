pub mod config;
pub mod datamodel;
pub mod server;
pub mod service;
