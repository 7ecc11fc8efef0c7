// Crate root library declaration and module exports.
pub mod config;
pub mod context;
pub mod controller;
pub mod importer;
pub mod model;
pub mod reconciler;
pub mod scheduler;
pub mod store;
