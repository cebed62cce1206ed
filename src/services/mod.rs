pub mod refresh_service;

pub use refresh_service::{RefreshError, RefreshService};
