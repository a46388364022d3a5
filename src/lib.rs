// Library surface shared by the three binaries and the integration tests

pub mod aggregator;
pub mod commentary;
pub mod config;
pub mod dashboard;
pub mod logging;
pub mod models;
pub mod provider;
pub mod routes;
pub mod supervisor;
pub mod version;
