pub mod config;
pub mod domain;
pub mod email_client;
pub mod routes;
pub mod sequence;
pub mod startup;
pub mod telemetry;
pub mod templates;
