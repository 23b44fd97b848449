pub mod auth;
pub mod cli;
pub mod configuration;
pub mod connectors;
pub mod conversation;
pub mod exchange;
pub mod forms;
pub mod helpers;
pub mod i18n;
pub mod models;
pub mod render;
pub mod routes;
pub mod startup;
pub mod telemetry;
