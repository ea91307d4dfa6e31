pub mod app;
pub mod cli;
pub mod config;
pub mod dispatch;
pub mod exit;
pub mod observability;
pub mod report;
pub mod tasks;
pub mod upload;
