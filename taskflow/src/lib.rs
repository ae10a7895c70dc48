//! `TaskFlow`: terminal task tracker with local persistence.

pub mod app;
pub mod config;
pub mod markup;
pub mod notify;
pub mod session;
pub mod storage;
pub mod tasks;
pub mod ui;
