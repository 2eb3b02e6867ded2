//! sitedl core: domain resolution for drifting streaming sites, catalog
//! browsing, selection parsing and the download workflow.

pub mod catalog;
pub mod config;
pub mod console;
pub mod domain;
pub mod http;
pub mod logging;
pub mod media;
pub mod naming;
pub mod orchestrator;
pub mod selection;
pub mod transfer;
