//! Medical image report assistant.
//!
//! An uploaded image is sent with a fixed prompt to a hosted multimodal
//! model; the reply is split into labeled sections and shown as collapsible
//! panels.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod intake;
pub mod report;
pub mod server;
