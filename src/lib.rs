//! Load a directory of BioC JSON files and serve derived views of it:
//! per-file dashboard metrics, an inspector hierarchy, and a flat publication
//! list with id lookup and related-publication links.

pub mod cli;
pub mod commands;
pub mod common;
pub mod corpus;
pub mod derive;
pub mod index;
pub mod server;
pub mod store;
