//! Pokedex manager.
//!
//! Each owner holds a binary search tree of catalog records keyed by id.
//! Owners form a circular doubly-linked ring that can be walked in both
//! directions and bubble-sorted by name.
//!
//! Layers:
//! - [`domain`]: records, catalog, tree engine, owner ring
//! - [`application`]: use cases over the ring ([`application::services::PokedexService`])
//! - [`cli`]: clap arguments and the interactive menu
//! - [`config`]: layered settings

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;
