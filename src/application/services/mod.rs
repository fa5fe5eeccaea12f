//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.

mod pokedex;

pub use pokedex::{AddOutcome, DisplayOrder, EvolveOutcome, PokedexService};
