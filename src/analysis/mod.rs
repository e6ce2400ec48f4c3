//! Census aggregation.
//!
//! Both aggregators read the same records independently and start from
//! fresh counters on every call.

pub mod distribution;
pub mod population;
pub mod tally;

pub use distribution::species_island_distribution;
pub use population::most_populous;
pub use tally::required_fields;
