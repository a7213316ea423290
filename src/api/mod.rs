//! Wire types and the REST client for the team directory service.

mod client;
mod error;
mod types;

pub use client::{ApiClient, DataService};
#[cfg(test)]
pub use error::ApiError;
pub use types::{Dependency, InteractionMode, Squad, SquadId};
