//! `sw-agent`: agent records and population storage.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                        |
//! |-------------|-----------------------------------------------------------------|
//! | [`agent`]   | `Agent`, `AgentState`, `EnergyState`, `MissionCounters`, `Performance` |
//! | [`store`]   | `AgentStore` (id-ordered agents), `AgentRngs` (per-agent RNG)   |
//! | [`builder`] | `AgentStoreBuilder` (fluent construction)                       |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                  |
//! |---------|---------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on all public types.  |

pub mod agent;
pub mod builder;
pub mod store;

#[cfg(test)]
mod tests;

pub use agent::{Agent, AgentState, EnergyState, MissionCounters, Performance};
pub use builder::AgentStoreBuilder;
pub use store::{AgentRngs, AgentStore};
