//! Ground-based pulsed-laser debris removal planner.
//!
//! The member crates carry the physics and planning logic; this facade
//! re-exports them under one roof so multiple front-ends (CLI, plotting,
//! future services) share the same stack.

pub use broom_campaign as campaign;
pub use broom_config as config;
pub use broom_core as core;
pub use broom_cost as cost;
pub use broom_export as export;
pub use broom_laser as laser;
pub use broom_orbits as orbits;
pub use broom_propagation as propagation;
pub use broom_thermal as thermal;
pub use broom_visibility as visibility;

/// Returns the version of the library for smoke tests.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
