//! Orbital evolution model: Keplerian element/state-vector conversions,
//! velocity impulses, the apogee-anchored perigee recurrence used by the
//! campaign, and the banded passive-decay estimate.

pub mod decay;
pub mod elements;
pub mod impulse;

pub use decay::{DecayEstimate, estimate_atmospheric_decay};
pub use elements::{ElementsError, KeplerianElements, StateVector};
pub use impulse::{
    BurnDirection, PerigeeEvolution, apply_delta_v, perigee_after_retro_burn,
    track_perigee_evolution,
};
