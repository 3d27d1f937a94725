//! Orbit propagation and ground-station geometry for the laser_broom workspace.
//!
//! Wraps a self-contained SGP4-class propagator (J2 secular rates plus B* drag)
//! behind the adapter surface the visibility scanner consumes: two-line element
//! parsing, inertial state propagation, and topocentric look angles for a
//! geodetic ground station with the Earth-rotation correction applied at the
//! query instant.

pub mod station;
pub mod tle;

mod propagator;

pub use propagator::{EciState, LookAngles, OrbitPropagator, PropagationError};
pub use station::GroundStation;
pub use tle::{OrbitalElements, TleError, parse_tle};
