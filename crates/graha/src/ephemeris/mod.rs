//! Collaborator traits for chart construction and planet motion, plus a
//! linear reference implementation of both.

pub mod linear;
pub mod provider;

pub use linear::{LinearEphemeris, SIDEREAL_ROTATION_DEG_PER_DAY};
pub use provider::{ChartProvider, EphemerisProvider};
