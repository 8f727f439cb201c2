//! Domain types for the routing adapter.
//!
//! This module contains the validated domain model: coordinates and place
//! tokens, travel modes, and the journey/matrix response shapes. Types
//! enforce their invariants at construction time, so code that receives them
//! can trust their validity.

mod coord;
mod journey;
mod matrix;
mod mode;
mod place;

pub use coord::Coordinate;
pub use journey::{
    CycleLane, Distances, Durations, Journey, JourneyError, JourneyResponse, PathItem,
    ResponseStatus, Section, SectionEndpoint, SectionType,
};
pub use matrix::{CellStatus, MatrixCell, MatrixResponse};
pub use mode::{InvalidMode, RequestMode, TravelMode};
pub use place::{InvalidPlace, parse_place};
