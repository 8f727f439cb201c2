//! Travel mode types.

use std::fmt;

/// A street travel mode the engine costs individually.
///
/// These are the modes a solved path's maneuvers can carry, and the slots of
/// a cost-model table. The composite bike-share request mode is *not* one of
/// them — see [`RequestMode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TravelMode {
    Walking,
    Bike,
    Car,
    Taxi,
}

impl TravelMode {
    /// Number of travel modes; the length of a cost-model table.
    pub const COUNT: usize = 4;

    /// All modes, in table order.
    pub const ALL: [TravelMode; TravelMode::COUNT] = [
        TravelMode::Walking,
        TravelMode::Bike,
        TravelMode::Car,
        TravelMode::Taxi,
    ];

    /// The mode's slot in a cost-model table.
    pub fn index(self) -> usize {
        match self {
            TravelMode::Walking => 0,
            TravelMode::Bike => 1,
            TravelMode::Car => 2,
            TravelMode::Taxi => 3,
        }
    }

    /// The wire name of this mode.
    pub fn name(self) -> &'static str {
        match self {
            TravelMode::Walking => "walking",
            TravelMode::Bike => "bike",
            TravelMode::Car => "car",
            TravelMode::Taxi => "taxi",
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned for a mode name the router does not know.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown travel mode `{name}`")]
pub struct InvalidMode {
    name: String,
}

impl InvalidMode {
    /// The rejected mode name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A travel mode as requested by a caller.
///
/// Extends [`TravelMode`] with the composite `BikeShare` mode (wire name
/// `bss`): walk to a dock, rent, ride, return, walk onward. Bike-share
/// requests are solved by a dedicated multimodal solver, but dock access is
/// pedestrian-reachable, so the mode aliases to Walking wherever a single
/// street mode is needed for projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestMode {
    Walking,
    Bike,
    Car,
    Taxi,
    BikeShare,
}

impl RequestMode {
    /// Parses a wire mode name.
    ///
    /// # Examples
    ///
    /// ```
    /// use route_server::domain::RequestMode;
    ///
    /// assert_eq!(RequestMode::parse("bss").unwrap(), RequestMode::BikeShare);
    /// assert!(RequestMode::parse("teleport").is_err());
    /// ```
    pub fn parse(name: &str) -> Result<Self, InvalidMode> {
        match name {
            "walking" => Ok(RequestMode::Walking),
            "bike" => Ok(RequestMode::Bike),
            "car" => Ok(RequestMode::Car),
            "taxi" => Ok(RequestMode::Taxi),
            "bss" => Ok(RequestMode::BikeShare),
            _ => Err(InvalidMode {
                name: name.to_owned(),
            }),
        }
    }

    /// The street mode used to project this request's coordinates onto the
    /// graph. BikeShare aliases to Walking; every other mode is itself.
    pub fn projection_mode(self) -> TravelMode {
        match self {
            RequestMode::Walking | RequestMode::BikeShare => TravelMode::Walking,
            RequestMode::Bike => TravelMode::Bike,
            RequestMode::Car => TravelMode::Car,
            RequestMode::Taxi => TravelMode::Taxi,
        }
    }

    /// The single street mode this request is solved in, or `None` for the
    /// composite bike-share mode, which needs the multimodal solver.
    pub fn solver_mode(self) -> Option<TravelMode> {
        match self {
            RequestMode::Walking => Some(TravelMode::Walking),
            RequestMode::Bike => Some(TravelMode::Bike),
            RequestMode::Car => Some(TravelMode::Car),
            RequestMode::Taxi => Some(TravelMode::Taxi),
            RequestMode::BikeShare => None,
        }
    }

    /// The wire name of this mode.
    pub fn name(self) -> &'static str {
        match self {
            RequestMode::Walking => "walking",
            RequestMode::Bike => "bike",
            RequestMode::Car => "car",
            RequestMode::Taxi => "taxi",
            RequestMode::BikeShare => "bss",
        }
    }
}

impl fmt::Display for RequestMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
