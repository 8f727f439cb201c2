//! Per-request cost model assembly.
//!
//! Speeds are user-supplied per request, so the whole table is rebuilt for
//! every request rather than patched incrementally. The downstream solver
//! dispatches per-edge by the edge's allowed mode and expects a complete
//! table — a bike-share path crosses the walking and bike slots in one
//! solve — so every slot is built even when only one mode is requested.

use crate::domain::{RequestMode, TravelMode};

/// Default walking speed in m/s, used when a request does not supply one.
pub const DEFAULT_WALKING_SPEED: f32 = 1.12;
/// Default cycling speed in m/s.
pub const DEFAULT_BIKE_SPEED: f32 = 4.1;
/// Default driving speed in m/s.
pub const DEFAULT_CAR_SPEED: f32 = 11.11;
/// Default taxi speed in m/s.
pub const DEFAULT_TAXI_SPEED: f32 = 11.11;

const KMH_PER_MS: f32 = 3.6;

/// Default speed for a request mode, used when a matrix request omits one.
///
/// Bike-share defaults to the cycling speed; the supplied or defaulted speed
/// is always the riding speed.
pub fn default_speed(mode: RequestMode) -> f32 {
    match mode {
        RequestMode::Walking => DEFAULT_WALKING_SPEED,
        RequestMode::Bike | RequestMode::BikeShare => DEFAULT_BIKE_SPEED,
        RequestMode::Car => DEFAULT_CAR_SPEED,
        RequestMode::Taxi => DEFAULT_TAXI_SPEED,
    }
}

/// Requested travel speeds in m/s, one per mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedParams {
    pub walking: f32,
    pub bike: f32,
    pub car: f32,
    pub taxi: f32,
}

impl Default for SpeedParams {
    fn default() -> Self {
        Self {
            walking: DEFAULT_WALKING_SPEED,
            bike: DEFAULT_BIKE_SPEED,
            car: DEFAULT_CAR_SPEED,
            taxi: DEFAULT_TAXI_SPEED,
        }
    }
}

impl SpeedParams {
    /// Default speeds with the requested mode's speed overridden.
    ///
    /// Matrix requests carry a single (mode, speed) pair; the other slots
    /// keep their defaults. A bike-share override sets the bike slot — the
    /// supplied speed is the riding speed — while dock access walks at the
    /// default pace.
    pub fn for_mode(mode: RequestMode, speed: f32) -> Self {
        let mut speeds = Self::default();
        match mode {
            RequestMode::Walking => speeds.walking = speed,
            RequestMode::Bike | RequestMode::BikeShare => speeds.bike = speed,
            RequestMode::Car => speeds.car = speed,
            RequestMode::Taxi => speeds.taxi = speed,
        }
        speeds
    }

    fn for_travel_mode(&self, mode: TravelMode) -> f32 {
        match mode {
            TravelMode::Walking => self.walking,
            TravelMode::Bike => self.bike,
            TravelMode::Car => self.car,
            TravelMode::Taxi => self.taxi,
        }
    }
}

/// Bike-share rent/return penalties, in solver cost seconds.
///
/// The solver weighs these when deciding whether a rented bike beats walking;
/// the rent/return *durations* shown to callers are composition parameters,
/// not costing fields.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BssCosting {
    pub rent_penalty: f32,
    pub return_penalty: f32,
}

/// Everything a request contributes to the cost-model table.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CostingParams {
    pub speeds: SpeedParams,
    pub bss: BssCosting,
}

/// One configured cost model, valid for a single request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostModel {
    mode: TravelMode,
    speed_kmh: f32,
    bss_rent_penalty: f32,
    bss_return_penalty: f32,
}

impl CostModel {
    pub fn mode(&self) -> TravelMode {
        self.mode
    }

    /// Travel speed in km/h, the unit the engine's costing options expect.
    pub fn speed_kmh(&self) -> f32 {
        self.speed_kmh
    }

    pub fn bss_rent_penalty(&self) -> f32 {
        self.bss_rent_penalty
    }

    pub fn bss_return_penalty(&self) -> f32 {
        self.bss_return_penalty
    }
}

/// The per-mode cost-model table for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct CostModelSet {
    models: [CostModel; TravelMode::COUNT],
}

impl CostModelSet {
    /// Builds the full table from request parameters.
    ///
    /// Speeds convert from the request's m/s to the engine's km/h here.
    /// Bike-share penalties ride on the walking and bike slots — the two
    /// modes a bike-share solve mixes — and are zero elsewhere.
    pub fn rebuild(params: &CostingParams) -> Self {
        let models = TravelMode::ALL.map(|mode| {
            let (rent, ret) = match mode {
                TravelMode::Walking | TravelMode::Bike => {
                    (params.bss.rent_penalty, params.bss.return_penalty)
                }
                TravelMode::Car | TravelMode::Taxi => (0.0, 0.0),
            };
            CostModel {
                mode,
                speed_kmh: params.speeds.for_travel_mode(mode) * KMH_PER_MS,
                bss_rent_penalty: rent,
                bss_return_penalty: ret,
            }
        });
        Self { models }
    }

    /// The cost model for one mode.
    pub fn lookup(&self, mode: TravelMode) -> &CostModel {
        &self.models[mode.index()]
    }
}
