//! Street-routing request adapter.
//!
//! A web service that answers: "how do I get from here to there on the
//! street network, and how long does it take to reach these places?" The
//! graph search itself lives in an external engine behind
//! [`engine::RoutingEngine`]; this crate shapes requests for it and builds
//! journeys and matrices out of its answers.

pub mod compose;
pub mod config;
pub mod costing;
pub mod domain;
pub mod engine;
pub mod handler;
pub mod matrix;
pub mod projector;
pub mod web;
