//! Robosight Tank Bot Library
//!
//! Decision engine for a tick-based tank battle. Each tick the simulator
//! sends `[friends, enemies]` as one JSON line on stdin and expects one JSON
//! line of actions back on stdout, one entry per friendly tank.
//!
//! Diagnostics go to stderr only; stdout carries protocol data exclusively.

pub mod config;
pub mod util;
pub mod game;
pub mod net;
pub mod metrics;
