//! Turret defense: a terminal arcade shooter. The turret at the bottom of the
//! field shoots down falling and scrolling aircraft, survives bombing runs,
//! picks up timed power-ups and waits out the night.
//!
//! The library holds the simulation; the binary adds the terminal front end.

pub mod collision;
pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod spawn;
pub mod timer;
