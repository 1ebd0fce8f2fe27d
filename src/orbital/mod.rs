//! Orbital motion module
//!
//! This module moves Earth along its tilted elliptical orbit and reports
//! completed orbits to the rest of the app.

use bevy::prelude::*;

use crate::core::FrameSet;

pub mod animator;

pub use animator::{
    EarthOrbit, EarthWorldPosition, OrbitCompleted, OrbitGeometry, OrbitPace, OrbitTracker,
    advance_earth_orbit,
};

/// Plugin for Earth's orbit around the sun
pub struct OrbitalPlugin;

impl Plugin for OrbitalPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<OrbitCompleted>()
            .init_resource::<OrbitTracker>()
            .init_resource::<OrbitPace>()
            .init_resource::<EarthWorldPosition>()
            .add_systems(Update, advance_earth_orbit.in_set(FrameSet::Orbit));
    }
}
