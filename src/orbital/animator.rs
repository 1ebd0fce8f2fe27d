//! Earth orbit animation
//!
//! The orbit phase is accumulated each frame from the current angular speed, so
//! switching speeds never makes Earth jump. Each time the phase crosses a
//! multiple of 2π an [`OrbitCompleted`] message is written.

use std::f64::consts::TAU;

use bevy::prelude::*;

use crate::core::OrbitConfig;

/// Marker for the entity carrying Earth along its orbit.
#[derive(Component)]
pub struct EarthOrbit;

/// Written once for every full orbit Earth completes.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrbitCompleted {
    /// Total orbits completed so far, starting at 1.
    pub orbit: u32,
}

/// Which angular speed drives the orbit.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum OrbitPace {
    #[default]
    Normal,
    /// Slower pace used while the camera is close to Earth.
    Slow,
}

/// Earth's position in world space, refreshed every frame.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct EarthWorldPosition {
    pub position: Vec3,
    pub phase: f32,
}

/// Accumulated phase and the number of completed orbits.
#[derive(Resource, Debug, Default, Clone)]
pub struct OrbitTracker {
    phase: f64,
    completed: u32,
}

impl OrbitTracker {
    pub fn phase(&self) -> f64 {
        self.phase
    }

    pub fn completed(&self) -> u32 {
        self.completed
    }

    /// Advance the phase and return how many 2π boundaries were crossed.
    ///
    /// Negative or non-finite steps are ignored so the phase only ever grows.
    pub fn advance(&mut self, delta_phase: f64) -> u32 {
        if !delta_phase.is_finite() || delta_phase <= 0.0 {
            return 0;
        }

        self.phase += delta_phase;
        let whole = (self.phase / TAU).floor() as u32;
        if whole <= self.completed {
            return 0;
        }

        let crossed = whole - self.completed;
        self.completed = whole;
        crossed
    }
}

/// Shape and orientation of the orbit ellipse.
#[derive(Debug, Clone, Copy)]
pub struct OrbitGeometry {
    pub semi_major: f32,
    pub eccentricity: f32,
    /// Tilt of the whole orbital plane.
    pub tilt: Quat,
}

impl OrbitGeometry {
    pub fn from_config(config: &OrbitConfig) -> Self {
        Self {
            semi_major: config.semi_major,
            eccentricity: config.eccentricity,
            tilt: Quat::from_rotation_z(config.plane_tilt_deg.to_radians()),
        }
    }

    /// Position inside the (untilted) orbital plane.
    pub fn local_position(&self, phase: f32) -> Vec3 {
        Vec3::new(
            self.semi_major * self.eccentricity * phase.cos(),
            0.0,
            self.semi_major * phase.sin(),
        )
    }

    pub fn world_position(&self, phase: f32) -> Vec3 {
        self.tilt * self.local_position(phase)
    }
}

impl OrbitConfig {
    pub fn angular_speed(&self, pace: OrbitPace) -> f32 {
        match pace {
            OrbitPace::Normal => self.speed,
            OrbitPace::Slow => self.focused_speed,
        }
    }
}

/// Advance Earth along its orbit and report completed orbits.
pub fn advance_earth_orbit(
    time: Res<Time>,
    config: Res<OrbitConfig>,
    pace: Res<OrbitPace>,
    mut tracker: ResMut<OrbitTracker>,
    mut earth_position: ResMut<EarthWorldPosition>,
    mut completed: MessageWriter<OrbitCompleted>,
    mut orbit_query: Query<&mut Transform, With<EarthOrbit>>,
) {
    let speed = config.angular_speed(*pace) as f64;
    let crossed = tracker.advance(time.delta_secs_f64() * speed);

    let first = tracker.completed() - crossed + 1;
    for orbit in first..=tracker.completed() {
        debug!("Earth completed orbit {}", orbit);
        completed.write(OrbitCompleted { orbit });
    }

    // Wrap before narrowing to f32 so precision does not degrade over long runs.
    let phase = tracker.phase().rem_euclid(TAU) as f32;
    let geometry = OrbitGeometry::from_config(&config);

    for mut transform in &mut orbit_query {
        transform.translation = geometry.local_position(phase);
    }

    earth_position.position = geometry.world_position(phase);
    earth_position.phase = phase;
}
