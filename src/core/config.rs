//! Runtime configuration
//!
//! Settings are read from an optional JSON file. Every field has a default, so a
//! partial file only overrides what it names. The file is looked up at:
//! - `$TERRA_VIZ_CONFIG` when set
//! - otherwise the platform config directory, e.g. `~/.config/terra-viz/config.json`
//!
//! Each section is inserted into the app as its own resource.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use bevy::prelude::*;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

pub const CONFIG_ENV_VAR: &str = "TERRA_VIZ_CONFIG";
pub const YEAR_PLACEHOLDER: &str = "{year}";

/// Whole configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VizConfig {
    pub assets: AssetPaths,
    pub orbit: OrbitConfig,
    pub camera: CameraConfig,
    pub scene: SceneConfig,
}

/// Asset paths relative to the Bevy asset root. Per-year paths carry a `{year}` placeholder.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetPaths {
    pub land_cover: String,
    pub surface_bump: String,
    pub atmosphere: String,
    pub clouds: String,
    pub sun: String,
    pub moon: String,
    pub satellite: String,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            land_cover: "LandCover_Output/land_cover_{year}.png".to_string(),
            surface_bump: "SurfaceBumpData_HTML/globe_bump_{year}.png".to_string(),
            atmosphere: "NASA_Atmosphere_Output/year_average_{year}.png".to_string(),
            clouds: "8k_earth_clouds.jpg".to_string(),
            sun: "8k_sun_texture.jpg".to_string(),
            moon: "8k_moon_textures.jpg".to_string(),
            satellite: "Terra.glb".to_string(),
        }
    }
}

/// Earth orbit geometry and pacing. Distances are scene units, speeds rad/s.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    pub semi_major: f32,
    /// Stretch applied along X to turn the orbit circle into an ellipse.
    pub eccentricity: f32,
    pub plane_tilt_deg: f32,
    pub speed: f32,
    /// Speed used while the camera is focused on Earth.
    pub focused_speed: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            semi_major: 15.0,
            eccentricity: 1.35,
            plane_tilt_deg: 15.0,
            speed: 0.05,
            focused_speed: 0.01,
        }
    }
}

/// Camera focus controller tuning.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_deg: f32,
    /// Seconds before the intro view hands over to auto-follow.
    pub intro_delay_secs: f32,
    /// Earth clicks closer together than this are ignored. Zero disables the guard.
    pub click_debounce_secs: f32,
    pub initial_eye: [f32; 3],
    pub initial_lerp: f32,
    pub follow_radius: f32,
    pub follow_height: f32,
    /// How far the follow camera trails Earth along its orbit, in radians.
    pub follow_lag_rad: f32,
    pub follow_eye_lerp: f32,
    pub follow_target_lerp: f32,
    pub focus_distance: f32,
    pub focus_lerp: f32,
    pub zoom_min: f32,
    pub zoom_max: f32,
    pub focused_zoom_min: f32,
    pub focused_zoom_max: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_deg: 50.0,
            intro_delay_secs: 5.0,
            click_debounce_secs: 0.25,
            initial_eye: [0.0, 45.0, 12.0],
            initial_lerp: 0.05,
            follow_radius: 28.0,
            follow_height: 8.0,
            follow_lag_rad: 0.35,
            follow_eye_lerp: 0.02,
            follow_target_lerp: 0.05,
            focus_distance: 6.0,
            focus_lerp: 0.08,
            zoom_min: 2.0,
            zoom_max: 60.0,
            focused_zoom_min: 3.0,
            focused_zoom_max: 12.0,
        }
    }
}

/// Static scene dressing.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub star_count: u32,
    pub star_radius: f32,
    pub star_depth: f32,
    pub star_seed: u32,
    pub ambient_brightness: f32,
    pub sun_light_intensity: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            star_count: 10_000,
            star_radius: 200.0,
            star_depth: 100.0,
            star_seed: 0x5eed_1e55,
            ambient_brightness: 15.0,
            sun_light_intensity: 4_000_000.0,
        }
    }
}

impl VizConfig {
    /// Platform config file location.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "terra-viz").map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Read a config file. Returns `Ok(None)` when the file does not exist.
    pub fn load_from_path(path: &Path) -> anyhow::Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: VizConfig = serde_json::from_str(&contents)
            .with_context(|| format!("parsing config file {}", path.display()))?;

        Ok(Some(config.sanitized()))
    }

    /// Resolve the config file and load it, falling back to defaults on any problem.
    pub fn load() -> Self {
        let path = std::env::var_os(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .or_else(Self::default_path);

        let Some(path) = path else {
            warn!("No config directory available, using default settings");
            return Self::default();
        };

        match Self::load_from_path(&path) {
            Ok(Some(config)) => {
                info!("Loaded settings from {}", path.display());
                config
            }
            Ok(None) => {
                debug!("No config file at {}, using defaults", path.display());
                Self::default()
            }
            Err(err) => {
                warn!("{:#}; using default settings", err);
                Self::default()
            }
        }
    }

    /// Pull values that would break the scene back into a usable range.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        let orbit = &mut self.orbit;
        if !(orbit.semi_major > 0.0) {
            orbit.semi_major = defaults.orbit.semi_major;
        }
        if !(orbit.eccentricity > 0.0) {
            orbit.eccentricity = defaults.orbit.eccentricity;
        }
        orbit.speed = orbit.speed.max(0.0);
        orbit.focused_speed = orbit.focused_speed.max(0.0);

        let camera = &mut self.camera;
        for lerp in [
            &mut camera.initial_lerp,
            &mut camera.follow_eye_lerp,
            &mut camera.follow_target_lerp,
            &mut camera.focus_lerp,
        ] {
            *lerp = lerp.clamp(0.001, 1.0);
        }
        camera.intro_delay_secs = camera.intro_delay_secs.max(0.0);
        camera.click_debounce_secs = camera.click_debounce_secs.max(0.0);
        if camera.zoom_min >= camera.zoom_max {
            camera.zoom_min = defaults.camera.zoom_min;
            camera.zoom_max = defaults.camera.zoom_max;
        }
        if camera.focused_zoom_min >= camera.focused_zoom_max {
            camera.focused_zoom_min = defaults.camera.focused_zoom_min;
            camera.focused_zoom_max = defaults.camera.focused_zoom_max;
        }

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_temp_file(test_name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let dir = std::env::temp_dir().join(format!(
            "terra-viz-config-{}-{}-{}",
            test_name,
            std::process::id(),
            nanos
        ));
        fs::create_dir_all(&dir).expect("Failed to create temp dir");
        dir.join("config.json")
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let path = unique_temp_file("missing");
        let loaded = VizConfig::load_from_path(&path).expect("Missing file should not error");
        assert!(loaded.is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let path = unique_temp_file("partial");
        fs::write(&path, r#"{ "orbit": { "speed": 0.2 }, "scene": { "star_count": 12 } }"#)
            .expect("Failed to write config");

        let config = VizConfig::load_from_path(&path)
            .expect("Config should parse")
            .expect("Config should exist");

        assert_eq!(config.orbit.speed, 0.2);
        assert_eq!(config.orbit.semi_major, OrbitConfig::default().semi_major);
        assert_eq!(config.scene.star_count, 12);
        assert_eq!(config.assets, AssetPaths::default());
        assert_eq!(config.camera, CameraConfig::default());
    }

    #[test]
    fn test_malformed_file_reports_path() {
        let path = unique_temp_file("malformed");
        fs::write(&path, "{ not json").expect("Failed to write config");

        let err = VizConfig::load_from_path(&path).expect_err("Malformed file should error");
        assert!(format!("{:#}", err).contains("config.json"));
    }

    #[test]
    fn test_sanitize_repairs_unusable_values() {
        let mut config = VizConfig::default();
        config.orbit.eccentricity = -1.0;
        config.orbit.speed = -3.0;
        config.camera.focus_lerp = 4.0;
        config.camera.zoom_min = 100.0;

        let config = config.sanitized();
        assert_eq!(config.orbit.eccentricity, OrbitConfig::default().eccentricity);
        assert_eq!(config.orbit.speed, 0.0);
        assert_eq!(config.camera.focus_lerp, 1.0);
        assert!(config.camera.zoom_min < config.camera.zoom_max);
    }

    #[test]
    fn test_default_templates_carry_year_placeholder() {
        let paths = AssetPaths::default();
        for template in [&paths.land_cover, &paths.surface_bump, &paths.atmosphere] {
            assert!(template.contains(YEAR_PLACEHOLDER));
        }
    }
}
