use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::BufReader,
    path::{Path, PathBuf},
};
use thiserror::Error;

const QUALIFIER: &str = "com";
const ORGANIZATION: &str = "twistcube";
const APPLICATION: &str = "twistcube";
const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("unable to resolve platform config directory")]
    MissingProjectDirs,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings file: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSettings {
    pub camera: CameraSettings,
    pub interaction: InteractionSettings,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            camera: CameraSettings::default(),
            interaction: InteractionSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraSettings {
    /// Orbit distance at startup.
    pub initial_radius: f32,
    pub min_radius: f32,
    pub max_radius: f32,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near_plane: f32,
    pub far_plane: f32,
    /// Multiplier on wheel zoom steps.
    pub zoom_sensitivity: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            initial_radius: 100.0,
            min_radius: 50.0,
            max_radius: 300.0,
            fov_degrees: 45.0,
            near_plane: 1.0,
            far_plane: 1000.0,
            zoom_sensitivity: 1.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionSettings {
    /// Multiplier on the per-sample twist angle.
    pub rotate_speed: f32,
    /// Trackball sphere radius as a fraction of the half-viewport.
    pub arcball_radius: f32,
    /// Number of random quarter turns a shuffle applies.
    pub shuffle_twists: u32,
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self {
            rotate_speed: 1.0,
            arcball_radius: 1.0,
            shuffle_twists: 20,
        }
    }
}

pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new() -> Result<Self, SettingsError> {
        let dirs = ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
            .ok_or(SettingsError::MissingProjectDirs)?;
        let config_dir = dirs.config_dir();
        fs::create_dir_all(config_dir)?;
        let path = config_dir.join(SETTINGS_FILE);
        Ok(Self { path })
    }

    /// Store backed by an explicit file instead of the platform config dir.
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn load(&self) -> Result<UserSettings, SettingsError> {
        if !self.path.exists() {
            return Ok(UserSettings::default());
        }
        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let settings = serde_json::from_reader(reader)?;
        Ok(settings)
    }

    pub fn save(&self, settings: &UserSettings) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(&self.path)?;
        serde_json::to_writer_pretty(file, settings)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Clone for SettingsStore {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_round_trip_through_json() {
        let settings = UserSettings::default();
        let json = serde_json::to_string(&settings).unwrap();
        let back: UserSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(back.camera.initial_radius, settings.camera.initial_radius);
        assert_eq!(back.camera.max_radius, 300.0);
        assert_eq!(back.interaction.shuffle_twists, 20);
    }

    #[test]
    fn save_then_load_round_trips_through_disk() {
        let path = std::env::temp_dir().join("twistcube-settings-roundtrip.json");
        let store = SettingsStore::with_path(path.clone());
        let mut settings = UserSettings::default();
        settings.camera.initial_radius = 120.0;
        settings.interaction.shuffle_twists = 7;
        store.save(&settings).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.camera.initial_radius, 120.0);
        assert_eq!(loaded.interaction.shuffle_twists, 7);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn missing_file_loads_defaults() {
        let store =
            SettingsStore::with_path(std::env::temp_dir().join("twistcube-settings-absent.json"));
        let loaded = store.load().unwrap();
        assert_eq!(loaded.interaction.shuffle_twists, 20);
        assert_eq!(loaded.camera.initial_radius, 100.0);
    }

    #[test]
    fn camera_defaults_match_startup_placement() {
        let camera = CameraSettings::default();
        assert!(camera.min_radius <= camera.initial_radius);
        assert!(camera.initial_radius <= camera.max_radius);
        assert_eq!(camera.fov_degrees, 45.0);
        assert_eq!(camera.near_plane, 1.0);
        assert_eq!(camera.far_plane, 1000.0);
    }
}
