//! Scene configuration.
//!
//! [`SpaceConfig`] is an explicit, plain value passed into generation and
//! update calls. Callers change it through [`SpaceConfig::apply`], which
//! returns a [`ConfigChange`] naming exactly which keys moved. Each key is
//! either a per-frame multiplier (read every frame, never regenerates) or a
//! generation parameter (invalidates specific particle fields).
//!
//! Configs serialize to JSON with the same camelCase keys the control
//! surface uses:
//!
//! ```json
//! { "blackHoleSize": 5.0, "galaxyStarCount": 12000 }
//! ```

use crate::error::ConfigError;
use crate::field::FieldId;
use crate::spawn::hex_to_rgb;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Tunable scene parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpaceConfig {
    /// Render-time scale for planets, moons and rings.
    pub planet_size_multiplier: f32,
    /// Scales every orbital angular speed.
    pub orbit_speed_multiplier: f32,
    /// Angular speed of the galaxy arms, radians per simulated second.
    pub galaxy_rotation_speed: f32,
    /// Packed `0xRRGGBB` accretion disk color.
    pub accretion_disk_color: u32,
    /// Render-time multiplier on star point sizes.
    pub star_brightness: f32,
    /// Number of particles in the galaxy arms.
    pub galaxy_star_count: u32,
    /// Sun light intensity factor.
    pub sun_glow_intensity: f32,
    /// Event horizon radius.
    pub black_hole_size: f32,
}

impl Default for SpaceConfig {
    fn default() -> Self {
        Self {
            planet_size_multiplier: 1.0,
            orbit_speed_multiplier: 1.0,
            galaxy_rotation_speed: 0.05,
            accretion_disk_color: 0xffaa00,
            star_brightness: 1.0,
            galaxy_star_count: 8000,
            sun_glow_intensity: 2.0,
            black_hole_size: 3.0,
        }
    }
}

fn non_negative(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.max(0.0)
    }
}

impl SpaceConfig {
    /// Load a config from a JSON file. Missing keys take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Parse a config from a JSON string. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut config: SpaceConfig = serde_json::from_str(json)?;
        config.validate();
        Ok(config)
    }

    /// Write the config as pretty JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Clamp every numeric field into its valid range.
    ///
    /// Returns `true` if anything had to be changed.
    pub fn validate(&mut self) -> bool {
        let before = self.clone();
        self.planet_size_multiplier = non_negative(self.planet_size_multiplier);
        self.orbit_speed_multiplier = non_negative(self.orbit_speed_multiplier);
        self.galaxy_rotation_speed = non_negative(self.galaxy_rotation_speed);
        self.star_brightness = non_negative(self.star_brightness);
        self.sun_glow_intensity = non_negative(self.sun_glow_intensity);
        self.black_hole_size = non_negative(self.black_hole_size);
        self.accretion_disk_color &= 0x00ff_ffff;

        let changed = *self != before;
        if changed {
            log::warn!("config contained out-of-range values and was clamped");
        }
        changed
    }

    /// Merge a partial update, returning the keys whose value changed.
    ///
    /// Values are clamped the same way [`validate`](Self::validate) does.
    /// Setting a key to its current value does not count as a change.
    pub fn apply(&mut self, update: &ConfigUpdate) -> ConfigChange {
        let mut change = ConfigChange::default();

        macro_rules! merge {
            ($field:ident, $key:expr, $sanitize:expr) => {
                if let Some(value) = update.$field {
                    let value = $sanitize(value);
                    if value != self.$field {
                        self.$field = value;
                        change.keys.push($key);
                    }
                }
            };
        }

        merge!(planet_size_multiplier, ConfigKey::PlanetSizeMultiplier, non_negative);
        merge!(orbit_speed_multiplier, ConfigKey::OrbitSpeedMultiplier, non_negative);
        merge!(galaxy_rotation_speed, ConfigKey::GalaxyRotationSpeed, non_negative);
        merge!(accretion_disk_color, ConfigKey::AccretionDiskColor, |c: u32| c & 0x00ff_ffff);
        merge!(star_brightness, ConfigKey::StarBrightness, non_negative);
        merge!(galaxy_star_count, ConfigKey::GalaxyStarCount, |n: u32| n);
        merge!(sun_glow_intensity, ConfigKey::SunGlowIntensity, non_negative);
        merge!(black_hole_size, ConfigKey::BlackHoleSize, non_negative);

        change
    }

    /// Accretion disk color as RGB channels in 0..1.
    pub fn accretion_disk_rgb(&self) -> Vec3 {
        hex_to_rgb(self.accretion_disk_color)
    }

    /// Intensity of the sun's point light.
    pub fn sun_light_intensity(&self) -> f32 {
        self.sun_glow_intensity * 100.0
    }
}

/// Partial config update; `None` fields are left alone.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConfigUpdate {
    pub planet_size_multiplier: Option<f32>,
    pub orbit_speed_multiplier: Option<f32>,
    pub galaxy_rotation_speed: Option<f32>,
    pub accretion_disk_color: Option<u32>,
    pub star_brightness: Option<f32>,
    pub galaxy_star_count: Option<u32>,
    pub sun_glow_intensity: Option<f32>,
    pub black_hole_size: Option<f32>,
}

impl ConfigUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a partial update from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn planet_size_multiplier(mut self, value: f32) -> Self {
        self.planet_size_multiplier = Some(value);
        self
    }

    pub fn orbit_speed_multiplier(mut self, value: f32) -> Self {
        self.orbit_speed_multiplier = Some(value);
        self
    }

    pub fn galaxy_rotation_speed(mut self, value: f32) -> Self {
        self.galaxy_rotation_speed = Some(value);
        self
    }

    pub fn accretion_disk_color(mut self, value: u32) -> Self {
        self.accretion_disk_color = Some(value);
        self
    }

    pub fn star_brightness(mut self, value: f32) -> Self {
        self.star_brightness = Some(value);
        self
    }

    pub fn galaxy_star_count(mut self, value: u32) -> Self {
        self.galaxy_star_count = Some(value);
        self
    }

    pub fn sun_glow_intensity(mut self, value: f32) -> Self {
        self.sun_glow_intensity = Some(value);
        self
    }

    pub fn black_hole_size(mut self, value: f32) -> Self {
        self.black_hole_size = Some(value);
        self
    }
}

/// One recognized configuration option.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    PlanetSizeMultiplier,
    OrbitSpeedMultiplier,
    GalaxyRotationSpeed,
    AccretionDiskColor,
    StarBrightness,
    GalaxyStarCount,
    SunGlowIntensity,
    BlackHoleSize,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 8] = [
        ConfigKey::PlanetSizeMultiplier,
        ConfigKey::OrbitSpeedMultiplier,
        ConfigKey::GalaxyRotationSpeed,
        ConfigKey::AccretionDiskColor,
        ConfigKey::StarBrightness,
        ConfigKey::GalaxyStarCount,
        ConfigKey::SunGlowIntensity,
        ConfigKey::BlackHoleSize,
    ];

    /// The camelCase name used on the control surface.
    pub fn name(self) -> &'static str {
        match self {
            ConfigKey::PlanetSizeMultiplier => "planetSizeMultiplier",
            ConfigKey::OrbitSpeedMultiplier => "orbitSpeedMultiplier",
            ConfigKey::GalaxyRotationSpeed => "galaxyRotationSpeed",
            ConfigKey::AccretionDiskColor => "accretionDiskColor",
            ConfigKey::StarBrightness => "starBrightness",
            ConfigKey::GalaxyStarCount => "galaxyStarCount",
            ConfigKey::SunGlowIntensity => "sunGlowIntensity",
            ConfigKey::BlackHoleSize => "blackHoleSize",
        }
    }

    /// Particle fields that must be regenerated when this key changes.
    ///
    /// Empty for per-frame multipliers. Star brightness scales stored
    /// base sizes at render time, so it regenerates nothing.
    pub fn regenerates(self) -> &'static [FieldId] {
        match self {
            ConfigKey::GalaxyStarCount => &[FieldId::GalaxyArms],
            ConfigKey::BlackHoleSize => &[FieldId::AccretionDisk, FieldId::InnerDisk],
            ConfigKey::AccretionDiskColor => &[FieldId::AccretionDisk],
            ConfigKey::PlanetSizeMultiplier
            | ConfigKey::OrbitSpeedMultiplier
            | ConfigKey::GalaxyRotationSpeed
            | ConfigKey::StarBrightness
            | ConfigKey::SunGlowIntensity => &[],
        }
    }

    #[inline]
    pub fn is_generation_parameter(self) -> bool {
        !self.regenerates().is_empty()
    }
}

/// Keys changed by one [`SpaceConfig::apply`] call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigChange {
    keys: Vec<ConfigKey>,
}

impl ConfigChange {
    #[inline]
    pub fn keys(&self) -> &[ConfigKey] {
        &self.keys
    }

    #[inline]
    pub fn contains(&self, key: ConfigKey) -> bool {
        self.keys.contains(&key)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Fields invalidated by this change, deduplicated, in [`FieldId`] order.
    pub fn affected_fields(&self) -> Vec<FieldId> {
        let mut fields: Vec<FieldId> = self
            .keys
            .iter()
            .flat_map(|k| k.regenerates().iter().copied())
            .collect();
        fields.sort();
        fields.dedup();
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SpaceConfig::default();
        assert_eq!(config.galaxy_star_count, 8000);
        assert_eq!(config.black_hole_size, 3.0);
        assert_eq!(config.accretion_disk_color, 0xffaa00);
        assert_eq!(config.sun_light_intensity(), 200.0);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = SpaceConfig::from_json(r#"{ "blackHoleSize": 5.0 }"#).unwrap();
        assert_eq!(config.black_hole_size, 5.0);
        assert_eq!(config.galaxy_star_count, 8000);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let err = SpaceConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
        assert!(err.to_string().starts_with("Invalid config JSON"));
    }

    #[test]
    fn test_validate_clamps_negatives() {
        let mut config = SpaceConfig {
            orbit_speed_multiplier: -2.0,
            black_hole_size: -1.0,
            ..SpaceConfig::default()
        };
        assert!(config.validate());
        assert_eq!(config.orbit_speed_multiplier, 0.0);
        assert_eq!(config.black_hole_size, 0.0);
        assert!(!config.validate());
    }

    #[test]
    fn test_apply_reports_only_real_changes() {
        let mut config = SpaceConfig::default();
        let change = config.apply(
            &ConfigUpdate::new()
                .black_hole_size(5.0)
                .star_brightness(1.0)
                .orbit_speed_multiplier(2.0),
        );

        assert_eq!(change.keys(), &[ConfigKey::OrbitSpeedMultiplier, ConfigKey::BlackHoleSize]);
        assert_eq!(config.black_hole_size, 5.0);
        assert_eq!(change.affected_fields(), vec![FieldId::AccretionDisk, FieldId::InnerDisk]);
    }

    #[test]
    fn test_multipliers_regenerate_nothing() {
        for key in [
            ConfigKey::PlanetSizeMultiplier,
            ConfigKey::OrbitSpeedMultiplier,
            ConfigKey::GalaxyRotationSpeed,
            ConfigKey::StarBrightness,
            ConfigKey::SunGlowIntensity,
        ] {
            assert!(!key.is_generation_parameter(), "{}", key.name());
        }
        assert_eq!(ConfigKey::GalaxyStarCount.regenerates(), &[FieldId::GalaxyArms]);
    }

    #[test]
    fn test_update_from_json() {
        let update = ConfigUpdate::from_json(r#"{ "accretionDiskColor": 16711680 }"#).unwrap();
        assert_eq!(update.accretion_disk_color, Some(0xff0000));
        assert_eq!(update.black_hole_size, None);
    }

    #[test]
    fn test_round_trip_through_file() {
        let path = std::env::temp_dir().join(format!("orrery-config-{}.json", std::process::id()));
        let config = SpaceConfig {
            galaxy_star_count: 1234,
            ..SpaceConfig::default()
        };
        config.save(&path).unwrap();
        let loaded = SpaceConfig::load(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, config);
    }
}
