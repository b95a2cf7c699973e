//! View modes and the groups they activate.
//!
//! Exactly one [`ViewMode`] is active at a time. Each mode maps to a fixed
//! [`GroupSet`]; only groups in the active set are advanced by
//! [`Scene::step`](crate::scene::Scene::step) and only they are reported to
//! the renderer. Switching modes flips the set immediately, in the same
//! frame the command is issued.

use crate::error::ParseViewModeError;
use glam::Vec3;
use std::fmt;
use std::str::FromStr;

/// Top-level scene selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ViewMode {
    #[default]
    Solar,
    Galaxy,
    BlackHole,
}

impl ViewMode {
    pub const ALL: [ViewMode; 3] = [ViewMode::Solar, ViewMode::Galaxy, ViewMode::BlackHole];

    /// The name used on the control surface.
    pub fn name(self) -> &'static str {
        match self {
            ViewMode::Solar => "solar",
            ViewMode::Galaxy => "galaxy",
            ViewMode::BlackHole => "blackhole",
        }
    }

    /// Groups that are simulated and visible in this mode.
    pub fn groups(self) -> GroupSet {
        match self {
            ViewMode::Solar => GroupSet::from_groups(&[
                Group::Sun,
                Group::OrbitPaths,
                Group::Planets,
                Group::DwarfPlanets,
                Group::AsteroidBelt,
                Group::KuiperBelt,
                Group::Starfield,
            ]),
            ViewMode::Galaxy | ViewMode::BlackHole => GroupSet::from_groups(&[
                Group::GalaxyArms,
                Group::Nebula,
                Group::BlackHole,
                Group::AccretionDisk,
                Group::InnerDisk,
                Group::LensingRings,
                Group::SmallBlackHoles,
                Group::Starfield,
            ]),
        }
    }

    /// Camera framing for this mode.
    pub fn camera_preset(self) -> CameraPreset {
        match self {
            ViewMode::Solar => CameraPreset::new(Vec3::new(0.0, 40.0, 80.0), Vec3::ZERO),
            ViewMode::Galaxy => CameraPreset::new(Vec3::new(0.0, 150.0, 200.0), Vec3::ZERO),
            ViewMode::BlackHole => CameraPreset::new(Vec3::new(15.0, 8.0, 15.0), Vec3::ZERO),
        }
    }

    /// Multiplier on accretion disk rotation.
    #[inline]
    pub fn disk_speed_factor(self) -> f32 {
        if self == ViewMode::BlackHole {
            3.0
        } else {
            1.0
        }
    }

    /// Multiplier on lensing ring rotation.
    #[inline]
    pub fn lensing_speed_factor(self) -> f32 {
        if self == ViewMode::BlackHole {
            2.0
        } else {
            1.0
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ViewMode {
    type Err = ParseViewModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "solar" => Ok(ViewMode::Solar),
            "galaxy" => Ok(ViewMode::Galaxy),
            "blackhole" | "black-hole" | "black_hole" => Ok(ViewMode::BlackHole),
            _ => Err(ParseViewModeError(s.to_string())),
        }
    }
}

/// Named camera pose a transition heads toward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPreset {
    pub position: Vec3,
    pub target: Vec3,
}

impl CameraPreset {
    pub const fn new(position: Vec3, target: Vec3) -> Self {
        Self { position, target }
    }
}

/// A renderable, updatable subset of the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Group {
    Sun,
    OrbitPaths,
    Planets,
    DwarfPlanets,
    AsteroidBelt,
    KuiperBelt,
    GalaxyArms,
    Nebula,
    BlackHole,
    AccretionDisk,
    InnerDisk,
    LensingRings,
    SmallBlackHoles,
    Starfield,
}

impl Group {
    pub const ALL: [Group; 14] = [
        Group::Sun,
        Group::OrbitPaths,
        Group::Planets,
        Group::DwarfPlanets,
        Group::AsteroidBelt,
        Group::KuiperBelt,
        Group::GalaxyArms,
        Group::Nebula,
        Group::BlackHole,
        Group::AccretionDisk,
        Group::InnerDisk,
        Group::LensingRings,
        Group::SmallBlackHoles,
        Group::Starfield,
    ];

    #[inline]
    fn bit(self) -> u16 {
        1 << self as u8
    }
}

/// Bitmask of [`Group`]s.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct GroupSet(u16);

impl GroupSet {
    pub const EMPTY: GroupSet = GroupSet(0);

    pub fn from_groups(groups: &[Group]) -> Self {
        groups.iter().fold(Self::EMPTY, |set, &g| set.with(g))
    }

    #[inline]
    pub fn contains(self, group: Group) -> bool {
        self.0 & group.bit() != 0
    }

    #[inline]
    pub fn with(self, group: Group) -> Self {
        GroupSet(self.0 | group.bit())
    }

    #[inline]
    pub fn without(self, group: Group) -> Self {
        GroupSet(self.0 & !group.bit())
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(self) -> impl Iterator<Item = Group> {
        Group::ALL.into_iter().filter(move |&g| self.contains(g))
    }
}

/// User display toggles layered on top of the mode's groups.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisplayToggles {
    pub show_orbits: bool,
    pub show_labels: bool,
    pub show_starfield: bool,
}

impl Default for DisplayToggles {
    fn default() -> Self {
        Self {
            show_orbits: true,
            show_labels: true,
            show_starfield: true,
        }
    }
}

/// Current mode plus display toggles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ViewState {
    mode: ViewMode,
    toggles: DisplayToggles,
}

impl ViewState {
    pub fn new(mode: ViewMode) -> Self {
        Self {
            mode,
            toggles: DisplayToggles::default(),
        }
    }

    #[inline]
    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    #[inline]
    pub fn toggles(&self) -> DisplayToggles {
        self.toggles
    }

    /// Switch modes. Returns `false` if `mode` is already active.
    pub fn set_mode(&mut self, mode: ViewMode) -> bool {
        if self.mode == mode {
            return false;
        }
        log::info!("view mode {} -> {}", self.mode, mode);
        self.mode = mode;
        true
    }

    /// Groups that are both in the current mode and not hidden by a toggle.
    pub fn active_groups(&self) -> GroupSet {
        let mut set = self.mode.groups();
        if !self.toggles.show_orbits {
            set = set.without(Group::OrbitPaths);
        }
        if !self.toggles.show_starfield {
            set = set.without(Group::Starfield);
        }
        set
    }

    #[inline]
    pub fn is_active(&self, group: Group) -> bool {
        self.active_groups().contains(group)
    }

    #[inline]
    pub fn labels_visible(&self) -> bool {
        self.toggles.show_labels
    }

    pub fn toggle_orbits(&mut self) -> bool {
        self.toggles.show_orbits = !self.toggles.show_orbits;
        self.toggles.show_orbits
    }

    pub fn toggle_labels(&mut self) -> bool {
        self.toggles.show_labels = !self.toggles.show_labels;
        self.toggles.show_labels
    }

    pub fn toggle_starfield(&mut self) -> bool {
        self.toggles.show_starfield = !self.toggles.show_starfield;
        self.toggles.show_starfield
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        for mode in ViewMode::ALL {
            assert_eq!(mode.to_string().parse::<ViewMode>(), Ok(mode));
        }
        assert_eq!("BlackHole".parse::<ViewMode>(), Ok(ViewMode::BlackHole));
        assert_eq!(
            "nebula".parse::<ViewMode>(),
            Err(ParseViewModeError("nebula".to_string()))
        );
    }

    #[test]
    fn test_solar_and_galaxy_groups_disjoint_except_starfield() {
        let solar = ViewMode::Solar.groups();
        let galaxy = ViewMode::Galaxy.groups();
        for g in Group::ALL {
            if g == Group::Starfield {
                assert!(solar.contains(g) && galaxy.contains(g));
            } else {
                assert!(!(solar.contains(g) && galaxy.contains(g)), "{:?}", g);
            }
        }
        assert_eq!(solar.len(), 7);
        assert_eq!(galaxy.len(), 8);
        assert_eq!(ViewMode::BlackHole.groups(), galaxy);
    }

    #[test]
    fn test_presets() {
        assert_eq!(ViewMode::Solar.camera_preset().position, Vec3::new(0.0, 40.0, 80.0));
        assert_eq!(ViewMode::Galaxy.camera_preset().position, Vec3::new(0.0, 150.0, 200.0));
        assert_eq!(ViewMode::BlackHole.camera_preset().position, Vec3::new(15.0, 8.0, 15.0));
        for mode in ViewMode::ALL {
            assert_eq!(mode.camera_preset().target, Vec3::ZERO);
        }
    }

    #[test]
    fn test_speed_factors() {
        assert_eq!(ViewMode::Galaxy.disk_speed_factor(), 1.0);
        assert_eq!(ViewMode::BlackHole.disk_speed_factor(), 3.0);
        assert_eq!(ViewMode::Solar.lensing_speed_factor(), 1.0);
        assert_eq!(ViewMode::BlackHole.lensing_speed_factor(), 2.0);
    }

    #[test]
    fn test_set_same_mode_is_noop() {
        let mut state = ViewState::default();
        assert!(!state.set_mode(ViewMode::Solar));
        assert!(state.set_mode(ViewMode::Galaxy));
        assert!(!state.set_mode(ViewMode::Galaxy));
        assert_eq!(state.mode(), ViewMode::Galaxy);
    }

    #[test]
    fn test_toggles_hide_groups() {
        let mut state = ViewState::default();
        assert!(state.is_active(Group::OrbitPaths));
        assert!(!state.toggle_orbits());
        assert!(!state.is_active(Group::OrbitPaths));
        assert!(state.is_active(Group::Planets));

        state.toggle_starfield();
        assert!(!state.is_active(Group::Starfield));

        assert!(state.labels_visible());
        state.toggle_labels();
        assert!(!state.labels_visible());
    }

    #[test]
    fn test_group_set_iter() {
        let set = GroupSet::from_groups(&[Group::Nebula, Group::Sun]);
        let groups: Vec<_> = set.iter().collect();
        assert_eq!(groups, vec![Group::Sun, Group::Nebula]);
        assert!(GroupSet::EMPTY.is_empty());
    }
}
