//! Body registry: the fixed parametric description of every simulated body.
//!
//! Static tables ([`PLANETS`], [`DWARF_PLANETS`]) hold immutable
//! configuration. [`BodyRegistry`] instantiates them into [`OrbitalBody`]
//! values whose only mutable state is the orbital angle, the axial spin and
//! the moons' angles.

use crate::orbit::Orbit;
use crate::spawn::hex_to_rgb;
use glam::Vec3;
use std::f32::consts::{PI, TAU};

/// Visual radius of the sun sphere.
pub const SUN_RADIUS: f32 = 2.0;

/// Centers of the decorative black holes shown outside solar mode.
pub const SMALL_BLACK_HOLES: [Vec3; 3] = [
    Vec3::new(80.0, 0.0, 40.0),
    Vec3::new(-60.0, 0.0, -70.0),
    Vec3::new(30.0, 0.0, -90.0),
];

pub const SUN_INFO: &str = "The Sun is a G-type main-sequence star containing 99.86% of the Solar System's mass. Its core temperature reaches 15 million°C, where hydrogen fuses into helium. The Sun's energy output powers all life on Earth.";

pub const BLACK_HOLE_NAME: &str = "Sagittarius A*";

pub const BLACK_HOLE_INFO: &str = "Sagittarius A* is the supermassive black hole at the center of our Milky Way galaxy, with a mass of about 4 million times that of our Sun. It's located 26,000 light-years from Earth.";

/// A moon orbiting its parent on a circle.
#[derive(Clone, Copy, Debug)]
pub struct MoonSpec {
    pub name: &'static str,
    pub size: f32,
    pub orbit_radius: f32,
    /// Radians per simulated second; negative is retrograde.
    pub orbit_speed: f32,
    pub color: u32,
}

/// Flat ring system around a planet, radii relative to the planet center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingSpec {
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub color: u32,
}

#[derive(Clone, Copy, Debug)]
pub struct PlanetSpec {
    pub name: &'static str,
    pub size: f32,
    pub color: u32,
    pub orbit_radius: f32,
    pub orbit_speed: f32,
    /// Axial tilt in radians.
    pub tilt: f32,
    pub eccentricity: f32,
    /// Axial spin in radians per simulated second.
    pub rotation_speed: f32,
    pub rings: Option<RingSpec>,
    pub moons: &'static [MoonSpec],
    pub info: &'static str,
}

#[derive(Clone, Copy, Debug)]
pub struct DwarfPlanetSpec {
    pub name: &'static str,
    pub size: f32,
    pub color: u32,
    pub orbit_radius: f32,
    pub orbit_speed: f32,
    pub eccentricity: f32,
    /// Height of the cosmetic bob above/below the ecliptic.
    pub vertical_amplitude: f32,
    pub info: &'static str,
}

const fn moon(name: &'static str, size: f32, orbit_radius: f32, orbit_speed: f32, color: u32) -> MoonSpec {
    MoonSpec { name, size, orbit_radius, orbit_speed, color }
}

pub const PLANETS: [PlanetSpec; 8] = [
    PlanetSpec {
        name: "Mercury",
        size: 0.2,
        color: 0x8c7853,
        orbit_radius: 6.0,
        orbit_speed: 0.8,
        tilt: 0.03,
        eccentricity: 0.205,
        rotation_speed: 0.02,
        rings: None,
        moons: &[],
        info: "Mercury is the smallest planet and closest to the Sun. A year on Mercury is just 88 Earth days. Surface temperatures range from -180°C to 430°C.",
    },
    PlanetSpec {
        name: "Venus",
        size: 0.35,
        color: 0xffc649,
        orbit_radius: 9.0,
        orbit_speed: 0.6,
        tilt: 0.05,
        eccentricity: 0.007,
        rotation_speed: -0.005,
        rings: None,
        moons: &[],
        info: "Venus rotates backwards and is the hottest planet at 465°C due to its thick atmosphere. It's often called Earth's 'twin' due to similar size.",
    },
    PlanetSpec {
        name: "Earth",
        size: 0.4,
        color: 0x6b93d6,
        orbit_radius: 12.0,
        orbit_speed: 0.5,
        tilt: 0.41,
        eccentricity: 0.017,
        rotation_speed: 0.5,
        rings: None,
        moons: &[moon("Moon", 0.1, 0.8, 2.0, 0xaaaaaa)],
        info: "Earth is the only known planet with liquid water on its surface and life. Our Moon stabilizes Earth's axial tilt, making our climate more stable.",
    },
    PlanetSpec {
        name: "Mars",
        size: 0.25,
        color: 0xc1440e,
        orbit_radius: 16.0,
        orbit_speed: 0.4,
        tilt: 0.44,
        eccentricity: 0.093,
        rotation_speed: 0.48,
        rings: None,
        moons: &[],
        info: "Mars is the 'Red Planet' due to iron oxide on its surface. It has the largest volcano (Olympus Mons) and canyon (Valles Marineris) in the solar system.",
    },
    PlanetSpec {
        name: "Jupiter",
        size: 1.0,
        color: 0xd8ca9d,
        orbit_radius: 24.0,
        orbit_speed: 0.2,
        tilt: 0.05,
        eccentricity: 0.049,
        rotation_speed: 1.2,
        rings: None,
        moons: &[
            moon("Io", 0.15, 1.8, 1.5, 0xffcc66),
            moon("Europa", 0.12, 2.2, 1.2, 0xccddee),
            moon("Ganymede", 0.18, 2.8, 0.9, 0x99aacc),
            moon("Callisto", 0.16, 3.3, 0.7, 0x887766),
        ],
        info: "Jupiter is the largest planet, with a mass 2.5x all other planets combined. The Great Red Spot is a storm that has raged for over 400 years.",
    },
    PlanetSpec {
        name: "Saturn",
        size: 0.85,
        color: 0xead6b8,
        orbit_radius: 34.0,
        orbit_speed: 0.15,
        tilt: 0.47,
        eccentricity: 0.056,
        rotation_speed: 1.1,
        rings: Some(RingSpec { inner_radius: 1.2, outer_radius: 2.0, color: 0xc9b896 }),
        moons: &[
            moon("Titan", 0.2, 2.8, 0.8, 0xffaa55),
            moon("Enceladus", 0.08, 2.2, 1.2, 0xeeeeff),
            moon("Rhea", 0.1, 3.2, 0.6, 0xcccccc),
            moon("Dione", 0.09, 2.5, 0.9, 0xdddddd),
        ],
        info: "Saturn's rings are made of ice and rock particles. Titan, its largest moon, has a thick atmosphere and liquid methane lakes on its surface.",
    },
    PlanetSpec {
        name: "Uranus",
        size: 0.5,
        color: 0xd1e7e7,
        orbit_radius: 44.0,
        orbit_speed: 0.1,
        tilt: 1.71,
        eccentricity: 0.046,
        rotation_speed: -0.7,
        rings: Some(RingSpec { inner_radius: 0.7, outer_radius: 0.9, color: 0x88ccdd }),
        moons: &[
            moon("Miranda", 0.06, 0.9, 1.5, 0xcccccc),
            moon("Ariel", 0.08, 1.1, 1.2, 0xdddddd),
            moon("Umbriel", 0.08, 1.3, 1.0, 0x888888),
            moon("Titania", 0.1, 1.6, 0.8, 0xaabbcc),
            moon("Oberon", 0.1, 1.9, 0.6, 0x999999),
        ],
        info: "Uranus rotates on its side, likely due to a collision. It's the coldest planet with temperatures reaching -224°C in its atmosphere.",
    },
    PlanetSpec {
        name: "Neptune",
        size: 0.48,
        color: 0x5b5ddf,
        orbit_radius: 54.0,
        orbit_speed: 0.08,
        tilt: 0.49,
        eccentricity: 0.009,
        rotation_speed: 0.65,
        rings: None,
        moons: &[
            moon("Triton", 0.12, 1.4, -0.8, 0xddccbb),
            moon("Proteus", 0.06, 1.0, 1.5, 0x999999),
        ],
        info: "Neptune has the strongest winds in the solar system, reaching 2,100 km/h. Triton orbits backwards and may be a captured Kuiper Belt object.",
    },
];

pub const DWARF_PLANETS: [DwarfPlanetSpec; 4] = [
    DwarfPlanetSpec {
        name: "Pluto",
        size: 0.15,
        color: 0xccaa88,
        orbit_radius: 65.0,
        orbit_speed: 0.04,
        eccentricity: 0.25,
        vertical_amplitude: 2.0,
        info: "Pluto was reclassified as a dwarf planet in 2006. It has 5 moons, with Charon being so large they orbit a common center of mass outside Pluto's surface.",
    },
    DwarfPlanetSpec {
        name: "Eris",
        size: 0.16,
        color: 0xeeeeee,
        orbit_radius: 80.0,
        orbit_speed: 0.025,
        eccentricity: 0.44,
        vertical_amplitude: 4.0,
        info: "Eris is the most massive known dwarf planet. Its discovery was a key factor in Pluto's reclassification. It has one moon, Dysnomia, and is located in the scattered disk.",
    },
    DwarfPlanetSpec {
        name: "Makemake",
        size: 0.1,
        color: 0xddbb99,
        orbit_radius: 72.0,
        orbit_speed: 0.03,
        eccentricity: 0.16,
        vertical_amplitude: 3.0,
        info: "Makemake is one of the largest Kuiper Belt objects. It has a reddish-brown color from tholins on its surface and one known moon nicknamed MK 2.",
    },
    DwarfPlanetSpec {
        name: "Haumea",
        size: 0.12,
        color: 0xffffff,
        orbit_radius: 68.0,
        orbit_speed: 0.035,
        eccentricity: 0.19,
        vertical_amplitude: 2.5,
        info: "Haumea has an elongated shape due to its rapid rotation (one day = 4 hours). It's one of the fastest spinning large objects in our solar system with two moons and a ring system.",
    },
];

/// Ring system resolved to linear colors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rings {
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub color: Vec3,
}

impl From<RingSpec> for Rings {
    fn from(spec: RingSpec) -> Self {
        Self {
            inner_radius: spec.inner_radius,
            outer_radius: spec.outer_radius,
            color: hex_to_rgb(spec.color),
        }
    }
}

/// A moon on a circular orbit around its parent body.
#[derive(Clone, Debug)]
pub struct Moon {
    pub name: &'static str,
    pub size: f32,
    pub color: Vec3,
    orbit: Orbit,
    angle: f32,
}

impl Moon {
    fn new(spec: &MoonSpec, initial_angle: f32) -> Self {
        Self {
            name: spec.name,
            size: spec.size,
            color: hex_to_rgb(spec.color),
            orbit: Orbit::circular(spec.orbit_radius, spec.orbit_speed),
            angle: initial_angle.rem_euclid(TAU),
        }
    }

    #[inline]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Position relative to the parent body.
    pub fn offset(&self) -> Vec3 {
        self.orbit.position(self.angle)
    }

    /// World position given the parent's resolved position.
    pub fn world_position(&self, parent: Vec3) -> Vec3 {
        parent + self.offset()
    }

    fn advance(&mut self, dt: f32) {
        self.angle = self.orbit.advance(self.angle, dt).rem_euclid(TAU);
    }
}

/// Which table a body came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BodyKind {
    Planet,
    DwarfPlanet,
}

/// A body following an independent Kepler-approximated orbit around the sun.
#[derive(Clone, Debug)]
pub struct OrbitalBody {
    pub name: &'static str,
    pub kind: BodyKind,
    pub size: f32,
    pub color: Vec3,
    pub tilt: f32,
    pub rotation_speed: f32,
    pub vertical_amplitude: f32,
    pub rings: Option<Rings>,
    pub info: &'static str,
    orbit: Orbit,
    angle: f32,
    spin: f32,
    moons: Vec<Moon>,
}

impl OrbitalBody {
    /// Instantiate a planet at `initial_angle`.
    ///
    /// Moons start a quarter turn apart from each other.
    pub fn planet(spec: &PlanetSpec, initial_angle: f32) -> Self {
        let moons = spec
            .moons
            .iter()
            .enumerate()
            .map(|(i, m)| Moon::new(m, i as f32 * PI * 0.5))
            .collect();

        Self {
            name: spec.name,
            kind: BodyKind::Planet,
            size: spec.size,
            color: hex_to_rgb(spec.color),
            tilt: spec.tilt,
            rotation_speed: spec.rotation_speed,
            vertical_amplitude: 0.0,
            rings: spec.rings.map(Rings::from),
            info: spec.info,
            orbit: Orbit::new(spec.orbit_radius, spec.eccentricity, spec.orbit_speed),
            angle: initial_angle.rem_euclid(TAU),
            spin: 0.0,
            moons,
        }
    }

    /// Instantiate a dwarf planet at `initial_angle`.
    pub fn dwarf_planet(spec: &DwarfPlanetSpec, initial_angle: f32) -> Self {
        Self {
            name: spec.name,
            kind: BodyKind::DwarfPlanet,
            size: spec.size,
            color: hex_to_rgb(spec.color),
            tilt: 0.0,
            rotation_speed: 0.0,
            vertical_amplitude: spec.vertical_amplitude,
            rings: None,
            info: spec.info,
            orbit: Orbit::new(spec.orbit_radius, spec.eccentricity, spec.orbit_speed),
            angle: initial_angle.rem_euclid(TAU),
            spin: 0.0,
            moons: Vec::new(),
        }
    }

    /// Advance the body by one frame.
    ///
    /// * `orbit_dt` - simulated seconds times the orbit speed multiplier;
    ///   drives the orbit and the moons
    /// * `spin_dt` - simulated seconds; drives the axial spin
    pub fn advance(&mut self, orbit_dt: f32, spin_dt: f32) {
        // Kept in [0, TAU) so f32 precision never swallows a frame's increment.
        self.angle = self.orbit.advance(self.angle, orbit_dt).rem_euclid(TAU);
        self.spin = (self.spin + self.rotation_speed * spin_dt).rem_euclid(TAU);
        for moon in &mut self.moons {
            moon.advance(orbit_dt);
        }
    }

    #[inline]
    pub fn orbit(&self) -> &Orbit {
        &self.orbit
    }

    #[inline]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Accumulated axial rotation in radians.
    #[inline]
    pub fn spin(&self) -> f32 {
        self.spin
    }

    #[inline]
    pub fn moons(&self) -> &[Moon] {
        &self.moons
    }

    /// Resolved world position, including the cosmetic vertical bob.
    pub fn position(&self) -> Vec3 {
        let mut pos = self.orbit.position(self.angle);
        pos.y = self.vertical_amplitude * self.angle.sin();
        pos
    }

    /// Rendered radius under the planet size multiplier.
    #[inline]
    pub fn scaled_size(&self, multiplier: f32) -> f32 {
        self.size * multiplier
    }
}

/// All orbiting bodies of the solar view.
#[derive(Clone, Debug)]
pub struct BodyRegistry {
    planets: Vec<OrbitalBody>,
    dwarf_planets: Vec<OrbitalBody>,
}

impl BodyRegistry {
    /// Instantiate every table entry, spreading each group evenly around
    /// the sun.
    pub fn new() -> Self {
        let planets = PLANETS
            .iter()
            .enumerate()
            .map(|(i, p)| OrbitalBody::planet(p, i as f32 / PLANETS.len() as f32 * TAU))
            .collect();
        let dwarf_planets = DWARF_PLANETS
            .iter()
            .enumerate()
            .map(|(i, d)| OrbitalBody::dwarf_planet(d, i as f32 / DWARF_PLANETS.len() as f32 * TAU))
            .collect();

        Self { planets, dwarf_planets }
    }

    #[inline]
    pub fn planets(&self) -> &[OrbitalBody] {
        &self.planets
    }

    #[inline]
    pub fn dwarf_planets(&self) -> &[OrbitalBody] {
        &self.dwarf_planets
    }

    pub fn advance_planets(&mut self, orbit_dt: f32, spin_dt: f32) {
        for planet in &mut self.planets {
            planet.advance(orbit_dt, spin_dt);
        }
    }

    pub fn advance_dwarf_planets(&mut self, orbit_dt: f32) {
        for dwarf in &mut self.dwarf_planets {
            dwarf.advance(orbit_dt, 0.0);
        }
    }

    /// Look a body up by name (case-insensitive).
    pub fn find(&self, name: &str) -> Option<&OrbitalBody> {
        self.planets
            .iter()
            .chain(self.dwarf_planets.iter())
            .find(|b| b.name.eq_ignore_ascii_case(name))
    }
}

impl Default for BodyRegistry {
    fn default() -> Self {
        Self::new()
    }
}
