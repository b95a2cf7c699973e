//! # orrery - celestial scene simulation core
//!
//! Orbits, particle fields, view modes and camera framing for an
//! interactive solar system / galaxy / black hole scene.
//!
//! orrery renders nothing. It owns the simulation state and exposes what a
//! renderer needs each frame: body transforms, particle buffers, mesh-level
//! cosmetics and a camera view matrix.
//!
//! ## Quick Start
//!
//! ```ignore
//! use orrery::prelude::*;
//!
//! let mut scene = Scene::new(SpaceConfig::default());
//! scene.set_view_mode(ViewMode::Galaxy);
//! scene.set_time_speed(2.0);
//!
//! for _ in 0..120 {
//!     scene.step(1.0 / 60.0);
//! }
//!
//! let view = scene.camera().view_matrix();
//! for (id, field) in scene.visible_fields() {
//!     // upload field.positions_bytes() ...
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Time
//!
//! A single [`SimulationClock`] turns real frame time into simulated time.
//! Pausing zeroes the simulated delta; the time scale multiplies it. Camera
//! transitions and the sun's cosmetic spin always run on real time.
//!
//! ### Orbits
//!
//! Every body follows an independent parametric [`Orbit`]. Angular speed
//! follows a Kepler-style law, `ω = ω_base · (a / r)^1.5`, so bodies speed up
//! near perihelion.
//!
//! ### Particle fields
//!
//! Belts, galaxy arms, nebula, starfield and accretion disks are
//! [`ParticleField`]s generated once from a [`FieldRecipe`]. Per frame, only
//! each particle's angle and the derived x/z coordinates are rewritten.
//! Changing a generation parameter in [`SpaceConfig`] regenerates exactly the
//! affected fields.
//!
//! ### View modes
//!
//! A [`ViewMode`] selects which [`Group`]s are simulated and visible.
//! Switching modes flips the active set in the same frame and starts a
//! camera transition toward the mode's preset.

pub mod bodies;
pub mod camera;
pub mod config;
pub mod error;
pub mod field;
pub mod generate;
pub mod orbit;
pub mod scene;
pub mod selection;
pub mod spawn;
pub mod time;
pub mod view;

pub use bytemuck;
pub use glam::{Mat4, Vec2, Vec3};

pub use bodies::{BodyKind, BodyRegistry, Moon, OrbitalBody};
pub use camera::{Camera, CameraController, CameraTransition};
pub use config::{ConfigChange, ConfigKey, ConfigUpdate, SpaceConfig};
pub use error::{ConfigError, ParseViewModeError};
pub use field::{FieldId, FieldRegistry, ParticleField};
pub use generate::FieldRecipe;
pub use orbit::Orbit;
pub use scene::{Cosmetics, Label, Scene};
pub use selection::{EntityId, PickRay, Selection};
pub use spawn::SpawnContext;
pub use time::{FrameTime, FrameTimer, SimulationClock};
pub use view::{CameraPreset, DisplayToggles, Group, GroupSet, ViewMode, ViewState};

/// Prelude for convenient imports.
///
/// ```ignore
/// use orrery::prelude::*;
/// ```
pub mod prelude {
    pub use crate::camera::{Camera, CameraController};
    pub use crate::config::{ConfigChange, ConfigKey, ConfigUpdate, SpaceConfig};
    pub use crate::field::{FieldId, ParticleField};
    pub use crate::scene::{Cosmetics, Label, Scene};
    pub use crate::selection::{EntityId, PickRay, Selection};
    pub use crate::time::{FrameTime, FrameTimer};
    pub use crate::view::{Group, ViewMode};
    pub use crate::{Mat4, Vec2, Vec3};
}
