//! Simulation module
//!
//! Every simulation here is headless and single-threaded:
//! - Advanced by `step(dt)` from a frame driver
//! - Drawn through the `Canvas` trait only
//! - No globals; all state is owned by the simulation struct

pub mod bounce;
pub mod collision;
pub mod driver;
pub mod hexagon;
pub mod orbit;
pub mod prism;
pub mod wake;

pub use bounce::{Ball, BounceConfig, BounceSim, BounceSnapshot, StepReport};
pub use collision::{Contact, Material, bounce_velocity, decompose, resolve_edge, resolve_hexagon};
pub use driver::{Driver, FixedStep, Simulation};
pub use hexagon::{Edge, Hexagon};
pub use orbit::{OrbitConfig, OrbitSim, Planet, PlanetConfig};
pub use prism::{Cap, PrismConfig, PrismReport, PrismSim, PrismSnapshot};
pub use wake::{WakeConfig, WakeSim};
