//! Decision engine: one behavior per vehicle kind
//!
//! A unit either shoots the best target in range or steps toward a
//! priority cell (base, repair, catapult or a random free cell).

pub mod at_spg;
pub mod behavior;
pub mod heavy_tank;
pub mod light_tank;
pub mod medium_tank;
pub mod spg;
pub mod targeting;
pub mod vehicle;

pub use behavior::{DecisionContext, TankBehavior, UnitCore};
pub use targeting::{fire_area, fire_lines, hot_cells};
pub use vehicle::Vehicle;
