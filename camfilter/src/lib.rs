// Filters attaching camera shots to meshes and rasters, and deriving
// per-vertex quality from the mesh shot.

pub mod color;
pub mod filter;
pub mod progress;
pub mod quality;
pub mod set_shot;

pub use base;
