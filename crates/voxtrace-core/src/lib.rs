pub mod geometry;
pub mod random;
pub mod work_timer;

// Re-exports.
pub use approx;
pub use ilattice::glam as glam;
pub use ilattice;
pub use static_assertions;
