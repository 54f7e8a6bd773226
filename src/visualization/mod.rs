pub mod frames;
#[cfg(feature = "viewer")]
pub mod viewer2d;
