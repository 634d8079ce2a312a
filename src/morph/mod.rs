pub mod cloud;
pub mod interpolate;
