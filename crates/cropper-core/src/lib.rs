pub mod config;
pub mod consts;
pub mod container;
pub mod cropper;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod loader;
pub mod pointer;
pub mod schedule;
pub mod slider;
pub mod surface;
pub mod viewport;
