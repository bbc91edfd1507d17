pub mod canvas;
pub mod slider;
pub mod status;
pub mod toolbar;
