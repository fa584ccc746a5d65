pub mod backdrop;
pub mod canvas;
pub mod grid_warp;
pub mod surface;
