//! Scene - terminal rendering of the rotating cube

mod cube;

pub use cube::CubeView;
