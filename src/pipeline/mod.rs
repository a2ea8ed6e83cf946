pub mod ascii;
pub mod frame_io;
pub mod generator;
pub mod images;
pub mod projection;
pub mod renderer;
pub mod voxel;

#[cfg(test)]
mod pipeline_test;

pub use ascii::{AsciiGrid, InkSelection};
pub use generator::{GeneratorOptions, generate};
