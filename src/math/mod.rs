pub mod matrix;
pub mod kernels;

pub use matrix::Matrix;
