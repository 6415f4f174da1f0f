//! Core numeric primitives (Vector, Matrix).
//!
//! Symptom vectors are `Vector<f32>`; the training set handed to a model is
//! a row-major `Matrix<f32>` with one row per condition.

mod matrix;
mod vector;

pub use matrix::Matrix;
pub use vector::Vector;
