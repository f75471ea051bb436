//! Concrete `RevenueModel` implementations backed by ML libraries.

pub mod onnx_model;
pub mod smartcore_model;

pub use onnx_model::OnnxRegressor;
pub use smartcore_model::{ForestParams, SmartCoreRegressor};
