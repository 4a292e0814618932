pub mod fixture;
pub mod onnx_model;
