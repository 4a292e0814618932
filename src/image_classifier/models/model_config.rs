/// Memory layout of the model's image input tensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum TensorLayout {
    /// `[batch, height, width, channels]`, the layout of Keras exports.
    Nhwc,
    /// `[batch, channels, height, width]`.
    Nchw,
}

impl TensorLayout {
    pub fn input_shape(&self, height: u32, width: u32) -> [usize; 4] {
        let (h, w) = (height as usize, width as usize);
        match self {
            TensorLayout::Nhwc => [1, h, w, 3],
            TensorLayout::Nchw => [1, 3, h, w],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    pub onnx_model_path: String,
    /// `(height, width)` the image is resized to before inference.
    pub input_shape: (u32, u32),
    pub layout: TensorLayout,
}
