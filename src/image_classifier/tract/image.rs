use crate::image_classifier::models::model_config::TensorLayout;
use image::{imageops, DynamicImage};
use tract_onnx::prelude::*;

/// Stretches the image to the model input size and scales channels to [0, 1].
pub fn image_to_tensor(
    image: &DynamicImage,
    height: u32,
    width: u32,
    layout: TensorLayout,
) -> Tensor {
    let rgb = image
        .resize_exact(width, height, imageops::FilterType::Triangle)
        .to_rgb8();
    let (h, w) = (height as usize, width as usize);

    match layout {
        TensorLayout::Nhwc => tract_ndarray::Array4::from_shape_fn((1, h, w, 3), |(_, y, x, c)| {
            rgb.get_pixel(x as u32, y as u32)[c] as f32 / 255.0
        })
        .into_tensor(),
        TensorLayout::Nchw => tract_ndarray::Array4::from_shape_fn((1, 3, h, w), |(_, c, y, x)| {
            rgb.get_pixel(x as u32, y as u32)[c] as f32 / 255.0
        })
        .into_tensor(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};

    fn solid(width: u32, height: u32, color: [u8; 3]) -> DynamicImage {
        DynamicImage::ImageRgb8(ImageBuffer::from_pixel(width, height, Rgb(color)))
    }

    #[test]
    fn test_image_to_tensor_nhwc_shape() {
        let tensor = image_to_tensor(&solid(300, 120, [255, 0, 0]), 224, 224, TensorLayout::Nhwc);
        assert_eq!(tensor.shape(), &[1, 224, 224, 3]);

        let slice = tensor.as_slice::<f32>().unwrap();
        assert_eq!(slice[0], 1.0);
        assert_eq!(slice[1], 0.0);
        assert_eq!(slice[2], 0.0);
    }

    #[test]
    fn test_image_to_tensor_nchw_shape() {
        let tensor = image_to_tensor(&solid(50, 80, [0, 255, 0]), 224, 224, TensorLayout::Nchw);
        assert_eq!(tensor.shape(), &[1, 3, 224, 224]);

        let slice = tensor.as_slice::<f32>().unwrap();
        // first value of the red plane, then first value of the green plane
        assert_eq!(slice[0], 0.0);
        assert_eq!(slice[224 * 224], 1.0);
    }

    #[test]
    fn test_image_to_tensor_normalization() {
        let tensor = image_to_tensor(&solid(10, 10, [128, 128, 128]), 32, 32, TensorLayout::Nhwc);
        let slice = tensor.as_slice::<f32>().unwrap();

        let expected = 128.0 / 255.0;
        assert!(slice.iter().all(|value| (value - expected).abs() < 0.0001));
    }
}
