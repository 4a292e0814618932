//! Writes tiny ONNX graphs so the tract classifier can be exercised without a
//! trained model artifact.
//!
//! The graph is `Flatten(x) -> MatMul(W) -> y`: every output is a weighted sum
//! of the input pixels, with one weight per (class, color channel) pair.

use crate::image_classifier::models::model_config::TensorLayout;
use std::path::Path;

const ONNX_FLOAT: u64 = 1;
const IR_VERSION: u64 = 7;
const OPSET_VERSION: u64 = 13;

fn put_varint(buf: &mut Vec<u8>, mut value: u64) {
    while value >= 0x80 {
        buf.push((value as u8) | 0x80);
        value >>= 7;
    }
    buf.push(value as u8);
}

fn put_int(buf: &mut Vec<u8>, field: u64, value: u64) {
    put_varint(buf, field << 3);
    put_varint(buf, value);
}

fn put_bytes(buf: &mut Vec<u8>, field: u64, bytes: &[u8]) {
    put_varint(buf, (field << 3) | 2);
    put_varint(buf, bytes.len() as u64);
    buf.extend_from_slice(bytes);
}

fn value_info(name: &str, dims: &[usize]) -> Vec<u8> {
    let mut shape = Vec::new();
    for &dim in dims {
        let mut dimension = Vec::new();
        put_int(&mut dimension, 1, dim as u64);
        put_bytes(&mut shape, 1, &dimension);
    }

    let mut tensor_type = Vec::new();
    put_int(&mut tensor_type, 1, ONNX_FLOAT);
    put_bytes(&mut tensor_type, 2, &shape);

    let mut type_proto = Vec::new();
    put_bytes(&mut type_proto, 1, &tensor_type);

    let mut info = Vec::new();
    put_bytes(&mut info, 1, name.as_bytes());
    put_bytes(&mut info, 2, &type_proto);
    info
}

fn node(op_type: &str, inputs: &[&str], output: &str) -> Vec<u8> {
    let mut node = Vec::new();
    for input in inputs {
        put_bytes(&mut node, 1, input.as_bytes());
    }
    put_bytes(&mut node, 2, output.as_bytes());
    put_bytes(&mut node, 3, output.as_bytes());
    put_bytes(&mut node, 4, op_type.as_bytes());
    node
}

fn float_initializer(name: &str, dims: &[usize], values: &[f32]) -> Vec<u8> {
    let mut tensor = Vec::new();
    for &dim in dims {
        put_int(&mut tensor, 1, dim as u64);
    }
    put_int(&mut tensor, 2, ONNX_FLOAT);
    put_bytes(&mut tensor, 8, name.as_bytes());
    let raw: Vec<u8> = values.iter().flat_map(|v| v.to_le_bytes()).collect();
    put_bytes(&mut tensor, 9, &raw);
    tensor
}

/// Writes a model taking a `size`×`size` RGB image in `layout` and producing
/// one score per entry of `class_weights`.
pub fn write_channel_weighted_model(
    path: &Path,
    layout: TensorLayout,
    size: usize,
    class_weights: &[[f32; 3]],
) -> std::io::Result<()> {
    let input_shape = layout.input_shape(size as u32, size as u32);
    let features = 3 * size * size;
    let classes = class_weights.len();

    let channel_of = |feature: usize| match layout {
        TensorLayout::Nhwc => feature % 3,
        TensorLayout::Nchw => feature / (size * size),
    };
    let mut weights = Vec::with_capacity(features * classes);
    for feature in 0..features {
        for class in class_weights {
            weights.push(class[channel_of(feature)]);
        }
    }

    let mut graph = Vec::new();
    put_bytes(&mut graph, 1, &node("Flatten", &["x"], "flat"));
    put_bytes(&mut graph, 1, &node("MatMul", &["flat", "w"], "y"));
    put_bytes(&mut graph, 2, b"channel_weighted");
    put_bytes(
        &mut graph,
        5,
        &float_initializer("w", &[features, classes], &weights),
    );
    put_bytes(&mut graph, 11, &value_info("x", &input_shape));
    put_bytes(&mut graph, 12, &value_info("y", &[1, classes]));

    let mut opset = Vec::new();
    put_int(&mut opset, 2, OPSET_VERSION);

    let mut model = Vec::new();
    put_int(&mut model, 1, IR_VERSION);
    put_bytes(&mut model, 2, b"eco-sort-tests");
    put_bytes(&mut model, 7, &graph);
    put_bytes(&mut model, 8, &opset);

    std::fs::write(path, model)
}
