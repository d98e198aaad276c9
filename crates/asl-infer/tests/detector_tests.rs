use asl_base::Vec2;
use asl_image::Image;
use asl_infer::onnx::{LETTER_INPUT_SIZE, Letterbox, decode_detections, letterbox};
use asl_infer::default_letter_labels;
use ndarray::Array3;

fn identity() -> Letterbox {
    Letterbox {
        scale: 1.0,
        pad: Vec2::new(0.0, 0.0),
    }
}

// one anchor per row: (cx, cy, w, h, class, score)
fn head(classes: usize, anchors: &[(f32, f32, f32, f32, usize, f32)]) -> Array3<f32> {
    let mut output = Array3::<f32>::zeros((1, 4 + classes, anchors.len()));
    for (a, &(cx, cy, w, h, class, score)) in anchors.iter().enumerate() {
        output[[0, 0, a]] = cx;
        output[[0, 1, a]] = cy;
        output[[0, 2, a]] = w;
        output[[0, 3, a]] = h;
        output[[0, 4 + class, a]] = score;
    }
    output
}

#[test]
fn test_letterbox_wide_frame() {
    let image = Image::filled(Vec2::new(640, 320), [255, 255, 255]);
    let (input, info) = letterbox(&image, LETTER_INPUT_SIZE).unwrap();
    assert_eq!(input.shape(), &[1, 3, 640, 640]);
    assert_eq!(info.scale, 1.0);
    assert_eq!(info.pad, Vec2::new(0.0, 160.0));
    // padding is gray, content is white
    assert!((input[[0, 0, 0, 0]] - 114.0 / 255.0).abs() < 1e-6);
    assert!((input[[0, 0, 320, 320]] - 1.0).abs() < 1e-6);
}

#[test]
fn test_letterbox_unmap() {
    let info = Letterbox {
        scale: 2.0,
        pad: Vec2::new(0.0, 80.0),
    };
    assert_eq!(info.unmap(Vec2::new(100.0, 180.0)), Vec2::new(50.0, 50.0));
}

#[test]
fn test_letterbox_rejects_empty_frame() {
    assert!(letterbox(&Image::zeros(Vec2::new(0, 0)), 640).is_err());
}

#[test]
fn test_decode_filters_by_threshold() {
    let output = head(
        26,
        &[
            (50.0, 50.0, 20.0, 20.0, 0, 0.9),
            (200.0, 200.0, 20.0, 20.0, 1, 0.3),
        ],
    );
    let detections = decode_detections(
        &output.view().into_dyn(),
        &identity(),
        Vec2::new(640, 480),
        &default_letter_labels(),
        0.5,
    )
    .unwrap();
    assert_eq!(detections.len(), 1);
    assert_eq!(detections[0].label, "A");
    assert_eq!(detections[0].bbox.min(), Vec2::new(40, 40));
    assert_eq!(detections[0].bbox.max(), Vec2::new(60, 60));
}

#[test]
fn test_decode_nms_same_class() {
    let output = head(
        26,
        &[
            (50.0, 50.0, 20.0, 20.0, 2, 0.7),
            (51.0, 51.0, 20.0, 20.0, 2, 0.9),
            // same place, different class survives
            (50.0, 50.0, 20.0, 20.0, 3, 0.6),
        ],
    );
    let detections = decode_detections(
        &output.view().into_dyn(),
        &identity(),
        Vec2::new(640, 480),
        &default_letter_labels(),
        0.5,
    )
    .unwrap();
    assert_eq!(detections.len(), 2);
    assert_eq!(detections[0].label, "C");
    assert_eq!(detections[0].confidence, 0.9);
    assert_eq!(detections[1].label, "D");
}

#[test]
fn test_decode_clips_and_falls_back_to_class_id() {
    let output = head(3, &[(5.0, 5.0, 20.0, 20.0, 2, 0.8)]);
    let labels = vec!["A".to_string(), "B".to_string()];
    let detections = decode_detections(
        &output.view().into_dyn(),
        &identity(),
        Vec2::new(100, 100),
        &labels,
        0.5,
    )
    .unwrap();
    assert_eq!(detections[0].label, "Class_2");
    assert_eq!(detections[0].bbox.min(), Vec2::new(0, 0));
}

#[test]
fn test_decode_rejects_bad_shape() {
    let output = Array3::<f32>::zeros((1, 4, 10));
    let result = decode_detections(
        &output.view().into_dyn(),
        &identity(),
        Vec2::new(10, 10),
        &[],
        0.5,
    );
    assert!(result.is_err());
}
