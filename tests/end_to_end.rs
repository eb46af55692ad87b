use bitmapper::bit_pipeline::{BitsToPngPipeline, MappingConfig, MappingError, MappingMode};
use image::ColorType;
use tempfile::TempDir;

fn output_name(dir: &TempDir, name: &str) -> String {
    dir.path().join(name).to_string_lossy().into_owned()
}

#[test]
fn test_all_ones_bin_renders_black_canvas() {
    let dir = tempfile::tempdir().unwrap();
    let config = MappingConfig::builder()
        .mode(MappingMode::Bin)
        .ratio(1.0)
        .multiple(1)
        .cell(1, 1)
        .output_name(output_name(&dir, "ones"))
        .build();

    let summary = BitsToPngPipeline::new(config)
        .convert_bytes_to_file(&[0xFF; 8])
        .unwrap();

    let path = summary.output_path.unwrap();
    assert_eq!(path, dir.path().join("ones.png"));

    let image = image::open(&path).unwrap();
    assert_eq!((image.width(), image.height()), (8, 8));
    assert!(image.to_rgb8().pixels().all(|p| p.0 == [0, 0, 0]));
}

#[test]
fn test_scale_magnifies_canvas() {
    let dir = tempfile::tempdir().unwrap();
    let config = MappingConfig::builder()
        .mode(MappingMode::Bin)
        .scale(3)
        .output_name(output_name(&dir, "scaled"))
        .build();

    BitsToPngPipeline::new(config)
        .convert_bytes_to_file(&[0x00; 8])
        .unwrap();

    let image = image::open(dir.path().join("scaled.png")).unwrap();
    assert_eq!((image.width(), image.height()), (24, 24));
    assert!(image.to_rgb8().pixels().all(|p| p.0 == [255, 255, 255]));
}

#[test]
fn test_empty_input_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let config = MappingConfig::builder()
        .output_name(output_name(&dir, "empty"))
        .build();

    let result = BitsToPngPipeline::new(config).convert_bytes_to_file(&[]);

    assert!(matches!(result, Err(MappingError::EmptyInput)));
    assert!(!dir.path().join("empty.png").exists());
}

#[test]
fn test_convert_file_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("payload.bin");
    let payload: Vec<u8> = (0..4096u32).map(|i| (i * 31 % 251) as u8).collect();
    std::fs::write(&input, &payload).unwrap();

    let config = MappingConfig::builder()
        .mode(MappingMode::Offset)
        .cell(4, 3)
        .ratio(16.0 / 9.0)
        .multiple(16)
        .scale(2)
        .output_name(output_name(&dir, "out/payload-offset"))
        .process_count(4)
        .build();

    let summary = BitsToPngPipeline::new(config).convert_file(&input).unwrap();

    assert_eq!(summary.bit_count, 4096 * 8);
    assert_eq!(summary.channels, 3);
    assert_eq!(summary.dimensions.width % 16, 0);

    let image = image::open(dir.path().join("out/payload-offset.png")).unwrap();
    assert_eq!(image.color(), ColorType::Rgb8);
    assert_eq!(image.width(), summary.dimensions.width * 2);
    assert_eq!(image.height(), summary.dimensions.height * 2);
}

#[test]
fn test_channel_count_selects_color_type() {
    let dir = tempfile::tempdir().unwrap();

    for (cell_y, expected) in [
        (1, ColorType::L8),
        (2, ColorType::La8),
        (4, ColorType::Rgba8),
    ] {
        let name = format!("split-{cell_y}");
        let config = MappingConfig::builder()
            .mode(MappingMode::Split)
            .cell(2, cell_y)
            .output_name(output_name(&dir, &name))
            .build();

        BitsToPngPipeline::new(config)
            .convert_bytes_to_file(&[0x3C; 64])
            .unwrap();

        let image = image::open(dir.path().join(format!("{name}.png"))).unwrap();
        assert_eq!(image.color(), expected, "cell_y = {cell_y}");
    }
}

#[test]
fn test_missing_input_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = MappingConfig::builder()
        .output_name(output_name(&dir, "missing"))
        .build();

    let result = BitsToPngPipeline::new(config).convert_file(dir.path().join("does-not-exist"));

    assert!(matches!(result, Err(MappingError::InputReadError(_))));
    assert!(!dir.path().join("missing.png").exists());
}
