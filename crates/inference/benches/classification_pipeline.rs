use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use image::{DynamicImage, ImageFormat, RgbImage};
use inference::{PostProcessor, PreProcessor};
use std::io::Cursor;

/// Create an encoded upload with a gradient pattern
fn create_test_upload(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    });

    let mut bytes = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img)
        .write_to(&mut bytes, format)
        .unwrap();
    bytes.into_inner()
}

fn benchmark_preprocess(c: &mut Criterion) {
    let mut group = c.benchmark_group("preprocess");

    // Typical fundus camera outputs are large and roughly square
    let resolutions = [(512, 512), (1024, 1024), (2048, 1536), (3888, 2592)];
    let preprocessor = PreProcessor::default();

    for (width, height) in resolutions.iter() {
        let upload = create_test_upload(*width, *height, ImageFormat::Jpeg);

        group.bench_with_input(
            BenchmarkId::new("jpeg", format!("{}x{}", width, height)),
            &upload,
            |b, upload| b.iter(|| preprocessor.preprocess(black_box(upload)).unwrap()),
        );
    }

    let png = create_test_upload(1024, 1024, ImageFormat::Png);
    group.bench_function("png_1024x1024", |b| {
        b.iter(|| preprocessor.preprocess(black_box(&png)).unwrap())
    });

    group.finish();
}

fn benchmark_postprocess(c: &mut Criterion) {
    let post_processor = PostProcessor::default();
    let scores = [0.02f32, 0.11, 0.71, 0.09, 0.07];

    c.bench_function("postprocess_argmax", |b| {
        b.iter(|| post_processor.classify(black_box(&scores)).unwrap())
    });
}

criterion_group!(benches, benchmark_preprocess, benchmark_postprocess);
criterion_main!(benches);
