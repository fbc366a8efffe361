use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{Rgba, RgbaImage};
use wallet_imaging::{Bitmap, Quality, Size};

fn gradient(width: u32, height: u32) -> Bitmap {
    Bitmap::from_image(RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8, 255])
    }))
}

fn bench_resize_qualities(c: &mut Criterion) {
    let bitmap = gradient(177, 177);
    let target = Size::new(640.0, 640.0);
    for (name, quality) in [
        ("resize_177_to_640_none", Quality::None),
        ("resize_177_to_640_low", Quality::Low),
        ("resize_177_to_640_high", Quality::High),
    ] {
        c.bench_function(name, |b| {
            b.iter(|| bitmap.resize(black_box(target), black_box(quality)))
        });
    }
}

fn bench_resize_downscale(c: &mut Criterion) {
    let bitmap = gradient(1920, 1080);
    c.bench_function("resize_1920x1080_to_320x180_medium", |b| {
        b.iter(|| bitmap.resize(black_box(Size::new(320.0, 180.0)), Quality::Medium))
    });
}

fn bench_blur_small(c: &mut Criterion) {
    let bitmap = gradient(320, 240);
    c.bench_function("blur_320x240_r4", |b| b.iter(|| bitmap.blur(black_box(4.0))));
}

fn bench_blur_medium(c: &mut Criterion) {
    let bitmap = gradient(640, 480);
    c.bench_function("blur_640x480_r12", |b| {
        b.iter(|| bitmap.blur(black_box(12.0)))
    });
}

criterion_group!(
    benches,
    bench_resize_qualities,
    bench_resize_downscale,
    bench_blur_small,
    bench_blur_medium
);
criterion_main!(benches);
