//! Color cube filter behavior tests for pixel-engine.

use std::time::{Duration, Instant};

use approx::assert_abs_diff_eq;
use pixel_core::{ColorSpaceId, Image};
use pixel_engine::{
    ColorCubeFilter, ColorCubeStorage, Engine, EngineConfig, ImageRecipe,
    PreviewColorCubeFilter, Renderer,
};
use pixel_lut::LutTable;

const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
const BLUE: [f32; 4] = [0.0, 0.0, 1.0, 1.0];

/// Dimension 2 identity cube with pure red remapped to pure blue.
fn red_to_blue() -> ColorCubeFilter {
    let mut data = LutTable::identity(2).unwrap().entries().to_vec();
    // index = b*4 + g*2 + r
    data[1] = BLUE;
    let table = LutTable::from_data(data, 2).unwrap();
    ColorCubeFilter::new("Red to Blue", "red_to_blue", table, 2, ColorSpaceId::DeviceRgb).unwrap()
}

/// Inverts color, keeps alpha.
fn invert(dimension: usize) -> ColorCubeFilter {
    let scale = (dimension - 1) as f32;
    let mut data = Vec::with_capacity(dimension.pow(3));
    for b in 0..dimension {
        for g in 0..dimension {
            for r in 0..dimension {
                data.push([
                    1.0 - r as f32 / scale,
                    1.0 - g as f32 / scale,
                    1.0 - b as f32 / scale,
                ]);
            }
        }
    }
    let table = LutTable::from_rgb(data, dimension).unwrap();
    ColorCubeFilter::new("Invert", "invert", table, dimension, ColorSpaceId::Srgb).unwrap()
}

fn gradient(width: u32, height: u32, tag: Option<ColorSpaceId>) -> ImageRecipe {
    let mut image = Image::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let fx = x as f32 / (width - 1).max(1) as f32;
            let fy = y as f32 / (height - 1).max(1) as f32;
            image.set_pixel(x, y, [fx, fy, 1.0 - fx * fy, 1.0]);
        }
    }
    ImageRecipe::from_image(image.with_color_space(tag))
}

fn render(recipe: &ImageRecipe) -> Image {
    Renderer::default().render(recipe).unwrap()
}

fn wait_until_cached(renderer: &Renderer, recipe: &ImageRecipe) {
    let deadline = Instant::now() + Duration::from_secs(10);
    while !renderer.is_cached(recipe) {
        assert!(Instant::now() < deadline, "preheat did not finish in time");
        std::thread::sleep(Duration::from_millis(5));
    }
}

// =============================================================================
// Concrete scenario
// =============================================================================

#[test]
fn test_red_pixel_becomes_blue() {
    let source = ImageRecipe::from_image(Image::filled(1, 1, RED));
    let out = render(&red_to_blue().apply(&source, &source, 1.0));
    assert_eq!(out.pixel(0, 0), BLUE);
}

#[test]
fn test_half_amount_mixes_red_and_blue() {
    let filter = red_to_blue().with_amount(0.5).unwrap();
    let source = ImageRecipe::from_image(Image::filled(1, 1, RED));
    let px = render(&filter.apply(&source, &source, 1.0)).pixel(0, 0);

    assert_abs_diff_eq!(px[0], 0.5, epsilon = 1e-6);
    assert_abs_diff_eq!(px[1], 0.0, epsilon = 1e-6);
    assert_abs_diff_eq!(px[2], 0.5, epsilon = 1e-6);
    assert_abs_diff_eq!(px[3], 1.0, epsilon = 1e-6);
}

#[test]
fn test_half_blend_alpha_mixes_red_and_blue() {
    let source = ImageRecipe::from_image(Image::filled(1, 1, RED));
    let px = render(&red_to_blue().apply(&source, &source, 0.5)).pixel(0, 0);

    assert_abs_diff_eq!(px[0], 0.5, epsilon = 1e-6);
    assert_abs_diff_eq!(px[2], 0.5, epsilon = 1e-6);
}

// =============================================================================
// Blend properties
// =============================================================================

#[test]
fn test_full_strength_equals_direct_lookup() {
    for tag in [None, Some(ColorSpaceId::Srgb), Some(ColorSpaceId::DeviceRgb)] {
        let filter = invert(9);
        let source = gradient(16, 8, tag);

        let applied = render(&filter.apply(&source, &source, 1.0));
        let direct = render(&source.color_cube(
            std::sync::Arc::new(filter.table().clone()),
            filter.color_space(),
        ));
        assert_eq!(applied, direct, "tag {tag:?}");
    }
}

#[test]
fn test_full_strength_keeps_lut_alpha() {
    let table = LutTable::identity(4).unwrap().with_alpha_scaled(0.6);
    let filter =
        ColorCubeFilter::new("Faded", "faded", table, 4, ColorSpaceId::DeviceRgb).unwrap();

    // Transparent background, so the composite alpha is the graded alpha.
    let image = gradient(4, 4, Some(ColorSpaceId::DeviceRgb));
    let clear = ImageRecipe::from_image(
        Image::filled(4, 4, [0.0; 4]).with_color_space(Some(ColorSpaceId::DeviceRgb)),
    );
    let out = render(&filter.apply(&image, &clear, 1.0));
    for (_, _, px) in out.pixels() {
        assert_abs_diff_eq!(px[3], 0.6, epsilon = 1e-6);
    }
}

#[test]
fn test_zero_blend_alpha_is_exact_background() {
    for tag in [None, Some(ColorSpaceId::Srgb)] {
        let source = gradient(8, 8, tag);
        let original = render(&source);
        let out = render(&invert(5).apply(&source, &source, 0.0));
        assert_eq!(out, original);
    }
}

#[test]
fn test_zero_amount_is_exact_source() {
    let filter = invert(5).with_amount(0.0).unwrap();
    for blend_alpha in [0.0, 0.3, 1.0] {
        for tag in [None, Some(ColorSpaceId::Srgb), Some(ColorSpaceId::DeviceRgb)] {
            let source = gradient(8, 4, tag);
            let original = render(&source);
            let out = render(&filter.apply(&source, &source, blend_alpha));
            assert_eq!(out, original, "blend_alpha {blend_alpha}, tag {tag:?}");
        }
    }
}

#[test]
fn test_apply_is_deterministic() {
    let filter = invert(17).with_amount(0.7).unwrap();
    let source = gradient(32, 16, None);

    let a = render(&filter.apply(&source, &source, 0.8));
    let b = render(&filter.apply(&source, &source, 0.8));
    assert_eq!(a, b);
}

#[test]
fn test_apply_does_not_touch_input() {
    let image = Image::filled(2, 2, RED);
    let source = ImageRecipe::from_image(image.clone());
    let out = render(&red_to_blue().apply(&source, &source, 1.0));

    assert_eq!(out.pixel(0, 0), BLUE);
    assert_eq!(image.pixel(0, 0), RED);
    assert_eq!(render(&source), image);
}

#[test]
fn test_untagged_input_uses_filter_color_space() {
    // An sRGB-space invert applied to linear mid grey differs from a
    // device-space invert of the same values.
    let grey = ImageRecipe::from_image(Image::filled(1, 1, [0.2, 0.2, 0.2, 1.0]));
    let srgb = invert(17);
    let device = ColorCubeFilter::new(
        "Invert",
        "invert",
        srgb.table().clone(),
        17,
        ColorSpaceId::DeviceRgb,
    )
    .unwrap();

    let in_srgb = render(&srgb.apply(&grey, &grey, 1.0)).pixel(0, 0);
    let in_device = render(&device.apply(&grey, &grey, 1.0)).pixel(0, 0);

    assert_abs_diff_eq!(in_device[0], 0.8, epsilon = 1e-5);
    let expected = ColorSpaceId::Srgb.decode(1.0 - ColorSpaceId::Srgb.encode(0.2));
    assert_abs_diff_eq!(in_srgb[0], expected, epsilon = 1e-4);
}

// =============================================================================
// Construction
// =============================================================================

#[test]
fn test_construction_rejects_bad_tables() {
    assert!(LutTable::from_data(vec![[0.0; 4]; 7], 2).is_err());
    assert!(LutTable::from_data(Vec::new(), 0).is_err());
    assert!(
        ColorCubeFilter::new("x", "x", LutTable::identity(3).unwrap(), 2, ColorSpaceId::Srgb).is_err()
    );
    assert!(red_to_blue().with_amount(1.01).is_err());
}

// =============================================================================
// Previews
// =============================================================================

#[test]
fn test_preview_equality() {
    let source = gradient(4, 4, None);
    let filter = red_to_blue();

    let a = PreviewColorCubeFilter::new(&source, filter.clone());
    let b = PreviewColorCubeFilter::new(&source, filter.clone());
    assert_eq!(a, b);

    let changed = PreviewColorCubeFilter::new(&source, filter.with_amount(0.999).unwrap());
    assert_ne!(a, changed);

    let other_source = gradient(4, 4, None);
    assert_ne!(a, PreviewColorCubeFilter::new(&other_source, filter));
}

#[test]
fn test_preview_renders_full_strength_grade() {
    let source = ImageRecipe::from_image(Image::filled(2, 2, RED));
    let preview = PreviewColorCubeFilter::new(&source, red_to_blue());
    assert_eq!(render(preview.rendered()).pixel(1, 1), BLUE);
}

#[test]
fn test_preheat_warms_render_cache() {
    let engine = Engine::new(EngineConfig::default().preheat_threads(2)).unwrap();
    let source = gradient(64, 64, Some(ColorSpaceId::Srgb));
    let preview = PreviewColorCubeFilter::new(&source, invert(17));

    preview.preheat(engine.preheater());
    preview.preheat(engine.preheater());
    wait_until_cached(engine.renderer(), preview.rendered());

    let misses = engine.renderer().cache_stats().misses;
    let pixels = engine.render(preview.rendered()).unwrap();
    assert_eq!(engine.renderer().cache_stats().misses, misses);
    assert_eq!(pixels, render(preview.rendered()));
}

#[test]
fn test_filmstrip_previews_are_preheated() {
    let engine = Engine::new(EngineConfig::default().preheat_threads(2)).unwrap();
    let mut storage = ColorCubeStorage::new();
    storage.push(red_to_blue()).unwrap();
    storage.push(invert(9)).unwrap();

    let source = gradient(16, 16, None);
    let previews = engine.previews(&source, &storage);
    assert_eq!(previews.len(), 2);
    for preview in &previews {
        wait_until_cached(engine.renderer(), preview.rendered());
    }
}
