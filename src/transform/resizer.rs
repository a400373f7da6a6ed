use image::{DynamicImage, Rgba, RgbaImage, imageops, imageops::FilterType};

use crate::request::{Dimensions, ResizeMode};

/// Fill used for canvas area not covered by the source image.
pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Fit `img` into `size` using exactly one strategy.
pub fn apply_mode(
    img: DynamicImage,
    mode: ResizeMode,
    size: Dimensions,
    filter: FilterType,
) -> DynamicImage {
    let Dimensions { width, height } = size;
    match mode {
        ResizeMode::Fit => img.resize_to_fill(width, height, filter),
        ResizeMode::Resize => img.resize_exact(width, height, filter),
        ResizeMode::Background => {
            let scaled = scale_down_to_fit(img, width, height, filter);
            center_on_canvas(&scaled, width, height)
        }
        ResizeMode::ResizeCanvas => center_on_canvas(&img, width, height),
    }
}

/// Shrink an image to fit inside the box, preserving aspect ratio.
///
/// Images already inside the box are returned unchanged.
pub fn scale_down_to_fit(
    img: DynamicImage,
    max_width: u32,
    max_height: u32,
    filter: FilterType,
) -> DynamicImage {
    let (w, h) = (img.width(), img.height());
    if w <= max_width && h <= max_height {
        return img;
    }

    let scale = (f64::from(max_width) / f64::from(w)).min(f64::from(max_height) / f64::from(h));
    let new_width = ((f64::from(w) * scale).round() as u32).clamp(1, max_width);
    let new_height = ((f64::from(h) * scale).round() as u32).clamp(1, max_height);
    img.resize_exact(new_width, new_height, filter)
}

/// Place an image at the centre of a transparent canvas, cropping overflow.
///
/// The canvas centre `(W/2, H/2)` and image centre `(w/2, h/2)` are aligned
/// using integer halves, so odd leftovers go to the top and left padding.
pub fn center_on_canvas(img: &DynamicImage, width: u32, height: u32) -> DynamicImage {
    let mut canvas = RgbaImage::from_pixel(width, height, TRANSPARENT);
    let x = i64::from(width / 2) - i64::from(img.width() / 2);
    let y = i64::from(height / 2) - i64::from(img.height() / 2);
    imageops::replace(&mut canvas, &img.to_rgba8(), x, y);
    DynamicImage::ImageRgba8(canvas)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);

    fn size(w: u32, h: u32) -> Dimensions {
        Dimensions {
            width: w,
            height: h,
        }
    }

    /// 400x300, left half red, right half blue, with a green marker on the
    /// top-left corner of the central 100x100 region.
    fn landscape() -> DynamicImage {
        let mut img = RgbaImage::from_fn(400, 300, |x, _| if x < 200 { RED } else { BLUE });
        img.put_pixel(150, 100, Rgba([0, 255, 0, 255]));
        DynamicImage::ImageRgba8(img)
    }

    #[test]
    fn test_fit_fills_and_crops() {
        let out = apply_mode(landscape(), ResizeMode::Fit, size(100, 100), FilterType::Nearest)
            .to_rgba8();
        assert_eq!(out.dimensions(), (100, 100));
        // Scaled to 133x100 then cropped centrally: both halves still visible,
        // no transparent padding anywhere
        assert_eq!(out.get_pixel(5, 50), &RED);
        assert_eq!(out.get_pixel(95, 50), &BLUE);
        assert!(out.pixels().all(|p| p[3] == 255));
    }

    #[test]
    fn test_resize_stretches() {
        let out = apply_mode(landscape(), ResizeMode::Resize, size(100, 100), FilterType::Nearest)
            .to_rgba8();
        assert_eq!(out.dimensions(), (100, 100));
        // Horizontal halves map exactly onto output halves
        assert_eq!(out.get_pixel(0, 0), &RED);
        assert_eq!(out.get_pixel(49, 99), &RED);
        assert_eq!(out.get_pixel(50, 0), &BLUE);
        assert_eq!(out.get_pixel(99, 99), &BLUE);
    }

    #[test]
    fn test_background_pads_scaled_image() {
        let out = apply_mode(
            landscape(),
            ResizeMode::Background,
            size(100, 100),
            FilterType::Nearest,
        )
        .to_rgba8();
        assert_eq!(out.dimensions(), (100, 100));

        // 100x75 content centred vertically: 50 - 37 puts it on rows 13..88
        assert_eq!(out.get_pixel(50, 0), &TRANSPARENT);
        assert_eq!(out.get_pixel(50, 12), &TRANSPARENT);
        assert_eq!(out.get_pixel(10, 13)[3], 255);
        assert_eq!(out.get_pixel(10, 87)[3], 255);
        assert_eq!(out.get_pixel(50, 88), &TRANSPARENT);
        assert_eq!(out.get_pixel(50, 99), &TRANSPARENT);
        assert_eq!(out.get_pixel(10, 50), &RED);
        assert_eq!(out.get_pixel(90, 50), &BLUE);
    }

    #[test]
    fn test_background_never_upscales() {
        let small = DynamicImage::ImageRgba8(RgbaImage::from_pixel(40, 20, RED));
        let out = apply_mode(small, ResizeMode::Background, size(100, 100), FilterType::Nearest)
            .to_rgba8();
        assert_eq!(out.dimensions(), (100, 100));

        // Original 40x20 sits at (30, 40)
        assert_eq!(out.get_pixel(29, 50), &TRANSPARENT);
        assert_eq!(out.get_pixel(30, 40), &RED);
        assert_eq!(out.get_pixel(69, 59), &RED);
        assert_eq!(out.get_pixel(70, 59), &TRANSPARENT);
        assert_eq!(out.get_pixel(50, 60), &TRANSPARENT);
    }

    #[test]
    fn test_resize_canvas_keeps_unscaled_center() {
        let source = landscape().to_rgba8();
        let out = apply_mode(
            landscape(),
            ResizeMode::ResizeCanvas,
            size(100, 100),
            FilterType::Nearest,
        )
        .to_rgba8();
        assert_eq!(out.dimensions(), (100, 100));

        // Output (x, y) is source (x + 150, y + 100)
        for (x, y) in [(0, 0), (0, 99), (49, 50), (50, 50), (99, 0), (99, 99)] {
            assert_eq!(out.get_pixel(x, y), source.get_pixel(x + 150, y + 100));
        }
        assert_eq!(out.get_pixel(0, 0), &Rgba([0, 255, 0, 255]));
    }

    #[test]
    fn test_resize_canvas_pads_small_image() {
        let small = DynamicImage::ImageRgba8(RgbaImage::from_pixel(2, 2, BLUE));
        let out = apply_mode(small, ResizeMode::ResizeCanvas, size(4, 4), FilterType::Nearest)
            .to_rgba8();
        assert_eq!(out.get_pixel(0, 0), &TRANSPARENT);
        assert_eq!(out.get_pixel(1, 1), &BLUE);
        assert_eq!(out.get_pixel(2, 2), &BLUE);
        assert_eq!(out.get_pixel(3, 3), &TRANSPARENT);
    }

    #[test]
    fn test_odd_padding_goes_to_top_left() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(3, 3, RED));
        let out = center_on_canvas(&img, 6, 6).to_rgba8();
        // 3 - 1 = 2, so the image covers 2..5 and leaves one column on the right
        assert_eq!(out.get_pixel(1, 1), &TRANSPARENT);
        assert_eq!(out.get_pixel(2, 2), &RED);
        assert_eq!(out.get_pixel(4, 4), &RED);
        assert_eq!(out.get_pixel(5, 5), &TRANSPARENT);
    }

    #[test]
    fn test_scale_down_keeps_at_least_one_pixel() {
        let strip = DynamicImage::ImageRgba8(RgbaImage::from_pixel(1000, 1, RED));
        let out = scale_down_to_fit(strip, 10, 10, FilterType::Triangle);
        assert_eq!((out.width(), out.height()), (10, 1));
    }
}
