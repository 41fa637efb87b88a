use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use std::path::{Path, PathBuf};

/// Black `width x height` scan with a white block for every `(x, y, w, h)`.
pub fn scan_with_blocks(width: u32, height: u32, blocks: &[(u32, u32, u32, u32)]) -> GrayImage {
    let mut img = GrayImage::from_pixel(width, height, Luma([0u8]));
    for &(x, y, w, h) in blocks {
        draw_filled_rect_mut(&mut img, Rect::at(x as i32, y as i32).of_size(w, h), Luma([255u8]));
    }
    img
}

/// The 1000x1000 scan with a centered 400x400 photo.
pub fn centered_photo_scan() -> DynamicImage {
    DynamicImage::ImageLuma8(scan_with_blocks(1000, 1000, &[(300, 300, 400, 400)]))
}

/// Colour scan: dark bed with a bright, slightly tinted photo.
pub fn color_scan() -> DynamicImage {
    let mut img = RgbImage::from_pixel(600, 500, Rgb([20u8, 20, 25]));
    draw_filled_rect_mut(&mut img, Rect::at(120, 80).of_size(300, 250), Rgb([230u8, 210, 190]));
    DynamicImage::ImageRgb8(img)
}

pub fn all_white_scan() -> DynamicImage {
    DynamicImage::ImageLuma8(GrayImage::from_pixel(300, 300, Luma([255u8])))
}

/// Saves `img` as PNG under `dir` and returns its path.
pub fn save_png(dir: &Path, name: &str, img: &DynamicImage) -> PathBuf {
    let path = dir.join(name);
    img.save_with_format(&path, image::ImageFormat::Png)
        .expect("Failed to save test image");
    path
}
