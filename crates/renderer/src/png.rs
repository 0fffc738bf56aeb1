//! PNG encoding for slice previews.
//!
//! Writes 8-bit truecolour PNGs (color type 2) by hand: signature, IHDR,
//! a single zlib-compressed IDAT and IEND.

use std::io::Write;

use crate::slice::RenderableGrid;

const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Render a slice as an RGB heatmap.
///
/// Columns follow xi left to right and rows follow Q2 bottom to top, so
/// the image reads like the surface seen from above.
pub fn slice_preview_pixels(grid: &RenderableGrid) -> Vec<u8> {
    let width = grid.xi_len();
    let height = grid.q2_len();
    let mut pixels = vec![0u8; width * height * 3];

    for cell in grid.cells() {
        let row = height - 1 - cell.q2_index;
        let idx = (row * width + cell.xi_index) * 3;
        pixels[idx] = cell.rgb.r;
        pixels[idx + 1] = cell.rgb.g;
        pixels[idx + 2] = cell.rgb.b;
    }

    pixels
}

/// Encode a slice preview as PNG.
pub fn slice_preview_png(grid: &RenderableGrid) -> Result<Vec<u8>, String> {
    create_png_rgb(&slice_preview_pixels(grid), grid.xi_len(), grid.q2_len())
}

/// Create a PNG image from RGB pixel data (3 bytes per pixel).
///
/// # Arguments
/// - `pixels`: RGB pixel data, row-major, top row first
/// - `width`: Image width in pixels
/// - `height`: Image height in pixels
pub fn create_png_rgb(pixels: &[u8], width: usize, height: usize) -> Result<Vec<u8>, String> {
    if width == 0 || height == 0 {
        return Err(format!("invalid image size {}x{}", width, height));
    }
    if pixels.len() != width * height * 3 {
        return Err(format!(
            "expected {} bytes for {}x{} RGB, got {}",
            width * height * 3,
            width,
            height,
            pixels.len()
        ));
    }

    let mut png = Vec::new();

    // PNG signature
    png.extend_from_slice(&PNG_SIGNATURE);

    // IHDR chunk
    let mut ihdr_data = Vec::with_capacity(13);
    ihdr_data.extend_from_slice(&(width as u32).to_be_bytes());
    ihdr_data.extend_from_slice(&(height as u32).to_be_bytes());
    ihdr_data.push(8); // bit depth
    ihdr_data.push(2); // color type (RGB)
    ihdr_data.push(0); // compression method
    ihdr_data.push(0); // filter method
    ihdr_data.push(0); // interlace method
    write_chunk(&mut png, b"IHDR", &ihdr_data);

    // IDAT chunk (image data)
    let idat_data = deflate_idat_rgb(pixels, width, height)
        .map_err(|e| format!("IDAT compression failed: {}", e))?;
    write_chunk(&mut png, b"IDAT", &idat_data);

    // IEND chunk
    write_chunk(&mut png, b"IEND", &[]);

    Ok(png)
}

/// Write a PNG chunk
fn write_chunk(png: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) {
    png.extend_from_slice(&(data.len() as u32).to_be_bytes());
    png.extend_from_slice(chunk_type);
    png.extend_from_slice(data);

    // CRC covers type and data
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type);
    hasher.update(data);
    png.extend_from_slice(&hasher.finalize().to_be_bytes());
}

/// Deflate RGB image data for the IDAT chunk.
fn deflate_idat_rgb(
    pixels: &[u8],
    width: usize,
    height: usize,
) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let stride = width * 3;
    let mut uncompressed = Vec::with_capacity(height * (1 + stride));
    for row in pixels.chunks_exact(stride) {
        uncompressed.push(0); // filter type: none
        uncompressed.extend_from_slice(row);
    }

    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::fast());
    encoder.write_all(&uncompressed)?;
    let compressed = encoder.finish()?;

    Ok(compressed)
}
