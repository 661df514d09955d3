//! Fixture photos for integration tests.

#![allow(dead_code)]

use exif::experimental::Writer;
use exif::{Field, In, Tag, Value};
use image::{DynamicImage, GrayImage, ImageFormat, Luma, RgbImage};
use std::io::Cursor;

/// JPEG bytes with an APP1 EXIF segment holding `fields`
pub fn jpeg_with_exif(image: &DynamicImage, fields: &[Field]) -> Vec<u8> {
    let mut encoded = Cursor::new(Vec::new());
    image.write_to(&mut encoded, ImageFormat::Jpeg).unwrap();
    let encoded = encoded.into_inner();

    let mut tiff = Cursor::new(Vec::new());
    let mut writer = Writer::new();
    for field in fields {
        writer.push_field(field);
    }
    writer.write(&mut tiff, false).unwrap();
    let tiff = tiff.into_inner();

    let mut bytes = vec![0xFF, 0xD8, 0xFF, 0xE1];
    bytes.extend_from_slice(&((2 + 6 + tiff.len()) as u16).to_be_bytes());
    bytes.extend_from_slice(b"Exif\0\0");
    bytes.extend_from_slice(&tiff);
    bytes.extend_from_slice(&encoded[2..]);
    bytes
}

/// Small JPEG taken at `date` ("YYYY:MM:DD HH:MM:SS")
pub fn dated_jpeg(date: &str) -> Vec<u8> {
    let field = Field {
        tag: Tag::DateTimeOriginal,
        ifd_num: In::PRIMARY,
        value: Value::Ascii(vec![date.as_bytes().to_vec()]),
    };
    jpeg_with_exif(&DynamicImage::ImageRgb8(RgbImage::new(8, 8)), &[field])
}

/// Landscape JPEG tagged with an EXIF orientation
pub fn oriented_jpeg(width: u32, height: u32, orientation: u16) -> Vec<u8> {
    let field = Field {
        tag: Tag::Orientation,
        ifd_num: In::PRIMARY,
        value: Value::Short(vec![orientation]),
    };
    let image = DynamicImage::ImageLuma8(GrayImage::from_pixel(width, height, Luma([128])));
    jpeg_with_exif(&image, &[field])
}

/// PNG bytes of a flat gray image
pub fn flat_png(size: u32) -> Vec<u8> {
    let image = DynamicImage::ImageLuma8(GrayImage::from_pixel(size, size, Luma([128])));
    let mut bytes = Cursor::new(Vec::new());
    image.write_to(&mut bytes, ImageFormat::Png).unwrap();
    bytes.into_inner()
}

/// PNG bytes of a fine checkerboard, as sharp as an image gets
pub fn sharp_png(size: u32) -> Vec<u8> {
    let image = DynamicImage::ImageLuma8(GrayImage::from_fn(size, size, |x, y| {
        if (x + y) % 2 == 0 {
            Luma([0])
        } else {
            Luma([255])
        }
    }));
    let mut bytes = Cursor::new(Vec::new());
    image.write_to(&mut bytes, ImageFormat::Png).unwrap();
    bytes.into_inner()
}

/// PNG bytes of seeded noise softened by a gaussian blur of `sigma`
pub fn soft_noise_png(size: u32, sigma: f32) -> Vec<u8> {
    let mut state: u64 = 0x9e37_79b9_7f4a_7c15;
    let noise = GrayImage::from_fn(size, size, |_, _| {
        state = state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        Luma([(state >> 56) as u8])
    });
    let image = DynamicImage::ImageLuma8(image::imageops::blur(&noise, sigma));
    let mut bytes = Cursor::new(Vec::new());
    image.write_to(&mut bytes, ImageFormat::Png).unwrap();
    bytes.into_inner()
}
