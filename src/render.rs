use std::path::Path;

use bytemuck::cast_slice;
use image::RgbaImage;
use nalgebra::{Vector2, Vector4};
use rayon::prelude::*;

use crate::camera::Camera;
use crate::error::{Error, Result};
use crate::tracer::RayTracer;
use crate::util::pixel_jitter;
use crate::vec4_to_rgba;

pub struct Settings {
    // 픽셀당 빔 개수. 1이면 픽셀 가운데로만 쏨
    pub samples: u32,
    // 환경 색의 alpha(0)를 그대로 남길지
    pub keep_alpha: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            samples: 1,
            keep_alpha: false,
        }
    }
}

pub struct Renderer {
    pub settings: Settings,
}

impl Renderer {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// 한 줄씩 나눠서 병렬로 그림. 결과는 위에서 아래, 왼쪽에서 오른쪽 순서.
    pub fn render(&self, tracer: &RayTracer, camera: &Camera) -> Vec<Vector4<f32>> {
        let (width, height) = camera.viewport_size();
        if width == 0 || height == 0 {
            return Vec::new();
        }

        let mut pixels = vec![Vector4::zeros(); width as usize * height as usize];

        pixels
            .par_chunks_mut(width as usize)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, pixel) in row.iter_mut().enumerate() {
                    *pixel = self.per_pixel(tracer, camera, x as u32, y as u32);
                }
            });

        pixels
    }

    pub fn per_pixel(&self, tracer: &RayTracer, camera: &Camera, x: u32, y: u32) -> Vector4<f32> {
        let samples = self.settings.samples.max(1);
        if samples == 1 {
            return tracer.trace(&camera.ray(x, y, Vector2::new(0.5, 0.5)));
        }

        let sum: Vector4<f32> = (0..samples)
            .map(|_| tracer.trace(&camera.ray(x, y, pixel_jitter())))
            .sum();
        sum / samples as f32
    }

    pub fn to_image(&self, pixels: &[Vector4<f32>], width: u32, height: u32) -> Result<RgbaImage> {
        let expected = pixel_count(width, height)?;
        if pixels.len() != expected {
            return Err(Error::PixelCount {
                expected,
                actual: pixels.len(),
            });
        }

        let rgba: Vec<[u8; 4]> = pixels
            .par_iter()
            .map(|color| {
                let mut color = *color;
                if !self.settings.keep_alpha {
                    color.w = 1.0;
                }
                vec4_to_rgba(&color)
            })
            .collect();

        let bytes: &[u8] = cast_slice(&rgba);
        RgbaImage::from_raw(width, height, bytes.to_vec()).ok_or(Error::PixelCount {
            expected,
            actual: pixels.len(),
        })
    }

    pub fn render_to_file<P: AsRef<Path>>(
        &self,
        tracer: &RayTracer,
        camera: &Camera,
        path: P,
    ) -> Result<()> {
        let (width, height) = camera.viewport_size();
        pixel_count(width, height)?;

        let start = std::time::Instant::now();
        let pixels = self.render(tracer, camera);
        log::info!(
            "rendered {width}x{height} ({} spp, {} bounces) in {:.2?}",
            self.settings.samples.max(1),
            tracer.bounce_limit(),
            start.elapsed()
        );

        let path = path.as_ref();
        self.to_image(&pixels, width, height)?
            .save(path)
            .map_err(|source| Error::ImageSave {
                path: path.to_path_buf(),
                source,
            })?;
        log::info!("saved {}", path.display());

        Ok(())
    }
}

// 픽셀 수는 u32 안에 들어가야 함
fn pixel_count(width: u32, height: u32) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(Error::EmptyImage { width, height });
    }
    width
        .checked_mul(height)
        .map(|count| count as usize)
        .ok_or(Error::ImageTooLarge { width, height })
}
