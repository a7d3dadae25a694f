use std::f32::consts::PI;
use std::ffi::OsStr;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use image::{ImageError, ImageFormat, Rgb32FImage};
use nalgebra::Vector3;

use crate::error::{Error, Result};

/// 빔이 아무것도 맞추지 못했을 때 방향에 따라 돌려줄 색.
pub trait Environment: Sync {
    fn sample(&self, direction: &Vector3<f32>) -> Vector3<f32>;
}

impl<F> Environment for F
where
    F: Fn(&Vector3<f32>) -> Vector3<f32> + Sync,
{
    fn sample(&self, direction: &Vector3<f32>) -> Vector3<f32> {
        self(direction)
    }
}

// 위(+y)로 갈수록 zenith 쪽으로 섞이는 하늘
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sky {
    pub horizon: Vector3<f32>,
    pub zenith: Vector3<f32>,
}

impl Sky {
    pub fn uniform(color: Vector3<f32>) -> Self {
        Self {
            horizon: color,
            zenith: color,
        }
    }
}

impl Default for Sky {
    fn default() -> Self {
        Self {
            horizon: Vector3::new(0.9, 0.9, 0.95),
            zenith: Vector3::new(0.6, 0.7, 0.9),
        }
    }
}

impl Environment for Sky {
    fn sample(&self, direction: &Vector3<f32>) -> Vector3<f32> {
        let up = direction.normalize().y.max(0.0);
        self.horizon.lerp(&self.zenith, up)
    }
}

/// 위도-경도(equirectangular) 파노라마 이미지. y축이 위쪽.
pub struct EnvironmentMap {
    texels: Rgb32FImage,
}

impl EnvironmentMap {
    pub fn new(texels: Rgb32FImage) -> Result<Self> {
        let (width, height) = texels.dimensions();
        if width == 0 || height == 0 {
            return Err(Error::EmptyImage { width, height });
        }
        Ok(Self { texels })
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let format = match path.extension().and_then(OsStr::to_str) {
            Some("jpg") | Some("jpeg") => ImageFormat::Jpeg,
            Some("png") => ImageFormat::Png,
            _ => {
                return Err(Error::UnsupportedImage {
                    path: path.to_path_buf(),
                })
            }
        };

        let loaded = File::open(path)
            .map_err(ImageError::IoError)
            .and_then(|file| image::load(BufReader::new(file), format))
            .map_err(|source| Error::ImageLoad {
                path: path.to_path_buf(),
                source,
            })?;

        let map = Self::new(loaded.into_rgb32f())?;
        let (width, height) = map.size();
        log::info!("loaded environment map {} ({width}x{height})", path.display());

        Ok(map)
    }

    pub fn size(&self) -> (u32, u32) {
        self.texels.dimensions()
    }
}

impl Environment for EnvironmentMap {
    fn sample(&self, direction: &Vector3<f32>) -> Vector3<f32> {
        let (width, height) = self.texels.dimensions();
        let direction = direction.normalize();

        // -z 방향이 이미지 가운데에 오도록
        let u = 0.5 + direction.x.atan2(-direction.z) / (2.0 * PI);
        let v = direction.y.clamp(-1.0, 1.0).acos() / PI;

        let x = ((u * width as f32) as u32).min(width - 1);
        let y = ((v * height as f32) as u32).min(height - 1);

        let texel = self.texels.get_pixel(x, y);
        Vector3::new(texel[0], texel[1], texel[2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use image::Rgb;

    #[test]
    fn closures_are_environments() {
        let environment = |direction: &Vector3<f32>| direction.abs();
        assert_relative_eq!(
            environment.sample(&Vector3::new(-1.0, 0.5, 0.0)),
            Vector3::new(1.0, 0.5, 0.0)
        );
    }

    #[test]
    fn sky_blends_toward_zenith() {
        let sky = Sky {
            horizon: Vector3::new(1.0, 1.0, 1.0),
            zenith: Vector3::new(0.0, 0.0, 1.0),
        };
        assert_relative_eq!(sky.sample(&Vector3::new(0.0, 4.0, 0.0)), sky.zenith);
        assert_relative_eq!(sky.sample(&Vector3::new(1.0, 0.0, 0.0)), sky.horizon);
        assert_relative_eq!(sky.sample(&Vector3::new(0.0, -1.0, 0.0)), sky.horizon);
    }

    #[test]
    fn uniform_sky_ignores_direction() {
        let color = Vector3::new(0.2, 0.3, 0.4);
        let sky = Sky::uniform(color);
        assert_relative_eq!(sky.sample(&Vector3::new(0.3, 0.8, -0.1)), color);
    }

    #[test]
    fn map_splits_up_and_down() {
        // 윗줄은 빨강, 아랫줄은 초록
        let texels = Rgb32FImage::from_fn(4, 2, |_, y| {
            if y == 0 {
                Rgb([1.0, 0.0, 0.0])
            } else {
                Rgb([0.0, 1.0, 0.0])
            }
        });
        let map = EnvironmentMap::new(texels).unwrap();
        assert_eq!(map.size(), (4, 2));

        assert_relative_eq!(
            map.sample(&Vector3::new(0.0, 1.0, 0.0)),
            Vector3::new(1.0, 0.0, 0.0)
        );
        assert_relative_eq!(
            map.sample(&Vector3::new(0.0, -1.0, 0.0)),
            Vector3::new(0.0, 1.0, 0.0)
        );
    }

    #[test]
    fn empty_map_is_rejected() {
        let error = EnvironmentMap::new(Rgb32FImage::new(0, 0)).err().unwrap();
        assert!(matches!(
            error,
            Error::EmptyImage {
                width: 0,
                height: 0
            }
        ));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let error = EnvironmentMap::from_path("sky.hdr").err().unwrap();
        assert!(matches!(error, Error::UnsupportedImage { .. }));
    }
}
