use nalgebra::{Point3, Unit, Vector2, Vector3};

use crate::tracer::ray::Ray;

/// 핀홀 카메라. 픽셀 좌표를 받아 월드 공간의 빔을 만들어 줌.
pub struct Camera {
    pub position: Point3<f32>,
    forward: Unit<Vector3<f32>>,
    right: Unit<Vector3<f32>>,
    up: Unit<Vector3<f32>>,

    vertical_fov: f32,
    viewport_size: (u32, u32),
}

impl Camera {
    // vertical_fov는 라디안
    pub fn look_at(
        position: Point3<f32>,
        target: Point3<f32>,
        vertical_fov: f32,
        viewport_size: (u32, u32),
    ) -> Self {
        let forward = Unit::new_normalize(target - position);
        let world_up = Vector3::y();

        // 바로 위나 아래를 보면 외적이 0이 되니 z축을 대신 씀
        let right = Unit::try_new(forward.cross(&world_up), 1e-6)
            .unwrap_or_else(|| Unit::new_normalize(forward.cross(&Vector3::z())));
        let up = Unit::new_normalize(right.cross(&*forward));

        Self {
            position,
            forward,
            right,
            up,
            vertical_fov,
            viewport_size,
        }
    }

    pub fn viewport_size(&self) -> (u32, u32) {
        self.viewport_size
    }

    pub fn aspect(&self) -> f32 {
        self.viewport_size.0 as f32 / self.viewport_size.1 as f32
    }

    /// (x, y) 픽셀 안의 한 점을 지나는 빔. offset은 픽셀 안에서의 위치로 (0.5, 0.5)가 가운데.
    /// y는 위에서 아래로 증가함.
    pub fn ray(&self, x: u32, y: u32, offset: Vector2<f32>) -> Ray {
        let (width, height) = self.viewport_size;

        let mut coord = Vector2::new(
            (x as f32 + offset.x) / width as f32,
            (y as f32 + offset.y) / height as f32,
        );
        coord *= 2.0;
        coord -= Vector2::new(1.0, 1.0);

        let half_height = (self.vertical_fov / 2.0).tan();
        let half_width = half_height * self.aspect();

        let direction = self.forward.into_inner()
            + self.right.into_inner() * (coord.x * half_width)
            - self.up.into_inner() * (coord.y * half_height);

        Ray::new(self.position, direction.normalize())
    }

    pub fn center_ray(&self, x: u32, y: u32) -> Ray {
        self.ray(x, y, Vector2::new(0.5, 0.5))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn center_pixel_looks_forward() {
        let camera = Camera::look_at(
            Point3::new(0.0, 0.0, 5.0),
            Point3::origin(),
            FRAC_PI_2,
            (101, 101),
        );
        let ray = camera.center_ray(50, 50);
        assert_relative_eq!(ray.origin, Point3::new(0.0, 0.0, 5.0));
        assert_relative_eq!(ray.direction, Vector3::new(0.0, 0.0, -1.0), epsilon = 1e-6);
    }

    #[test]
    fn corners_follow_screen_orientation() {
        let camera = Camera::look_at(
            Point3::new(0.0, 0.0, 5.0),
            Point3::origin(),
            FRAC_PI_2,
            (2, 2),
        );
        // 왼쪽 위 모서리
        let top_left = camera.ray(0, 0, Vector2::zeros());
        assert_relative_eq!(
            top_left.direction,
            Vector3::new(-1.0, 1.0, -1.0).normalize(),
            epsilon = 1e-6
        );

        // 오른쪽 아래 모서리
        let bottom_right = camera.ray(1, 1, Vector2::new(1.0, 1.0));
        assert_relative_eq!(
            bottom_right.direction,
            Vector3::new(1.0, -1.0, -1.0).normalize(),
            epsilon = 1e-6
        );
    }

    #[test]
    fn looking_straight_down_is_well_defined() {
        let camera = Camera::look_at(
            Point3::new(0.0, 5.0, 0.0),
            Point3::origin(),
            1.0,
            (4, 4),
        );
        let ray = camera.center_ray(2, 2);
        assert!(ray.direction.iter().all(|c| c.is_finite()));
    }
}
