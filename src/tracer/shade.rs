use nalgebra::{Point3, Vector3};

use crate::tracer::intersect::intersect_any;
use crate::tracer::scene::{Material, Scene};

/// Blinn 모델로 한 점의 색을 계산함. 결과는 1을 넘을 수 있음.
///
/// 조명 세기는 그 조명의 기여분이 아니라 지금까지 누적된 색 전체에 곱해짐.
/// 그래서 조명이 여러 개면 세기가 곱으로 쌓임.
pub fn shade(
    material: &Material,
    position: &Point3<f32>,
    normal: &Vector3<f32>,
    view: &Vector3<f32>,
    scene: &Scene,
) -> Vector3<f32> {
    let mut color = Vector3::zeros();
    let normal = normal.normalize();

    for light in &scene.lights {
        let to_light = light.position - *position;

        // 가려진 조명은 아무것도 더하지 않음 (앰비언트 없음)
        if intersect_any(position, &to_light, &scene.spheres) {
            continue;
        }

        let light_direction = to_light.normalize();
        let cos_theta = normal.dot(&light_direction);
        if cos_theta <= 0.0 {
            continue;
        }

        color += material.diffuse * cos_theta;

        let half = (light_direction + view).normalize();
        let cos_phi = normal.dot(&half);
        if cos_phi > 0.0 {
            color += material.specular * cos_phi.powf(material.shininess);
        }

        color.component_mul_assign(&light.intensity);
    }

    color
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracer::scene::{Light, Sphere};
    use approx::assert_relative_eq;

    fn matte(diffuse: Vector3<f32>) -> Material {
        Material::new(diffuse, Vector3::zeros(), 1.0)
    }

    #[test]
    fn no_lights_is_black() {
        let scene = Scene::default();
        let color = shade(
            &matte(Vector3::new(1.0, 1.0, 1.0)),
            &Point3::origin(),
            &Vector3::new(0.0, 1.0, 0.0),
            &Vector3::new(0.0, 1.0, 0.0),
            &scene,
        );
        assert_relative_eq!(color, Vector3::zeros());
    }

    #[test]
    fn diffuse_follows_cosine() {
        let scene = Scene::new(
            vec![],
            vec![Light::new(Point3::new(1.0, 1.0, 0.0), Vector3::new(1.0, 1.0, 1.0))],
        );
        let color = shade(
            &matte(Vector3::new(0.5, 1.0, 0.25)),
            &Point3::origin(),
            // 정규화되지 않은 노멀도 받아야 함
            &Vector3::new(0.0, 3.0, 0.0),
            &Vector3::new(0.0, 1.0, 0.0),
            &scene,
        );
        let cos_theta = std::f32::consts::FRAC_1_SQRT_2;
        assert_relative_eq!(
            color,
            Vector3::new(0.5, 1.0, 0.25) * cos_theta,
            epsilon = 1e-5
        );
    }

    #[test]
    fn specular_adds_blinn_highlight() {
        let scene = Scene::new(
            vec![],
            vec![Light::new(Point3::new(0.0, 5.0, 0.0), Vector3::new(1.0, 1.0, 1.0))],
        );
        let material = Material::new(Vector3::zeros(), Vector3::new(0.5, 0.5, 0.5), 10.0);
        let color = shade(
            &material,
            &Point3::origin(),
            &Vector3::new(0.0, 1.0, 0.0),
            &Vector3::new(0.0, 1.0, 0.0),
            &scene,
        );
        // 반사 벡터가 노멀과 같으니 cos_phi = 1
        assert_relative_eq!(color, Vector3::new(0.5, 0.5, 0.5), epsilon = 1e-5);
    }

    #[test]
    fn light_below_horizon_contributes_nothing() {
        let scene = Scene::new(
            vec![],
            vec![Light::new(Point3::new(0.0, -5.0, 0.0), Vector3::new(3.0, 3.0, 3.0))],
        );
        let color = shade(
            &matte(Vector3::new(1.0, 1.0, 1.0)),
            &Point3::origin(),
            &Vector3::new(0.0, 1.0, 0.0),
            &Vector3::new(0.0, 1.0, 0.0),
            &scene,
        );
        assert_relative_eq!(color, Vector3::zeros());
    }

    #[test]
    fn shadowed_light_is_skipped() {
        let blocker = Sphere::new(Point3::new(0.0, 2.5, 0.0), 1.0, Material::default());
        let scene = Scene::new(
            vec![blocker],
            vec![Light::new(Point3::new(0.0, 5.0, 0.0), Vector3::new(1.0, 1.0, 1.0))],
        );
        let color = shade(
            &matte(Vector3::new(1.0, 1.0, 1.0)),
            &Point3::origin(),
            &Vector3::new(0.0, 1.0, 0.0),
            &Vector3::new(0.0, 1.0, 0.0),
            &scene,
        );
        assert_relative_eq!(color, Vector3::zeros());
    }

    #[test]
    fn intensity_scales_whole_accumulator() {
        let overhead = Light::new(Point3::new(0.0, 5.0, 0.0), Vector3::new(2.0, 2.0, 2.0));
        let scene = Scene::new(vec![], vec![overhead, overhead]);
        let color = shade(
            &matte(Vector3::new(0.5, 0.5, 0.5)),
            &Point3::origin(),
            &Vector3::new(0.0, 1.0, 0.0),
            &Vector3::new(0.0, 1.0, 0.0),
            &scene,
        );
        // 첫 조명: (0 + 0.5) * 2 = 1, 두 번째: (1 + 0.5) * 2 = 3
        assert_relative_eq!(color, Vector3::new(3.0, 3.0, 3.0), epsilon = 1e-5);
    }
}
