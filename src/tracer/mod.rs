use log::warn;
use nalgebra::{Vector3, Vector4};

use crate::tracer::environment::Environment;
use crate::tracer::intersect::{intersect_ray, HitInfo};
use crate::tracer::ray::Ray;
use crate::tracer::scene::Scene;
use crate::tracer::shade::shade;

pub mod environment;
pub mod intersect;
pub mod ray;
pub mod scene;
pub mod shade;

// 반사 빔을 최대 몇 번까지 쏠지. 실행 중에 정하는 bounce_limit은 이 값을 넘을 수 없음.
pub const MAX_BOUNCES: usize = 8;

pub struct Traced {
    pub color: Vector4<f32>,
    // 실제로 쏜 반사 빔 개수
    pub bounces: usize,
}

// 반사 루프에서 한 바퀴마다 넘겨주는 상태
struct Bounce {
    ray: Ray,
    hit: HitInfo,
    k_s: Vector3<f32>,
}

pub struct RayTracer<'a> {
    scene: &'a Scene,
    environment: &'a dyn Environment,
    bounce_limit: usize,
}

impl<'a> RayTracer<'a> {
    pub fn new(scene: &'a Scene, environment: &'a dyn Environment, bounce_limit: usize) -> Self {
        let bounce_limit = if bounce_limit > MAX_BOUNCES {
            warn!("bounce limit {bounce_limit} exceeds {MAX_BOUNCES}, clamping");
            MAX_BOUNCES
        } else {
            bounce_limit
        };

        Self {
            scene,
            environment,
            bounce_limit,
        }
    }

    pub fn bounce_limit(&self) -> usize {
        self.bounce_limit
    }

    pub fn trace(&self, ray: &Ray) -> Vector4<f32> {
        self.trace_path(ray).color
    }

    /// 빔이 장면에 맞으면 쉐이딩 + 반사를 누적한 색(alpha 1),
    /// 아니면 환경 색(alpha 0).
    pub fn trace_path(&self, ray: &Ray) -> Traced {
        let spheres = &self.scene.spheres;

        let Some(hit) = intersect_ray(ray, spheres) else {
            let sky = self.environment.sample(&ray.direction);
            return Traced {
                color: sky.push(0.0),
                bounces: 0,
            };
        };

        let view = (-ray.direction).normalize();
        let mut color = shade(&hit.material, &hit.position, &hit.normal, &view, self.scene);

        let mut current = Bounce {
            ray: *ray,
            hit,
            k_s: hit.material.specular,
        };
        let mut bounces = 0;

        for bounce in 0..MAX_BOUNCES {
            if bounce >= self.bounce_limit || !current.hit.material.is_reflective() {
                break;
            }

            let view = (-current.ray.direction).normalize();
            let normal = current.hit.normal.normalize();
            let reflected = Ray::new(current.hit.position, reflect(&view, &normal));
            bounces += 1;

            let Some(next) = intersect_ray(&reflected, spheres) else {
                // 장면 밖으로 빠져나간 빔은 더 튕길 곳이 없음
                color += current
                    .k_s
                    .component_mul(&self.environment.sample(&reflected.direction));
                break;
            };

            // 반사된 점은 들어온 빔의 시선 방향으로 쉐이딩함
            let reflected_color =
                shade(&next.material, &next.position, &next.normal, &view, self.scene);
            color += current.k_s.component_mul(&reflected_color);

            current = Bounce {
                ray: reflected,
                hit: next,
                k_s: current.k_s.component_mul(&next.material.specular),
            };
        }

        Traced {
            color: color.push(1.0),
            bounces,
        }
    }
}

// 2 (V·N) N - V
pub fn reflect(view: &Vector3<f32>, normal: &Vector3<f32>) -> Vector3<f32> {
    normal * (2.0 * view.dot(normal)) - view
}
