use nalgebra::{Point3, Vector3};

use crate::tracer::ray::Ray;
use crate::tracer::scene::{Material, Sphere};

// 출발점에서 자기 자신과 다시 부딪히는 걸 막기 위한 최소 t
pub const BIAS: f32 = 1e-7;
// 아직 아무것도 안 맞았을 때의 t
pub const NO_HIT: f32 = 1e30;

// 노멀은 정규화하지 않은 상태(교점 - 중심)로 넘김. 정규화는 쉐이딩 쪽에서.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitInfo {
    pub t: f32,
    pub position: Point3<f32>,
    pub normal: Vector3<f32>,
    pub material: Material,
}

/// 모든 구와 빔의 교차를 검사해서 가장 가까운 교점을 돌려줌.
///
/// t가 같으면 목록에서 먼저 나온 구가 이김.
pub fn intersect_ray(ray: &Ray, spheres: &[Sphere]) -> Option<HitInfo> {
    let mut closest: Option<(&Sphere, f32)> = None;
    let mut best = NO_HIT;

    for sphere in spheres {
        let Some(t) = sphere.near_root(&ray.origin, &ray.direction) else {
            continue;
        };

        if t > BIAS && t < best {
            best = t;
            closest = Some((sphere, t));
        }
    }

    closest.map(|(sphere, t)| {
        let position = ray.at(t);
        HitInfo {
            t,
            position,
            normal: position - sphere.center,
            material: sphere.material,
        }
    })
}

/// 그림자 검사. 아무 구나 하나라도 BIAS 너머에서 맞으면 바로 true.
///
/// 조명까지의 거리로 t를 자르지 않기 때문에 조명 뒤에 있는 구도 그림자를 만듦.
pub fn intersect_any(origin: &Point3<f32>, direction: &Vector3<f32>, spheres: &[Sphere]) -> bool {
    spheres.iter().any(|sphere| {
        sphere
            .near_root(origin, direction)
            .is_some_and(|t| t > BIAS)
    })
}
