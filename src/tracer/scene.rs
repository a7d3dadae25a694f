use nalgebra::{Point3, Vector3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub diffuse: Vector3<f32>,
    pub specular: Vector3<f32>,
    // Blinn 하이라이트 지수
    pub shininess: f32,
}

impl Material {
    pub fn new(diffuse: Vector3<f32>, specular: Vector3<f32>, shininess: f32) -> Self {
        Self {
            diffuse,
            specular,
            shininess,
        }
    }

    /// 반사 에너지가 남아있는지. 세 채널의 합이 0 이하면 더 이상 반사 광선을 쏘지 않음.
    pub fn is_reflective(&self) -> bool {
        self.specular.sum() > 0.0
    }
}

impl Default for Material {
    fn default() -> Self {
        Self {
            diffuse: Vector3::new(1.0, 1.0, 1.0),
            specular: Vector3::zeros(),
            shininess: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Point3<f32>,
    pub radius: f32,
    pub material: Material,
}

impl Sphere {
    pub fn new(center: Point3<f32>, radius: f32, material: Material) -> Self {
        debug_assert!(radius > 0.0, "sphere radius must be positive");
        Self {
            center,
            radius,
            material,
        }
    }

    // a = 빔 방향 길이 제곱
    // b = 2 * (빔 방향 · (빔 시작 - 중심))
    // c = |빔 시작 - 중심|^2 - r^2
    // 판별식이 음수면 None, 아니면 작은 근(가까운 교점)만 돌려줌.
    // 구 내부에서 출발한 빔은 작은 근이 음수가 되므로 결국 교차 없음으로 처리됨.
    pub fn near_root(&self, origin: &Point3<f32>, direction: &Vector3<f32>) -> Option<f32> {
        debug_assert!(
            direction.magnitude_squared() > 0.0,
            "ray direction must be non-zero"
        );

        let offset = origin - self.center;

        let a = direction.magnitude_squared();
        let b = 2.0 * direction.dot(&offset);
        let c = offset.magnitude_squared() - self.radius.powi(2);

        let discriminant = b.powi(2) - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        Some((-b - discriminant.sqrt()) / (2.0 * a))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: Point3<f32>,
    pub intensity: Vector3<f32>,
}

impl Light {
    pub fn new(position: Point3<f32>, intensity: Vector3<f32>) -> Self {
        Self {
            position,
            intensity,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub spheres: Vec<Sphere>,
    pub lights: Vec<Light>,
}

impl Scene {
    pub fn new(spheres: Vec<Sphere>, lights: Vec<Light>) -> Self {
        Self { spheres, lights }
    }

    /// 큰 바닥 구 위에 거울 구 하나, 색이 있는 구 둘, 조명 둘.
    pub fn demo() -> Self {
        let ground = Sphere::new(
            Point3::new(0.0, -1001.0, 0.0),
            1000.0,
            Material::new(
                Vector3::new(0.35, 0.35, 0.4),
                Vector3::new(0.1, 0.1, 0.1),
                20.0,
            ),
        );
        let mirror = Sphere::new(
            Point3::new(0.0, 0.0, 0.0),
            1.0,
            Material::new(
                Vector3::new(0.05, 0.05, 0.05),
                Vector3::new(0.9, 0.9, 0.9),
                200.0,
            ),
        );
        let red = Sphere::new(
            Point3::new(-2.2, -0.3, 0.8),
            0.7,
            Material::new(
                Vector3::new(0.8, 0.15, 0.1),
                Vector3::new(0.2, 0.2, 0.2),
                50.0,
            ),
        );
        let blue = Sphere::new(
            Point3::new(2.0, -0.4, 1.2),
            0.6,
            Material::new(
                Vector3::new(0.1, 0.2, 0.8),
                Vector3::new(0.4, 0.4, 0.4),
                80.0,
            ),
        );

        let lights = vec![
            Light::new(Point3::new(-4.0, 6.0, 5.0), Vector3::new(1.0, 1.0, 1.0)),
            Light::new(Point3::new(5.0, 4.0, -3.0), Vector3::new(0.8, 0.8, 0.9)),
        ];

        Self::new(vec![ground, mirror, red, blue], lights)
    }
}
