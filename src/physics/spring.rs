use nalgebra::Vector3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    pub p0: usize,
    pub p1: usize,
    // 늘어나지도 줄어들지도 않은 길이
    pub rest: f32,
}

impl Spring {
    pub fn new(p0: usize, p1: usize, rest: f32) -> Self {
        Self { p0, p1, rest }
    }

    /// p0에 작용하는 힘 (탄성 + 감쇠). p1에는 이 값의 부호를 뒤집어서 더함.
    pub fn force(
        &self,
        positions: &[Vector3<f32>],
        velocities: &[Vector3<f32>],
        stiffness: f32,
        damping: f32,
    ) -> Vector3<f32> {
        let stretch = positions[self.p1] - positions[self.p0];
        let length = stretch.magnitude();
        debug_assert!(length > 0.0, "spring endpoints coincide");

        let direction = stretch / length;

        let spring = direction * (stiffness * (length - self.rest));

        let closing = (velocities[self.p1] - velocities[self.p0]).dot(&direction);
        let damper = direction * (damping * closing);

        spring + damper
    }
}

/// 틱 시작 시점의 위치/속도만 읽어서 입자별 스프링 힘을 모음.
pub fn spring_forces(
    positions: &[Vector3<f32>],
    velocities: &[Vector3<f32>],
    springs: &[Spring],
    stiffness: f32,
    damping: f32,
) -> Vec<Vector3<f32>> {
    let mut forces = vec![Vector3::zeros(); positions.len()];

    for spring in springs {
        let force = spring.force(positions, velocities, stiffness, damping);
        forces[spring.p0] += force;
        forces[spring.p1] -= force;
    }

    forces
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn stretched_spring_pulls_endpoints_together() {
        let positions = [Vector3::zeros(), Vector3::new(2.0, 0.0, 0.0)];
        let velocities = [Vector3::zeros(); 2];
        let springs = [Spring::new(0, 1, 1.0)];

        let forces = spring_forces(&positions, &velocities, &springs, 3.0, 0.0);
        assert_relative_eq!(forces[0], Vector3::new(3.0, 0.0, 0.0));
        assert_relative_eq!(forces[1], Vector3::new(-3.0, 0.0, 0.0));
    }

    #[test]
    fn compressed_spring_pushes_endpoints_apart() {
        let positions = [Vector3::zeros(), Vector3::new(0.0, 0.5, 0.0)];
        let velocities = [Vector3::zeros(); 2];
        let springs = [Spring::new(0, 1, 1.0)];

        let forces = spring_forces(&positions, &velocities, &springs, 2.0, 0.0);
        assert_relative_eq!(forces[0], Vector3::new(0.0, -1.0, 0.0));
    }

    #[test]
    fn damping_resists_separation() {
        let positions = [Vector3::zeros(), Vector3::new(1.0, 0.0, 0.0)];
        let velocities = [Vector3::zeros(), Vector3::new(2.0, 5.0, 0.0)];
        let springs = [Spring::new(0, 1, 1.0)];

        // 스프링 방향 성분(2.0)만 감쇠에 들어감
        let forces = spring_forces(&positions, &velocities, &springs, 10.0, 0.5);
        assert_relative_eq!(forces[0], Vector3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(forces[1], Vector3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn force_is_antisymmetric() {
        let positions = [
            Vector3::new(0.1, -0.3, 0.2),
            Vector3::new(0.7, 0.4, -0.5),
        ];
        let velocities = [Vector3::new(1.0, 0.0, -2.0), Vector3::new(-0.5, 3.0, 0.25)];

        for (stiffness, damping, rest) in [(1.0, 0.0, 0.5), (50.0, 2.0, 1.5), (0.0, 7.0, 0.1)] {
            let springs = [Spring::new(0, 1, rest)];
            let forces = spring_forces(&positions, &velocities, &springs, stiffness, damping);
            assert_eq!(forces[0], -forces[1]);
        }
    }

    #[test]
    fn shared_particle_sums_contributions() {
        let positions = [
            Vector3::new(-1.0, 0.0, 0.0),
            Vector3::zeros(),
            Vector3::new(0.0, 2.0, 0.0),
        ];
        let velocities = [Vector3::zeros(); 3];
        let springs = [Spring::new(1, 0, 0.5), Spring::new(1, 2, 1.0)];

        let forces = spring_forces(&positions, &velocities, &springs, 1.0, 0.0);
        assert_relative_eq!(forces[1], Vector3::new(-0.5, 1.0, 0.0));
        assert_relative_eq!(forces[0], Vector3::new(0.5, 0.0, 0.0));
        assert_relative_eq!(forces[2], Vector3::new(0.0, -1.0, 0.0));
    }

    #[test]
    fn particles_without_springs_get_zero() {
        let positions = [Vector3::zeros(), Vector3::new(1.0, 0.0, 0.0), Vector3::new(5.0, 5.0, 5.0)];
        let velocities = [Vector3::zeros(); 3];
        let springs = [Spring::new(0, 1, 1.0)];

        let forces = spring_forces(&positions, &velocities, &springs, 4.0, 1.0);
        assert_eq!(forces[2], Vector3::zeros());
    }
}
