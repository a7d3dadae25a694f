use nalgebra::Vector3;
use rayon::prelude::*;

/// Semi-implicit Euler.
///
/// 중력(g * m)을 더한 힘으로 속도를 먼저 갱신하고, 갱신된 속도로 위치를 옮김.
pub fn integrate(
    dt: f32,
    positions: &mut [Vector3<f32>],
    velocities: &mut [Vector3<f32>],
    forces: &[Vector3<f32>],
    particle_mass: f32,
    gravity: &Vector3<f32>,
) {
    debug_assert!(particle_mass > 0.0, "particle mass must be positive");
    debug_assert_eq!(positions.len(), velocities.len());
    debug_assert_eq!(positions.len(), forces.len());

    let weight = gravity * particle_mass;

    positions
        .par_iter_mut()
        .zip(velocities.par_iter_mut())
        .zip(forces.par_iter())
        .for_each(|((position, velocity), force)| {
            let acceleration = (force + weight) / particle_mass;
            *velocity += acceleration * dt;
            *position += *velocity * dt;
        });
}
