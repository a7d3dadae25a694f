use nalgebra::Vector3;
use rayon::prelude::*;

// 시뮬레이션 상자는 각 축으로 [-1, 1]
pub const BOX_HALF_EXTENT: f32 = 1.0;

// y, x, z 순서로 검사
const AXIS_PRIORITY: [usize; 3] = [1, 0, 2];

/// 상자를 벗어난 입자를 안으로 되돌림.
///
/// 입자마다 처음 발견된 축 하나만 처리함. 두 축을 동시에 벗어나면
/// 나머지 축은 다음 틱에서 처리됨.
pub fn resolve_collisions(
    positions: &mut [Vector3<f32>],
    velocities: &mut [Vector3<f32>],
    restitution: f32,
) {
    debug_assert_eq!(positions.len(), velocities.len());

    positions
        .par_iter_mut()
        .zip(velocities.par_iter_mut())
        .for_each(|(position, velocity)| bounce(position, velocity, restitution));
}

fn bounce(position: &mut Vector3<f32>, velocity: &mut Vector3<f32>, restitution: f32) {
    for axis in AXIS_PRIORITY {
        let bound = if position[axis] < -BOX_HALF_EXTENT {
            -BOX_HALF_EXTENT
        } else if position[axis] > BOX_HALF_EXTENT {
            BOX_HALF_EXTENT
        } else {
            continue;
        };

        position[axis] += restitution * (bound - position[axis]);
        velocity[axis] *= -restitution;
        return;
    }
}
