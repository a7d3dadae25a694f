use std::collections::HashSet;

use nalgebra::Vector3;

use crate::physics::spring::Spring;

/// 삼각형 메쉬의 모서리마다 스프링 하나씩. 길이는 지금 모서리 길이를 그대로 씀.
///
/// 같은 모서리를 공유하는 삼각형이 있어도 스프링은 한 번만 만들고,
/// 처음 나온 순서대로 돌려줌.
pub fn springs_from_triangles(positions: &[Vector3<f32>], triangles: &[[usize; 3]]) -> Vec<Spring> {
    let mut seen = HashSet::new();
    let mut springs = Vec::new();

    for &[a, b, c] in triangles {
        for (p0, p1) in [(a, b), (b, c), (c, a)] {
            let key = (p0.min(p1), p0.max(p1));
            if p0 == p1 || !seen.insert(key) {
                continue;
            }

            let rest = (positions[p1] - positions[p0]).magnitude();
            springs.push(Spring::new(p0, p1, rest));
        }
    }

    springs
}

/// 높이 `height`에 떠 있는 한 변 `size`짜리 정사각형 천.
///
/// 격자 한 칸을 대각선으로 나눠서 삼각형 두 개를 만듦.
pub fn grid(resolution: usize, size: f32, height: f32) -> (Vec<Vector3<f32>>, Vec<[usize; 3]>) {
    let resolution = resolution.max(1);
    let side = resolution + 1;
    let step = size / resolution as f32;
    let offset = size / 2.0;

    let positions = (0..side * side)
        .map(|index| {
            let row = index / side;
            let column = index % side;
            Vector3::new(
                column as f32 * step - offset,
                height,
                row as f32 * step - offset,
            )
        })
        .collect();

    let mut triangles = Vec::with_capacity(resolution * resolution * 2);
    for row in 0..resolution {
        for column in 0..resolution {
            let top_left = row * side + column;
            let top_right = top_left + 1;
            let bottom_left = top_left + side;
            let bottom_right = bottom_left + 1;

            triangles.push([top_left, bottom_left, top_right]);
            triangles.push([top_right, bottom_left, bottom_right]);
        }
    }

    (positions, triangles)
}
