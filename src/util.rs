use nalgebra::{Vector2, Vector3};
use rand::distributions::uniform::{SampleRange, SampleUniform};
use rand::{thread_rng, Rng};
use std::ops::RangeBounds;

pub fn random_vec<T: SampleUniform, R: RangeBounds<T> + SampleRange<T> + Clone>(
    range: R,
) -> Vector3<T> {
    let mut rng = thread_rng();
    Vector3::new(
        rng.gen_range(range.clone()),
        rng.gen_range(range.clone()),
        rng.gen_range(range),
    )
}

// 픽셀 안의 임의 위치. 각 성분은 [0, 1)
pub fn pixel_jitter() -> Vector2<f32> {
    let mut rng = thread_rng();
    Vector2::new(rng.gen(), rng.gen())
}
