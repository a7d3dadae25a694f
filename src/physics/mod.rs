use nalgebra::Vector3;

use crate::error::{Error, Result};
use crate::physics::collision::resolve_collisions;
use crate::physics::integrate::integrate;
use crate::physics::spring::{spring_forces, Spring};

pub mod cloth;
pub mod collision;
pub mod integrate;
pub mod spring;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimParams {
    pub stiffness: f32,
    pub damping: f32,
    pub particle_mass: f32,
    pub gravity: Vector3<f32>,
    // 벽에 부딪혔을 때 되돌리는 비율 (0..=1)
    pub restitution: f32,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            stiffness: 50.0,
            damping: 1.0,
            particle_mass: 0.1,
            gravity: Vector3::new(0.0, -9.8, 0.0),
            restitution: 0.8,
        }
    }
}

impl SimParams {
    /// 커맨드 라인 등 밖에서 받은 값을 계산에 넘기기 전에 확인.
    pub fn validate(&self) -> Result<()> {
        require("stiffness", self.stiffness, |_| true)?;
        require("damping", self.damping, |_| true)?;
        require("particle mass", self.particle_mass, |mass| mass > 0.0)?;
        for &component in self.gravity.iter() {
            require("gravity", component, |_| true)?;
        }
        require("restitution", self.restitution, |r| (0.0..=1.0).contains(&r))
    }
}

// 시간 간격은 0 이상의 유한한 값
pub fn check_time_step(dt: f32) -> Result<()> {
    require("time step", dt, |dt| dt >= 0.0)
}

fn require(name: &'static str, value: f32, valid: impl Fn(f32) -> bool) -> Result<()> {
    if value.is_finite() && valid(value) {
        Ok(())
    } else {
        Err(Error::InvalidParameter { name, value })
    }
}

/// 한 틱 진행. 스프링 힘 → 적분 → 충돌 순서로, 앞 단계가 끝나야 다음 단계가 시작됨.
pub fn sim_time_step(
    dt: f32,
    positions: &mut [Vector3<f32>],
    velocities: &mut [Vector3<f32>],
    springs: &[Spring],
    params: &SimParams,
) {
    debug_assert!(dt.is_finite() && dt >= 0.0, "time step must be finite");
    debug_assert_eq!(positions.len(), velocities.len());

    let forces = spring_forces(
        positions,
        velocities,
        springs,
        params.stiffness,
        params.damping,
    );

    integrate(
        dt,
        positions,
        velocities,
        &forces,
        params.particle_mass,
        &params.gravity,
    );

    resolve_collisions(positions, velocities, params.restitution);
}

/// 위치, 속도, 스프링을 한 번에 들고 있는 시뮬레이션 상태.
///
/// 입자 수와 스프링 구성은 만든 뒤로 바뀌지 않음.
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    positions: Vec<Vector3<f32>>,
    velocities: Vec<Vector3<f32>>,
    springs: Vec<Spring>,
    ticks: u64,
}

impl ParticleSystem {
    /// 모든 입자가 정지한 상태로 시작.
    pub fn new(positions: Vec<Vector3<f32>>, springs: Vec<Spring>) -> Result<Self> {
        let velocities = vec![Vector3::zeros(); positions.len()];
        Self::with_velocities(positions, velocities, springs)
    }

    pub fn with_velocities(
        positions: Vec<Vector3<f32>>,
        velocities: Vec<Vector3<f32>>,
        springs: Vec<Spring>,
    ) -> Result<Self> {
        if positions.len() != velocities.len() {
            return Err(Error::StateLength {
                positions: positions.len(),
                velocities: velocities.len(),
            });
        }

        let count = positions.len();
        for (index, spring) in springs.iter().enumerate() {
            if let Some(&particle) = [spring.p0, spring.p1].iter().find(|&&p| p >= count) {
                return Err(Error::SpringIndex {
                    spring: index,
                    particle,
                    count,
                });
            }
            if !(spring.rest > 0.0) {
                return Err(Error::RestLength {
                    spring: index,
                    rest: spring.rest,
                });
            }
        }

        Ok(Self {
            positions,
            velocities,
            springs,
            ticks: 0,
        })
    }

    pub fn step(&mut self, dt: f32, params: &SimParams) {
        sim_time_step(
            dt,
            &mut self.positions,
            &mut self.velocities,
            &self.springs,
            params,
        );
        self.ticks += 1;
    }

    pub fn positions(&self) -> &[Vector3<f32>] {
        &self.positions
    }

    pub fn velocities(&self) -> &[Vector3<f32>] {
        &self.velocities
    }

    pub fn springs(&self) -> &[Spring] {
        &self.springs
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn kinetic_energy(&self, particle_mass: f32) -> f32 {
        self.velocities
            .iter()
            .map(|velocity| 0.5 * particle_mass * velocity.magnitude_squared())
            .sum()
    }

    // (최소, 최대) 좌표
    pub fn bounds(&self) -> Option<(Vector3<f32>, Vector3<f32>)> {
        let first = *self.positions.first()?;
        Some(self.positions.iter().fold((first, first), |(min, max), position| {
            (min.inf(position), max.sup(position))
        }))
    }
}
