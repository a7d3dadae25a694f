use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[clap(
    name = "glimmer",
    about = "Recursive sphere ray tracer and mass-spring particle simulator"
)]
pub struct CliArguments {
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// 데모 장면을 그려서 이미지로 저장
    Render(RenderArguments),
    /// 천 시뮬레이션을 돌림
    Simulate(SimulateArguments),
}

#[derive(Args, Debug)]
pub struct RenderArguments {
    #[clap(long, default_value = "640")]
    pub width: u32,

    #[clap(long, default_value = "480")]
    pub height: u32,

    #[clap(short = 's', long, default_value = "1")]
    pub samples: u32,

    #[clap(short = 'b', long, default_value = "4")]
    pub bounces: usize,

    #[clap(short = 'o', long, default_value = "render.png")]
    pub output: PathBuf,

    /// equirectangular png/jpeg. 없으면 기본 하늘색 그라데이션
    #[clap(long)]
    pub environment: Option<PathBuf>,

    #[clap(long, action)]
    pub transparent: bool,
}

#[derive(Args, Debug)]
pub struct SimulateArguments {
    /// 천 한 변의 격자 칸 수
    #[clap(long, default_value = "12")]
    pub resolution: usize,

    #[clap(long, default_value = "600")]
    pub steps: usize,

    #[clap(long, default_value = "0.005")]
    pub dt: f32,

    #[clap(long, default_value = "50.0")]
    pub stiffness: f32,

    #[clap(long, default_value = "1.0")]
    pub damping: f32,

    #[clap(long, default_value = "0.1")]
    pub mass: f32,

    /// 아래 방향 중력 크기
    #[clap(long, default_value = "9.8")]
    pub gravity: f32,

    #[clap(long, default_value = "0.8")]
    pub restitution: f32,

    /// 마지막 상태의 입자들을 작은 구로 그려서 저장
    #[clap(long)]
    pub render: Option<PathBuf>,
}
