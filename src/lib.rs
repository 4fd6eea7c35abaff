#![allow(dead_code)]
#![warn(clippy::cargo)]
#![allow(clippy::comparison_chain)]
#![doc = include_str!("../README.md")]

pub mod config;
pub mod control;
pub mod density;
pub mod eig;
pub mod error;
pub mod evolver;
pub mod expand;
pub mod gates;
pub mod math;
pub mod partial_trace;
pub mod register;
pub mod state;
pub mod stats;

#[doc(hidden)]
pub mod prelude {
    pub use crate::{
        config::{config, set_config, NumericConfig},
        control::{ControlMask, Polarity},
        density::DensityMatrix,
        error::{CoreError, CoreResult},
        gates,
        math::matrix::Matrix,
        math::{C, N},
        register::Register,
        state::StateVector,
    };
}
