//! Services orchestrating the planning core and the repository ports.

pub mod build;
