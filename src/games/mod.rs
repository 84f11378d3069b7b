//! Game implementations.

pub mod neon_bomb;
