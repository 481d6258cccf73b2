pub mod ai;
pub mod firing;
pub mod movement;
pub mod targeting;
