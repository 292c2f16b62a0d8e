pub mod motion;
pub mod object;
