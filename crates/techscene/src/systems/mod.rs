pub mod animation;
pub mod info_panel;
pub mod interaction;
pub mod particles;
pub mod picking;
