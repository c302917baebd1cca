pub mod event;
pub mod hud;
pub mod reveal;
pub mod session;
pub mod timer;
