//! egui frontend for the building space viewer.

mod app;
mod viewport;
mod viewport_state;

pub use app::{AppError, SpaceViewApp};
