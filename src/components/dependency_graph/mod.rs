mod component;
mod drag;
mod filter;
mod frame_loop;
mod loader;
mod render;
mod simulation;
mod state;
mod style;
mod types;

pub use component::DependencyGraphView;
