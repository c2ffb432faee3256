//! Canvas 2D rendering module
//!
//! Immediate-mode drawing onto the game's `<canvas>`. The simulation issues
//! every draw call through the `Display` trait each frame.

pub mod canvas;

pub use canvas::CanvasRenderer;
