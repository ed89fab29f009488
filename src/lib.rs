//! Numeric readouts for an 8x12 LED matrix.
//!
//! A measurement is rasterized with a 3x5 digit font into a [`Frame`], which
//! a [`MatrixDriver`](hardware::traits::MatrixDriver) puts on the LEDs.

#![cfg_attr(not(test), no_std)]

pub mod font;
pub mod frame;
pub mod hardware;
pub mod rasterizer;
pub mod sensor;

pub use frame::Frame;
pub use rasterizer::{Layout, Rasterizer, Readout, render_value};
