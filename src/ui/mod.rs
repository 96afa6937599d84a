//! UI controller module
//!
//! Maps stopwatch state to what the page shows and routes user input back
//! to stopwatch actions.

pub mod controller;
pub mod view;

pub use controller::{Action, Controls, Key, MainButton, SecondaryButton};
pub use view::{LapLine, StopwatchView};
