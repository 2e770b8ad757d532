//! Demo of a draggable box that springs back to the center of the window.

#![warn(rust_2018_idioms)]
#![warn(clippy::all)]
#![deny(clippy::correctness)]

use simple_logger::SimpleLogger;

mod gui;
mod render;

const TITLE: &str = "Recoverable Draggable";

fn main() {
    SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .env()
        .init()
        .expect("Failed to initialize logger");

    gui::show_gui();
}
