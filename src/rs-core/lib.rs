use wasm_bindgen::prelude::*;

mod bindings;
pub mod config;
pub mod context;
pub mod controller;
pub mod executor;
pub mod page;
pub mod rate_controller;
pub mod resolver;
pub mod runtime;
pub mod shortcuts;
pub mod snackbar;
mod utils;
pub mod video_registry;
pub mod watcher;

pub use utils::logger::Logger;
