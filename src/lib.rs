/// DELVE Project
/// `File` lib.rs
/// `Description` Grid raycasting engine library module
/// `Author` TioT2
/// `Last changed` 14.10.2026

pub mod util;
pub mod math;
pub mod asset;
pub mod texture;
pub mod cell;
pub mod sprite;
pub mod level;
pub mod scheduler;
pub mod activator;
pub mod caster;
pub mod entity;
pub mod camera;
pub mod surface;
pub mod font;
pub mod render;
pub mod timer;
pub mod input;
pub mod config;
pub mod state;
pub mod data;

// file lib.rs
