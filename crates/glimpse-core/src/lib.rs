pub mod asset;
pub mod compose;
pub mod config;
pub mod consts;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod io;
pub mod pipeline;
pub mod remap;
pub mod render;
pub mod score;
pub mod scorespace;
pub mod split;
