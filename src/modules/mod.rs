pub mod adapter;
pub mod block;
pub mod capability;
pub mod color;
pub mod config;
pub mod direction;
pub mod error;
pub mod network;
pub mod scene;
pub mod topology;
pub mod world;
