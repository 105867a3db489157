//! Session client: wires one connection, the phase controller and a renderer.

pub mod client;
pub mod connection;
pub mod render;

pub use client::SessionClient;
pub use connection::Connection;
pub use render::Renderer;
