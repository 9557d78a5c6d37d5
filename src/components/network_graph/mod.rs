mod component;
mod layout;
mod network;
mod render;
mod state;
mod style;
mod surface;
mod types;

pub use component::NetworkGraphCanvas;
pub use network::NetworkStats;
pub use types::{GraphData, GraphEdge, GraphNode};
