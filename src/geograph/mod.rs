pub mod chain;
pub mod graph_index;
pub mod primitives;
pub mod side;
pub mod utils;
