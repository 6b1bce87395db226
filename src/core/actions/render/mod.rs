pub mod fill_tiles;
pub mod ports;
pub mod render_direct;
