pub mod tile_bands;
