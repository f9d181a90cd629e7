// Domain layer: byte sequences, comparison reports, bitmaps, and the ports the core drives.

pub mod bitmap;
pub mod model;
pub mod ports;
