//! I/O layer: decoding image files into RGBA rasters and `writers` for PNG/JPEG
//! outputs, debug stage dumps and JSON report sidecars.
pub mod reader;
pub use reader::{load_raster, load_raster_from_memory};

pub mod writers;
