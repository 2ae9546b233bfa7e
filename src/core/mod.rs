//! Core processing building blocks: the RGBA raster model, background estimation,
//! foreground location, cropping, height scaling, bottom-aligned compositing and the
//! two-image pipeline. These are the primitives consumed by the high-level `api` module.
pub mod params;
pub mod processing;
pub mod raster;
