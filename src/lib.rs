#![doc = r#"
SIZECOMPARE — side-by-side physical size comparison of two product photos.

Given two photos and the real-world height of each product, this crate isolates each
product from its backdrop, scales it so that its pixel height is proportional to its
physical height, pads the shorter one so both stand on a common floor, and places them
next to each other on a transparent canvas. It powers the SIZECOMPARE CLI and can be
embedded in your own Rust applications.

Stability
---------
The public library API is experimental in initial releases and may evolve.
Breaking changes can occur.

Add dependency
--------------
```toml
[dependencies]
sizecompare = "0.1"
```

Quick start: compare two files into a PNG
-----------------------------------------
```rust,no_run
use std::path::Path;
use sizecompare::{compare_files_to_path, CompareParams, SaveOptions};

fn main() -> sizecompare::Result<()> {
    let report = compare_files_to_path(
        Path::new("/photos/mug.jpg"),
        9.5,
        Path::new("/photos/bottle.png"),
        24.0,
        Path::new("/out/mug_vs_bottle.png"),
        &CompareParams::default(),
        &SaveOptions::default(),
    )?;
    println!("canvas {:?}", report.output_size);
    Ok(())
}
```

Compare in-memory rasters
-------------------------
```rust,no_run
use sizecompare::{load_raster, CompareParams, IsolationStrategy, Pipeline};

fn main() -> sizecompare::Result<()> {
    let left = load_raster("/photos/a.png".as_ref())?;
    let right = load_raster("/photos/b.png".as_ref())?;

    let params = CompareParams {
        bg_threshold: 12.0,
        isolation: IsolationStrategy::Otsu,
        pixels_per_unit: 10.0,
        parallel: true,
        ..CompareParams::default()
    };
    let comparison = Pipeline::new(params)?.compare(&left, 33.0, &right, 41.1)?;

    // `comparison.image` is the RGBA canvas; `left`/`right` describe each side.
    assert_eq!(comparison.image.height(), comparison.right.scaled_size.1);
    Ok(())
}
```

Custom isolation
----------------
Any [`BackgroundRemover`] can replace the built-in strategies:

```rust
use sizecompare::{BackgroundRemover, CompareParams, Isolation, Pipeline, Raster};

struct KeepEverything;

impl BackgroundRemover for KeepEverything {
    fn name(&self) -> &str {
        "keep-everything"
    }

    fn remove_background(&self, raster: &Raster) -> sizecompare::Result<Isolation> {
        Ok(Isolation {
            raster: raster.clone(),
            background: None,
            region: None,
            degenerate: false,
        })
    }
}

fn pipeline() -> sizecompare::Result<Pipeline> {
    Ok(Pipeline::new(CompareParams::default())?.with_remover(Box::new(KeepEverything)))
}
```

Error handling
--------------
All public functions return `sizecompare::Result<T>`; match on `sizecompare::Error` to
handle specific cases. Failures inside one side of a comparison are wrapped in
`Error::Side` so the caller knows which input was at fault.

```rust,no_run
use std::path::Path;
use sizecompare::{compare_files_to_buffer, CompareParams, Error};

fn main() {
    let params = CompareParams::default();
    match compare_files_to_buffer(Path::new("a.png"), 10.0, Path::new("b.png"), 20.0, &params) {
        Ok(c) => println!("{}x{}", c.image.width(), c.image.height()),
        Err(Error::Side { side, source }) => eprintln!("{side} image: {source}"),
        Err(other) => eprintln!("Other error: {other}"),
    }
}
```

Useful modules
--------------
- [`api`] — high-level, ergonomic entry points.
- [`core`] — rasters, parameters and the individual processing stages.
- [`types`] — enums shared across the crate (e.g. `IsolationStrategy`, `OutputFormat`).
- [`io`] — image decoding and PNG/JPEG/report writers.
- [`error`] — crate-level `Error` and `Result`.
"#]

pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

// Curated public API surface
// Types
pub use crate::core::params::CompareParams;
pub use crate::core::raster::{GrayscaleField, Raster, Rgba};
pub use error::{Error, Result};
pub use types::{IsolationStrategy, OutputFormat, ResizeFilter, Side};

// Processing
pub use crate::core::processing::foreground::{BoundingRegion, ForegroundRegion};
pub use crate::core::processing::isolate::{
    AlphaMatteRemover, BackgroundRemover, CornerSampleRemover, Isolation, OtsuRemover,
};
pub use crate::core::processing::pipeline::{
    Comparison, DebugStage, Pipeline, SideReport, compare,
};

// Readers and writers
pub use io::reader::{load_raster, load_raster_from_memory};
pub use io::writers::report::ComparisonReport;

// High-level API re-exports
pub use api::{
    SaveOptions, compare_files_to_buffer, compare_files_to_path, compare_rasters, save_comparison,
};
