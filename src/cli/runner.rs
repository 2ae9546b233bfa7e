use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use sizecompare::api::{SaveOptions, compare_files_to_buffer, save_comparison};
use sizecompare::io::writers::png::write_debug_stages;
use sizecompare::io::writers::report::{ComparisonReport, write_report_sidecar};
use sizecompare::CompareParams;

use super::args::CliArgs;
use super::errors::AppError;

pub fn parse_hex_colour(value: &str) -> Result<[u8; 3], AppError> {
    let hex = value.strip_prefix('#').unwrap_or(value);
    let invalid = || AppError::InvalidColour {
        value: value.to_string(),
    };
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(invalid());
    }
    let mut rgb = [0u8; 3];
    for (i, slot) in rgb.iter_mut().enumerate() {
        *slot = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).map_err(|_| invalid())?;
    }
    Ok(rgb)
}

/// Config file first, then command-line overrides.
pub fn resolve_params(args: &CliArgs) -> Result<CompareParams, AppError> {
    let mut params = match &args.config {
        Some(path) => CompareParams::from_json_file(path)?,
        None => CompareParams::default(),
    };
    if let Some(threshold) = args.threshold {
        params.bg_threshold = threshold;
    }
    if let Some(isolation) = args.isolation {
        params.isolation = isolation;
    }
    if let Some(filter) = args.filter {
        params.filter = filter;
    }
    if let Some(ppu) = args.pixels_per_unit {
        params.pixels_per_unit = ppu;
    }
    params.align_opaque_bottom |= args.align_opaque_bottom;
    params.parallel |= args.parallel;
    params.debug |= args.debug_dir.is_some();
    params.validate()?;
    Ok(params)
}

fn init_logging(verbose: bool) {
    if verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .init();
    } else if let Ok(filter) = EnvFilter::try_from_default_env() {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    init_logging(args.log);

    let params = resolve_params(&args)?;
    if !(1..=100).contains(&args.quality) {
        return Err(AppError::InvalidQuality {
            quality: args.quality,
        }
        .into());
    }
    let options = SaveOptions {
        format: args.format,
        background: parse_hex_colour(&args.background)?,
        quality: args.quality,
    };

    info!(
        "Comparing {:?} ({}) with {:?} ({}) using {}",
        args.left, args.left_height, args.right, args.right_height, params.isolation
    );
    let comparison = compare_files_to_buffer(
        &args.left,
        args.left_height,
        &args.right,
        args.right_height,
        &params,
    )
    .map_err(AppError::from)?;

    for side in [&comparison.left, &comparison.right] {
        if side.degenerate {
            warn!(
                "No foreground found in the {} image; it was used uncropped",
                side.side
            );
        }
    }

    save_comparison(&comparison, &args.output, &options).map_err(AppError::from)?;

    if let Some(dir) = &args.debug_dir {
        write_debug_stages(dir, &comparison.stages).map_err(AppError::from)?;
    }
    if let Some(path) = &args.report {
        let report = ComparisonReport::new(&comparison, &params, Some(&args.output));
        write_report_sidecar(path, &report).map_err(AppError::from)?;
    }

    info!(
        "Successfully compared: {:?} + {:?} -> {:?} ({}x{})\n",
        args.left,
        args.right,
        args.output,
        comparison.image.width(),
        comparison.image.height()
    );
    Ok(())
}
