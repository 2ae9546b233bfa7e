use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::params::CompareParams;
use crate::core::processing::pipeline::{Comparison, SideReport};
use crate::error::Result;

/// JSON sidecar describing how a comparison image was produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub created_at: DateTime<Utc>,
    pub output: Option<PathBuf>,
    pub output_size: (usize, usize),
    pub params: CompareParams,
    pub left: SideReport,
    pub right: SideReport,
}

impl ComparisonReport {
    pub fn new(comparison: &Comparison, params: &CompareParams, output: Option<&Path>) -> Self {
        Self {
            created_at: Utc::now(),
            output: output.map(Path::to_path_buf),
            output_size: comparison.image.dimensions(),
            params: params.clone(),
            left: comparison.left.clone(),
            right: comparison.right.clone(),
        }
    }
}

pub fn write_report_sidecar(path: &Path, report: &ComparisonReport) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, report)?;
    writer.flush()?;
    info!("Report written to {:?}", path);
    Ok(())
}

pub fn read_report_sidecar(path: &Path) -> Result<ComparisonReport> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}
