use std::{fmt, fs, path::Path, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PlotError;

/// Top-level Google Benchmark report, as emitted with `--benchmark_format=json`
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkReport {
    pub context: Option<ReportContext>,
    #[serde(default)]
    pub benchmarks: Vec<BenchmarkRecord>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportContext {
    pub date: Option<String>,
    pub host_name: Option<String>,
    pub executable: Option<String>,
    pub num_cpus: Option<u32>,
    pub mhz_per_cpu: Option<f64>,
    pub cpu_scaling_enabled: Option<bool>,
    pub library_build_type: Option<String>,
}

/// One measured case
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRecord {
    pub name: String,
    pub run_name: Option<String>,
    pub run_type: Option<String>,
    pub iterations: Option<u64>,
    pub real_time: Option<f64>,
    pub cpu_time: Option<f64>,
    pub time_unit: Option<String>,
}

impl BenchmarkRecord {
    pub fn metric(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::RealTime => self.real_time,
            Metric::CpuTime => self.cpu_time,
        }
    }
}

/// The timing field selected for plotting
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    #[default]
    RealTime,
    CpuTime,
}

impl Metric {
    pub fn field_name(self) -> &'static str {
        match self {
            Metric::RealTime => "real_time",
            Metric::CpuTime => "cpu_time",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "real_time" => Ok(Metric::RealTime),
            "cpu_time" => Ok(Metric::CpuTime),
            other => Err(format!(
                "unknown metric {other:?}, expected real_time or cpu_time"
            )),
        }
    }
}

/// Read and deserialize a report. An absent `benchmarks` key is treated the
/// same as an empty one.
pub fn read_report(path: &Path) -> Result<BenchmarkReport, PlotError> {
    let raw = fs::read_to_string(path).map_err(|source| PlotError::File {
        path: path.to_path_buf(),
        source,
    })?;
    let report: BenchmarkReport =
        serde_json::from_str(&raw).map_err(|source| PlotError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    if report.benchmarks.is_empty() {
        return Err(PlotError::EmptyInput);
    }
    if let Some(context) = &report.context {
        debug!(
            "Report from {} on {}",
            context.executable.as_deref().unwrap_or("<unknown>"),
            context.host_name.as_deref().unwrap_or("<unknown>")
        );
    }
    debug!(
        "Loaded {} benchmark entries from {}",
        report.benchmarks.len(),
        path.display()
    );
    Ok(report)
}
