//! Exporter config loader (strict parsing).

use serde::Deserialize;

use spanmetrics_core::error::{Result, SpanMetricsError};
use spanmetrics_core::name;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExporterConfig {
    pub version: u32,

    #[serde(default)]
    pub exporter: ExporterSection,
}

impl ExporterConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(SpanMetricsError::UnsupportedVersion);
        }
        self.exporter.validate()?;
        Ok(())
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ExporterSection {
    /// Metric name prefix; empty disables prefixing.
    #[serde(default)]
    pub namespace: String,
}

impl ExporterSection {
    pub fn validate(&self) -> Result<()> {
        if !name::is_valid_namespace(&self.namespace) {
            return Err(SpanMetricsError::BadConfig(format!(
                "exporter.namespace must match [A-Za-z][A-Za-z0-9_]*, got {:?}",
                self.namespace
            )));
        }
        Ok(())
    }
}

pub fn load_from_file(path: &str) -> Result<ExporterConfig> {
    let s = std::fs::read_to_string(path)
        .map_err(|e| SpanMetricsError::BadConfig(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ExporterConfig> {
    let cfg: ExporterConfig = serde_yaml::from_str(s)
        .map_err(|e| SpanMetricsError::BadConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
