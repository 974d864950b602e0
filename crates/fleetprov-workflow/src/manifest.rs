//! Provisioning manifest generation.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use fleetprov_core::{DeviceIdentity, Result};
use serde::Serialize;
use tracing::info;

/// Builds newline-delimited provisioning manifests
#[derive(Debug, Clone)]
pub struct ManifestBuilder {
    prefix: String,
    type_name: String,
}

/// What a manifest build produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestSummary {
    /// Where the manifest was written
    pub path: PathBuf,

    /// Number of device records in the manifest
    pub devices: u64,

    /// Sequence number of the first device
    pub first_sequence: u64,
}

impl ManifestBuilder {
    /// A builder naming devices `{prefix}_{sequence}` of the given type
    #[must_use]
    pub fn new(prefix: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            type_name: type_name.into(),
        }
    }

    /// Write `count` device records to `path`, truncating prior content.
    ///
    /// Device names run `{prefix}_{start}` through
    /// `{prefix}_{start + count - 1}`, one compact JSON object per line.
    pub fn build(&self, path: &Path, start: u64, count: u64) -> Result<ManifestSummary> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);

        for sequence in start..start + count {
            let identity = DeviceIdentity::new(&self.prefix, &self.type_name, sequence);
            serde_json::to_writer(&mut writer, &identity)?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;

        info!(path = %path.display(), devices = count, "wrote provisioning manifest");
        Ok(ManifestSummary {
            path: path.to_path_buf(),
            devices: count,
            first_sequence: start,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_one_line_per_device_in_sequence_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("provisioning-data.json");

        let summary = ManifestBuilder::new("MOTO", "TRACKER")
            .build(&path, 0, 5)
            .unwrap();
        assert_eq!(summary.devices, 5);

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 5);

        for (index, line) in lines.iter().enumerate() {
            let identity: DeviceIdentity = serde_json::from_str(line).unwrap();
            assert_eq!(identity.name, format!("MOTO_{index}"));
            assert_eq!(identity.type_name, "TRACKER");
            assert_eq!(identity.sequence, index as u64);
        }
    }

    #[test]
    fn zero_count_yields_an_empty_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("provisioning-data.json");

        ManifestBuilder::new("MOTO", "TRACKER")
            .build(&path, 0, 0)
            .unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn rebuild_truncates_prior_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("provisioning-data.json");
        let builder = ManifestBuilder::new("MOTO", "TRACKER");

        builder.build(&path, 0, 5).unwrap();
        builder.build(&path, 0, 2).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
    }

    #[test]
    fn explicit_start_offsets_the_sequence() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("provisioning-data.json");

        let summary = ManifestBuilder::new("MOTO", "TRACKER")
            .build(&path, 10, 2)
            .unwrap();
        assert_eq!(summary.first_sequence, 10);

        let content = std::fs::read_to_string(&path).unwrap();
        let names: Vec<String> = content
            .lines()
            .map(|line| {
                serde_json::from_str::<DeviceIdentity>(line)
                    .unwrap()
                    .name
            })
            .collect();
        assert_eq!(names, vec!["MOTO_10", "MOTO_11"]);
    }
}
