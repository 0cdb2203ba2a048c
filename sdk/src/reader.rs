// Copyright 2024 Adobe. All rights reserved.
// This file is licensed to you under the Apache License,
// Version 2.0 (http://www.apache.org/licenses/LICENSE-2.0)
// or the MIT license (http://opensource.org/licenses/MIT),
// at your option.

// Unless required by applicable law or agreed to in writing,
// this software is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR REPRESENTATIONS OF ANY KIND, either express or
// implied. See the LICENSE-MIT and LICENSE-APACHE files for the
// specific language governing permissions and limitations under
// each license.

//! Per-file processing boundary.
//!
//! Detects the asset container format, hands the bytes to the external
//! manifest validator once, and renders either a flat per-manifest
//! summary or the full Trust Indicator Set. Unsupported formats
//! short-circuit with a structured marker; nothing in this module
//! panics or aborts a run.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::{
    identity::signing_alg_name,
    indicator_set::IndicatorSetAssembler,
    manifest_store::{Manifest, ManifestStore},
    metadata::MetadataSource,
    validation::ValidationResult,
    Error, Result,
};

/// Asset container formats recognized by the processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AssetFormat {
    #[serde(rename = "image/jpeg")]
    Jpeg,
    #[serde(rename = "image/png")]
    Png,
    #[serde(rename = "application/mp4")]
    Bmff,
}

impl AssetFormat {
    /// Identifies the container format from its magic bytes.
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Some(Self::Jpeg)
        } else if bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
            Some(Self::Png)
        } else if bytes.len() >= 12 && &bytes[4..8] == b"ftyp" {
            Some(Self::Bmff)
        } else {
            None
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Bmff => "application/mp4",
        }
    }
}

/// Whether a manifest container was found, and what became of it.
#[derive(Debug, Clone, Default)]
pub enum StoreOutcome {
    /// No manifest container exists in the asset.
    #[default]
    Absent,
    /// A container was found but could not be parsed.
    Failed,
    /// The container parsed into a manifest store.
    Present(ManifestStore),
}

/// Everything the external validator reports for one asset.
#[derive(Debug, Clone, Default)]
pub struct ValidationOutcome {
    pub store: StoreOutcome,
    pub validation: Option<ValidationResult>,
}

/// The manifest-validation collaborator.
///
/// Implementations locate the manifest container in the asset, parse it
/// and validate signatures and hash bindings. The processor calls
/// `validate` exactly once per asset.
pub trait ManifestValidator {
    fn validate(&self, format: AssetFormat, asset: &[u8]) -> Result<ValidationOutcome>;
}

/// A validator for assets known to carry no manifest container.
#[derive(Debug, Default)]
pub struct NoManifestValidator {}

impl ManifestValidator for NoManifestValidator {
    fn validate(&self, _format: AssetFormat, _asset: &[u8]) -> Result<ValidationOutcome> {
        Ok(ValidationOutcome::default())
    }
}

/// A [`ManifestValidator`] backed by a JSON report produced out-of-band
/// by the external validator.
///
/// The report shape is `{ "manifest_store": ..., "validation_result": ... }`.
/// A missing `manifest_store` key means no container was found; an
/// explicit `null` means the container was found but failed to parse.
#[derive(Debug, Default, Deserialize)]
pub struct JsonReportValidator {
    // Double Option: a missing key deserializes to None, an explicit
    // null to Some(None).
    #[serde(default, deserialize_with = "explicit_store")]
    manifest_store: Option<Option<ManifestStore>>,

    #[serde(default)]
    validation_result: Option<ValidationResult>,
}

fn explicit_store<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<Option<ManifestStore>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<ManifestStore>::deserialize(deserializer).map(Some)
}

impl JsonReportValidator {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::ReportDecoding(e.to_string()))
    }

    #[cfg(feature = "file_io")]
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }
}

impl ManifestValidator for JsonReportValidator {
    fn validate(&self, _format: AssetFormat, _asset: &[u8]) -> Result<ValidationOutcome> {
        let store = match &self.manifest_store {
            None => StoreOutcome::Absent,
            Some(None) => StoreOutcome::Failed,
            Some(Some(store)) => StoreOutcome::Present(store.clone()),
        };

        Ok(ValidationOutcome {
            store,
            validation: self.validation_result.clone(),
        })
    }
}

/// Output shape selection for [`ManifestProcessor::process`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportMode {
    /// Flat per-manifest summary: label, claim fields, signature fields
    /// and assertion labels, with no status classification.
    Summary,
    /// The full Trust Indicator Set document.
    IndicatorSet,
}

/// Per-file orchestrator over the validation and metadata collaborators.
pub struct ManifestProcessor<'a> {
    validator: &'a dyn ManifestValidator,
    metadata_source: &'a dyn MetadataSource,
}

impl<'a> ManifestProcessor<'a> {
    pub fn new(
        validator: &'a dyn ManifestValidator,
        metadata_source: &'a dyn MetadataSource,
    ) -> Self {
        Self {
            validator,
            metadata_source,
        }
    }

    /// Processes one asset end to end.
    ///
    /// Never fails: unsupported formats and validator errors degrade to
    /// structured output.
    pub fn process(&self, asset: &[u8], mode: ReportMode) -> Value {
        let Some(format) = AssetFormat::sniff(asset) else {
            log::warn!("unrecognized file format");
            return json!({
                "format": "unknown",
                "status": "unsupported format",
                "manifests": []
            });
        };

        let outcome = match self.validator.validate(format, asset) {
            Ok(outcome) => outcome,
            Err(err) => {
                log::warn!("manifest validation failed: {err}");
                ValidationOutcome {
                    store: StoreOutcome::Failed,
                    validation: Some(ValidationResult::from_parse_failure(err.to_string())),
                }
            }
        };

        match mode {
            ReportMode::Summary => summary_report(format, &outcome),
            ReportMode::IndicatorSet => {
                let assembler = IndicatorSetAssembler::new(self.metadata_source);
                let store = match &outcome.store {
                    StoreOutcome::Present(store) => Some(store),
                    _ => None,
                };
                assembler.assemble(store, outcome.validation.as_ref(), Some(asset))
            }
        }
    }
}

fn summary_report(format: AssetFormat, outcome: &ValidationOutcome) -> Value {
    let manifests = match &outcome.store {
        StoreOutcome::Present(store) => store.manifests.iter().map(manifest_summary).collect(),
        _ => Vec::new(),
    };

    let mut report = Map::new();
    report.insert("format".to_string(), json!(format.mime()));
    if matches!(outcome.store, StoreOutcome::Failed) {
        report.insert(
            "error".to_string(),
            json!(outcome
                .validation
                .as_ref()
                .and_then(|v| v.error.as_deref())),
        );
    }
    report.insert("manifests".to_string(), Value::Array(manifests));

    Value::Object(report)
}

fn manifest_summary(manifest: &Manifest) -> Value {
    let claim = manifest.claim.as_ref();
    let signature = manifest.signature.as_ref();

    json!({
        "label": manifest.label,
        "title": claim.and_then(|c| c.title.as_deref()),
        "instance_id": claim.and_then(|c| c.instance_id.as_deref()),
        "claim_version": claim.and_then(|c| c.version),
        "signature": {
            "algorithm": signing_alg_name(signature.and_then(|s| s.alg)),
            "issuer": signature.and_then(|s| s.issuer.as_deref()),
            "serial_number": signature.and_then(|s| s.serial_number.as_deref())
        },
        "assertions": manifest
            .assertions
            .iter()
            .map(|a| a.label().unwrap_or("unknown"))
            .collect::<Vec<_>>()
    })
}
