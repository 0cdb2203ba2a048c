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

//! Assembly of Trust Indicator Sets in the JPEG Trust (ISO 21617-1)
//! document shape.

use serde_json::{json, Map, Value};

use crate::{
    assertions::project_assertions,
    identity::{encode_hashes, parse_distinguished_name, signing_alg_name},
    manifest_store::{Claim, HashedUri, Manifest, ManifestStore, SignatureInfo},
    metadata::{failure_diagnostic, normalize_tags, split_content, MetadataSource},
    status::StatusSummary,
    utils::{base64, hash},
    validation::ValidationResult,
};

/// Assembles Trust Indicator Set documents from validated manifest data
/// and raw asset bytes.
///
/// The assembler is pure with respect to its inputs aside from one
/// timestamp read inside the metadata-failure diagnostic path; it
/// performs no I/O.
pub struct IndicatorSetAssembler<'a> {
    metadata_source: &'a dyn MetadataSource,
}

impl<'a> IndicatorSetAssembler<'a> {
    pub fn new(metadata_source: &'a dyn MetadataSource) -> Self {
        Self { metadata_source }
    }

    /// Builds the indicator set document.
    ///
    /// `asset_info`, `metadata` and `content` are populated whenever file
    /// bytes are supplied, independent of manifest presence. A missing
    /// store (container parse failure) yields an empty `manifests` array;
    /// `extras:validation_status` is attached whenever a store exists, or
    /// when a degraded validation result is separately supplied.
    pub fn assemble(
        &self,
        store: Option<&ManifestStore>,
        validation: Option<&ValidationResult>,
        file_bytes: Option<&[u8]>,
    ) -> Value {
        let mut doc = json!({
            "@context": {
                "@vocab": "https://jpeg.org/jpegtrust",
                "extras": "https://jpeg.org/jpegtrust/extras"
            }
        });

        if let Some(bytes) = file_bytes {
            doc["asset_info"] = json!({
                "alg": "sha256",
                "hash": base64::encode(&hash::sha256(bytes))
            });
        }

        let (metadata, content) = self.extract_metadata(file_bytes);
        doc["metadata"] = Value::Object(metadata);
        doc["content"] = Value::Object(content);

        let mut manifests = Vec::new();
        if let Some(store) = store {
            for manifest in &store.manifests {
                manifests.push(build_manifest_indicator(manifest, validation));
            }
        }
        doc["manifests"] = Value::Array(manifests);

        if store.is_some() || validation.is_some() {
            doc["extras:validation_status"] = build_validation_summary(validation);
        }

        doc
    }

    fn extract_metadata(
        &self,
        file_bytes: Option<&[u8]>,
    ) -> (Map<String, Value>, Map<String, Value>) {
        let Some(bytes) = file_bytes else {
            return (Map::new(), Map::new());
        };

        match self.metadata_source.extract(bytes) {
            Ok(tags) => split_content(normalize_tags(&tags)),
            Err(err) => {
                log::debug!("metadata extraction failed: {err}");
                (
                    failure_diagnostic(self.metadata_source.name(), &err.to_string()),
                    Map::new(),
                )
            }
        }
    }
}

/// Builds one indicator entry for a manifest: label, projected
/// assertions, version-keyed claim view, signature view and classified
/// status block.
pub fn build_manifest_indicator(
    manifest: &Manifest,
    validation: Option<&ValidationResult>,
) -> Value {
    let mut indicator = Map::new();

    indicator.insert("label".to_string(), json!(manifest.label));
    indicator.insert(
        "assertions".to_string(),
        Value::Object(project_assertions(&manifest.assertions)),
    );

    // Claim version 1 emits under "claim.v2"; anything else (including a
    // missing version) emits under "claim". This mirrors the behavior of
    // existing indicator-set consumers; do not unify without confirming
    // against ISO 21617-1.
    let version = manifest.claim.as_ref().and_then(|c| c.version);
    let claim_key = if version == Some(1) { "claim.v2" } else { "claim" };
    let claim_view = manifest
        .claim
        .as_ref()
        .map(build_claim_view)
        .unwrap_or(Value::Null);
    indicator.insert(claim_key.to_string(), claim_view);

    indicator.insert(
        "claim_signature".to_string(),
        build_signature_view(manifest.signature.as_ref()),
    );

    let entries = validation.map(|v| v.to_representation()).unwrap_or(&[]);
    indicator.insert(
        "status".to_string(),
        json!(StatusSummary::from_entries(entries)),
    );

    Value::Object(indicator)
}

fn build_claim_view(claim: &Claim) -> Value {
    let mut view = Map::new();

    view.insert("dc:title".to_string(), json!(claim.title));
    view.insert("instanceID".to_string(), json!(claim.instance_id));
    if let Some(info) = &claim.claim_generator_info {
        view.insert(
            "claim_generator_info".to_string(),
            encode_hashes(info.clone()),
        );
    }
    view.insert("alg".to_string(), json!(claim.alg));
    view.insert(
        "created_assertions".to_string(),
        hashed_uri_refs(&claim.created_assertions),
    );
    view.insert(
        "gathered_assertions".to_string(),
        hashed_uri_refs(&claim.gathered_assertions),
    );
    view.insert(
        "redacted_assertions".to_string(),
        hashed_uri_refs(&claim.redacted_assertions),
    );

    Value::Object(view)
}

// Each HashedUri becomes {url, hash (base64), alg?}; alg is included
// only when non-null.
fn hashed_uri_refs(refs: &[HashedUri]) -> Value {
    let mut entries = Vec::new();

    for uri in refs {
        let mut entry = Map::new();
        entry.insert("url".to_string(), json!(uri.url));
        entry.insert(
            "hash".to_string(),
            Value::String(base64::encode(&uri.hash)),
        );
        if let Some(alg) = &uri.alg {
            entry.insert("alg".to_string(), json!(alg));
        }
        entries.push(Value::Object(entry));
    }

    Value::Array(entries)
}

fn build_signature_view(signature: Option<&SignatureInfo>) -> Value {
    let Some(signature) = signature else {
        return Value::Object(Map::new());
    };

    let mut view = Map::new();
    view.insert(
        "algorithm".to_string(),
        json!(signing_alg_name(signature.alg)),
    );
    view.insert("serial_number".to_string(), json!(signature.serial_number));
    view.insert(
        "issuer".to_string(),
        Value::Object(parse_distinguished_name(signature.issuer.as_deref())),
    );
    view.insert(
        "subject".to_string(),
        Value::Object(parse_distinguished_name(signature.subject.as_deref())),
    );
    view.insert(
        "validity".to_string(),
        json!({
            "not_before": signature.not_before,
            "not_after": signature.not_after
        }),
    );

    Value::Object(view)
}

// extras:validation_status: validity flag, top-level error, flattened
// validation-error strings and the full status-entry list.
fn build_validation_summary(validation: Option<&ValidationResult>) -> Value {
    match validation {
        Some(validation) => json!({
            "isValid": validation.is_valid,
            "error": validation.error,
            "validationErrors": validation.validation_errors,
            "entries": validation.status_entries
        }),
        None => json!({
            "isValid": Value::Null,
            "error": Value::Null,
            "validationErrors": [],
            "entries": []
        }),
    }
}
