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

//! End-to-end indicator-set generation from a collaborator report.

use serde_json::{json, Value};
use trust_indicators::{
    JsonReportValidator, ManifestProcessor, MetadataSource, ReportMode, Result, Tag, TagMap,
};

struct FixtureMetadata {}

impl MetadataSource for FixtureMetadata {
    fn name(&self) -> &str {
        "exifreader"
    }

    fn extract(&self, _asset: &[u8]) -> Result<TagMap> {
        let mut tags = TagMap::new();
        tags.insert("Image Width".to_string(), Tag::new(640));
        tags.insert("Image Height".to_string(), Tag::new(480));
        tags.insert("Bit Depth".to_string(), Tag::new(8));
        tags.insert("File Type".to_string(), Tag::new("image/jpeg"));
        tags.insert("Make".to_string(), Tag::new("Example Camera"));
        tags.insert("Artist".to_string(), Tag::new(""));
        Ok(tags)
    }
}

const JPEG_ASSET: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46];

fn fixture_report() -> String {
    json!({
        "manifest_store": {
            "manifests": [{
                "label": "urn:uuid:f97a8bc1",
                "claim": {
                    "version": 2,
                    "dc:title": "sunset.jpg",
                    "instance_id": "xmp:iid:5f8a",
                    "alg": "sha256",
                    "created_assertions": [
                        {
                            "url": "self#jumbf=c2pa.assertions/c2pa.actions.v2",
                            "alg": "sha256",
                            "hash": [1, 2, 3, 4]
                        }
                    ]
                },
                "signature": {
                    "alg": -7,
                    "serial_number": "0badc0de",
                    "issuer": "C=US, O=Example CA, CN=Example Root",
                    "subject": "O=Example Corp, CN=Example Signer",
                    "not_before": "2024-01-01T00:00:00Z",
                    "not_after": "2026-01-01T00:00:00Z"
                },
                "assertions": [{
                    "label": "c2pa.actions.v2",
                    "uuid": "1b7e33a2",
                    "content_type": "cbor",
                    "data": { "actions": [{ "action": "c2pa.created" }] }
                }]
            }]
        },
        "validation_result": {
            "isValid": false,
            "error": "data hash mismatch",
            "validationErrors": ["assertion.dataHash.mismatch"],
            "statusEntries": [
                {
                    "code": "claimSignature.validated",
                    "url": "self#jumbf=/c2pa/urn:uuid:f97a8bc1/c2pa.signature",
                    "severity": "info"
                },
                {
                    "code": "signingCredential.trusted",
                    "severity": "info"
                },
                {
                    "code": "assertion.dataHash.mismatch",
                    "url": "self#jumbf=/c2pa/urn:uuid:f97a8bc1/c2pa.assertions/c2pa.actions.v2",
                    "message": "hash does not match",
                    "severity": "error"
                }
            ]
        }
    })
    .to_string()
}

fn generate(mode: ReportMode) -> Value {
    let validator = JsonReportValidator::from_json(&fixture_report()).unwrap();
    let metadata = FixtureMetadata {};
    ManifestProcessor::new(&validator, &metadata).process(JPEG_ASSET, mode)
}

#[test]
fn document_shape() {
    let doc = generate(ReportMode::IndicatorSet);

    assert_eq!(doc["@context"]["@vocab"], "https://jpeg.org/jpegtrust");
    assert_eq!(doc["@context"]["extras"], "https://jpeg.org/jpegtrust/extras");
    assert_eq!(doc["asset_info"]["alg"], "sha256");
    assert!(doc["asset_info"]["hash"].is_string());
    assert!(doc["manifests"].is_array());
}

#[test]
fn metadata_and_content_buckets() {
    let doc = generate(ReportMode::IndicatorSet);

    assert_eq!(doc["content"]["imageWidth"], 640);
    assert_eq!(doc["content"]["imageHeight"], 480);
    assert_eq!(doc["content"]["bitDepth"], 8);
    assert_eq!(doc["content"]["fileType"], "image/jpeg");

    assert_eq!(doc["metadata"]["make"], "Example Camera");
    assert!(doc["metadata"].get("imageWidth").is_none());
    // empty-string tag dropped
    assert!(doc["metadata"].get("artist").is_none());
}

#[test]
fn manifest_indicator_contents() {
    let doc = generate(ReportMode::IndicatorSet);
    let manifest = &doc["manifests"][0];

    assert_eq!(manifest["label"], "urn:uuid:f97a8bc1");

    // version 2 claims emit under "claim"
    let claim = &manifest["claim"];
    assert_eq!(claim["dc:title"], "sunset.jpg");
    assert_eq!(claim["instanceID"], "xmp:iid:5f8a");
    assert_eq!(claim["created_assertions"][0]["hash"], "AQIDBA==");

    let signature = &manifest["claim_signature"];
    assert_eq!(signature["algorithm"], "ES256");
    assert_eq!(signature["issuer"]["CN"], "Example Root");

    let assertions = &manifest["assertions"];
    assert!(assertions["c2pa.actions.v2"].get("uuid").is_none());
    assert_eq!(
        assertions["c2pa.actions.v2"]["data"]["actions"][0]["action"],
        "c2pa.created"
    );
}

#[test]
fn status_classification() {
    let doc = generate(ReportMode::IndicatorSet);
    let status = &doc["manifests"][0]["status"];

    assert_eq!(status["signature"], "claimSignature.validated");
    assert_eq!(status["trust"], "signingCredential.trusted");
    assert_eq!(status["content"], "assertion.dataHash.mismatch");
    assert_eq!(
        status["assertion"],
        json!({ "c2pa.actions.v2": "assertion.dataHash.mismatch" })
    );
}

#[test]
fn validation_extras() {
    let doc = generate(ReportMode::IndicatorSet);
    let extras = &doc["extras:validation_status"];

    assert_eq!(extras["isValid"], false);
    assert_eq!(extras["error"], "data hash mismatch");
    assert_eq!(extras["validationErrors"], json!(["assertion.dataHash.mismatch"]));
    assert_eq!(extras["entries"].as_array().unwrap().len(), 3);
    assert_eq!(extras["entries"][2]["severity"], "error");
}

#[test]
fn no_raw_byte_hashes_in_output() {
    let doc = generate(ReportMode::IndicatorSet);

    fn assert_no_byte_hashes(value: &Value) {
        match value {
            Value::Object(map) => {
                if let Some(hash) = map.get("hash") {
                    assert!(hash.is_string(), "raw hash bytes leaked: {hash}");
                }
                map.values().for_each(assert_no_byte_hashes);
            }
            Value::Array(values) => values.iter().for_each(assert_no_byte_hashes),
            _ => {}
        }
    }

    assert_no_byte_hashes(&doc);
}

#[test]
fn parse_failure_still_produces_document() {
    let validator =
        JsonReportValidator::from_json(r#"{ "manifest_store": null, "validation_result": { "isValid": false, "error": "malformed box" } }"#)
            .unwrap();
    let metadata = FixtureMetadata {};
    let doc = ManifestProcessor::new(&validator, &metadata).process(JPEG_ASSET, ReportMode::IndicatorSet);

    assert_eq!(doc["manifests"], json!([]));
    assert_eq!(doc["extras:validation_status"]["error"], "malformed box");
    assert!(doc["asset_info"]["hash"].is_string());
    assert_eq!(doc["content"]["imageWidth"], 640);
}

#[test]
fn summary_report_round_trip() {
    let doc = generate(ReportMode::Summary);

    assert_eq!(doc["format"], "image/jpeg");
    let manifest = &doc["manifests"][0];
    assert_eq!(manifest["claim_version"], 2);
    assert_eq!(manifest["signature"]["issuer"], "C=US, O=Example CA, CN=Example Root");
    assert_eq!(manifest["assertions"], json!(["c2pa.actions.v2"]));
}
