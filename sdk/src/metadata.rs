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

//! Asset metadata extraction and normalization.
//!
//! The extraction collaborator returns a flat tag map keyed by
//! human-readable names. Normalization camel-cases the keys, applies two
//! acronym fixups and relocates a fixed set of content-describing keys
//! into the `content` bucket of the indicator set.

use std::collections::HashMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{reader::AssetFormat, Error, Result};

/// Keys that describe the content itself rather than its provenance.
/// These never remain in `metadata`; they always move to `content`.
const CONTENT_KEYS: [&str; 8] = [
    "imageWidth",
    "imageHeight",
    "bitDepth",
    "colorType",
    "compression",
    "filter",
    "interlace",
    "fileType",
];

/// One extracted tag, wrapped the way the metadata collaborator reports it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    pub value: Value,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Tag {
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            description: None,
        }
    }
}

/// Flat tag map as returned by the metadata collaborator.
pub type TagMap = HashMap<String, Tag>;

/// The metadata-extraction collaborator.
///
/// Extraction failures must never abort indicator-set generation; callers
/// degrade to [`failure_diagnostic`] instead.
pub trait MetadataSource {
    /// Source name used in failure diagnostics.
    fn name(&self) -> &str;

    /// Extracts a flat tag map from the asset bytes.
    fn extract(&self, asset: &[u8]) -> Result<TagMap>;
}

/// EXIF-backed [`MetadataSource`] for JPEG, PNG and TIFF-like assets.
#[derive(Debug, Default)]
pub struct ExifMetadataSource {}

impl ExifMetadataSource {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MetadataSource for ExifMetadataSource {
    fn name(&self) -> &str {
        "exifreader"
    }

    fn extract(&self, asset: &[u8]) -> Result<TagMap> {
        let mut tags = TagMap::new();

        // The container format is reported as a tag so that it lands in
        // the content bucket after normalization.
        if let Some(format) = AssetFormat::sniff(asset) {
            tags.insert("File Type".to_string(), Tag::new(format.mime()));
        }

        let mut cursor = std::io::Cursor::new(asset);
        let exif = exif::Reader::new()
            .read_from_container(&mut cursor)
            .map_err(|e| Error::Metadata(e.to_string()))?;

        for field in exif.fields() {
            if field.ifd_num != exif::In::PRIMARY {
                continue;
            }
            tags.insert(
                field.tag.to_string(),
                Tag::new(field.display_value().to_string()),
            );
        }

        Ok(tags)
    }
}

/// Normalizes a raw tag map into a flat `{camelKey: value}` map.
///
/// Empty-string values are dropped, keys lose any `/` characters and are
/// camel-cased, and the `iCC`/`jFIF` casing artifacts are corrected.
pub fn normalize_tags(tags: &TagMap) -> Map<String, Value> {
    let mut normalized = Map::new();

    for (key, tag) in tags {
        if tag.value.as_str().is_some_and(str::is_empty) {
            continue;
        }
        normalized.insert(camel_case_key(key), tag.value.clone());
    }

    normalized
}

/// Splits a normalized tag map into `(metadata, content)` buckets using
/// the fixed content-key allowlist.
pub fn split_content(mut normalized: Map<String, Value>) -> (Map<String, Value>, Map<String, Value>) {
    let mut content = Map::new();

    for key in CONTENT_KEYS {
        if let Some(value) = normalized.remove(key) {
            content.insert(key.to_string(), value);
        }
    }

    (normalized, content)
}

/// Builds the diagnostic object emitted in place of metadata when
/// extraction fails.
pub fn failure_diagnostic(source: &str, error: &str) -> Map<String, Value> {
    let mut diagnostic = Map::new();
    diagnostic.insert("source".to_string(), Value::String(source.to_string()));
    diagnostic.insert("error".to_string(), Value::String(error.to_string()));
    diagnostic.insert(
        "timestamp".to_string(),
        Value::String(Utc::now().to_rfc3339()),
    );
    diagnostic
}

// "Image Width" -> "imageWidth", "ICC Profile" -> "ICCProfile" (after the
// acronym fixup), "Pixels/Unit X" -> "pixelsUnitX".
fn camel_case_key(key: &str) -> String {
    let key = key.replace('/', "");
    let mut camel = String::with_capacity(key.len());

    for (i, word) in key
        .split(|c: char| c == ' ' || c == '_')
        .filter(|w| !w.is_empty())
        .enumerate()
    {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            if i == 0 {
                camel.extend(first.to_lowercase());
            } else {
                camel.extend(first.to_uppercase());
            }
            camel.push_str(chars.as_str());
        }
    }

    if let Some(rest) = camel.strip_prefix("iCC") {
        return format!("ICC{rest}");
    }
    if let Some(rest) = camel.strip_prefix("jFIF") {
        return format!("JFIF{rest}");
    }

    camel
}
