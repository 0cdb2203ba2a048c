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

//! Decoders for certificate identity and signature fields.

use serde_json::{Map, Value};

use crate::utils::base64;

/// Parses an X.509-style Distinguished Name string into a key/value map.
///
/// Splits on commas, then each segment on its first `=`, trimming
/// whitespace. No DN validation is performed; segments without a `=` are
/// silently dropped. A missing input yields an empty map.
pub fn parse_distinguished_name(dn: Option<&str>) -> Map<String, Value> {
    let mut components = Map::new();

    if let Some(dn) = dn {
        for segment in dn.split(',') {
            if let Some((key, value)) = segment.split_once('=') {
                components.insert(
                    key.trim().to_string(),
                    Value::String(value.trim().to_string()),
                );
            }
        }
    }

    components
}

/// Decodes a COSE signature-algorithm identifier into its canonical name.
///
/// Anything outside the fixed set maps to `"Unknown"`.
pub fn signing_alg_name(alg: Option<i64>) -> &'static str {
    match alg {
        Some(-7) => "ES256",
        Some(-35) => "ES384",
        Some(-36) => "ES512",
        Some(-37) => "PS256",
        Some(-38) => "PS384",
        Some(-39) => "PS512",
        Some(-8) => "Ed25519",
        _ => "Unknown",
    }
}

/// Recursively converts byte-array `hash` fields to base64 strings.
///
/// Any property literally named `hash` whose value is byte-like (a JSON
/// array of integers in `0..=255`) is replaced with its base64 string
/// form. The transform is pure: it returns a new value rather than
/// mutating in place, and it is deterministic across repeated calls.
pub fn encode_hashes(value: Value) -> Value {
    match value {
        Value::Object(mut map) => {
            if let Some(bytes) = map.get("hash").and_then(as_byte_array) {
                map.insert(
                    "hash".to_string(),
                    Value::String(base64::encode(&bytes)),
                );
            }

            for (_key, val) in map.iter_mut() {
                *val = encode_hashes(std::mem::take(val));
            }

            Value::Object(map)
        }
        Value::Array(values) => Value::Array(values.into_iter().map(encode_hashes).collect()),
        other => other,
    }
}

// A JSON array qualifies as byte-like only if every element is an
// integer in 0..=255.
fn as_byte_array(value: &Value) -> Option<Vec<u8>> {
    value
        .as_array()?
        .iter()
        .map(|v| v.as_u64().filter(|n| *n <= 255).map(|n| n as u8))
        .collect()
}
