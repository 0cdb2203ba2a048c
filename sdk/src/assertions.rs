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

//! Projection of raw manifest assertions into the label-keyed map used in
//! indicator sets.

use serde_json::{Map, Value};

use crate::{identity::encode_hashes, manifest_store::Assertion};

/// Bookkeeping keys that never appear in output: the opaque identifier,
/// the source JUMBF box reference, the component-type tag, the label
/// itself (it becomes the map key) and the duplicate content field.
const BOOKKEEPING_KEYS: [&str; 5] = ["uuid", "source_box", "content_type", "label", "content"];

/// Converts a manifest's assertion list into a label-keyed map.
///
/// Bookkeeping keys are stripped, byte-array hash fields are
/// base64-encoded, and an unlabeled assertion is keyed `"unknown"`.
/// Duplicate labels overwrite earlier entries; the output is a map, not a
/// list.
pub fn project_assertions(assertions: &[Assertion]) -> Map<String, Value> {
    let mut projected = Map::new();

    for assertion in assertions {
        let mut record = assertion.0.clone();
        for key in BOOKKEEPING_KEYS {
            record.remove(key);
        }

        let label = assertion.label().unwrap_or("unknown").to_string();
        projected.insert(label, encode_hashes(Value::Object(record)));
    }

    projected
}
