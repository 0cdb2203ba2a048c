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

//! Classification of raw validation status codes into the four-category
//! trust taxonomy (signature, assertion set, content, trust chain).

use serde::Serialize;
use serde_json::{Map, Value};

use crate::validation::StatusEntry;

/// The classified trust status of one manifest.
///
/// Each field is derived by an independent, ordered first-match scan of
/// the validator's status-entry list; the classifier never re-sorts or
/// ranks entries.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StatusSummary {
    /// First code containing `claimSignature.`, or `"unknown"`.
    pub signature: String,

    /// Map from the last path segment of each matching entry's URL to its
    /// code, for every code containing `assertion`. Degrades to the
    /// scalar `"unknown"` when nothing matches.
    pub assertion: Value,

    /// First code matching `assertion.dataHash`, falling back to
    /// `assertion.hash.bmff`, or `"unknown"`.
    pub content: String,

    /// First code containing `signingCredential`. The unmatched case is
    /// the empty string, not `"unknown"`.
    pub trust: String,
}

impl StatusSummary {
    pub fn from_entries(entries: &[StatusEntry]) -> Self {
        Self {
            signature: first_code(entries, "claimSignature.")
                .unwrap_or_else(|| "unknown".to_string()),
            assertion: assertion_codes(entries),
            content: first_code(entries, "assertion.dataHash")
                .or_else(|| first_code(entries, "assertion.hash.bmff"))
                .unwrap_or_else(|| "unknown".to_string()),
            trust: first_code(entries, "signingCredential").unwrap_or_default(),
        }
    }
}

fn first_code(entries: &[StatusEntry], pattern: &str) -> Option<String> {
    entries
        .iter()
        .find(|e| e.code.contains(pattern))
        .map(|e| e.code.clone())
}

fn assertion_codes(entries: &[StatusEntry]) -> Value {
    let mut codes = Map::new();

    for entry in entries.iter().filter(|e| e.code.contains("assertion")) {
        let tail = match &entry.url {
            Some(url) => url.rsplit('/').next().unwrap_or(url.as_str()),
            None => "unknown",
        };
        codes.insert(tail.to_string(), Value::String(entry.code.clone()));
    }

    if codes.is_empty() {
        Value::String("unknown".to_string())
    } else {
        Value::Object(codes)
    }
}
