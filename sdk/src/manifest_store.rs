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

//! Data model for the manifest-validation collaborator's output.
//!
//! These records are owned by the external validator and are read-only to
//! this crate. Every field is optional: a missing value must never abort
//! indicator-set assembly, so defaults are substituted at each read site.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use serde_with::skip_serializing_none;

/// An ordered collection of manifests as produced by the external
/// manifest validator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ManifestStore {
    #[serde(default)]
    pub manifests: Vec<Manifest>,
}

/// One signed authorship/edit record inside a Content Credentials container.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    /// The JUMBF label of this manifest within the store.
    pub label: Option<String>,

    pub claim: Option<Claim>,

    pub signature: Option<SignatureInfo>,

    #[serde(default)]
    pub assertions: Vec<Assertion>,
}

/// The core signed statement within a manifest.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Claim {
    /// Claim structure version (1 or 2).
    pub version: Option<u8>,

    #[serde(alias = "dc:title")]
    pub title: Option<String>,

    pub instance_id: Option<String>,

    /// Generator details as reported by the signing application. May carry
    /// nested binary hash fields (e.g. icon references).
    pub claim_generator_info: Option<Value>,

    /// Default hash algorithm for the claim's hashed references.
    pub alg: Option<String>,

    #[serde(default)]
    pub created_assertions: Vec<HashedUri>,

    #[serde(default)]
    pub gathered_assertions: Vec<HashedUri>,

    #[serde(default)]
    pub redacted_assertions: Vec<HashedUri>,
}

/// A reference to another data block plus its hash, used to bind
/// assertions into a claim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HashedUri {
    pub url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub alg: Option<String>,

    /// Accepts either a byte string or a JSON array of small integers.
    #[serde(with = "serde_bytes", default)]
    pub hash: Vec<u8>,
}

impl HashedUri {
    pub fn new(url: String, alg: Option<String>, hash_bytes: &[u8]) -> Self {
        Self {
            url,
            alg,
            hash: hash_bytes.to_vec(),
        }
    }
}

/// Signing certificate details as reported by the external validator.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignatureInfo {
    /// COSE algorithm identifier (e.g. -7 for ES256).
    pub alg: Option<i64>,

    pub serial_number: Option<String>,

    /// Issuer Distinguished Name in its X.509 string form.
    pub issuer: Option<String>,

    /// Subject Distinguished Name in its X.509 string form.
    pub subject: Option<String>,

    pub not_before: Option<String>,

    pub not_after: Option<String>,
}

/// A labeled record with arbitrary structured content.
///
/// Assertions arrive as free-form JSON objects. Alongside their content
/// they carry internal bookkeeping keys (`uuid`, `source_box`,
/// `content_type`, `label` and a duplicate `content` field) which must
/// never appear in an indicator set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Assertion(pub Map<String, Value>);

impl Assertion {
    /// Returns the assertion's label, if present.
    pub fn label(&self) -> Option<&str> {
        self.0.get("label").and_then(Value::as_str)
    }
}
