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

//! Validation outcome records produced by the external manifest validator.
//!
//! Status codes form an open, dot-namespaced string vocabulary (e.g.
//! `claimSignature.validated`, `assertion.dataHash.mismatch`). They are
//! matched by substring containment, never parsed into an enum.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// The overall result of validating a manifest store.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    #[serde(rename = "isValid")]
    pub is_valid: Option<bool>,

    /// Top-level error, set when validation could not complete.
    pub error: Option<String>,

    #[serde(rename = "validationErrors", default)]
    pub validation_errors: Vec<String>,

    #[serde(rename = "statusEntries", default)]
    pub status_entries: Vec<StatusEntry>,
}

impl ValidationResult {
    /// Returns the ordered status-entry list. Entry order is the
    /// collaborator's; classification relies on it for first-match
    /// semantics.
    pub fn to_representation(&self) -> &[StatusEntry] {
        &self.status_entries
    }

    /// Builds a degraded result for a manifest store that could not be
    /// parsed.
    pub fn from_parse_failure(message: impl Into<String>) -> Self {
        Self {
            is_valid: Some(false),
            error: Some(message.into()),
            ..Self::default()
        }
    }
}

/// One machine-readable outcome code produced during validation.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusEntry {
    #[serde(default)]
    pub code: String,

    /// JUMBF reference to the entity that was validated.
    pub url: Option<String>,

    pub message: Option<String>,

    pub severity: Option<String>,
}

impl StatusEntry {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            ..Self::default()
        }
    }

    pub fn set_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn set_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn set_severity(mut self, severity: impl Into<String>) -> Self {
        self.severity = Some(severity.into());
        self
    }
}
