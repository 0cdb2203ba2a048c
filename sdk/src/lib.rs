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

#![deny(clippy::panic)]
#![deny(clippy::unwrap_used)]

//! This library transforms a parsed, already-validated Content Credentials
//! manifest store plus raw asset metadata into a Trust Indicator Set: the
//! standardized JSON-LD document defined by ISO 21617-1 (JPEG Trust) that
//! downstream policy engines consume.
//!
//! Container parsing, signature verification and metadata extraction are
//! external collaborators; this crate classifies their results and shapes
//! the output document.
//!
//! # Example: assembling an indicator set
//!
//! ```
//! use trust_indicators::{ExifMetadataSource, IndicatorSetAssembler, ManifestStore};
//!
//! let store: ManifestStore = serde_json::from_str(r#"{"manifests": []}"#)?;
//! let asset = b"not really an image";
//!
//! let metadata = ExifMetadataSource::new();
//! let assembler = IndicatorSetAssembler::new(&metadata);
//! let indicator_set = assembler.assemble(Some(&store), None, Some(asset));
//!
//! assert_eq!(indicator_set["asset_info"]["alg"], "sha256");
//! # Ok::<(), serde_json::Error>(())
//! ```

pub mod assertions;
mod error;
pub mod identity;
pub mod indicator_set;
pub mod manifest_store;
pub mod metadata;
pub mod reader;
pub mod status;
pub(crate) mod utils;
pub mod validation;

pub use error::{Error, Result};
pub use indicator_set::IndicatorSetAssembler;
pub use manifest_store::{Assertion, Claim, HashedUri, Manifest, ManifestStore, SignatureInfo};
pub use metadata::{ExifMetadataSource, MetadataSource, Tag, TagMap};
pub use reader::{
    AssetFormat, JsonReportValidator, ManifestProcessor, ManifestValidator, NoManifestValidator,
    ReportMode, StoreOutcome, ValidationOutcome,
};
pub use status::StatusSummary;
pub use validation::{StatusEntry, ValidationResult};
