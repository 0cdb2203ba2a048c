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

use thiserror::Error;

/// `Error` enumerates errors returned by trust-indicator operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The validation collaborator's report could not be decoded.
    #[error("validation report could not be decoded: {0}")]
    ReportDecoding(String),

    /// Metadata extraction failed. Callers are expected to degrade to a
    /// diagnostic object rather than propagate this.
    #[error("metadata extraction failed: {0}")]
    Metadata(String),

    #[error("bad parameter: {0}")]
    BadParam(String),

    #[error(transparent)]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

/// A specialized `Result` type for trust-indicator operations.
pub type Result<T> = std::result::Result<T, Error>;
