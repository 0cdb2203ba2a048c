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

//! Command-line front end for generating JPEG Trust indicator sets.
//!
//! Reads one asset, runs the manifest processing pipeline and writes the
//! resulting JSON document to stdout or a file. Manifest validation
//! itself is performed out-of-band; its JSON report is supplied with
//! `--report`.

use std::{
    fs,
    path::PathBuf,
};

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser};
use log::LevelFilter;
use trust_indicators::{
    ExifMetadataSource, JsonReportValidator, ManifestProcessor, ManifestValidator,
    NoManifestValidator, ReportMode,
};

/// Tool for generating JPEG Trust indicator sets from image files.
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct CliArgs {
    /// Input path to the asset to examine.
    path: PathBuf,

    /// Path to the validation report JSON produced by the manifest
    /// validator for this asset.
    #[arg(short, long)]
    report: Option<PathBuf>,

    /// Output a flat per-manifest summary instead of the full indicator set.
    #[arg(short, long)]
    summary: bool,

    /// Path to output file (stdout when omitted).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Force overwrite of output if it already exists.
    #[arg(short, long)]
    force: bool,

    /// Use verbose output (-vv very verbose output).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = CliArgs::parse();

    env_logger::Builder::new()
        .filter_level(match args.verbose {
            0 => LevelFilter::Error,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        })
        .init();

    let asset = fs::read(&args.path)
        .with_context(|| format!("Failed to read asset: {:?}", args.path))?;

    let validator: Box<dyn ManifestValidator> = match &args.report {
        Some(path) => Box::new(
            JsonReportValidator::from_file(path)
                .with_context(|| format!("Failed to read validation report: {path:?}"))?,
        ),
        None => Box::new(NoManifestValidator::default()),
    };

    let metadata = ExifMetadataSource::new();
    let processor = ManifestProcessor::new(validator.as_ref(), &metadata);

    let mode = if args.summary {
        ReportMode::Summary
    } else {
        ReportMode::IndicatorSet
    };
    let document = processor.process(&asset, mode);
    let json = serde_json::to_string_pretty(&document)?;

    match &args.output {
        Some(path) => {
            if path.exists() && !args.force {
                bail!("Output path already exists use `--force` to overwrite");
            }
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            fs::write(path, &json)
                .with_context(|| format!("Failed to write output: {path:?}"))?;
        }
        None => println!("{json}"),
    }

    Ok(())
}
