// Copyright 2021 bmc::labs Gmbh. All rights reserved.
//
// Authors:
//   Florian Eich <florian@bmc-labs.com>
//   Jonas Reitemeyer <alumni@bmc-labs.com>

use thiserror::Error;


/// Crate result type. All fallible entry points of this library return it.
pub type Result<T> = std::result::Result<T, Error>;


/// Errors surfaced by the parsing and analysis entry points.
///
/// Only structurally broken input aborts a parse: an undecodable byte
/// stream, a file without a recognizable header row, or a file in which not
/// a single data row decodes. Everything else - bad rows, missing channels,
/// absent metadata - degrades gracefully and never shows up here. The two
/// `Empty*` variants signal caller contract violations on the analysis
/// functions, not data problems.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum Error {
  #[error("file is not decodable as UTF-8 or Latin-1 text")]
  InvalidFormat,
  #[error("no telemetry header row found in file")]
  MissingHeaders,
  #[error("file contains no decodable data rows")]
  NoValidData,
  #[error("lap {number} contains no samples")]
  EmptyLap { number: usize },
  #[error("comparison lap {number} contains no samples")]
  EmptyComparisonLap { number: usize },
}
