// Copyright 2021 bmc::labs Gmbh. All rights reserved.
//
// Authors:
//   Florian Eich <florian@bmc-labs.com>
//   Jonas Reitemeyer <alumni@bmc-labs.com>

use serde::{Deserialize, Serialize};


/// Time gap between consecutive samples above which the heuristic segmenter
/// closes the current lap, in seconds.
pub const LAP_GAP_SECS: f64 = 5.0;
/// Heuristic candidate laps at or below this duration are discarded as
/// noise (pit lane, partial laps), in seconds.
pub const MIN_LAP_SECS: f64 = 10.0;
/// Deceleration above which a braking zone opens, in G.
pub const BRAKING_DECEL_G: f64 = 0.5;
/// Softer deceleration gate used by the speed-drop braking variant, in G.
pub const BRAKING_SOFT_DECEL_G: f64 = 0.3;
/// Sample-to-sample speed drop required by the speed-drop braking variant,
/// in km/h.
pub const BRAKING_SPEED_DROP_KMH: f64 = 5.0;
/// Lateral acceleration above which a corner opens, in G.
pub const CORNER_LATERAL_G: f64 = 0.8;
/// Minimum field count for a line to qualify as the header row.
pub const MIN_HEADER_COLUMNS: usize = 4;
/// Number of leading lines scanned for session metadata.
pub const METADATA_LINES: usize = 13;


/// Tuning thresholds for segmentation and event detection.
///
/// Exporter revisions disagree on several of these values (0.5 vs 0.8 G
/// cornering, differing gap lengths), so they are a value callers can
/// override rather than constants baked into the detectors. `Default`
/// yields the canonical set above.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Config {
  /// See [`LAP_GAP_SECS`].
  pub lap_gap_secs:           f64,
  /// See [`MIN_LAP_SECS`].
  pub min_lap_secs:           f64,
  /// See [`BRAKING_DECEL_G`].
  pub braking_decel_g:        f64,
  /// See [`BRAKING_SOFT_DECEL_G`].
  pub braking_soft_decel_g:   f64,
  /// See [`BRAKING_SPEED_DROP_KMH`].
  pub braking_speed_drop_kmh: f64,
  /// Use the speed-drop braking variant instead of the plain deceleration
  /// threshold.
  pub braking_by_speed_drop:  bool,
  /// See [`CORNER_LATERAL_G`].
  pub corner_lateral_g:       f64,
  /// Optional speed gate for the corner detector, in km/h: when set, a
  /// corner only opens below this speed.
  pub corner_speed_ceiling:   Option<f64>,
  /// See [`MIN_HEADER_COLUMNS`].
  pub min_header_columns:     usize,
  /// See [`METADATA_LINES`].
  pub metadata_lines:         usize,
}

impl Default for Config {
  fn default() -> Self {
    Self { lap_gap_secs:           LAP_GAP_SECS,
           min_lap_secs:           MIN_LAP_SECS,
           braking_decel_g:        BRAKING_DECEL_G,
           braking_soft_decel_g:   BRAKING_SOFT_DECEL_G,
           braking_speed_drop_kmh: BRAKING_SPEED_DROP_KMH,
           braking_by_speed_drop:  false,
           corner_lateral_g:       CORNER_LATERAL_G,
           corner_speed_ceiling:   None,
           min_header_columns:     MIN_HEADER_COLUMNS,
           metadata_lines:         METADATA_LINES, }
  }
}
