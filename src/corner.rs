// Copyright 2021 bmc::labs Gmbh. All rights reserved.
//
// Authors:
//   Florian Eich <florian@bmc-labs.com>
//   Jonas Reitemeyer <alumni@bmc-labs.com>

use super::{Config, Error, Lap, Result};
use getset::CopyGetters;
use serde::{Deserialize, Serialize};


/// Turn direction, from the sign of lateral acceleration at the sample
/// that opened the corner: positive means right.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub enum CornerDirection {
  Left,
  Right,
}


/// One detected corner.
///
/// The apex is the point of minimum speed while the lateral threshold was
/// exceeded - cornering scrubs speed, so minimum speed marks maximum
/// lateral load. Derived data with the same staleness rule as braking
/// zones: recomputed from the lap on every call, never cached.
#[derive(Clone, Copy, Debug, PartialEq, CopyGetters, Deserialize,
         Serialize)]
#[getset(get_copy = "pub")]
pub struct Corner {
  start_index:    usize,
  end_index:      usize,
  direction:      CornerDirection,
  /// Speed at the sample that opened the corner, in km/h.
  entry_speed:    f64,
  /// Minimum speed observed while the corner was open, in km/h.
  apex_speed:     f64,
  /// Speed at the sample where the condition first became false, in km/h.
  exit_speed:     f64,
  /// Peak absolute lateral acceleration while open, in G.
  peak_lateral_g: f64,
  /// Distance of the minimum-speed sample, in meters.
  apex_distance:  f64,
}


struct OpenCorner {
  start_index:    usize,
  direction:      CornerDirection,
  entry_speed:    f64,
  apex_speed:     f64,
  apex_distance:  f64,
  peak_lateral_g: f64,
}

impl OpenCorner {
  fn close(self, end_index: usize, exit_speed: f64) -> Corner {
    Corner { start_index:    self.start_index,
             end_index,
             direction:      self.direction,
             entry_speed:    self.entry_speed,
             apex_speed:     self.apex_speed,
             exit_speed,
             peak_lateral_g: self.peak_lateral_g,
             apex_distance:  self.apex_distance, }
  }
}


/// Scans a lap's samples left to right for corners.
///
/// A corner opens while absolute lateral acceleration exceeds the
/// configured threshold and, when a speed ceiling is configured, speed is
/// below it. It closes on the first sample no longer satisfying the
/// condition; that sample's speed is the exit speed. Samples missing speed
/// or lateral acceleration neither open nor close a corner. A corner still
/// open at the end of the lap is closed on the last participating sample.
///
/// Pure function of the lap. Calling it on an empty lap is a contract
/// violation.
pub fn detect_corners(lap: &Lap, config: &Config) -> Result<Vec<Corner>> {
  if lap.is_empty() {
    return Err(Error::EmptyLap { number: lap.number() });
  }

  let mut corners = Vec::new();
  let mut open: Option<OpenCorner> = None;
  let mut last_seen: Option<(usize, f64)> = None;

  for (index, point) in lap.points().iter().enumerate() {
    let (speed, lat_accel) = match (point.speed(), point.lat_accel()) {
      (Some(speed), Some(lat_accel)) => (speed, lat_accel),
      _ => continue,
    };
    last_seen = Some((index, speed));

    let below_ceiling = config.corner_speed_ceiling
                              .map_or(true, |ceiling| speed < ceiling);
    let cornering =
      lat_accel.abs() > config.corner_lateral_g && below_ceiling;

    if cornering {
      match open.as_mut() {
        None => {
          let direction = if lat_accel > 0.0 {
            CornerDirection::Right
          } else {
            CornerDirection::Left
          };
          open = Some(OpenCorner { start_index: index,
                                   direction,
                                   entry_speed: speed,
                                   apex_speed: speed,
                                   apex_distance: point.distance(),
                                   peak_lateral_g: lat_accel.abs() });
        }
        Some(corner) => {
          if speed < corner.apex_speed {
            corner.apex_speed = speed;
            corner.apex_distance = point.distance();
          }
          corner.peak_lateral_g = corner.peak_lateral_g.max(lat_accel.abs());
        }
      }
    } else if let Some(corner) = open.take() {
      corners.push(corner.close(index, speed));
    }
  }

  if let (Some(corner), Some((index, speed))) = (open, last_seen) {
    corners.push(corner.close(index, speed));
  }

  Ok(corners)
}
