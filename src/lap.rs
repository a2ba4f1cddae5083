// Copyright 2021 bmc::labs Gmbh. All rights reserved.
//
// Authors:
//   Jonas Reitemeyer <alumni@bmc-labs.com>
//   Florian Eich <florian@bmc-labs.com>

use super::TelemetryPoint;
use getset::{CopyGetters, Getters};
use serde::{Deserialize, Serialize};


/// Holds all samples of one lap.
///
/// Laps are numbered sequentially from 1 with no gaps and are non-empty by
/// construction policy: the segmenter never emits an empty candidate. The
/// sample sequence is in insertion order, which is time order. A lap is
/// owned by the session that created it and read-only afterward; the
/// statistics below are recomputed on every call and skip samples on which
/// the relevant channel is absent.
#[derive(Clone, Debug, PartialEq, CopyGetters, Getters, Deserialize,
         Serialize)]
pub struct Lap {
  #[getset(get_copy = "pub")]
  number:   usize,
  /// Lap duration in seconds. Beacon interval for beacon-bounded laps,
  /// `last.time - first.time` for heuristic laps.
  #[getset(get_copy = "pub")]
  duration: f64,
  #[getset(get = "pub")]
  points:   Vec<TelemetryPoint>,
}

impl Lap {
  pub(crate) fn new(number: usize,
                    duration: f64,
                    points: Vec<TelemetryPoint>)
                    -> Self {
    Self { number,
           duration,
           points }
  }

  pub fn len(&self) -> usize {
    self.points.len()
  }

  pub fn is_empty(&self) -> bool {
    self.points.is_empty()
  }

  /// Session time at which this lap starts, i.e. the time of its first
  /// sample. Zero for a lap without samples.
  pub fn start(&self) -> f64 {
    self.points.first().map(|point| point.time()).unwrap_or(0.0)
  }

  /// Meters covered in this lap, from the odometer channel.
  pub fn distance_covered(&self) -> f64 {
    match (self.points.first(), self.points.last()) {
      (Some(first), Some(last)) => last.distance() - first.distance(),
      _ => 0.0,
    }
  }

  /// Maximum speed observed in this lap, in km/h. `None` if no sample
  /// carries the speed channel.
  pub fn max_speed(&self) -> Option<f64> {
    max_of(self.points.iter().filter_map(|point| point.speed()))
  }

  /// Mean speed over all samples carrying the speed channel, in km/h.
  pub fn avg_speed(&self) -> Option<f64> {
    let speeds: Vec<f64> =
      self.points.iter().filter_map(|point| point.speed()).collect();
    if speeds.is_empty() {
      return None;
    }
    Some(speeds.iter().sum::<f64>() / speeds.len() as f64)
  }

  /// Maximum engine RPM observed in this lap.
  pub fn max_rpm(&self) -> Option<f64> {
    max_of(self.points.iter().filter_map(|point| point.rpm()))
  }

  /// Peak absolute lateral acceleration in this lap, in G.
  pub fn peak_lateral_g(&self) -> Option<f64> {
    max_of(self.points
               .iter()
               .filter_map(|point| point.lat_accel())
               .map(f64::abs))
  }

  /// Peak deceleration in this lap, in G, as a positive number. Only
  /// samples with negative longitudinal acceleration count.
  pub fn peak_braking_g(&self) -> Option<f64> {
    max_of(self.points
               .iter()
               .filter_map(|point| point.lon_accel())
               .filter(|&accel| accel < 0.0)
               .map(f64::abs))
  }
}

fn max_of(values: impl Iterator<Item = f64>) -> Option<f64> {
  values.fold(None, |max: Option<f64>, value| {
          Some(max.map_or(value, |max| max.max(value)))
        })
}
