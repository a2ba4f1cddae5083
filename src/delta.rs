// Copyright 2021 bmc::labs Gmbh. All rights reserved.
//
// Authors:
//   Jonas Reitemeyer <alumni@bmc-labs.com>
//   Florian Eich <florian@bmc-labs.com>

use super::{Error, Lap, Result, TelemetryPoint};
use getset::CopyGetters;
use serde::{Deserialize, Serialize};


/// Time delta between two laps at one distance along the track. Positive
/// delta means the comparison lap is slower at that point.
///
/// One sequence of these per (reference, comparison) pair, in
/// reference-sample order; recomputed per comparison request, never
/// persisted.
#[derive(Clone, Copy, Debug, PartialEq, CopyGetters, Deserialize,
         Serialize)]
#[getset(get_copy = "pub")]
pub struct DeltaPoint {
  distance:        f64,
  delta:           f64,
  reference_time:  f64,
  comparison_time: f64,
}


/// Produces a distance-aligned time-delta series between two laps.
///
/// For every reference sample, the comparison lap's time at the same
/// distance is found by linear interpolation between the bracketing
/// comparison samples; outside the comparison lap's distance range the
/// nearest comparison sample by absolute distance difference is used
/// instead. An empty comparison lap leaves interpolation undefined and is
/// a contract violation.
pub fn calculate_delta(reference: &Lap,
                       comparison: &Lap)
                       -> Result<Vec<DeltaPoint>> {
  if comparison.is_empty() {
    return Err(Error::EmptyComparisonLap { number: comparison.number() });
  }

  let deltas =
    reference.points()
             .iter()
             .map(|point| {
               let comparison_time =
                 time_at_distance(comparison.points(), point.distance());
               DeltaPoint { distance:        point.distance(),
                            delta:           comparison_time - point.time(),
                            reference_time:  point.time(),
                            comparison_time, }
             })
             .collect();
  Ok(deltas)
}

/// Interpolated time of `points` at distance `target`. `points` must be
/// non-empty and distance-ordered.
fn time_at_distance(points: &[TelemetryPoint], target: f64) -> f64 {
  // last sample with distance <= target and first with distance >= target
  let below = points.partition_point(|point| point.distance() <= target);
  let lower = below.checked_sub(1).map(|index| &points[index]);
  let upper = points.get(points.partition_point(|point| {
                            point.distance() < target
                          }));

  match (lower, upper) {
    (Some(lower), Some(upper)) => {
      let span = upper.distance() - lower.distance();
      if span.abs() < f64::EPSILON {
        // bracketing samples coincide: target hits a sample exactly
        lower.time()
      } else {
        lower.time()
        + (target - lower.distance()) / span * (upper.time() - lower.time())
      }
    }
    // target outside the lap's distance range: nearest sample wins
    _ => {
      points.iter()
            .min_by(|a, b| {
              (a.distance() - target).abs()
                                     .partial_cmp(&(b.distance() - target)
                                                                  .abs())
                                     .unwrap_or(std::cmp::Ordering::Equal)
            })
            .expect("comparison lap verified non-empty")
            .time()
    }
  }
}
