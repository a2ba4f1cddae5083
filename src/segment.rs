// Copyright 2021 bmc::labs Gmbh. All rights reserved.
//
// Authors:
//   Florian Eich <florian@bmc-labs.com>
//   Jonas Reitemeyer <alumni@bmc-labs.com>

use super::{Config, Lap, TelemetryPoint};
use log::debug;


/// Partitions an ordered sample sequence into laps.
///
/// With beacon crossing times available they are ground truth: lap
/// boundaries sit exactly at the beacons and every beacon-bounded lap is
/// kept no matter how short. Without beacons the segmenter falls back to
/// heuristics, closing a lap on an odometer reset or on a time gap, and
/// drops candidates too short to be real laps. The two strategies are
/// mutually exclusive.
pub(crate) fn segment(points: Vec<TelemetryPoint>,
                      beacons: &[f64],
                      config: &Config)
                      -> Vec<Lap> {
  if points.is_empty() {
    return Vec::new();
  }
  if beacons.is_empty() {
    segment_heuristic(points, config)
  } else {
    segment_by_beacons(points, beacons)
  }
}

/// Walks samples in order and closes the current lap whenever a sample's
/// time reaches the next pending beacon; the triggering sample opens the
/// next lap. Trailing samples after the last beacon form one final lap.
/// Durations come from the beacon intervals themselves.
fn segment_by_beacons(points: Vec<TelemetryPoint>,
                      beacons: &[f64])
                      -> Vec<Lap> {
  let mut laps: Vec<Lap> = Vec::new();
  let mut current: Vec<TelemetryPoint> = Vec::new();
  let mut lap_start = points[0].time();
  let mut pending = beacons.iter();
  let mut next_beacon = pending.next();

  for point in points {
    while let Some(&beacon) = next_beacon {
      if point.time() < beacon {
        break;
      }
      // consecutive beacons with no samples in between produce an empty
      // candidate, which is dropped without consuming a lap number
      if !current.is_empty() {
        laps.push(Lap::new(laps.len() + 1,
                           beacon - lap_start,
                           std::mem::take(&mut current)));
      }
      lap_start = beacon;
      next_beacon = pending.next();
    }
    current.push(point);
  }

  if let Some(last) = current.last() {
    let duration = last.time() - lap_start;
    laps.push(Lap::new(laps.len() + 1, duration, current));
  }

  debug!("segmented {} beacon-bounded laps", laps.len());
  laps
}

/// Walks consecutive sample pairs and closes the current lap on an
/// odometer reset or a time gap longer than the configured threshold.
/// Candidates at or below the minimum lap duration are discarded entirely,
/// never merged into a neighbor; survivors are numbered sequentially, so
/// the numbering stays gapless across drops.
fn segment_heuristic(points: Vec<TelemetryPoint>,
                     config: &Config)
                     -> Vec<Lap> {
  let mut candidates: Vec<Vec<TelemetryPoint>> = Vec::new();
  let mut current: Vec<TelemetryPoint> = Vec::new();

  for point in points {
    let close = match current.last() {
      Some(previous) => {
        let odometer_reset = point.distance() < previous.distance();
        let time_gap = point.time() - previous.time() > config.lap_gap_secs;
        odometer_reset || time_gap
      }
      None => false,
    };
    if close {
      candidates.push(std::mem::take(&mut current));
    }
    current.push(point);
  }
  if !current.is_empty() {
    candidates.push(current);
  }

  let mut laps: Vec<Lap> = Vec::new();
  for candidate in candidates {
    let duration = match (candidate.first(), candidate.last()) {
      (Some(first), Some(last)) => last.time() - first.time(),
      _ => continue,
    };
    if duration <= config.min_lap_secs {
      debug!("dropping {:.3}s candidate lap below {:.0}s minimum",
             duration, config.min_lap_secs);
      continue;
    }
    laps.push(Lap::new(laps.len() + 1, duration, candidate));
  }

  debug!("segmented {} heuristic laps", laps.len());
  laps
}


#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;


  fn points(samples: &[(f64, f64)]) -> Vec<TelemetryPoint> {
    samples.iter()
           .map(|&(time, distance)| TelemetryPoint::new(time, distance))
           .collect()
  }

  #[test]
  fn no_samples_no_laps_test() {
    let laps = segment(Vec::new(), &[10.0], &Config::default());
    assert_eq!(0, laps.len());
    let laps = segment(Vec::new(), &[], &Config::default());
    assert_eq!(0, laps.len());
  }

  #[test]
  fn beacon_bounded_test() {
    // samples every second from 0 to 25, beacons at 10 and 20
    let samples: Vec<(f64, f64)> =
      (0..26).map(|i| (i as f64, i as f64 * 30.0)).collect();
    let laps = segment(points(&samples), &[10.0, 20.0], &Config::default());

    assert_eq!(3, laps.len());
    assert_eq!(1, laps[0].number());
    assert_eq!(10, laps[0].len());
    assert_eq!(9.0, laps[0].points().last().unwrap().time());
    assert_eq!(10.0, laps[0].duration());

    assert_eq!(2, laps[1].number());
    assert_eq!(10.0, laps[1].points()[0].time());
    assert_eq!(19.0, laps[1].points().last().unwrap().time());
    assert_eq!(10.0, laps[1].duration());

    assert_eq!(3, laps[2].number());
    assert_eq!(20.0, laps[2].points()[0].time());
    assert_eq!(25.0, laps[2].points().last().unwrap().time());
    assert_eq!(5.0, laps[2].duration());
  }

  #[test]
  fn beacon_bounded_keeps_short_laps_test() {
    let samples: Vec<(f64, f64)> =
      (0..30).map(|i| (i as f64, i as f64 * 30.0)).collect();
    // a 2 second beacon interval is way below the heuristic minimum but
    // beacons are ground truth, so the lap stays
    let laps = segment(points(&samples), &[25.0, 27.0], &Config::default());
    assert_eq!(3, laps.len());
    assert_eq!(2.0, laps[1].duration());
  }

  #[test]
  fn single_beacon_trailing_lap_test() {
    let samples: Vec<(f64, f64)> =
      (0..12).map(|i| (i as f64, i as f64 * 30.0)).collect();
    let laps = segment(points(&samples), &[100.0], &Config::default());
    // beacon never reached: all samples end up in one trailing lap
    assert_eq!(1, laps.len());
    assert_eq!(12, laps[0].len());
    assert_eq!(11.0, laps[0].duration());
  }

  #[test]
  fn heuristic_odometer_reset_test() {
    // distance resets at 90 -> 5; both halves span more than the minimum
    let samples = [(0.0, 0.0),
                   (4.0, 30.0),
                   (8.0, 60.0),
                   (12.0, 90.0),
                   (12.5, 5.0),
                   (16.5, 35.0),
                   (20.5, 65.0),
                   (24.5, 95.0)];
    let laps = segment(points(&samples), &[], &Config::default());

    assert_eq!(2, laps.len());
    assert_eq!(4, laps[0].len());
    assert_eq!(12.0, laps[0].duration());
    assert_eq!(4, laps[1].len());
    assert_eq!(12.0, laps[1].duration());
  }

  #[test]
  fn heuristic_time_gap_test() {
    let samples = [(0.0, 0.0),
                   (4.0, 40.0),
                   (8.0, 80.0),
                   (11.0, 110.0),
                   // 6 second hole in the recording
                   (17.0, 120.0),
                   (21.0, 160.0),
                   (25.0, 200.0),
                   (29.0, 240.0)];
    let laps = segment(points(&samples), &[], &Config::default());

    assert_eq!(2, laps.len());
    assert_eq!(11.0, laps[0].duration());
    assert_eq!(12.0, laps[1].duration());
  }

  #[test]
  fn heuristic_drops_short_candidates_without_gaps_in_numbering_test() {
    // middle candidate lasts 4 seconds and disappears; survivors are
    // numbered 1 and 2, not 1 and 3
    let samples = [(0.0, 0.0),
                   (4.0, 100.0),
                   (8.0, 200.0),
                   (11.0, 300.0),
                   (12.0, 10.0),
                   (16.0, 200.0),
                   (16.5, 5.0),
                   (20.0, 100.0),
                   (24.0, 200.0),
                   (28.0, 280.0)];
    let laps = segment(points(&samples), &[], &Config::default());

    assert_eq!(2, laps.len());
    assert_eq!(1, laps[0].number());
    assert_eq!(11.0, laps[0].duration());
    assert_eq!(2, laps[1].number());
    assert_eq!(11.5, laps[1].duration());
  }

  #[test]
  fn heuristic_single_lap_without_resets_test() {
    let samples: Vec<(f64, f64)> =
      (0..16).map(|i| (i as f64, i as f64 * 25.0)).collect();
    let laps = segment(points(&samples), &[], &Config::default());
    assert_eq!(1, laps.len());
    assert_eq!(16, laps[0].len());
    assert_eq!(15.0, laps[0].duration());
  }

  #[test]
  fn heuristic_all_candidates_too_short_test() {
    let samples = [(0.0, 0.0), (4.0, 100.0), (5.0, 10.0), (8.0, 90.0)];
    let laps = segment(points(&samples), &[], &Config::default());
    assert_eq!(0, laps.len());
  }
}
