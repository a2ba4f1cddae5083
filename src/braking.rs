// Copyright 2021 bmc::labs Gmbh. All rights reserved.
//
// Authors:
//   Florian Eich <florian@bmc-labs.com>
//   Jonas Reitemeyer <alumni@bmc-labs.com>

use super::{Config, Error, Lap, Result};
use getset::CopyGetters;
use serde::{Deserialize, Serialize};


/// One detected braking zone, summarized from the samples between the
/// opening and closing thresholds.
///
/// Derived data: recomputed from the lap on every call and never stored
/// independently of the samples it came from. Indices refer into the lap's
/// sample sequence.
#[derive(Clone, Copy, Debug, PartialEq, CopyGetters, Deserialize,
         Serialize)]
#[getset(get_copy = "pub")]
pub struct BrakingZone {
  start_index:   usize,
  end_index:     usize,
  /// Speed at the sample that opened the zone, in km/h.
  entry_speed:   f64,
  /// Minimum speed observed while the zone was open, in km/h.
  min_speed:     f64,
  /// Peak absolute longitudinal acceleration while open, in G.
  peak_decel_g:  f64,
  /// Distance at close minus distance at open, in meters.
  distance_span: f64,
}


struct OpenZone {
  start_index:    usize,
  start_distance: f64,
  entry_speed:    f64,
  min_speed:      f64,
  peak_decel_g:   f64,
}

impl OpenZone {
  fn close(self, end_index: usize, end_distance: f64) -> BrakingZone {
    BrakingZone { start_index:   self.start_index,
                  end_index,
                  entry_speed:   self.entry_speed,
                  min_speed:     self.min_speed,
                  peak_decel_g:  self.peak_decel_g,
                  distance_span: end_distance - self.start_distance, }
  }
}


/// Scans a lap's samples left to right for braking zones.
///
/// A zone opens while longitudinal acceleration is below the configured
/// deceleration threshold, or, in the speed-drop variant, while the
/// sample-to-sample speed drop exceeds the configured value under the
/// softer deceleration gate. It closes on the first sample no longer
/// satisfying the condition. Samples missing speed or longitudinal
/// acceleration neither open nor close a zone. A zone still open at the
/// end of the lap is closed on the last participating sample.
///
/// Pure function of the lap: no caching, safe to call concurrently.
/// Calling it on an empty lap is a contract violation.
pub fn detect_braking_zones(lap: &Lap,
                            config: &Config)
                            -> Result<Vec<BrakingZone>> {
  if lap.is_empty() {
    return Err(Error::EmptyLap { number: lap.number() });
  }

  let points = lap.points();
  let mut zones = Vec::new();
  let mut open: Option<OpenZone> = None;
  let mut last_seen: Option<(usize, f64)> = None;

  for (index, point) in points.iter().enumerate() {
    let (speed, lon_accel) = match (point.speed(), point.lon_accel()) {
      (Some(speed), Some(lon_accel)) => (speed, lon_accel),
      _ => continue,
    };
    last_seen = Some((index, point.distance()));

    let braking = if config.braking_by_speed_drop {
      let drop = points.get(index + 1)
                       .and_then(|next| next.speed())
                       .map(|next_speed| next_speed - speed);
      matches!(drop, Some(drop) if drop < -config.braking_speed_drop_kmh)
      && lon_accel < -config.braking_soft_decel_g
    } else {
      lon_accel < -config.braking_decel_g
    };

    if braking {
      match open.as_mut() {
        None => {
          open = Some(OpenZone { start_index:    index,
                                 start_distance: point.distance(),
                                 entry_speed:    speed,
                                 min_speed:      speed,
                                 peak_decel_g:   lon_accel.abs(), });
        }
        Some(zone) => {
          zone.min_speed = zone.min_speed.min(speed);
          zone.peak_decel_g = zone.peak_decel_g.max(lon_accel.abs());
        }
      }
    } else if let Some(zone) = open.take() {
      zones.push(zone.close(index, point.distance()));
    }
  }

  if let (Some(zone), Some((index, distance))) = (open, last_seen) {
    zones.push(zone.close(index, distance));
  }

  Ok(zones)
}


#[cfg(test)]
mod tests {
  use super::{super::TelemetryPoint, *};
  use pretty_assertions::assert_eq;


  fn point(time: f64,
           distance: f64,
           speed: Option<f64>,
           lon_accel: Option<f64>)
           -> TelemetryPoint {
    TelemetryPoint { speed,
                     lon_accel,
                     ..TelemetryPoint::new(time, distance) }
  }

  fn lap(points: Vec<TelemetryPoint>) -> Lap {
    Lap::new(1, 60.0, points)
  }

  #[test]
  fn empty_lap_is_a_contract_violation_test() {
    let result = detect_braking_zones(&lap(Vec::new()), &Config::default());
    assert_eq!(Err(Error::EmptyLap { number: 1 }), result);
  }

  #[test]
  fn detects_one_zone_test() {
    let points = vec![point(0.0, 0.0, Some(95.0), Some(0.1)),
                      point(0.5, 13.0, Some(92.0), Some(-0.8)),
                      point(1.0, 25.0, Some(74.0), Some(-1.2)),
                      point(1.5, 34.0, Some(58.0), Some(-0.9)),
                      point(2.0, 41.0, Some(55.0), Some(0.0)),
                      point(2.5, 49.0, Some(61.0), Some(0.3))];
    let zones =
      detect_braking_zones(&lap(points), &Config::default()).unwrap();

    assert_eq!(1, zones.len());
    let zone = zones[0];
    assert_eq!(1, zone.start_index());
    assert_eq!(4, zone.end_index());
    assert_eq!(92.0, zone.entry_speed());
    assert_eq!(58.0, zone.min_speed());
    assert_eq!(1.2, zone.peak_decel_g());
    assert_eq!(28.0, zone.distance_span());
    assert_eq!(true, zone.min_speed() <= zone.entry_speed());
  }

  #[test]
  fn samples_missing_channels_neither_open_nor_close_test() {
    let points = vec![point(0.0, 0.0, Some(90.0), Some(-0.9)),
                      // no channels at all: the open zone survives this
                      point(0.5, 12.0, None, None),
                      point(1.0, 24.0, Some(70.0), Some(-1.1)),
                      point(1.5, 33.0, Some(66.0), Some(0.2))];
    let zones =
      detect_braking_zones(&lap(points), &Config::default()).unwrap();

    assert_eq!(1, zones.len());
    assert_eq!(0, zones[0].start_index());
    assert_eq!(3, zones[0].end_index());
    assert_eq!(70.0, zones[0].min_speed());
  }

  #[test]
  fn adjacent_open_close_emits_zone_test() {
    let points = vec![point(0.0, 0.0, Some(90.0), Some(0.1)),
                      point(0.5, 12.0, Some(88.0), Some(-0.7)),
                      point(1.0, 24.0, Some(87.0), Some(0.1))];
    let zones =
      detect_braking_zones(&lap(points), &Config::default()).unwrap();

    assert_eq!(1, zones.len());
    assert_eq!(1, zones[0].start_index());
    assert_eq!(2, zones[0].end_index());
  }

  #[test]
  fn zone_open_at_lap_end_is_closed_on_last_sample_test() {
    let points = vec![point(0.0, 0.0, Some(90.0), Some(0.1)),
                      point(0.5, 12.0, Some(80.0), Some(-0.9)),
                      point(1.0, 22.0, Some(68.0), Some(-1.0))];
    let zones =
      detect_braking_zones(&lap(points), &Config::default()).unwrap();

    assert_eq!(1, zones.len());
    assert_eq!(1, zones[0].start_index());
    assert_eq!(2, zones[0].end_index());
    assert_eq!(10.0, zones[0].distance_span());
  }

  #[test]
  fn below_threshold_deceleration_is_not_braking_test() {
    let points = vec![point(0.0, 0.0, Some(90.0), Some(-0.3)),
                      point(0.5, 12.0, Some(88.0), Some(-0.4)),
                      point(1.0, 24.0, Some(86.0), Some(-0.2))];
    let zones =
      detect_braking_zones(&lap(points), &Config::default()).unwrap();
    assert_eq!(0, zones.len());
  }

  #[test]
  fn speed_drop_variant_test() {
    let config = Config { braking_by_speed_drop: true,
                          ..Config::default() };
    // coasting decelerations below the soft gate do not open a zone even
    // with a big speed drop; both conditions must hold
    let points = vec![point(0.0, 0.0, Some(95.0), Some(-0.2)),
                      point(0.5, 13.0, Some(88.0), Some(-0.5)),
                      point(1.0, 24.0, Some(70.0), Some(-0.6)),
                      point(1.5, 33.0, Some(55.0), Some(-0.1)),
                      point(2.0, 40.0, Some(54.0), Some(0.0))];
    let zones = detect_braking_zones(&lap(points), &config).unwrap();

    assert_eq!(1, zones.len());
    assert_eq!(1, zones[0].start_index());
    assert_eq!(3, zones[0].end_index());
    assert_eq!(88.0, zones[0].entry_speed());
  }
}
