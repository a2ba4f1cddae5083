// Copyright 2021 bmc::labs Gmbh. All rights reserved.
//
// Authors:
//   Florian Eich <florian@bmc-labs.com>
//   Jonas Reitemeyer <alumni@bmc-labs.com>

use getset::CopyGetters;
use serde::{Deserialize, Serialize};


/// One telemetry sample: the state of every recorded channel at one instant.
///
/// `time` and `distance` are mandatory and always present; every other
/// channel is optional because exporters omit channels freely and single
/// fields fail to parse in the wild. An absent channel is `None`, never a
/// silently defaulted zero - aggregations downstream must decide explicitly
/// how to treat absence. Points are immutable once constructed and belong to
/// exactly one lap after segmentation.
#[derive(Clone, Debug, Default, PartialEq, CopyGetters, Deserialize,
         Serialize)]
#[getset(get_copy = "pub")]
pub struct TelemetryPoint {
  /// Seconds since session start.
  pub(crate) time:              f64,
  /// Meters since session start. Resets to zero at lap boundaries on
  /// exporters which rebase their odometer.
  pub(crate) distance:          f64,
  /// Speed in km/h.
  pub(crate) speed:             Option<f64>,
  pub(crate) latitude:          Option<f64>,
  pub(crate) longitude:         Option<f64>,
  /// Altitude in meters.
  pub(crate) altitude:          Option<f64>,
  pub(crate) satellite_count:   Option<u32>,
  /// Heading in degrees.
  pub(crate) heading:           Option<f64>,
  pub(crate) position_accuracy: Option<f64>,
  pub(crate) speed_accuracy:    Option<f64>,
  /// Lateral acceleration in G. Positive means a right-hand turn.
  pub(crate) lat_accel:         Option<f64>,
  /// Longitudinal acceleration in G. Negative means braking.
  pub(crate) lon_accel:         Option<f64>,
  /// Road slope in degrees.
  pub(crate) slope:             Option<f64>,
  /// Yaw rate in degrees per second.
  pub(crate) yaw_rate:          Option<f64>,
  /// Instantaneous turn radius in meters.
  pub(crate) turn_radius:       Option<f64>,
  pub(crate) rpm:               Option<f64>,
  /// Exhaust gas temperature in degrees Celsius.
  pub(crate) exhaust_temp:      Option<f64>,
  /// Water temperature in degrees Celsius.
  pub(crate) water_temp:        Option<f64>,
  pub(crate) accel_x:           Option<f64>,
  pub(crate) accel_y:           Option<f64>,
  pub(crate) accel_z:           Option<f64>,
  pub(crate) gyro_x:            Option<f64>,
  pub(crate) gyro_y:            Option<f64>,
  pub(crate) gyro_z:            Option<f64>,
  /// Internal logger temperature in degrees Celsius.
  pub(crate) logger_temp:       Option<f64>,
  pub(crate) battery_voltage:   Option<f64>,
}

impl TelemetryPoint {
  /// Creates a point carrying only the mandatory channels. Intended for
  /// callers assembling synthetic laps; the parser builds points directly
  /// from decoded rows.
  pub fn new(time: f64, distance: f64) -> Self {
    Self { time,
           distance,
           ..Self::default() }
  }

  /// True if the sample carries a GPS fix, i.e. both coordinates.
  pub fn has_fix(&self) -> bool {
    self.latitude.is_some() && self.longitude.is_some()
  }
}
