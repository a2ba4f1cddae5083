// Copyright 2021 bmc::labs Gmbh. All rights reserved.
//
// Authors:
//   Florian Eich <florian@bmc-labs.com>
//   Jonas Reitemeyer <alumni@bmc-labs.com>

use lazy_static::lazy_static;
use std::collections::HashMap;


/// Canonical telemetry channels this library understands.
///
/// Exported files name their columns differently depending on firmware and
/// locale; resolution maps whatever the header says onto this fixed set.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ChannelId {
  Time,
  Distance,
  Speed,
  Latitude,
  Longitude,
  Altitude,
  SatelliteCount,
  Heading,
  PositionAccuracy,
  SpeedAccuracy,
  LatAccel,
  LonAccel,
  Slope,
  YawRate,
  TurnRadius,
  Rpm,
  ExhaustTemp,
  WaterTemp,
  AccelX,
  AccelY,
  AccelZ,
  GyroX,
  GyroY,
  GyroZ,
  LoggerTemp,
  BatteryVoltage,
}


lazy_static! {
  /// Ordered synonym table: for each channel, the column names under which
  /// exporter variants ship it. First name present in the header wins, so
  /// more specific names come first. The table is data, not code - tests
  /// enumerate it.
  static ref SYNONYMS: Vec<(ChannelId, &'static [&'static str])> = vec![
    (ChannelId::Time, &["Time", "time", "Timestamp"]),
    (ChannelId::Distance, &["Distance", "GPS Distance", "distance"]),
    (ChannelId::Speed, &["GPS Speed", "Speed", "speed"]),
    (ChannelId::Latitude, &["GPS Latitude", "Latitude", "lat"]),
    (ChannelId::Longitude, &["GPS Longitude", "Longitude", "lon"]),
    (ChannelId::Altitude, &["GPS Altitude", "Altitude"]),
    (ChannelId::SatelliteCount, &["GPS Nsat", "Satellites"]),
    (ChannelId::Heading, &["GPS Heading", "Heading"]),
    (ChannelId::PositionAccuracy, &["GPS PosAccuracy"]),
    (ChannelId::SpeedAccuracy, &["GPS SpdAccuracy"]),
    (ChannelId::LatAccel, &["GPS LatAcc", "LatAcc", "Lateral Acc"]),
    (ChannelId::LonAccel, &["GPS LonAcc", "LonAcc", "Longitudinal Acc"]),
    (ChannelId::Slope, &["GPS Slope", "Slope"]),
    (ChannelId::YawRate, &["GPS Gyro", "Yaw Rate"]),
    (ChannelId::TurnRadius, &["GPS Radius", "Radius"]),
    (ChannelId::Rpm, &["RPM", "fEngRpm", "Engine"]),
    (ChannelId::ExhaustTemp, &["EGT", "Exhaust Temp", "tExhaust"]),
    (ChannelId::WaterTemp, &["Water Temp", "tWater", "H2O"]),
    (ChannelId::AccelX, &["AccelerometerX", "AccX"]),
    (ChannelId::AccelY, &["AccelerometerY", "AccY"]),
    (ChannelId::AccelZ, &["AccelerometerZ", "AccZ"]),
    (ChannelId::GyroX, &["GyroX"]),
    (ChannelId::GyroY, &["GyroY"]),
    (ChannelId::GyroZ, &["GyroZ"]),
    (ChannelId::LoggerTemp, &["Logger Temperature", "LoggerTemp"]),
    (ChannelId::BatteryVoltage, &["External Voltage", "Battery", "VBat"]),
  ];
}


/// Strips surrounding whitespace and quote characters from a field. Every
/// field and metadata key in these files passes through here; no
/// comma-inside-quotes escaping exists in the format, so this is the whole
/// quote story.
pub(crate) fn strip(field: &str) -> &str {
  field.trim()
       .trim_matches(|c| c == '"' || c == '\'')
       .trim()
}

/// True if `field` names the time channel. Used by the parser to recognize
/// the header row.
pub(crate) fn is_time_name(field: &str) -> bool {
  let (id, names) = &SYNONYMS[0];
  debug_assert_eq!(ChannelId::Time, *id);
  names.iter().any(|name| name.eq_ignore_ascii_case(field))
}


/// Maps canonical channels to column indices for one file's header.
///
/// Resolution never fails: a channel none of whose synonyms appear in the
/// header is simply absent for the whole file, which is the normal state of
/// affairs for most channels on most exporters.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ColumnMap {
  indices: HashMap<ChannelId, usize>,
  width:   usize,
}

impl ColumnMap {
  /// Resolves a split header row. Matching is exact and case-sensitive
  /// after stripping whitespace and quotes; per channel, the first synonym
  /// found in the header wins.
  pub fn resolve(header: &[&str]) -> Self {
    let stripped: Vec<&str> =
      header.iter().map(|field| strip(field)).collect();

    let mut indices = HashMap::new();
    for (id, names) in SYNONYMS.iter() {
      let index = names.iter().find_map(|name| {
                                 stripped.iter()
                                         .position(|field| field == name)
                               });
      if let Some(index) = index {
        indices.insert(*id, index);
      }
    }

    Self { indices,
           width: header.len() }
  }

  /// Column index of `id`, or `None` if the file does not carry it.
  pub fn index_of(&self, id: ChannelId) -> Option<usize> {
    self.indices.get(&id).copied()
  }

  /// Field count of the header row this map was resolved from.
  pub fn width(&self) -> usize {
    self.width
  }
}
