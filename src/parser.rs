// Copyright 2021 bmc::labs Gmbh. All rights reserved.
//
// Authors:
//   Florian Eich <florian@bmc-labs.com>
//   Jonas Reitemeyer <alumni@bmc-labs.com>

use super::{columns::{is_time_name, strip, ChannelId, ColumnMap},
            metadata,
            segment,
            Config,
            Error,
            Result,
            Session,
            TelemetryPoint};
use getset::CopyGetters;
use log::debug;


/// Developer-diagnostic row counters for one parse. `decoded() +
/// skipped() == total_rows()` always holds; skipped rows are not surfaced
/// to end users.
#[derive(Clone, Copy, Debug, Default, PartialEq, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct ParseStats {
  total_rows: usize,
  decoded:    usize,
  skipped:    usize,
}


/// Parses one exported file into a [`Session`] using the default
/// configuration.
pub fn parse(bytes: &[u8]) -> Result<Session> {
  parse_with(bytes, &Config::default())
}

/// Parses one exported file into a [`Session`].
pub fn parse_with(bytes: &[u8], config: &Config) -> Result<Session> {
  parse_with_stats(bytes, config).map(|(session, _)| session)
}

/// Parses one exported file into a [`Session`], also returning row
/// counters.
///
/// Only three conditions abort a parse: bytes that are not text
/// ([`Error::InvalidFormat`]), no recognizable header row
/// ([`Error::MissingHeaders`]), and zero decodable data rows
/// ([`Error::NoValidData`]). Everything else - broken individual rows,
/// absent channels, a missing beacon line, missing metadata - degrades
/// gracefully.
pub fn parse_with_stats(bytes: &[u8],
                        config: &Config)
                        -> Result<(Session, ParseStats)> {
  let text = decode_text(bytes)?;
  let lines: Vec<&str> = text.lines()
                             .map(str::trim)
                             .filter(|line| !line.is_empty())
                             .collect();

  // LOCATE HEADER --------------------------------------------------------- //
  // the header is the first line starting with a time-channel name which
  // also has enough columns; the column minimum guards against short
  // metadata lines that happen to start with "Time"
  let header_index =
    lines.iter()
         .position(|line| {
           let fields: Vec<&str> = line.split(',').collect();
           fields.len() >= config.min_header_columns
           && is_time_name(strip(fields[0]))
         })
         .ok_or(Error::MissingHeaders)?;

  // METADATA AND BEACONS -------------------------------------------------- //
  let meta_end = header_index.min(config.metadata_lines);
  let meta = metadata::extract(&lines[..meta_end]);
  let beacons = beacon_times(&lines[..header_index]);

  // DATA ROWS ------------------------------------------------------------- //
  let header: Vec<&str> = lines[header_index].split(',').collect();
  let columns = ColumnMap::resolve(&header);

  // data rows start two lines after the header: the line immediately after
  // it is the units row and is skipped regardless of content
  let data_start = (header_index + 2).min(lines.len());

  let mut points = Vec::new();
  let mut skipped = 0usize;
  for row in &lines[data_start..] {
    let fields: Vec<&str> = row.split(',').collect();
    if fields.len() != columns.width() {
      skipped += 1;
      continue;
    }
    match decode_row(&fields, &columns) {
      Some(point) => points.push(point),
      None => skipped += 1,
    }
  }

  let stats = ParseStats { total_rows: points.len() + skipped,
                           decoded:    points.len(),
                           skipped };
  debug!("decoded {} of {} data rows ({} skipped)",
         stats.decoded, stats.total_rows, stats.skipped);

  if points.is_empty() {
    return Err(Error::NoValidData);
  }

  // SEGMENTATION ---------------------------------------------------------- //
  let laps = segment::segment(points, &beacons, config);
  Ok((Session::new(meta, laps), stats))
}

/// Decodes the byte buffer as text, trying UTF-8 first and falling back to
/// Latin-1. Bytes containing NUL are treated as binary, not text.
fn decode_text(bytes: &[u8]) -> Result<String> {
  if let Ok(text) = std::str::from_utf8(bytes) {
    return Ok(text.to_string());
  }
  if bytes.contains(&0) {
    return Err(Error::InvalidFormat);
  }
  Ok(bytes.iter().map(|&byte| byte as char).collect())
}

/// Finds the beacon marker line, if any, and returns its crossing times in
/// seconds. Exporters write them in ascending order after the label field.
/// No beacon line means heuristic segmentation, which is not an error.
fn beacon_times(lines: &[&str]) -> Vec<f64> {
  for line in lines {
    if line.to_ascii_lowercase().contains("beacon markers") {
      return line.split(',')
                 .skip(1)
                 .filter_map(|token| strip(token).parse().ok())
                 .collect();
    }
  }
  Vec::new()
}

/// Decodes one data row into a sample. `None` rejects the whole row, which
/// happens on an unparseable mandatory field (time or distance) or on a
/// (0, 0) GPS fix. A single bad optional field only degrades that channel
/// to absent.
fn decode_row(fields: &[&str], columns: &ColumnMap) -> Option<TelemetryPoint> {
  let time = field_f64(fields, columns, ChannelId::Time)?;
  let distance = field_f64(fields, columns, ChannelId::Distance)?;

  let latitude = field_f64(fields, columns, ChannelId::Latitude);
  let longitude = field_f64(fields, columns, ChannelId::Longitude);
  // (0, 0) is the exporter's "no fix yet" marker, not a position off the
  // coast of Ghana. only rejected when both coordinates are present.
  if latitude == Some(0.0) && longitude == Some(0.0) {
    return None;
  }

  Some(TelemetryPoint {
    time,
    distance,
    speed: field_f64(fields, columns, ChannelId::Speed),
    latitude,
    longitude,
    altitude: field_f64(fields, columns, ChannelId::Altitude),
    satellite_count: field_u32(fields, columns, ChannelId::SatelliteCount),
    heading: field_f64(fields, columns, ChannelId::Heading),
    position_accuracy: field_f64(fields, columns, ChannelId::PositionAccuracy),
    speed_accuracy: field_f64(fields, columns, ChannelId::SpeedAccuracy),
    lat_accel: field_f64(fields, columns, ChannelId::LatAccel),
    lon_accel: field_f64(fields, columns, ChannelId::LonAccel),
    slope: field_f64(fields, columns, ChannelId::Slope),
    yaw_rate: field_f64(fields, columns, ChannelId::YawRate),
    turn_radius: field_f64(fields, columns, ChannelId::TurnRadius),
    rpm: field_f64(fields, columns, ChannelId::Rpm),
    exhaust_temp: field_f64(fields, columns, ChannelId::ExhaustTemp),
    water_temp: field_f64(fields, columns, ChannelId::WaterTemp),
    accel_x: field_f64(fields, columns, ChannelId::AccelX),
    accel_y: field_f64(fields, columns, ChannelId::AccelY),
    accel_z: field_f64(fields, columns, ChannelId::AccelZ),
    gyro_x: field_f64(fields, columns, ChannelId::GyroX),
    gyro_y: field_f64(fields, columns, ChannelId::GyroY),
    gyro_z: field_f64(fields, columns, ChannelId::GyroZ),
    logger_temp: field_f64(fields, columns, ChannelId::LoggerTemp),
    battery_voltage: field_f64(fields, columns, ChannelId::BatteryVoltage),
  })
}

fn field_f64(fields: &[&str],
             columns: &ColumnMap,
             id: ChannelId)
             -> Option<f64> {
  columns.index_of(id)
         .and_then(|index| fields.get(index))
         .and_then(|field| strip(field).parse().ok())
}

fn field_u32(fields: &[&str],
             columns: &ColumnMap,
             id: ChannelId)
             -> Option<u32> {
  columns.index_of(id)
         .and_then(|index| fields.get(index))
         .and_then(|field| strip(field).parse().ok())
}
