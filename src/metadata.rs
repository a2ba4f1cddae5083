// Copyright 2021 bmc::labs Gmbh. All rights reserved.
//
// Authors:
//   Florian Eich <florian@bmc-labs.com>
//   Jonas Reitemeyer <alumni@bmc-labs.com>

use super::columns::strip;
use chrono::{NaiveDate, NaiveDateTime};
use lazy_static::lazy_static;


const DATETIME_FORMAT: &str = "%d/%m/%Y %H:%M:%S";
const DATE_FORMAT: &str = "%d/%m/%Y";


#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum MetaKey {
  Track,
  Racer,
  Vehicle,
  Championship,
  SessionName,
  Date,
}

lazy_static! {
  /// Ordered key synonym table, matched case-insensitively. First match
  /// wins. Exporters label the track line "Session" or "Track" depending
  /// on revision; both land on the track field.
  static ref KEY_SYNONYMS: Vec<(MetaKey, &'static [&'static str])> = vec![
    (MetaKey::Track, &["session", "track"]),
    (MetaKey::Racer, &["racer", "driver"]),
    (MetaKey::Vehicle, &["vehicle", "kart"]),
    (MetaKey::Championship, &["championship"]),
    (MetaKey::SessionName, &["session name", "name"]),
    (MetaKey::Date, &["date"]),
  ];
}


/// Free-form metadata recovered from the lines preceding the header row.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct SessionMeta {
  pub(crate) track:        Option<String>,
  pub(crate) racer:        Option<String>,
  pub(crate) vehicle:      Option<String>,
  pub(crate) championship: Option<String>,
  pub(crate) session_name: Option<String>,
  pub(crate) date:         Option<NaiveDateTime>,
}

/// Scans `lines` for `key,value` or `key: value` shaped entries. Unknown
/// keys are ignored, lines with fewer than two parts are skipped, and a
/// date that fails to parse leaves the date unset. Nothing here is ever
/// fatal.
pub(crate) fn extract(lines: &[&str]) -> SessionMeta {
  let mut meta = SessionMeta::default();

  for line in lines {
    let (key, value) = match split_key_value(line) {
      Some(pair) => pair,
      None => continue,
    };

    let key = strip(key);
    let value = strip(value);
    if value.is_empty() {
      continue;
    }

    let matched = KEY_SYNONYMS.iter().find(|(_, names)| {
                                       names.iter().any(|name| {
                                                     name.eq_ignore_ascii_case(key)
                                                   })
                                     });

    match matched {
      Some((MetaKey::Track, _)) => {
        meta.track.get_or_insert_with(|| value.to_string());
      }
      Some((MetaKey::Racer, _)) => {
        meta.racer.get_or_insert_with(|| value.to_string());
      }
      Some((MetaKey::Vehicle, _)) => {
        meta.vehicle.get_or_insert_with(|| value.to_string());
      }
      Some((MetaKey::Championship, _)) => {
        meta.championship.get_or_insert_with(|| value.to_string());
      }
      Some((MetaKey::SessionName, _)) => {
        meta.session_name.get_or_insert_with(|| value.to_string());
      }
      Some((MetaKey::Date, _)) => {
        if meta.date.is_none() {
          meta.date = parse_date(value);
        }
      }
      None => {}
    }
  }

  meta
}

/// Splits a metadata line on its first comma, falling back to the first
/// colon for `key: value` shaped lines.
fn split_key_value(line: &str) -> Option<(&str, &str)> {
  if let Some(index) = line.find(',') {
    return Some((&line[..index], &line[index + 1..]));
  }
  if let Some(index) = line.find(':') {
    return Some((&line[..index], &line[index + 1..]));
  }
  None
}

fn parse_date(value: &str) -> Option<NaiveDateTime> {
  if let Ok(datetime) = NaiveDateTime::parse_from_str(value, DATETIME_FORMAT)
  {
    return Some(datetime);
  }
  NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
                                               .and_then(|date| {
                                                 date.and_hms_opt(0, 0, 0)
                                               })
}


#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;


  #[test]
  fn extract_test() {
    let lines = ["Track,Circuit Osona",
                 "Racer,017",
                 "Vehicle,X30 Senior",
                 "Championship,CCV 2021",
                 "Session Name,Q2",
                 "Date,14/11/2021 16:49:39"];
    let meta = extract(&lines);

    assert_eq!(Some("Circuit Osona".to_string()), meta.track);
    assert_eq!(Some("017".to_string()), meta.racer);
    assert_eq!(Some("X30 Senior".to_string()), meta.vehicle);
    assert_eq!(Some("CCV 2021".to_string()), meta.championship);
    assert_eq!(Some("Q2".to_string()), meta.session_name);
    assert_eq!("2021-11-14 16:49:39",
               meta.date.unwrap().to_string());
  }

  #[test]
  fn colon_shape_and_case_insensitive_keys_test() {
    let lines = ["TRACK: Circuit Osona", "racer: 017"];
    let meta = extract(&lines);
    assert_eq!(Some("Circuit Osona".to_string()), meta.track);
    assert_eq!(Some("017".to_string()), meta.racer);
  }

  #[test]
  fn session_key_maps_to_track_test() {
    let meta = extract(&["Session,Circuit Osona"]);
    assert_eq!(Some("Circuit Osona".to_string()), meta.track);
  }

  #[test]
  fn quoted_values_are_stripped_test() {
    let meta = extract(&["\"Track\",\" Circuit Osona \""]);
    assert_eq!(Some("Circuit Osona".to_string()), meta.track);
  }

  #[test]
  fn date_only_format_test() {
    let meta = extract(&["Date,14/11/2021"]);
    assert_eq!("2021-11-14 00:00:00", meta.date.unwrap().to_string());
  }

  #[test]
  fn bad_date_leaves_date_unset_test() {
    let meta = extract(&["Date,yesterday-ish", "Track,Circuit Osona"]);
    assert_eq!(None, meta.date);
    assert_eq!(Some("Circuit Osona".to_string()), meta.track);
  }

  #[test]
  fn unknown_keys_and_short_lines_are_skipped_test() {
    let lines = ["Firmware,2.24.11", "justoneword", "", "Racer,017"];
    let meta = extract(&lines);
    assert_eq!(None, meta.track);
    assert_eq!(Some("017".to_string()), meta.racer);
  }

  #[test]
  fn first_value_wins_test() {
    let meta = extract(&["Track,Circuit Osona", "Session,Somewhere Else"]);
    assert_eq!(Some("Circuit Osona".to_string()), meta.track);
  }
}
