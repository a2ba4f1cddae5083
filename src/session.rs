// Copyright 2021 bmc::labs Gmbh. All rights reserved.
//
// Authors:
//   Jonas Reitemeyer <alumni@bmc-labs.com>
//   Florian Eich <florian@bmc-labs.com>

use super::{metadata::SessionMeta, Lap};
use chrono::NaiveDateTime;
use getset::{CopyGetters, Getters};
use serde::{Deserialize, Serialize};


/// Holds all information and data corresponding to one recorded session.
///
/// A session is the unit handed to storage and presentation collaborators.
/// It owns its laps exclusively, in lap-number order. All metadata is
/// optional: exporters write whatever header block they feel like, and a
/// missing field is simply absent.
#[derive(Clone, Debug, PartialEq, CopyGetters, Getters, Deserialize,
         Serialize)]
pub struct Session {
  #[getset(get_copy = "pub")]
  date:         Option<NaiveDateTime>,
  #[getset(get = "pub")]
  track:        Option<String>,
  #[getset(get = "pub")]
  racer:        Option<String>,
  #[getset(get = "pub")]
  vehicle:      Option<String>,
  #[getset(get = "pub")]
  championship: Option<String>,
  #[getset(get = "pub")]
  session_name: Option<String>,
  #[getset(get = "pub")]
  laps:         Vec<Lap>,
}

impl Session {
  pub(crate) fn new(meta: SessionMeta, laps: Vec<Lap>) -> Self {
    Self { date:         meta.date,
           track:        meta.track,
           racer:        meta.racer,
           vehicle:      meta.vehicle,
           championship: meta.championship,
           session_name: meta.session_name,
           laps }
  }

  pub fn number_of_laps(&self) -> usize {
    self.laps.len()
  }

  /// The lap with the shortest duration, or `None` for a lapless session.
  pub fn best_lap(&self) -> Option<&Lap> {
    self.laps
        .iter()
        .min_by(|a, b| {
          a.duration()
           .partial_cmp(&b.duration())
           .unwrap_or(std::cmp::Ordering::Equal)
        })
  }

  /// Sum of all lap durations in seconds.
  pub fn total_duration(&self) -> f64 {
    self.laps.iter().map(|lap| lap.duration()).sum()
  }
}
