// Copyright 2021 bmc::labs Gmbh. All rights reserved.
//
// Author: Florian Eich <florian@bmc-labs.com>

mod braking;
mod columns;
mod config;
mod corner;
mod delta;
mod error;
mod lap;
mod metadata;
mod parser;
mod point;
mod segment;
mod session;

pub use braking::{detect_braking_zones, BrakingZone};
pub use columns::{ChannelId, ColumnMap};
pub use config::Config;
pub use corner::{detect_corners, Corner, CornerDirection};
pub use delta::{calculate_delta, DeltaPoint};
pub use error::{Error, Result};
pub use lap::Lap;
pub use parser::{parse, parse_with, parse_with_stats, ParseStats};
pub use point::TelemetryPoint;
pub use session::Session;
