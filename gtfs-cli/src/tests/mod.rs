//! Shared test harness modules for the gtfs-sqlite CLI.

use super::*;

mod helpers;
