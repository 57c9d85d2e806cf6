pub extern crate nalgebra as na;

pub mod clock;
pub mod config;
pub mod geodetic;
pub mod ground_track;
pub mod model;
pub mod position;
pub mod schedule;
pub mod segment;
pub mod service;
pub mod source;
pub mod store;
pub mod units;
