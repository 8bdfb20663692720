//! Shared fixtures for engine integration tests

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use ridemetrics_types::{Record, Schema, Value, ValueType};

/// Day `day` of March 2024 at `hour:minute`
pub fn ts(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, day).unwrap().and_hms_opt(hour, minute, 0).unwrap()
}

pub fn driver_name(idx: usize) -> String {
    format!("D-{:02}", idx)
}

/// Driver-level schema used by the revenue reports
pub fn revenue_schema() -> Schema {
    Schema::new()
        .with_field("driver_name", ValueType::Text)
        .with_field("total_rides", ValueType::Integer)
        .with_field("total_revenue", ValueType::Numeric)
}

/// One driver per revenue value, named `D-00`, `D-01`, ... in input order
pub fn revenue_records(revenues: &[f64]) -> Vec<Record> {
    revenues
        .iter()
        .enumerate()
        .map(|(idx, revenue)| {
            Record::new()
                .with("driver_name", driver_name(idx))
                .with("total_rides", 10 + idx as i64)
                .with("total_revenue", *revenue)
        })
        .collect()
}

pub fn ride_schema() -> Schema {
    Schema::new()
        .with_field("driver_name", ValueType::Text)
        .with_field("start_time", ValueType::Timestamp)
        .with_field("end_time", ValueType::Timestamp)
        .with_field("fare_amount", ValueType::Numeric)
        .with_field("average_driver_rating", ValueType::Numeric)
}

/// Builder for ride-level records
pub struct RideBuilder {
    rides: Vec<Record>,
}

impl RideBuilder {
    pub fn new() -> Self {
        RideBuilder { rides: Vec::new() }
    }

    /// Add a ride lasting `minutes` starting at `start`
    pub fn ride(
        mut self,
        driver: &str,
        start: NaiveDateTime,
        minutes: i64,
        fare: f64,
        rating: impl Into<Value>,
    ) -> Self {
        self.rides.push(
            Record::new()
                .with("driver_name", driver)
                .with("start_time", start)
                .with("end_time", start + chrono::Duration::minutes(minutes))
                .with("fare_amount", fare)
                .with("average_driver_rating", rating),
        );
        self
    }

    /// `count` one-hour-apart rides on day 1 with fares `first_fare`, `first_fare + step`, ...
    pub fn series(mut self, driver: &str, count: usize, first_fare: f64, step: f64) -> Self {
        for i in 0..count {
            let start = ts(1, 0, 0) + chrono::Duration::hours(i as i64);
            self = self.ride(driver, start, 20, first_fare + step * i as f64, 4.5);
        }
        self
    }

    pub fn build(self) -> Vec<Record> {
        self.rides
    }
}

pub fn texts(values: &[Value]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

pub fn ints(values: &[Value]) -> Vec<i64> {
    values.iter().map(|v| v.as_i64().unwrap()).collect()
}

pub fn floats(values: &[Value]) -> Vec<f64> {
    values.iter().map(|v| v.as_f64().unwrap()).collect()
}
