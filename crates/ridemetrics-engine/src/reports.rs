//! Canned report definitions for the ride-share dashboard
//!
//! Driver-level reports expect one record per driver with pre-aggregated
//! totals; ride-level reports expect one record per ride with
//! `driver_name`, `start_time`, `end_time` and `fare_amount`. Field names in
//! each constructor's docs are the inputs it reads.

use crate::definition::{
    AggregateKind, AggregationSpec, ClassificationRule, CompareOp, Derivation, DerivedField, OrderByItem,
    Predicate, ReportDefinition, WindowFunction,
};

/// Names accepted by [`by_name`], in dashboard order
pub const REPORT_NAMES: [&str; 10] = [
    "driver_leaderboard",
    "revenue_tiers",
    "quality_tiers",
    "commission_tiers",
    "efficiency_quartiles",
    "customer_value_segments",
    "churn_risk",
    "driver_progression",
    "quality_trend_alerts",
    "driver_milestones",
];

pub fn by_name(name: &str) -> Option<ReportDefinition> {
    match name {
        "driver_leaderboard" => Some(driver_leaderboard()),
        "revenue_tiers" => Some(revenue_tiers()),
        "quality_tiers" => Some(quality_tiers()),
        "commission_tiers" => Some(commission_tiers()),
        "efficiency_quartiles" => Some(efficiency_quartiles()),
        "customer_value_segments" => Some(customer_value_segments()),
        "churn_risk" => Some(churn_risk()),
        "driver_progression" => Some(driver_progression()),
        "quality_trend_alerts" => Some(quality_trend_alerts()),
        "driver_milestones" => Some(driver_milestones()),
        _ => None,
    }
}

fn avg_of(field: &str) -> WindowFunction {
    WindowFunction::PartitionAggregate { aggregate: AggregateKind::Avg, field: Some(field.to_string()) }
}

fn count_all() -> WindowFunction {
    WindowFunction::PartitionAggregate { aggregate: AggregateKind::Count, field: None }
}

/// Fastest pickups first: `driver_name`, `avg_wait_time_minutes`, `total_rides`
pub fn driver_leaderboard() -> ReportDefinition {
    ReportDefinition::new("driver_leaderboard")
        .order_by(OrderByItem::asc("avg_wait_time_minutes"))
        .window("efficiency_rank", WindowFunction::RowNumber)
        .window_rounded("fleet_avg_wait_time", avg_of("avg_wait_time_minutes"), 2)
        .limit(15)
}

/// Revenue per ride to the cent, NULL for drivers with no rides
fn per_ride(output: &str) -> DerivedField {
    DerivedField::new(
        output,
        Derivation::Ratio { numerator: "total_revenue".to_string(), denominator: "total_rides".to_string() },
    )
    .rounded(2)
}

/// Competition rank by revenue: `driver_name`, `total_rides`, `total_revenue`
pub fn revenue_tiers() -> ReportDefinition {
    ReportDefinition::new("revenue_tiers")
        .order_by(OrderByItem::desc("total_revenue"))
        .window("revenue_rank", WindowFunction::Rank)
        .derive(per_ride("avg_fare_per_ride"))
        .classify(
            ClassificationRule::new("performance_tier", "Growth Tier (Rank >30)")
                .case(Predicate::le("revenue_rank", 10), "Top Tier (Rank <=10)")
                .case(Predicate::le("revenue_rank", 30), "Mid Tier (Rank 11-30)"),
        )
        .limit(30)
}

/// Dense rank by rating: `driver_name`, `rides_completed`, `avg_rating`
pub fn quality_tiers() -> ReportDefinition {
    ReportDefinition::new("quality_tiers")
        .order_by(OrderByItem::desc("avg_rating"))
        .window("quality_tier", WindowFunction::DenseRank)
        .classify(
            ClassificationRule::new("tier_name", "Development (Below 4.0)")
                .case(Predicate::eq("quality_tier", 1), "Platinum (4.8+)")
                .case(Predicate::eq("quality_tier", 2), "Gold (4.5-4.7)")
                .case(Predicate::eq("quality_tier", 3), "Silver (4.0-4.4)"),
        )
        .aggregate(AggregationSpec::new("tier_name").measure("avg_rating"))
}

/// Revenue percentile bands: `driver_name`, `total_revenue`, `total_rides`
pub fn commission_tiers() -> ReportDefinition {
    ReportDefinition::new("commission_tiers")
        .order_by(OrderByItem::desc("total_revenue"))
        .window_rounded("revenue_percentile", WindowFunction::PercentRank, 3)
        .derive(per_ride("revenue_per_ride"))
        .classify(
            ClassificationRule::new("commission_tier", "Growth Pool - +5% Commission")
                .case(Predicate::le("revenue_percentile", 0.20), "Top 20% - +15% Commission")
                .case(Predicate::le("revenue_percentile", 0.50), "Top 50% - +10% Commission"),
        )
        .sort_by(OrderByItem::asc("revenue_percentile"))
        .limit(25)
}

/// Wait-time quartiles by cumulative distribution: `driver_name`, `total_rides`, `avg_wait_time`
pub fn efficiency_quartiles() -> ReportDefinition {
    ReportDefinition::new("efficiency_quartiles")
        .order_by(OrderByItem::asc("avg_wait_time"))
        .window_rounded("efficiency_cume_dist", WindowFunction::CumeDist, 3)
        .classify(
            ClassificationRule::new("efficiency_quartile", "Q4 (Development) - Mentoring Program")
                .case(Predicate::le("efficiency_cume_dist", 0.25), "Q1 (Best) - Fleet Stars")
                .case(Predicate::le("efficiency_cume_dist", 0.50), "Q2 (Good) - Reliable")
                .case(Predicate::le("efficiency_cume_dist", 0.75), "Q3 (Fair) - Training Eligible"),
        )
}

/// Spend quartiles with per-segment rollups:
/// `masked_name`, `total_rides`, `total_fare_spent`, `avg_distance_km`
pub fn customer_value_segments() -> ReportDefinition {
    ReportDefinition::new("customer_value_segments")
        .order_by(OrderByItem::desc("total_fare_spent"))
        .window("customer_value_quartile", WindowFunction::Ntile { buckets: 4 })
        .classify(
            ClassificationRule::new("segment_name", "Basic (Bottom 25%)")
                .case(Predicate::eq("customer_value_quartile", 1), "VIP (Top 25%)")
                .case(Predicate::eq("customer_value_quartile", 2), "Premium (25-50%)")
                .case(Predicate::eq("customer_value_quartile", 3), "Standard (50-75%)"),
        )
        .aggregate(
            AggregationSpec::new("segment_name")
                .measure("total_fare_spent")
                .measure("total_rides")
                .measure("avg_distance_km")
                .examples("masked_name", 3),
        )
}

/// Idle time before each driver's next ride (ride-level)
pub fn churn_risk() -> ReportDefinition {
    let has_next = || Predicate::is_not_null("next_ride_start");

    ReportDefinition::new("churn_risk")
        .partition_by(["driver_name"])
        .order_by(OrderByItem::asc("start_time"))
        .window("next_ride_start", WindowFunction::Lead { field: "start_time".to_string(), offset: 1 })
        .derive(
            DerivedField::new(
                "idle_hours",
                Derivation::HoursBetween { start: "end_time".to_string(), end: "next_ride_start".to_string() },
            )
            .rounded(1),
        )
        .classify(
            ClassificationRule::new("retention_risk_flag", "Last ride (no next ride data)")
                .case(Predicate::all(vec![has_next(), Predicate::gt("idle_hours", 4)]), "CHURN RISK: >4hr idle")
                .case(Predicate::all(vec![has_next(), Predicate::gt("idle_hours", 2)]), "WARNING: 2-4hr idle")
                .case(has_next(), "Normal: <2hr idle"),
        )
        .filter(has_next())
        .sort_by(OrderByItem::asc("driver_name"))
        .sort_by(OrderByItem::asc("start_time"))
        .limit(100)
}

/// Fare growth since each driver's first ride (ride-level)
pub fn driver_progression() -> ReportDefinition {
    ReportDefinition::new("driver_progression")
        .partition_by(["driver_name"])
        .order_by(OrderByItem::asc("start_time"))
        .window("ride_number", WindowFunction::RowNumber)
        .window("first_ever_fare", WindowFunction::FirstValue { field: "fare_amount".to_string() })
        .derive(
            DerivedField::new(
                "fare_improvement",
                Derivation::Difference { left: "fare_amount".to_string(), right: "first_ever_fare".to_string() },
            )
            .rounded(2),
        )
        .derive(
            DerivedField::new(
                "improvement_percent",
                Derivation::PercentChange {
                    current: "fare_amount".to_string(),
                    baseline: "first_ever_fare".to_string(),
                },
            )
            .rounded(1),
        )
        .classify(
            ClassificationRule::new("performance_trend", "Declining (<$0)")
                .case(Predicate::ge("fare_improvement", 20), "Strong Growth (>$20 gain)")
                .case(Predicate::ge("fare_improvement", 5), "Positive Trend ($5-$20 gain)")
                .case(Predicate::ge("fare_improvement", 0), "Stable ($0-$5)"),
        )
        .sort_by(OrderByItem::asc("driver_name"))
        .sort_by(OrderByItem::asc("ride_number"))
        .limit(50)
}

/// Latest rating against the lifetime average (ride-level, with
/// `average_driver_rating`)
///
/// Rides without a rating should be dropped before the run; the latest ride
/// is taken as-is.
pub fn quality_trend_alerts() -> ReportDefinition {
    ReportDefinition::new("quality_trend_alerts")
        .partition_by(["driver_name"])
        .order_by(OrderByItem::desc("start_time"))
        .window("total_rides", count_all())
        .window_rounded("lifetime_avg_rating", avg_of("average_driver_rating"), 2)
        .window_rounded(
            "most_recent_rating",
            WindowFunction::FirstValue { field: "average_driver_rating".to_string() },
            2,
        )
        .window("rn", WindowFunction::RowNumber)
        .derive(
            DerivedField::new(
                "recent_trend",
                Derivation::Difference {
                    left: "most_recent_rating".to_string(),
                    right: "lifetime_avg_rating".to_string(),
                },
            )
            .rounded(2),
        )
        .classify(
            ClassificationRule::new("quality_trend_flag", "POSITIVE: Maintaining or improving")
                .case(Predicate::lt("recent_trend", -0.5), "ALERT: Quality declining >0.5 stars")
                .case(Predicate::lt("recent_trend", 0), "WARNING: Slight quality decline"),
        )
        .filter(Predicate::eq("rn", 1))
        .sort_by(OrderByItem::asc("recent_trend"))
        .limit(20)
}

/// Lifecycle stage and milestone fares, one row per driver (ride-level)
pub fn driver_milestones() -> ReportDefinition {
    let nth_fare = |n: i64| WindowFunction::NthValue { field: "fare_amount".to_string(), n };

    ReportDefinition::new("driver_milestones")
        .partition_by(["driver_name"])
        .order_by(OrderByItem::asc("start_time"))
        .window("total_rides_to_date", count_all())
        .window_rounded("ride_1_fare", nth_fare(1), 2)
        .window_rounded("ride_10_fare", nth_fare(10), 2)
        .window_rounded("ride_50_fare", nth_fare(50), 2)
        .window_rounded("ride_100_fare", nth_fare(100), 2)
        .window("ride_number", WindowFunction::RowNumber)
        .classify(
            ClassificationRule::new("driver_lifecycle_stage", "New (<10 rides)")
                .case(Predicate::ge("total_rides_to_date", 100), "Active (100+ rides)")
                .case(Predicate::ge("total_rides_to_date", 50), "Engaged (50+ rides)")
                .case(Predicate::ge("total_rides_to_date", 10), "Onboarded (10+ rides)"),
        )
        .classify(
            ClassificationRule::new("onboarding_quality", "Monitor growth pattern").case(
                Predicate::all(vec![
                    Predicate::ge("total_rides_to_date", 50),
                    Predicate::compare_fields("ride_10_fare", CompareOp::Gt, "ride_1_fare"),
                ]),
                "Strong onboarding (fares increasing)",
            ),
        )
        .filter(Predicate::all(vec![Predicate::eq("ride_number", 1), Predicate::ge("total_rides_to_date", 10)]))
        .sort_by(OrderByItem::desc("total_rides_to_date"))
        .limit(30)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RankingEngine;

    #[test]
    fn test_every_named_report_builds_an_engine() {
        for name in REPORT_NAMES {
            let def = by_name(name).unwrap();
            assert_eq!(def.name, name);
            assert!(RankingEngine::new(def).is_ok(), "{name}");
        }
    }

    #[test]
    fn test_unknown_report_name() {
        assert!(by_name("surge_pricing").is_none());
    }
}
