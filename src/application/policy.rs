//! Harvest policy constants shared by the mutation and query handlers.

/// Tunable constants of the harvest domain.
#[derive(Debug, Clone, Copy)]
pub struct HarvestPolicy {
    /// Days from a clean cut to the predicted next harvest.
    pub forecast_interval_days: i64,
    /// Conversion rate from raw sacks to the standardized billing unit.
    pub sack_rate: f64,
    /// Site-local clock offset from UTC, in hours.
    pub utc_offset_hours: i64,
}

impl Default for HarvestPolicy {
    fn default() -> Self {
        Self {
            forecast_interval_days: 15,
            sack_rate: 1.4,
            utc_offset_hours: 9,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_matches_operational_constants() {
        let policy = HarvestPolicy::default();
        assert_eq!(policy.forecast_interval_days, 15);
        assert!((policy.sack_rate - 1.4).abs() < f64::EPSILON);
        assert_eq!(policy.utc_offset_hours, 9);
    }
}
