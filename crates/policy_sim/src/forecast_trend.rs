//! Direction of an AQI forecast series.

use serde::{Deserialize, Serialize};

use crate::numeric::{round_to, sanitize};

/// Percent change beyond which a forecast counts as moving.
const TREND_THRESHOLD_PERCENT: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrendDirection {
    /// Fewer than two forecast points.
    NoTrend,
    Improving,
    Stable,
    Worsening,
}

impl TrendDirection {
    pub fn label(self) -> &'static str {
        match self {
            TrendDirection::NoTrend => "No Trend",
            TrendDirection::Improving => "Improving",
            TrendDirection::Stable => "Stable",
            TrendDirection::Worsening => "Worsening",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastTrend {
    pub direction: TrendDirection,
    /// Absolute percent change between first and last point, one decimal.
    /// 0 for `Stable` and `NoTrend`.
    pub change_percent: f64,
}

/// Classify a forecast by comparing its first and last points.
///
/// Zero or malformed endpoints are replaced with `current_aqi`.
pub fn forecast_trend(forecast_aqis: &[f64], current_aqi: f64) -> ForecastTrend {
    let no_change = |direction| ForecastTrend {
        direction,
        change_percent: 0.0,
    };

    if forecast_aqis.len() < 2 {
        return no_change(TrendDirection::NoTrend);
    }

    let current = sanitize(current_aqi);
    let endpoint = |v: f64| {
        let v = sanitize(v);
        if v == 0.0 {
            current
        } else {
            v
        }
    };
    let first = endpoint(forecast_aqis[0]);
    let last = endpoint(forecast_aqis[forecast_aqis.len() - 1]);
    if first == 0.0 {
        return no_change(TrendDirection::Stable);
    }

    let change = (last - first) / first * 100.0;
    if change > TREND_THRESHOLD_PERCENT {
        ForecastTrend {
            direction: TrendDirection::Worsening,
            change_percent: round_to(change, 1),
        }
    } else if change < -TREND_THRESHOLD_PERCENT {
        ForecastTrend {
            direction: TrendDirection::Improving,
            change_percent: round_to(change.abs(), 1),
        }
    } else {
        no_change(TrendDirection::Stable)
    }
}
