//! Daily sampling of the 3-hour forecast feed.

use chrono::{NaiveDateTime, NaiveTime};

use crate::model::{ForecastDay, ForecastReading};

/// Timestamp layout of the provider's `dt_txt` field.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Keep the readings taken exactly at 12:00:00, one per calendar day, in feed order.
///
/// Readings whose timestamp does not parse are skipped.
pub fn midday_samples(readings: &[ForecastReading]) -> Vec<ForecastDay> {
    let noon = NaiveTime::from_hms_opt(12, 0, 0);

    readings
        .iter()
        .filter_map(|reading| {
            let time = match NaiveDateTime::parse_from_str(&reading.timestamp, TIMESTAMP_FORMAT) {
                Ok(time) => time,
                Err(err) => {
                    tracing::debug!(timestamp = %reading.timestamp, %err, "skipping unparseable forecast reading");
                    return None;
                }
            };

            (Some(time.time()) == noon).then(|| ForecastDay {
                date: time.date(),
                temperature_c: reading.temperature_c,
                condition: reading.condition.clone(),
                description: reading.description.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ConditionCategory;

    fn reading(timestamp: &str, temp: f64) -> ForecastReading {
        ForecastReading {
            timestamp: timestamp.to_string(),
            temperature_c: temp,
            condition: ConditionCategory::Rain,
            description: "light rain".to_string(),
        }
    }

    #[test]
    fn keeps_only_midday_readings_in_order() {
        let readings = vec![
            reading("2024-05-06 09:00:00", 10.0),
            reading("2024-05-06 12:00:00", 14.0),
            reading("2024-05-06 15:00:00", 15.0),
            reading("2024-05-07 00:00:00", 8.0),
            reading("2024-05-07 12:00:00", 16.0),
            reading("2024-05-08 12:00:00", 17.0),
            reading("2024-05-08 21:00:00", 9.0),
        ];

        let days = midday_samples(&readings);

        let temps: Vec<f64> = days.iter().map(|d| d.temperature_c).collect();
        assert_eq!(temps, vec![14.0, 16.0, 17.0]);
        assert_eq!(days[0].date.to_string(), "2024-05-06");
        assert_eq!(days[2].date.to_string(), "2024-05-08");
    }

    #[test]
    fn near_miss_timestamps_are_not_midday() {
        let readings = vec![
            reading("2024-05-06 12:00:01", 1.0),
            reading("2024-05-06 12:30:00", 2.0),
            reading("2024-05-06 00:12:00", 3.0),
        ];

        assert!(midday_samples(&readings).is_empty());
    }

    #[test]
    fn unparseable_timestamps_are_skipped() {
        let readings = vec![
            reading("not a time 12:00:00", 1.0),
            reading("2024-05-06T12:00:00Z", 2.0),
            reading("2024-05-07 12:00:00", 3.0),
        ];

        let days = midday_samples(&readings);
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].temperature_c, 3.0);
    }

    #[test]
    fn empty_feed_gives_no_days() {
        assert!(midday_samples(&[]).is_empty());
    }
}
