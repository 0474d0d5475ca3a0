//! Synthetic forecast used when no live provider is available.
//!
//! The shape is fixed (count, spacing, which slots rain or cloud over) so the
//! selector and views behave predictably; temperatures, humidity and wind are
//! jittered within small bounds.

use chrono::{DateTime, Local, NaiveTime, SubsecRound, TimeDelta, TimeZone, Timelike, Utc};
use rand::Rng;

use crate::types::{
    CurrentConditions, ForecastSet, ForecastSource, Observation, WeatherCondition, WeatherData,
};

/// Number of observations in a demo forecast (5 days of 3-hour slots)
pub const DEMO_OBSERVATION_COUNT: usize = 40;
/// Hours between consecutive demo observations
pub const DEMO_STEP_HOURS: i64 = 3;
/// Slot that always reports rain
pub const DEMO_RAIN_INDEX: usize = 8;
/// Slot that always reports clouds
pub const DEMO_CLOUDS_INDEX: usize = 16;

pub const DEMO_LOCATION: &str = "Manila";
pub const DEMO_COUNTRY: &str = "PH";

const NIGHT_TEMPERATURE: f64 = 26.0;
const DAY_BASE_TEMPERATURE: i32 = 28;
const DAY_TEMPERATURE_SPREAD: i32 = 3;
const BASE_HUMIDITY: u8 = 70;
const HUMIDITY_SPREAD: u8 = 10;
const BASE_WIND_SPEED: f64 = 2.0;
const WIND_SPEED_SPREAD: f64 = 3.0;
const BASE_VISIBILITY: u32 = 10_000;
const VISIBILITY_SPREAD: u32 = 1_000;
const SEA_LEVEL_PRESSURE: u32 = 1013;
const RAIN_CHANCE: f64 = 0.7;

/// Night runs from 22:00 through 06:59 local time
fn is_night(hour: u32) -> bool {
    hour >= 22 || hour <= 6
}

/// Condition for a demo slot
pub fn demo_condition(index: usize) -> WeatherCondition {
    match index {
        DEMO_RAIN_INDEX => WeatherCondition::Rain,
        DEMO_CLOUDS_INDEX => WeatherCondition::Clouds,
        _ => WeatherCondition::Clear,
    }
}

fn description_and_icon(condition: &WeatherCondition) -> (&'static str, &'static str) {
    match condition {
        WeatherCondition::Rain => ("light rain", "10d"),
        WeatherCondition::Clouds => ("partly cloudy", "02d"),
        _ => ("clear sky", "01d"),
    }
}

/// Generate demo data starting at the current local time
pub fn generate_demo() -> WeatherData {
    generate_demo_at(Local::now(), &mut rand::rng())
}

/// Generate demo data starting at `now`, with day/night judged in `now`'s timezone
pub fn generate_demo_at<Tz, R>(now: DateTime<Tz>, rng: &mut R) -> WeatherData
where
    Tz: TimeZone,
    R: Rng + ?Sized,
{
    let now = now.trunc_subsecs(0);

    let observations = (0..DEMO_OBSERVATION_COUNT)
        .map(|index| {
            let at = now.clone() + TimeDelta::hours(DEMO_STEP_HOURS * index as i64);
            demo_observation(index, at, rng)
        })
        .collect();

    let forecast = ForecastSet::new(
        DEMO_LOCATION,
        Some(DEMO_COUNTRY.to_string()),
        ForecastSource::Demo,
        observations,
    );

    WeatherData {
        current: demo_current(&now),
        forecast,
        fetched_at: now.with_timezone(&Utc),
    }
}

fn demo_observation<Tz, R>(index: usize, at: DateTime<Tz>, rng: &mut R) -> Observation
where
    Tz: TimeZone,
    R: Rng + ?Sized,
{
    let condition = demo_condition(index);
    let (description, icon) = description_and_icon(&condition);

    let temperature = if is_night(at.hour()) {
        NIGHT_TEMPERATURE
    } else {
        f64::from(DAY_BASE_TEMPERATURE + rng.random_range(0..DAY_TEMPERATURE_SPREAD))
    };

    let precipitation_chance = if condition == WeatherCondition::Rain {
        Some(RAIN_CHANCE)
    } else {
        Some(0.0)
    };

    Observation {
        timestamp: at.with_timezone(&Utc),
        condition,
        description: description.to_string(),
        icon: icon.to_string(),
        temperature,
        feels_like: temperature + 2.0,
        temp_min: temperature - 2.0,
        temp_max: temperature + 2.0,
        pressure: SEA_LEVEL_PRESSURE,
        humidity: BASE_HUMIDITY + rng.random_range(0..HUMIDITY_SPREAD),
        wind_speed: BASE_WIND_SPEED + rng.random_range(0.0..WIND_SPEED_SPREAD),
        wind_deg: rng.random_range(0..360),
        visibility: BASE_VISIBILITY - rng.random_range(0..=VISIBILITY_SPREAD),
        precipitation_chance,
    }
}

/// Fixed present-moment record with today's 06:00 sunrise and 18:30 sunset
fn demo_current<Tz: TimeZone>(now: &DateTime<Tz>) -> CurrentConditions {
    let observation = Observation {
        timestamp: now.with_timezone(&Utc),
        condition: WeatherCondition::Clear,
        description: "clear sky".to_string(),
        icon: "01d".to_string(),
        temperature: 29.0,
        feels_like: 32.0,
        temp_min: 27.0,
        temp_max: 31.0,
        pressure: SEA_LEVEL_PRESSURE,
        humidity: 75,
        wind_speed: 3.5,
        wind_deg: 180,
        visibility: BASE_VISIBILITY,
        precipitation_chance: None,
    };

    CurrentConditions {
        observation,
        sunrise: local_time_today(now, 6, 0),
        sunset: local_time_today(now, 18, 30),
    }
}

fn local_time_today<Tz: TimeZone>(now: &DateTime<Tz>, hour: u32, minute: u32) -> Option<DateTime<Utc>> {
    let time = NaiveTime::from_hms_opt(hour, minute, 0)?;
    now.timezone()
        .from_local_datetime(&now.date_naive().and_time(time))
        .earliest()
        .map(|at| at.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, FixedOffset};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn manila() -> FixedOffset {
        FixedOffset::east_opt(8 * 3600).unwrap()
    }

    fn demo_from(y: i32, m: u32, d: u32, h: u32, seed: u64) -> WeatherData {
        let start = manila().with_ymd_and_hms(y, m, d, h, 0, 0).unwrap();
        generate_demo_at(start, &mut StdRng::seed_from_u64(seed))
    }

    #[test]
    fn test_demo_has_forty_three_hourly_observations() {
        let data = demo_from(2026, 10, 19, 9, 1);
        let obs = data.forecast.observations();

        assert_eq!(obs.len(), DEMO_OBSERVATION_COUNT);
        for pair in obs.windows(2) {
            assert_eq!(pair[1].timestamp - pair[0].timestamp, Duration::hours(3));
        }
        assert_eq!(data.forecast.source(), ForecastSource::Demo);
        assert_eq!(data.forecast.location(), "Manila");
        assert_eq!(data.forecast.country(), Some("PH"));
    }

    #[test]
    fn test_positional_conditions() {
        for seed in 0..5 {
            let data = demo_from(2026, 10, 19, 9, seed);
            let obs = data.forecast.observations();

            let rain: Vec<usize> = (0..obs.len())
                .filter(|&i| obs[i].condition == WeatherCondition::Rain)
                .collect();
            let clouds: Vec<usize> = (0..obs.len())
                .filter(|&i| obs[i].condition == WeatherCondition::Clouds)
                .collect();
            let clear = obs
                .iter()
                .filter(|o| o.condition == WeatherCondition::Clear)
                .count();

            assert_eq!(rain, vec![DEMO_RAIN_INDEX]);
            assert_eq!(clouds, vec![DEMO_CLOUDS_INDEX]);
            assert_eq!(clear, DEMO_OBSERVATION_COUNT - 2);
        }
    }

    #[test]
    fn test_only_rain_slot_has_precipitation() {
        let data = demo_from(2026, 10, 19, 9, 7);
        for (i, o) in data.forecast.observations().iter().enumerate() {
            let chance = o.precipitation_chance.unwrap_or(0.0);
            if i == DEMO_RAIN_INDEX {
                assert!(chance > 0.0);
            } else {
                assert_eq!(chance, 0.0);
            }
        }
    }

    #[test]
    fn test_night_temperature_is_constant_and_day_is_jittered() {
        // Starting at midnight, slots land on 0,3,6,...,21 local
        let data = demo_from(2026, 10, 19, 0, 3);
        let tz = manila();
        for o in data.forecast.observations() {
            let hour = o.timestamp.with_timezone(&tz).hour();
            if hour >= 22 || hour <= 6 {
                assert_eq!(o.temperature, 26.0, "hour {}", hour);
            } else {
                assert!((28.0..=30.0).contains(&o.temperature), "hour {}", hour);
            }
        }
    }

    #[test]
    fn test_night_hours_table() {
        for hour in [0, 3, 6, 22, 23] {
            assert!(is_night(hour), "hour {}", hour);
        }
        for hour in [7, 12, 18, 21] {
            assert!(!is_night(hour), "hour {}", hour);
        }
    }

    #[test]
    fn test_ten_pm_slot_is_night_and_seven_am_is_day() {
        // Starting at 01:00, slots land on 1,4,7,...,22 local
        let tz = manila();
        for seed in 0..10 {
            let data = demo_from(2026, 10, 19, 1, seed);
            let obs = data.forecast.observations();

            let at_22 = &obs[7];
            assert_eq!(at_22.timestamp.with_timezone(&tz).hour(), 22);
            assert_eq!(at_22.temperature, 26.0);

            let at_7 = &obs[2];
            assert_eq!(at_7.timestamp.with_timezone(&tz).hour(), 7);
            assert!((28.0..=30.0).contains(&at_7.temperature));
        }
    }

    #[test]
    fn test_jitter_stays_in_bounds() {
        for seed in 0..20 {
            let data = demo_from(2026, 10, 19, 14, seed);
            for o in data.forecast.observations() {
                assert!((70..80).contains(&o.humidity));
                assert!((2.0..5.0).contains(&o.wind_speed));
                assert!(o.wind_deg < 360);
                assert!((9_000..=10_000).contains(&o.visibility));
                assert_eq!(o.feels_like, o.temperature + 2.0);
            }
        }
    }

    #[test]
    fn test_same_seed_same_forecast() {
        let a = demo_from(2026, 10, 19, 9, 42);
        let b = demo_from(2026, 10, 19, 9, 42);
        assert_eq!(a.forecast, b.forecast);
    }

    #[test]
    fn test_current_conditions_are_fixed() {
        let data = demo_from(2026, 10, 19, 15, 11);
        let current = &data.current;
        let tz = manila();

        assert_eq!(current.observation.temperature, 29.0);
        assert_eq!(current.observation.humidity, 75);
        assert_eq!(current.observation.condition, WeatherCondition::Clear);

        let sunrise = current.sunrise.unwrap().with_timezone(&tz);
        let sunset = current.sunset.unwrap().with_timezone(&tz);
        assert_eq!((sunrise.hour(), sunrise.minute()), (6, 0));
        assert_eq!((sunset.hour(), sunset.minute()), (18, 30));
        assert_eq!(sunrise.date_naive(), sunset.date_naive());
    }
}
