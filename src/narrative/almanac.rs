//! Offline narrator: a farmer's almanac with a seeded dice roll.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::{NarrativeError, NarrativePrompt, NarrativeSource};
use crate::shared::Weather;

const SUNNY_LINES: &[&str] = &[
    "Clear skies over the valley. A fine day to break new ground.",
    "The baker swears pumpkins taste sweeter after a sunny week.",
    "Old Maple says corn loves a warm morning. Water early.",
];

const RAINY_LINES: &[&str] = &[
    "Rain drums on the barn roof. The fields drink deep today.",
    "Frogs are singing by the well. Your crops won't go thirsty.",
];

const CLOUDY_LINES: &[&str] = &[
    "Grey clouds drift over the hills. Keep that watering can handy.",
    "The mayor lost his hat in the wind again. Soil stays dry today.",
    "Horoscope: a patient farmer reaps a heavy basket.",
];

/// Rolls weather at 55% sunny, 25% rainy, 20% cloudy.
pub struct AlmanacSource {
    rng: Mutex<StdRng>,
}

impl AlmanacSource {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }
}

fn roll_weather(rng: &mut impl Rng) -> Weather {
    let roll: f32 = rng.gen();
    if roll < 0.55 {
        Weather::Sunny
    } else if roll < 0.80 {
        Weather::Rainy
    } else {
        Weather::Cloudy
    }
}

impl NarrativeSource for AlmanacSource {
    fn compose(&self, prompt: &NarrativePrompt) -> Result<String, NarrativeError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| NarrativeError::Unavailable("almanac lock poisoned".to_string()))?;

        let weather = roll_weather(&mut *rng);
        let lines = match weather {
            Weather::Sunny => SUNNY_LINES,
            Weather::Rainy => RAINY_LINES,
            Weather::Cloudy => CLOUDY_LINES,
        };
        let line = lines.choose(&mut *rng).ok_or(NarrativeError::EmptyResponse)?;

        let message = if prompt.money < 20 {
            format!("Day {}. {} Money is tight, so plant carrots.", prompt.day, line)
        } else {
            format!("Day {}. {}", prompt.day, line)
        };

        Ok(serde_json::json!({ "weather": weather, "message": message }).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::narrative::parse_report;

    #[test]
    fn almanac_replies_parse() {
        let almanac = AlmanacSource::seeded(11);
        for day in 2..40 {
            let text = almanac.compose(&NarrativePrompt { day, money: 100 }).unwrap();
            let report = parse_report(&text).unwrap();
            assert!(report.message.starts_with(&format!("Day {}.", day)));
        }
    }

    #[test]
    fn same_seed_same_weather() {
        let a = AlmanacSource::seeded(42);
        let b = AlmanacSource::seeded(42);
        let prompt = NarrativePrompt { day: 3, money: 50 };
        for _ in 0..10 {
            assert_eq!(a.compose(&prompt).unwrap(), b.compose(&prompt).unwrap());
        }
    }

    #[test]
    fn weather_roll_is_roughly_balanced() {
        let mut rng = StdRng::seed_from_u64(9);
        let rainy = (0..4000)
            .filter(|_| roll_weather(&mut rng) == Weather::Rainy)
            .count();
        assert!((800..1200).contains(&rainy), "rainy = {}", rainy);
    }
}
