//! Narrative domain: the morning report collaborator.
//!
//! A `NarrativeSource` turns a prompt into a JSON reply. `narrate` is the
//! boundary: a failing or panicking source still yields a `DailyReport`.

mod almanac;

use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use bevy::prelude::*;
use serde::Deserialize;

use crate::shared::*;

pub use almanac::AlmanacSource;

pub const RADIO_SILENT: &str = "The town radio is silent today.";
pub const QUIET_DAY: &str = "A quiet day in the valley.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NarrativeError {
    /// The source could not be reached or refused to answer.
    Unavailable(String),
    /// The source answered with nothing.
    EmptyResponse,
    /// The reply was not a valid report.
    Malformed(String),
}

impl fmt::Display for NarrativeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NarrativeError::Unavailable(why) => write!(f, "narrator unavailable: {}", why),
            NarrativeError::EmptyResponse => write!(f, "narrator returned no text"),
            NarrativeError::Malformed(why) => write!(f, "malformed report: {}", why),
        }
    }
}

impl std::error::Error for NarrativeError {}

/// What the narrator is told about the new morning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NarrativePrompt {
    pub day: u32,
    pub money: u32,
}

impl NarrativePrompt {
    pub fn render(&self) -> String {
        format!(
            "You are the narrator of a cozy farming game set in a small valley.\n\
             It is Day {}. The player has {} coins.\n\
             Generate a morning report with:\n\
             1. A random weather condition (Sunny, Rainy, or Cloudy).\n\
             2. A short, charming, one-sentence note about town news, a farming tip, or a horoscope.\n\
             Return JSON with the fields \"weather\" and \"message\".",
            self.day, self.money
        )
    }
}

/// Anything that can write a morning report.
pub trait NarrativeSource: Send + Sync + 'static {
    /// Produce the raw JSON reply for `prompt`.
    fn compose(&self, prompt: &NarrativePrompt) -> Result<String, NarrativeError>;
}

/// The narrator in use. Without a source the radio stays silent.
#[derive(Resource, Clone, Default)]
pub struct Narrator {
    source: Option<Arc<dyn NarrativeSource>>,
}

impl Narrator {
    pub fn new(source: impl NarrativeSource) -> Self {
        Self {
            source: Some(Arc::new(source)),
        }
    }

    pub fn silent() -> Self {
        Self::default()
    }

    pub fn is_silent(&self) -> bool {
        self.source.is_none()
    }
}

impl fmt::Debug for Narrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Narrator")
            .field("silent", &self.is_silent())
            .finish()
    }
}

#[derive(Deserialize)]
struct ReportReply {
    weather: Weather,
    message: String,
}

/// Parse a narrator reply such as `{"weather": "Rainy", "message": "..."}`.
pub fn parse_report(text: &str) -> Result<DailyReport, NarrativeError> {
    if text.trim().is_empty() {
        return Err(NarrativeError::EmptyResponse);
    }
    let reply: ReportReply =
        serde_json::from_str(text).map_err(|e| NarrativeError::Malformed(e.to_string()))?;
    let message = reply.message.trim();
    if message.is_empty() {
        return Err(NarrativeError::Malformed("empty message".to_string()));
    }
    Ok(DailyReport {
        weather: reply.weather,
        message: message.to_string(),
    })
}

pub fn silent_report() -> DailyReport {
    DailyReport {
        weather: Weather::Sunny,
        message: RADIO_SILENT.to_string(),
    }
}

pub fn fallback_report() -> DailyReport {
    DailyReport {
        weather: Weather::Sunny,
        message: QUIET_DAY.to_string(),
    }
}

/// Ask the narrator for the report of `day`. Never fails.
pub fn narrate(narrator: &Narrator, day: u32, money: u32) -> DailyReport {
    let Some(source) = narrator.source.as_ref() else {
        return silent_report();
    };

    let prompt = NarrativePrompt { day, money };
    let attempt = catch_unwind(AssertUnwindSafe(|| {
        source.compose(&prompt).and_then(|text| parse_report(&text))
    }));

    match attempt {
        Ok(Ok(report)) => report,
        Ok(Err(e)) => {
            warn!("[Narrative] Failed to fetch daily report: {}", e);
            fallback_report()
        }
        Err(_) => {
            warn!("[Narrative] Narrator panicked while writing day {}", day);
            fallback_report()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Result<String, NarrativeError>);

    impl NarrativeSource for Fixed {
        fn compose(&self, _prompt: &NarrativePrompt) -> Result<String, NarrativeError> {
            self.0.clone()
        }
    }

    struct Exploding;

    impl NarrativeSource for Exploding {
        fn compose(&self, _prompt: &NarrativePrompt) -> Result<String, NarrativeError> {
            panic!("wires crossed");
        }
    }

    #[test]
    fn parses_well_formed_reply() {
        let report =
            parse_report(r#"{"weather": "Rainy", "message": " Frogs are singing. "}"#).unwrap();
        assert_eq!(report.weather, Weather::Rainy);
        assert_eq!(report.message, "Frogs are singing.");
    }

    #[test]
    fn rejects_unknown_weather() {
        let err = parse_report(r#"{"weather": "Snowy", "message": "Brr"}"#).unwrap_err();
        assert!(matches!(err, NarrativeError::Malformed(_)));
    }

    #[test]
    fn rejects_blank_and_missing_fields() {
        assert_eq!(parse_report("  "), Err(NarrativeError::EmptyResponse));
        assert!(parse_report(r#"{"weather": "Sunny"}"#).is_err());
        assert!(parse_report(r#"{"weather": "Sunny", "message": ""}"#).is_err());
    }

    #[test]
    fn silent_narrator_reports_radio_silence() {
        assert_eq!(narrate(&Narrator::silent(), 2, 100), silent_report());
    }

    #[test]
    fn source_errors_fall_back() {
        let narrator = Narrator::new(Fixed(Err(NarrativeError::Unavailable("offline".into()))));
        assert_eq!(narrate(&narrator, 2, 100), fallback_report());

        let narrator = Narrator::new(Fixed(Ok("not json".into())));
        assert_eq!(narrate(&narrator, 2, 100), fallback_report());
    }

    #[test]
    fn panicking_source_falls_back() {
        assert_eq!(narrate(&Narrator::new(Exploding), 2, 100), fallback_report());
    }

    #[test]
    fn good_reply_passes_through() {
        let narrator = Narrator::new(Fixed(Ok(
            r#"{"weather": "Cloudy", "message": "Grey skies, green fields."}"#.into(),
        )));
        let report = narrate(&narrator, 5, 40);
        assert_eq!(report.weather, Weather::Cloudy);
        assert_eq!(report.message, "Grey skies, green fields.");
    }

    #[test]
    fn prompt_mentions_day_and_coins() {
        let text = NarrativePrompt { day: 7, money: 315 }.render();
        assert!(text.contains("Day 7"));
        assert!(text.contains("315 coins"));
    }
}
