//! Synthetic sentiment scores.
//!
//! Stands in for a news/social/analyst NLP pipeline that does not exist. The
//! scores are random but bounded, and the label follows the overall score.

use crate::domain::round1;
use rand::Rng;
use serde::{Deserialize, Serialize};

const BASE_RANGE: std::ops::RangeInclusive<f64> = 40.0..=85.0;
const NEWS_JITTER: f64 = 10.0;
const SOCIAL_JITTER: f64 = 15.0;
const ANALYST_JITTER: f64 = 8.0;

const BULLISH_ABOVE: f64 = 60.0;
const BEARISH_BELOW: f64 = 45.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SentimentLabel {
    Bullish,
    Neutral,
    Bearish,
}

impl SentimentLabel {
    pub fn from_score(score: f64) -> Self {
        if score > BULLISH_ABOVE {
            Self::Bullish
        } else if score < BEARISH_BELOW {
            Self::Bearish
        } else {
            Self::Neutral
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentReport {
    pub overall: f64,
    pub news: f64,
    pub social: f64,
    pub analyst: f64,
    pub label: SentimentLabel,
}

/// Draw a sentiment report: a base in [40, 85] with independent jitter per channel.
pub fn compute_sentiment<R: Rng + ?Sized>(rng: &mut R) -> SentimentReport {
    let base = rng.gen_range(BASE_RANGE);
    let news = base + rng.gen_range(-NEWS_JITTER..=NEWS_JITTER);
    let social = base + rng.gen_range(-SOCIAL_JITTER..=SOCIAL_JITTER);
    let analyst = base + rng.gen_range(-ANALYST_JITTER..=ANALYST_JITTER);

    SentimentReport {
        overall: round1(base),
        news: round1(news),
        social: round1(social),
        analyst: round1(analyst),
        label: SentimentLabel::from_score(base),
    }
}
