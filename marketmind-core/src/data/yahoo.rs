//! Yahoo Finance live provider.
//!
//! Quotes and daily history both come from Yahoo's v8 chart API: the chart
//! `meta` block carries the regular-market price, previous close, volume,
//! 52-week range, currency, exchange and name; the indicator arrays carry the
//! closes. Market cap, P/E and sector come from a second `quoteSummary`
//! request; if that one fails the chart quote is returned with defaults.
//! Handles retries with exponential backoff and the circuit breaker.
//!
//! Yahoo Finance has no official API and is subject to unannounced format
//! changes. Anything unexpected becomes a `DataError`, which the engine turns
//! into synthetic data.

use super::circuit_breaker::CircuitBreaker;
use super::provider::{DataError, MarketDataProvider};
use crate::config::LiveSettings;
use crate::domain::{round2, HistorySeries, Period, PricePoint, Provenance, Quote, Symbol};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

const CHART_BASE_URL: &str = "https://query2.finance.yahoo.com/v8/finance/chart/";
const SUMMARY_BASE_URL: &str = "https://query2.finance.yahoo.com/v10/finance/quoteSummary/";
const SUMMARY_MODULES: &str = "price,summaryDetail,assetProfile";
const UNKNOWN_SECTOR: &str = "Unknown";

/// Yahoo Finance v8 chart API response.
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    #[serde(default)]
    meta: ChartMeta,
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    currency: Option<String>,
    exchange_name: Option<String>,
    long_name: Option<String>,
    short_name: Option<String>,
    regular_market_price: Option<f64>,
    previous_close: Option<f64>,
    chart_previous_close: Option<f64>,
    regular_market_volume: Option<u64>,
    fifty_two_week_low: Option<f64>,
    fifty_two_week_high: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<u64>>,
}

/// Yahoo Finance v10 quoteSummary API response.
#[derive(Debug, Deserialize)]
struct SummaryResponse {
    #[serde(rename = "quoteSummary")]
    quote_summary: SummaryResult,
}

#[derive(Debug, Deserialize)]
struct SummaryResult {
    result: Option<Vec<SummaryData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryData {
    price: Option<SummaryPrice>,
    summary_detail: Option<SummaryDetail>,
    asset_profile: Option<AssetProfile>,
}

/// Yahoo numeric field: `{"raw": 1.0, "fmt": "1.00"}`, or `{}` when absent.
#[derive(Debug, Default, Deserialize)]
struct RawValue {
    raw: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryPrice {
    market_cap: Option<RawValue>,
    long_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryDetail {
    market_cap: Option<RawValue>,
    #[serde(rename = "trailingPE")]
    trailing_pe: Option<RawValue>,
}

#[derive(Debug, Deserialize)]
struct AssetProfile {
    sector: Option<String>,
}

/// Company fundamentals that the chart endpoint lacks. Absent fields stay `None`.
#[derive(Debug, Default, Clone, PartialEq)]
struct Fundamentals {
    /// Market capitalization in currency units (not billions).
    market_cap: Option<f64>,
    pe: Option<f64>,
    sector: Option<String>,
    long_name: Option<String>,
}

/// What to do with an HTTP response, by status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusAction {
    /// 2xx: parse the body.
    Accept,
    /// 403: blocked; trip the breaker and stop.
    Trip,
    /// 429: record a failure, back off and retry.
    RateLimited,
    /// 5xx: record a failure, back off and retry.
    Retry,
    /// 404: the symbol does not exist; no retry, not a provider failure.
    NotFound,
    /// Any other status: give up without counting against the breaker.
    Reject,
}

fn classify_status(status: StatusCode) -> StatusAction {
    if status.is_success() {
        StatusAction::Accept
    } else if status == StatusCode::FORBIDDEN {
        StatusAction::Trip
    } else if status == StatusCode::TOO_MANY_REQUESTS {
        StatusAction::RateLimited
    } else if status == StatusCode::NOT_FOUND {
        StatusAction::NotFound
    } else if status.is_server_error() {
        StatusAction::Retry
    } else {
        StatusAction::Reject
    }
}

/// Backoff before retry `attempt` (1-based): `base * 2^(attempt - 1)`.
fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    base.saturating_mul(2u32.saturating_pow(attempt.saturating_sub(1)))
}

/// Yahoo Finance provider backed by a blocking HTTP client.
pub struct YahooProvider {
    client: reqwest::blocking::Client,
    circuit_breaker: Arc<CircuitBreaker>,
    max_retries: u32,
    base_delay: Duration,
}

impl YahooProvider {
    pub fn new(
        settings: &LiveSettings,
        circuit_breaker: Arc<CircuitBreaker>,
    ) -> Result<Self, DataError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .map_err(|e| DataError::Other(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            circuit_breaker,
            max_retries: settings.max_retries,
            base_delay: Duration::from_millis(settings.base_delay_ms),
        })
    }

    /// Provider with its own circuit breaker configured from `settings`.
    pub fn from_settings(settings: &LiveSettings) -> Result<Self, DataError> {
        let breaker = CircuitBreaker::new(
            Duration::from_secs(settings.cooldown_secs),
            settings.failure_threshold,
        );
        Self::new(settings, Arc::new(breaker))
    }

    /// `base` + symbol path segment + query pairs.
    fn api_url(base: &str, symbol: &Symbol, query: &[(&str, &str)]) -> Result<Url, DataError> {
        let mut url =
            Url::parse(base).map_err(|e| DataError::Other(format!("invalid API URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| DataError::Other("API URL cannot take path segments".into()))?
            .pop_if_empty()
            .push(symbol.as_str());
        url.query_pairs_mut().extend_pairs(query);
        Ok(url)
    }

    /// Build the chart API URL for a symbol, range and bar interval.
    fn chart_url(symbol: &Symbol, range: &str, interval: &str) -> Result<Url, DataError> {
        Self::api_url(
            CHART_BASE_URL,
            symbol,
            &[("range", range), ("interval", interval)],
        )
    }

    fn summary_url(symbol: &Symbol) -> Result<Url, DataError> {
        Self::api_url(SUMMARY_BASE_URL, symbol, &[("modules", SUMMARY_MODULES)])
    }

    /// Unwrap the single chart result, mapping Yahoo's error block.
    fn chart_data(symbol: &Symbol, resp: ChartResponse) -> Result<ChartData, DataError> {
        let result = resp.chart.result.ok_or_else(|| match resp.chart.error {
            Some(err) if err.code == "Not Found" => DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            },
            Some(err) => {
                DataError::ResponseFormatChanged(format!("{}: {}", err.code, err.description))
            }
            None => DataError::ResponseFormatChanged("empty result with no error".into()),
        })?;

        result
            .into_iter()
            .next()
            .ok_or_else(|| DataError::ResponseFormatChanged("result array is empty".into()))
    }

    /// Pull market cap, P/E, sector and name out of a quoteSummary response.
    fn parse_fundamentals(
        symbol: &Symbol,
        resp: SummaryResponse,
    ) -> Result<Fundamentals, DataError> {
        let result = resp.quote_summary.result.ok_or_else(|| match resp.quote_summary.error {
            Some(err) if err.code == "Not Found" => DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            },
            Some(err) => {
                DataError::ResponseFormatChanged(format!("{}: {}", err.code, err.description))
            }
            None => DataError::ResponseFormatChanged("empty summary with no error".into()),
        })?;
        let data = result.into_iter().next().unwrap_or_default();

        let price_cap = data
            .price
            .as_ref()
            .and_then(|p| p.market_cap.as_ref())
            .and_then(|v| v.raw);
        let detail_cap = data
            .summary_detail
            .as_ref()
            .and_then(|d| d.market_cap.as_ref())
            .and_then(|v| v.raw);
        let pe = data
            .summary_detail
            .as_ref()
            .and_then(|d| d.trailing_pe.as_ref())
            .and_then(|v| v.raw);

        Ok(Fundamentals {
            market_cap: price_cap.or(detail_cap).filter(|v| v.is_finite()),
            pe: pe.filter(|v| v.is_finite()),
            sector: data
                .asset_profile
                .and_then(|a| a.sector)
                .filter(|s| !s.is_empty()),
            long_name: data.price.and_then(|p| p.long_name),
        })
    }

    /// Turn an intraday chart plus fundamentals into a live quote.
    fn parse_quote(
        symbol: &Symbol,
        resp: ChartResponse,
        fundamentals: Fundamentals,
    ) -> Result<Quote, DataError> {
        let data = Self::chart_data(symbol, resp)?;
        let meta = data.meta;

        let last_intraday_close = data
            .indicators
            .quote
            .first()
            .and_then(|q| q.close.iter().rev().find_map(|c| *c));

        let price = meta
            .regular_market_price
            .filter(|p| p.is_finite() && *p > 0.0)
            .or(last_intraday_close.filter(|p| p.is_finite() && *p > 0.0))
            .ok_or_else(|| DataError::MissingPrice {
                symbol: symbol.to_string(),
            })?;

        let previous_close = meta
            .previous_close
            .or(meta.chart_previous_close)
            .unwrap_or(price);
        let change = round2(price - previous_close);
        let change_percent = if previous_close != 0.0 {
            round2(change / previous_close * 100.0)
        } else {
            0.0
        };

        Ok(Quote {
            symbol: symbol.clone(),
            price: round2(price),
            change,
            change_percent,
            volume: meta.regular_market_volume.unwrap_or(0),
            market_cap: fundamentals.market_cap.map_or(0.0, |cap| round2(cap / 1e9)),
            pe: fundamentals.pe.map_or(0.0, round2),
            week52_low: meta.fifty_two_week_low.unwrap_or(0.0),
            week52_high: meta.fifty_two_week_high.unwrap_or(0.0),
            currency: meta.currency.unwrap_or_else(|| "USD".into()),
            exchange: meta.exchange_name.unwrap_or_else(|| "UNKNOWN".into()),
            long_name: Some(
                meta.long_name
                    .or(fundamentals.long_name)
                    .or(meta.short_name)
                    .unwrap_or_else(|| symbol.to_string()),
            ),
            sector: Some(
                fundamentals
                    .sector
                    .unwrap_or_else(|| UNKNOWN_SECTOR.into()),
            ),
            source: Provenance::Live,
        })
    }

    /// Turn a daily chart into a history series.
    ///
    /// Rows with no close are skipped. Yahoo sometimes repeats the current
    /// session as a trailing row; a row on the same date as the previous one
    /// replaces it, and a row dated earlier is dropped.
    fn parse_history(symbol: &Symbol, resp: ChartResponse) -> Result<HistorySeries, DataError> {
        let data = Self::chart_data(symbol, resp)?;
        let timestamps = data.timestamp.unwrap_or_default();
        let quote = data.indicators.quote.into_iter().next();

        let mut points: Vec<PricePoint> = Vec::with_capacity(timestamps.len());
        if let Some(quote) = quote {
            for (i, &ts) in timestamps.iter().enumerate() {
                let Some(close) = quote.close.get(i).copied().flatten() else {
                    continue;
                };
                let date = chrono::DateTime::from_timestamp(ts, 0)
                    .map(|dt| dt.naive_utc().date())
                    .ok_or_else(|| {
                        DataError::ResponseFormatChanged(format!("invalid timestamp: {ts}"))
                    })?;
                let point = PricePoint {
                    date,
                    close: round2(close),
                    volume: quote.volume.get(i).copied().flatten().unwrap_or(0),
                };
                match points.last_mut() {
                    Some(last) if last.date == date => *last = point,
                    Some(last) if last.date > date => {}
                    _ => points.push(point),
                }
            }
        }

        if points.is_empty() {
            return Err(DataError::EmptyHistory {
                symbol: symbol.to_string(),
            });
        }

        Ok(HistorySeries {
            symbol: symbol.clone(),
            points,
            source: Provenance::Live,
        })
    }

    /// Execute a GET with retry and circuit breaker logic, decoding the JSON body.
    fn fetch_json<T: DeserializeOwned>(&self, symbol: &Symbol, url: Url) -> Result<T, DataError> {
        if !self.circuit_breaker.is_allowed() {
            return Err(DataError::CircuitBreakerTripped);
        }

        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = backoff_delay(self.base_delay, attempt);
                tracing::debug!(%symbol, attempt, ?delay, "retrying request");
                std::thread::sleep(delay);
            }

            if !self.circuit_breaker.is_allowed() {
                return Err(DataError::CircuitBreakerTripped);
            }

            match self.client.get(url.clone()).send() {
                Ok(resp) => {
                    let status = resp.status();
                    match classify_status(status) {
                        StatusAction::Accept => {
                            let body: T = resp.json().map_err(|e| {
                                DataError::ResponseFormatChanged(format!(
                                    "failed to parse response for {symbol}: {e}"
                                ))
                            })?;
                            self.circuit_breaker.record_success();
                            return Ok(body);
                        }
                        StatusAction::Trip => {
                            self.circuit_breaker.trip();
                            return Err(DataError::CircuitBreakerTripped);
                        }
                        StatusAction::RateLimited => {
                            self.circuit_breaker.record_failure();
                            let retry_after = resp
                                .headers()
                                .get("retry-after")
                                .and_then(|v| v.to_str().ok())
                                .and_then(|v| v.parse::<u64>().ok())
                                .unwrap_or(60);
                            last_error = Some(DataError::RateLimited {
                                retry_after_secs: retry_after,
                            });
                        }
                        StatusAction::Retry => {
                            self.circuit_breaker.record_failure();
                            last_error =
                                Some(DataError::Other(format!("HTTP {status} for {symbol}")));
                        }
                        StatusAction::NotFound => {
                            return Err(DataError::SymbolNotFound {
                                symbol: symbol.to_string(),
                            });
                        }
                        StatusAction::Reject => {
                            return Err(DataError::Other(format!("HTTP {status} for {symbol}")));
                        }
                    }
                }
                Err(e) => {
                    self.circuit_breaker.record_failure();
                    if e.is_connect() || e.is_timeout() {
                        last_error = Some(DataError::NetworkUnreachable(e.to_string()));
                        continue;
                    }
                    return Err(DataError::NetworkUnreachable(e.to_string()));
                }
            }
        }

        Err(last_error.unwrap_or_else(|| DataError::Other("max retries exceeded".into())))
    }

    fn fetch_chart(
        &self,
        symbol: &Symbol,
        range: &str,
        interval: &str,
    ) -> Result<ChartResponse, DataError> {
        self.fetch_json(symbol, Self::chart_url(symbol, range, interval)?)
    }

    /// Fundamentals for a quote. Failures are logged and yield empty fundamentals.
    fn fetch_fundamentals(&self, symbol: &Symbol) -> Fundamentals {
        match Self::summary_url(symbol) {
            Ok(url) => self.fundamentals_at(symbol, url),
            Err(e) => {
                tracing::debug!(%symbol, error = %e, "fundamentals unavailable, using defaults");
                Fundamentals::default()
            }
        }
    }

    fn fundamentals_at(&self, symbol: &Symbol, url: Url) -> Fundamentals {
        let result = self
            .fetch_json::<SummaryResponse>(symbol, url)
            .and_then(|resp| Self::parse_fundamentals(symbol, resp));
        match result {
            Ok(fundamentals) => fundamentals,
            Err(e) => {
                tracing::debug!(%symbol, error = %e, "fundamentals unavailable, using defaults");
                Fundamentals::default()
            }
        }
    }
}

impl MarketDataProvider for YahooProvider {
    fn name(&self) -> &str {
        "yahoo_finance"
    }

    fn quote(&self, symbol: &Symbol) -> Result<Quote, DataError> {
        tracing::debug!(%symbol, "fetching live quote");
        let chart = self.fetch_chart(symbol, "1d", "1m")?;
        Self::parse_quote(symbol, chart, self.fetch_fundamentals(symbol))
    }

    fn history(&self, symbol: &Symbol, period: Period) -> Result<HistorySeries, DataError> {
        tracing::debug!(%symbol, %period, "fetching live history");
        let chart = self.fetch_chart(symbol, period.as_str(), "1d")?;
        Self::parse_history(symbol, chart)
    }

    fn is_available(&self) -> bool {
        self.circuit_breaker.is_allowed()
    }
}
