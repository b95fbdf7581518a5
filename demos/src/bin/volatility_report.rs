//! Volatility report for a synthetic index series.
//!
//! Builds two years of deterministic daily bars, then prints the volatility
//! cone, per-period snapshots, a priced option chain and the smile and skew
//! recovered from that chain as one JSON document.

use chrono::{Days, NaiveDate};
use options_analytics::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

const TRADING_DAYS: usize = 520;
const EXPIRY_DAYS: f64 = 30.0;

#[derive(Serialize)]
struct Report {
    as_of: Option<NaiveDate>,
    spot: f64,
    cone: Vec<ConeBand>,
    snapshots: Vec<VolatilitySnapshot>,
    chain: Vec<ChainRow>,
    smile: Vec<SmilePoint>,
    skew: Option<VolatilitySkew>,
    atm_iv_level: Option<IvLevel>,
    spread_signal: Option<SpreadSignal>,
}

/// Daily bars with a slowly varying volatility regime and overnight gaps.
fn synthetic_series(start: NaiveDate, count: usize) -> Result<PriceSeries, AnalyticsError> {
    let mut close: f64 = 17_000.0;
    let mut bars = Vec::with_capacity(count);

    for i in 0..count {
        let t = i as f64;
        let regime = 0.008 + 0.006 * (t / 90.0).sin().abs();
        let open = close * (0.15 * regime * (t * 2.1).sin()).exp();
        close = open * (regime * (t * 0.77).sin() + 0.0004).exp();
        let high = open.max(close) * (1.0 + 0.4 * regime);
        let low = open.min(close) * (1.0 - 0.4 * regime);

        let date = start
            .checked_add_days(Days::new(i as u64))
            .ok_or_else(|| AnalyticsError::InvalidSeries {
                index: i,
                message: "date out of range".to_string(),
            })?;
        bars.push(PriceBar::new(date, open, high, low, close, 50_000.0));
    }

    PriceSeries::new(bars)
}

/// Market quotes from a downward sloping smile around `atm_vol`.
fn market_quotes(spot: f64, strikes: &[f64], time: f64, rate: f64, atm_vol: f64) -> Vec<OptionQuote> {
    let mut quotes = Vec::with_capacity(strikes.len() * 2);
    for &strike in strikes {
        let vol = atm_vol + 0.3 * (1.0 - strike / spot);
        for option_type in [OptionType::Call, OptionType::Put] {
            let terms = ContractTerms::new(spot, strike, time, rate, option_type);
            match BlackScholes::price(&terms, vol) {
                Ok(price) => quotes.push(OptionQuote::new(strike, price, option_type)),
                Err(e) => warn!("skipping quote at {}: {}", strike, e),
            }
        }
    }
    quotes
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let config = AnalyticsConfig::default();
    let start = NaiveDate::from_ymd_opt(2023, 1, 2).ok_or("invalid start date")?;
    let series = synthetic_series(start, TRADING_DAYS)?;
    let spot = series.bars().last().map(|bar| bar.close).ok_or("empty series")?;
    info!("built {} bars, last close {:.2}", series.len(), spot);

    let cone = ConeBuilder::new(config.cone.clone()).build(&series);
    info!("cone populated for {} windows", cone.len());

    let snapshots = volatility_snapshots(&series, &DEFAULT_SNAPSHOT_PERIODS);

    let time = EXPIRY_DAYS / 365.0;
    let rate = config.risk_free_rate;
    let atm = (spot / 100.0).round() * 100.0;
    let strikes: Vec<f64> = (-5..=5).map(|i| atm + f64::from(i) * 100.0).collect();

    let hv_30 = snapshots
        .iter()
        .find(|snapshot| snapshot.period_days == 30)
        .map(|snapshot| snapshot.historical);
    let chain_vol = hv_30.unwrap_or(0.2);
    let chain = price_chain(spot, &strikes, time, rate, chain_vol);

    let quotes = market_quotes(spot, &strikes, time, rate, chain_vol + 0.03);
    let solver = ImpliedVolSolver::new(config.solver.clone());
    let smile = volatility_smile_with(&solver, spot, &quotes, time, rate)?;
    let skew = volatility_skew(spot, &smile);

    let atm_iv = smile
        .iter()
        .filter(|point| point.option_type == OptionType::Call)
        .min_by(|a, b| (a.strike - spot).abs().total_cmp(&(b.strike - spot).abs()))
        .map(|point| point.implied_volatility);
    let spread_signal = atm_iv
        .zip(hv_30)
        .map(|(iv, hv)| VolatilitySpread::new(hv, iv).signal());

    if let Some(signal) = spread_signal {
        info!("30-day HV against ATM IV: {:?}", signal);
    }

    let report = Report {
        as_of: series.last_date(),
        spot,
        cone,
        snapshots,
        chain,
        smile,
        skew,
        atm_iv_level: atm_iv.map(IvLevel::classify),
        spread_signal,
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    info!("Report completed successfully");

    Ok(())
}
