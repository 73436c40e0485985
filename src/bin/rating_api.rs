//! HTTP rating endpoint (AWS Lambda)
//!
//! Accepts a pricing configuration plus the broker's current selection and
//! returns the bucketed adjustment totals, the premium breakdown, and
//! optionally the outcome of a rating-formula test.

use car_rating::{
    evaluate, AdjustmentTotals, LiabilityTier, PremiumBreakdown, ProductPricingConfig, QuoteState,
    SelectableItem, Token,
};
use chrono::{DateTime, Utc};
use lambda_http::{run, service_fn, Body, Error, Request, Response};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Deserialize)]
struct RatingRequest {
    /// Product pricing configuration; absent means "rate an empty catalog"
    #[serde(default)]
    config: Option<ProductPricingConfig>,

    /// Saved selection set to replay onto the catalog
    #[serde(default)]
    selection: Vec<SelectableItem>,

    /// Liability tier to select
    #[serde(default)]
    tier_id: Option<u32>,

    /// Base premium for the currency-correct breakdown
    #[serde(default)]
    base_premium: Option<f64>,

    /// Optional formula test from the rating configurator
    #[serde(default)]
    formula: Option<FormulaRequest>,
}

#[derive(Debug, Deserialize)]
struct FormulaRequest {
    steps: Vec<Token>,
    #[serde(default)]
    test_values: HashMap<String, String>,
}

#[derive(Debug, Serialize)]
struct RatingResponse {
    items: Vec<SelectableItem>,
    totals: AdjustmentTotals,
    combined: f64,
    selected_tier: Option<LiabilityTier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    breakdown: Option<PremiumBreakdown>,
    #[serde(skip_serializing_if = "Option::is_none")]
    formula: Option<FormulaOutcome>,
    quoted_at: DateTime<Utc>,
}

/// Formula failures are an explicit message, never a silent zero
#[derive(Debug, Serialize)]
struct FormulaOutcome {
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

async fn handler(event: Request) -> Result<Response<Body>, Error> {
    let request: RatingRequest = match serde_json::from_slice(event.body()) {
        Ok(request) => request,
        Err(err) => {
            log::warn!("rejecting malformed rating request: {err}");
            let body = serde_json::json!({ "error": format!("malformed request: {err}") });
            return Ok(Response::builder()
                .status(400)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))?);
        }
    };

    let mut state = QuoteState::from_config(request.config.as_ref());
    if !request.selection.is_empty() {
        state = state.replay(&request.selection);
    }
    if let Some(tier_id) = request.tier_id {
        state = state.toggle_liability_tier(tier_id);
    }

    let totals = state.totals();
    let formula = request.formula.map(|f| match evaluate(&f.steps, &f.test_values) {
        Ok(result) => FormulaOutcome {
            result: Some(result),
            error: None,
        },
        Err(err) => FormulaOutcome {
            result: None,
            error: Some(err.to_string()),
        },
    });

    let response = RatingResponse {
        combined: totals.combined(),
        breakdown: request.base_premium.map(|base| totals.apply(base)),
        selected_tier: state.current_tier().cloned(),
        items: state.items,
        totals,
        formula,
        quoted_at: Utc::now(),
    };

    Ok(Response::builder()
        .status(200)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&response)?))?)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
