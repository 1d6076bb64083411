use std::fmt;

use anyhow::Context;
use crop_core::prediction::{FormattedPrediction, PredictionResult};
use crop_core::record::Record;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::PredictArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct PredictResponse {
    record: Record,
    prediction: PredictionResult,
    display: FormattedPrediction,
}

impl fmt::Display for PredictResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.display, f)
    }
}

/// Handle `cropcast predict`.
pub fn handle(args: &PredictArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let record = build_record(args)?;
    record.validate()?;

    let prediction = ctx
        .service
        .predict(&record)
        .context("prediction failed")?;

    let response = PredictResponse {
        display: prediction.formatted(ctx.decimals()),
        record,
        prediction,
    };
    output(&response, flags.format)
}

fn build_record(args: &PredictArgs) -> anyhow::Result<Record> {
    if let Some(json) = &args.record {
        return serde_json::from_str(json).context("--record is not a valid JSON record");
    }

    Ok(Record::new(
        args.state.clone().unwrap_or_default(),
        args.district.clone().unwrap_or_default(),
        args.crop.clone().unwrap_or_default(),
        args.season.clone().unwrap_or_default(),
        args.area,
    ))
}
