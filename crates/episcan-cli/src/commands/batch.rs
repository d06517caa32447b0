use super::{CommandContext, write_entries};
use crate::cli::BatchArgs;
use crate::config::build_config;
use crate::error::Result;
use episcan::core::io::fasta::read_sequences_from_path;
use episcan::engine::progress::ProgressReporter;
use episcan::workflows::predict::{self, Prediction, PredictionOutcome};
use tokio::task;
use tracing::{info, warn};

pub async fn run(args: BatchArgs, ctx: &CommandContext) -> Result<()> {
    let app = build_config(ctx.config_path.as_deref(), &args.scoring, false)?;

    let records = read_sequences_from_path(&args.input)?;
    info!("Loaded {} sequence(s) from {:?}", records.len(), args.input);

    let handler = ctx.progress_handler();
    let reporter = ProgressReporter::with_callback(handler.get_callback());
    let predictions =
        task::block_in_place(|| predict::run_batch(&records, &app.prediction, &reporter))?;

    for prediction in predictions
        .iter()
        .filter(|p| p.outcome == PredictionOutcome::MissingSequence)
    {
        warn!("Record '{}' has no sequence data.", prediction.label);
    }

    let entries: Vec<_> = predictions.iter().map(Prediction::report_entry).collect();
    write_entries(&entries, app.format, app.output.as_deref())?;

    Ok(())
}
