use super::{CommandContext, write_entries};
use crate::cli::PredictArgs;
use crate::config::{AppConfig, build_config};
use crate::data::StructureStore;
use crate::error::Result;
use crate::utils::progress::apply_fetch_progress;
use episcan::core::candidate::EpitopeCandidate;
use episcan::core::io::fasta::read_sequences_from_path;
use episcan::core::io::report::{NO_MATCHES_MESSAGE, ReportFormat};
use episcan::core::reference::KnownEpitopeHit;
use episcan::engine::progress::ProgressReporter;
use episcan::structure::StructureId;
use episcan::workflows::overlay;
use episcan::workflows::predict::{self, PredictionOutcome, PredictionRequest};
use std::fs;
use std::path::PathBuf;
use tracing::{error, info, warn};

pub async fn run(args: PredictArgs, ctx: &CommandContext) -> Result<()> {
    let app = build_config(ctx.config_path.as_deref(), &args.scoring, args.no_known)?;

    let (label, sequence) = load_sequence(&args)?;
    let mut request = PredictionRequest::new(sequence, app.prediction.clone());
    if let Some(label) = label {
        request = request.with_label(label);
    }
    if let Some(pdb) = &args.pdb {
        request = request.with_structure(pdb.clone());
    }

    let handler = ctx.progress_handler();
    let reporter = ProgressReporter::with_callback(handler.get_callback());
    let prediction = predict::run(&request, &reporter)?;

    if prediction.outcome == PredictionOutcome::MissingSequence {
        eprintln!("Warning: Please enter a protein sequence.");
        return Ok(());
    }

    write_entries(
        &[prediction.report_entry()],
        app.format,
        app.output.as_deref(),
    )?;
    if let Some(notice) = no_match_notice(&prediction.outcome, app.format) {
        eprintln!("{}", notice);
    }

    if !prediction.known_hits.is_empty() {
        if app.format == ReportFormat::Text {
            print_known_hits(&prediction.known_hits);
        } else {
            for hit in &prediction.known_hits {
                info!(
                    "Known epitope {} ({}) found at {}.",
                    hit.epitope.name, hit.epitope.sequence, hit.range
                );
            }
        }
    }

    if let Some(raw_id) = &request.structure_id {
        match show_structure(raw_id, prediction.candidates(), &app, args.viewer_out, ctx, &reporter)
            .await
        {
            Ok(path) => {
                eprintln!(
                    "✓ 3D structure with highlighted epitopes written to {}",
                    path.display()
                );
            }
            Err(e) => {
                error!("Structure overlay for '{}' failed: {}", raw_id, e);
                eprintln!("Error loading structure: {}", e);
            }
        }
    }

    Ok(())
}

/// Returns the optional record label and the raw sequence to score.
fn load_sequence(args: &PredictArgs) -> Result<(Option<String>, String)> {
    if let Some(sequence) = &args.sequence {
        return Ok((None, sequence.clone()));
    }
    let Some(path) = &args.input else {
        return Ok((None, String::new()));
    };

    let mut records = read_sequences_from_path(path)?;
    if records.len() > 1 {
        warn!(
            "{:?} contains {} records; only the first is scored. Use 'episcan batch' to score all of them.",
            path,
            records.len()
        );
    }
    if records.is_empty() {
        return Ok((None, String::new()));
    }
    let first = records.swap_remove(0);
    Ok((first.id, first.sequence))
}

/// The text report already carries the no-match line; machine formats get it on stderr.
fn no_match_notice(outcome: &PredictionOutcome, format: ReportFormat) -> Option<&'static str> {
    (*outcome == PredictionOutcome::NoMatches && format != ReportFormat::Text)
        .then_some(NO_MATCHES_MESSAGE)
}

fn print_known_hits(hits: &[KnownEpitopeHit]) {
    println!();
    println!("Known disease-associated epitopes in this sequence:");
    for hit in hits {
        println!(
            "  {} ({}) at {}, recognized by {}",
            hit.epitope.name, hit.epitope.sequence, hit.range, hit.epitope.antibody
        );
    }
}

async fn show_structure(
    raw_id: &str,
    candidates: &[EpitopeCandidate],
    app: &AppConfig,
    viewer_out: Option<PathBuf>,
    ctx: &CommandContext,
    reporter: &ProgressReporter<'_>,
) -> Result<PathBuf> {
    let id = StructureId::parse(raw_id)?;
    let store = StructureStore::new(&app.structure)?;

    let pb = ctx.download_bar(id.as_str());
    let fetched = store
        .fetch(&id, false, |progress| apply_fetch_progress(&pb, progress))
        .await;
    pb.finish_and_clear();
    let text = fetched?;

    let overlay = overlay::run(&id, &text, candidates, &app.prediction.overlay, reporter)?;
    if !overlay.out_of_range.is_empty() {
        eprintln!(
            "Note: {} highlighted range(s) extend past the last residue of {}.",
            overlay.out_of_range.len(),
            id
        );
    }

    let path = viewer_out.unwrap_or_else(|| default_viewer_path(&id));
    fs::write(&path, &overlay.html)?;
    Ok(path)
}

fn default_viewer_path(id: &StructureId) -> PathBuf {
    PathBuf::from(format!("{}_epitopes.html", id))
}
