use crate::core::candidate::{EpitopeCandidate, ResidueRange};
use crate::core::io::fasta::SequenceRecord;
use crate::core::io::report::ReportEntry;
use crate::core::reference::{KnownEpitopeHit, locate_known_epitopes};
use crate::core::scoring::EpitopeScorer;
use crate::core::sequence::NormalizedSequence;
use crate::engine::config::PredictionConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use rayon::prelude::*;
use tracing::{debug, info, instrument, warn};

/// Everything one prediction needs, passed explicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionRequest {
    pub label: Option<String>,
    pub sequence: String,
    pub structure_id: Option<String>,
    pub config: PredictionConfig,
}

impl PredictionRequest {
    pub fn new(sequence: impl Into<String>, config: PredictionConfig) -> Self {
        Self {
            label: None,
            sequence: sequence.into(),
            structure_id: None,
            config,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_structure(mut self, structure_id: impl Into<String>) -> Self {
        self.structure_id = Some(structure_id.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PredictionOutcome {
    /// No sequence was supplied; scoring did not run.
    MissingSequence,
    /// Scoring ran and no window met the threshold.
    NoMatches,
    Found(Vec<EpitopeCandidate>),
}

impl PredictionOutcome {
    pub fn candidates(&self) -> &[EpitopeCandidate] {
        match self {
            PredictionOutcome::Found(candidates) => candidates,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: String,
    pub sequence_length: usize,
    pub outcome: PredictionOutcome,
    pub known_hits: Vec<KnownEpitopeHit>,
}

impl Prediction {
    pub fn candidates(&self) -> &[EpitopeCandidate] {
        self.outcome.candidates()
    }

    /// One residue range per candidate, in scan order, never merged.
    pub fn ranges(&self) -> Vec<ResidueRange> {
        self.candidates().iter().map(EpitopeCandidate::range).collect()
    }

    pub fn report_entry(&self) -> ReportEntry<'_> {
        ReportEntry {
            sequence_id: &self.label,
            sequence_length: self.sequence_length,
            candidates: self.candidates(),
        }
    }
}

#[instrument(skip_all, name = "prediction_workflow")]
pub fn run(
    request: &PredictionRequest,
    reporter: &ProgressReporter,
) -> Result<Prediction, EngineError> {
    let scorer = EpitopeScorer::new(
        request.config.scoring.window,
        request.config.scoring.threshold,
    )?;
    let label = request.label.as_deref().unwrap_or("sequence");

    reporter.phase("Scoring epitopes", || {
        Ok(predict_one(label, &request.sequence, &scorer, &request.config))
    })
}

/// Scores every record in parallel. Results keep the input order.
#[instrument(skip_all, name = "batch_prediction_workflow", fields(records = records.len()))]
pub fn run_batch(
    records: &[SequenceRecord],
    config: &PredictionConfig,
    reporter: &ProgressReporter,
) -> Result<Vec<Prediction>, EngineError> {
    let scorer = EpitopeScorer::new(config.scoring.window, config.scoring.threshold)?;

    reporter.report(Progress::PhaseStart {
        name: "Scoring sequences",
    });
    reporter.report(Progress::TaskStart {
        total_steps: records.len() as u64,
    });

    let predictions: Vec<Prediction> = records
        .par_iter()
        .map(|record| {
            let prediction = predict_one(record.label(), &record.sequence, &scorer, config);
            reporter.report(Progress::TaskIncrement);
            prediction
        })
        .collect();

    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);

    let with_hits = predictions
        .iter()
        .filter(|p| !p.candidates().is_empty())
        .count();
    info!(
        "Batch complete: {} of {} sequence(s) have epitope candidates.",
        with_hits,
        predictions.len()
    );

    Ok(predictions)
}

fn predict_one(
    label: &str,
    raw_sequence: &str,
    scorer: &EpitopeScorer,
    config: &PredictionConfig,
) -> Prediction {
    if raw_sequence.trim().is_empty() {
        warn!("No sequence provided for '{}'; skipping scoring.", label);
        return Prediction {
            label: label.to_string(),
            sequence_length: 0,
            outcome: PredictionOutcome::MissingSequence,
            known_hits: Vec::new(),
        };
    }

    let sequence = NormalizedSequence::new(raw_sequence);
    debug!(
        "Scoring '{}' ({} residues, window {}, threshold {}).",
        label,
        sequence.len(),
        scorer.window(),
        scorer.threshold()
    );

    let candidates = scorer.scan(&sequence);
    let known_hits = if config.locate_known_epitopes {
        locate_known_epitopes(&sequence)
    } else {
        Vec::new()
    };

    let outcome = if candidates.is_empty() {
        info!("No epitope candidates found for '{}'.", label);
        PredictionOutcome::NoMatches
    } else {
        info!(
            "Found {} epitope candidate(s) for '{}'.",
            candidates.len(),
            label
        );
        PredictionOutcome::Found(candidates)
    };

    Prediction {
        label: label.to_string(),
        sequence_length: sequence.len(),
        outcome,
        known_hits,
    }
}
