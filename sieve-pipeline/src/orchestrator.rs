use std::io;

use log::{debug, error, info, warn};
use tokio::sync::watch;

use sieve_core::errors::{Result, SieveError, Stage};
use sieve_core::index::{IndexedSequences, SequenceIndexer};
use sieve_core::models::{
    CorpusParts, PositionAnnotationMap, ReferenceSequence, SequenceCorpus, TreatmentDictionary,
    TreatmentGroup,
};
use sieve_core::transpose::transpose_to_width;
use sieve_io::{
    build_annotation_map, build_treatment_dictionary, merge_mismatch_table, parse_multi_record,
    parse_single_record, read_p_values,
};

use crate::cancel::CancelToken;
use crate::config::PipelineConfig;
use crate::consumer::CorpusConsumer;
use crate::fetch::InputFetcher;
use crate::state::PipelineState;

///
/// Inputs shared by the later stages once the reference, the p-values and the
/// treatment dictionary are loaded. The dictionary is written only by the
/// mismatch merge; everything after it reads.
///
struct PipelineContext {
    reference: ReferenceSequence,
    p_values: Vec<f64>,
    dictionary: TreatmentDictionary,
}

impl PipelineContext {
    fn width(&self) -> usize {
        self.reference.len()
    }
}

///
/// Runs the ingestion stages in dependency order and produces a [SequenceCorpus].
///
/// The run either publishes a fully validated corpus or fails with the first error
/// raised by any stage. The p-value branch runs concurrently with the treatment
/// branch on the same task and is joined before anything downstream starts.
///
pub struct Pipeline<F> {
    fetcher: F,
    config: PipelineConfig,
    state: watch::Sender<PipelineState>,
}

impl<F: InputFetcher> Pipeline<F> {
    pub fn new(fetcher: F, config: PipelineConfig) -> Self {
        let (state, _) = watch::channel(PipelineState::Pending);
        Pipeline {
            fetcher,
            config,
            state,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Current state of the most recent run.
    pub fn state(&self) -> PipelineState {
        self.state.borrow().clone()
    }

    /// Receive every subsequent state change.
    pub fn subscribe(&self) -> watch::Receiver<PipelineState> {
        self.state.subscribe()
    }

    ///
    /// Run every stage and return the published corpus.
    ///
    /// # Arguments
    /// - cancel: token that abandons the run at the next suspension point or stage boundary
    ///
    pub async fn run(&self, cancel: &CancelToken) -> Result<SequenceCorpus> {
        self.state.send_replace(PipelineState::Pending);

        match self.execute(cancel).await {
            Ok(corpus) => {
                info!("Published {}", corpus);
                self.state.send_replace(PipelineState::Published);
                Ok(corpus)
            }
            Err(err) => {
                error!("Pipeline failed: {}", err);
                self.state.send_replace(PipelineState::Failed(err.clone()));
                Err(err)
            }
        }
    }

    ///
    /// Run every stage and, only on success, hand the corpus to `consumer`.
    ///
    pub async fn run_and_publish<C>(&self, cancel: &CancelToken, consumer: &mut C) -> Result<SequenceCorpus>
    where
        C: CorpusConsumer + ?Sized,
    {
        let corpus = self.run(cancel).await?;
        consumer.consume(&corpus);
        Ok(corpus)
    }

    async fn execute(&self, cancel: &CancelToken) -> Result<SequenceCorpus> {
        let reference = self.load_reference(cancel).await?;
        let width = reference.len();

        let (p_values, dictionary) = tokio::try_join!(
            self.load_p_values(width, cancel),
            self.load_dictionary(cancel),
        )?;

        let mut context = PipelineContext {
            reference,
            p_values,
            dictionary,
        };

        self.merge_mismatch(&mut context, cancel).await?;
        let indexed = self.index_sequences(&context, cancel).await?;
        let annotations = self.build_annotations(&context, cancel).await?;

        self.transpose_all(context, indexed, annotations, cancel)
    }

    fn enter(&self, stage: Stage, cancel: &CancelToken) -> Result<()> {
        if cancel.is_cancelled() {
            return Err(SieveError::Cancelled { stage });
        }
        info!("Stage {}", stage);
        self.state.send_replace(PipelineState::Running(stage));
        Ok(())
    }

    async fn fetch(&self, name: &str) -> io::Result<String> {
        match self.config.fetch_timeout() {
            Some(limit) => match tokio::time::timeout(limit, self.fetcher.fetch(name)).await {
                Ok(fetched) => fetched,
                Err(_) => Err(io::Error::new(
                    io::ErrorKind::TimedOut,
                    format!("timed out after {:?}", limit),
                )),
            },
            None => self.fetcher.fetch(name).await,
        }
    }

    ///
    /// Enter a load stage and suspend until the input arrives or the run is cancelled.
    ///
    async fn load(&self, stage: Stage, name: &str, cancel: &CancelToken) -> Result<String> {
        self.enter(stage, cancel)?;

        let text = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(SieveError::Cancelled { stage }),
            fetched = self.fetch(name) => fetched.map_err(|err| SieveError::Io {
                stage,
                resource: name.to_string(),
                message: err.to_string(),
            })?,
        };

        debug!("Fetched {} ({} bytes)", name, text.len());
        Ok(text)
    }

    async fn load_reference(&self, cancel: &CancelToken) -> Result<ReferenceSequence> {
        let text = self
            .load(Stage::LoadReference, &self.config.inputs.reference, cancel)
            .await?;
        let reference = ReferenceSequence::from(parse_single_record(&text)?);
        info!("Reference {}", reference);
        Ok(reference)
    }

    async fn load_p_values(&self, width: usize, cancel: &CancelToken) -> Result<Vec<f64>> {
        let text = self
            .load(Stage::LoadPValues, &self.config.inputs.p_values, cancel)
            .await?;
        let p_values = read_p_values(&text, width)?;
        debug!("Loaded {} p-values", p_values.len());
        Ok(p_values)
    }

    async fn load_dictionary(&self, cancel: &CancelToken) -> Result<TreatmentDictionary> {
        let text = self
            .load(Stage::LoadTreatment, &self.config.inputs.treatment, cancel)
            .await?;

        self.enter(Stage::BuildDictionary, cancel)?;
        let dictionary = build_treatment_dictionary(&text)?;
        let (vaccine, placebo) = dictionary.group_sizes();
        info!(
            "Treatment dictionary holds {} samples ({} vaccine, {} placebo)",
            dictionary.len(),
            vaccine,
            placebo
        );
        Ok(dictionary)
    }

    async fn merge_mismatch(&self, context: &mut PipelineContext, cancel: &CancelToken) -> Result<()> {
        let text = self
            .load(Stage::LoadMismatch, &self.config.inputs.mismatch, cancel)
            .await?;

        self.enter(Stage::MergeMismatch, cancel)?;
        let width = context.width();
        let merged = merge_mismatch_table(&text, &mut context.dictionary, width)?;
        info!("Merged mismatch vectors for {} samples", merged);
        Ok(())
    }

    async fn index_sequences(&self, context: &PipelineContext, cancel: &CancelToken) -> Result<IndexedSequences> {
        let text = self
            .load(Stage::LoadBreakthrough, &self.config.inputs.breakthrough, cancel)
            .await?;

        self.enter(Stage::IndexSequences, cancel)?;
        let indexed = SequenceIndexer::new(&context.reference, &context.dictionary)
            .index_all(parse_multi_record(&text))?;
        info!(
            "Indexed {} breakthrough sequences ({} vaccine, {} placebo)",
            indexed.num_vaccine + indexed.num_placebo,
            indexed.num_vaccine,
            indexed.num_placebo
        );
        Ok(indexed)
    }

    async fn build_annotations(&self, context: &PipelineContext, cancel: &CancelToken) -> Result<PositionAnnotationMap> {
        let text = self
            .load(Stage::LoadAnnotations, &self.config.inputs.annotations, cancel)
            .await?;

        self.enter(Stage::BuildAnnotationMap, cancel)?;
        let width = context.width();
        let annotations = build_annotation_map(&text, width)?;

        let missing = annotations.missing_positions(width);
        if missing > 0 {
            warn!("{} of {} positions have no annotation", missing, width);
        }
        Ok(annotations)
    }

    fn transpose_all(
        &self,
        context: PipelineContext,
        indexed: IndexedSequences,
        annotations: PositionAnnotationMap,
        cancel: &CancelToken,
    ) -> Result<SequenceCorpus> {
        self.enter(Stage::TransposeAll, cancel)?;
        let width = context.width();

        let raw_by_position = transpose_to_width(&indexed.raw_by_record, width)?;
        let vaccine_by_position = transpose_to_width(&indexed.group_matrix(TreatmentGroup::Vaccine), width)?;
        let placebo_by_position = transpose_to_width(&indexed.group_matrix(TreatmentGroup::Placebo), width)?;

        if cancel.is_cancelled() {
            return Err(SieveError::Cancelled {
                stage: Stage::TransposeAll,
            });
        }

        SequenceCorpus::new(CorpusParts {
            reference: context.reference,
            vaccine_group: indexed.vaccine,
            placebo_group: indexed.placebo,
            raw_by_record: indexed.raw_by_record,
            raw_by_position,
            vaccine_by_position,
            placebo_by_position,
            annotations,
            p_values: context.p_values,
        })
    }
}
