//! Editor Orchestrator
//!
//! Runs the stage machine:
//!
//! ```text
//! Planning -> PlanReview -> Researching -> ResearchReview -> Drafting -> DraftReview
//!     ^                                                                     |
//!     +---------------------------- Retry <--- (any review rejects) --------+
//!                                     |                                     |
//!                                   Done <------------ Success <------------+
//! ```
//!
//! Every rejection restarts at `Planning` with the revised topic. Provider and
//! persistence errors abort the run; recorder errors never do.

use std::future::Future;
use std::sync::Arc;

use content_cascade_core::{
    ArtifactStore, CoreError, CoreResult, DraftProvider, ImageProvider, PlanProvider,
    ProgressRecorder, ResearchProvider,
};
use content_cascade_quality_gates::{
    draft_feedback, gate_draft, gate_plan, gate_research, mutate_topic, plan_feedback,
    research_feedback, Diagnostic,
};
use tokio::sync::mpsc;

use super::{
    EditorConfig, EditorEvent, CREATE_PLAN, EDITOR_AGENT, EXECUTE_RESEARCH, IMAGE_AGENT,
    RESEARCH_AGENT, RETRIEVE_IMAGES, START_EDITING, WRITER_AGENT, WRITE_ARTICLE,
};
use crate::models::iteration::{
    EditorStage, IterationOutcome, IterationRecord, RunOutcome, RunStatus,
};

/// Capabilities injected into the editor
#[derive(Clone)]
pub struct EditorProviders {
    pub plan: Arc<dyn PlanProvider>,
    pub research: Arc<dyn ResearchProvider>,
    pub draft: Arc<dyn DraftProvider>,
    pub images: Arc<dyn ImageProvider>,
    pub store: Arc<dyn ArtifactStore>,
    pub recorder: Arc<dyn ProgressRecorder>,
}

/// Drives one topic through the approve/revise loop
pub struct Editor {
    config: EditorConfig,
    providers: EditorProviders,
    event_tx: Option<mpsc::Sender<EditorEvent>>,
}

impl Editor {
    pub fn new(config: EditorConfig, providers: EditorProviders) -> Self {
        Self {
            config,
            providers,
            event_tx: None,
        }
    }

    /// Emit `EditorEvent`s on `tx`. The receiver must keep draining it.
    pub fn with_events(mut self, tx: mpsc::Sender<EditorEvent>) -> Self {
        self.event_tx = Some(tx);
        self
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Run the loop for `topic` until an article is accepted or the budget
    /// is spent.
    pub async fn run(&self, topic: &str) -> CoreResult<RunOutcome> {
        if topic.trim().is_empty() {
            return Err(CoreError::validation("topic must not be empty"));
        }
        if self.config.max_iterations == 0 {
            return Err(CoreError::validation("max_iterations must be at least 1"));
        }

        self.begin(EDITOR_AGENT, START_EDITING);
        let result = self.drive(topic.to_string()).await;
        if let Err(e) = &result {
            tracing::error!(error = %e, "editing process aborted");
        }
        result
    }

    async fn drive(&self, mut topic: String) -> CoreResult<RunOutcome> {
        let mut record = IterationRecord::new(1);
        let mut stage = EditorStage::Planning;
        let mut status = RunStatus::Exhausted;
        let mut images = Vec::new();

        tracing::info!(iteration = 1, %topic, "iteration started");
        self.emit(EditorEvent::IterationStarted {
            iteration: 1,
            topic: topic.clone(),
        })
        .await;

        while !stage.is_terminal() {
            tracing::info!(iteration = record.iteration, %stage, "entering stage");
            self.emit(EditorEvent::StageEntered {
                iteration: record.iteration,
                stage,
            })
            .await;

            stage = match stage {
                EditorStage::Planning => {
                    record.plan = self
                        .step(
                            RESEARCH_AGENT,
                            CREATE_PLAN,
                            self.providers.plan.create_plan(&topic),
                        )
                        .await?;
                    EditorStage::PlanReview
                }
                EditorStage::PlanReview => {
                    if gate_plan(&record.plan) {
                        EditorStage::Researching
                    } else {
                        let feedback = plan_feedback(&record.plan);
                        self.reject(&mut record, stage, feedback).await
                    }
                }
                EditorStage::Researching => {
                    record.research = self
                        .step(
                            RESEARCH_AGENT,
                            EXECUTE_RESEARCH,
                            self.providers.research.execute(&record.plan),
                        )
                        .await?;
                    EditorStage::ResearchReview
                }
                EditorStage::ResearchReview => {
                    if gate_research(&record.research) {
                        EditorStage::Drafting
                    } else {
                        let feedback = research_feedback(&record.research);
                        self.reject(&mut record, stage, feedback).await
                    }
                }
                EditorStage::Drafting => {
                    let draft = self
                        .step(
                            WRITER_AGENT,
                            WRITE_ARTICLE,
                            self.providers.draft.write(&record.research),
                        )
                        .await?;
                    record.draft = Some(draft);
                    EditorStage::DraftReview
                }
                EditorStage::DraftReview => {
                    let draft = record.draft.clone().unwrap_or_default();
                    if gate_draft(&draft, &record.research) {
                        EditorStage::Success
                    } else {
                        let feedback = draft_feedback(&draft, &record.research);
                        self.reject(&mut record, stage, feedback).await
                    }
                }
                EditorStage::Success => {
                    let draft = record.draft.as_deref().ok_or_else(|| {
                        CoreError::internal("accepted iteration has no draft")
                    })?;
                    let article_path = self
                        .providers
                        .store
                        .save_article(record.iteration, draft)
                        .await?;
                    record.outcome = IterationOutcome::Accepted;

                    images = self.fetch_images(&topic).await;

                    tracing::info!(
                        iteration = record.iteration,
                        path = %article_path.display(),
                        "article accepted"
                    );
                    self.emit(EditorEvent::Completed {
                        iteration: record.iteration,
                        article_path: article_path.clone(),
                    })
                    .await;
                    status = RunStatus::Completed {
                        iteration: record.iteration,
                        article_path,
                    };
                    EditorStage::Done
                }
                EditorStage::Retry => {
                    let diagnostic = record
                        .rejection()
                        .cloned()
                        .ok_or_else(|| CoreError::internal("retry without a rejection"))?;
                    topic = mutate_topic(&topic, &diagnostic);

                    if record.iteration >= self.config.max_iterations {
                        tracing::warn!(
                            iterations = record.iteration,
                            "maximum iterations reached without an accepted article"
                        );
                        self.emit(EditorEvent::Exhausted {
                            iterations: record.iteration,
                        })
                        .await;
                        EditorStage::Done
                    } else {
                        record = IterationRecord::new(record.iteration + 1);
                        tracing::info!(iteration = record.iteration, %topic, "iteration started");
                        self.emit(EditorEvent::IterationStarted {
                            iteration: record.iteration,
                            topic: topic.clone(),
                        })
                        .await;
                        EditorStage::Planning
                    }
                }
                EditorStage::Done => EditorStage::Done,
            };
        }

        self.finish(EDITOR_AGENT, START_EDITING);
        let report = match self.providers.recorder.report() {
            Ok(report) => {
                tracing::info!("\n{}", report);
                report
            }
            Err(e) => {
                tracing::warn!(error = %e, "progress report unavailable");
                String::new()
            }
        };

        Ok(RunOutcome {
            status,
            iterations_run: record.iteration,
            final_topic: topic,
            images,
            report,
        })
    }

    /// Record a rejection and move to `Retry`
    async fn reject(
        &self,
        record: &mut IterationRecord,
        stage: EditorStage,
        feedback: Diagnostic,
    ) -> EditorStage {
        tracing::warn!(
            iteration = record.iteration,
            %stage,
            feedback = %feedback,
            "quality gate rejected artifact"
        );
        self.emit(EditorEvent::GateRejected {
            iteration: record.iteration,
            stage,
            feedback: feedback.clone(),
        })
        .await;
        record.reject(feedback);
        EditorStage::Retry
    }

    /// Best-effort image retrieval; failures leave the run successful
    async fn fetch_images(&self, topic: &str) -> Vec<String> {
        match self
            .step(IMAGE_AGENT, RETRIEVE_IMAGES, self.providers.images.fetch(topic))
            .await
        {
            Ok(images) => images,
            Err(e) => {
                tracing::warn!(error = %e, "image retrieval failed");
                self.emit(EditorEvent::ImagesFailed {
                    error: e.to_string(),
                })
                .await;
                Vec::new()
            }
        }
    }

    /// Run one provider call bracketed by progress records, applying the
    /// configured timeout. The step is only marked completed on success.
    async fn step<T, F>(&self, component: &str, step: &str, call: F) -> CoreResult<T>
    where
        F: Future<Output = CoreResult<T>>,
    {
        self.begin(component, step);

        let result = match self.config.provider_timeout {
            Some(limit) => match tokio::time::timeout(limit, call).await {
                Ok(result) => result,
                Err(_) => Err(CoreError::timeout(format!(
                    "{} '{}' exceeded {}s",
                    component,
                    step,
                    limit.as_secs_f64()
                ))),
            },
            None => call.await,
        };

        if result.is_ok() {
            self.finish(component, step);
        }
        result
    }

    fn begin(&self, component: &str, step: &str) {
        if let Err(e) = self.providers.recorder.begin(component, step) {
            tracing::warn!(component, step, error = %e, "progress recorder failed to begin step");
        }
    }

    fn finish(&self, component: &str, step: &str) {
        if let Err(e) = self.providers.recorder.finish(component, step) {
            tracing::warn!(component, step, error = %e, "progress recorder failed to finish step");
        }
    }

    async fn emit(&self, event: EditorEvent) {
        if let Some(tx) = &self.event_tx {
            let _ = tx.send(event).await;
        }
    }
}
