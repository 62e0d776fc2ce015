//! Generation orchestrator - the guarded pipeline
//!
//! INPUT → ROUTE → BUILD PROMPT → GENERATE → SANITIZE → OUTPUT
//!
//! Every transport adapter goes through `Orchestrator::handle`.

use crate::classifier::IntentRouter;
use crate::llm::TextGenerator;
use crate::models::{GenerationRequest, Mode, NewsDigest, PipelineOutcome};
use crate::news::NewsSource;
use crate::policy::PolicyConfig;
use crate::safety::{OutputSafetyFilter, SafetyVerdict};
use crate::Result;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Stateless across requests; share it behind an `Arc`.
pub struct Orchestrator {
    policy: Arc<PolicyConfig>,
    router: IntentRouter,
    filter: OutputSafetyFilter,
    generator: Arc<dyn TextGenerator>,
    news: Arc<dyn NewsSource>,
}

impl Orchestrator {
    pub fn new(
        policy: Arc<PolicyConfig>,
        generator: Arc<dyn TextGenerator>,
        news: Arc<dyn NewsSource>,
    ) -> Self {
        Self {
            router: IntentRouter::new(&policy),
            filter: OutputSafetyFilter::new(&policy),
            policy,
            generator,
            news,
        }
    }

    pub fn filter(&self) -> &OutputSafetyFilter {
        &self.filter
    }

    /// Classify, generate, sanitize
    pub async fn handle(&self, user_text: &str) -> Result<PipelineOutcome> {
        let start = Instant::now();
        let request_id = Uuid::new_v4();
        let decision = self.router.explain(user_text);

        debug!(
            %request_id,
            mode = %decision.mode,
            rule = decision.matched_rule.as_deref().unwrap_or("-"),
            "Routed message"
        );

        let response = self.respond(decision.mode, user_text, None).await?;

        info!(
            %request_id,
            mode = %decision.mode,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Pipeline completed"
        );

        Ok(PipelineOutcome {
            mode: decision.mode,
            response,
        })
    }

    /// Generate a response for an already-routed message.
    ///
    /// News is fetched only for `Commentary` and only when `context` is `None`.
    pub async fn respond(
        &self,
        mode: Mode,
        user_text: &str,
        context: Option<&NewsDigest>,
    ) -> Result<String> {
        let fetched;
        let context = match (mode, context) {
            (Mode::Commentary, None) => {
                fetched = self.news.fetch_today_items().await?;
                debug!(items = fetched.items.len(), as_of = %fetched.as_of, "Fetched news context");
                Some(&fetched)
            }
            (_, context) => context,
        };

        let request = self.build_request(mode, user_text, context);

        let generated = self
            .generator
            .generate(&request.system_instruction, &request.user_content)
            .await?;

        match self.filter.inspect(&generated) {
            SafetyVerdict::Pass => Ok(generated),
            SafetyVerdict::Suppressed { rule } => {
                warn!(mode = %mode, rule = %rule, "Generated output suppressed");
                Ok(self.filter.refusal().to_string())
            }
        }
    }

    /// Mode-specific instruction pair. Pure; no I/O.
    pub fn build_request(
        &self,
        mode: Mode,
        user_text: &str,
        context: Option<&NewsDigest>,
    ) -> GenerationRequest {
        let prompts = &self.policy.prompts;

        match mode {
            Mode::Guardrail => GenerationRequest {
                system_instruction: prompts.guardrail.clone(),
                user_content: user_text.to_string(),
            },
            Mode::Coach => GenerationRequest {
                system_instruction: prompts.coach.clone(),
                user_content: user_text.to_string(),
            },
            Mode::Commentary => GenerationRequest {
                system_instruction: prompts.commentary.clone(),
                user_content: self.commentary_prompt(user_text, context),
            },
        }
    }

    fn commentary_prompt(&self, user_text: &str, context: Option<&NewsDigest>) -> String {
        let mut prompt = format!("User asked: {}\n\n", user_text);

        if let Some(digest) = context {
            prompt.push_str(&format!(
                "Use these news items (as_of={}):\n{}\n\n",
                digest.as_of,
                digest.render_bullets()
            ));
        }

        prompt.push_str(&self.policy.commentary_directive);
        prompt
    }
}
