//! Content generator — ties persona context, the draft provider, and the
//! repair pipeline into one posting attempt.

use std::sync::Arc;

use rand::Rng;

use crate::config::Config;
use crate::error::PosterError;
use crate::llm::provider::{DraftProvider, Message};
use crate::persona::memory::PersonaMemoryStore;
use crate::persona::{self, prompts, PersonaContext};
use crate::pipeline;

pub struct ContentGenerator {
    provider: Arc<dyn DraftProvider>,
    store: PersonaMemoryStore,
    config: Config,
}

impl ContentGenerator {
    pub fn new(provider: Arc<dyn DraftProvider>, store: PersonaMemoryStore, config: Config) -> Self {
        Self {
            provider,
            store,
            config,
        }
    }

    /// Run one full posting attempt: draw context, load the persona, request
    /// a draft, repair and validate it. No internal retry — on failure the
    /// caller decides whether another attempt is worth a fresh model call.
    pub async fn generate_post(&self, rng: &mut (impl Rng + Send)) -> Result<String, PosterError> {
        let ctx = persona::draw_context(self.config.local_hour(), rng);
        let post = self.generate_with_context(&ctx, rng).await?;

        let preview: String = post.chars().take(50).collect();
        tracing::info!(
            scene = ctx.scene.as_str(),
            topic = %ctx.topic,
            seed = %ctx.prompt_seed,
            chars = post.chars().count(),
            %preview,
            "generated post"
        );
        Ok(post)
    }

    async fn generate_with_context(
        &self,
        ctx: &PersonaContext,
        rng: &mut (impl Rng + Send),
    ) -> Result<String, PosterError> {
        let record = self.store.get_with_fallback(ctx.scene).await?;

        let messages = vec![
            Message::system(prompts::build_system_prompt(&record, ctx)),
            Message::user(prompts::build_user_prompt(ctx)),
        ];
        let raw = self.provider.draft(messages, None).await?;

        pipeline::process(
            &raw,
            rng,
            &self.config.forbidden_words,
            self.config.min_post_chars,
            self.config.max_post_chars,
        )
        .map_err(|reason| {
            tracing::warn!(?reason, "draft rejected by validator");
            PosterError::ContentInvalid { reason }
        })
    }
}
