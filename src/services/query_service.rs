//! Query path: retrieve the closest posts and answer from the best one.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, instrument, warn};

use super::document_embedder::DocumentEmbedder;
use super::ranker::rank;
use crate::domain::errors::RagResult;
use crate::domain::models::{EmbeddingVector, QueryConfig, SimilarityResult};
use crate::domain::ports::{AnswerGenerator, VectorStore};

/// A generated answer together with what it was grounded on.
#[derive(Debug, Clone, Serialize)]
pub struct QueryAnswer {
    pub question: String,
    pub results: Vec<SimilarityResult>,
    pub prompt: String,
    pub answer: String,
}

pub struct QueryService {
    embedder: Arc<DocumentEmbedder>,
    store: Arc<dyn VectorStore>,
    generator: Arc<dyn AnswerGenerator>,
    config: QueryConfig,
}

impl QueryService {
    pub fn new(
        embedder: Arc<DocumentEmbedder>,
        store: Arc<dyn VectorStore>,
        generator: Arc<dyn AnswerGenerator>,
        config: QueryConfig,
    ) -> Self {
        Self {
            embedder,
            store,
            generator,
            config,
        }
    }

    pub fn default_top_k(&self) -> usize {
        self.config.top_k
    }

    /// Rank stored posts against `question`.
    ///
    /// The question goes through the same embedder as the documents so both
    /// sides live in one vector space.
    #[instrument(skip(self))]
    pub async fn retrieve(&self, question: &str, top_k: usize) -> RagResult<Vec<SimilarityResult>> {
        let query_vector = self.embedder.embed_document(question).await?;
        self.rank_against(&query_vector, top_k).await
    }

    /// Retrieve, then ask the generator using the top result as context.
    #[instrument(skip(self))]
    pub async fn answer(&self, question: &str, top_k: usize) -> RagResult<QueryAnswer> {
        let results = self.retrieve(question, top_k.max(1)).await?;

        let context = match results.first() {
            Some(best) => best.content.clone().unwrap_or_else(|| {
                warn!(id = %best.id, "top result has no stored content, answering without context");
                String::new()
            }),
            None => String::new(),
        };

        let prompt = self.build_prompt(question, &context);
        let answer = self.generator.generate(&prompt).await?;
        info!(
            generator = self.generator.name(),
            context_id = results.first().map(|r| r.id.as_str()),
            "answer generated"
        );

        Ok(QueryAnswer {
            question: question.to_string(),
            results,
            prompt,
            answer,
        })
    }

    /// Posts closest to a stored post. The post itself ranks first.
    #[instrument(skip(self))]
    pub async fn neighbors(&self, id: &str, top_k: usize) -> RagResult<Vec<SimilarityResult>> {
        let record = self.store.get(id).await?;
        self.rank_against(&record.vector, top_k).await
    }

    pub fn build_prompt(&self, question: &str, context: &str) -> String {
        format!(
            "question:{question}\nrefer:{context}\nanswer it. reply in {}\n",
            self.config.reply_language
        )
    }

    async fn rank_against(
        &self,
        query_vector: &EmbeddingVector,
        top_k: usize,
    ) -> RagResult<Vec<SimilarityResult>> {
        let snapshot = self.store.get_all().await?;
        let ranking = rank(query_vector, &snapshot, top_k)?;
        if !ranking.skipped.is_empty() {
            warn!(
                skipped = ranking.skipped.len(),
                "some stored records were not comparable with the query"
            );
        }
        Ok(ranking.results)
    }
}
