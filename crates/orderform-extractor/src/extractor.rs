//! Core Extractor implementation

use crate::chunking::TextChunker;
use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::merge::merge;
use crate::parser::parse_chunk_response;
use crate::prompt::{PromptBuilder, SCHEMA_HINT};
use crate::types::{DegradedChunk, ExtractionMetadata, ExtractionResult};
use orderform_domain::traits::LlmProvider;
use orderform_domain::{CanonicalRecord, ChunkRecord};
use std::fmt::Display;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::timeout;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// The Extractor turns raw order-form text into one canonical record
///
/// Text is chunked, each chunk goes to the provider exactly once, and the
/// per-chunk records are merged in chunk order.
pub struct Extractor<L>
where
    L: LlmProvider,
{
    llm_provider: Arc<L>,
    config: ExtractorConfig,
    model_name: String,
}

impl<L> Extractor<L>
where
    L: LlmProvider + Send + Sync + 'static,
    L::Error: Display,
{
    /// Create a new Extractor
    ///
    /// Job metadata records the provider's model name.
    pub fn new(llm_provider: L, config: ExtractorConfig) -> Self {
        let model_name = llm_provider.model_name().to_string();
        Self {
            llm_provider: Arc::new(llm_provider),
            config,
            model_name,
        }
    }

    /// The configuration in use
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Run one extraction job over the whole text
    ///
    /// Fails as a whole if any provider call fails or times out. Responses
    /// that do not parse are not failures; they show up in
    /// [`ExtractionResult::degraded`].
    pub async fn extract(&self, text: &str) -> Result<ExtractionResult, ExtractorError> {
        self.config.validate().map_err(ExtractorError::Config)?;
        let max_chunk_size = NonZeroUsize::new(self.config.max_chunk_size)
            .ok_or_else(|| ExtractorError::Config("max_chunk_size must be greater than 0".to_string()))?;

        let job_id = Uuid::now_v7();
        let start_time = Instant::now();

        let chunks = TextChunker::new(max_chunk_size).chunk(text);

        info!(
            %job_id,
            "Starting extraction: text length {} chars, {} chunks",
            text.chars().count(),
            chunks.len()
        );

        let records = if self.config.max_concurrency > 1 && chunks.len() > 1 {
            self.extract_concurrent(&chunks).await?
        } else {
            self.extract_sequential(&chunks).await?
        };

        let degraded: Vec<DegradedChunk> = records
            .iter()
            .enumerate()
            .filter_map(|(index, record)| match record {
                ChunkRecord::Degraded(raw_text) => Some(DegradedChunk {
                    index,
                    raw_text: raw_text.clone(),
                }),
                ChunkRecord::Structured(_) => None,
            })
            .collect();

        let record = merge(records);

        let metadata = ExtractionMetadata {
            job_id,
            timestamp: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or_default(),
            model_name: self.model_name.clone(),
            chunk_count: chunks.len(),
            degraded_count: degraded.len(),
            processing_time_ms: start_time.elapsed().as_millis() as u64,
        };

        info!(
            %job_id,
            "Extraction complete: {} chunks, {} degraded, {} contacts, {} plans, {} add-ons in {}ms",
            metadata.chunk_count,
            metadata.degraded_count,
            record.contacts.len(),
            record.plan_catalog.len(),
            record.add_on_modules.len(),
            metadata.processing_time_ms
        );

        Ok(ExtractionResult {
            record,
            degraded,
            metadata,
        })
    }

    /// Run an extraction job, substituting the empty form on any failure
    pub async fn extract_or_default(&self, text: &str) -> CanonicalRecord {
        match self.extract(text).await {
            Ok(result) => result.record,
            Err(e) => {
                warn!("Extraction failed, using empty form: {}", e);
                CanonicalRecord::empty_form()
            }
        }
    }

    /// One chunk at a time, in order
    async fn extract_sequential(&self, chunks: &[&str]) -> Result<Vec<ChunkRecord>, ExtractorError> {
        let mut records = Vec::with_capacity(chunks.len());

        for (index, chunk) in chunks.iter().enumerate() {
            debug!("Processing chunk {}/{}", index + 1, chunks.len());
            let record = extract_chunk(
                Arc::clone(&self.llm_provider),
                index,
                chunk.to_string(),
                self.config.extraction_timeout(),
                self.config.json_mode,
            )
            .await?;
            records.push(record);
        }

        Ok(records)
    }

    /// Up to `max_concurrency` chunks in flight, results restored to chunk order
    async fn extract_concurrent(&self, chunks: &[&str]) -> Result<Vec<ChunkRecord>, ExtractorError> {
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrency));
        let mut tasks = JoinSet::new();

        for (index, chunk) in chunks.iter().enumerate() {
            let semaphore = Arc::clone(&semaphore);
            let llm = Arc::clone(&self.llm_provider);
            let chunk = chunk.to_string();
            let call_timeout = self.config.extraction_timeout();
            let json_mode = self.config.json_mode;

            tasks.spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .map_err(|e| ExtractorError::Task(e.to_string()))?;
                let record = extract_chunk(llm, index, chunk, call_timeout, json_mode).await?;
                Ok::<_, ExtractorError>((index, record))
            });
        }

        let mut indexed = Vec::with_capacity(chunks.len());
        // Returning early drops the JoinSet, which aborts the remaining calls
        while let Some(joined) = tasks.join_next().await {
            let (index, record) = joined.map_err(|e| ExtractorError::Task(e.to_string()))??;
            debug!("Chunk {}/{} finished", index + 1, chunks.len());
            indexed.push((index, record));
        }

        indexed.sort_by_key(|(index, _)| *index);
        Ok(indexed.into_iter().map(|(_, record)| record).collect())
    }
}

/// Extract one chunk: build the prompt, make one provider call, parse
async fn extract_chunk<L>(
    llm: Arc<L>,
    index: usize,
    chunk: String,
    call_timeout: Duration,
    json_mode: bool,
) -> Result<ChunkRecord, ExtractorError>
where
    L: LlmProvider + Send + Sync + 'static,
    L::Error: Display,
{
    let prompt = PromptBuilder::new(&chunk).build();
    debug!("Chunk {}: prompt length {} chars", index, prompt.len());

    // LlmProvider is synchronous, so the call runs on the blocking pool
    let call = tokio::task::spawn_blocking(move || {
        let response = if json_mode {
            llm.generate_structured(&prompt, SCHEMA_HINT)
        } else {
            llm.generate(&prompt)
        };
        response.map_err(|e| e.to_string())
    });

    let response = timeout(call_timeout, call)
        .await
        .map_err(|_| ExtractorError::Timeout(index))?
        .map_err(|e| ExtractorError::Task(e.to_string()))?
        .map_err(|message| ExtractorError::Llm {
            chunk: index,
            message,
        })?;

    debug!("Chunk {}: response length {} chars", index, response.len());

    Ok(parse_chunk_response(&response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use orderform_llm::MockProvider;

    fn create_test_extractor(provider: MockProvider) -> Extractor<MockProvider> {
        Extractor::new(provider, ExtractorConfig::default())
    }

    #[tokio::test]
    async fn test_extract_empty_text() {
        let provider = MockProvider::default();
        let extractor = create_test_extractor(provider.clone());

        let result = extractor.extract("").await.unwrap();
        assert_eq!(result.record, CanonicalRecord::new());
        assert_eq!(result.metadata.chunk_count, 0);
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_one_call_per_chunk() {
        let provider = MockProvider::default();
        let mut config = ExtractorConfig::default();
        config.max_chunk_size = 10;
        let extractor = Extractor::new(provider.clone(), config);

        let result = extractor.extract(&"x".repeat(25)).await.unwrap();
        assert_eq!(result.metadata.chunk_count, 3);
        assert_eq!(provider.call_count(), 3);
    }

    #[tokio::test]
    async fn test_invalid_config_is_rejected() {
        let mut config = ExtractorConfig::default();
        config.max_concurrency = 0;
        let extractor = Extractor::new(MockProvider::default(), config);

        let result = extractor.extract("text").await;
        assert!(matches!(result, Err(ExtractorError::Config(_))));
    }

    #[tokio::test]
    async fn test_model_name_comes_from_provider() {
        let extractor = create_test_extractor(MockProvider::default());
        assert_eq!(extractor.model_name, "mock");
        let result = extractor.extract("text").await.unwrap();
        assert_eq!(result.metadata.model_name, "mock");
    }

    #[tokio::test]
    async fn test_job_ids_are_unique() {
        let extractor = create_test_extractor(MockProvider::default());
        let a = extractor.extract("text").await.unwrap();
        let b = extractor.extract("text").await.unwrap();
        assert_ne!(a.metadata.job_id, b.metadata.job_id);
    }
}
