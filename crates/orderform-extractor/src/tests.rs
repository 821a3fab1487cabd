//! Integration tests for the Extractor

#[cfg(test)]
mod tests {
    use crate::{Extractor, ExtractorConfig, ExtractorError};
    use orderform_domain::traits::LlmProvider;
    use orderform_domain::{CanonicalRecord, PayrollFrequency};
    use orderform_llm::{LlmError, MockProvider};
    use std::thread;
    use std::time::Duration;

    const CHUNK: usize = 16;

    /// Pads each marker to exactly one chunk so every chunk carries one marker
    fn document(markers: &[&str]) -> String {
        markers.iter().map(|m| format!("{:<width$}", m, width = CHUNK)).collect()
    }

    fn chunked_config() -> ExtractorConfig {
        ExtractorConfig {
            max_chunk_size: CHUNK,
            ..ExtractorConfig::default()
        }
    }

    #[tokio::test]
    async fn test_two_chunk_scenario() {
        let mut llm = MockProvider::default();
        llm.add_response(
            "ALPHA",
            r#"{"client": {"dsp_name": "Acme"}, "contacts": [{"contact_type": "DSP", "email": "a@x.com"}]}"#,
        );
        llm.add_response(
            "BRAVO",
            r#"{"client": {"dsp_name": "Other"}, "contacts": [{"contact_type": "Accounts Payable", "email": "b@x.com"}]}"#,
        );

        let extractor = Extractor::new(llm, chunked_config());
        let result = extractor.extract(&document(&["ALPHA", "BRAVO"])).await.unwrap();

        let record = result.record;
        assert_eq!(
            record.client.and_then(|c| c.dsp_name).as_deref(),
            Some("Acme")
        );
        let emails: Vec<_> = record
            .contacts
            .iter()
            .filter_map(|c| c.email.as_deref())
            .collect();
        assert_eq!(emails, vec!["a@x.com", "b@x.com"]);
        assert_eq!(result.metadata.chunk_count, 2);
        assert_eq!(result.metadata.degraded_count, 0);
    }

    #[tokio::test]
    async fn test_degraded_chunk_then_parsable_chunk() {
        let mut llm = MockProvider::default();
        llm.add_response("ALPHA", "Sorry, I cannot help with that.");
        llm.add_response(
            "BRAVO",
            "```json\n{\"bank_account\": {\"bank_name\": \"First Bank\", \"account_type\": \"Checking\"}}\n```",
        );

        let extractor = Extractor::new(llm, chunked_config());
        let result = extractor.extract(&document(&["ALPHA", "BRAVO"])).await.unwrap();

        assert_eq!(
            result.record.bank_account.and_then(|b| b.bank_name).as_deref(),
            Some("First Bank")
        );
        assert_eq!(result.metadata.degraded_count, 1);
        assert_eq!(result.degraded[0].index, 0);
        assert_eq!(result.degraded[0].raw_text, "Sorry, I cannot help with that.");
    }

    #[tokio::test]
    async fn test_every_chunk_degraded_yields_empty_record() {
        let llm = MockProvider::new("not json at all");
        let extractor = Extractor::new(llm, chunked_config());

        let result = extractor.extract(&document(&["ALPHA", "BRAVO", "CHARLIE"])).await.unwrap();
        assert_eq!(result.record, CanonicalRecord::new());
        assert_eq!(result.degraded.len(), 3);
    }

    #[tokio::test]
    async fn test_provider_failure_fails_the_job() {
        let mut llm = MockProvider::default();
        llm.add_error("BRAVO");

        let extractor = Extractor::new(llm, chunked_config());
        let result = extractor.extract(&document(&["ALPHA", "BRAVO"])).await;

        assert!(matches!(result, Err(ExtractorError::Llm { chunk: 1, .. })));
    }

    #[tokio::test]
    async fn test_provider_failure_substitutes_empty_form() {
        let mut llm = MockProvider::default();
        llm.add_response("ALPHA", r#"{"client": {"dsp_name": "Acme"}}"#);
        llm.add_error("BRAVO");

        let extractor = Extractor::new(llm, chunked_config());
        let record = extractor.extract_or_default(&document(&["ALPHA", "BRAVO"])).await;

        // No partial success: the first chunk's client is discarded too
        assert_eq!(record, CanonicalRecord::empty_form());
    }

    #[tokio::test]
    async fn test_sequential_calls_follow_chunk_order() {
        let llm = MockProvider::default();
        let extractor = Extractor::new(llm.clone(), chunked_config());

        extractor.extract(&document(&["ALPHA", "BRAVO", "CHARLIE"])).await.unwrap();

        let prompts = llm.prompts();
        assert_eq!(prompts.len(), 3);
        assert!(prompts[0].contains("ALPHA"));
        assert!(prompts[1].contains("BRAVO"));
        assert!(prompts[2].contains("CHARLIE"));
    }

    /// Replies after a per-marker delay, so later chunks can finish first
    struct DelayedProvider {
        replies: Vec<(&'static str, u64, &'static str)>,
    }

    impl LlmProvider for DelayedProvider {
        type Error = LlmError;

        fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
            let (_, delay_ms, reply) = self
                .replies
                .iter()
                .find(|(marker, _, _)| prompt.contains(marker))
                .ok_or_else(|| LlmError::Other("no reply scripted".to_string()))?;
            thread::sleep(Duration::from_millis(*delay_ms));
            Ok(reply.to_string())
        }

        fn generate_structured(&self, prompt: &str, _schema_hint: &str) -> Result<String, Self::Error> {
            self.generate(prompt)
        }

        fn model_name(&self) -> &str {
            "delayed"
        }
    }

    #[tokio::test]
    async fn test_concurrent_extraction_merges_in_chunk_order() {
        let llm = DelayedProvider {
            replies: vec![
                ("ALPHA", 300, r#"{"client": {"dsp_name": "Acme"}, "contacts": [{"email": "a@x.com"}]}"#),
                ("BRAVO", 100, r#"{"client": {"dsp_name": "Other"}, "contacts": [{"email": "b@x.com"}]}"#),
                ("CHARLIE", 0, r#"{"contacts": [{"email": "c@x.com"}]}"#),
            ],
        };
        let config = ExtractorConfig {
            max_concurrency: 3,
            ..chunked_config()
        };

        let extractor = Extractor::new(llm, config);
        let record = extractor
            .extract(&document(&["ALPHA", "BRAVO", "CHARLIE"]))
            .await
            .unwrap()
            .record;

        assert_eq!(record.client.and_then(|c| c.dsp_name).as_deref(), Some("Acme"));
        let emails: Vec<_> = record.contacts.iter().filter_map(|c| c.email.as_deref()).collect();
        assert_eq!(emails, vec!["a@x.com", "b@x.com", "c@x.com"]);
    }

    #[tokio::test]
    async fn test_slow_provider_times_out() {
        let llm = DelayedProvider {
            replies: vec![("ALPHA", 2_000, "{}")],
        };
        let config = ExtractorConfig {
            extraction_timeout_secs: 1,
            ..chunked_config()
        };

        let extractor = Extractor::new(llm, config);
        let result = extractor.extract(&document(&["ALPHA"])).await;
        assert!(matches!(result, Err(ExtractorError::Timeout(0))));
    }

    #[tokio::test]
    async fn test_json_mode_off_uses_free_form_generation() {
        let llm = MockProvider::new(r#"{"additional_notes": "Net 30"}"#);
        let config = ExtractorConfig {
            json_mode: false,
            ..ExtractorConfig::default()
        };

        let extractor = Extractor::new(llm, config);
        let record = extractor.extract("Notes: Net 30").await.unwrap().record;
        assert_eq!(record.additional_notes.as_deref(), Some("Net 30"));
    }

    #[test]
    fn test_extract_from_synchronous_caller() {
        let llm = MockProvider::sequence([
            r#"{"client_selected_plan": {"payroll_frequency": "Weekly"}}"#,
            r#"{"client_selected_plan": {"payroll_frequency": "Bi-Weekly"}}"#,
        ]);
        let extractor = Extractor::new(llm, chunked_config());

        let result = tokio_test::block_on(extractor.extract(&document(&["ALPHA", "BRAVO"]))).unwrap();
        let plan = result.record.client_selected_plan.unwrap();
        assert_eq!(plan.payroll_frequency, Some(PayrollFrequency::Weekly));
        assert_eq!(result.metadata.chunk_count, 2);
    }

    #[tokio::test]
    async fn test_metadata_records_provider_model_name() {
        let extractor = Extractor::new(MockProvider::new("{}"), ExtractorConfig::default());
        let result = extractor.extract("DSP Name: Acme").await.unwrap();
        assert_eq!(result.metadata.model_name, "mock");

        let llm = DelayedProvider {
            replies: vec![("ALPHA", 0, "{}")],
        };
        let result = Extractor::new(llm, chunked_config())
            .extract(&document(&["ALPHA"]))
            .await
            .unwrap();
        assert_eq!(result.metadata.model_name, "delayed");
    }

    #[tokio::test]
    async fn test_off_type_values_do_not_degrade_chunk() {
        let llm = MockProvider::new(
            r#"{"client":{"dsp_name":"Acme"},"contacts":[{"contact_type":"DSP","postal_code":98101}],"add_on_modules":[{"module_name":"401(k)","units":10.0}]}"#,
        );
        let result = Extractor::new(llm, ExtractorConfig::default())
            .extract("DSP Name: Acme")
            .await
            .unwrap();

        assert!(result.degraded.is_empty());
        assert_eq!(result.record.client.and_then(|c| c.dsp_name).as_deref(), Some("Acme"));
        assert_eq!(result.record.contacts[0].postal_code.as_deref(), Some("98101"));
        assert_eq!(result.record.add_on_modules[0].units, Some(10));
    }
}
