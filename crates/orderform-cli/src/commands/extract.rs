//! Extract command implementation.

use super::read_text;
use crate::cli::ExtractArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use crate::provider::Provider;
use orderform_extractor::{ExtractionResult, Extractor};

/// Execute the extract command.
pub async fn execute_extract(
    args: ExtractArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let text = read_text(args.file.as_deref(), args.stdin)?;
    let result = extract_text(&text, config).await?;

    println!("{}", formatter.format_extraction(&result)?);

    Ok(())
}

/// Run one extraction job with the configured provider.
pub async fn extract_text(text: &str, config: &Config) -> Result<ExtractionResult> {
    let extractor = build_extractor(config)?;
    Ok(extractor.extract(text).await?)
}

/// Build an extractor from the provider and extractor settings.
pub fn build_extractor(config: &Config) -> Result<Extractor<Provider>> {
    let provider = Provider::from_settings(&config.provider)?;
    Ok(Extractor::new(provider, config.extractor.clone()))
}
