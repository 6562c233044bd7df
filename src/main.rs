mod telemetry;

use std::sync::Arc;

use ai_llm_service::{OpenAiService, config::default_config::config_openai_chat};
use anyhow::Context;
use answer_generator::AnswerGenerator;
use api::{ApiConfig, AppState};
use crm_source::{CrmSourceKind, RecordSource, SalesforceConfig, SalesforceSource, StubSource};
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env if present; real env vars win.
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(telemetry::env_filter("info"))
        .with(telemetry::layer())
        .try_init()
        .context("setting default subscriber failed")?;

    match dotenv {
        Ok(path) => info!(path = %path.display(), ".env loaded"),
        Err(e) if e.not_found() => debug!("no .env file, using process environment"),
        Err(e) => warn!(error = %e, ".env could not be read; using process environment"),
    }

    let api_config = ApiConfig::from_env().context("invalid API configuration")?;
    let records = record_source().context("invalid CRM configuration")?;

    let llm_config = config_openai_chat().context("invalid LLM configuration")?;
    let llm = OpenAiService::new(llm_config).context("failed to build OpenAI client")?;
    let generator = AnswerGenerator::new(Arc::new(llm));

    let state = AppState::new(records, generator, &api_config);
    api::start(api_config, state).await?;

    Ok(())
}

fn record_source() -> anyhow::Result<Arc<dyn RecordSource>> {
    match CrmSourceKind::from_env()? {
        CrmSourceKind::Stub => {
            info!("using in-process stub CRM records");
            Ok(Arc::new(StubSource::demo()))
        }
        CrmSourceKind::Salesforce => {
            let cfg = SalesforceConfig::from_env()?;
            Ok(Arc::new(SalesforceSource::new(cfg)?))
        }
    }
}
