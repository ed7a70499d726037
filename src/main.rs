use anyhow::Context;
use clap::error::ErrorKind;
use clap::Parser;
use places_enricher::domain::ports::PlaceLookup;
use places_enricher::interactive::{Prompter, Provider, SearchRequest};
use places_enricher::utils::logger;
use places_enricher::{
    CliConfig, CsvPipeline, EnrichEngine, EnrichError, EnrichSettings, GooglePlacesClient,
    LocalStorage, ProviderKeys, YelpClient,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = match CliConfig::try_parse() {
        Ok(config) => config,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let _ = e.print();
            eprintln!("Usage: places-enricher --file <filename>");
            eprintln!("Example: places-enricher --file ~/path/to/file.csv");
            std::process::exit(1);
        }
    };

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting places-enricher");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = run(config).await {
        report_failure(&e);
        std::process::exit(1);
    }

    Ok(())
}

async fn run(config: CliConfig) -> anyhow::Result<()> {
    // 金鑰缺少時在任何輸入處理之前就失敗
    let keys = ProviderKeys::from_env()?;
    let settings = config.resolve()?;

    match &config.file {
        Some(file) => run_csv(file, settings, &keys).await,
        None => run_interactive(settings, &keys).await,
    }
}

fn google_client(settings: &EnrichSettings, keys: &ProviderKeys) -> GooglePlacesClient {
    let client = GooglePlacesClient::new(keys.google_places.clone())
        .with_location(settings.location.clone())
        .with_page_delay(settings.page_delay);

    match &keys.places_endpoint {
        Some(endpoint) => client.with_endpoint(endpoint.clone()),
        None => client,
    }
}

async fn run_csv(file: &str, settings: EnrichSettings, keys: &ProviderKeys) -> anyhow::Result<()> {
    // settings.input_file 已在 resolve() 驗證過，這裡改成相對於 storage 的檔名
    let (storage, input_file) = LocalStorage::beside(&settings.input_file);
    let lookup: Arc<dyn PlaceLookup> = Arc::new(google_client(&settings, keys));
    let pipeline = CsvPipeline::new(storage, settings.with_input_file(input_file), lookup);

    let summary = EnrichEngine::new(pipeline)
        .run()
        .await
        .with_context(|| format!("Error processing CSV file {}", file))?;

    println!("\n✅ Results saved to: {}", summary.output_path);
    println!(
        "Total results: {} ({} rows in {} batches)",
        summary.total_results, summary.rows, summary.batches
    );
    Ok(())
}

async fn run_interactive(settings: EnrichSettings, keys: &ProviderKeys) -> anyhow::Result<()> {
    let stdin = std::io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), std::io::stdout());

    let Some(request) = prompter.search_request(settings.location_or_default(), keys.has_yelp())?
    else {
        prompter.cancelled()?;
        return Ok(());
    };

    let lookup = provider_client(&request, &settings, keys)?;
    prompter.search(&request, lookup.as_ref()).await?;
    Ok(())
}

fn provider_client(
    request: &SearchRequest,
    settings: &EnrichSettings,
    keys: &ProviderKeys,
) -> anyhow::Result<Box<dyn PlaceLookup>> {
    let settings = EnrichSettings {
        location: Some(request.location.clone()),
        ..settings.clone()
    };

    match request.provider {
        Provider::Google => Ok(Box::new(google_client(&settings, keys))),
        Provider::Yelp => {
            let key = keys
                .yelp
                .clone()
                .context("YELP_API_KEY is not set")?;
            Ok(Box::new(YelpClient::new(key, request.location.clone())))
        }
    }
}

fn report_failure(err: &anyhow::Error) {
    match err.downcast_ref::<EnrichError>() {
        Some(e) => {
            tracing::error!(
                "❌ Run failed: {:#} (Category: {:?}, Severity: {:?})",
                err,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
        }
        None => {
            tracing::error!("❌ Run failed: {:#}", err);
            eprintln!("❌ Error: {:#}", err);
        }
    }
}
