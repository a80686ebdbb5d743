use clap::Parser;
use exa_search::config::cli::Command;
use exa_search::core::export::{export_filename, ExportedSummary};
use exa_search::core::render::{render_health, render_result_card, render_summary};
use exa_search::domain::model::SummaryRequest;
use exa_search::domain::ports::{SearchApi, Storage};
use exa_search::utils::{logger, validation::Validate};
use exa_search::{
    CliConfig, ClientError, ClientSettings, Controller, HttpSearchApi, LocalStorage, Repl,
    Session, SystemClipboard,
};

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = run(config).await {
        tracing::error!(
            "❌ {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        // 根據錯誤嚴重程度決定退出碼
        std::process::exit(e.severity().exit_code());
    }
}

async fn run(config: CliConfig) -> Result<(), ClientError> {
    let settings = config.settings()?;
    settings.validate()?;
    tracing::debug!("Resolved settings: {:?}", settings);

    let api = HttpSearchApi::new(&settings.base_url, settings.timeout, &settings.user_agent)?;
    let storage = LocalStorage::new(settings.output_dir.clone());

    match config.command.unwrap_or(Command::Interactive) {
        Command::Health => {
            let status = api.health().await;
            println!("{}", render_health(status));
            Ok(())
        }
        Command::Search { query, json, .. } => search_once(&api, &settings, &query.join(" "), json).await,
        Command::Summarize {
            query,
            urls,
            export,
            json,
        } => summarize_once(&api, &storage, SummaryRequest { urls, query }, export, json).await,
        Command::Interactive => {
            tracing::info!("Starting interactive session against {}", settings.base_url);
            let controller = Controller::new(
                api,
                storage,
                Box::new(SystemClipboard::new()),
                Session::new(settings.search.clone()),
            );
            let mut repl = Repl::new(controller, tokio::io::stdout());
            repl.run(tokio::io::stdin()).await
        }
    }
}

async fn search_once(
    api: &HttpSearchApi,
    settings: &ClientSettings,
    query: &str,
    json: bool,
) -> Result<(), ClientError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(ClientError::validation("Query cannot be empty"));
    }

    let request = settings.search.build_request(query);
    let response = api.search(&request).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    println!("{} results for \"{}\"", response.results.len(), query);
    for (index, result) in response.results.iter().enumerate() {
        println!("{}", render_result_card(result, index, false));
    }
    Ok(())
}

async fn summarize_once(
    api: &HttpSearchApi,
    storage: &LocalStorage,
    request: SummaryRequest,
    export: bool,
    json: bool,
) -> Result<(), ClientError> {
    let summary = api.generate_summary(&request).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", render_summary(&summary));
    }

    if export {
        let now = chrono::Utc::now();
        let document = ExportedSummary::from_response(&summary, now);
        let data = serde_json::to_vec_pretty(&document)?;
        let path = storage.write_file(&export_filename(now), &data).await?;
        tracing::info!("📁 Summary saved to: {}", path);
        println!("📁 Summary saved to: {}", path);
    }
    Ok(())
}
