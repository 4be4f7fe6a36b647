use anyhow::Context;
use clap::Parser;
use drugnet::config::Settings;
use drugnet::domain::ports::ConfigProvider;
use drugnet::utils::error::{DrugNetError, ErrorSeverity};
use drugnet::utils::{logger, validation::Validate};
use drugnet::{export, ApiClient, CliConfig, Command, LocalStorage, Rendered, Route, Router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::debug!("CLI config: {:?}", config);

    let settings = match load_settings(&config) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration failed: {:#}", e);
            eprintln!("❌ {:#}", e);
            std::process::exit(3);
        }
    };

    if let Err(e) = run(&config, &settings).await {
        tracing::error!(
            "❌ {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::debug!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

fn load_settings(config: &CliConfig) -> anyhow::Result<Settings> {
    let settings = Settings::load(config.config.as_deref())
        .with_context(|| match &config.config {
            Some(path) => format!("Failed to load config file '{}'", path.display()),
            None => "Failed to load ./drugnet.toml".to_string(),
        })?
        .with_overrides(
            config.base_url.clone(),
            config.timeout,
            config.format.clone(),
        );

    settings.validate().context("Invalid settings")?;
    tracing::debug!("Effective settings: {:?}", settings);
    Ok(settings)
}

async fn run(config: &CliConfig, settings: &dyn ConfigProvider) -> Result<(), DrugNetError> {
    let router = Router::new();

    if let Command::Routes = config.command {
        print_routes(settings.is_json())?;
        return Ok(());
    }

    let api = ApiClient::from_config(settings)?;
    tracing::info!("🚀 Using drug service at {}", api.base_url());

    let rendered = match (&config.command, config.command.view_input()) {
        (Command::Open { location }, _) => router.navigate(&api, location).await?,
        (_, Some(input)) => router.render(&api, &input).await?,
        (command, None) => {
            return Err(DrugNetError::InvalidInput {
                field: "command".to_string(),
                reason: format!("{:?} does not render a view", command),
            })
        }
    };

    print_rendered(&rendered, settings.is_json())?;

    if let Some(output) = &config.output {
        let storage = LocalStorage::new(settings.export_path().to_string());
        let bytes = export::export(&storage, output, &rendered.payload).await?;
        tracing::info!(
            "📁 Wrote {} bytes to {}/{}",
            bytes,
            storage.base_path(),
            output
        );
    }

    Ok(())
}

fn print_rendered(rendered: &Rendered, json: bool) -> Result<(), DrugNetError> {
    if json {
        println!("{}", serde_json::to_string_pretty(&rendered.payload)?);
    } else {
        println!("{}", rendered.text);
    }
    Ok(())
}

fn print_routes(json: bool) -> Result<(), DrugNetError> {
    if json {
        let table: Vec<serde_json::Value> = Route::all()
            .iter()
            .map(|r| serde_json::json!({"path": r.path(), "name": r.name(), "component": r.view_name()}))
            .collect();
        println!("{}", serde_json::to_string_pretty(&table)?);
    } else {
        for route in Route::all() {
            println!("{:<15} {:<13} {}", route.path(), route.name(), route.view_name());
        }
    }
    Ok(())
}
