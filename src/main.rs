use clap::Parser;
use esprober::utils::error::{ErrorSeverity, ProberError};
use esprober::utils::{logger, validation::Validate};
use esprober::{
    Catalog, Cli, Command, CsvFileSink, EsSearchClient, ProberConfig, ProberEngine, Workspace,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Run(args) => run(args.into_config()).await,
        Command::Init(args) => init(args.into_config()),
        Command::Clean(args) => clean(args.into_config()),
        Command::Doctor(args) => doctor(args.into_config()).await,
    }

    Ok(())
}

// 記錄詳細錯誤後以嚴重程度決定退出碼
fn fail(e: ProberError) -> ! {
    tracing::error!(
        "❌ Failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 建議: {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

async fn run(config: ProberConfig) {
    // workspace 必須先就緒，日誌檔才有地方寫
    let workspace = Workspace::from_config(&config);
    let paths = match workspace.ensure() {
        Ok(paths) => paths,
        Err(e) => {
            logger::init_cli_logger(config.verbose);
            fail(e)
        }
    };

    if let Err(e) = logger::init_run_logger(config.verbose, Some(&paths.log_file)) {
        fail(e);
    }

    tracing::info!("Starting esprober run");
    if config.verbose {
        tracing::debug!("Resolved config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        fail(e);
    }

    if config.monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    let catalog = match &config.queries_file {
        Some(path) => match Catalog::load(path) {
            Ok(catalog) => catalog,
            Err(e) => fail(e),
        },
        None => Catalog::builtin(),
    };
    tracing::info!(
        "Probing {} queries against {}",
        catalog.len(),
        config.api_url
    );

    let client = match EsSearchClient::from_config(&config) {
        Ok(client) => client,
        Err(e) => fail(e),
    };
    let sink = match CsvFileSink::open(&paths.csv_file) {
        Ok(sink) => sink,
        Err(e) => fail(e),
    };

    let engine = ProberEngine::new_with_monitoring(client, sink, catalog, &config, config.monitor);
    let summary = engine.run().await;

    for stats in &summary.per_query {
        tracing::info!(
            "Query '{}': {} samples, {} failures, average {:.6} seconds",
            stats.name,
            stats.samples,
            stats.failures,
            stats.average()
        );
    }
    tracing::info!(
        "✅ Probe run completed: {} cycles, {} samples, {} failures",
        summary.cycles,
        summary.total_samples(),
        summary.total_failures()
    );
    println!("✅ Probe run completed!");
    println!("📁 Results saved to: {}", paths.csv_file.display());
}

fn init(config: ProberConfig) {
    logger::init_cli_logger(config.verbose);

    let workspace = Workspace::from_config(&config);
    let existed = workspace.exists();

    match workspace.ensure() {
        Ok(paths) => {
            if existed {
                tracing::info!("Workspace already present, nothing to do");
            }
            println!("✅ Workspace ready at {}", paths.root.display());
            println!("📁 CSV output: {}", paths.csv_file.display());
            println!("📁 Run log: {}", paths.log_file.display());
        }
        Err(e) => fail(e),
    }
}

fn clean(config: ProberConfig) {
    logger::init_cli_logger(config.verbose);

    let workspace = Workspace::from_config(&config);
    if !workspace.exists() {
        println!(
            "✅ No workspace at {}, nothing to remove",
            workspace.root().display()
        );
        return;
    }

    match workspace.clean() {
        Ok(()) => println!("✅ Workspace removed: {}", workspace.root().display()),
        Err(e) => fail(e),
    }
}

async fn doctor(config: ProberConfig) {
    logger::init_cli_logger(config.verbose);
    println!("🔍 esprober doctor");

    if let Err(e) = config.validate() {
        fail(e);
    }
    println!("✅ Configuration OK ({})", config.api_url);

    let catalog = match &config.queries_file {
        Some(path) => match Catalog::load(path) {
            Ok(catalog) => catalog,
            Err(e) => fail(e),
        },
        None => Catalog::builtin(),
    };
    println!("✅ Query catalog: {} queries", catalog.len());

    let workspace = Workspace::from_config(&config);
    if workspace.exists() {
        println!("✅ Workspace present at {}", workspace.root().display());
    } else {
        println!(
            "💡 Workspace missing at {} (run `esprober init` to create it)",
            workspace.root().display()
        );
    }

    let client = match EsSearchClient::from_config(&config) {
        Ok(client) => client,
        Err(e) => fail(e),
    };
    match client.cluster_info().await {
        Ok(info) => {
            let cluster = info
                .get("cluster_name")
                .and_then(|v| v.as_str())
                .unwrap_or("unknown");
            let version = info
                .pointer("/version/number")
                .and_then(|v| v.as_str())
                .unwrap_or("unknown");
            println!(
                "✅ Elasticsearch reachable: cluster '{}', version {}",
                cluster, version
            );
        }
        Err(e) => fail(e),
    }
}
