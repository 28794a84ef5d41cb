//! bconfig - Main CLI Entry Point

use anyhow::{Context, Result};
use bconfig::{
    answer::AnswerService,
    cli::{Args, Commands},
    completion::CompletionClient,
    config::Config,
    doctor::Doctor,
    search::CandidateAggregator,
    server,
    types::{ChatMessage, ProductScope, ProductType},
    workbook::{SheetSource, WorkbookStore},
};
use clap::Parser;
use colored::Colorize;
use std::sync::Arc;

fn init_logging(args: &Args) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    let verbosity = args.verbosity();
    if verbosity.overrides_env() {
        builder.filter_level(verbosity.level_filter());
    }
    builder.target(env_logger::Target::Stderr).init();
}

fn load_config(args: &Args) -> Result<Config> {
    match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args);

    let mut config = load_config(&args)?;

    match args.command() {
        Commands::Serve { bind } => {
            if let Some(bind) = bind {
                config.server.bind = bind;
            }
            server::serve(&config).await?;
        }
        Commands::Index { product } => {
            show_index(&config, product)?;
        }
        Commands::Sheet { product, name } => {
            show_sheet(&config, product, &name)?;
        }
        Commands::Search { query, product } => {
            run_search(&config, &query, product)?;
        }
        Commands::Ask { question, product } => {
            run_ask(&config, &question, product).await?;
        }
        Commands::Doctor => {
            run_doctor(config);
        }
        Commands::Config { init } => {
            show_config(&args, &config, init)?;
        }
    }

    Ok(())
}

fn show_index(config: &Config, product: ProductType) -> Result<()> {
    let store = WorkbookStore::new(config.data.clone());
    let items = store.index(product)?;
    log::debug!("{} sheets in {}", items.len(), store.path(product).display());
    println!("{}", serde_json::to_string_pretty(&items)?);
    Ok(())
}

fn show_sheet(config: &Config, product: ProductType, name: &str) -> Result<()> {
    let store = WorkbookStore::new(config.data.clone());
    let data = store.load_sheet(product, name)?;
    println!("{}", serde_json::to_string_pretty(&data)?);
    Ok(())
}

fn run_search(config: &Config, query: &str, scope: ProductScope) -> Result<()> {
    let store = WorkbookStore::new(config.data.clone());
    let outcome = CandidateAggregator::new(store).search(query, scope);

    if outcome.candidates.is_empty() {
        println!("No matching rows in {}.", scope);
        return Ok(());
    }
    if outcome.widened {
        println!("{}", "Nothing matched the requested product; showing all products.".yellow());
    }

    for (i, c) in outcome.candidates.iter().enumerate() {
        println!(
            "{}. [{}] {} / {}  {}",
            i + 1,
            c.score,
            c.workbook.cyan(),
            c.title,
            c.label.bold()
        );
        if !c.description.is_empty() {
            println!("     {}", c.description);
        }
        if !c.destination.is_empty() {
            println!("     -> {}", c.destination);
        }
    }
    println!(
        "\n{} sheets scanned, {} skipped",
        outcome.scanned_sheets, outcome.skipped_sheets
    );
    Ok(())
}

async fn run_ask(config: &Config, question: &str, scope: ProductScope) -> Result<()> {
    let client = CompletionClient::from_config(&config.completion)?;
    let store = WorkbookStore::new(config.data.clone());
    let service = AnswerService::new(store, Arc::new(client));

    let answer = service
        .answer(vec![ChatMessage::user(question)], scope)
        .await
        .context("Failed to answer question")?;

    println!("{}", answer.message.content);
    log::debug!(
        "format={} candidates={} widened={}",
        answer.format.name(),
        answer.candidates,
        answer.widened
    );
    Ok(())
}

fn run_doctor(config: Config) {
    let doctor = Doctor::new(config);
    let checks = doctor.run_diagnostics();
    Doctor::display_results(&checks);

    std::process::exit(if Doctor::overall_status(&checks) { 0 } else { 1 });
}

fn show_config(args: &Args, config: &Config, init: bool) -> Result<()> {
    let path = match &args.config {
        Some(path) => path.clone(),
        None => Config::config_path()?,
    };

    if init {
        if path.exists() {
            println!("Config already exists at {}", path.display());
        } else {
            Config::default().save_to(&path)?;
            println!("Wrote default config to {}", path.display());
        }
        return Ok(());
    }

    println!("\nbconfig Configuration ({})\n", path.display());
    println!("Server:");
    println!("  Bind:        {}", config.server.bind);
    println!();
    println!("Workbooks:");
    for product in ProductType::ALL {
        println!(
            "  {}: {}",
            product.code(),
            config.data.workbook_path(product).display()
        );
    }
    println!();
    println!("Completion:");
    println!("  Endpoint:    {}", config.completion.base_url);
    println!("  Model:       {}", config.completion.model);
    println!("  Temperature: {}", config.completion.temperature);
    println!(
        "  Credential:  {}",
        if config.has_token() { "set" } else { "missing" }
    );
    println!();
    Ok(())
}
