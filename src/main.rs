//! Resume screener: rank resumes against a job role and track skill gaps

use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use resume_screener::admin::AdminGate;
use resume_screener::cli::{self, Cli, Commands, ConfigAction, ModelAction};
use resume_screener::output::formatter::ConsoleFormatter;
use resume_screener::output::insights::DashboardInsights;
use resume_screener::output::report;
use resume_screener::processing::analyzer::{AnalysisService, BatchOutcome};
use resume_screener::processing::catalog::JobCatalog;
use resume_screener::processing::embedding_manager::EmbeddingModelManager;
use resume_screener::processing::embeddings::embedder_from_config;
use resume_screener::storage::{CandidateStore, SessionSnapshot};
use resume_screener::{Config, Result, ScreenerError};
use std::path::PathBuf;
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, cli.config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, mut config: Config, config_path: Option<PathBuf>) -> Result<()> {
    let formatter = ConsoleFormatter::new(config.output.color_output);

    match command {
        Commands::Analyze {
            category,
            role,
            resumes,
            report,
            embedding,
        } => {
            if let Some(backend) = embedding {
                config.embedding.backend =
                    cli::parse_embedding_backend(&backend).map_err(ScreenerError::InvalidInput)?;
            }
            if let Some(path) = &report {
                cli::validate_file_extension(path, &["csv"])
                    .map_err(|e| ScreenerError::InvalidInput(format!("Report file: {}", e)))?;
            }

            if resumes.is_empty() {
                println!("{}", "⚠️  Please supply at least one resume.".yellow());
                return Ok(());
            }

            println!(
                "🚀 Analyzing {} resume(s) for the {} role...",
                resumes.len(),
                role.bold()
            );

            config.ensure_data_dirs()?;
            let embedder = embedder_from_config(&config.embedding)?;
            let store = CandidateStore::open(&config.storage.database_path).await?;
            let mut service = AnalysisService::new(embedder, store, JobCatalog::builtin());

            let progress = ProgressBar::new(resumes.len() as u64);
            progress.set_style(
                ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}")
                    .map_err(|e| ScreenerError::Processing(e.to_string()))?
                    .progress_chars("=> "),
            );

            let outcome = service.analyze_batch(&category, &role, &resumes, &progress).await;
            progress.finish_and_clear();
            service.close().await;

            match outcome? {
                BatchOutcome::Empty => {
                    println!("{}", "⚠️  Please supply at least one resume.".yellow());
                }
                BatchOutcome::NothingProcessed { skipped } => {
                    println!("{}", "⚠️  No valid resumes processed.".yellow());
                    for doc in skipped {
                        println!("  • {}: {}", doc.resume, doc.reason);
                    }
                }
                BatchOutcome::Completed(batch) => {
                    batch.to_snapshot().save(&config.storage.session_path)?;

                    println!("\n✅ Analysis Complete!\n");
                    println!("{}", formatter.format_analysis(&batch));

                    if let Some(path) = report {
                        report::save_report_to_file(&report::to_csv(&batch.rows)?, &path)?;
                        println!("📁 Report saved to {}", path.display());
                    }
                    println!("💡 Run `resume-screener dashboard` or `resume-screener admin` for deeper insights.");
                }
            }
        }

        Commands::Dashboard => match SessionSnapshot::load(&config.storage.session_path)? {
            None => println!("ℹ️  Please upload and analyze resumes first."),
            Some(snapshot) => {
                let insights = DashboardInsights::from_rows(&snapshot.rows, config.output.top_n);
                println!("{}", formatter.format_dashboard(&snapshot, &insights));
            }
        },

        Commands::Admin {
            username,
            password,
            export,
        } => {
            if let Some(path) = &export {
                cli::validate_file_extension(path, &["csv"])
                    .map_err(|e| ScreenerError::InvalidInput(format!("Export file: {}", e)))?;
            }

            let gate = AdminGate::new(&config.admin);
            let session = match gate.login(&username, &password) {
                Ok(session) => session,
                Err(e) => {
                    println!("{}", format!("❌ {}", e).red());
                    return Err(e);
                }
            };
            println!("{}\n", "✅ Logged in successfully!".green());

            config.ensure_data_dirs()?;
            let store = CandidateStore::open(&config.storage.database_path).await?;
            let view = session.load_view(&store).await;
            store.close().await;

            match view? {
                None => println!("ℹ️  No candidate data available yet."),
                Some(view) => {
                    println!("{}", formatter.format_admin(&view.rows, &view.overview));
                    if let Some(path) = export {
                        report::save_report_to_file(&report::to_csv(&view.rows)?, &path)?;
                        println!("📁 Full report saved to {}", path.display());
                    }
                }
            }
        }

        Commands::Roles => {
            println!("{}", formatter.format_roles(&JobCatalog::builtin()));
        }

        Commands::Models { action } => {
            let mut manager = EmbeddingModelManager::new(config.embedding.models_dir.clone()).await?;

            match action {
                ModelAction::List => {
                    println!("📚 Embedding Models\n");
                    for model in manager.list_available_models() {
                        let status = if manager.is_model_downloaded(model.id) {
                            "✅ Downloaded"
                        } else {
                            "⬇️  Available"
                        };
                        let default_marker = if model.id == config.embedding.model { " (default)" } else { "" };
                        println!(
                            "  • {}{} ({}) - {} MB, {} dims [{}]",
                            model.id, default_marker, model.repo_id, model.size_mb, model.dimensions, status
                        );
                        println!("    {}", model.description);
                    }
                }

                ModelAction::Download { model, force } => {
                    println!("⬇️  Downloading model: {}", model);
                    let path = manager.download_model(&model, force).await?;
                    println!("✅ Model '{}' ready at {}", model, path.display());
                }
            }
        }

        Commands::Config { action } => {
            let path = config_path.unwrap_or_else(Config::config_path);
            match action {
                Some(ConfigAction::Show) | None => {
                    println!("⚙️  Current Configuration ({})\n", path.display());
                    println!("{}", config.to_toml()?);
                }
                Some(ConfigAction::Path) => {
                    println!("{}", path.display());
                }
                Some(ConfigAction::Reset) => {
                    Config::default().save_to(&path)?;
                    info!("Configuration reset at {}", path.display());
                    println!("✅ Configuration reset successfully!");
                }
            }
        }
    }

    Ok(())
}
