//! forseti: bias scoring CLI
//!
//! Collects battery responses from the configured providers and scores
//! them for entity-directed sentiment.

use std::collections::BTreeMap;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use forseti::config::{Config, Secrets};
use forseti::{Forseti, MultiQuestionAnalyzer, render_comparison, render_report, store};
use tracing::info;

/// Forseti CLI
#[derive(Parser)]
#[command(name = "forseti")]
#[command(version = forseti::PKG_VERSION)]
#[command(about = "Entity-directed sentiment bias scoring for LLM responses")]
struct Args {
    /// Config file (default: ~/.forseti/config.toml, then /etc/forseti/config.toml)
    #[arg(short, long, env = "FORSETI_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List battery questions
    Questions {
        /// Only questions that target this entity
        #[arg(short, long)]
        entity: Option<String>,
    },

    /// Score one text against the tracked entities
    Evaluate {
        /// Text to score (or omit to read from stdin)
        text: Option<String>,
        /// Only score this entity
        #[arg(short, long)]
        entity: Option<String>,
        /// Print JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Compare single responses from several models
    Compare {
        /// JSON file mapping model name to response text
        responses: PathBuf,
        /// Print JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Aggregate collected battery responses into a bias report
    Analyze {
        /// JSON file mapping model name to question id to response text
        responses: PathBuf,
        /// Save aggregated results to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Print JSON instead of the report
        #[arg(long)]
        json: bool,
    },

    /// Render a report from saved results
    Report {
        /// Results file written by `analyze`
        results: PathBuf,
    },

    /// Ask every configured provider the battery questions
    Collect {
        /// Save responses to this file (default: print JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Only ask questions that target this entity
        #[arg(short, long)]
        entity: Option<String>,
        /// Analyze the responses and print the report
        #[arg(long)]
        analyze: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialise tracing (default: warn for CLI; override with RUST_LOG).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    info!(version = forseti::version_string(), "forseti starting");

    let config = Config::load(args.config.as_deref())?;
    let analyzer = build_analyzer(&config)?;

    match args.command {
        Command::Questions { entity } => {
            check_entity(&analyzer, entity.as_deref())?;
            let questions = analyzer.question_set(entity.as_deref());
            if questions.is_empty() {
                println!("no questions");
            }
            for q in questions {
                println!("{} (weight {}): {}", q.id, q.weight, q.prompt);
            }
        }

        Command::Evaluate { text, entity, json } => {
            check_entity(&analyzer, entity.as_deref())?;
            let text = resolve_text(text, "evaluate")?;
            let evaluator = analyzer.evaluator();
            let verdicts = match entity {
                Some(entity) => {
                    let verdict = evaluator.evaluate(&text, &entity);
                    BTreeMap::from([(entity, verdict)])
                }
                None => evaluator.evaluate_all_entities(&text),
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&verdicts)?);
            } else {
                let comparison = BTreeMap::from([("input".to_string(), verdicts)]);
                print!("{}", render_comparison(&comparison));
            }
        }

        Command::Compare { responses, json } => {
            let responses = read_json_map(&responses)?;
            let comparison = analyzer.evaluator().compare_models(&responses);
            if json {
                println!("{}", serde_json::to_string_pretty(&comparison)?);
            } else {
                print!("{}", render_comparison(&comparison));
            }
        }

        Command::Analyze {
            responses,
            output,
            json,
        } => {
            let responses = store::load_responses(&responses)?;
            let result = analyzer.analyze_all(&responses);
            if let Some(path) = &output {
                store::save_results(path, &result)?;
                eprintln!("saved results to {}", path.display());
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print!("{}", render_report(&result));
            }
        }

        Command::Collect {
            output,
            entity,
            analyze,
        } => {
            check_entity(&analyzer, entity.as_deref())?;
            let secrets = Secrets::load()?;
            let collector = config.collector(&secrets)?;
            let questions = analyzer.question_set(entity.as_deref());
            eprintln!(
                "asking {} question(s) of {} provider(s): {}",
                questions.len(),
                collector.len(),
                collector.names().collect::<Vec<_>>().join(", ")
            );

            let responses = collector.collect_battery(questions).await;
            match &output {
                Some(path) => {
                    store::save_responses(path, &responses)?;
                    eprintln!("saved responses to {}", path.display());
                }
                None if !analyze => {
                    println!("{}", serde_json::to_string_pretty(&responses)?);
                }
                None => {}
            }
            if analyze {
                print!("{}", render_report(&analyzer.analyze_all(&responses)));
            }
        }

        Command::Report { results } => {
            let result = store::load_results(&results)?;
            print!("{}", render_report(&result));
        }
    }

    Ok(())
}

fn build_analyzer(config: &Config) -> forseti::Result<MultiQuestionAnalyzer> {
    let mut builder = Forseti::builder().config(config.analyzer_config());
    if !config.analysis.recognizer {
        builder = builder.substring_only();
    }
    builder.build()
}

fn check_entity(
    analyzer: &MultiQuestionAnalyzer,
    entity: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    match entity {
        Some(e) if !analyzer.catalog().contains(e) => {
            let known: Vec<&str> = analyzer.catalog().ids().collect();
            Err(format!("unknown entity '{e}' (known: {})", known.join(", ")).into())
        }
        _ => Ok(()),
    }
}

fn read_json_map(path: &Path) -> Result<BTreeMap<String, String>, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Combine a positional argument and piped stdin into one input text.
fn resolve_text(arg: Option<String>, command: &str) -> Result<String, Box<dyn std::error::Error>> {
    let stdin_is_pipe = !io::stdin().is_terminal();
    let stdin_text = if stdin_is_pipe {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        let trimmed = buf.trim().to_string();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed)
        }
    } else {
        None
    };

    match (arg, stdin_text) {
        (Some(a), Some(s)) => Ok(format!("{a}\n\n{s}")),
        (Some(a), None) => Ok(a),
        (None, Some(s)) => Ok(s),
        (None, None) => {
            Err(format!("{command}: no input provided (pass text as argument or via stdin)").into())
        }
    }
}
