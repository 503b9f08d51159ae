//! Stagecraft CLI - animation prompt in, baked Blender scene out.
//!
//! Machine-consumable JSON goes to stdout; human chrome and interpreter
//! warnings go to stderr, so `cuecli timeline "..." | jq` just works.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;

use choreo::{interpret, schedule, FeedbackLevel, ParseResult, Plan, Timeline};
use stageconf::StageConfig;

#[derive(Parser, Debug)]
#[command(version, about = "Turn an animation prompt into a baked Blender scene")]
struct Cli {
    /// Config file (takes the place of ./stagecraft.toml in the load order)
    #[arg(short, long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Interpret a prompt and print the action plan as JSON
    Plan {
        /// The animation instruction, e.g. "wave slowly then jump high"
        prompt: String,
    },

    /// Interpret and schedule a prompt, print the timeline payload as JSON
    Timeline {
        /// The animation instruction
        prompt: String,

        /// Also save the payload under the configured timelines directory
        #[arg(long)]
        save: bool,
    },

    /// Run the full pipeline: plan, schedule, bake the scene with Blender
    Animate {
        /// The animation instruction
        prompt: String,

        /// Path to the source 3D model (fbx/glb/gltf/obj)
        model: PathBuf,

        /// Output .blend path (default: <output_dir>/<model>_animated.blend)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the timeline payload JSON Schema
    Schema,

    /// Show the effective configuration as TOML
    Config {
        /// Also list which files and env vars were applied
        #[arg(long)]
        sources: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (config, config_sources) = StageConfig::load_with_sources_from(cli.config.as_deref())
        .context("Failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.telemetry.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(
        files = config_sources.files.len(),
        env_overrides = config_sources.env_overrides.len(),
        "configuration loaded"
    );

    match cli.command {
        Commands::Plan { prompt } => {
            let result = interpret(&prompt);
            report_feedback(&result);
            print_json(&result.value)?;
        }

        Commands::Timeline { prompt, save } => {
            let timeline = interpret_and_schedule(&prompt);
            print_json(&timeline)?;
            if save {
                let path = save_payload(&config, &prompt, &timeline)?;
                eprintln!("{} {}", "Saved:".cyan(), path.display());
            }
        }

        Commands::Animate {
            prompt,
            model,
            output,
        } => {
            animate(&config, &prompt, &model, output).await?;
        }

        Commands::Schema => {
            let schema = schemars::schema_for!(Timeline);
            print_json(&schema)?;
        }

        Commands::Config { sources } => {
            print!("{}", config.to_toml());
            if sources {
                eprintln!();
                if config_sources.files.is_empty() {
                    eprintln!("{}", "No config files found; compiled defaults".dimmed());
                }
                for file in &config_sources.files {
                    eprintln!("{} {}", "loaded:".cyan(), file.display());
                }
                for var in &config_sources.env_overrides {
                    eprintln!("{} {}", "env override:".cyan(), var);
                }
            }
        }
    }

    Ok(())
}

fn interpret_and_schedule(prompt: &str) -> Timeline {
    let result = interpret(prompt);
    report_feedback(&result);
    schedule(&result.value)
}

async fn animate(
    config: &StageConfig,
    prompt: &str,
    model: &PathBuf,
    output: Option<PathBuf>,
) -> Result<()> {
    eprintln!("{}", "Stagecraft".bright_green().bold());
    eprintln!("{} {}", "Prompt:".cyan(), prompt);
    eprintln!("{} {}", "Model:".cyan(), model.display());

    let timeline = interpret_and_schedule(prompt);
    eprintln!(
        "{} {} action(s), {:.2}s total",
        "Timeline:".cyan(),
        timeline.len(),
        timeline.total_duration
    );

    let output = output.unwrap_or_else(|| {
        config
            .paths
            .output_dir
            .join(stagehand::default_blend_name(model))
    });

    eprintln!("{}", "Launching Blender (headless)...".yellow());
    let report = stagehand::bake(&config.blender, &timeline, model, &output)
        .await
        .context("Baking failed")?;

    eprintln!(
        "{} {} ({:.1}s)",
        "Scene saved:".bright_green().bold(),
        report.blend_path.display(),
        report.elapsed.as_secs_f64()
    );
    eprintln!(
        "{} {}",
        "Timeline payload:".dimmed(),
        report.timeline_path.display()
    );

    Ok(())
}

/// Write the payload into the timelines directory, named after the prompt.
fn save_payload(
    config: &StageConfig,
    prompt: &str,
    timeline: &Timeline,
) -> Result<PathBuf> {
    std::fs::create_dir_all(&config.paths.timelines_dir).with_context(|| {
        format!(
            "Failed to create timelines directory {}",
            config.paths.timelines_dir.display()
        )
    })?;

    let path = config
        .paths
        .timelines_dir
        .join(format!("{}.json", prompt_slug(prompt)));
    let rendered = serde_json::to_string_pretty(timeline).context("Failed to render JSON")?;
    std::fs::write(&path, rendered)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

/// Filesystem-safe name derived from the prompt.
fn prompt_slug(prompt: &str) -> String {
    let mut slug: String = prompt
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    slug.truncate(48);
    let slug = slug.trim_matches('_').to_string();
    if slug.is_empty() {
        "timeline".to_string()
    } else {
        slug
    }
}

/// Interpreter feedback goes to stderr, colored by level.
fn report_feedback(result: &ParseResult<Plan>) {
    for feedback in &result.feedback {
        let tag = match feedback.level {
            FeedbackLevel::Warning => format!("{}", "warning:".yellow().bold()),
            FeedbackLevel::Info => format!("{}", "note:".dimmed()),
        };
        eprintln!("{tag} {} (clause {})", feedback.message, feedback.clause + 1);
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("Failed to render JSON")?;
    println!("{rendered}");
    Ok(())
}
