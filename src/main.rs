use std::path::PathBuf;

use anyhow::{
    Context,
    Result,
    bail
};
use clap::{
    Parser,
    Subcommand
};
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use mathforml::configuration::Configuration;
use mathforml::demo::demo::{
    Demo,
    DemoOutput,
    RunContext
};

#[derive(Parser)]
#[command(name = "mathforml", version, about = "Worked examples of the math behind machine learning")]
struct Cli {
    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands
}

#[derive(Subcommand)]
enum Commands {
    /// List the available demos
    List,

    /// Run one or more demos, or `all`
    Run {
        /// Demo names
        #[arg(required = true, value_parser = parse_target)]
        targets: Vec<Target>,

        /// Print the reports as JSON
        #[arg(long)]
        json: bool,

        /// Skip writing charts
        #[arg(long)]
        no_chart: bool,

        /// Directory for the charts (overrides the configuration)
        #[arg(long)]
        out_dir: Option<PathBuf>
    }
}

#[derive(Debug, Clone, Copy)]
enum Target {
    All,
    One(Demo)
}

fn parse_target(name: &str) -> Result<Target, String> {
    if name == "all" {
        return Ok(Target::All);
    }
    Demo::from_name(name)
        .map(Target::One)
        .ok_or_else(|| format!("unknown demo '{}', see `mathforml list`", name))
}

/// 展開 `all` 並去除重複，保留第一次出現的順序。
fn resolve(targets: &[Target]) -> Vec<Demo> {
    let mut demos: Vec<Demo> = Vec::new();
    for target in targets {
        let selected: &[Demo] = match target {
            Target::All => &Demo::ALL,
            Target::One(demo) => std::slice::from_ref(demo)
        };
        for demo in selected {
            if !demos.contains(demo) {
                demos.push(*demo);
            }
        }
    }
    demos
}

fn load_configuration(path: Option<PathBuf>) -> Result<Configuration> {
    match path {
        Some(path) => Configuration::from_reader(&path)
            .with_context(|| format!("Failed to load configuration {}", path.display())),
        None => Ok(Configuration::new())
    }
}

fn print_text(demo: Demo, output: &DemoOutput) {
    println!("=== {}: {} ===", demo.name(), demo.description());
    println!("{}", output.summary());
    if let Some(chart) = output.chart() {
        println!("Chart saved to {}", chart.display());
    }
    println!();
}

/// `RUST_LOG` 未設定或為空時只顯示 warn 以上。
fn log_filter(directives: &str) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .parse_lossy(directives)
}

fn main() -> Result<()> {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();
    tracing_subscriber::fmt().with_env_filter(log_filter(&directives)).init();

    let cli = Cli::parse();
    let mut configuration = load_configuration(cli.config)?;

    match cli.command {
        Commands::List => {
            for demo in Demo::ALL {
                println!("{:<22} {:<36} {}", demo.name(), demo.file_name(), demo.description());
            }
        }
        Commands::Run {
            targets,
            json,
            no_chart,
            out_dir
        } => {
            if let Some(out_dir) = out_dir {
                configuration = configuration.with_output_dir(out_dir);
            }
            let context = RunContext::new(&configuration, !no_chart);

            let mut outputs = Vec::new();
            let mut failures = Vec::new();
            for demo in resolve(&targets) {
                info!(demo = demo.name(), "running demo");
                match demo.run(&context) {
                    Ok(output) => {
                        if !json {
                            print_text(demo, &output);
                        }
                        outputs.push(output);
                    }
                    Err(error) => {
                        eprintln!("{}: {:#}", demo.name(), anyhow::Error::new(error));
                        failures.push(demo.name());
                    }
                }
            }

            if json {
                let rendered = serde_json::to_string_pretty(&outputs).context("Failed to serialize reports")?;
                println!("{}", rendered);
            }
            if !failures.is_empty() {
                bail!("{} demo(s) failed: {}", failures.len(), failures.join(", "));
            }
        }
    }
    Ok(())
}
