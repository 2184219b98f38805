//! FuzzyHealth CLI - command-line interface for health risk scoring

#![deny(warnings)]

// Global invariants enforced:
// - Deterministic output ordering
// - Identical input yields byte-for-byte identical output

use anyhow::Context;
use clap::{Parser, Subcommand};
use fuzzyhealth_core::config::{self, ResolvedConfig};
use fuzzyhealth_core::{analyze, render_json, render_text, rule_base, HealthInputs, RenderOptions, TermDegree, Variable};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fuzzyhealth")]
#[command(about = "Fuzzy Sugeno health risk scoring")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score health risk from four measurements
    Analyze {
        /// Systolic blood pressure in mmHg
        #[arg(long)]
        blood_pressure: Option<f64>,

        /// Fasting blood sugar in mg/dL
        #[arg(long)]
        blood_sugar: Option<f64>,

        /// Body mass index
        #[arg(long)]
        bmi: Option<f64>,

        /// Age in years
        #[arg(long)]
        age: Option<u32>,

        /// Output format (overrides config file)
        #[arg(long)]
        format: Option<OutputFormat>,

        /// Path to config file (default: auto-discover)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Omit the calculation steps from text output
        #[arg(long)]
        no_trace: bool,

        /// Omit health tips from text output
        #[arg(long)]
        no_tips: bool,
    },
    /// Show membership degrees for one value
    Fuzzify {
        /// Variable name (bloodPressure, bloodSugar, bmi, age)
        variable: String,

        value: f64,

        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },
    /// Sample membership curves over a variable's display domain
    Curve {
        /// Variable name (bloodPressure, bloodSugar, bmi, age)
        variable: String,

        /// Number of intervals to sample
        #[arg(long, default_value = "100")]
        steps: usize,

        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },
    /// Print the rule base in table order
    Rules {
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },
    /// Validate or inspect configuration
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Validate a config file
    Validate {
        /// Path to config file (default: auto-discover from current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// Show the resolved configuration (merged defaults + config file)
    Show {
        /// Path to config file (default: auto-discover from current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

impl From<config::OutputFormat> for OutputFormat {
    fn from(format: config::OutputFormat) -> Self {
        match format {
            config::OutputFormat::Text => OutputFormat::Text,
            config::OutputFormat::Json => OutputFormat::Json,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            blood_pressure,
            blood_sugar,
            bmi,
            age,
            format,
            config: config_path,
            no_trace,
            no_tips,
        } => {
            let working_dir = std::env::current_dir()?;
            let resolved = config::load_and_resolve(&working_dir, config_path.as_deref())
                .context("failed to load configuration")?;

            if let Some(path) = &resolved.config_path {
                log::info!("using config: {}", path.display());
            }

            // CLI flags override config file values
            let inputs = HealthInputs {
                blood_pressure: blood_pressure.unwrap_or(resolved.defaults.blood_pressure),
                blood_sugar: blood_sugar.unwrap_or(resolved.defaults.blood_sugar),
                bmi: bmi.unwrap_or(resolved.defaults.bmi),
                age: age.unwrap_or(resolved.defaults.age),
            };

            for variable in resolved.check_domains(&inputs)? {
                let (min, max) = variable.domain();
                log::warn!(
                    "{} = {} is outside [{}, {}]; all of its terms will have degree 0",
                    variable,
                    inputs.value(variable),
                    min,
                    max
                );
            }

            let report = analyze(&inputs);
            let options = RenderOptions {
                show_trace: resolved.show_trace && !no_trace,
                show_tips: resolved.show_tips && !no_tips,
            };

            match format.unwrap_or_else(|| resolved.format.into()) {
                OutputFormat::Text => print!("{}", render_text(&report, &options)),
                OutputFormat::Json => println!("{}", render_json(&report)),
            }
        }
        Commands::Fuzzify {
            variable,
            value,
            format,
        } => {
            let variable: Variable = variable.parse()?;
            let degrees = fuzzyhealth_core::fuzzify(variable, value);

            match format {
                OutputFormat::Text => {
                    println!("{} = {}", variable, value);
                    print!("{}", render_degrees(&degrees));
                }
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&degrees)?);
                }
            }
        }
        Commands::Curve {
            variable,
            steps,
            format,
        } => {
            let variable: Variable = variable.parse()?;
            let curves = variable.curves(steps);

            match format {
                OutputFormat::Text => {
                    let (min, max) = variable.domain();
                    println!("{} [{}, {}]", variable, min, max);
                    for curve in &curves {
                        println!("\n{} ({})", curve.term, curve.function.kind());
                        for point in &curve.points {
                            println!("  {:>8.2} {:.4}", point.x, point.degree);
                        }
                    }
                }
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&curves)?);
                }
            }
        }
        Commands::Rules { format } => match format {
            OutputFormat::Text => {
                for (i, rule) in rule_base().iter().enumerate() {
                    println!("R{:<3} {}", i + 1, rule);
                }
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(rule_base())?);
            }
        },
        Commands::Config { action } => match action {
            ConfigAction::Validate { path } => {
                let working_dir = std::env::current_dir()?;
                match config::load_and_resolve(&working_dir, path.as_deref()) {
                    Ok(resolved) => {
                        if let Some(ref p) = resolved.config_path {
                            println!("Config valid: {}", p.display());
                        } else {
                            println!("No config file found. Using defaults.");
                        }
                    }
                    Err(e) => {
                        log::error!("config validation failed: {:#}", e);
                        std::process::exit(1);
                    }
                }
            }
            ConfigAction::Show { path } => {
                let working_dir = std::env::current_dir()?;
                let resolved = config::load_and_resolve(&working_dir, path.as_deref())
                    .context("failed to load configuration")?;
                print_resolved_config(&resolved);
            }
        },
    }

    Ok(())
}

fn render_degrees(degrees: &[TermDegree]) -> String {
    let mut output = String::new();
    for td in degrees {
        output.push_str(&format!("  {}: {:.4}\n", td.term, td.degree));
    }
    output
}

fn print_resolved_config(resolved: &ResolvedConfig) {
    println!("Configuration:");
    if let Some(ref p) = resolved.config_path {
        println!("  Source: {}", p.display());
    } else {
        println!("  Source: defaults (no config file found)");
    }
    println!();
    println!("Default inputs:");
    for variable in Variable::ALL {
        let value = resolved.defaults.value(variable);
        match variable.unit() {
            Some(unit) => println!("  {}: {} {}", variable, value, unit),
            None => println!("  {}: {}", variable, value),
        }
    }
    println!();
    println!("Output:");
    println!("  format: {}", resolved.format.as_str());
    println!("  show_trace: {}", resolved.show_trace);
    println!("  show_tips: {}", resolved.show_tips);
    println!("  strict_domain: {}", resolved.strict_domain);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_degrees_uses_term_colon_degree() {
        let degrees = fuzzyhealth_core::fuzzify(Variable::BloodPressure, 120.0);
        assert_eq!(
            render_degrees(&degrees),
            "  rendah: 0.0000\n  normal: 1.0000\n  tinggi: 0.0000\n"
        );
    }
}
