// ABOUTME: Command-line front end: assess a form submission, inspect the model, or find similar foods
// ABOUTME: Prints JSON on stdout; validation failures exit with status 2 and list every message
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Usage:
//! ```bash
//! # Predict calories and get guidance for a vegetarian diet
//! cargo run --bin calorie-advisor -- assess --age 30 --height 170 --weight 70 \
//!     --duration 30 --activity "Light walking" --diet Vegetarian
//!
//! # Include tracker readings
//! cargo run --bin calorie-advisor -- assess --heart-rate 110 --steps 8000 --kms-walked 6
//!
//! # Fit statistics and feature importances
//! cargo run --bin calorie-advisor -- model-info
//!
//! # Catalog items similar to a food
//! cargo run --bin calorie-advisor -- similar "Chicken salad" --count 3
//! ```

use anyhow::Context;
use calorie_advisor::advisor::{build_recommender, CalorieAdvisor};
use calorie_advisor::config::AppConfig;
use calorie_advisor::dataset::TrainingData;
use calorie_advisor::errors::{AppError, AppResult, ErrorCode, ErrorResponse};
use calorie_advisor::logging::LoggingConfig;
use calorie_advisor::models::{ActivityLevel, DietPreference, Gender, TrackerMetrics, UserInput};
use calorie_intelligence::{CatalogRecommender, FoodCatalog, RecommendationStrategy};
use clap::{Args, Parser, Subcommand};
use serde_json::{json, Value};
use std::io::{self, Write};
use std::process::ExitCode;
use tracing::{error, info};

#[derive(Parser)]
#[command(
    name = "calorie-advisor",
    version,
    about = "Predict calories burned and get food recommendations",
    long_about = "Fits a regression forest on historical exercise sessions, predicts calories burned for a form submission, and recommends foods for the user's BMI, activity level, and diet."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Recommendation strategy override (table or catalog)
    #[arg(long, global = true)]
    strategy: Option<RecommendationStrategy>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Assess one form submission
    Assess(AssessArgs),
    /// Show fit statistics and feature importances
    ModelInfo,
    /// List catalog foods similar to a named food
    Similar {
        /// Food name from the catalog
        name: String,
        /// Number of similar foods
        #[arg(long, default_value = "3")]
        count: usize,
    },
}

#[derive(Args)]
struct AssessArgs {
    /// Age in years
    #[arg(long, default_value = "30")]
    age: u32,
    /// Height in centimeters
    #[arg(long, default_value = "170")]
    height: f64,
    /// Weight in kilograms
    #[arg(long, default_value = "70")]
    weight: f64,
    /// Exercise duration in minutes
    #[arg(long, default_value = "30")]
    duration: f64,
    /// Activity level: "No activity", "Light walking", or "Regular exercise"
    #[arg(long, default_value = "Light walking")]
    activity: ActivityLevel,
    /// Body temperature in degrees Celsius
    #[arg(long, default_value = "37")]
    body_temp: f64,
    /// Gender: male or female
    #[arg(long, default_value = "male")]
    gender: Gender,
    /// Water intake in liters
    #[arg(long, default_value = "2.0")]
    water_intake: f64,
    /// Dietary preference; recommendations use "No Preference" when omitted
    #[arg(long)]
    diet: Option<DietPreference>,
    /// Skip food recommendations
    #[arg(long)]
    no_recommendations: bool,
    /// Number of ranked foods (catalog strategy)
    #[arg(long)]
    count: Option<usize>,
    /// Heart rate from a tracker (bpm); any tracker flag enables tracker readings
    #[arg(long)]
    heart_rate: Option<f64>,
    /// Steps taken today
    #[arg(long)]
    steps: Option<u32>,
    /// Kilometers walked today
    #[arg(long)]
    kms_walked: Option<f64>,
    /// Pulse rate throughout the day (bpm)
    #[arg(long)]
    pulse_rate: Option<f64>,
    /// Hours slept
    #[arg(long)]
    hours_slept: Option<f64>,
    /// Blood oxygen (%)
    #[arg(long)]
    blood_oxygen: Option<f64>,
}

impl AssessArgs {
    fn tracker(&self) -> Option<TrackerMetrics> {
        let any = self.heart_rate.is_some()
            || self.steps.is_some()
            || self.kms_walked.is_some()
            || self.pulse_rate.is_some()
            || self.hours_slept.is_some()
            || self.blood_oxygen.is_some();
        if !any {
            return None;
        }
        let defaults = TrackerMetrics::default();
        Some(TrackerMetrics {
            heart_rate: self.heart_rate.unwrap_or(defaults.heart_rate),
            steps: self.steps.unwrap_or(defaults.steps),
            kms_walked: self.kms_walked.unwrap_or(defaults.kms_walked),
            pulse_rate: self.pulse_rate.unwrap_or(defaults.pulse_rate),
            hours_slept: self.hours_slept.unwrap_or(defaults.hours_slept),
            blood_oxygen: self.blood_oxygen.unwrap_or(defaults.blood_oxygen),
        })
    }

    fn user_input(&self) -> UserInput {
        UserInput {
            age: self.age,
            height_cm: self.height,
            weight_kg: self.weight,
            duration_min: self.duration,
            activity_level: self.activity,
            body_temp_c: self.body_temp,
            gender: self.gender,
            tracker: self.tracker(),
            water_intake_l: self.water_intake,
        }
    }

    fn diet(&self) -> Option<DietPreference> {
        if self.no_recommendations {
            None
        } else {
            Some(self.diet.clone().unwrap_or_default())
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = LoggingConfig::from_env().init() {
        eprintln!("failed to initialize logging: {e}");
    }

    match run(&cli) {
        Ok(output) => match emit(&output, cli.pretty) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                error!(error = %e, "Failed to write output");
                ExitCode::FAILURE
            }
        },
        Err(e) => report(&e, cli.pretty),
    }
}

fn run(cli: &Cli) -> AppResult<Value> {
    let mut config = AppConfig::from_env()?;
    if let Some(strategy) = cli.strategy {
        config.strategy = strategy;
    }
    info!("Configuration: {}", config.summary());

    match &cli.command {
        Command::Assess(args) => {
            if let Some(count) = args.count {
                config.recommendation.default_count = count;
            }
            let data = TrainingData::load(&config.data.exercise_csv, &config.data.calories_csv)?;
            let advisor = CalorieAdvisor::new(&config, data, build_recommender(&config)?)?;
            let assessment = advisor.assess(&args.user_input(), args.diet())?;
            Ok(serde_json::to_value(assessment)?)
        }
        Command::ModelInfo => {
            let data = TrainingData::load(&config.data.exercise_csv, &config.data.calories_csv)?;
            let advisor = CalorieAdvisor::new(&config, data, build_recommender(&config)?)?;
            let model = advisor.model()?;
            let importances: Vec<Value> = model
                .feature_importances()
                .into_iter()
                .map(|(column, importance)| json!({ "column": column, "importance": importance }))
                .collect();
            Ok(json!({
                "fingerprint": advisor.training_data().fingerprint(),
                "feature_columns": model.feature_columns(),
                "report": model.report(),
                "feature_importances": importances,
            }))
        }
        Command::Similar { name, count } => {
            let recommender = CatalogRecommender::new(FoodCatalog::builtin(), config.recommendation);
            let similar = recommender.similar_foods(name, *count)?;
            Ok(json!({ "food": name, "similar": similar }))
        }
    }
}

fn emit(value: &Value, pretty: bool) -> anyhow::Result<()> {
    let text = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .context("serializing output")?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{text}").context("writing output")?;
    Ok(())
}

fn report(error: &AppError, pretty: bool) -> ExitCode {
    if error.code == ErrorCode::ValidationFailed {
        for message in error.violations() {
            eprintln!("{message}");
        }
    } else {
        error!(code = ?error.code, "{error}");
    }

    let payload = serde_json::to_value(ErrorResponse::from(error)).unwrap_or(Value::Null);
    if let Err(e) = emit(&payload, pretty) {
        eprintln!("failed to write error payload: {e}");
    }

    if error.code == ErrorCode::ValidationFailed {
        ExitCode::from(2)
    } else {
        ExitCode::FAILURE
    }
}
