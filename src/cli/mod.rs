use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use colored::*;

use studywell::calendar::Calendar;
use studywell::chat::{self, AIProviderClient, ChatSession, FallbackResponder, ReplySource};
use studywell::community::{CommunityBoard, PostCategory};
use studywell::config::Config;
use studywell::recommendation::dashboard_recommendation;
use studywell::wellness::{MetricsUpdate, WellnessState};

use crate::status;

pub use commands::{Commands, MetricArgs};

mod commands;

/// Monday of the bundled sample week
pub fn sample_week_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 27).unwrap_or_default()
}

pub fn initial_state(config: &Config) -> WellnessState {
    match config.rng_seed {
        Some(seed) => WellnessState::seeded(seed),
        None => WellnessState::new(),
    }
}

pub fn chat_session(
    config: &Config,
    provider: Option<String>,
    model: Option<String>,
) -> Result<ChatSession> {
    let system_prompt = config.system_prompt(provider.as_deref());
    let ai_config = config.get_ai_config(provider, model)?;
    tracing::debug!(provider = %ai_config.provider, model = %ai_config.model, "Chat backend configured");

    let session = ChatSession::new(
        Box::new(AIProviderClient::new(ai_config)),
        FallbackResponder::new(config.rng_seed),
    );
    Ok(match system_prompt {
        Some(prompt) => session.with_system_prompt(prompt),
        None => session,
    })
}

pub async fn handle_status(json: bool, data_dir: Option<PathBuf>) -> Result<()> {
    let config = Config::new(data_dir)?;
    let state = initial_state(&config);

    if json {
        println!("{}", serde_json::to_string_pretty(&state.snapshot())?);
        return Ok(());
    }

    status::print_status(&state);
    status::print_recommendation(&dashboard_recommendation(state.metrics()));
    Ok(())
}

pub async fn handle_recommend(metrics: MetricArgs, data_dir: Option<PathBuf>) -> Result<()> {
    let config = Config::new(data_dir)?;
    let mut state = initial_state(&config);

    let update = MetricsUpdate::from(metrics);
    if !update.is_empty() {
        state.update_metrics(update)?;
    }

    status::print_metrics(&state);
    status::print_recommendation(&dashboard_recommendation(state.metrics()));
    Ok(())
}

pub async fn handle_calendar(
    date: Option<NaiveDate>,
    plan: bool,
    provider: Option<String>,
    model: Option<String>,
    data_dir: Option<PathBuf>,
) -> Result<()> {
    let config = Config::new(data_dir)?;
    let state = initial_state(&config);
    let calendar = Calendar::seeded();
    let start = date.unwrap_or_else(sample_week_start);

    status::print_week(&calendar, start);

    // Advice targets the busiest day of the shown week
    let busiest = calendar
        .week(start)
        .into_iter()
        .max_by(|a, b| a.mental_load.total_cmp(&b.mental_load))
        .map(|day| day.date)
        .unwrap_or(start);
    println!("\n{} {}", "Día más exigente:".cyan(), busiest);
    status::print_recommendation(&calendar.day_recommendation(busiest, state.metrics()));

    if plan {
        let ai_config = config.get_ai_config(provider, model)?;
        let client = AIProviderClient::new(ai_config);
        let events = calendar.events_for(busiest);
        let advice = chat::plan_day(&client, &events, state.metrics()).await;
        println!("\n{}", "Plan sugerido".cyan().bold());
        println!("{}", advice);
    }

    Ok(())
}

pub async fn handle_community(category: String) -> Result<()> {
    let category: PostCategory = category.parse()?;
    let board = CommunityBoard::seeded(chrono::Utc::now());

    status::print_board(&board, category);
    Ok(())
}

pub async fn handle_chat(
    message: String,
    provider: Option<String>,
    model: Option<String>,
    data_dir: Option<PathBuf>,
) -> Result<()> {
    let config = Config::new(data_dir)?;
    let mut session = chat_session(&config, provider, model)?;

    let reply = session.send(&message).await?;
    println!("{}", reply.text);
    if let ReplySource::Fallback(category) = reply.source {
        println!("{}", format!("(respuesta sin conexión: {})", category).dimmed());
    }
    Ok(())
}
