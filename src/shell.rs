use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use colored::*;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use studywell::calendar::{self, Calendar, EventKind, NewEvent};
use studywell::chat::{self, ChatSession, ReplySource, GREETING};
use studywell::community::{CommunityBoard, PostCategory};
use studywell::config::Config;
use studywell::decay::{self, DecayTicker, SharedState};
use studywell::recommendation::dashboard_recommendation;
use studywell::wellness::{Metric, MetricsUpdate};

use crate::cli;
use crate::status;

pub async fn handle_shell(
    provider: Option<String>,
    model: Option<String>,
    data_dir: Option<PathBuf>,
) -> Result<()> {
    let config = Config::new(data_dir)?;
    let mut shell = ShellMode::new(config, provider, model)?;

    let result = shell.run().await;
    shell.shutdown().await;
    result
}

pub struct ShellMode {
    state: SharedState,
    ticker: DecayTicker,
    chat: ChatSession,
    calendar: Calendar,
    board: CommunityBoard,
}

impl ShellMode {
    pub fn new(config: Config, provider: Option<String>, model: Option<String>) -> Result<Self> {
        let state = decay::shared(cli::initial_state(&config));
        let ticker = DecayTicker::spawn(state.clone(), config.decay.period());
        let chat = cli::chat_session(&config, provider, model)?;

        Ok(ShellMode {
            state,
            ticker,
            chat,
            calendar: Calendar::seeded(),
            board: CommunityBoard::seeded(chrono::Utc::now()),
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        println!("{}", "🌱 Studywell".cyan().bold());
        println!("{}", GREETING);
        println!("{}", "Escribe /help para ver los comandos, /exit para salir".dimmed());

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdout = tokio::io::stdout();

        loop {
            stdout.write_all(b"studywell> ").await?;
            stdout.flush().await?;

            let Some(line) = lines.next_line().await.context("Failed to read input")? else {
                println!();
                break;
            };

            let input = line.trim();
            if input.is_empty() {
                continue;
            }
            if matches!(input, "/exit" | "/quit" | "exit" | "quit") {
                break;
            }

            if let Err(e) = self.handle_input(input).await {
                println!("{}: {}", "Error".red().bold(), e);
            }
        }

        println!("{}", "¡Hasta pronto! 👋".cyan());
        Ok(())
    }

    pub async fn shutdown(&mut self) {
        if let Err(e) = self.ticker.stop().await {
            tracing::warn!(error = %e, "Decay ticker did not stop cleanly");
        }
        tracing::debug!(ticks = self.ticker.ticks(), "Shell closed");
    }

    async fn handle_input(&mut self, input: &str) -> Result<()> {
        if !input.starts_with('/') {
            return self.handle_chat(input).await;
        }

        let mut parts = input.split_whitespace();
        let command = parts.next().unwrap_or_default();
        let args: Vec<&str> = parts.collect();

        match (command, args.as_slice()) {
            ("/help", _) => self.show_help(),
            ("/status", _) => status::print_status(&*self.state.read().await),
            ("/goals", _) => status::print_goals(&*self.state.read().await),
            ("/score", _) => {
                let score = self.state.read().await.overall_wellness_score();
                println!("{} {}/10", "Puntuación general:".cyan(), score);
            }
            ("/feed", _) => {
                let mut state = self.state.write().await;
                state.feed_pet();
                let pet = state.pet();
                println!(
                    "{} {} está feliz: felicidad {}%, salud {}%",
                    pet.mood().emoji(),
                    pet.name,
                    pet.happiness.round(),
                    pet.health.round()
                );
            }
            ("/done", [goal_id]) => {
                let outcome = self.state.write().await.complete_goal(goal_id);
                status::print_goal_outcome(goal_id, outcome);
            }
            ("/toggle", [goal_id]) => {
                let outcome = self.state.write().await.toggle_goal(goal_id);
                status::print_goal_outcome(goal_id, outcome);
            }
            ("/set", [metric, value]) => {
                let metric: Metric = metric.parse()?;
                let value: f64 = value
                    .parse()
                    .with_context(|| format!("Invalid number: {}", value))?;

                let mut state = self.state.write().await;
                state.update_metrics(MetricsUpdate::single(metric, value))?;
                println!("{}: {}/{}", metric.label(), state.metrics().get(metric), metric.max());
            }
            ("/recommend", _) => {
                let recommendation = dashboard_recommendation(self.state.read().await.metrics());
                status::print_recommendation(&recommendation);
            }
            ("/calendar", args) => {
                let start = match args.first() {
                    Some(date) => date
                        .parse::<NaiveDate>()
                        .with_context(|| format!("Invalid date: {}", date))?,
                    None => cli::sample_week_start(),
                };
                status::print_week(&self.calendar, start);
            }
            ("/event", [_, _, _, _, ..]) => {
                let new_event = parse_event(&args)?;
                let event_id = self.calendar.add_event(new_event)?;
                let Some(event) = self.calendar.event(&event_id) else {
                    return Ok(());
                };
                println!("{} {} ({})", "📅 Evento agregado:".green(), event.title, event.date);
                if let Some(suggestion) = calendar::smart_suggestion(event) {
                    println!("{}", suggestion);
                }

                let metrics = self.state.read().await.metrics().clone();
                let advice =
                    chat::activity_advice(self.chat.backend(), &event.title, event.kind, &metrics).await;
                println!("{} {}", "🤖".cyan(), advice);
            }
            ("/board", args) => {
                let category = match args.first() {
                    Some(category) => category.parse()?,
                    None => PostCategory::General,
                };
                status::print_board(&self.board, category);
            }
            ("/post", [category, _, ..]) => {
                let category: PostCategory = category.parse()?;
                let content = args[1..].join(" ");
                let post_id = self.board.publish(category, "", &content)?;
                println!("{} {}", "✉️  Publicado de forma anónima".green(), format!("#{}", post_id).dimmed());
            }
            ("/like", [post_id]) => {
                let likes = self.board.like(post_id)?;
                println!("{} {}", "♥".magenta(), likes);
            }
            ("/event", _) => {
                println!("Uso: {} <AAAA-MM-DD> <hora> <tipo> <título>", command.green());
            }
            ("/post", _) => {
                println!("Uso: {} <categoría> <texto>", command.green());
            }
            ("/like", _) => {
                println!("Uso: {} <id>", command.green());
            }
            ("/done" | "/toggle", _) => {
                println!("Uso: {} <id>", command.green());
            }
            ("/set", _) => {
                println!("Uso: {} <métrica> <valor>", command.green());
            }
            _ => {
                println!("{}: {}", "Comando desconocido".red().bold(), command);
                println!("Escribe {} para ver los comandos", "/help".green());
            }
        }

        Ok(())
    }

    async fn handle_chat(&mut self, input: &str) -> Result<()> {
        let reply = self.chat.send(input).await?;
        println!("{} {}", "🤖".cyan(), reply.text);
        if let ReplySource::Fallback(category) = reply.source {
            tracing::debug!(%category, "Offline reply");
        }
        Ok(())
    }

    fn show_help(&self) {
        println!("\n{}", "Comandos".cyan().bold());
        println!("  {} - Estado general", "/status".green());
        println!("  {} - Objetivos del día", "/goals".green());
        println!("  {} - Puntuación de bienestar", "/score".green());
        println!("  {} - Alimentar a la mascota", "/feed".green());
        println!("  {} - Completar un objetivo", "/done <id>".green());
        println!("  {} - Marcar o desmarcar un objetivo", "/toggle <id>".green());
        println!("  {} - Actualizar una métrica (mood, energy, stress, sleep, water, anxiety)", "/set <métrica> <valor>".green());
        println!("  {} - Recomendación según tus métricas", "/recommend".green());
        println!("  {} - Semana y carga mental", "/calendar [AAAA-MM-DD]".green());
        println!("  {} - Agregar un evento (academic, wellness, social, warning)", "/event <AAAA-MM-DD> <hora> <tipo> <título>".green());
        println!("  {} - Comunidad anónima", "/board [categoría]".green());
        println!("  {} - Publicar de forma anónima", "/post <categoría> <texto>".green());
        println!("  {} - Apoyar una publicación", "/like <id>".green());
        println!("  {} - Salir", "/exit".green());
        println!("{}", "Cualquier otro texto se envía al asistente".dimmed());
    }
}

/// `<date> <time> <kind> <title...>` as typed after `/event`
fn parse_event(args: &[&str]) -> Result<NewEvent> {
    let [date, time, kind, title @ ..] = args else {
        anyhow::bail!("Expected <date> <time> <kind> <title>");
    };

    let date: NaiveDate = date
        .parse()
        .with_context(|| format!("Invalid date: {}", date))?;
    let kind: EventKind = kind.parse()?;

    Ok(NewEvent {
        title: title.join(" "),
        date,
        time: time.to_string(),
        kind,
        stress_level: None,
    })
}
