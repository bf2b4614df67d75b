use chrono::{NaiveDate, Utc};
use colored::*;

use studywell::calendar::{Calendar, LoadLevel};
use studywell::community::CommunityBoard;
use studywell::recommendation::{mood_label, Recommendation};
use studywell::wellness::{GoalOutcome, Metric, MetricLevel, WellnessState};

pub fn print_status(state: &WellnessState) {
    println!("{}", "¡Hola! 👋".cyan().bold());
    println!("{}", state.motivational_message());
    println!("{}", format!("✨ Racha de {} días", state.streak()).yellow());

    print_pet(state);
    print_metrics(state);
    print_goals(state);
}

pub fn print_pet(state: &WellnessState) {
    let pet = state.pet();
    println!("\n{} {}", pet.mood().emoji(), pet.name.cyan().bold());
    println!("Nivel: {:.1}", pet.level);
    println!("Felicidad: {}%", pet.happiness.round());
    println!("Salud: {}%", pet.health.round());
    println!("{} {}", "Última comida:".dimmed(), pet.last_fed.format("%H:%M"));
}

pub fn print_metrics(state: &WellnessState) {
    let metrics = state.metrics();
    println!("\n{}", "Bienestar".cyan().bold());
    for metric in Metric::ALL {
        let value = metrics.get(metric);
        let level = MetricLevel::for_value(value, metric.max());
        let level_text = match level {
            MetricLevel::Excellent => level.to_string().green(),
            MetricLevel::Good => level.to_string().yellow(),
            MetricLevel::Fair => level.to_string().red(),
            MetricLevel::NeedsAttention => level.to_string().red().bold(),
        };
        let unit = metric.unit().map(|u| format!(" {}", u)).unwrap_or_default();
        println!(
            "  {:<20} {:>4}/{}{}  {}",
            metric.label(),
            value,
            metric.max(),
            unit,
            level_text
        );
    }
    println!("Ánimo: {}", mood_label(metrics.mood));

    let score = state.overall_wellness_score();
    let filled = (score.round() as usize).min(10);
    println!(
        "{} {}/10 {}{}",
        "Puntuación general:".cyan(),
        score,
        "█".repeat(filled).green(),
        "░".repeat(10 - filled).dimmed()
    );
}

pub fn print_goals(state: &WellnessState) {
    println!(
        "\n{} {}/{}",
        "Objetivos del día".cyan().bold(),
        state.completed_goals(),
        state.goals().len()
    );
    for goal in state.goals() {
        let mark = if goal.completed { "✓".green() } else { " ".normal() };
        let title = if goal.completed {
            goal.title.dimmed()
        } else {
            goal.title.normal()
        };
        println!("  [{}] {} {} {}", mark, goal.id.yellow(), title, format!("({})", goal.category).dimmed());
    }
    println!("{}% completado", state.goal_progress().round());
}

pub fn print_goal_outcome(goal_id: &str, outcome: GoalOutcome) {
    match outcome {
        GoalOutcome::Completed => println!("{}", format!("🎉 Objetivo {} completado", goal_id).green()),
        GoalOutcome::AlreadyCompleted => println!("{}", format!("Objetivo {} ya estaba completado", goal_id).yellow()),
        GoalOutcome::Reopened => println!("{}", format!("Objetivo {} marcado como pendiente", goal_id).yellow()),
        GoalOutcome::NotFound => println!("{}", format!("No existe el objetivo {}", goal_id).red()),
    }
}

pub fn print_recommendation(recommendation: &Recommendation) {
    println!("\n{}", recommendation.title.cyan().bold());
    println!("{}", recommendation.message);
    println!("{} {}", "→".yellow(), recommendation.action.yellow());
}

pub fn print_week(calendar: &Calendar, start: NaiveDate) {
    println!("{}", "Semana".cyan().bold());
    for day in calendar.week(start) {
        let load = format!("{:.1}", day.mental_load);
        let load = match day.level() {
            LoadLevel::High => load.red(),
            LoadLevel::Moderate => load.yellow(),
            LoadLevel::Low => load.green(),
        };
        let marker = if day.is_today { "●" } else { " " };
        println!("{} {} {}  carga mental {}", marker, day.date.format("%a"), day.date, load);

        for event in calendar.events_for(day.date) {
            let stress = event
                .stress_level
                .map(|s| format!(" estrés {}", s))
                .unwrap_or_default();
            println!(
                "    {:<12} {} {}{}",
                event.time,
                event.title,
                format!("[{}]", event.kind).dimmed(),
                stress.dimmed()
            );
        }
    }
}

pub fn print_board(board: &CommunityBoard, category: studywell::community::PostCategory) {
    println!("{}", "Comunidad anónima".cyan().bold());
    let interests: Vec<String> = board
        .interests()
        .iter()
        .map(|i| format!("{} ({})", i.category.label(), i.members))
        .collect();
    println!("{}", interests.join(" · ").dimmed());

    let now = Utc::now();
    for post in board.posts_in(category) {
        println!(
            "\n{} {} {}",
            post.title.bold(),
            format!("#{}", post.id).dimmed(),
            format!("· {} · {}", post.author, post.age_label(now)).dimmed()
        );
        println!("{}", post.content);
        println!("{}", format!("♥ {}  💬 {}", post.likes, post.replies).magenta());
    }
}
