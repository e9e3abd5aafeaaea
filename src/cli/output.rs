//! Console formatting for CLI reports

use crate::pipeline::{MatchResult, TrainingResult};

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Format a count together with its share, e.g. `42 (84.0%)`
pub fn format_count(count: usize, rate: f64) -> String {
    format!("{count} ({:.1}%)", rate * 100.0)
}

pub fn print_training_result(result: &TrainingResult) {
    print_section("Training summary");
    print_kv("Episodes", &result.episodes.to_string());
    print_kv(
        &format!("X wins ({})", result.x_name),
        &format_count(result.x_wins, result.x_win_rate),
    );
    print_kv(
        &format!("O wins ({})", result.o_name),
        &format_count(result.o_wins, result.o_win_rate),
    );
    print_kv("Draws", &format_count(result.draws, result.draw_rate));
    if let Some(states) = result.x_states {
        print_kv("X table states", &states.to_string());
    }
    if let Some(states) = result.o_states {
        print_kv("O table states", &states.to_string());
    }
    print_kv("Elapsed", &format!("{} ms", result.elapsed_ms));
}

pub fn print_match_result(title: &str, result: &MatchResult) {
    print_section(title);
    print_kv("X", &result.x_name);
    print_kv("O", &result.o_name);
    print_kv("Games", &result.games.to_string());
    print_kv("X wins", &format_count(result.wins, result.win_rate));
    print_kv("Draws", &format_count(result.draws, result.draw_rate));
    print_kv("O wins", &format_count(result.losses, result.loss_rate));
}
