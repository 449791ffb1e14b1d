use std::io::IsTerminal;
use owo_colors::OwoColorize;
use terminal_size::{Width, terminal_size};

use crate::scoring::{ComponentScore, ComponentWeights, OverallResult, ScoreStatus};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate text to fit available width, accounting for Unicode
fn truncate(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

fn paint_status(text: &str, status: ScoreStatus, use_colors: bool) -> String {
    if !use_colors {
        return text.to_string();
    }
    match status {
        ScoreStatus::Excellent => text.green().to_string(),
        ScoreStatus::Good => text.cyan().to_string(),
        ScoreStatus::Warning => text.yellow().to_string(),
        ScoreStatus::Fail => text.red().bold().to_string(),
    }
}

/// One row per component: id, score, status, name, cap marker.
/// ID column: 5 chars (fits "OPSEO"), score column: 3 chars, right-aligned.
fn format_component_line(cs: &ComponentScore, term_width: Option<usize>, use_colors: bool) -> String {
    let id_str = format!("{:<5}", cs.component_id.as_str());
    let score_str = format!("{:>3}", cs.score);
    let status_str = format!("{:<9}", cs.status.as_str());
    let cap_str = cs
        .hard_cap_applied
        .as_ref()
        .map(|c| format!("  [capped: {}]", c))
        .unwrap_or_default();

    // 2 indent + 5 id + 2 + 3 score + 2 + 9 status + 2
    let fixed_width = 25 + cap_str.chars().count();
    let name = match term_width {
        Some(width) if width > fixed_width + 10 => {
            truncate(cs.component_id.display_name(), width - fixed_width)
        }
        Some(_) => truncate(cs.component_id.display_name(), 12),
        None => cs.component_id.display_name().to_string(),
    };

    if use_colors {
        format!(
            "  {}  {}  {}  {}{}",
            id_str.dimmed(),
            paint_status(&score_str, cs.status, true).bold(),
            paint_status(&status_str, cs.status, true),
            name,
            cap_str.magenta()
        )
    } else {
        format!("  {}  {}  {}  {}{}", id_str, score_str, status_str, name, cap_str)
    }
}

/// Format a scored audit for the terminal.
pub fn format_report(result: &OverallResult, use_colors: bool) -> String {
    let term_width = get_terminal_width();
    let mut lines = Vec::new();

    let headline = format!("Overall: {}/100 ({})", result.overall_score, result.overall_status);
    lines.push(if use_colors {
        paint_status(&headline, result.overall_status, true).bold().to_string()
    } else {
        headline
    });

    if result.component_scores.is_empty() {
        lines.push("No components scored.".to_string());
    } else {
        lines.push(String::new());
        lines.extend(
            result
                .component_scores
                .values()
                .map(|cs| format_component_line(cs, term_width, use_colors)),
        );
    }

    if !result.hard_caps_applied.is_empty() {
        lines.push(String::new());
        lines.push("Hard caps:".to_string());
        for condition in &result.hard_caps_applied {
            let line = format!("  - {}", condition);
            lines.push(if use_colors { line.red().to_string() } else { line });
        }
    }

    if !result.top_risks.is_empty() {
        lines.push(String::new());
        lines.push("Top risks:".to_string());
        for (idx, risk) in result.top_risks.iter().enumerate() {
            lines.push(format!("  {:>2}. {:<8}  {}", idx + 1, risk.severity.as_str(), risk.issue_id));
        }
    }

    if !result.top_quick_wins.is_empty() {
        lines.push(String::new());
        lines.push("Quick wins:".to_string());
        for (idx, win) in result.top_quick_wins.iter().enumerate() {
            lines.push(format!("  {:>2}. {}  ({})", idx + 1, win.issue_id, win.expected_impact));
        }
    }

    lines.join("\n")
}

/// Format the weight table with its total
pub fn format_weights(weights: &ComponentWeights) -> String {
    let mut lines: Vec<String> = weights
        .iter()
        .map(|(id, weight)| format!("{:<5}  {:>5.2}  {}", id.as_str(), weight, id.display_name()))
        .collect();
    lines.push(format!("{:<5}  {:>5.2}", "TOTAL", weights.total()));
    lines.join("\n")
}
