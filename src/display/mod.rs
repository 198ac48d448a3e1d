//! Display formatting for terminal output
//!
//! Plain-text renderers for expenses and reports. Renderers return strings
//! so the CLI decides where they go.

pub mod expense;
pub mod report;

pub use expense::format_expense_list;
pub use report::{
    format_budget_status, format_dashboard, format_forecast, format_monthly_history,
    format_suggestions,
};

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    if pct < 0.1 && pct > 0.0 {
        format!("{:.2}%", pct)
    } else {
        format!("{:.1}%", pct)
    }
}

/// Horizontal bar filled to `fraction` (0.0-1.0) of `width`
pub fn format_bar(fraction: f64, width: usize) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Truncate to `max_len` characters, marking the cut with an ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}

pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0.05), "0.05%");
        assert_eq!(format_percentage(44.444), "44.4%");
        assert_eq!(format_percentage(0.0), "0.0%");
    }

    #[test]
    fn test_format_bar() {
        assert_eq!(format_bar(0.5, 4), "██░░");
        assert_eq!(format_bar(2.0, 3), "███");
        assert_eq!(format_bar(-1.0, 2), "░░");
    }

    #[test]
    fn test_truncate_is_char_safe() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("café au lait", 7), "café...");
        assert_eq!(truncate("abcdef", 2), "..");
    }
}
