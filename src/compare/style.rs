//! Terminal styling for comparison output.
//!
//! Cells are padded on their visible text and painted afterwards, so column
//! alignment does not depend on whether colors are enabled.

use super::thresholds::{Direction, Severity, Thresholds};
use colored::Colorize;
use std::io::IsTerminal;

/// Colors used by the comparison report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Yellow,
    Red,
    BoldBrightRed,
    Green,
    BrightGreen,
    BoldBrightGreen,
    /// Grey, for NA / none / unchanged / unknown.
    Neutral,
    /// Cyan, for changes below the minor threshold.
    NeutralChange,
    Heading,
    Bold,
    BoldRed,
    BoldGreen,
}

/// Paints `text` with `tone`, or returns it untouched when colors are disabled.
pub fn paint(text: &str, tone: Tone, enabled: bool) -> String {
    if !enabled {
        return text.to_string();
    }
    let styled = match tone {
        Tone::Yellow => text.yellow(),
        Tone::Red => text.red(),
        Tone::BoldBrightRed => text.bright_red().bold(),
        Tone::Green => text.green(),
        Tone::BrightGreen => text.bright_green(),
        Tone::BoldBrightGreen => text.bright_green().bold(),
        Tone::Neutral => text.bright_black(),
        Tone::NeutralChange => text.cyan(),
        Tone::Heading => text.magenta().bold(),
        Tone::Bold => text.bold(),
        Tone::BoldRed => text.red().bold(),
        Tone::BoldGreen => text.green().bold(),
    };
    styled.to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// Text with an optional tone, rendered into a fixed-width cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Styled {
    pub text: String,
    pub tone: Option<Tone>,
}

impl Styled {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: None,
        }
    }

    pub fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone: Some(tone),
        }
    }

    pub fn render(&self, enabled: bool) -> String {
        match self.tone {
            Some(tone) => paint(&self.text, tone, enabled),
            None => self.text.clone(),
        }
    }

    /// Renders the cell padded with spaces to `width` visible characters.
    pub fn pad(&self, width: usize, align: Align, enabled: bool) -> String {
        let padding = " ".repeat(width.saturating_sub(self.text.chars().count()));
        let rendered = self.render(enabled);
        match align {
            Align::Left => rendered + &padding,
            Align::Right => padding + &rendered,
        }
    }
}

/// Whether to emit colors: off with `--no-color`, with `NO_COLOR` set, or when
/// stdout is not a terminal.
pub fn should_enable_color(no_color_flag: bool) -> bool {
    if no_color_flag || std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    std::io::stdout().is_terminal()
}

/// Tone of a severity in the given direction.
pub fn severity_tone(direction: Direction, severity: Severity) -> Tone {
    match (direction, severity) {
        (Direction::Regression, Severity::Minor) => Tone::Yellow,
        (Direction::Regression, Severity::Moderate) => Tone::Red,
        (Direction::Regression, Severity::Major) => Tone::BoldBrightRed,
        (Direction::Improvement, Severity::Minor) => Tone::Green,
        (Direction::Improvement, Severity::Moderate) => Tone::BrightGreen,
        (Direction::Improvement, Severity::Major) => Tone::BoldBrightGreen,
        _ => Tone::Neutral,
    }
}

/// The direction label, colored by how severe the change is.
pub fn direction_label(direction: Direction, severity: Severity) -> Styled {
    let tone = match direction {
        Direction::Improvement if severity == Severity::None => {
            severity_tone(direction, Severity::Minor)
        }
        Direction::Regression | Direction::Improvement => severity_tone(direction, severity),
        _ => Tone::Neutral,
    };
    Styled::new(direction.name(), tone)
}

pub fn severity_label(severity: Severity, direction: Direction) -> Styled {
    let tone = match severity {
        Severity::None => Tone::Neutral,
        _ => severity_tone(direction, severity),
    };
    Styled::new(severity.name(), tone)
}

/// A relative change rendered as a signed percentage.
///
/// `oriented` is the same change with its sign adjusted so positive means
/// slower; it decides the color, `value` is what gets printed.
pub fn relative_change(value: Option<f64>, oriented: Option<f64>, thresholds: &Thresholds) -> Styled {
    let (Some(value), Some(oriented)) = (value, oriented) else {
        return Styled::plain("NA");
    };

    let text = format!("{:+.2}%", value * 100.0);
    let magnitude_pct = oriented.abs() * 100.0;
    if magnitude_pct < thresholds.minor_pct {
        return Styled::new(text, Tone::NeutralChange);
    }

    let severity = thresholds.classify(magnitude_pct);
    let tone = if oriented > 0.0 {
        severity_tone(Direction::Regression, severity)
    } else if oriented < 0.0 {
        severity_tone(Direction::Improvement, severity)
    } else {
        Tone::NeutralChange
    };
    Styled::new(text, tone)
}

/// Truncates or pads `text` to exactly `width` characters.
pub fn fit_text(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len <= width {
        return format!("{:<width$}", text);
    }
    if width <= 3 {
        return text.chars().take(width).collect();
    }
    let mut truncated: String = text.chars().take(width - 3).collect();
    truncated.push_str("...");
    truncated
}
