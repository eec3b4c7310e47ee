use ratatui::style::{Color, Modifier, Style};

const LEVELS: [&str; 8] = ["▁", "▂", "▃", "▄", "▅", "▆", "▇", "█"];

/// Returns a compact intensity bar of fixed width based on count/max.
pub fn intensity_bar(count: u32, max: u32, width: usize) -> String {
    if max == 0 {
        return "▁".repeat(width);
    }

    let ratio = count as f64 / max as f64;
    let filled = ((ratio * width as f64).round() as usize).min(width);
    let intensity_idx = ((ratio * (LEVELS.len() - 1) as f64).round() as usize)
        .min(LEVELS.len() - 1);

    LEVELS[intensity_idx].repeat(filled) + &"░".repeat(width - filled)
}

/// Chooses a style/color based on relative intensity of commit activity.
pub fn get_intensity_color(count: u32, max: u32) -> Style {
    if max == 0 {
        return Style::default().fg(Color::White);
    }

    let ratio = count as f64 / max as f64;
    if ratio > 0.8 {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else if ratio > 0.6 {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else if ratio > 0.4 {
        Style::default().fg(Color::Green)
    } else if ratio > 0.2 {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Blue)
    }
}

/// Heatmap cell colour: dark grey when empty, then a green ramp.
pub fn heat_cell_color(count: u32, max: u32) -> Color {
    if max == 0 || count == 0 {
        return Color::DarkGray;
    }
    let ratio = count as f64 / max as f64;
    if ratio > 0.75 {
        Color::Rgb(33, 110, 57)
    } else if ratio > 0.5 {
        Color::Rgb(48, 161, 78)
    } else if ratio > 0.25 {
        Color::Rgb(64, 196, 99)
    } else {
        Color::Rgb(155, 233, 168)
    }
}
