use colored::Colorize;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Section,
}

static COLOR_ENABLED: AtomicBool = AtomicBool::new(true);

pub fn set_color_enabled(enabled: bool) {
    COLOR_ENABLED.store(enabled, Ordering::Relaxed);
    colored::control::set_override(enabled);
}

fn color_enabled() -> bool {
    COLOR_ENABLED.load(Ordering::Relaxed)
}

fn apply_style(kind: MessageKind, message: impl fmt::Display) -> String {
    let text = message.to_string();
    let formatted = match kind {
        MessageKind::Info => text,
        MessageKind::Success => format!("[✓] {text}"),
        MessageKind::Warning => format!("[!] {text}"),
        MessageKind::Error => format!("[x] {text}"),
        MessageKind::Section => format!("=== {} ===", text.trim()),
    };
    if !color_enabled() {
        return formatted;
    }
    match kind {
        MessageKind::Success => formatted.bright_green().to_string(),
        MessageKind::Warning => formatted.bright_yellow().to_string(),
        MessageKind::Error => formatted.bright_red().to_string(),
        MessageKind::Section => formatted.bold().to_string(),
        MessageKind::Info => formatted,
    }
}

pub fn print(kind: MessageKind, message: impl fmt::Display) {
    let formatted = apply_style(kind, message);
    match kind {
        MessageKind::Section => println!("\n{formatted}"),
        MessageKind::Error => eprintln!("{formatted}"),
        _ => println!("{formatted}"),
    }
}

pub fn info(message: impl fmt::Display) {
    print(MessageKind::Info, message);
}

pub fn success(message: impl fmt::Display) {
    print(MessageKind::Success, message);
}

pub fn warning(message: impl fmt::Display) {
    print(MessageKind::Warning, message);
}

pub fn error(message: impl fmt::Display) {
    print(MessageKind::Error, message);
}

pub fn section(title: impl fmt::Display) {
    print(MessageKind::Section, title);
}

/// Formats an amount with two decimals, placing the sign before the symbol.
pub fn format_money(symbol: &str, amount: f64) -> String {
    if amount < 0.0 {
        format!("-{symbol}{:.2}", amount.abs())
    } else {
        format!("{symbol}{amount:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_places_sign_before_symbol() {
        assert_eq!(format_money("$", 12.5), "$12.50");
        assert_eq!(format_money("$", -3.0), "-$3.00");
        assert_eq!(format_money("€", 0.0), "€0.00");
    }
}
