use chrono::Local;
use colored::*;

/// Logger con nombre por actor. Cada actor del sistema crea el suyo
/// con un color propio para distinguir su salida en la terminal.
#[derive(Debug, Clone)]
pub struct Logger {
    pub name: String,
    pub info_color: Color,
}

impl Logger {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_color(name, Color::White)
    }

    pub fn with_color(name: impl Into<String>, info_color: Color) -> Self {
        Self {
            name: name.into().to_uppercase(),
            info_color,
        }
    }

    fn prefix(&self, level: &str) -> String {
        format!(
            "[{}][{}][{}]",
            Local::now().format("%H:%M:%S"),
            level,
            self.name
        )
    }

    pub fn info(&self, msg: impl AsRef<str>) {
        println!(
            "{} {} {}",
            self.prefix("INFO").bold().color(self.info_color),
            "→".dimmed(),
            msg.as_ref()
        );
    }

    pub fn warn(&self, msg: impl AsRef<str>) {
        println!(
            "{} {} {}",
            self.prefix("WARN").bold().yellow(),
            "→".dimmed(),
            msg.as_ref()
        );
    }

    pub fn error(&self, msg: impl AsRef<str>) {
        eprintln!(
            "{} {} {}",
            self.prefix("ERROR").bold().bright_red(),
            "→".dimmed(),
            msg.as_ref()
        );
    }
}
