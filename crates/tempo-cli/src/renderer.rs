//! Terminal output.
//!
//! Everything the CLI prints is markdown produced by the `Display` impls in
//! `tempo_core::display`. Rich mode styles it with termimad; plain mode
//! prints it untouched so output stays easy to pipe and compare.

use std::{env, fmt::Display};

use anyhow::Result;
use termimad::{crossterm::style::Color, MadSkin};

/// Renders markdown either styled or as plain text.
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();
        skin.set_headers_fg(Color::Cyan);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::Magenta);
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { rich_enabled, skin }
    }

    /// Plain output when `--no-color` is given or `NO_COLOR` is set.
    pub fn from_flags(no_color: bool) -> Self {
        let no_color_env = env::var_os("NO_COLOR").is_some_and(|value| !value.is_empty());
        Self::new(!no_color && !no_color_env)
    }

    /// Renders anything with a markdown `Display` impl.
    pub fn render_display<T: Display + ?Sized>(&self, value: &T) -> Result<()> {
        self.render(&value.to_string())
    }

    pub fn render(&self, markdown: &str) -> Result<()> {
        if !self.rich_enabled {
            print!("{markdown}");
            return Ok(());
        }

        for line in markdown.lines() {
            // Keep the hash marks visible so day headings stay scannable
            if line.starts_with('#') {
                println!("\x1b[36m{line}\x1b[0m");
            } else {
                self.skin.print_inline(line);
                println!();
            }
        }
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_color_flag_disables_rich_output() {
        assert!(!TerminalRenderer::from_flags(true).rich_enabled);
    }

    #[test]
    fn test_default_is_rich() {
        assert!(TerminalRenderer::default().rich_enabled);
    }

    #[test]
    fn test_plain_render_succeeds() {
        let renderer = TerminalRenderer::new(false);
        assert!(renderer.render("# Study plan 1\n\n- Student: 7\n").is_ok());
    }
}
