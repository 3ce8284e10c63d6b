//! Terminal presentation: color resolution, themed labels, tables and spinners.
//!
//! Color is turned off by, in order: `--no-color`, a set `NO_COLOR`, `TERM=dumb`,
//! and finally (for `--color auto`) stdout not being a terminal.

use anstream::{eprintln, println};
use anstyle::{AnsiColor, Color, Style};
use clap::ValueEnum;
use comfy_table::{Attribute, Cell, ContentArrangement, Table, presets};
use indicatif::{ProgressBar, ProgressStyle};
use std::borrow::Cow;
use std::io::IsTerminal;
use std::time::Duration;

/// When to emit ANSI colors
#[derive(ValueEnum, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Always,
    /// Only on a terminal
    #[default]
    Auto,
    Never,
}

/// Terminal background the output is tuned for
#[derive(ValueEnum, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

/// Colors for each semantic role, resolved once from a [`Theme`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub success: AnsiColor,
    pub warning: AnsiColor,
    pub error: AnsiColor,
    pub info: AnsiColor,
    pub muted: AnsiColor,
    /// Status column for the active profile
    pub active: AnsiColor,
    /// Status column for profiles identical to the active one
    pub synced: AnsiColor,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                success: AnsiColor::BrightGreen,
                warning: AnsiColor::BrightYellow,
                error: AnsiColor::BrightRed,
                info: AnsiColor::BrightCyan,
                muted: AnsiColor::BrightBlack,
                active: AnsiColor::BrightRed,
                synced: AnsiColor::BrightGreen,
            },
            Theme::Light => Self {
                success: AnsiColor::Green,
                warning: AnsiColor::Yellow,
                error: AnsiColor::Red,
                info: AnsiColor::Blue,
                muted: AnsiColor::BrightBlack,
                active: AnsiColor::Red,
                synced: AnsiColor::Green,
            },
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::for_theme(Theme::default())
    }
}

/// Resolved display settings shared by every command
#[derive(Debug, Clone)]
pub struct Ui {
    pub color_enabled: bool,
    /// Spinners need both color and a terminal
    pub spinner_enabled: bool,
    pub palette: Palette,
}

impl Default for Ui {
    fn default() -> Self {
        Self::new(ColorMode::Auto, false)
    }
}

impl Ui {
    pub fn new(mode: ColorMode, force_no_color: bool) -> Self {
        let color_enabled = !force_no_color && color_allowed_by_env() && mode_wants_color(mode);
        let spinner_enabled = color_enabled && std::io::stdout().is_terminal();

        if !color_enabled {
            anstream::ColorChoice::write_global(anstream::ColorChoice::Never);
        }

        Self {
            color_enabled,
            spinner_enabled,
            palette: Palette::default(),
        }
    }

    /// Use the palette resolved from `theme`
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.palette = Palette::for_theme(theme);
        self
    }

    /// Whether prompts can be shown (both stdin and stdout are terminals)
    pub fn is_interactive(&self) -> bool {
        std::io::stdin().is_terminal() && std::io::stdout().is_terminal()
    }

    fn paint(&self, s: impl AsRef<str>, style: Style) -> String {
        if self.color_enabled {
            format!("{style}{}{style:#}", s.as_ref())
        } else {
            s.as_ref().to_string()
        }
    }

    /// Bold colored tag such as `OK` or `ERROR`
    fn tag(&self, text: &str, color: AnsiColor) -> String {
        self.paint(text, Style::new().fg_color(Some(Color::Ansi(color))).bold())
    }

    pub fn ok(&self, msg: impl AsRef<str>) {
        println!("{} {}", self.tag("OK", self.palette.success), msg.as_ref());
    }

    pub fn warn(&self, msg: impl AsRef<str>) {
        println!("{} {}", self.tag("WARN", self.palette.warning), msg.as_ref());
    }

    /// Goes to stderr
    pub fn err(&self, msg: impl AsRef<str>) {
        eprintln!("{} {}", self.tag("ERROR", self.palette.error), msg.as_ref());
    }

    pub fn info(&self, msg: impl AsRef<str>) {
        println!("{} {}", self.tag("INFO", self.palette.info), msg.as_ref());
    }

    pub fn dim(&self, s: impl AsRef<str>) -> String {
        self.paint(s, Style::new().fg_color(Some(Color::Ansi(self.palette.muted))))
    }

    pub fn bold(&self, s: impl AsRef<str>) -> String {
        self.paint(s, Style::new().bold())
    }

    pub fn colored(&self, s: impl AsRef<str>, color: AnsiColor) -> String {
        self.paint(s, Style::new().fg_color(Some(Color::Ansi(color))))
    }

    /// Unicode glyph with color, ASCII fallback without
    fn glyph(&self, fancy: &'static str, plain: &'static str) -> &'static str {
        if self.color_enabled { fancy } else { plain }
    }

    pub fn icon_ok(&self) -> &'static str {
        self.glyph("✓", "[OK]")
    }

    pub fn icon_warn(&self) -> &'static str {
        self.glyph("⚠", "[!]")
    }

    pub fn icon_err(&self) -> &'static str {
        self.glyph("✗", "[X]")
    }

    pub fn icon_info(&self) -> &'static str {
        self.glyph("•", "-")
    }

    /// Bordered table; plain markdown borders without color
    pub fn table(&self) -> Table {
        let preset = if self.color_enabled {
            presets::UTF8_FULL_CONDENSED
        } else {
            presets::ASCII_MARKDOWN
        };
        let mut table = Table::new();
        table
            .load_preset(preset)
            .set_content_arrangement(ContentArrangement::Dynamic);
        table
    }

    /// Borderless table for aligned key/value lists
    pub fn simple_table(&self) -> Table {
        let mut table = Table::new();
        table
            .load_preset(presets::NOTHING)
            .set_content_arrangement(ContentArrangement::Dynamic);
        table
    }

    pub fn cell(&self, content: impl Into<String>) -> Cell {
        Cell::new(content.into())
    }

    pub fn header_cell(&self, content: impl Into<String>) -> Cell {
        let cell = Cell::new(content.into());
        if self.color_enabled {
            cell.add_attribute(Attribute::Bold)
        } else {
            cell
        }
    }

    /// Colored through comfy-table itself so column widths ignore escape codes
    pub fn colored_cell(&self, content: impl Into<String>, color: AnsiColor) -> Cell {
        let cell = Cell::new(content.into());
        if self.color_enabled {
            // The 16 ANSI colors are the first 16 entries of the 256-color table
            cell.fg(comfy_table::Color::AnsiValue(color as u8))
        } else {
            cell
        }
    }

    /// Spinner for a long step; hidden when spinners are disabled
    pub fn spinner(&self, message: impl Into<Cow<'static, str>>) -> ProgressBar {
        if !self.spinner_enabled {
            let pb = ProgressBar::hidden();
            pb.set_message(message);
            return pb;
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
                .template("{spinner:.cyan} {msg}")
                .expect("valid template"),
        );
        pb.set_message(message);
        pb.enable_steady_tick(Duration::from_millis(80));
        pb
    }

    pub fn spinner_finish_ok(&self, pb: &ProgressBar, msg: impl Into<Cow<'static, str>>) {
        self.finish_spinner(pb, msg.into(), "✓", self.palette.success, |ui, msg| ui.ok(msg));
    }

    pub fn spinner_finish_err(&self, pb: &ProgressBar, msg: impl Into<Cow<'static, str>>) {
        self.finish_spinner(pb, msg.into(), "✗", self.palette.error, |ui, msg| ui.err(msg));
    }

    /// Replace the spinner line with `glyph msg`, or print through `fallback`
    /// when the spinner was hidden
    fn finish_spinner(
        &self,
        pb: &ProgressBar,
        msg: Cow<'static, str>,
        glyph: &str,
        color: AnsiColor,
        fallback: fn(&Self, Cow<'static, str>),
    ) {
        if !self.spinner_enabled {
            pb.finish_and_clear();
            fallback(self, msg);
            return;
        }

        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{msg}")
                .expect("valid template"),
        );
        pb.finish_with_message(format!("{} {}", self.colored(glyph, color), msg));
    }

    pub fn println(&self, msg: impl AsRef<str>) {
        println!("{}", msg.as_ref());
    }

    pub fn newline(&self) {
        println!();
    }

    pub fn section(&self, title: impl AsRef<str>) {
        println!("{}", self.bold(title));
    }
}

/// `NO_COLOR` (any value, see no-color.org) and `TERM=dumb` both veto color
fn color_allowed_by_env() -> bool {
    std::env::var_os("NO_COLOR").is_none()
        && std::env::var("TERM").map_or(true, |term| term != "dumb")
}

fn mode_wants_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => std::io::stdout().is_terminal(),
    }
}
