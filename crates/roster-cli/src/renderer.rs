//! Terminal rendering of markdown output.
//!
//! Rich mode styles the markdown with termimad: headers in blue, tables laid
//! out as aligned grids, everything else styled inline. Plain mode prints the
//! markdown untouched, which is what scripts and tests read.

use anyhow::Result;
use termimad::{crossterm::style::Color, MadSkin};

/// Terminal renderer that can switch between rich and plain text output
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    /// Create a new terminal renderer
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();

        skin.set_headers_fg(Color::Blue);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::Magenta);
        skin.inline_code.set_bg(Color::AnsiValue(238));
        skin.table.set_fg(Color::DarkGrey);

        Self { rich_enabled, skin }
    }

    /// Render markdown text to terminal
    pub fn render(&self, markdown: &str) -> Result<()> {
        if !self.rich_enabled {
            print!("{markdown}");
            return Ok(());
        }

        for block in Block::split(markdown) {
            match block {
                Block::Header(line) => println!("\x1b[34m{line}\x1b[0m"),
                Block::Table(rows) => print!("{}", self.skin.term_text(&rows)),
                Block::Line(line) => {
                    self.skin.print_inline(line);
                    println!();
                }
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

/// A run of markdown rendered one way.
#[derive(Debug, PartialEq)]
enum Block<'a> {
    Header(&'a str),
    /// Consecutive `|` rows, kept together so columns line up
    Table(String),
    Line(&'a str),
}

impl<'a> Block<'a> {
    fn split(markdown: &'a str) -> Vec<Block<'a>> {
        let mut blocks = Vec::new();
        let mut table = String::new();

        for line in markdown.lines() {
            if line.starts_with('|') {
                table.push_str(line);
                table.push('\n');
                continue;
            }
            if !table.is_empty() {
                blocks.push(Block::Table(std::mem::take(&mut table)));
            }
            if line.starts_with('#') {
                blocks.push(Block::Header(line));
            } else {
                blocks.push(Block::Line(line));
            }
        }
        if !table.is_empty() {
            blocks.push(Block::Table(table));
        }
        blocks
    }
}
