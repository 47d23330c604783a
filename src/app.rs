use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use log::warn;

use crate::config::Config;
use crate::data::export;
use crate::data::filter::{FilterCriteria, NumericRange};
use crate::data::loader::load_listings;
use crate::error::DataError;
use crate::state::AppState;
use crate::ui::report;

const MENU_PROMPT: &str = "< Enter command (filter, stats, hostRank, describe, export, exit): ";

/// One menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Filter,
    Stats,
    HostRank,
    Describe,
    Export,
    Exit,
}

impl Command {
    fn parse(input: &str) -> Option<Command> {
        match input {
            "filter" => Some(Command::Filter),
            "stats" => Some(Command::Stats),
            "hostRank" => Some(Command::HostRank),
            "describe" => Some(Command::Describe),
            "export" => Some(Command::Export),
            "exit" => Some(Command::Exit),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Interactive shell
// ---------------------------------------------------------------------------

/// Line-oriented shell over any input/output pair, so it runs the same on a
/// terminal and in tests.
pub struct ListingShell<R, W> {
    input: R,
    output: W,
    config: Config,
    pub state: AppState,
}

impl<R: BufRead, W: Write> ListingShell<R, W> {
    pub fn new(input: R, output: W, config: Config) -> Self {
        Self {
            input,
            output,
            config,
            state: AppState::default(),
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    // -- I/O helpers --

    /// Prompt and read one trimmed line; `None` at end of input.
    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn say(&mut self, message: impl AsRef<str>) -> Result<()> {
        writeln!(self.output, "> {}", message.as_ref())?;
        Ok(())
    }

    fn heading(&mut self, title: &str) -> Result<()> {
        writeln!(self.output, "\n[{title}]")?;
        Ok(())
    }

    // -- load --

    /// Load `path` into the shell.
    pub fn load(&mut self, path: &Path) -> std::result::Result<usize, DataError> {
        let store = load_listings(path)?;
        let count = store.len();
        self.state.set_store(store);
        Ok(count)
    }

    /// Load `path` and report the outcome on the shell output. A failure is
    /// not fatal; returns whether the store was replaced.
    pub fn load_reported(&mut self, path: &Path) -> Result<bool> {
        match self.load(path) {
            Ok(count) => {
                self.say(format!("Successfully loaded {count} listings."))?;
                Ok(true)
            }
            Err(e) => {
                warn!("load of {} failed: {e}", path.display());
                self.say(format!("Error loading {}.", path.display()))?;
                self.say(e.to_string())?;
                Ok(false)
            }
        }
    }

    /// Prompt for a file until one loads. Returns `false` if input ended first.
    pub fn load_interactive(&mut self) -> Result<bool> {
        self.heading("Load")?;
        loop {
            let prompt = format!(
                "< Enter listings filepath or leave blank to use default path ({}): ",
                self.config.data_path.display()
            );
            let Some(answer) = self.ask(&prompt)? else {
                return Ok(false);
            };
            let path = if answer.is_empty() {
                self.config.data_path.clone()
            } else {
                PathBuf::from(answer)
            };
            if self.load_reported(&path)? {
                return Ok(true);
            }
        }
    }

    // -- menu loop --

    /// Run the menu until `exit` or end of input.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.heading("Menu")?;
            let Some(answer) = self.ask(MENU_PROMPT)? else {
                return Ok(());
            };
            let Some(command) = Command::parse(&answer) else {
                if !answer.is_empty() {
                    self.say(format!("Unknown command '{answer}'."))?;
                }
                continue;
            };
            if command == Command::Exit {
                return Ok(());
            }
            if let Err(e) = self.dispatch(command) {
                match e.downcast::<DataError>() {
                    // Reported, the session goes on.
                    Ok(data_err) => self.say(data_err.to_string())?,
                    Err(io_err) => return Err(io_err),
                }
            }
        }
    }

    fn dispatch(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Filter => self.filter(),
            Command::Stats => self.stats(),
            Command::HostRank => self.host_rank(),
            Command::Describe => self.describe(),
            Command::Export => self.export(),
            Command::Exit => Ok(()),
        }
    }

    // -- commands --

    /// Ask for a `min,max` range. Blank or malformed input means no constraint.
    fn ask_range(&mut self, prompt: &str) -> Result<Option<NumericRange>> {
        let Some(answer) = self.ask(prompt)? else {
            return Ok(None);
        };
        if answer.is_empty() {
            return Ok(None);
        }
        match answer.parse::<NumericRange>() {
            Ok(range) => {
                if range.min > range.max {
                    self.say(format!("Note: {range} is empty, no listing will match."))?;
                }
                Ok(Some(range))
            }
            Err(e) => {
                warn!("ignoring range input '{answer}': {e:#}");
                self.say(format!("Ignored '{answer}': {e:#}"))?;
                Ok(None)
            }
        }
    }

    fn filter(&mut self) -> Result<()> {
        self.heading("Filter")?;
        let criteria = FilterCriteria {
            price: self.ask_range("< Enter price range as min,max or leave blank: ")?,
            rooms: self.ask_range("< Enter range of number of rooms as min,max or leave blank: ")?,
            review_score: self
                .ask_range("< Enter range of review score as min,max or leave blank: ")?,
        };
        if criteria.is_empty() {
            writeln!(self.output)?;
            self.say("No filters applied.")?;
            return Ok(());
        }
        let (before, after) = self.state.apply_filter(&criteria)?;
        self.say(format!("Filter applied ({criteria}): {after} of {before} listings kept."))?;
        Ok(())
    }

    fn stats(&mut self) -> Result<()> {
        self.heading("Stats")?;
        let summary = self.state.store.summary()?;
        for line in report::summary_lines(&summary) {
            self.say(line)?;
        }
        Ok(())
    }

    fn host_rank(&mut self) -> Result<()> {
        self.heading("HostRank")?;
        let ranking = self.state.store.rank_hosts()?;
        for line in report::host_rank_lines(&ranking, self.config.report.host_rank_preview) {
            self.say(line)?;
        }
        Ok(())
    }

    fn describe(&mut self) -> Result<()> {
        self.heading("Describe")?;
        let description = self.state.store.describe_with(self.config.stats.dispersion)?;
        for line in report::description_lines(&description) {
            self.say(line)?;
        }
        Ok(())
    }

    fn export(&mut self) -> Result<()> {
        self.heading("Export")?;
        let prompt = format!(
            "< Enter folder path for export or leave blank to use default path ({}): ",
            self.config.export_dir.display()
        );
        let dir = match self.ask(&prompt)? {
            Some(answer) if !answer.is_empty() => PathBuf::from(answer),
            _ => self.config.export_dir.clone(),
        };

        let store = &self.state.store;
        let ranking = store.rank_hosts()?;
        let description = store.describe_with(self.config.stats.dispersion)?;
        let written = export::save(&dir, store, &ranking, &description)?;
        for path in written {
            self.say(format!("Successfully exported to `{}`.", path.display()))?;
        }
        Ok(())
    }
}
