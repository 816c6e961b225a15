//! Core CLI loop, dispatch, and shell context helpers.

use std::{io, sync::Arc};

use dialoguer::{theme::ColorfulTheme, Confirm};
use spendboard_core::RankingSizes;
use strsim::levenshtein;
use thiserror::Error;
use tokio::runtime::{Builder, Runtime};
use tracing::info;

use crate::client::HttpRecordStore;
use crate::config::{self, Config, ConfigManager};
use crate::dashboard::{DashboardController, LoadOutcome};
use crate::errors::DashboardError;
pub use crate::errors::CliError;

use super::commands::{self, CommandDefinition, CommandRegistry};
use super::formatters::CliFormatters;
use super::output::{self, OutputPreferences};
use super::render::{render_view, RenderContext};
use super::system_clock::SystemClock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Dashboard(#[from] DashboardError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<config::ConfigError> for CommandError {
    fn from(err: config::ConfigError) -> Self {
        CommandError::Dashboard(err.into())
    }
}

pub type CommandResult = Result<(), CommandError>;

/// Candidate within edit distance 2 of `input`, nearest first.
pub(crate) fn closest_match<'a>(
    input: &str,
    candidates: impl IntoIterator<Item = &'a str>,
) -> Option<&'a str> {
    candidates
        .into_iter()
        .map(|candidate| (levenshtein(candidate, input), candidate))
        .filter(|(distance, _)| *distance <= 2)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, candidate)| candidate)
}

pub type DashboardStore = HttpRecordStore;

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub theme: ColorfulTheme,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub formatters: CliFormatters,
    pub controller: DashboardController<DashboardStore>,
    runtime: Runtime,
}

fn sizes_from(config: &Config) -> RankingSizes {
    RankingSizes {
        categories: config.top_categories,
        payment_methods: config.top_payment_methods,
        items: config.top_items,
    }
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = config::default_manager()?;
        let config = config::load_effective(&config_manager)?;
        output::set_preferences(OutputPreferences::detect(config.ui_color_enabled));

        let runtime = Builder::new_current_thread().enable_all().build()?;
        let store = Arc::new(HttpRecordStore::from_config(&config)?);
        let controller = DashboardController::mount(store, &SystemClock, sizes_from(&config));
        info!(api = %config.api_base_url, ?mode, "shell started");

        let mut context = ShellContext {
            mode,
            registry: CommandRegistry::new(commands::all_definitions()),
            theme: ColorfulTheme::default(),
            formatters: CliFormatters::new(config.currency.clone()),
            config_manager,
            config,
            controller,
            runtime,
        };
        context.initial_load();
        Ok(context)
    }

    /// First fetch on startup; failures leave an empty dashboard.
    fn initial_load(&mut self) {
        self.load_labels();
        if let Err(err) = self.refresh() {
            self.print_warning(&format!("Could not load dashboard data: {err}"));
        }
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandDefinition> {
        self.registry.get(name)
    }

    pub(crate) fn prompt(&self) -> String {
        format!("spendboard [{}]> ", self.controller.range())
    }

    pub(crate) fn can_prompt(&self) -> bool {
        self.mode == CliMode::Interactive
    }

    /// Runs one fetch cycle on the shell runtime.
    pub(crate) fn refresh(&mut self) -> Result<LoadOutcome, CommandError> {
        let outcome = self.runtime.block_on(self.controller.refresh())?;
        Ok(outcome)
    }

    pub(crate) fn load_labels(&mut self) {
        self.runtime.block_on(self.controller.load_labels());
    }

    /// Re-fetches when `due`, reporting the outcome.
    pub(crate) fn refresh_if_due(&mut self, due: bool) -> CommandResult {
        if !due {
            output::info(format!("Range is now {}.", self.controller.range()));
            return Ok(());
        }
        self.refresh_and_report()
    }

    pub(crate) fn refresh_and_report(&mut self) -> CommandResult {
        match self.refresh()? {
            LoadOutcome::Applied {
                expenses, limits, ..
            } => {
                output::success(format!(
                    "Loaded {expenses} expenses and {limits} limits for {}.",
                    self.controller.range()
                ));
            }
            LoadOutcome::Superseded { .. } => {
                output::info("A newer request replaced this one.");
            }
        }
        Ok(())
    }

    pub(crate) fn render_dashboard(&self) -> String {
        let ctx = RenderContext {
            range: self.controller.range(),
            labels: self.controller.labels(),
            formatters: &self.formatters,
            selected: self.controller.selection().len(),
            plain: output::preferences().plain_mode,
        };
        render_view(&self.controller.view(), &ctx)
    }

    pub(crate) fn persist_config(&self) -> CommandResult {
        self.config_manager.save(&self.config)?;
        Ok(())
    }

    /// Pushes display-related settings into the live session.
    pub(crate) fn apply_config(&mut self) {
        self.formatters = CliFormatters::new(self.config.currency.clone());
        self.controller.set_sizes(sizes_from(&self.config));
        output::set_preferences(OutputPreferences::detect(self.config.ui_color_enabled));
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.get(command).map(|entry| entry.handler) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{input}`. Type `help` to see available commands."
        ));

        if let Some(name) = closest_match(&input.to_lowercase(), self.registry.names()) {
            output::info(format!("Suggestion: `{name}`?"));
        }
    }

    /// Turns an unknown-category rejection into a usage error naming the
    /// nearest loaded category.
    pub(crate) fn category_error(&self, err: DashboardError) -> CommandError {
        match err {
            DashboardError::UnknownCategory(key) => {
                let universe = self.controller.universe();
                let mut message = format!("unknown category `{key}`");
                if let Some(near) = closest_match(&key, universe.iter().map(String::as_str)) {
                    message.push_str(&format!(" (did you mean `{near}`?)"));
                }
                CommandError::InvalidArguments(message)
            }
            other => other.into(),
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Confirm::with_theme(&self.theme)
            .with_prompt("Exit shell?")
            .default(true)
            .interact()
            .map_err(|err| CliError::Command(err.to_string()))
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                self.print_error(&message);
                output::info("Use `help <command>` for usage details.");
                Ok(())
            }
            other => {
                self.print_error(&other.to_string());
                Ok(())
            }
        }
    }

    pub(crate) fn print_error(&self, message: &str) {
        output::error(message);
    }

    pub(crate) fn print_warning(&self, message: &str) {
        output::warning(message);
    }
}

#[cfg(test)]
mod tests {
    use super::closest_match;

    #[test]
    fn closest_match_prefers_the_nearest_candidate_within_two_edits() {
        let keys = ["food", "transport", "health"];
        assert_eq!(closest_match("fod", keys), Some("food"));
        assert_eq!(closest_match("transprot", keys), Some("transport"));
        assert_eq!(closest_match("groceries", keys), None);
    }
}
