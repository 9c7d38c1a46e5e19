use dialoguer::{theme::ColorfulTheme, Confirm};
use strsim::levenshtein;
use uuid::Uuid;

use crate::{
    cli::{
        commands,
        core::{CliError, CliMode, CommandError, LoopControl},
        output,
        registry::CommandRegistry,
    },
    config::{Config, ConfigManager},
    core::LedgerManager,
    errors::LedgerError,
    ledger::BudgetWarning,
};

const SUGGESTION_DISTANCE: usize = 2;

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub manager: LedgerManager,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub theme: ColorfulTheme,
    /// Transaction ids in the order last printed by `list`/`search`.
    pub view: Option<Vec<Uuid>>,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::new()?;
        let config = config_manager.load()?;
        let manager = LedgerManager::open(&config, config_manager.base_dir())?;
        Ok(Self::with_parts(mode, manager, config_manager, config))
    }

    pub fn with_parts(
        mode: CliMode,
        manager: LedgerManager,
        config_manager: ConfigManager,
        config: Config,
    ) -> Self {
        output::set_color_enabled(config.color);
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);
        Self {
            mode,
            registry,
            manager,
            config_manager,
            config,
            theme: ColorfulTheme::default(),
            view: None,
            last_command: None,
            running: true,
        }
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub fn prompt(&self) -> String {
        format!("ledger [{}]> ", self.manager.transactions().len())
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let handler = self
            .registry
            .handler(command)
            .ok_or_else(|| CommandError::UnknownCommand(command.to_string()))?;
        handler(self, args)?;
        Ok(if self.running {
            LoopControl::Continue
        } else {
            LoopControl::Exit
        })
    }

    pub fn money(&self, amount: f64) -> String {
        output::format_money(&self.config.currency_symbol, amount)
    }

    pub fn report_warning(&self, warning: &BudgetWarning) {
        output::warning(format!(
            "Warning: {} spending {} exceeds limit {}!",
            warning.category,
            self.money(warning.spent),
            self.money(warning.limit)
        ));
    }

    /// Maps a 1-based position in the current view to a transaction id.
    ///
    /// Without a prior listing the view is the full ledger in canonical order.
    pub fn resolve_position(&self, position: usize) -> Result<Uuid, LedgerError> {
        let ids: Vec<Uuid> = match &self.view {
            Some(ids) => ids.clone(),
            None => self.manager.transactions().iter().map(|txn| txn.id).collect(),
        };
        position
            .checked_sub(1)
            .and_then(|index| ids.get(index).copied())
            .ok_or(LedgerError::IndexOutOfRange {
                index: position,
                len: ids.len(),
            })
    }

    pub fn forget_in_view(&mut self, id: Uuid) {
        if let Some(ids) = self.view.as_mut() {
            ids.retain(|candidate| *candidate != id);
        }
    }

    pub(crate) fn confirm(&self, prompt: &str) -> Result<bool, CommandError> {
        Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(CommandError::from)
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(self.confirm("Exit shell?")?)
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::UnknownCommand(input) => {
                output::error(format!("Unknown command `{input}`. Type `help` for a list."));
                self.suggest(&input);
            }
            other => output::error(other),
        }
    }

    pub(crate) fn suggest(&self, input: &str) {
        let best = self
            .registry
            .names()
            .map(|name| (levenshtein(name, input), name))
            .min_by_key(|(distance, _)| *distance);
        if let Some((distance, name)) = best {
            if distance <= SUGGESTION_DISTANCE {
                output::info(format!("Did you mean `{name}`?"));
            }
        }
    }
}
