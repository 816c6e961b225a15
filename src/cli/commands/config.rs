use crate::cli::commands::CommandDefinition;
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::config::Config;

const USAGE: &str = "config [show|set <key> <value>|backup [note]|backups|restore <name>]";

pub(crate) const CONFIG_ACTIONS: &[&str] = &["show", "set", "backup", "backups", "restore"];

pub(crate) const CONFIG_KEYS: &[&str] = &[
    "api_base_url",
    "currency",
    "locale",
    "page_size",
    "top_categories",
    "top_payment_methods",
    "top_items",
    "request_timeout_secs",
    "ui_color_enabled",
];

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "config",
        "View and manage dashboard preferences",
        USAGE,
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() || args[0].eq_ignore_ascii_case("show") {
        show_config(context);
        return Ok(());
    }

    match args[0].to_lowercase().as_str() {
        "set" => {
            if args.len() < 3 {
                return Err(CommandError::InvalidArguments(
                    "usage: config set <key> <value>".into(),
                ));
            }
            let value = args[2..].join(" ");
            let mut updated = context.config.clone();
            set_value(&mut updated, args[1], value.trim())?;
            updated.validate()?;
            context.config = updated;
            context.persist_config()?;
            context.apply_config();
            output::success(format!("{} updated.", args[1]));
            if matches!(
                args[1],
                "api_base_url" | "page_size" | "request_timeout_secs"
            ) {
                output::info("Connection settings apply the next time the shell starts.");
            }
            Ok(())
        }
        "backup" => {
            let note = (args.len() > 1).then(|| args[1..].join(" "));
            let name = context
                .config_manager
                .backup(&context.config, note.as_deref())?;
            output::success(format!("Configuration backed up as {name}."));
            Ok(())
        }
        "backups" => {
            let backups = context.config_manager.list_backups()?;
            if backups.is_empty() {
                output::info("No configuration backups found.");
            }
            for name in backups {
                output::info(format!("  {name}"));
            }
            Ok(())
        }
        "restore" => {
            let name = args.get(1).ok_or_else(|| {
                CommandError::InvalidArguments("usage: config restore <name>".into())
            })?;
            let restored = context.config_manager.restore(name)?;
            context.config = restored;
            context.persist_config()?;
            context.apply_config();
            output::success(format!("Configuration restored from {name}."));
            Ok(())
        }
        _ => Err(CommandError::InvalidArguments(format!("usage: {USAGE}"))),
    }
}

fn show_config(context: &ShellContext) {
    let config = &context.config;
    output::section("Configuration");
    output::info(format!("  api_base_url         : {}", config.api_base_url));
    output::info(format!("  currency             : {}", config.currency));
    output::info(format!("  locale               : {}", config.locale));
    output::info(format!("  page_size            : {}", config.page_size));
    output::info(format!("  top_categories       : {}", config.top_categories));
    output::info(format!("  top_payment_methods  : {}", config.top_payment_methods));
    output::info(format!("  top_items            : {}", config.top_items));
    output::info(format!("  request_timeout_secs : {}", config.request_timeout_secs));
    output::info(format!("  ui_color_enabled     : {}", config.ui_color_enabled));
    output::info(format!(
        "  file                 : {}",
        context.config_manager.config_path().display()
    ));
}

fn parse<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, CommandError> {
    value
        .parse()
        .map_err(|_| CommandError::InvalidArguments(format!("invalid value for {key}: `{value}`")))
}

pub(crate) fn set_value(config: &mut Config, key: &str, value: &str) -> CommandResult {
    match key {
        "api_base_url" => config.api_base_url = value.to_string(),
        "currency" => config.currency = value.to_uppercase(),
        "locale" => config.locale = value.to_string(),
        "page_size" => config.page_size = parse(key, value)?,
        "top_categories" => config.top_categories = parse(key, value)?,
        "top_payment_methods" => config.top_payment_methods = parse(key, value)?,
        "top_items" => config.top_items = parse(key, value)?,
        "request_timeout_secs" => config.request_timeout_secs = parse(key, value)?,
        "ui_color_enabled" => {
            config.ui_color_enabled = matches!(value.to_lowercase().as_str(), "on" | "true" | "yes")
        }
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown config key `{other}`"
            )))
        }
    }
    Ok(())
}
