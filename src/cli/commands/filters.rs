use dialoguer::MultiSelect;
use spendboard_core::date_range::parse_boundary;
use spendboard_core::DateRange;

use crate::cli::commands::CommandDefinition;
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::table::{Table, TableColumn, TableRenderer};
use crate::errors::DashboardError;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "range",
            "Set both date boundaries and reload",
            "range <YYYY-MM-DD|-> <YYYY-MM-DD|->",
            cmd_range,
        ),
        CommandDefinition::new(
            "start",
            "Set the start date; reloads when both dates are set",
            "start [YYYY-MM-DD]",
            cmd_start,
        ),
        CommandDefinition::new(
            "end",
            "Set the end date; reloads when both dates are set",
            "end [YYYY-MM-DD]",
            cmd_end,
        ),
        CommandDefinition::new(
            "toggle",
            "Add or remove a category from the selection",
            "toggle <category>...",
            cmd_toggle,
        ),
        CommandDefinition::new("all", "Select every known category", "all", cmd_all),
        CommandDefinition::new("none", "Clear the category selection", "none", cmd_none),
        CommandDefinition::new(
            "select",
            "Choose categories (interactive picker without arguments)",
            "select [category...]",
            cmd_select,
        ),
        CommandDefinition::new(
            "categories",
            "List known categories and whether they are selected",
            "categories",
            cmd_categories,
        ),
    ]
}

/// `-` or an empty argument leaves the boundary unset.
fn boundary(raw: Option<&&str>) -> Result<Option<chrono::NaiveDate>, CommandError> {
    let raw = match raw {
        Some(value) if *value != "-" => *value,
        _ => "",
    };
    parse_boundary(raw).map_err(|err| CommandError::InvalidArguments(err.to_string()))
}

fn cmd_range(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() != 2 {
        return Err(CommandError::InvalidArguments(
            "usage: range <YYYY-MM-DD|-> <YYYY-MM-DD|->".into(),
        ));
    }
    let raw = |value: &str| if value == "-" { String::new() } else { value.to_string() };
    let range = DateRange::parse(&raw(args[0]), &raw(args[1])).map_err(DashboardError::from)?;
    let due = context.controller.set_range(range);
    context.refresh_if_due(due)
}

fn cmd_start(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let start = boundary(args.first())?;
    let due = context.controller.set_start(start);
    context.refresh_if_due(due)
}

fn cmd_end(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let end = boundary(args.first())?;
    let due = context.controller.set_end(end);
    context.refresh_if_due(due)
}

fn cmd_toggle(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        return Err(CommandError::InvalidArguments(
            "usage: toggle <category>...".into(),
        ));
    }
    for key in args {
        let selected = context
            .controller
            .toggle_category(key)
            .map_err(|err| context.category_error(err))?;
        let label = context.controller.labels().categories.resolve(key).to_string();
        if selected {
            output::info(format!("Selected {label}."));
        } else {
            output::info(format!("Deselected {label}."));
        }
    }
    Ok(())
}

fn cmd_all(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.controller.select_all_categories();
    output::info(format!(
        "{} categories selected.",
        context.controller.selection().len()
    ));
    Ok(())
}

fn cmd_none(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.controller.clear_selection();
    output::info("Selection cleared.");
    Ok(())
}

fn cmd_select(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if !args.is_empty() {
        context
            .controller
            .replace_selection(args.iter().copied())
            .map_err(|err| context.category_error(err))?;
        output::info(format!(
            "{} categories selected.",
            context.controller.selection().len()
        ));
        return Ok(());
    }
    if !context.can_prompt() {
        return Err(CommandError::InvalidArguments(
            "usage: select <category>...".into(),
        ));
    }

    let universe = context.controller.universe();
    if universe.is_empty() {
        output::info("No categories to select.");
        return Ok(());
    }
    let labels = &context.controller.labels().categories;
    let items: Vec<String> = universe
        .iter()
        .map(|key| labels.resolve(key).to_string())
        .collect();
    let defaults: Vec<bool> = universe
        .iter()
        .map(|key| context.controller.selection().contains(key))
        .collect();

    let picked = MultiSelect::with_theme(&context.theme)
        .with_prompt("Categories (space to toggle, enter to confirm)")
        .items(&items)
        .defaults(&defaults)
        .interact_opt()?;
    match picked {
        Some(indices) => {
            let keys: Vec<String> = indices
                .into_iter()
                .filter_map(|idx| universe.get(idx).cloned())
                .collect();
            context.controller.replace_selection(keys)?;
            output::info(format!(
                "{} categories selected.",
                context.controller.selection().len()
            ));
        }
        None => output::info("Operation cancelled."),
    }
    Ok(())
}

fn cmd_categories(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let universe = context.controller.universe();
    if universe.is_empty() {
        output::info("No categories loaded.");
        return Ok(());
    }
    let labels = &context.controller.labels().categories;
    let mut table = Table::new(
        Some("Categories"),
        vec![
            TableColumn::left("", 3),
            TableColumn::left("Key", 8),
            TableColumn::left("Name", 8),
        ],
    );
    for key in &universe {
        let marker = if context.controller.selection().contains(key) {
            "[x]"
        } else {
            "[ ]"
        };
        table.add_row(vec![
            marker.to_string(),
            key.clone(),
            labels.resolve(key).to_string(),
        ]);
    }
    output::raw(&TableRenderer::render(
        &table,
        output::preferences().plain_mode,
    ));
    Ok(())
}
