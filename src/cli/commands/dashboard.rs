use crate::cli::commands::CommandDefinition;
use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::output;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "show",
            "Render the dashboard for the current range and selection",
            "show",
            cmd_show,
        ),
        CommandDefinition::new(
            "refresh",
            "Fetch expenses, limits and display names again",
            "refresh",
            cmd_refresh,
        ),
    ]
}

fn cmd_show(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if !context.controller.is_loaded() {
        output::warning("No data loaded yet. Showing an empty dashboard.");
    }
    output::raw(&context.render_dashboard());
    Ok(())
}

fn cmd_refresh(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.load_labels();
    context.refresh_and_report()
}
