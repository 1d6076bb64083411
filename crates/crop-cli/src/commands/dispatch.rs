use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub fn dispatch(command: &Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Predict(args) => commands::predict::handle(args, ctx, flags),
        Commands::Options(args) => commands::options::handle(args, ctx, flags),
        Commands::Schema => commands::schema::handle(ctx, flags),
    }
}
