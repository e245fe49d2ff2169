use clap::Parser;
use miette::Result;
use sqc::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Install miette's fancy error handler for beautiful diagnostics
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Plan(args) => sqc::cli::commands::plan::run(args),
        Commands::Oc(args) => sqc::cli::commands::oc::run(args),
        Commands::Alternatives(args) => sqc::cli::commands::alternatives::run(args),
        Commands::Simulate(args) => sqc::cli::commands::simulate::run(args),
    }
}
