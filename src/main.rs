use clap::Parser;
use miette::Result;
use sbom::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    // Install miette's fancy error handler for readable diagnostics
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
    let global = cli.global;

    sbom::cli::logging::init_logging(global.verbose);

    match cli.command {
        Commands::Generate(args) => sbom::cli::commands::generate::run(args, &global),
        Commands::Preview(args) => sbom::cli::commands::preview::run(args, &global),
        Commands::Template(args) => sbom::cli::commands::template::run(args),
        Commands::Config(cmd) => sbom::cli::commands::config::run(cmd),
        Commands::Completions(args) => sbom::cli::commands::completions::run(args),
    }
}
