use blazon::cli::{Cli, Commands};
use clap::Parser;
use miette::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(args) => blazon::cli::generate::run(args)?,
        Commands::Mirror(args) => blazon::cli::mirror::run(args)?,
        Commands::List(args) => blazon::cli::list::run(args)?,
        Commands::Crop(args) => blazon::cli::crop::run(args)?,
    }

    Ok(())
}
