//! `levelscript` command-line entry point

fn main() -> anyhow::Result<()> {
    levelscript::cli::run_cli()
}
