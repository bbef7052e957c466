use anyhow::Result;
use clap::Parser;
use yedit::Args;

fn main() -> Result<()> {
    let _guard = yedit_logging::init_subscriber();
    let args = Args::parse();
    yedit::execute(args)
}
