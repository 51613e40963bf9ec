use std::io;

use clap::{crate_authors, crate_description, crate_version, CommandFactory, Parser};
use clap_complete::generate;
use eyre::Result;
use tracing::{info, trace};

use pathctl::{
    list_info, mission_stats, replay_mission, sample_mission, Opts, PathctlConfig, SubCommand,
};
use waypath_common::init_logging;

/// Binary name, using a different binary name
pub const NAME: &str = env!("CARGO_BIN_NAME");
/// Binary version
pub const VERSION: &str = crate_version!();
/// Authors
pub const AUTHORS: &str = crate_authors!();

fn main() -> Result<()> {
    let opts = Opts::parse();

    // Initialise logging early
    //
    init_logging(NAME, opts.debug, opts.tree, opts.log_dir.clone())?;

    let cfg = PathctlConfig::load(opts.config.as_deref())?;

    // Banner
    //
    banner()?;

    let subcmd = &opts.subcmd;
    handle_subcmd(&cfg, subcmd)
}

pub fn handle_subcmd(cfg: &PathctlConfig, subcmd: &SubCommand) -> Result<()> {
    match subcmd {
        // Handle `stats file`
        //
        SubCommand::Stats(sopts) => {
            trace!("stats");

            let str = mission_stats(cfg, sopts)?;
            println!("{}", str);
        }

        // Handle `sample -p progress file`
        //
        SubCommand::Sample(sopts) => {
            trace!("sample");

            let str = sample_mission(sopts)?;
            println!("{}", str);
        }

        // Handle `replay file`
        //
        SubCommand::Replay(ropts) => {
            trace!("replay");

            let n = replay_mission(cfg, ropts)?;
            info!("{n} frames written");
        }

        // Standalone completion generation
        //
        // NOTE: you can generate UNIX shells completion on Windows and vice-versa.  Not worth
        //       trying to limit depending on the OS.
        //
        SubCommand::Completion(copts) => {
            let generator = copts.shell;
            generate(generator, &mut Opts::command(), NAME, &mut io::stdout());
        }

        // Standalone `list` command
        //
        SubCommand::List(lopts) => {
            info!("Listing {:?}", lopts.cmd);

            println!("{}", list_info(&lopts.cmd));
        }

        // Standalone `version` command
        //
        SubCommand::Version => {
            eprintln!("{}", version());
            eprintln!("Modules: ");
            eprintln!("\t{}", waypath_common::version());
            eprintln!("\t{}", waypath_engine::version());
            eprintln!("\t{}", waypath_formats::version());
        }
    }
    Ok(())
}

/// Return our version number
///
#[inline]
pub fn version() -> String {
    format!("{}/{}", NAME, VERSION)
}

/// Display banner
///
fn banner() -> Result<()> {
    Ok(eprintln!(
        r##"
{}/{} by {}
{}
"##,
        NAME,
        VERSION,
        AUTHORS,
        crate_description!()
    ))
}
