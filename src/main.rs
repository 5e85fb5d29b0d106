use anyhow::{anyhow, Context, Result};
use blogindex::build::{build_contents, build_redirects};
use blogindex::config::Config;
use blogindex::logging::Logging;
use clap::{crate_version, App, AppSettings, Arg, SubCommand};
use std::path::PathBuf;

fn main() -> Result<()> {
    let matches = App::new("blogindex")
        .version(crate_version!())
        .about("Generates legacy-URL redirects and table-of-contents pages for a blog")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("project")
                .short("C")
                .long("project")
                .value_name("DIR")
                .takes_value(true)
                .help("The project directory (defaults to the current directory)"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .multiple(true)
                .help("Logs more detail (repeat for even more)"),
        )
        .arg(
            Arg::with_name("quiet")
                .short("q")
                .long("quiet")
                .conflicts_with("verbose")
                .help("Only logs warnings and errors"),
        )
        .arg(
            Arg::with_name("log-file")
                .long("log-file")
                .value_name("PATH")
                .takes_value(true)
                .help("Also writes debug logs to PATH"),
        )
        .subcommand(
            SubCommand::with_name("redirects")
                .about("Writes redirect pages at each post's legacy location"),
        )
        .subcommand(
            SubCommand::with_name("toc")
                .about("Writes table-of-contents documents grouped by year and tag"),
        )
        .subcommand(SubCommand::with_name("all").about("Runs `redirects` and then `toc`"))
        .get_matches();

    let logging = Logging::from_verbosity(
        matches.occurrences_of("verbose"),
        matches.is_present("quiet"),
        matches.value_of_os("log-file").map(PathBuf::from),
    );
    let _guard = logging.install().context("Initializing logging")?;

    // Absolute so that the project file search can reach every ancestor.
    let current_dir = std::env::current_dir().context("Getting the current directory")?;
    let project_directory = match matches.value_of_os("project") {
        Some(dir) => current_dir.join(dir),
        None => current_dir,
    };
    let config = Config::from_directory(&project_directory)?;
    tracing::debug!(?config, "loaded configuration");

    match matches.subcommand_name() {
        Some("redirects") => {
            build_redirects(&config).context("Generating redirects")?;
        }
        Some("toc") => {
            build_contents(&config).context("Generating table of contents")?;
        }
        Some("all") => {
            build_redirects(&config).context("Generating redirects")?;
            build_contents(&config).context("Generating table of contents")?;
        }
        other => return Err(anyhow!("unknown subcommand: {:?}", other)),
    }
    Ok(())
}
