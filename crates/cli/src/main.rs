mod cmd;
mod output;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cmd::{BuildArgs, cmd_build};
use output::print_error;

/// fwbuild - configure and build the flight software for a target platform
#[derive(Parser, Debug)]
#[command(name = "fwbuild", about, long_about = None, disable_version_flag = true)]
struct Cli {
  /// Enable verbose logging
  #[arg(short, long)]
  verbose: bool,

  #[command(flatten)]
  build: BuildArgs,
}

fn main() -> ExitCode {
  let cli = match Cli::try_parse() {
    Ok(cli) => cli,
    Err(err) => {
      // Usage errors exit 1 like every other failure; --help exits 0.
      let code = if err.use_stderr() { ExitCode::FAILURE } else { ExitCode::SUCCESS };
      let _ = err.print();
      return code;
    }
  };

  init_logging(cli.verbose);

  match cmd_build(&cli.build) {
    Ok(code) => code,
    Err(err) => {
      print_error(&format!("{:#}", err));
      ExitCode::FAILURE
    }
  }
}

fn init_logging(verbose: bool) {
  let filter = if verbose {
    EnvFilter::new("debug")
  } else {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
  };

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();
}
