use log::LevelFilter;
use simplelog::{ColorChoice, Config, TerminalMode, TermLogger};
use structopt::StructOpt;

use camfilter::quality::QualityFromCameraCommand;
use camfilter::set_shot::{SetMeshShotCommand, SetRasterShotCommand};

#[derive(StructOpt)]
#[structopt(about = "Mesh camera filters")]
struct Opts {
    #[structopt(help = "Enable debug logging", long, short = "v")]
    verbose: bool,

    #[structopt(subcommand)]
    command: Command,
}

#[derive(StructOpt)]
enum Command {
    SetMeshShot(SetMeshShotCommand),
    SetRasterShot(SetRasterShotCommand),
    QualityFromCamera(QualityFromCameraCommand),
}

fn main() {
    let opts = Opts::from_args();

    let level = if opts.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    if let Err(err) = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("warning: failed to initialize logger: {}", err);
    }

    let res = match opts.command {
        Command::SetMeshShot(command) => command.run(),
        Command::SetRasterShot(command) => command.run(),
        Command::QualityFromCamera(command) => command.run(),
    };

    if let Err(err) = res {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}
