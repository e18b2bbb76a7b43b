use clap::{Parser, Subcommand};

use commands::GlobalArgs;

mod commands;
mod output;
mod tty;

use commands::{project, story};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "storygen")]
#[command(version = VERSION)]
#[command(about = "Generate Storybook stories for Angular components")]
struct Cli {
    /// Workspace file describing the projects (default: ./angular.json)
    #[arg(long, global = true, value_name = "FILE")]
    workspace: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the story for a component
    #[command(visible_alias = "s")]
    Story(story::StoryArgs),
    /// Inspect workspace projects
    #[command(visible_alias = "projects")]
    Project(project::ProjectArgs),
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let global = GlobalArgs {
        workspace: cli.workspace,
    };

    let (json_result, exit_code) = commands::run_json(cli.command, &global);
    if let Err(err) = output::print_json_result(json_result) {
        eprintln!("{}", err);
        return std::process::ExitCode::from(1);
    }

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
