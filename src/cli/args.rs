use clap::Parser;
use std::path::PathBuf;

/// dvc: compile the directive headers of markup files.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "dvc",
    version,
    about = "Resolve @baseType, @property, @import and @viewModel directives of markup files"
)]
pub struct CliArgs {
    /// Markup files or directories to compile. Directories are searched for
    /// `.dothtml`, `.dotcontrol` and `.dotmaster` files.
    #[arg(value_name = "PATHS", required = true)]
    pub paths: Vec<PathBuf>,

    /// Configuration file; defaults to `dvc.json` in the working directory
    /// when present.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Build design-time trees: lenient generics, no initializer evaluation.
    #[arg(long = "design-time", alias = "designTime")]
    pub design_time: bool,

    /// Additional global import (`Namespace` or `Alias=Namespace`).
    #[arg(short = 'i', long = "import", value_name = "IMPORT")]
    pub imports: Vec<String>,

    /// Print diagnostics as JSON.
    #[arg(long)]
    pub json: bool,

    /// Disable colored output.
    #[arg(long = "no-color", alias = "noColor")]
    pub no_color: bool,

    /// Also print the wrapper type, view model and properties of each file.
    #[arg(short, long)]
    pub verbose: bool,
}
