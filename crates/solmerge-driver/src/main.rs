use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};
use clap::{ArgAction, Parser, Subcommand};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use solmerge_ast::ImportMode;
use solmerge_driver::{logging, strip_statements, ExcludeDeclarations, MergeEngine, MergeError, MergeOptions};
use solmerge_parser::ParseError;

#[derive(Parser)]
#[command(
    name = "solmerge",
    version = "0.1.0",
    about = "Flatten modular Solidity sources into a single file",
    long_about = "Follows the import graph of each input and writes one self-contained\nsource file per input, dependencies first."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge each input with everything it imports
    Merge {
        /// Root source files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory (default: next to each input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Suffix appended to the output file stem
        #[arg(long, default_value = "_merged")]
        append: String,

        /// Print merged sources instead of writing files
        #[arg(long)]
        stdout: bool,

        /// Separator between blocks (accepts \n, \t and \\ escapes)
        #[arg(long)]
        delimiter: Option<String>,

        /// Separator after comment blocks (accepts \n, \t and \\ escapes)
        #[arg(long)]
        comment_delimiter: Option<String>,

        /// Drop free comment blocks
        #[arg(long)]
        strip_comments: bool,

        /// Directory bare imports fall back to (default: nearest node_modules)
        #[arg(long)]
        dependency_root: Option<PathBuf>,

        /// Leave out declarations with this name
        #[arg(long = "exclude", value_name = "NAME")]
        exclude: Vec<String>,
    },

    /// Remove pragma directives and imports from a single file
    Strip {
        /// Input source file
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the pragmas, imports and exports of a file (debug)
    Inspect {
        /// Input source file
        input: PathBuf,
    },
}

struct MergeArgs {
    inputs: Vec<PathBuf>,
    output: Option<PathBuf>,
    append: String,
    stdout: bool,
    options: MergeOptions,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_with_level(logging::level_from_verbosity(cli.verbose));

    match cli.command {
        Commands::Merge {
            inputs,
            output,
            append,
            stdout,
            delimiter,
            comment_delimiter,
            strip_comments,
            dependency_root,
            exclude,
        } => {
            let mut options = MergeOptions {
                strip_comments,
                dependency_root,
                ..Default::default()
            };
            if let Some(delimiter) = delimiter {
                options.delimiter = unescape(&delimiter);
            }
            if let Some(comment_delimiter) = comment_delimiter {
                options.comment_delimiter = unescape(&comment_delimiter);
            }
            if !exclude.is_empty() {
                options.transforms.register(ExcludeDeclarations::new(exclude));
            }

            merge_command(MergeArgs {
                inputs,
                output,
                append,
                stdout,
                options,
            })
        }
        Commands::Strip { input, output } => strip_command(input, output),
        Commands::Inspect { input } => inspect_command(input),
    }
}

fn merge_command(args: MergeArgs) -> ExitCode {
    if let Some(dir) = &args.output {
        if let Err(e) = fs::create_dir_all(dir) {
            eprintln!("Error creating output directory {}: {}", dir.display(), e);
            return ExitCode::FAILURE;
        }
    }

    let engine = MergeEngine::new(args.options);
    let mut failed = false;

    for (input, result) in engine.run_all(&args.inputs) {
        let merged = match result {
            Ok(merged) => merged,
            Err(err) => {
                report_merge_error(&err);
                failed = true;
                continue;
            }
        };

        if args.stdout {
            println!("{}", merged);
            continue;
        }

        let path = output_path(&input, args.output.as_deref(), &args.append);
        match fs::write(&path, format!("{}\n", merged)) {
            Ok(()) => {
                info!("wrote {}", path.display());
                println!("Merged {} -> {}", input.display(), path.display());
            }
            Err(e) => {
                eprintln!("Error writing {}: {}", path.display(), e);
                failed = true;
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn strip_command(input: PathBuf, output: Option<PathBuf>) -> ExitCode {
    let source = match fs::read_to_string(&input) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading file: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let stripped = match strip_statements(&source) {
        Ok(stripped) => stripped,
        Err(err) => {
            report_parse_error(&err, &input, &source);
            return ExitCode::FAILURE;
        }
    };

    match output {
        Some(path) => match fs::write(&path, stripped) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Error writing {}: {}", path.display(), e);
                ExitCode::FAILURE
            }
        },
        None => {
            print!("{}", stripped);
            ExitCode::SUCCESS
        }
    }
}

fn inspect_command(input: PathBuf) -> ExitCode {
    let source = match fs::read_to_string(&input) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading file: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let statements = match solmerge_parser::extract(&source) {
        Ok(statements) => statements,
        Err(err) => {
            report_parse_error(&err, &input, &source);
            return ExitCode::FAILURE;
        }
    };

    println!("Statements of {}:\n", input.display());
    println!("{}", "=".repeat(80));

    println!("\nPragmas ({}):", statements.pragmas.len());
    for pragma in &statements.pragmas {
        println!("  {:10} | {:?} | {}", format!("{:?}", pragma.kind), pragma.text, pragma.span);
    }

    println!("\nImports ({}):", statements.imports.len());
    for edge in &statements.imports {
        let mode = match &edge.mode {
            ImportMode::Wildcard => "*".to_string(),
            ImportMode::GlobalRename(alias) => format!("as {}", alias),
            ImportMode::Named(names) => names
                .iter()
                .map(|n| match &n.alias {
                    Some(alias) => format!("{} as {}", n.name, alias),
                    None => n.name.clone(),
                })
                .collect::<Vec<_>>()
                .join(", "),
        };
        println!("  {:30} | {} | {}", edge.target, mode, edge.span);
    }

    println!("\nExports ({}):", statements.exports.len());
    for item in &statements.exports {
        let kind = match item.declaration_kind() {
            Some(kind) => kind.to_string(),
            None => "comment".to_string(),
        };
        println!("  {:24} | {:30} | {}", kind, item.identity(), item.span);
    }

    println!("\n{}", "=".repeat(80));
    ExitCode::SUCCESS
}

/// `<stem><append>.<ext>`, in `dir` or next to the input
fn output_path(input: &Path, dir: Option<&Path>, append: &str) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    let mut name = format!("{}{}", stem, append);
    if let Some(ext) = input.extension() {
        name.push('.');
        name.push_str(&ext.to_string_lossy());
    }

    match dir {
        Some(dir) => dir.join(name),
        None => input.with_file_name(name),
    }
}

/// Expands `\n`, `\t` and `\\`; other backslashes are kept.
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}

fn report_merge_error(err: &MergeError) {
    let Some(span) = err.span() else {
        eprintln!("error[{}]: {}", err.code(), err);
        return;
    };

    match fs::read_to_string(err.file()) {
        Ok(source) => {
            let filename = err.file().to_string_lossy();
            report_error(err.code(), &err.to_string(), &err.label(), span.start, span.end, &filename, &source);
        }
        Err(_) => eprintln!("error[{}]: {}", err.code(), err),
    }
}

fn report_parse_error(err: &ParseError, input: &Path, source: &str) {
    let filename = input.to_string_lossy();
    report_error(
        "E0200",
        "Extraction error",
        &err.message,
        err.span.start,
        err.span.end,
        &filename,
        source,
    );
}

fn report_error(code: &str, title: &str, message: &str, start: usize, end: usize, filename: &str, source: &str) {
    let span = (filename, start..end);
    let printed = Report::build(ReportKind::Error, span.clone())
        .with_config(Config::default().with_index_type(IndexType::Byte))
        .with_code(code)
        .with_message(title)
        .with_label(
            Label::new(span)
                .with_message(message)
                .with_color(Color::Red),
        )
        .finish()
        .eprint((filename, Source::from(source)));

    if printed.is_err() {
        eprintln!("error[{}]: {}: {}", code, title, message);
    }
}
