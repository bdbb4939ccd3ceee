use std::{
    fs::read_to_string,
    io::{self, Write},
    path::PathBuf,
    process,
};

use clap::Parser as ClapParser;
use log::{info, LevelFilter};

use cosmo::{
    format_error,
    interpreter::{
        interpreter::{Interpreter, DEFAULT_MAX_LOOP_ITERATIONS},
        scope::Frame,
    },
    lexer::lexer::{tokenize, tokens_from_tags},
    parser::{
        parser::{parse, Verdict},
        trace::TraceRecord,
    },
};

/// Shift-reduce parser and interpreter for the Cosmo language.
#[derive(ClapParser)]
#[command(name = "cosmo", version, about = "Shift-reduce parser and interpreter for Cosmo")]
struct Cli {
    /// Path to the program
    file: PathBuf,

    /// Read the file as classified token tags instead of source text
    #[arg(long)]
    tags: bool,

    /// Print every shift and reduction (with -vv, also the production that fired)
    #[arg(long)]
    trace: bool,

    /// Print the parse tree
    #[arg(long)]
    tree: bool,

    /// Print every scope frame once the program finishes
    #[arg(long)]
    scopes: bool,

    /// Iterations a single loop may run before it is aborted
    #[arg(long, default_value_t = DEFAULT_MAX_LOOP_ITERATIONS)]
    max_iterations: usize,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new().filter_level(level).parse_default_env().init();

    let file_name = cli
        .file
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| cli.file.display().to_string());

    let contents = match read_to_string(&cli.file) {
        Ok(contents) => contents,
        Err(e) => {
            eprintln!("Failed to read {}: {}", cli.file.display(), e);
            process::exit(1);
        }
    };

    let tokens = if cli.tags {
        tokens_from_tags(contents.clone(), Some(file_name))
    } else {
        tokenize(contents.clone(), Some(file_name))
    };

    let tokens = match tokens {
        Ok(tokens) => tokens,
        Err(error) => {
            eprint!("{}", format_error(&error, &contents));
            process::exit(1);
        }
    };
    info!("tokenized {} token(s)", tokens.len());

    let (parser, verdict) = parse(tokens);

    if cli.trace {
        for record in parser.trace() {
            match record {
                TraceRecord::Reduce { production, .. } if cli.verbose >= 2 => {
                    eprintln!("{} [{}]", record, production)
                }
                _ => eprintln!("{}", record),
            }
        }
    }

    eprintln!("{}", verdict);

    if verdict == Verdict::Reject {
        if cli.tree {
            eprintln!("Parse tree cannot be generated for the given input");
        }
        process::exit(1);
    }

    if cli.tree {
        eprint!("{}", parser.tree().render());
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut interpreter =
        Interpreter::new(stdin.lock(), stdout.lock()).with_max_loop_iterations(cli.max_iterations);

    let result = interpreter.interpret(parser.tree());
    let history = interpreter.scope_history().to_vec();
    if let Err(e) = interpreter.into_output().flush() {
        eprintln!("Failed to flush output: {}", e);
    }

    if cli.scopes {
        print_scopes(&history);
    }

    if let Err(error) = result {
        eprint!("{}", format_error(&error, &contents));
        process::exit(1);
    }
}

fn print_scopes(frames: &[Frame]) {
    for (i, frame) in frames.iter().enumerate() {
        eprintln!("Scope {}:", i + 1);
        for (name, value) in frame {
            eprintln!("{} : {}", name, value);
        }
    }
}
