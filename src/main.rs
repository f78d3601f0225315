use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::Result;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::{fs::read_to_string, process::ExitCode};
use xlang::interpreter::context::StdioContext;
use xlang::interpreter::TreeWalkInterpreter;

const BANNER: &str = "X v0.1";
const PROMPT: &str = "-> ";

#[derive(Debug, Parser)]
#[clap(name = "xlang", version)]
pub struct CLArgs {
    #[clap(subcommand)]
    pub routine: Option<XlangCommand>,
}

#[derive(Debug, Subcommand)]
pub enum XlangCommand {
    /// Start an interactive session.
    Repl,
    Tokenize {
        path: PathBuf,
        #[clap(long = "format", value_enum, default_value = "basic")]
        format: TokenFormat,
    },
    Parse {
        path: PathBuf,
        #[clap(long = "format", value_enum, default_value = "sexpr")]
        format: ProgramFormat,
    },
    Run {
        path: PathBuf,
        #[clap(long = "format", value_enum, default_value = "basic")]
        format: ValueFormat,
    },
}

#[derive(Debug, Clone, ValueEnum)]
pub enum TokenFormat {
    Debug,
    Basic,
    Pretty,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ProgramFormat {
    Debug,
    #[clap(name = "sexpr")]
    SExpr,
    Source,
    Pretty,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ValueFormat {
    Basic,
    Pretty,
}

fn main() -> ExitCode {
    xlang_main().expect("Encountered an error!")
}

fn xlang_main() -> Result<ExitCode> {
    color_eyre::install().expect("Can't fail at first call!");
    let args = CLArgs::parse();
    let code = match args.routine.unwrap_or(XlangCommand::Repl) {
        XlangCommand::Repl => repl()?,
        XlangCommand::Tokenize { path, format } => {
            eprintln!("Tokenizing {:?}...", path);
            let src = read_to_string(&path)?;
            tokenize(&src, &path.to_string_lossy(), &format)
        }
        XlangCommand::Parse { path, format } => {
            eprintln!("Parsing {:?}...", path);
            let src = read_to_string(&path)?;
            parse(&src, &path.to_string_lossy(), &format)
        }
        XlangCommand::Run { path, format } => {
            eprintln!("Running {:?}...", path);
            let src = read_to_string(&path)?;
            run(&src, &path.to_string_lossy(), &format)
        }
    };
    Ok(code)
}

fn tokenize<'src>(src: &'src str, path: &'src str, format: &TokenFormat) -> ExitCode {
    use xlang::lexer::formatter::{
        BasicFormatter, DebugFormatter, PrettyFormatter, ToFormatter, TokenFormatter,
    };
    use xlang::lexer::Lexer;

    let mut lexer = Lexer::new(src);
    let formatter: Box<dyn TokenFormatter + 'src> = match format {
        TokenFormat::Debug => Box::new(ToFormatter::<DebugFormatter>::create_formatter(&lexer)),
        TokenFormat::Basic => Box::new(ToFormatter::<BasicFormatter>::create_formatter(&lexer)),
        TokenFormat::Pretty => Box::new(PrettyFormatter::new(src, path)),
    };
    let mut succeeded = true;
    loop {
        match lexer.next_token() {
            Ok(token) => {
                println!("{}", formatter.format(&token));
                if token.is_eof() {
                    break;
                }
            }
            Err(error) => {
                eprintln!("{}", formatter.format_error(&error));
                succeeded = false;
            }
        }
    }
    if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(65)
    }
}

fn parse<'src>(src: &'src str, path: &'src str, format: &ProgramFormat) -> ExitCode {
    use xlang::ast::formatter::{
        DebugFormatter, ProgramFormatter, SExpressionFormatter, SourceFormatter,
    };
    use xlang::parser::formatter::{self as parser_formatter, ParserFormatter};

    let formatter: Box<dyn ProgramFormatter + 'src> = match format {
        ProgramFormat::Debug => Box::new(DebugFormatter),
        ProgramFormat::SExpr => Box::new(SExpressionFormatter),
        ProgramFormat::Source | ProgramFormat::Pretty => Box::new(SourceFormatter),
    };
    let error_formatter: Box<dyn ParserFormatter + 'src> = match format {
        ProgramFormat::Debug => Box::new(parser_formatter::DebugFormatter),
        ProgramFormat::SExpr | ProgramFormat::Source => {
            Box::new(parser_formatter::BasicFormatter::new(src))
        }
        ProgramFormat::Pretty => Box::new(parser_formatter::PrettyFormatter::new(src, path)),
    };

    match xlang::parse(src) {
        Ok(program) => {
            println!("{}", formatter.format(&program));
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("{}", error_formatter.format_error(&error));
            ExitCode::from(65)
        }
    }
}

fn run<'src>(src: &'src str, path: &'src str, format: &ValueFormat) -> ExitCode {
    use xlang::parser::formatter::{self as parser_formatter, ParserFormatter};
    use xlang::value::formatter::{BasicFormatter, PrettyFormatter, ValueFormatter};

    let formatter: Box<dyn ValueFormatter + 'src> = match format {
        ValueFormat::Basic => Box::new(BasicFormatter::new(src)),
        ValueFormat::Pretty => Box::new(PrettyFormatter::new(src, path)),
    };
    let error_formatter: Box<dyn ParserFormatter + 'src> = match format {
        ValueFormat::Basic => Box::new(parser_formatter::BasicFormatter::new(src)),
        ValueFormat::Pretty => Box::new(parser_formatter::PrettyFormatter::new(src, path)),
    };

    let program = match xlang::parse(src) {
        Ok(program) => program,
        Err(error) => {
            eprintln!("{}", error_formatter.format_error(&error));
            return ExitCode::from(65);
        }
    };

    let mut interpreter = TreeWalkInterpreter::new(StdioContext);
    match interpreter.run(&program) {
        Ok(value) => {
            println!("{}", formatter.format(&value));
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("{}", formatter.format_error(&error));
            ExitCode::from(70)
        }
    }
}

fn repl() -> Result<ExitCode> {
    use xlang::parser::formatter::{BasicFormatter as ParserBasicFormatter, ParserFormatter};
    use xlang::value::formatter::{BasicFormatter, ValueFormatter};

    let mut interpreter = TreeWalkInterpreter::new(StdioContext);
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    println!("{BANNER}");

    let mut line = String::new();
    loop {
        print!("{PROMPT}");
        stdout.flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim_end_matches(['\r', '\n']);
        if input.is_empty() || input.contains("exit") {
            break;
        }

        let program = match xlang::parse(input) {
            Ok(program) => program,
            Err(error) => {
                eprintln!("{}", ParserBasicFormatter::new(input).format_error(&error));
                continue;
            }
        };
        let formatter = BasicFormatter::new(input);
        match interpreter.run(&program) {
            Ok(value) => println!("{}", formatter.format(&value)),
            Err(error) => eprintln!("{}", formatter.format_error(&error)),
        }
    }
    Ok(ExitCode::SUCCESS)
}
