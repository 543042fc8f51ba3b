use conllu_translit::conllu::{Reader, write_sentence};
use conllu_translit::{AnnotateOptions, RuleTable, Transliterator, annotate_sentence};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, IsTerminal, Write};
use std::path::Path;

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    if let Err(err) = run(&config) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

struct CliConfig {
    infile: Option<String>,
    outfile: Option<String>,
    data: Option<String>,
    language: String,
    lemmas: bool,
    noforms: bool,
    raw: bool,
    overwrite: bool,
    sentence: bool,
    interactive: bool,
}

fn run(config: &CliConfig) -> conllu_translit::Result<()> {
    let loaded;
    let table = match config.data.as_deref() {
        Some(path) => {
            loaded = RuleTable::load(Path::new(path))?;
            &loaded
        }
        None => RuleTable::bundled(),
    };
    let engine = Transliterator::new(table, &config.language)?;

    if config.interactive {
        return run_interactive(&engine);
    }

    let infile = config.infile.as_deref().unwrap_or("-");
    let input = open_input(infile)?;
    let mut output = open_output(config.outfile.as_deref())?;

    if config.raw {
        run_raw(&engine, input, &mut output)?;
    } else {
        run_conllu(&engine, config, input, &mut output)?;
    }
    output.flush()?;
    Ok(())
}

/// Default mode: stream sentences, transliterate, re-serialize.
///
/// Per-line diagnostics go to stderr as `<line-number>: <message>` and never
/// stop the run.
fn run_conllu<W: Write>(
    engine: &Transliterator,
    config: &CliConfig,
    input: Box<dyn BufRead>,
    output: &mut W,
) -> conllu_translit::Result<()> {
    let options = AnnotateOptions {
        forms: !config.noforms,
        lemmas: config.lemmas,
        overwrite: config.overwrite,
        sentence: config.sentence,
    };
    let mut reader = Reader::new(input);
    while let Some(mut sentence) = reader.read_sentence()? {
        for diagnostic in reader.take_diagnostics() {
            eprintln!("{diagnostic}");
        }
        annotate_sentence(engine, &mut sentence, &options);
        write_sentence(output, &sentence)?;
    }
    Ok(())
}

/// `--raw`: no record parsing, every input line is transliterated whole.
fn run_raw<W: Write>(
    engine: &Transliterator,
    input: Box<dyn BufRead>,
    output: &mut W,
) -> conllu_translit::Result<()> {
    for line in input.lines() {
        writeln!(output, "{}", engine.transliterate(&line?))?;
    }
    Ok(())
}

/// `--interactive`: one line at a time from stdin, result on stdout.
fn run_interactive(engine: &Transliterator) -> conllu_translit::Result<()> {
    let stdin = io::stdin();
    let prompt = stdin.is_terminal();
    let mut line = String::new();
    loop {
        if prompt {
            eprint!("{}> ", engine.key());
        }
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(());
        }
        println!("{}", engine.transliterate(line.trim_end_matches(['\n', '\r'])));
    }
}

fn open_input(path: &str) -> io::Result<Box<dyn BufRead>> {
    if path == "-" {
        Ok(Box::new(BufReader::new(io::stdin())))
    } else {
        Ok(Box::new(BufReader::new(File::open(path)?)))
    }
}

fn open_output(path: Option<&str>) -> io::Result<Box<dyn Write>> {
    match path {
        Some(path) => Ok(Box::new(BufWriter::new(File::create(path)?))),
        None => Ok(Box::new(BufWriter::new(io::stdout()))),
    }
}

fn parse_args() -> Result<CliConfig, String> {
    let mut config = CliConfig {
        infile: None,
        outfile: None,
        data: None,
        language: String::new(),
        lemmas: false,
        noforms: false,
        raw: false,
        overwrite: false,
        sentence: false,
        interactive: false,
    };
    let mut language: Option<String> = None;
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                println!("{}", help_text());
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("conllu-translit {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--lemmas" => config.lemmas = true,
            "--noforms" => config.noforms = true,
            "--raw" => config.raw = true,
            "--overwrite" => config.overwrite = true,
            "--sentence" => config.sentence = true,
            "--interactive" => config.interactive = true,
            "--infile" | "-i" => config.infile = Some(expect_value(&arg, &mut args)?),
            "--outfile" | "-o" => config.outfile = Some(expect_value(&arg, &mut args)?),
            "--data" | "-d" => config.data = Some(expect_value(&arg, &mut args)?),
            "--language" | "-l" => language = Some(expect_value(&arg, &mut args)?),
            _ if arg.starts_with("--infile=") => {
                config.infile = Some(split_value(&arg));
            }
            _ if arg.starts_with("--outfile=") => {
                config.outfile = Some(split_value(&arg));
            }
            _ if arg.starts_with("--data=") => {
                config.data = Some(split_value(&arg));
            }
            _ if arg.starts_with("--language=") => {
                language = Some(split_value(&arg));
            }
            _ => {
                return Err(format!("error: unknown option '{arg}'"));
            }
        }
    }

    config.language = match language {
        Some(language) => language,
        None => return Err(format!("error: --language is required\n\n{}", help_text())),
    };
    if config.infile.is_none() && !config.interactive {
        return Err(format!(
            "error: --infile is required (use '-' for stdin)\n\n{}",
            help_text()
        ));
    }
    Ok(config)
}

fn expect_value(flag: &str, args: &mut impl Iterator<Item = String>) -> Result<String, String> {
    args.next().ok_or_else(|| format!("error: {flag} expects a value"))
}

fn split_value(arg: &str) -> String {
    arg.splitn(2, '=').nth(1).unwrap_or("").to_string()
}

fn help_text() -> String {
    format!(
        "conllu-translit {version}

Transliterate CoNLL-U word forms and lemmas into another script.

Usage:
  conllu-translit --language <key> --infile <path> [OPTIONS]
  conllu-translit --language <key> --interactive

Options:
  -i, --infile <path>     Input file, or '-' for stdin.
  -o, --outfile <path>    Output file. Default: stdout.
  -d, --data <path>       Rule resource (JSON). Default: the bundled table.
  -l, --language <key>    Language/script key selecting the rule chain.
      --lemmas            Also transliterate lemmas (MISC LTranslit=).
      --noforms           Do not transliterate forms.
      --raw               Treat input as unstructured text, line by line.
      --overwrite         Replace existing Translit/LTranslit/# translit.
      --sentence          Add a whole-sentence '# translit' comment.
      --interactive       Read one line at a time from a prompt.
  -h, --help              Show this help message.
  -V, --version           Print version information.

Exit codes:
  0  Success (including runs that emitted per-record diagnostics).
  1  Fatal error: unknown/broken rule key, unreadable resource or input.
  2  Invalid arguments.
",
        version = env!("CARGO_PKG_VERSION")
    )
}
