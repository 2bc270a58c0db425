use std::io::{self, Read};
use std::path::PathBuf;
use std::sync::Arc;

use gumdrop::Options;
use serde::Serialize;

use ocrcorrect::corrector::{Corrector, CorrectorConfig};
use ocrcorrect::embeddings::{EmbeddingStore, WordEmbeddings};
use ocrcorrect::tokenizer::Tokenize;

trait OutputWriter {
    fn write_correction(&mut self, input: &str, output: &str);
    fn finish(&mut self);
}

struct StdoutWriter;

impl OutputWriter for StdoutWriter {
    fn write_correction(&mut self, _input: &str, output: &str) {
        println!("{}", output);
    }

    fn finish(&mut self) {}
}

#[derive(Serialize)]
struct CorrectionRecord {
    input: String,
    output: String,
}

#[derive(Serialize)]
struct JsonWriter {
    results: Vec<CorrectionRecord>,
}

impl JsonWriter {
    pub fn new() -> JsonWriter {
        JsonWriter { results: vec![] }
    }
}

impl OutputWriter for JsonWriter {
    fn write_correction(&mut self, input: &str, output: &str) {
        self.results.push(CorrectionRecord {
            input: input.to_owned(),
            output: output.to_owned(),
        });
    }

    fn finish(&mut self) {
        println!("{}", serde_json::to_string_pretty(self).unwrap());
    }
}

#[derive(Debug, Options)]
struct Args {
    #[options(help = "print help message")]
    help: bool,

    #[options(command)]
    command: Option<Command>,
}

#[derive(Debug, Options)]
enum Command {
    #[options(help = "correct provided input against a word-embedding model")]
    Correct(CorrectArgs),

    #[options(help = "print input in segmented form")]
    Tokenize(TokenizeArgs),

    #[options(help = "compile a textual word-vector model into the binary cache form")]
    Compile(CompileArgs),
}

#[derive(Debug, Options)]
struct CorrectArgs {
    #[options(help = "print help message")]
    help: bool,

    #[options(free, help = "texts to be corrected; reads stdin when empty")]
    inputs: Vec<String>,

    #[options(no_short, long = "json", help = "output in JSON format")]
    use_json: bool,

    #[options(help = "word-embedding model to be used", required)]
    model: PathBuf,

    #[options(
        no_short,
        long = "max-edit-distance",
        help = "maximum edit distance for candidate words (default: 2)"
    )]
    max_edit_distance: Option<usize>,
}

#[derive(Debug, Options)]
struct TokenizeArgs {
    #[options(help = "print help message")]
    help: bool,

    #[options(free, help = "texts to be segmented; reads stdin when empty")]
    inputs: Vec<String>,
}

#[derive(Debug, Options)]
struct CompileArgs {
    #[options(help = "print help message")]
    help: bool,

    #[options(help = "textual word-vector model to be compiled", required)]
    model: PathBuf,

    #[options(help = "path for the binary cache output", required)]
    output: PathBuf,
}

fn gather_input(inputs: Vec<String>) -> anyhow::Result<String> {
    if inputs.is_empty() {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(inputs.join(" "))
    }
}

fn correct(args: CorrectArgs) -> anyhow::Result<()> {
    let store = Arc::new(EmbeddingStore::load(&args.model)?);
    let config = CorrectorConfig {
        max_edit_distance: args
            .max_edit_distance
            .unwrap_or(CorrectorConfig::default().max_edit_distance),
    };
    let corrector = Corrector::with_config(store, config);

    let mut writer: Box<dyn OutputWriter> = if args.use_json {
        Box::new(JsonWriter::new())
    } else {
        Box::new(StdoutWriter)
    };

    let text = gather_input(args.inputs)?;
    let corrected = corrector.correct(&text);
    writer.write_correction(&text, &corrected);
    writer.finish();

    Ok(())
}

fn tokenize(args: TokenizeArgs) -> anyhow::Result<()> {
    let text = gather_input(args.inputs)?;

    for segment in text.segments() {
        println!("{:?}\t{:?}", segment.kind, segment.text);
    }

    Ok(())
}

fn compile(args: CompileArgs) -> anyhow::Result<()> {
    let store = EmbeddingStore::load(&args.model)?;
    store.write_cache(&args.output)?;
    eprintln!(
        "Wrote {} vectors ({} dimensions) to {}",
        store.len(),
        store.dims(),
        args.output.display()
    );
    Ok(())
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let args = Args::parse_args_default_or_exit();

    match args.command {
        Some(Command::Correct(args)) => correct(args),
        Some(Command::Tokenize(args)) => tokenize(args),
        Some(Command::Compile(args)) => compile(args),
        None => {
            eprintln!("ERROR: no command specified; try --help");
            std::process::exit(1);
        }
    }
}
