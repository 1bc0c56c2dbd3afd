//! xlsxtxt CLI - converts one spreadsheet sheet into fixed-format text

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, ValueEnum};
use tracing::Level;
use xlsxtxt::{Converter, ConverterBuilder, InputFormat, SheetSelector, DEFAULT_OUTPUT_FILE};

#[derive(Parser)]
#[command(name = "xlsxtxt")]
#[command(
    author,
    version,
    about = "Convert a spreadsheet sheet into semicolon-delimited fixed-format text"
)]
struct Cli {
    /// Input file (xlsx, xlsm, xlsb, xls, ods or csv)
    input: PathBuf,

    /// Output text file, or "-" for stdout
    #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
    output: PathBuf,

    /// Sheet index to convert (0-based, default: first sheet)
    #[arg(long, conflicts_with = "sheet_name")]
    sheet_index: Option<usize>,

    /// Sheet name to convert
    #[arg(long)]
    sheet_name: Option<String>,

    /// List the sheets of the input and exit
    #[arg(long)]
    list_sheets: bool,

    /// How to read the input
    #[arg(long, value_enum, default_value_t = FormatArg::Auto)]
    format: FormatArg,

    /// Field delimiter for CSV input
    #[arg(long, default_value = ",")]
    csv_delimiter: char,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Auto,
    Workbook,
    Csv,
}

impl From<FormatArg> for InputFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Auto => InputFormat::Auto,
            FormatArg::Workbook => InputFormat::Workbook,
            FormatArg::Csv => InputFormat::Csv,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let converter = build_converter(&cli)?;

    if cli.list_sheets {
        list_sheets(&converter, &cli.input)
    } else {
        convert(&converter, &cli.input, &cli.output)
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn build_converter(cli: &Cli) -> Result<Converter> {
    let selector = match (&cli.sheet_name, cli.sheet_index) {
        (Some(name), _) => SheetSelector::Name(name.clone()),
        (None, Some(index)) => SheetSelector::Index(index),
        (None, None) => SheetSelector::First,
    };
    let delimiter = u8::try_from(cli.csv_delimiter)
        .map_err(|_| anyhow!("CSV delimiter must be a single ASCII character"))?;

    ConverterBuilder::new()
        .with_sheet_selector(selector)
        .with_input_format(cli.format.into())
        .with_csv_delimiter(delimiter)
        .build()
        .context("Invalid options")
}

fn open_input(input: &Path) -> Result<File> {
    File::open(input).with_context(|| format!("Failed to open '{}'", input.display()))
}

fn list_sheets(converter: &Converter, input: &Path) -> Result<()> {
    let names = converter
        .sheet_names(open_input(input)?)
        .with_context(|| format!("Failed to read '{}'", input.display()))?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    for (index, name) in names.iter().enumerate() {
        writeln!(handle, "{}\t{}", index, name)?;
    }
    Ok(())
}

fn convert(converter: &Converter, input: &Path, output: &Path) -> Result<()> {
    let source = open_input(input)?;

    if output == Path::new("-") {
        let stdout = io::stdout();
        converter
            .convert(source, stdout.lock())
            .with_context(|| format!("Failed to convert '{}'", input.display()))?;
    } else {
        // Only create the output file once conversion has succeeded
        let mut buffer = Vec::new();
        let rows = converter
            .convert(source, &mut buffer)
            .with_context(|| format!("Failed to convert '{}'", input.display()))?;
        std::fs::write(output, &buffer)
            .with_context(|| format!("Failed to write '{}'", output.display()))?;
        eprintln!("Wrote {} rows to '{}'", rows, output.display());
    }

    Ok(())
}
