use std::{
    io::{BufReader, BufWriter, Read, Write, stdin, stdout},
    path::PathBuf,
};

use clap::{Parser, Subcommand};

use crate::{BitString, CodeRow, Encoding, Outcome, Session};

#[derive(Parser)]
#[command(
    version,
    author,
    about = "Build a Huffman code for a text, encode it to bits and decode it back"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,

    #[arg(short, long, global = true)]
    /// Input from file instead of standard input or command line argument.
    ///
    /// As with standard input, one trailing line terminator is dropped.
    input_file: Option<PathBuf>,

    #[arg(short, long, global = true)]
    /// Output to file instead of standard output
    output_file: Option<PathBuf>,

    #[arg(short, long, global = true)]
    /// Write a JSON report instead of plain text
    json: bool,

    #[arg(short, long, global = true)]
    /// Pretty-print any JSON output
    pretty: bool,

    #[arg(long, global = true, default_value = "warn")]
    /// Log filter, e.g. `debug` or `huffcode=trace`
    pub log: String,
}

#[derive(Subcommand)]
pub enum Command {
    /// Encode text and check that it decodes back.
    ///
    /// Prints original and encoded sizes in bits.
    Encode {
        /// Input from command line argument instead of standard input
        data: Option<String>,

        #[arg(short, long)]
        /// Also print the code table, the encoded bits and the decoded text
        show_table: bool,

        #[arg(short, long)]
        /// Print the encoding as one line of JSON followed by the encoded bits,
        /// which `decode` can read back.
        enclose_encoding: bool,
    },
    /// Print the code table of a text.
    Table {
        /// Input from command line argument instead of standard input
        data: Option<String>,
    },
    /// Decode a string of '0' and '1'.
    ///
    /// If `--encoding-file` is not provided, the input must start with the
    /// JSON encoding written by `encode --enclose-encoding`.
    Decode {
        /// Input from command line argument instead of standard input
        data: Option<String>,

        #[arg(short, long)]
        /// Read encoding from file
        encoding_file: Option<PathBuf>,
    },
}
use Command::*;

impl Cli {
    fn data(&self) -> &Option<String> {
        match &self.command {
            Encode { data, .. } => data,
            Table { data } => data,
            Decode { data, .. } => data,
        }
    }
}

fn read_input(cli: &Cli) -> Result<String, String> {
    if let Some(input_fpath) = &cli.input_file {
        let s = std::fs::read_to_string(input_fpath)
            .map_err(|e| format!("read file {:?} failed: {}", input_fpath, e))?;
        Ok(strip_line_terminator(&s).to_string())
    } else if let Some(data) = cli.data() {
        Ok(data.clone())
    } else {
        let mut s = String::new();
        stdin()
            .read_to_string(&mut s)
            .map_err(|e| format!("read STDIN failed: {}", e))?;
        Ok(strip_line_terminator(&s).to_string())
    }
}

fn strip_line_terminator(s: &str) -> &str {
    s.strip_suffix('\n')
        .map(|s| s.strip_suffix('\r').unwrap_or(s))
        .unwrap_or(s)
}

fn read_encoding(input: impl Read) -> Option<Result<Encoding, serde_json::Error>> {
    let mut deserializer = serde_json::Deserializer::from_reader(input).into_iter::<Encoding>();
    deserializer.next()
}

/// Split an encoding enclosed at the start of `input` from the bits after it.
fn split_enclosed_encoding(input: &str) -> Option<Result<(Encoding, &str), serde_json::Error>> {
    if !input.trim_start().starts_with('[') {
        return None;
    }
    let mut deserializer = serde_json::Deserializer::from_str(input).into_iter::<Encoding>();
    match deserializer.next()? {
        Ok(encoding) => Some(Ok((encoding, &input[deserializer.byte_offset()..]))),
        Err(e) => Some(Err(e)),
    }
}

fn write_json<T: serde::Serialize>(
    value: &T,
    mut writer: impl Write,
    pretty: bool,
) -> Result<(), String> {
    if pretty {
        serde_json::to_writer_pretty(&mut writer, value)
    } else {
        serde_json::to_writer(&mut writer, value)
    }
    .map_err(|e| format!("write JSON to output failed: {}", e))?;
    writeln!(&mut writer).map_err(|e| format!("write newline to output failed: {}", e))
}

fn write_table(rows: &[CodeRow], mut writer: impl Write) -> std::io::Result<()> {
    writeln!(writer, "+-------+--------+----------------+")?;
    writeln!(writer, "| Char  | Freq   | Huffman Code   |")?;
    writeln!(writer, "+-------+--------+----------------+")?;
    for row in rows {
        writeln!(
            writer,
            "|  {:>3}  | {:>6} | {:>14} |",
            row.symbol.escape_debug().to_string(),
            row.frequency,
            row.code.to_string()
        )?;
    }
    writeln!(writer, "+-------+--------+----------------+")
}

fn write_summary(
    outcome: &Outcome,
    mut writer: impl Write,
    show_table: bool,
) -> std::io::Result<()> {
    writeln!(writer, "Encode completed")?;
    writeln!(writer, "Original size: {} bits", outcome.original_bits())?;
    writeln!(writer, "Encoded size: {} bits", outcome.encoded_bits())?;

    if show_table {
        writeln!(writer)?;
        writeln!(writer, "Huffman encoding table:")?;
        write_table(&outcome.table_rows(), &mut writer)?;
        writeln!(writer)?;
        writeln!(writer, "Encoded string: {}", outcome.encoded())?;
        writeln!(writer)?;
        writeln!(writer, "Decoded string: {}", outcome.decoded())?;
    }
    Ok(())
}

fn encode(
    outcome: &Outcome,
    mut writer: impl Write,
    show_table: bool,
    enclose_encoding: bool,
    json: bool,
    pretty: bool,
) -> Result<(), String> {
    if !outcome.round_trips() {
        return Err("decoded text does not match the input".to_string());
    }

    if enclose_encoding {
        write_json(outcome.encoding(), &mut writer, pretty)?;
        writeln!(&mut writer, "{}", outcome.encoded())
            .map_err(|e| format!("write output failed: {}", e))
    } else if json {
        write_json(&outcome.report(), writer, pretty)
    } else {
        write_summary(outcome, writer, show_table)
            .map_err(|e| format!("write output failed: {}", e))
    }
}

fn table(outcome: &Outcome, writer: impl Write, json: bool, pretty: bool) -> Result<(), String> {
    if json {
        write_json(&outcome.table_rows(), writer, pretty)
    } else {
        write_table(&outcome.table_rows(), writer)
            .map_err(|e| format!("write output failed: {}", e))
    }
}

fn decode(encoding: &Encoding, bits: &str, mut writer: impl Write) -> Result<(), String> {
    let bits: BitString = bits
        .trim()
        .parse()
        .map_err(|e| format!("error parsing bits: {}", e))?;
    let decoded = encoding
        .decoder()
        .decode(&bits)
        .map_err(|e| format!("error decoding bits: {}", e))?;

    writeln!(writer, "{}", decoded).map_err(|e| format!("error writing output: {}", e))
}

pub fn run(cli: Cli) -> Result<(), String> {
    let input = read_input(&cli)?;

    let output: Box<dyn Write> = if let Some(output_fpath) = &cli.output_file {
        let f = std::fs::File::create(output_fpath)
            .map_err(|e| format!("create file {:?} failed: {}", output_fpath, e))?;
        Box::new(BufWriter::new(f))
    } else {
        Box::new(stdout())
    };

    let mut session = Session::new();

    match &cli.command {
        Encode {
            show_table,
            enclose_encoding,
            ..
        } => {
            let outcome = session
                .submit(&input)
                .map_err(|e| format!("error encoding input: {}", e))?;
            encode(
                outcome,
                output,
                *show_table,
                *enclose_encoding,
                cli.json,
                cli.pretty,
            )?;
        }
        Table { .. } => {
            let outcome = session
                .submit(&input)
                .map_err(|e| format!("error encoding input: {}", e))?;
            table(outcome, output, cli.json, cli.pretty)?;
        }
        Decode { encoding_file, .. } => {
            if let Some(encoding_file) = encoding_file {
                let f = std::fs::File::open(encoding_file)
                    .map_err(|e| format!("open file {:?} failed: {}", encoding_file, e))?;
                let encoding = match read_encoding(BufReader::new(f)) {
                    Some(Ok(e)) => e,
                    Some(Err(e)) => {
                        return Err(format!(
                            "error parsing encoding file {:?}: {}",
                            encoding_file, e
                        ));
                    }
                    None => {
                        return Err(format!(
                            "encoding file {:?} does not contain any JSON data",
                            encoding_file
                        ));
                    }
                };
                decode(&encoding, &input, output)?;
            } else {
                match split_enclosed_encoding(&input) {
                    Some(Ok((encoding, bits))) => decode(&encoding, bits, output)?,
                    Some(Err(e)) => return Err(format!("error parsing enclosed encoding: {}", e)),
                    None => {
                        return Err(
                            "no encoding given: pass --encoding-file or enclose one in the input"
                                .to_string(),
                        );
                    }
                }
            }
        }
    }

    Ok(())
}
