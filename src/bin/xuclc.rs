// XUCL command-line translator
//
//  Copyright (C) 2014-2022 Ryan Specialty Group, LLC.
//
//  This file is part of XUCL.
//
//  This program is free software: you can redistribute it and/or modify
//  it under the terms of the GNU General Public License as published by
//  the Free Software Foundation, either version 3 of the License, or
//  (at your option) any later version.
//
//  This program is distributed in the hope that it will be useful,
//  but WITHOUT ANY WARRANTY; without even the implied warranty of
//  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//  GNU General Public License for more details.
//
//  You should have received a copy of the GNU General Public License
//  along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! This is the XUCL translator.
//!
//! `xuclc` reads an XML configuration document and writes its UCL-like
//!   translation to standard output or to a file.
//! Diagnostics are written to standard error.

extern crate xucl;

use getopts::{Fail, Options};
use log::info;
use std::{
    env,
    error::Error,
    fmt::{self, Display},
    fs,
    io::{self, BufWriter, Write},
    path::Path,
};
use xucl::{
    convert::ConvertError,
    diagnose::{AnnotatedSpan, Diagnostic, VisualReporter},
    reader::{self, ReadError},
    translate::Translation,
};

/// Types of commands
#[derive(Debug)]
enum Command {
    /// Translate `INPUT`,
    ///   optionally to an output file,
    ///   and optionally dumping constants.
    Translate(String, Option<String>, bool),
    Usage,
}

/// Read the entire source file at `src_path`.
fn load(src_path: &str) -> Result<String, XuclcError> {
    fs::read_to_string(Path::new(src_path))
        .map_err(|e| XuclcError::Input(src_path.to_string(), e))
}

/// Translate source text into a [`Translation`].
fn translate_src(src: &str) -> Result<Translation, XuclcError> {
    let root = reader::read_str(src)?;
    Ok(Translation::run(&root)?)
}

/// Produce the final output text.
///
/// With `dump_constants`,
///   the constant table is appended as comments sorted by name.
fn format_output(translation: &Translation, dump_constants: bool) -> String {
    let mut out = translation.output().to_string();

    if dump_constants {
        for (name, value) in translation.constants().sorted() {
            out.push_str(&format!("// {name} = {value}\n"));
        }
    }

    out
}

/// Write `out` to `dest_path`,
///   or to standard output if there is no destination.
///
/// A file receives `out` verbatim.
/// Standard output is terminated by an additional newline,
///   like a line printed to a terminal.
fn emit(out: &str, dest_path: Option<&str>) -> Result<(), XuclcError> {
    match dest_path {
        Some(dest) => {
            let mut fout = BufWriter::new(
                fs::File::create(Path::new(dest)).map_err(XuclcError::Output)?,
            );

            fout.write_all(out.as_bytes())
                .and_then(|_| fout.flush())
                .map_err(XuclcError::Output)
        }

        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();

            writeln!(lock, "{out}")
                .and_then(|_| lock.flush())
                .map_err(XuclcError::Output)
        }
    }
}

/// Translate `src_path`,
///   rendering any error against the source text.
fn run(
    src_path: &str,
    dest_path: Option<&str>,
    dump_constants: bool,
) -> Result<(), i32> {
    let src = load(src_path).map_err(|e| {
        eprintln!("error: {e}");
        e.exit_code()
    })?;

    translate_src(&src)
        .and_then(|translation| {
            info!(
                "translated `{src_path}` ({} byte(s) out, {} constant(s))",
                translation.output().len(),
                translation.constants().len(),
            );

            emit(&format_output(&translation, dump_constants), dest_path)
        })
        .map_err(|e| {
            // Rendering to a string ensures buffering so that we don't
            //   interleave output between processes.
            let report = VisualReporter::new(src_path, &src).render(&e);
            eprint!("{report}");
            eprintln!("fatal: failed to translate `{src_path}`");

            e.exit_code()
        })
}

/// Entrypoint for the translator
pub fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("xuclc");
    let opts = get_opts();
    let usage = opts.usage(&format!("Usage: {} [OPTIONS] INPUT", program));

    match parse_options(opts, args.clone()) {
        Ok(Command::Translate(src_path, dest_path, dump)) => {
            match run(&src_path, dest_path.as_deref(), dump) {
                Ok(()) => std::process::exit(exitcode::OK),
                Err(code) => std::process::exit(code),
            }
        }
        Ok(Command::Usage) => {
            println!("{}", usage);
            std::process::exit(exitcode::OK);
        }
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("{}", usage);
            std::process::exit(exitcode::USAGE);
        }
    }
}

/// Get 'Options'
fn get_opts() -> Options {
    let mut opts = Options::new();
    opts.optopt("o", "output", "write output to FILE", "FILE");
    opts.optflag(
        "",
        "dump-constants",
        "append the final constant table as comments",
    );
    opts.optflag("h", "help", "print this help menu");

    opts
}

/// Option parser
fn parse_options(opts: Options, args: Vec<String>) -> Result<Command, Fail> {
    let matches = opts.parse(args.get(1..).unwrap_or_default())?;

    if matches.opt_present("h") {
        return Ok(Command::Usage);
    }

    let input = match matches.free.len() {
        0 => return Err(Fail::OptionMissing(String::from("INPUT"))),
        1 => matches.free[0].clone(),
        _ => return Err(Fail::UnrecognizedOption(matches.free[1].clone())),
    };

    Ok(Command::Translate(
        input,
        matches.opt_str("o"),
        matches.opt_present("dump-constants"),
    ))
}

/// Translator (`xuclc`) error.
///
/// This represents the aggregation of all possible errors that can occur
///   while translating a single file.
#[derive(Debug)]
pub enum XuclcError {
    /// Input file could not be read.
    Input(String, io::Error),
    Read(ReadError),
    Convert(ConvertError),
    /// Output could not be written.
    Output(io::Error),
}

impl XuclcError {
    /// Process exit code for this error.
    fn exit_code(&self) -> i32 {
        match self {
            Self::Input(..) => exitcode::NOINPUT,
            Self::Read(_) | Self::Convert(_) => exitcode::DATAERR,
            Self::Output(_) => exitcode::IOERR,
        }
    }
}

impl From<ReadError> for XuclcError {
    fn from(e: ReadError) -> Self {
        Self::Read(e)
    }
}

impl From<ConvertError> for XuclcError {
    fn from(e: ConvertError) -> Self {
        Self::Convert(e)
    }
}

impl Display for XuclcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input(path, e) => write!(f, "cannot read `{path}`: {e}"),
            Self::Read(e) => Display::fmt(e, f),
            Self::Convert(e) => Display::fmt(e, f),
            Self::Output(e) => write!(f, "cannot write output: {e}"),
        }
    }
}

impl Error for XuclcError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Input(_, e) => Some(e),
            Self::Read(e) => Some(e),
            Self::Convert(e) => Some(e),
            Self::Output(e) => Some(e),
        }
    }
}

impl Diagnostic for XuclcError {
    fn describe(&self) -> Vec<AnnotatedSpan> {
        match self {
            Self::Read(e) => e.describe(),
            Self::Convert(e) => e.describe(),

            // Falls back to rendering just the error `Display`.
            Self::Input(..) | Self::Output(_) => vec![],
        }
    }
}
