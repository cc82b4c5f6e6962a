// Static metamodel access-type resolver
//
//  Copyright (C) 2014-2023 Ryan Specialty, LLC.
//
//  This file is part of TAME.
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

//! Resolve the access types of classes mapped by XML mapping documents.
//!
//! `metagen` locates `persistence.xml` and every mapping document beneath
//!   a set of class path roots,
//!     resolves the access type of every mapped class against a class
//!     index (see [`metagen::universe`]),
//!     and prints the result for a metamodel generator.
//!
//! Problems with mapping documents are never fatal;
//!   they are logged as warnings and summarized on exit.

extern crate metagen;

use getopts::{Fail, Options};
use metagen::{
    context::Context,
    diagnose::TracingSink,
    fs::ClasspathFilesystem,
    pipeline::{self, parse_orm_list, Processor},
    universe::ClassIndex,
    xml::MappingError,
};
use std::{
    env,
    error::Error,
    fmt::{self, Display},
    fs,
    io::{self, BufReader, BufWriter, Write},
};
use tracing_subscriber::{
    layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Types of commands
enum Command {
    Resolve(Config),
    Usage,
}

/// What to print once processing is complete.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
enum Emit {
    /// One line per registered class descriptor.
    Descriptors,

    /// The access type table,
    ///   sorted by class name.
    Access,
}

#[derive(Debug)]
struct Config {
    classpath: Vec<String>,
    classes: String,
    options: pipeline::Options,
    emit: Emit,
    verbose: bool,
}

/// Log to stderr so that stdout carries only results.
///
/// `RUST_LOG` takes precedence over `--verbose`.
fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();
}

fn load_classes(path: &str) -> Result<ClassIndex, MetagenError> {
    let file = fs::File::open(path)
        .map_err(|e| MetagenError::ClassIndexIo(path.into(), e))?;

    ClassIndex::read(BufReader::new(file))
        .map_err(|e| MetagenError::ClassIndex(path.into(), e))
}

/// Write the results of processing to `out`.
fn emit<W: Write, H>(
    out: &mut W,
    ctx: &Context<H>,
    emit: Emit,
) -> Result<(), MetagenError> {
    match emit {
        Emit::Descriptors => {
            for desc in ctx.descriptors() {
                writeln!(
                    out,
                    "{} {} {} ({} members)",
                    desc.kind(),
                    desc.fqcn(),
                    desc.access_type(),
                    desc.declaration().attributes.len(),
                )?;
            }
        }

        Emit::Access => {
            let mut types: Vec<_> = ctx.access_types().collect();
            types.sort_by(|(a, _), (b, _)| a.cmp(b));

            for (fqcn, access) in types {
                writeln!(out, "{fqcn} {access}")?;
            }
        }
    }

    Ok(())
}

fn run(config: Config) -> Result<(), MetagenError> {
    init_tracing(config.verbose);

    let universe = load_classes(&config.classes)?;
    tracing::debug!("{} class(es) in {}", universe.len(), config.classes);

    let mut fs = ClasspathFilesystem::<fs::File>::new(&config.classpath);
    let mut sink = TracingSink::new();
    let mut processor = Processor::new(universe, config.options);

    processor.process_round(&mut fs, &mut sink);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    emit(&mut out, processor.context(), config.emit)?;
    out.flush()?;

    match sink.warning_count() {
        0 => (),
        n => eprintln!("{n} warning(s)"),
    }

    Ok(())
}

/// Entrypoint
pub fn main() {
    let args: Vec<String> = env::args().collect();
    let program = &args[0];
    let opts = get_opts();
    let usage =
        opts.usage(&format!("Usage: {program} [OPTIONS] --classes INDEX"));

    match parse_options(opts, args) {
        Ok(Command::Resolve(config)) => {
            if let Err(e) = run(config) {
                eprintln!("fatal: {e}");
                std::process::exit(e.exit_code());
            }
        }
        Ok(Command::Usage) => {
            println!("{usage}");
            std::process::exit(exitcode::OK);
        }
        Err(e) => {
            eprintln!("{e}");
            println!("{usage}");
            std::process::exit(exitcode::USAGE);
        }
    }
}

/// Get 'Options'
///
/// ```
/// use getopts::Options;
///
/// let opts = get_opts();
/// ```
fn get_opts() -> Options {
    let mut opts = Options::new();
    opts.optmulti("c", "classpath", "add a resource root (default .)", "DIR");
    opts.optopt(
        "",
        "persistence-xml",
        "persistence unit descriptor resource",
        "PATH",
    );
    opts.optopt("", "orm-xml", "additional mapping documents", "LIST");
    opts.optopt("", "classes", "class index", "FILE");
    opts.optopt("", "emit", "set output type", "descriptors|access");
    opts.optflag("v", "verbose", "log each step of processing");
    opts.optflag("h", "help", "print this help menu");

    opts
}

/// Option parser
fn parse_options(opts: Options, args: Vec<String>) -> Result<Command, Fail> {
    let matches = opts.parse(&args[1..])?;

    if matches.opt_present("h") {
        return Ok(Command::Usage);
    }

    if let Some(free) = matches.free.first() {
        return Err(Fail::UnrecognizedOption(free.clone()));
    }

    let classes = match matches.opt_str("classes") {
        Some(path) => path,
        None => return Err(Fail::OptionMissing(String::from("classes"))),
    };

    let emit = match matches.opt_str("emit").as_deref() {
        None | Some("descriptors") => Emit::Descriptors,
        Some("access") => Emit::Access,
        Some(_) => {
            return Err(Fail::ArgumentMissing(String::from(
                "--emit descriptors|access",
            )))
        }
    };

    let mut classpath = matches.opt_strs("c");
    if classpath.is_empty() {
        classpath.push(String::from("."));
    }

    let mut options = pipeline::Options::default();

    if let Some(path) = matches.opt_str("persistence-xml") {
        options.persistence_xml = path;
    }

    if let Some(list) = matches.opt_str("orm-xml") {
        options.orm_xml = parse_orm_list(&list);
    }

    Ok(Command::Resolve(Config {
        classpath,
        classes,
        options,
        emit,
        verbose: matches.opt_present("v"),
    }))
}

/// Resolver (`metagen`) error.
///
/// Nothing that goes wrong while processing mapping documents is an
///   error;
///     these are the failures that prevent processing from happening at
///     all,
///       or prevent its results from being written.
#[derive(Debug)]
pub enum MetagenError {
    Io(io::Error),
    ClassIndexIo(String, io::Error),
    ClassIndex(String, MappingError),
}

impl MetagenError {
    fn exit_code(&self) -> exitcode::ExitCode {
        match self {
            Self::Io(_) => exitcode::IOERR,
            Self::ClassIndexIo(..) | Self::ClassIndex(..) => exitcode::NOINPUT,
        }
    }
}

impl From<io::Error> for MetagenError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl Display for MetagenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => Display::fmt(e, f),
            Self::ClassIndexIo(path, e) => {
                write!(f, "failed to open class index `{path}`: {e}")
            }
            Self::ClassIndex(path, e) => {
                write!(f, "failed to read class index `{path}`: {e}")
            }
        }
    }
}

impl Error for MetagenError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::ClassIndexIo(_, e) => Some(e),
            Self::ClassIndex(_, e) => Some(e),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use metagen::{
        access::{AccessType, AccessTypeInfo},
        context::ClassDescriptor,
        xml::{AttributeDecl, AttributeKind, ClassDeclaration, DeclKind},
    };

    fn args(rest: &[&str]) -> Vec<String> {
        std::iter::once("program")
            .chain(rest.iter().copied())
            .map(String::from)
            .collect()
    }

    fn parse(rest: &[&str]) -> Result<Command, Fail> {
        parse_options(get_opts(), args(rest))
    }

    fn config(rest: &[&str]) -> Config {
        match parse(rest) {
            Ok(Command::Resolve(config)) => config,
            Ok(Command::Usage) => panic!("unexpected usage"),
            Err(e) => panic!("unexpected failure: {e}"),
        }
    }

    #[test]
    fn parse_options_help() {
        match parse(&["-h"]) {
            Ok(Command::Usage) => {}
            _ => panic!("Help option did not parse"),
        }
    }

    #[test]
    fn parse_options_help_long() {
        match parse(&["--help"]) {
            Ok(Command::Usage) => {}
            _ => panic!("Long help option did not parse"),
        }
    }

    #[test]
    fn parse_options_invalid() {
        match parse(&["-q"]) {
            Err(Fail::UnrecognizedOption(_)) => {}
            _ => panic!("Invalid option not caught"),
        }
    }

    #[test]
    fn parse_options_unexpected_free_argument() {
        match parse(&["--classes", "classes.xml", "foo"]) {
            Err(Fail::UnrecognizedOption(arg)) => assert_eq!("foo", arg),
            _ => panic!("Free argument not caught"),
        }
    }

    #[test]
    fn parse_options_missing_classes() {
        match parse(&[]) {
            Err(Fail::OptionMissing(message)) => {
                assert_eq!("classes", message);
            }
            _ => panic!("Missing class index not caught"),
        }
    }

    #[test]
    fn parse_options_invalid_emit() {
        match parse(&["--classes", "c.xml", "--emit", "foo"]) {
            Err(Fail::ArgumentMissing(message)) => {
                assert_eq!("--emit descriptors|access", message);
            }
            _ => panic!("Invalid emit not caught"),
        }
    }

    #[test]
    fn parse_options_defaults() {
        let config = config(&["--classes", "c.xml"]);

        assert_eq!("c.xml", config.classes);
        assert_eq!(vec!["."], config.classpath);
        assert_eq!(pipeline::Options::default(), config.options);
        assert_eq!(Emit::Descriptors, config.emit);
        assert!(!config.verbose);
    }

    #[test]
    fn parse_options_all() {
        let config = config(&[
            "--classes",
            "c.xml",
            "-c",
            "out",
            "--classpath",
            "lib",
            "--persistence-xml",
            "/conf/persistence.xml",
            "--orm-xml",
            "a.xml, b.xml",
            "--emit",
            "access",
            "-v",
        ]);

        assert_eq!(vec!["out", "lib"], config.classpath);
        assert_eq!("/conf/persistence.xml", config.options.persistence_xml);
        assert_eq!(vec!["a.xml", "b.xml"], config.options.orm_xml);
        assert_eq!(Emit::Access, config.emit);
        assert!(config.verbose);
    }

    #[test]
    fn emits_descriptors_and_sorted_access_table() {
        let mut decl =
            ClassDeclaration::new(DeclKind::Entity { name: None }, "p.B");
        decl.attributes.push(AttributeDecl {
            kind: AttributeKind::Id,
            name: "id".into(),
            access: None,
        });

        let mut ctx = Context::<()>::new();
        ctx.add_access_info(AccessTypeInfo::new("p.B", None, AccessType::Field));
        ctx.add_access_info(AccessTypeInfo::new(
            "p.A",
            None,
            AccessType::Property,
        ));
        ctx.register(ClassDescriptor::new(
            AccessTypeInfo::new("p.B", None, AccessType::Field),
            (),
            decl,
        ));

        let mut out = Vec::new();
        emit(&mut out, &ctx, Emit::Descriptors).unwrap();
        assert_eq!("entity p.B FIELD (1 members)\n", String::from_utf8(out).unwrap());

        let mut out = Vec::new();
        emit(&mut out, &ctx, Emit::Access).unwrap();
        assert_eq!(
            "p.A PROPERTY\np.B FIELD\n",
            String::from_utf8(out).unwrap()
        );
    }
}
