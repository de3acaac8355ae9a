//! Command-line front-end: compress a file to `<file>.huff` or restore it.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{Level, LevelFilter, Log, Metadata, Record};

const EXTENSION: &str = "huff";

const USAGE: &str = "\
Usage: huffmin [OPTIONS] <FILE>

Options:
  -d, --decompress     restore a .huff file
  -o, --output <PATH>  write to PATH instead of the derived name
  -c, --stdout         write to standard output
  -f, --force          overwrite an existing output file
  -v, --verbose        log codec details to stderr (repeat for more)
  -h, --help           print this help";

#[derive(Debug, Default)]
struct Options {
    decompress: bool,
    output: Option<PathBuf>,
    stdout: bool,
    force: bool,
    verbosity: u8,
    help: bool,
    input: Option<PathBuf>,
}

fn parse_args(args: &[String]) -> Result<Options> {
    let mut options = Options::default();
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            "-d" | "--decompress" => options.decompress = true,
            "-c" | "--stdout" => options.stdout = true,
            "-f" | "--force" => options.force = true,
            "-v" | "--verbose" => options.verbosity += 1,
            "-vv" => options.verbosity += 2,
            "-h" | "--help" => options.help = true,
            "-o" | "--output" => {
                i += 1;
                if i >= args.len() {
                    return Err(anyhow::anyhow!("--output requires a filepath"));
                }
                options.output = Some(PathBuf::from(&args[i]));
            }
            arg if arg.starts_with('-') && arg.len() > 1 => {
                anyhow::bail!("unknown option: {arg}");
            }
            arg => {
                if options.input.is_some() {
                    anyhow::bail!("only one input file is supported");
                }
                options.input = Some(PathBuf::from(arg));
            }
        }
        i += 1;
    }
    Ok(options)
}

/// `notes.txt` -> `notes.txt.huff`; `notes.txt.huff` -> `notes.txt`; `blob` -> `blob.out`.
fn output_path(input: &Path, decompress: bool) -> PathBuf {
    if !decompress {
        let mut name = input.as_os_str().to_owned();
        name.push(".");
        name.push(EXTENSION);
        return PathBuf::from(name);
    }
    match input.extension() {
        Some(ext) if ext == EXTENSION => input.with_extension(""),
        _ => {
            let mut name = input.as_os_str().to_owned();
            name.push(".out");
            PathBuf::from(name)
        }
    }
}

fn run(options: &Options) -> Result<()> {
    let input = options
        .input
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("missing input file\n\n{USAGE}"))?;

    let data = fs::read(input).with_context(|| format!("failed to read {}", input.display()))?;

    let result = if options.decompress {
        huffmin::decompress(&data)
            .with_context(|| format!("decompression of {} failed", input.display()))?
    } else {
        huffmin::compress(&data)
            .with_context(|| format!("compression of {} failed", input.display()))?
    };

    if options.stdout {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(&result).context("failed to write to stdout")?;
        return stdout.flush().context("failed to flush stdout");
    }

    let dest = options
        .output
        .clone()
        .unwrap_or_else(|| output_path(input, options.decompress));
    if dest.exists() && !options.force {
        anyhow::bail!("{} already exists (use --force to overwrite)", dest.display());
    }
    fs::write(&dest, &result).with_context(|| format!("failed to write {}", dest.display()))?;

    log::info!(
        "{} ({} bytes) -> {} ({} bytes)",
        input.display(),
        data.len(),
        dest.display(),
        result.len()
    );
    Ok(())
}

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{:<5} {}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
    log::debug!("log level {}", level.to_level().unwrap_or(Level::Warn));
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = parse_args(&args)?;

    if options.help {
        println!("{USAGE}");
        return Ok(());
    }

    init_logging(options.verbosity);
    run(&options)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_output_names() {
        assert_eq!(
            output_path(Path::new("notes.txt"), false),
            PathBuf::from("notes.txt.huff")
        );
        assert_eq!(
            output_path(Path::new("notes.txt.huff"), true),
            PathBuf::from("notes.txt")
        );
        assert_eq!(
            output_path(Path::new("blob.bin"), true),
            PathBuf::from("blob.bin.out")
        );
    }

    #[test]
    fn test_parse_flags() {
        let options = parse_args(&args(&["-d", "-f", "-v", "-o", "out.txt", "in.huff"])).unwrap();
        assert!(options.decompress);
        assert!(options.force);
        assert_eq!(options.verbosity, 1);
        assert_eq!(options.output, Some(PathBuf::from("out.txt")));
        assert_eq!(options.input, Some(PathBuf::from("in.huff")));
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_args(&args(&["-o"])).is_err());
        assert!(parse_args(&args(&["--level", "9"])).is_err());
        assert!(parse_args(&args(&["a", "b"])).is_err());
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = std::env::temp_dir().join(format!("huffmin-cli-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let original = dir.join("sample.txt");
        let text = b"hello world! hello world! hello world! hello world!";
        fs::write(&original, text).unwrap();

        let compress = Options {
            input: Some(original.clone()),
            force: true,
            ..Options::default()
        };
        run(&compress).unwrap();
        let packed = dir.join("sample.txt.huff");
        assert!(packed.exists());

        let restored = dir.join("restored.txt");
        let decompress = Options {
            decompress: true,
            input: Some(packed.clone()),
            output: Some(restored.clone()),
            ..Options::default()
        };
        run(&decompress).unwrap();
        assert_eq!(fs::read(&restored).unwrap(), text.to_vec());

        // refuses to clobber without --force
        assert!(run(&decompress).is_err());

        fs::remove_dir_all(&dir).unwrap();
    }
}
