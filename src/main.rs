use clap::{Arg, ArgAction, Command};
use ocrmd::{OcrError, Settings};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("ocrmd")
        .version(clap::crate_version!())
        .about("OCR an image via a GLM-OCR API and print the markdown")
        .arg(
            Arg::new("image")
                .help("Path to an image file (jpg, png, etc.)")
                .value_parser(clap::value_parser!(PathBuf))
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("api-url")
                .long("api-url")
                .value_name("URL")
                .help(format!("GLM-OCR API URL [default: {}]", ocrmd::DEFAULT_API_URL)),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("PATH")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Write the markdown to a file instead of stdout"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf))
                .help("TOML file overriding the built-in settings"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("Log progress to stderr (repeat for more detail)"),
        )
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::new(format!("ocrmd={level}")))
        .with_target(false)
        .init();
}

fn run(matches: &clap::ArgMatches) -> Result<(), OcrError> {
    let config_file = matches.get_one::<PathBuf>("config");
    let mut settings = Settings::new(config_file.map(PathBuf::as_path))?;
    if let Some(api_url) = matches.get_one::<String>("api-url") {
        settings = settings.with_api_url(api_url.as_str());
    }

    // required by clap
    let image = matches
        .get_one::<PathBuf>("image")
        .map(PathBuf::as_path)
        .unwrap_or(Path::new(""));

    let markdown = ocrmd::ocr(image, &settings)?;

    match matches.get_one::<PathBuf>("output") {
        Some(output_path) => {
            std::fs::write(output_path, &markdown).map_err(|source| OcrError::Write {
                path: output_path.clone(),
                source,
            })?;
            tracing::info!(path = %output_path.display(), "output written");
        }
        None => print_markdown(&mut std::io::stdout().lock(), &markdown)?,
    }
    Ok(())
}

// A closed stdout (e.g. `| head`) is reported like any other failure.
fn print_markdown(out: &mut impl Write, markdown: &str) -> Result<(), OcrError> {
    writeln!(out, "{}", markdown)
        .and_then(|_| out.flush())
        .map_err(|source| OcrError::Write {
            path: PathBuf::from("<stdout>"),
            source,
        })
}

fn main() {
    let matches = cli().get_matches();
    init_logging(matches.get_count("verbose"));

    if let Err(err) = run(&matches) {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}
