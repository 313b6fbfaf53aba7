use backdrop::config::{self, Config};
use backdrop::import::{ImageImporter, ImageSelection};
use backdrop::state::library::Library;
use backdrop::state::store::ThemeStore;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
Usage: backdrop [--config <file>] <command>

Commands:
  import <file>         Copy an image into the image directory and use it as the theme background
  list                  List images in the image directory
  theme                 Print the current theme
  resolve <identifier>  Print the full path of an image identifier
";

/// What the user asked for
#[derive(Debug)]
enum Command {
    Import(PathBuf),
    List,
    Theme,
    Resolve(String),
}

#[derive(Debug)]
struct Args {
    config_path: Option<PathBuf>,
    command: Command,
}

fn parse_args(raw: Vec<OsString>) -> Result<Args, String> {
    let mut args = pico_args::Arguments::from_vec(raw);

    let config_path: Option<PathBuf> = args
        .opt_value_from_os_str("--config", |s| Ok::<_, String>(PathBuf::from(s)))
        .map_err(|e| e.to_string())?;

    let subcommand = args.subcommand().map_err(|e| e.to_string())?;
    let command = match subcommand.as_deref() {
        Some("import") => Command::Import(
            args.free_from_os_str(|s| Ok::<_, String>(PathBuf::from(s)))
                .map_err(|e| e.to_string())?,
        ),
        Some("list") => Command::List,
        Some("theme") => Command::Theme,
        Some("resolve") => {
            Command::Resolve(args.free_from_str().map_err(|e: pico_args::Error| e.to_string())?)
        }
        Some(other) => return Err(format!("unknown command '{other}'")),
        None => return Err("missing command".to_string()),
    };

    let rest = args.finish();
    if !rest.is_empty() {
        return Err(format!("unexpected arguments: {rest:?}"));
    }

    Ok(Args {
        config_path,
        command,
    })
}

fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_deref().unwrap_or("info")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(command: Command, config: &Config) -> backdrop::Result<()> {
    match command {
        Command::Import(source) => {
            let importer = ImageImporter::open(config.image_dir()?)?;
            let store = ThemeStore::new(config.theme_file()?);
            let mut theme = store.load()?;

            let mut selection =
                ImageSelection::with_location(theme.background_image().map(str::to_string));
            let imported = selection
                .select_async(&importer, source, |location| {
                    theme = theme.with_background_image(location);
                })
                .await?;

            store.save(&theme)?;
            info!("🎨 Theme background set to {}", imported.identifier);
            println!("{}", imported.identifier);
        }
        Command::List => {
            let library = Library::new(config.image_dir()?);
            let images = library.images();
            for image in &images {
                match image.dimensions {
                    Some((width, height)) => {
                        println!("{}  {}x{}", image.identifier, width, height)
                    }
                    None => println!("{}  ?", image.identifier),
                }
            }
            info!("📊 {} images in {}", images.len(), library.root().display());
        }
        Command::Theme => {
            let theme = ThemeStore::new(config.theme_file()?).load()?;
            println!("{}", theme.to_json()?);
        }
        Command::Resolve(identifier) => {
            let importer = ImageImporter::open(config.image_dir()?)?;
            println!("{}", importer.resolve(&identifier)?.display());
        }
    }

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let raw: Vec<OsString> = std::env::args_os().skip(1).collect();
    if raw.iter().any(|a| a == "-h" || a == "--help") {
        print!("{USAGE}");
        return ExitCode::SUCCESS;
    }

    let args = match parse_args(raw) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("error: {e}\n\n{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    // Settings first, so the log level can come from them
    let loaded = match &args.config_path {
        Some(path) => config::load_from_path(path),
        None => config::load(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {e}");
            return ExitCode::FAILURE;
        }
    };
    init_logging(&config);

    match run(args.command, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("❌ {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, String> {
        parse_args(args.iter().map(OsString::from).collect())
    }

    #[test]
    fn test_parse_import_with_config() {
        let args = parse(&["--config", "/etc/backdrop.toml", "import", "photo.jpg"]).unwrap();

        assert_eq!(args.config_path, Some(PathBuf::from("/etc/backdrop.toml")));
        assert!(matches!(args.command, Command::Import(ref p) if p == &PathBuf::from("photo.jpg")));
    }

    #[test]
    fn test_parse_resolve() {
        let args = parse(&["resolve", "easter/lilies.png"]).unwrap();
        assert!(matches!(args.command, Command::Resolve(ref id) if id == "easter/lilies.png"));
    }

    #[test]
    fn test_parse_rejects_unknown_and_missing() {
        assert!(parse(&["paint"]).is_err());
        assert!(parse(&[]).is_err());
        assert!(parse(&["import"]).is_err());
        assert!(parse(&["list", "extra"]).is_err());
    }
}
