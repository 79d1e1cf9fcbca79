//! slidegen CLI - slide deck layout compiler

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use slidegen::encode::encode_deck;
use slidegen::plan::Severity;
use slidegen::{
    write_artifact, CompileOptions, Deck, DeckCompiler, Error, JsonEncoder, JsonFormat,
    Presentation, Theme,
};

#[derive(Parser)]
#[command(name = "slidegen")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Compile JSON slide decks into positioned emission plans", long_about = None)]
struct Cli {
    /// Input deck description (JSON)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a deck and write its emission plan as JSON
    Plan {
        /// Input deck description
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Override the document theme
        #[arg(long, env = "SLIDEGEN_THEME")]
        theme: Option<String>,
    },

    /// Show deck information
    Info {
        /// Input deck description
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Validate a deck and report every diagnostic
    Check {
        /// Input deck description
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Fail on the first page that cannot be compiled
        #[arg(long)]
        strict: bool,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Plan {
            input,
            output,
            compact,
            theme,
        }) => cmd_plan(&input, output.as_deref(), compact, theme.as_deref()),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Check { input, strict }) => cmd_check(&input, strict),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: write the plan next to the input
            if let Some(input) = cli.input {
                cmd_build(&input, cli.output.as_deref())
            } else {
                println!("{}", "Usage: slidegen <FILE> [OUTPUT]".yellow());
                println!("       slidegen --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn parse_theme(name: Option<&str>) -> Result<Option<Theme>, Error> {
    match name {
        None => Ok(None),
        Some(name) => Theme::parse(name).map(Some).ok_or_else(|| {
            let known: Vec<_> = Theme::ALL.iter().map(Theme::as_str).collect();
            Error::Other(format!(
                "Unknown theme '{}' (expected one of: {})",
                name,
                known.join(", ")
            ))
        }),
    }
}

/// Compile page by page behind a progress bar.
fn compile_with_progress(compiler: &DeckCompiler<'_>) -> Deck {
    let pb = ProgressBar::new(compiler.page_count() as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
    {
        pb.set_style(style.progress_chars("#>-"));
    }

    let deck = compiler.compile_with(|index, result| {
        if result.slide.is_failed() {
            pb.println(format!("{} slide {} failed", "!".yellow(), index + 1));
        }
        pb.set_message(format!("Compiled slide {}", index + 1));
        pb.inc(1);
    });
    pb.finish_and_clear();
    deck
}

/// Parse a deck, naming it in the error when it cannot be used.
fn load(input: &Path) -> Result<Presentation, Box<dyn std::error::Error>> {
    let json = fs::read_to_string(input)?;
    Presentation::from_json_str(&json).map_err(|e| {
        format!(
            "Cannot compile '{}' ({}): {}",
            Presentation::extract_title(&json),
            input.display(),
            e
        )
        .into()
    })
}

fn cmd_build(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = output.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        input
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    });

    let presentation = load(input)?;
    let compiler = DeckCompiler::new(&presentation, CompileOptions::new());
    let deck = compile_with_progress(&compiler);

    let mut encoder = JsonEncoder::default();
    let generated = encode_deck(deck, &mut encoder)?;
    let path = write_artifact(&output_dir, &generated.file_name, &generated.bytes)?;

    if let Some(ref fatal) = generated.fatal {
        println!("{} {}", "Encoder failed, wrote error deck:".yellow(), fatal);
    }
    print_summary(&generated.deck);
    println!("{} {}", "Saved to".green(), path.display());

    Ok(())
}

fn cmd_plan(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    theme: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut options = CompileOptions::new();
    if let Some(theme) = parse_theme(theme)? {
        options = options.with_theme(theme);
    }

    let presentation = load(input)?;
    let compiler = DeckCompiler::new(&presentation, options);
    let deck = if output.is_some() {
        compile_with_progress(&compiler)
    } else {
        compiler.compile()
    };

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let json = slidegen::to_json(&deck, format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        print_summary(&deck);
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let presentation = load(input)?;
    let meta = &presentation.metadata;
    let compiler = DeckCompiler::new(&presentation, CompileOptions::new());

    println!("{}", "Deck Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!(
        "{}: {}",
        "Title".bold(),
        meta.display_title().unwrap_or("(untitled)")
    );
    if !meta.author.is_empty() {
        println!("{}: {}", "Author".bold(), meta.author);
    }
    if let Some(ref company) = meta.company {
        println!("{}: {}", "Company".bold(), company);
    }
    if let Some(ref department) = meta.department {
        println!("{}: {}", "Department".bold(), department);
    }
    match (meta.parsed_date(), meta.date.as_deref()) {
        (Some(date), _) => println!("{}: {}", "Date".bold(), date.format("%B %-d, %Y")),
        (None, Some(raw)) => println!("{}: {}", "Date".bold(), raw),
        _ => {}
    }
    if let Some(ref language) = meta.language {
        println!("{}: {}", "Language".bold(), language);
    }
    println!("{}: {}", "Theme".bold(), compiler.theme());

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let items: usize = presentation.pages.iter().map(|p| p.content.len()).sum();
    println!("{}: {}", "Pages".bold(), presentation.page_count());
    println!("{}: {}", "Content items".bold(), items);
    println!("{}: {}", "Components".bold(), presentation.components.len());

    if !presentation.sections.is_empty() {
        println!();
        println!("{}", "Sections".cyan().bold());
        println!("{}", "─".repeat(40).dimmed());
        for section in &presentation.sections {
            let pages = presentation.pages_in_section(&section.title).count();
            println!("  {} ({} pages)", section.title.bold(), pages);
            if let Some(ref description) = section.description {
                println!("    {}", description.dimmed());
            }
        }
    }

    Ok(())
}

fn cmd_check(input: &Path, strict: bool) -> Result<(), Box<dyn std::error::Error>> {
    let presentation = load(input)?;
    presentation.validate()?;

    let options = if strict {
        CompileOptions::new().strict()
    } else {
        CompileOptions::new()
    };
    let deck = DeckCompiler::new(&presentation, options).try_compile()?;

    for diagnostic in &deck.diagnostics {
        let label = match diagnostic.severity {
            Severity::Info => "info".normal(),
            Severity::Warning => "warning".yellow(),
            Severity::Error => "error".red().bold(),
        };
        let location = match (diagnostic.page, diagnostic.item) {
            (Some(page), Some(item)) => format!("slide {}, item {}", page, item + 1),
            (Some(page), None) => format!("slide {}", page),
            _ => "deck".to_string(),
        };
        println!("{} [{}] {}", label, location.dimmed(), diagnostic.message);
    }

    print_summary(&deck);

    let failed = deck.failed_slides().count();
    if failed > 0 {
        return Err(format!("{} of {} slides failed", failed, deck.slide_count()).into());
    }
    println!("{}", "OK".green().bold());
    Ok(())
}

fn print_summary(deck: &Deck) {
    let (mut rendered, mut recovered, mut skipped, mut failed) = (0, 0, 0, 0);
    for slide in &deck.slides {
        let counts = slide.outcome_counts();
        rendered += counts.0;
        recovered += counts.1;
        skipped += counts.2;
        failed += counts.3;
    }

    println!(
        "{} {} slides ({} failed)",
        "Compiled".green().bold(),
        deck.slide_count(),
        deck.failed_slides().count()
    );
    println!(
        "  {} {} rendered, {} recovered, {} skipped, {} failed",
        "└─".dimmed(),
        rendered,
        recovered,
        skipped,
        failed
    );
}

fn cmd_version() {
    println!("{} {}", "slidegen".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Slide deck layout compiler");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/slidegen".dimmed());
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;

    const DECK: &str = r#"{"presentation": {
        "metadata": {"title": "CLI Deck", "author": "Ann", "date": "2024-05-01"},
        "sections": [{"title": "Intro"}],
        "pages": [
            {"title": "One", "section": "Intro", "content": [{"type": "text", "content": {"text": "hi"}}]},
            {"title": "Two", "layout": "grid", "content": [
                {"type": "text", "content": {"text": "x", "gridArea": {"columnStart": 0, "columnEnd": 1, "rowStart": 1, "rowEnd": 1}}}
            ]}
        ]
    }}"#;

    fn write_deck(dir: &Path) -> PathBuf {
        let path = dir.join("deck.json");
        fs::write(&path, DECK).unwrap();
        path
    }

    #[test]
    fn test_parse_theme() {
        assert_eq!(parse_theme(None).unwrap(), None);
        assert_eq!(parse_theme(Some("Dark")).unwrap(), Some(Theme::Dark));
        assert!(matches!(parse_theme(Some("neon")), Err(Error::Other(_))));
    }

    #[test]
    fn test_plan_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_deck(dir.path());
        let output = dir.path().join("plan.json");

        cmd_plan(&input, Some(&output), true, Some("corporate")).unwrap();

        let deck: Deck = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(deck.slide_count(), 2);
        assert_eq!(deck.info.theme, Theme::Corporate);
        assert_eq!(deck.failed_slides().count(), 1);
    }

    #[test]
    fn test_build_writes_named_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_deck(dir.path());
        let out_dir = dir.path().join("out");

        cmd_build(&input, Some(&out_dir)).unwrap();
        assert!(out_dir.join("CLI Deck.json").exists());
    }

    #[test]
    fn test_load_names_broken_deck() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("broken.json");
        fs::write(
            &input,
            r#"{"presentation": {"metadata": {"title": "Roadmap"}, "pages": 3}}"#,
        )
        .unwrap();

        let err = load(&input).unwrap_err().to_string();
        assert!(err.starts_with("Cannot compile 'Roadmap'"), "{err}");
        assert!(cmd_info(&input).is_err());
    }

    #[test]
    fn test_check_reports_failed_slides() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_deck(dir.path());

        assert!(cmd_check(&input, false).is_err());
        assert!(cmd_check(&input, true).is_err());
        assert!(cmd_info(&input).is_ok());
    }
}
