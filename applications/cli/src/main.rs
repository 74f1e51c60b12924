/// Cadence - lyrics and chapter sync for media files
use anyhow::Context;
use cadence_core::{ChapterCollection, Lyrics};
use cadence_tags::{
    adapters, EncodeOptions, MediaFile, SidecarLines, StdFs, Store, SyncConfig, SyncEngine, Target,
};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cadence")]
#[command(about = "Keep lyrics and chapters in sync across media tags", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "CADENCE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the lyrics and chapters of a file
    Show {
        /// Media file
        file: PathBuf,
        /// Print the rich JSON payloads instead of text
        #[arg(long)]
        json: bool,
    },
    /// Write lyrics and chapters from companion files into every tag
    Import {
        /// Media file
        file: PathBuf,
        /// Lyrics file (`[mm:ss.fff]text` lines or plain text)
        #[arg(long)]
        lrc: Option<PathBuf>,
        /// Chapters file (`[mm:ss.fff]title` lines)
        #[arg(long)]
        chp: Option<PathBuf>,
        /// Three-letter language code for ID3 lyric frames
        #[arg(long)]
        language: Option<String>,
    },
    /// Remove lyrics and/or chapters from every tag
    Clear {
        /// Media file
        file: PathBuf,
        /// Only remove lyrics
        #[arg(long)]
        lyrics: bool,
        /// Only remove chapters
        #[arg(long)]
        chapters: bool,
    },
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cadence_cli=info,cadence_tags=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = SyncConfig::load(cli.config.as_deref())
        .context("Failed to load configuration")?;

    match cli.command {
        Commands::Show { file, json } => show(&config, &file, json)?,
        Commands::Import {
            file,
            lrc,
            chp,
            language,
        } => import(&config, &file, lrc.as_deref(), chp.as_deref(), language)?,
        Commands::Clear {
            file,
            lyrics,
            chapters,
        } => {
            // Neither flag means both
            let both = !lyrics && !chapters;
            clear(&config, &file, lyrics || both, chapters || both)?;
        }
    }

    Ok(())
}

fn open(config: &SyncConfig, path: &Path) -> anyhow::Result<MediaFile> {
    MediaFile::open(path, &config.sidecar).with_context(|| format!("Failed to open {}", path.display()))
}

fn show(config: &SyncConfig, path: &Path, json: bool) -> anyhow::Result<()> {
    let mut file = open(config, path)?;
    let engine = SyncEngine::new(config.clone());
    let ctx = file.context();

    let lyrics = engine.read_lyrics(&file.stores(Target::Lyrics), &ctx)?;
    let chapters = engine.read_chapters(&file.stores(Target::Chapters), &ctx)?;

    if json {
        if let Some(lyrics) = &lyrics {
            println!("{}", adapters::lyrics_to_json(lyrics)?);
        }
        if let Some(chapters) = &chapters {
            println!("{}", adapters::chapters_to_json(chapters)?);
        }
        return Ok(());
    }

    println!("{} ({:?})", file.path().display(), file.kind());
    if let Some(duration) = file.duration() {
        println!("Duration: {}", cadence_core::timestamp::format_time(duration));
    }
    print_lyrics(lyrics.as_ref());
    print_chapters(chapters.as_ref());
    Ok(())
}

fn print_lyrics(lyrics: Option<&Lyrics>) {
    let Some(lyrics) = lyrics else {
        println!("No lyrics");
        return;
    };
    let kind = if lyrics.synchronized() { "synchronized" } else { "plain" };
    println!("Lyrics ({}, {} lines):", kind, lyrics.len());
    for channel in lyrics.channels() {
        if let Some(name) = channel.name() {
            println!("  # {}", name);
        }
        for entry in channel.lyrics() {
            if lyrics.synchronized() {
                println!("  {}", cadence_core::timestamp::format_line(entry.start, &entry.text));
            } else {
                println!("  {}", entry.text);
            }
        }
    }
}

fn print_chapters(chapters: Option<&ChapterCollection>) {
    let Some(chapters) = chapters else {
        println!("No chapters");
        return;
    };
    println!("Chapters ({}):", chapters.len());
    for chapter in chapters.chapters() {
        println!(
            "  {} - {}  {}",
            cadence_core::timestamp::format_time(chapter.start),
            cadence_core::timestamp::format_time(chapter.end),
            chapter.title()
        );
    }
}

/// Decode a companion file with the sidecar rules, regardless of configuration
fn read_companion<T>(
    path: &Path,
    read: impl FnOnce(&SyncEngine, &[Store<'_>]) -> cadence_core::Result<Option<T>>,
) -> anyhow::Result<Option<T>> {
    let mut lines = SidecarLines::load(&StdFs, path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    anyhow::ensure!(lines.is_present(), "{} does not exist", path.display());

    let mut config = SyncConfig::default();
    config.sidecar.read = true;
    let reader = SyncEngine::new(config);
    Ok(read(&reader, &[Store::Sidecar(&mut lines)])?)
}

fn import(
    config: &SyncConfig,
    path: &Path,
    lrc: Option<&Path>,
    chp: Option<&Path>,
    language: Option<String>,
) -> anyhow::Result<()> {
    anyhow::ensure!(lrc.is_some() || chp.is_some(), "Nothing to import, pass --lrc and/or --chp");

    let mut file = open(config, path)?;
    let ctx = file.context();
    let engine = SyncEngine::new(config.clone()).with_options(EncodeOptions { language });

    if let Some(lrc) = lrc {
        let lyrics = read_companion(lrc, |reader, stores| reader.read_lyrics(stores, &ctx))?;
        let changed = engine.write_lyrics(&mut file.stores(Target::Lyrics), lyrics.as_ref());
        tracing::info!("Lyrics from {}: changed = {}", lrc.display(), changed);
    }

    if let Some(chp) = chp {
        let chapters = read_companion(chp, |reader, stores| reader.read_chapters(stores, &ctx))?;
        let changed = engine.write_chapters(&mut file.stores(Target::Chapters), chapters.as_ref());
        tracing::info!("Chapters from {}: changed = {}", chp.display(), changed);
    }

    save(&mut file)
}

fn clear(config: &SyncConfig, path: &Path, lyrics: bool, chapters: bool) -> anyhow::Result<()> {
    let mut file = open(config, path)?;
    let engine = SyncEngine::new(config.clone());

    if lyrics {
        engine.write_lyrics(&mut file.stores(Target::Lyrics), None);
    }
    if chapters {
        engine.write_chapters(&mut file.stores(Target::Chapters), None);
    }

    save(&mut file)
}

fn save(file: &mut MediaFile) -> anyhow::Result<()> {
    if file.save()? {
        println!("Updated {}", file.path().display());
    } else {
        println!("{} already up to date", file.path().display());
    }
    Ok(())
}
