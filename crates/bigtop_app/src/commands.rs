//! Command implementations.
//!
//! Each command reads one log file, hands its text to `bigtop_core`, and
//! prints the result as JSON on stdout.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use bigtop_core::keyframes::{Episode, ParseOptions};
use serde::Serialize;

use crate::config::{OutputSettings, Settings};

/// One row of the `chapters` output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChapterRow {
    /// Chapter number.
    pub chapter: usize,
    /// First frame of the chapter.
    pub start: usize,
    /// False when `start` lies past the last frame.
    pub playable: bool,
}

/// Read and parse a log file.
pub fn load_episode(path: &Path, options: &ParseOptions) -> Result<Episode> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read log file '{}'", path.display()))?;

    let episode = Episode::from_content(&content, options)
        .with_context(|| format!("Failed to parse '{}'", path.display()))?;

    tracing::info!(
        "Loaded {} keyframes in {} chapters from {}",
        episode.len(),
        episode.chapters.len(),
        path.display()
    );

    Ok(episode)
}

/// Chapter rows for an episode.
pub fn chapter_rows(episode: &Episode) -> Vec<ChapterRow> {
    let index = episode.chapter_index();
    index
        .boundaries()
        .iter()
        .enumerate()
        .map(|(chapter, &start)| ChapterRow {
            chapter,
            start,
            playable: index.is_playable(chapter),
        })
        .collect()
}

/// `parse`: print the whole episode.
pub fn parse(path: &Path, settings: &Settings) -> Result<()> {
    let episode = load_episode(path, &settings.parser.parse_options())?;
    let json = episode
        .to_json(settings.output.pretty)
        .context("Failed to serialize episode")?;
    println!("{}", json);
    Ok(())
}

/// `chapters`: print chapter boundaries.
pub fn chapters(path: &Path, settings: &Settings) -> Result<()> {
    let episode = load_episode(path, &settings.parser.parse_options())?;
    print_json(&chapter_rows(&episode), &settings.output)
}

/// `summary`: print frame, chapter, reward and action counts.
pub fn summary(path: &Path, settings: &Settings) -> Result<()> {
    let episode = load_episode(path, &settings.parser.parse_options())?;
    print_json(&episode.summary(), &settings.output)
}

fn print_json<T: Serialize>(value: &T, output: &OutputSettings) -> Result<()> {
    let json = if output.pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigtop_core::keyframes::ErrorKind;
    use tempfile::NamedTempFile;
    use std::io::Write;

    const LOG: &str = "new state,previous state,action,reward\n\
        [0 0 0 0],[0 0 0 0],0,0.000000\n\
        [0.1 0 0 0],[0 0 0 0],1,-1.000000\n";

    fn write_log(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_episode_from_file() {
        let file = write_log(LOG);
        let episode = load_episode(file.path(), &ParseOptions::default()).unwrap();
        assert_eq!(episode.len(), 2);
        assert_eq!(episode.chapters, vec![0, 2]);
    }

    #[test]
    fn chapter_rows_mark_past_the_end() {
        let file = write_log(LOG);
        let episode = load_episode(file.path(), &ParseOptions::default()).unwrap();
        assert_eq!(
            chapter_rows(&episode),
            vec![
                ChapterRow {
                    chapter: 0,
                    start: 0,
                    playable: true
                },
                ChapterRow {
                    chapter: 1,
                    start: 2,
                    playable: false
                },
            ]
        );
    }

    #[test]
    fn parse_errors_keep_their_kind() {
        let file = write_log("[0 0 0 0],[0 0 0 0],0,0\n");
        let err = load_episode(file.path(), &ParseOptions::default()).unwrap_err();

        let parse_err = err
            .downcast_ref::<bigtop_core::keyframes::ParseError>()
            .unwrap();
        assert_eq!(parse_err.kind(), ErrorKind::Header);
        assert!(format!("{:#}", err).contains("Failed to parse"));
    }

    #[test]
    fn missing_file_is_reported() {
        let err = load_episode(Path::new("/nonexistent/run.csv"), &ParseOptions::default())
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read log file"));
    }
}
