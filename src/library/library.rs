use crate::analysis::{
    key_for_title, title_for_key, AnalysisResult, AudioAnalysis, LyricsAnalysis, UNKNOWN_ARTIST,
};
use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

const AUDIO_SUFFIX: &str = "_audio.json";
const LYRICS_SUFFIX: &str = "_lyrics.json";

/// Non-fatal issues found while scanning the data directory.
#[derive(Debug, Clone, PartialEq)]
pub enum Problem {
    UnreadableFile(String),
    MalformedJson(String),
}

/// One row of the song listing.
#[derive(Clone, Serialize, Debug, PartialEq)]
pub struct SongEntry {
    pub title: String,
    pub artist: String,
}

#[derive(Debug)]
pub struct ScanResult {
    pub songs: Vec<SongEntry>,
    pub problems: Vec<Problem>,
}

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("Analysis data for '{0}' not found (neither audio nor lyrics).")]
    NotFound(String),
}

/// The analysis library: a directory of `<key>_audio.json` / `<key>_lyrics.json`
/// files, scanned on demand. The library itself holds no parsed state, so new
/// files dropped into the directory show up on the next request.
#[derive(Debug, Clone)]
pub struct Library {
    data_dir: PathBuf,
}

impl Library {
    pub fn open(data_dir: &Path) -> Result<Library> {
        if !data_dir.is_dir() {
            bail!("{} is not a valid directory.", data_dir.display());
        }
        Ok(Library {
            data_dir: data_dir.to_owned(),
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn audio_path(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{key}{AUDIO_SUFFIX}"))
    }

    fn lyrics_path(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{key}{LYRICS_SUFFIX}"))
    }

    /// Scans the data directory and builds one listing entry per song key.
    ///
    /// A song appears once at least one of its files parses as JSON; the entry
    /// title/artist start from the file name and are overridden by top-level
    /// `song_title` / `artist` string fields found in either file. Unparseable
    /// files are reported as problems and skipped, other files are ignored.
    pub fn scan(&self) -> Result<ScanResult> {
        let mut songs: BTreeMap<String, SongEntry> = BTreeMap::new();
        let mut problems = Vec::new();

        let dir_entries = std::fs::read_dir(&self.data_dir).with_context(|| {
            format!("Failed to read data directory {}", self.data_dir.display())
        })?;

        for dir_entry in dir_entries {
            let path = match dir_entry {
                Ok(entry) => entry.path(),
                Err(_) => continue,
            };
            let filename = match path.file_name() {
                Some(name) => name.to_string_lossy().into_owned(),
                None => continue,
            };
            let key = match strip_analysis_suffix(&filename) {
                Some(key) => key.to_owned(),
                None => continue,
            };

            let text = match std::fs::read_to_string(&path) {
                Ok(text) => text,
                Err(err) => {
                    warn!("Could not read {}: {}", path.display(), err);
                    problems.push(Problem::UnreadableFile(filename));
                    continue;
                }
            };
            let value: serde_json::Value = match serde_json::from_str(&text) {
                Ok(value) => value,
                Err(err) => {
                    warn!("Error decoding JSON for {}: {}", filename, err);
                    problems.push(Problem::MalformedJson(filename));
                    continue;
                }
            };

            let entry = songs.entry(key.clone()).or_insert_with(|| SongEntry {
                title: title_for_key(&key),
                artist: UNKNOWN_ARTIST.to_owned(),
            });
            if let Some(title) = value.get("song_title").and_then(|v| v.as_str()) {
                entry.title = title.to_owned();
            }
            if let Some(artist) = value.get("artist").and_then(|v| v.as_str()) {
                entry.artist = artist.to_owned();
            }
        }

        Ok(ScanResult {
            songs: songs.into_values().collect(),
            problems,
        })
    }

    /// Looks up both analysis files for a song and combines them.
    ///
    /// Either file may be missing or unparseable without failing the other; the
    /// lookup only errors when no usable data is left at all.
    pub fn analyze(&self, song_title: &str) -> Result<AnalysisResult, LibraryError> {
        let key = key_for_title(song_title);

        let audio: Option<AudioAnalysis> = read_record(&self.audio_path(&key));
        let lyrics: Option<LyricsAnalysis> = read_record(&self.lyrics_path(&key));

        if audio.is_none() && lyrics.is_none() {
            return Err(LibraryError::NotFound(song_title.to_owned()));
        }

        let mut title = key.replace('_', " ");
        let mut artist = UNKNOWN_ARTIST.to_owned();

        if let Some(audio) = &audio {
            title = audio.song_title.clone();
            if let Some(audio_artist) = present_artist(audio.artist.as_deref()) {
                artist = audio_artist.to_owned();
            }
        }
        if let Some(lyrics) = &lyrics {
            if artist == UNKNOWN_ARTIST {
                if let Some(lyrics_artist) = present_artist(Some(&lyrics.artist)) {
                    artist = lyrics_artist.to_owned();
                }
            }
        }

        // The player resolves the audio file against the static mount, keyed by
        // the title exactly as it was requested.
        let audio_path = audio
            .as_ref()
            .map(|_| format!("/static/audio/{song_title}.mp3"));

        Ok(AnalysisResult {
            song_title: title,
            artist,
            audio_path,
            lyrics_analysis: lyrics,
            audio_analysis: audio,
        })
    }
}

fn strip_analysis_suffix(filename: &str) -> Option<&str> {
    filename
        .strip_suffix(AUDIO_SUFFIX)
        .or_else(|| filename.strip_suffix(LYRICS_SUFFIX))
}

/// An artist value counts only when it is set and non-empty.
fn present_artist(artist: Option<&str>) -> Option<&str> {
    artist.filter(|artist| !artist.is_empty())
}

fn read_record<T: serde::de::DeserializeOwned>(path: &Path) -> Option<T> {
    if !path.exists() {
        return None;
    }
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            warn!("Could not read {}: {}", path.display(), err);
            return None;
        }
    };
    match serde_json::from_str(&text) {
        Ok(record) => Some(record),
        Err(err) => {
            warn!("Could not parse {}: {}", path.display(), err);
            None
        }
    }
}
