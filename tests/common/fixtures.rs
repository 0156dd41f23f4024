//! Test fixture creation for the analysis data directory and frontend
//!
//! The data directory is populated with hand-written JSON files covering the
//! interesting combinations: both analyses present, lyrics-only, audio-only,
//! artist reconciliation, and a malformed file.

use anyhow::Result;
use serde_json::json;
use std::fs;
use tempfile::TempDir;

/// Creates a temporary analysis data directory with five listable songs
/// (see `constants`), one malformed audio file and one unrelated file.
pub fn create_test_data_dir() -> Result<TempDir> {
    let dir = TempDir::new()?;
    let path = dir.path();

    fs::write(
        path.join("Fly_Me_To_The_Moon_audio.json"),
        serde_json::to_string_pretty(&json!({
            "song_title": "Fly Me To The Moon",
            "artist": "Frank Sinatra",
            "overall_va": { "valence": 0.71, "arousal": 0.43 },
            "time_series_va": [
                { "timestamp_ms": 0, "valence": 0.5, "arousal": 0.5 },
                { "timestamp_ms": 1500, "valence": 0.62, "arousal": 0.48 },
                { "timestamp_ms": 3000, "valence": 0.7, "arousal": 0.41 }
            ]
        }))?,
    )?;
    fs::write(
        path.join("Fly_Me_To_The_Moon_lyrics.json"),
        serde_json::to_string_pretty(&json!({
            "artist": "Frank Sinatra",
            "overall_vad": { "valence": 0.68, "arousal": 0.39, "dominance": 0.55 },
            "chunked_vad": [
                {
                    "chunk_id": 0,
                    "lyrics_text": "Fly me to the moon",
                    "valence": 0.8,
                    "arousal": 0.4,
                    "dominance": 0.6
                },
                {
                    "chunk_id": 1,
                    "lyrics_text": "Let me play among the stars",
                    "valence": 0.75,
                    "arousal": 0.45,
                    "dominance": 0.5
                }
            ]
        }))?,
    )?;

    fs::write(
        path.join("Lonely_Signal_lyrics.json"),
        serde_json::to_string_pretty(&json!({
            "artist": "Jane Doe",
            "overall_vad": { "valence": 0.2, "arousal": 0.3, "dominance": 0.25 },
            "chunked_vad": [
                {
                    "chunk_id": 0,
                    "lyrics_text": "A lonely signal in the night",
                    "valence": 0.2,
                    "arousal": 0.3,
                    "dominance": 0.25
                }
            ]
        }))?,
    )?;

    fs::write(
        path.join("Static_Hum_audio.json"),
        serde_json::to_string_pretty(&json!({
            "song_title": "Static Hum",
            "time_series_va": [
                { "timestamp_ms": 0, "valence": 0.1, "arousal": 0.9 },
                { "timestamp_ms": 2000, "valence": 0.15, "arousal": 0.85 }
            ]
        }))?,
    )?;

    fs::write(
        path.join("Midnight_Echoes_audio.json"),
        serde_json::to_string_pretty(&json!({
            "song_title": "Midnight Echoes",
            "time_series_va": [
                { "timestamp_ms": 0, "valence": 0.4, "arousal": 0.6 }
            ]
        }))?,
    )?;
    fs::write(
        path.join("Midnight_Echoes_lyrics.json"),
        serde_json::to_string_pretty(&json!({
            "artist": "Jane Doe",
            "overall_vad": { "valence": 0.35, "arousal": 0.6, "dominance": 0.4 },
            "chunked_vad": []
        }))?,
    )?;

    // Malformed on purpose: the listing and the analyze fallback must survive it.
    fs::write(path.join("Broken_Tune_audio.json"), "{ this is not json")?;
    fs::write(
        path.join("Broken_Tune_lyrics.json"),
        serde_json::to_string_pretty(&json!({
            "artist": "Ghost Writer",
            "overall_vad": { "valence": 0.5, "arousal": 0.5, "dominance": 0.5 },
            "chunked_vad": []
        }))?,
    )?;

    fs::write(path.join("notes.txt"), "not an analysis file")?;

    Ok(dir)
}

/// Creates a temporary frontend directory with an index page and one static
/// audio file, mirroring the layout the player is deployed with.
pub fn create_test_frontend_dir() -> Result<TempDir> {
    let dir = TempDir::new()?;
    let path = dir.path();

    fs::write(
        path.join("index.html"),
        "<!DOCTYPE html><html><body>vibe player</body></html>",
    )?;
    fs::create_dir_all(path.join("static/audio"))?;
    fs::write(path.join("static/audio/Static Hum.mp3"), b"fake-mp3-bytes")?;

    Ok(dir)
}
