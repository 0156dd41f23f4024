use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Artist name used whenever no analysis file names one.
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

fn default_artist() -> Option<String> {
    Some(UNKNOWN_ARTIST.to_owned())
}

/// A single valence/arousal sample along the audio timeline.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct AudioPoint {
    pub timestamp_ms: i64,
    pub valence: f64,
    pub arousal: f64,
}

/// Audio-derived emotion analysis for one song.
///
/// `artist` defaults to "Unknown Artist" when the field is missing, but an
/// explicit `null` on disk stays `None`.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct AudioAnalysis {
    pub song_title: String,
    #[serde(default = "default_artist")]
    pub artist: Option<String>,
    #[serde(default)]
    pub overall_va: Option<Map<String, Value>>,
    pub time_series_va: Vec<AudioPoint>,
}

/// One scored chunk of lyrics text.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct LyricsChunk {
    pub chunk_id: i64,
    pub lyrics_text: String,
    pub valence: f64,
    pub arousal: f64,
    pub dominance: f64,
}

/// Lyrics-derived emotion analysis for one song.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct LyricsAnalysis {
    pub artist: String,
    pub overall_vad: Map<String, Value>,
    pub chunked_vad: Vec<LyricsChunk>,
}

/// The combined per-song response: reconciled title/artist plus whichever of
/// the two analyses were found. Absent analyses serialize as explicit `null`,
/// the frontend checks for that.
#[derive(Clone, Serialize, Debug)]
pub struct AnalysisResult {
    pub song_title: String,
    pub artist: String,
    pub audio_path: Option<String>,
    pub lyrics_analysis: Option<LyricsAnalysis>,
    pub audio_analysis: Option<AudioAnalysis>,
}
