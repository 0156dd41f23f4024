mod records;
mod song_key;

pub use records::{
    AnalysisResult, AudioAnalysis, AudioPoint, LyricsAnalysis, LyricsChunk, UNKNOWN_ARTIST,
};
pub use song_key::{key_for_title, title_for_key};
