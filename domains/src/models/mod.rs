pub mod spotify_tokens;
