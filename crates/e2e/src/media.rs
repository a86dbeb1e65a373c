//! Conversion of captured recordings to shareable GIFs via ffmpeg

use std::path::{Path, PathBuf};

use tokio::process::Command as TokioCommand;
use tracing::debug;

use crate::error::{E2eError, E2eResult};
use crate::results::ResultCollection;

/// Frame rate used when the caller does not pick one
pub const DEFAULT_GIF_FPS: u32 = 15;

const RECORDING_EXTENSIONS: [&str; 2] = ["mp4", "webm"];

/// Whether `path` looks like a video recording that can be converted
pub fn is_recording(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| RECORDING_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// `<dir>/<stem>.gif` next to the input
pub fn gif_output_path(input: &Path) -> PathBuf {
    input.with_extension("gif")
}

/// ffmpeg arguments for a palette-optimised, looping GIF scaled to `width`
pub fn ffmpeg_args(input: &Path, output: &Path, fps: u32, width: u32) -> Vec<String> {
    vec![
        "-y".to_string(),
        "-i".to_string(),
        input.to_string_lossy().to_string(),
        "-vf".to_string(),
        format!(
            "fps={fps},scale={width}:-1:flags=lanczos,split[s0][s1];[s0]palettegen[p];[s1][p]paletteuse"
        ),
        "-loop".to_string(),
        "0".to_string(),
        output.to_string_lossy().to_string(),
    ]
}

/// Convert a recording to a GIF next to it and return the GIF path
pub async fn convert_to_gif(input: &Path, fps: Option<u32>, width: u32) -> E2eResult<PathBuf> {
    if !input.exists() {
        return Err(E2eError::Media(format!(
            "Invalid input: {} does not exist",
            input.display()
        )));
    }

    let output_path = gif_output_path(input);
    let args = ffmpeg_args(input, &output_path, fps.unwrap_or(DEFAULT_GIF_FPS), width);
    debug!("Running ffmpeg {}", args.join(" "));

    let output = TokioCommand::new("ffmpeg")
        .args(&args)
        .output()
        .await
        .map_err(|e| E2eError::Media(format!("Failed to spawn ffmpeg: {e}")))?;

    if !output.status.success() {
        return Err(E2eError::Media(format!(
            "ffmpeg exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr)
        )));
    }

    Ok(output_path)
}

/// Replace every recording in `results` with a converted GIF.
///
/// Returns how many recordings were converted.
pub async fn convert_recordings(results: &mut ResultCollection, width: u32) -> E2eResult<usize> {
    let mut converted = 0;
    for outcome in &mut results.tests {
        for media in &mut outcome.media {
            if is_recording(media) {
                let gif = convert_to_gif(media, None, width).await?;
                *media = gif;
                converted += 1;
            }
        }
    }
    Ok(converted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_recording() {
        assert!(is_recording(Path::new("/media/run.mp4")));
        assert!(is_recording(Path::new("/media/run.WEBM")));
        assert!(!is_recording(Path::new("/media/shot.png")));
        assert!(!is_recording(Path::new("/media/mp4")));
    }

    #[test]
    fn test_gif_output_path() {
        assert_eq!(
            gif_output_path(Path::new("/media/login.mp4")),
            PathBuf::from("/media/login.gif")
        );
    }

    #[test]
    fn test_ffmpeg_args() {
        let args = ffmpeg_args(Path::new("in.mp4"), Path::new("in.gif"), 15, 800);
        assert_eq!(args[..3], ["-y", "-i", "in.mp4"]);
        assert_eq!(
            args[4],
            "fps=15,scale=800:-1:flags=lanczos,split[s0][s1];[s0]palettegen[p];[s1][p]paletteuse"
        );
        assert_eq!(args[5..], ["-loop", "0", "in.gif"]);
    }

    #[tokio::test]
    async fn test_convert_recordings_leaves_screenshots() {
        let mut results = ResultCollection {
            tests: vec![crate::results::TestOutcome {
                media: vec![PathBuf::from("/media/shot.png")],
                ..crate::results::TestOutcome::new("a", crate::results::TestStatus::Pass)
            }],
        };
        assert_eq!(convert_recordings(&mut results, 800).await.unwrap(), 0);
        assert_eq!(results.tests[0].media, [PathBuf::from("/media/shot.png")]);
    }

    #[tokio::test]
    async fn test_missing_input_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = convert_to_gif(&dir.path().join("nope.mp4"), None, 800)
            .await
            .unwrap_err();
        assert!(matches!(err, E2eError::Media(ref msg) if msg.contains("Invalid input")));
    }
}
