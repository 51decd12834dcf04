use std::cell::RefCell;
use std::fs;
use std::io::{self, Cursor};
use std::path::{Path, PathBuf};

use coefont::{CoeFontClient, Rejection, SynthesisError};
use httpmock::Method::{GET, POST};
use httpmock::{Mock, MockServer};
use serde_json::json;
use tarako::{App, AppError, Command, PlaybackError, Player, Reporter};

const WAV: &[u8] = b"RIFF\x24\x00\x00\x00WAVEfmt fake audio";

#[derive(Default)]
struct RecordingReporter {
    lines: RefCell<Vec<String>>,
}

impl Reporter for RecordingReporter {
    fn status(&self, line: &str) {
        self.lines.borrow_mut().push(line.to_string());
    }

    fn error(&self, line: &str) {
        self.lines.borrow_mut().push(format!("error: {line}"));
    }
}

impl RecordingReporter {
    fn contains(&self, needle: &str) -> bool {
        self.lines.borrow().iter().any(|l| l.contains(needle))
    }
}

/// Remembers each file it was asked to play along with its contents.
#[derive(Default)]
struct FakePlayer {
    fail: bool,
    played: RefCell<Vec<(PathBuf, Vec<u8>)>>,
}

impl Player for FakePlayer {
    fn play(&self, path: &Path) -> Result<(), PlaybackError> {
        let open_err = |source| PlaybackError::Open {
            path: path.to_path_buf(),
            source,
        };
        let bytes = fs::read(path).map_err(open_err)?;
        self.played.borrow_mut().push((path.to_path_buf(), bytes));
        if self.fail {
            return Err(open_err(io::Error::new(
                io::ErrorKind::Other,
                "no audio device",
            )));
        }
        Ok(())
    }
}

fn app(server: &MockServer, player: FakePlayer) -> App<RecordingReporter, FakePlayer> {
    let client = CoeFontClient::new(server.base_url()).unwrap();
    App::new(client, RecordingReporter::default(), player)
}

async fn mock_submit_ok<'a>(server: &'a MockServer, text: &str) -> Mock<'a> {
    let text = text.to_string();
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/hiroyuki/text2speech")
                .json_body_partial(json!({ "text": text }).to_string());
            then.status(200)
                .json_body(json!({"statusCode": 200, "body": {"success": true, "wav_key": "abc"}}));
        })
        .await
}

async fn mock_fetch<'a>(server: &'a MockServer, status: u16) -> Mock<'a> {
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/chore/get_presigned_url")
                .query_param("wav_key", "abc");
            then.status(status).body(WAV);
        })
        .await
}

#[tokio::test]
async fn save_writes_audio_file() {
    let server = MockServer::start_async().await;
    let submit = mock_submit_ok(&server, "hello").await;
    let fetch = mock_fetch(&server, 200).await;
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("nested/dir/out.wav");

    let app = app(&server, FakePlayer::default());
    let mut stdout = Vec::new();
    app.run(
        Command::Save {
            input: " hello\n".into(),
            output: out.to_str().unwrap().into(),
        },
        Cursor::new(Vec::new()),
        &mut stdout,
    )
    .await
    .unwrap();

    submit.assert_async().await;
    fetch.assert_async().await;
    assert_eq!(fs::read(&out).unwrap(), WAV);
    assert!(stdout.is_empty());
    assert!(app.reporter().contains("📋 Text: hello"));
    assert!(app.reporter().contains(&out.display().to_string()));
}

#[tokio::test]
async fn save_to_stdout_skips_filesystem() {
    let server = MockServer::start_async().await;
    mock_submit_ok(&server, "from stdin").await;
    mock_fetch(&server, 200).await;
    let dir = tempfile::tempdir().unwrap();
    let before = fs::read_dir(dir.path()).unwrap().count();

    let app = app(&server, FakePlayer::default());
    let mut stdout = Vec::new();
    app.save("-", "-", Cursor::new(b"from stdin\n".to_vec()), &mut stdout)
        .await
        .unwrap();

    assert_eq!(stdout, WAV);
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), before);
    assert!(app.reporter().contains("standard output"));
}

#[tokio::test]
async fn failed_download_removes_output_file() {
    let server = MockServer::start_async().await;
    mock_submit_ok(&server, "hello").await;
    mock_fetch(&server, 503).await;
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.wav");

    let app = app(&server, FakePlayer::default());
    let err = app
        .save("hello", out.to_str().unwrap(), Cursor::new(Vec::new()), &mut Vec::new())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AppError::Synthesis(SynthesisError::DownloadFailed { status: 503 })
    ));
    assert_eq!(err.exit_code(), 1);
    assert!(!out.exists());
}

#[tokio::test]
async fn forbidden_word_never_fetches() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/hiroyuki/text2speech");
            then.status(200)
                .json_body(json!({"statusCode": 400, "body": {"success": false, "ng_word": "X"}}));
        })
        .await;
    let fetch = mock_fetch(&server, 200).await;
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.wav");

    let app = app(&server, FakePlayer::default());
    let err = app
        .save("X", out.to_str().unwrap(), Cursor::new(Vec::new()), &mut Vec::new())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AppError::Synthesis(SynthesisError::Rejected(Rejection::ForbiddenWord { .. }))
    ));
    assert!(err.to_string().contains("\"X\""));
    fetch.assert_hits_async(0).await;
    assert!(!out.exists());
}

#[tokio::test]
async fn directory_destination_is_rejected_before_network() {
    let server = MockServer::start_async().await;
    let submit = mock_submit_ok(&server, "hello").await;
    let dir = tempfile::tempdir().unwrap();

    let app = app(&server, FakePlayer::default());
    let err = app
        .save("hello", dir.path().to_str().unwrap(), Cursor::new(Vec::new()), &mut Vec::new())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::InvalidDestination(_)));
    submit.assert_hits_async(0).await;
    assert!(dir.path().is_dir());
}

#[tokio::test]
async fn unopenable_output_is_rejected_before_network() {
    let server = MockServer::start_async().await;
    let submit = mock_submit_ok(&server, "hello").await;
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("file.txt");
    fs::write(&blocker, "plain file").unwrap();
    let out = blocker.join("out.wav");

    let app = app(&server, FakePlayer::default());
    let err = app
        .save("hello", out.to_str().unwrap(), Cursor::new(Vec::new()), &mut Vec::new())
        .await
        .unwrap_err();

    match &err {
        AppError::SinkOpen { path, .. } => assert_eq!(path, &out),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.exit_code(), 1);
    assert!(err.to_string().contains("out.wav"));
    submit.assert_hits_async(0).await;
    assert!(blocker.is_file());
}

#[tokio::test]
async fn decoding_error_is_reported_before_destination() {
    let server = MockServer::start_async().await;
    let dir = tempfile::tempdir().unwrap();
    let stdin = Cursor::new(vec![0xFF, 0xFE, 0x61, 0x00, 0x41]);

    let app = app(&server, FakePlayer::default());
    let err = app
        .save("-", dir.path().to_str().unwrap(), stdin, &mut Vec::new())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Decoding(_)));
}

#[tokio::test]
async fn play_hands_temp_file_to_player_then_deletes_it() {
    let server = MockServer::start_async().await;
    mock_submit_ok(&server, "hello").await;
    mock_fetch(&server, 200).await;

    let app = app(&server, FakePlayer::default());
    app.run(
        Command::Play {
            input: "hello".into(),
        },
        Cursor::new(Vec::new()),
        &mut io::sink(),
    )
    .await
    .unwrap();

    let played = app.player().played.borrow();
    assert_eq!(played.len(), 1);
    let (path, bytes) = &played[0];
    assert_eq!(bytes.as_slice(), WAV);
    assert_eq!(path.extension().and_then(|e| e.to_str()), Some("wav"));
    assert!(!path.exists());
    assert!(app.reporter().contains("Played"));
}

#[tokio::test]
async fn play_deletes_temp_file_when_playback_fails() {
    let server = MockServer::start_async().await;
    mock_submit_ok(&server, "hello").await;
    mock_fetch(&server, 200).await;

    let player = FakePlayer {
        fail: true,
        ..FakePlayer::default()
    };
    let app = app(&server, player);
    let err = app.play("hello", Cursor::new(Vec::new())).await.unwrap_err();

    assert!(matches!(err, AppError::Playback(_)));
    let played = app.player().played.borrow();
    assert_eq!(played.len(), 1);
    assert!(!played[0].0.exists());
}

#[tokio::test]
async fn play_skips_player_when_synthesis_fails() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/hiroyuki/text2speech");
            then.status(500);
        })
        .await;

    let app = app(&server, FakePlayer::default());
    let err = app.play("hello", Cursor::new(Vec::new())).await.unwrap_err();

    assert!(matches!(
        err,
        AppError::Synthesis(SynthesisError::Rejected(Rejection::ServerError { status: 500 }))
    ));
    assert!(app.player().played.borrow().is_empty());
}
