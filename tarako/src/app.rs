//! The `save` and `play` workflows.
//!
//! Both resolve the input text first, then synthesize into a sink. `save`
//! writes to a file or stdout, `play` to a temporary WAV file handed to a
//! [`Player`]. Files created for a run that fails are removed before the
//! error is returned.

use std::io::{Read, Write};

use clap::Subcommand;
use coefont::{CoeFontClient, Stage};
use tracing::{info, warn};

use crate::error::AppError;
use crate::playback::Player;
use crate::report::Reporter;
use crate::sink::{Destination, OutputFile};
use crate::text;

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Save the generated speech to a WAV file
    Save {
        /// Text to speak: literal text, a file path, or "-" to read standard input
        input: String,
        /// Where to save the WAV file ("-" writes to standard output)
        output: String,
    },
    /// Play the generated speech on this machine
    Play {
        /// Text to speak: literal text, a file path, or "-" to read standard input
        input: String,
    },
}

pub struct App<R, P> {
    client: CoeFontClient,
    reporter: R,
    player: P,
}

impl<R: Reporter, P: Player> App<R, P> {
    pub fn new(client: CoeFontClient, reporter: R, player: P) -> Self {
        Self {
            client,
            reporter,
            player,
        }
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    pub fn player(&self) -> &P {
        &self.player
    }

    /// Run one command. `stdin` backs the `-` input and `stdout` the `-`
    /// output of `save`.
    pub async fn run<I, O>(&self, command: Command, stdin: I, stdout: &mut O) -> Result<(), AppError>
    where
        I: Read,
        O: Write + ?Sized,
    {
        match command {
            Command::Save { input, output } => self.save(&input, &output, stdin, stdout).await,
            Command::Play { input } => self.play(&input, stdin).await,
        }
    }

    pub async fn save<I, O>(
        &self,
        input: &str,
        output: &str,
        stdin: I,
        stdout: &mut O,
    ) -> Result<(), AppError>
    where
        I: Read,
        O: Write + ?Sized,
    {
        let text = text::resolve_with(input, stdin)?;
        let destination = Destination::parse(output);
        match &destination {
            Destination::Stdout => self.speak_into(&text, stdout).await?,
            Destination::File(path) => {
                let mut file = OutputFile::create(path)?;
                self.speak_into(&text, &mut file).await?;
                let saved = file.commit();
                info!(path = %saved.display(), "audio saved");
            }
        }
        self.reporter.status(&format!(
            "✅ Saved the generated audio to {}.",
            destination.describe()
        ));
        Ok(())
    }

    pub async fn play<I: Read>(&self, input: &str, stdin: I) -> Result<(), AppError> {
        let text = text::resolve_with(input, stdin)?;
        let mut temp = tempfile::Builder::new()
            .prefix("tarako-")
            .suffix(".wav")
            .tempfile()
            .map_err(AppError::TempFile)?;
        self.speak_into(&text, temp.as_file_mut()).await?;

        self.reporter.status("🔊 Playing the generated audio...");
        let played = self.player.play(temp.path());
        if let Err(e) = temp.close() {
            warn!(error = %e, "could not remove temporary audio file");
        }
        played?;
        self.reporter.status("✅ Played the generated audio.");
        Ok(())
    }

    async fn speak_into<W: Write + ?Sized>(&self, text: &str, sink: &mut W) -> Result<(), AppError> {
        self.reporter.status(&format!("📋 Text: {text}"));
        self.client
            .synthesize_with_progress(text, sink, |stage| match stage {
                Stage::Generating => self.reporter.status("Generating speech..."),
                Stage::Downloading => self.reporter.status("Downloading the generated audio..."),
            })
            .await?;
        Ok(())
    }
}
