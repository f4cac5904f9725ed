use std::path::PathBuf;

use clap::{Parser, Subcommand};
use watson_domain::AudioFormat;

/// Command line access to Watson services.
///
/// Credentials are read from `ibm-credentials.env` (or the file named by
/// `IBM_CREDENTIALS_FILE`) and from `<SERVICE>_*` environment variables.
#[derive(Parser)]
#[command(name = "watson", version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Talk to an assistant
    #[command(subcommand)]
    Assistant(AssistantCommand),

    /// Text to Speech
    #[command(subcommand)]
    Tts(TtsCommand),

    /// Natural Language Classifier
    #[command(subcommand)]
    Nlc(NlcCommand),

    /// Visual Recognition
    #[command(subcommand)]
    Vr(VrCommand),
}

#[derive(Subcommand)]
pub enum AssistantCommand {
    /// Send a message and print the assistant's reply.
    ///
    /// Without `--session-id` the stateless endpoint is used.
    Message {
        #[arg(long)]
        assistant_id: String,

        #[arg(long)]
        session_id: Option<String>,

        /// The user's utterance
        text: String,
    },

    /// Manage sessions
    #[command(subcommand)]
    Session(SessionCommand),
}

#[derive(Subcommand)]
pub enum SessionCommand {
    /// Create a session and print its id
    Create {
        #[arg(long)]
        assistant_id: String,
    },

    /// Delete a session
    Delete {
        #[arg(long)]
        assistant_id: String,

        #[arg(long)]
        session_id: String,
    },
}

#[derive(Subcommand)]
pub enum TtsCommand {
    /// List available voices
    Voices,

    /// Synthesize text into an audio file
    Synthesize {
        #[arg(long)]
        voice: Option<String>,

        /// MIME type of the audio, e.g. `audio/wav`
        #[arg(long, default_value_t = AudioFormat::OggOpus)]
        accept: AudioFormat,

        /// Defaults to `speech.<ext>` for the chosen format
        #[arg(long, short)]
        output: Option<PathBuf>,

        text: String,
    },
}

#[derive(Subcommand)]
pub enum NlcCommand {
    /// Classify a phrase
    Classify {
        #[arg(long)]
        classifier_id: String,

        text: String,
    },

    /// List classifiers
    List,
}

#[derive(Subcommand)]
pub enum VrCommand {
    /// List collections
    Collections,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_synthesize() {
        let fixture = ["watson", "tts", "synthesize", "--accept", "audio/wav", "hello"];

        let actual = Cli::try_parse_from(fixture).unwrap();

        let Command::Tts(TtsCommand::Synthesize { accept, output, voice, text }) = actual.command
        else {
            panic!("expected tts synthesize");
        };
        assert_eq!(accept, AudioFormat::Wav);
        assert_eq!(output, None);
        assert_eq!(voice, None);
        assert_eq!(text, "hello");
    }

    #[test]
    fn test_parse_stateless_message() {
        let fixture = ["watson", "assistant", "message", "--assistant-id", "a-1", "hi"];

        let actual = Cli::try_parse_from(fixture).unwrap();

        let Command::Assistant(AssistantCommand::Message { assistant_id, session_id, text }) =
            actual.command
        else {
            panic!("expected assistant message");
        };
        assert_eq!(assistant_id, "a-1");
        assert_eq!(session_id, None);
        assert_eq!(text, "hi");
    }

    #[test]
    fn test_unknown_audio_format_is_rejected() {
        let fixture = ["watson", "tts", "synthesize", "--accept", "audio/aiff", "hello"];

        let actual = Cli::try_parse_from(fixture);

        assert!(actual.is_err());
    }
}
