use std::path::PathBuf;

use anyhow::{Context, Result};
use watson_client::{
    ASSISTANT_SERVICE_NAME, AssistantV2, ClassifyOptions, CreateSessionOptions,
    DeleteSessionOptions, MessageOptions, MessageStatelessOptions,
    NATURAL_LANGUAGE_CLASSIFIER_SERVICE_NAME, NaturalLanguageClassifierV1, SynthesizeOptions,
    TEXT_TO_SPEECH_SERVICE_NAME, TextToSpeechV1, VISUAL_RECOGNITION_SERVICE_NAME,
    VisualRecognitionV4,
};
use watson_domain::{MessageInput, MessageOutput};
use watson_env::ServiceConfig;

use crate::cli::{AssistantCommand, Cli, Command, NlcCommand, SessionCommand, TtsCommand, VrCommand};
use crate::render::render;

pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Assistant(command) => assistant(command).await,
        Command::Tts(command) => text_to_speech(command).await,
        Command::Nlc(command) => classifier(command).await,
        Command::Vr(command) => visual_recognition(command).await,
    }
}

fn config(service_name: &str) -> Result<ServiceConfig> {
    ServiceConfig::from_env(service_name)
        .with_context(|| format!("Failed to load configuration for `{service_name}`"))
}

async fn assistant(command: AssistantCommand) -> Result<()> {
    let assistant = AssistantV2::from_config(&config(ASSISTANT_SERVICE_NAME)?)
        .context("Failed to create the assistant client")?;

    match command {
        AssistantCommand::Message { assistant_id, session_id: Some(session_id), text } => {
            let options =
                MessageOptions::new(assistant_id, session_id).input(MessageInput::from_text(text));
            let response = assistant.message(&options).await.context("Message failed")?;
            print_output(&response.result.output);
        }
        AssistantCommand::Message { assistant_id, session_id: None, text } => {
            let options =
                MessageStatelessOptions::new(assistant_id).input(MessageInput::from_text(text));
            let response = assistant
                .message_stateless(&options)
                .await
                .context("Stateless message failed")?;
            print_output(&response.result.output);
        }
        AssistantCommand::Session(SessionCommand::Create { assistant_id }) => {
            let response = assistant
                .create_session(&CreateSessionOptions::new(assistant_id))
                .await
                .context("Failed to create session")?;
            println!("{}", response.result.session_id);
        }
        AssistantCommand::Session(SessionCommand::Delete { assistant_id, session_id }) => {
            assistant
                .delete_session(&DeleteSessionOptions::new(assistant_id, session_id))
                .await
                .context("Failed to delete session")?;
        }
    }
    Ok(())
}

fn print_output(output: &MessageOutput) {
    for item in output.generic.iter().flatten() {
        println!("{}", render(item));
    }
}

async fn text_to_speech(command: TtsCommand) -> Result<()> {
    let tts = TextToSpeechV1::from_config(&config(TEXT_TO_SPEECH_SERVICE_NAME)?)
        .context("Failed to create the text to speech client")?;

    match command {
        TtsCommand::Voices => {
            let response = tts.list_voices().await.context("Failed to list voices")?;
            for voice in response.result.voices {
                println!("{}\t{}\t{}", voice.name, voice.language, voice.description);
            }
        }
        TtsCommand::Synthesize { voice, accept, output, text } => {
            let mut options = SynthesizeOptions::new(text).accept(accept);
            options.voice = voice;
            let output =
                output.unwrap_or_else(|| PathBuf::from(format!("speech.{}", accept.extension())));

            let response = tts.synthesize(&options).await.context("Synthesis failed")?;
            tokio::fs::write(&output, &response.result)
                .await
                .with_context(|| format!("Failed to write {}", output.display()))?;
            tracing::info!(
                path = %output.display(),
                bytes = response.result.len(),
                "Audio written"
            );
        }
    }
    Ok(())
}

async fn classifier(command: NlcCommand) -> Result<()> {
    let config = config(NATURAL_LANGUAGE_CLASSIFIER_SERVICE_NAME)?;
    let nlc = NaturalLanguageClassifierV1::from_config(&config)
        .context("Failed to create the classifier client")?;

    match command {
        NlcCommand::Classify { classifier_id, text } => {
            let response = nlc
                .classify(&ClassifyOptions::new(classifier_id, text))
                .await
                .context("Classification failed")?;
            for class in response.result.classes {
                println!("{:.3}\t{}", class.confidence, class.class_name);
            }
        }
        NlcCommand::List => {
            let response = nlc.list_classifiers().await.context("Failed to list classifiers")?;
            for classifier in response.result.classifiers {
                let status = classifier.status.map(|s| s.to_string()).unwrap_or_default();
                let name = classifier.name.unwrap_or_default();
                println!("{}\t{status}\t{name}", classifier.classifier_id);
            }
        }
    }
    Ok(())
}

async fn visual_recognition(command: VrCommand) -> Result<()> {
    let vr = VisualRecognitionV4::from_config(&config(VISUAL_RECOGNITION_SERVICE_NAME)?)
        .context("Failed to create the visual recognition client")?;

    match command {
        VrCommand::Collections => {
            let response = vr.list_collections().await.context("Failed to list collections")?;
            println!("{}", serde_json::to_string_pretty(&response.result)?);
        }
    }
    Ok(())
}
