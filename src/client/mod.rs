pub mod relay;
pub mod state;

use std::collections::VecDeque;

pub use relay::{RelayClient, RelayError};
pub use state::{Effect, Event, Phase, Session};

/// A selectable voice offered to the user.
#[derive(Debug, Clone, Copy)]
pub struct VoiceOption {
    pub name: &'static str,
    pub voice_id: &'static str,
}

/// Voices shipped with the client. The identifiers are ElevenLabs voice ids.
pub const VOICES: &[VoiceOption] = &[
    VoiceOption {
        name: "sully",
        voice_id: "wAGzRVkxKEs8La0lmdrE",
    },
    VoiceOption {
        name: "viraj",
        voice_id: "iWNf11sz1GrUE4ppxTOL",
    },
    VoiceOption {
        name: "Ryan",
        voice_id: "rU18Fk3uSDhmg5Xh41o4",
    },
];

/// File name offered for the synthesized audio.
pub const AUDIO_FILE_NAME: &str = "reply.mp3";

/// The client application: the session state machine wired to the relay
/// client. `dispatch` applies an event, then executes every produced effect
/// to completion, feeding call results back in as new events. Effects run one
/// at a time, so at most one relay call is ever outstanding.
pub struct App {
    session: Session,
    relay: RelayClient,
}

impl App {
    pub fn new(relay: RelayClient) -> Self {
        Self {
            session: Session::new(),
            relay,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Apply `event` and run the resulting effects. Returns the notices to
    /// show the user.
    pub async fn dispatch(&mut self, event: Event) -> Vec<String> {
        let mut notices = Vec::new();
        let mut pending: VecDeque<Effect> = self.session.apply(event).into();

        while let Some(effect) = pending.pop_front() {
            match effect {
                Effect::CallReply { client_message } => {
                    let event = match self.relay.suggest_reply(&client_message).await {
                        Ok(reply) => Event::ReplySucceeded(reply),
                        Err(e) => Event::ReplyFailed(e.to_string()),
                    };
                    pending.extend(self.session.apply(event));
                }
                Effect::CallSynthesis { text, voice_id } => {
                    let event = match self.relay.synthesize(&text, voice_id.as_deref()).await {
                        Ok(audio) => Event::SynthesisSucceeded(audio),
                        Err(e) => Event::SynthesisFailed(e.to_string()),
                    };
                    pending.extend(self.session.apply(event));
                }
                Effect::Notify(message) => notices.push(message),
            }
        }

        notices
    }
}
