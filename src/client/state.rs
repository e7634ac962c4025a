//! Session state for the suggest-then-synthesize workflow.
//!
//! Pure state machine: `Session::apply` maps an event to field updates plus a
//! list of effects for the driver to execute. No I/O happens here, which keeps
//! the guards and transitions testable without a running relay.

/// Where the session sits in the workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    SuggestingReply,
    ReplyReady,
    GeneratingVoice,
    VoiceReady,
}

/// A UI action or the completion of an async relay call.
#[derive(Debug, Clone)]
pub enum Event {
    MessageEdited(String),
    ReplyEdited(String),
    SuggestRequested,
    ReplySucceeded(String),
    ReplyFailed(String),
    VoiceSelected(String),
    SynthesisRequested,
    SynthesisSucceeded(Vec<u8>),
    SynthesisFailed(String),
}

/// Work the driver must perform after a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    CallReply { client_message: String },
    CallSynthesis { text: String, voice_id: Option<String> },
    Notify(String),
}

/// One user's session: the message, the editable reply, the selected voice
/// and the last synthesized audio, tagged with the workflow phase. The two
/// busy flags of the UI are derived from the phase tag.
#[derive(Debug, Default)]
pub struct Session {
    pub client_message: String,
    pub reply: String,
    pub selected_voice_id: Option<String>,
    pub audio: Option<Vec<u8>>,
    phase: Phase,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn reply_in_flight(&self) -> bool {
        self.phase == Phase::SuggestingReply
    }

    pub fn synthesis_in_flight(&self) -> bool {
        self.phase == Phase::GeneratingVoice
    }

    fn call_in_flight(&self) -> bool {
        self.reply_in_flight() || self.synthesis_in_flight()
    }

    /// Apply one event and return the effects it produces. Guard failures
    /// come back as `Notify` (user-visible) or an empty list (busy no-op).
    pub fn apply(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::MessageEdited(text) => {
                self.client_message = text;
                Vec::new()
            }
            Event::ReplyEdited(text) => {
                // Editing the reply never transitions on its own
                self.reply = text;
                Vec::new()
            }
            Event::SuggestRequested => self.start_suggest(),
            Event::ReplySucceeded(reply) => {
                self.reply = reply;
                self.phase = Phase::ReplyReady;
                Vec::new()
            }
            Event::ReplyFailed(message) => {
                // The error is shown in place of the reply; the user retries
                self.reply = format!("Error: {}", message);
                self.phase = Phase::ReplyReady;
                Vec::new()
            }
            Event::VoiceSelected(voice_id) => {
                self.selected_voice_id = Some(voice_id);
                // Re-voicing the current reply is part of selecting a voice
                if !self.reply.is_empty() && !self.call_in_flight() {
                    self.start_synthesis()
                } else {
                    Vec::new()
                }
            }
            Event::SynthesisRequested => {
                if self.reply.is_empty() {
                    return vec![Effect::Notify(
                        "No reply text to convert to speech".to_string(),
                    )];
                }
                if self.call_in_flight() {
                    return Vec::new();
                }
                self.start_synthesis()
            }
            Event::SynthesisSucceeded(audio) => {
                self.audio = Some(audio);
                self.phase = Phase::VoiceReady;
                Vec::new()
            }
            Event::SynthesisFailed(message) => {
                // Keep the reply, drop back to ready; no audio to offer
                self.phase = Phase::ReplyReady;
                vec![Effect::Notify(message)]
            }
        }
    }

    fn start_suggest(&mut self) -> Vec<Effect> {
        if self.client_message.is_empty() {
            return vec![Effect::Notify(
                "Please provide text to generate the speech reply.".to_string(),
            )];
        }
        if self.call_in_flight() {
            return Vec::new();
        }

        // Previous results are stale once a new suggestion starts
        self.reply.clear();
        self.audio = None;
        self.phase = Phase::SuggestingReply;

        vec![Effect::CallReply {
            client_message: self.client_message.clone(),
        }]
    }

    fn start_synthesis(&mut self) -> Vec<Effect> {
        self.audio = None;
        self.phase = Phase::GeneratingVoice;

        // The effect snapshots the reply as it is right now; later edits must
        // not change an in-flight request
        vec![Effect::CallSynthesis {
            text: self.reply.clone(),
            voice_id: self.selected_voice_id.clone(),
        }]
    }
}
