use std::io::{self, Write};

use tracing_subscriber::EnvFilter;

use quick_reply_voice::client::{App, Event, Phase, RelayClient, Session, AUDIO_FILE_NAME, VOICES};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let mut app = App::new(RelayClient::from_env());

    println!("Quick Reply -> Voice");
    println!("Paste a client message, get a suggested reply, then voice it.");

    loop {
        print!("\n[m]essage  [s]uggest  [e]dit reply  [v]oice  [g]enerate  [q]uit > ");
        let _ = io::stdout().flush();
        let Some(choice) = read_line() else { break };

        match choice.trim() {
            "m" => {
                let Some(text) = prompt("Client message> ") else { break };
                report(app.dispatch(Event::MessageEdited(text)).await);
            }
            "s" => {
                report(app.dispatch(Event::SuggestRequested).await);
                show_reply(app.session());
            }
            "e" => {
                let Some(text) = prompt("Reply> ") else { break };
                report(app.dispatch(Event::ReplyEdited(text)).await);
            }
            "v" => {
                for (i, voice) in VOICES.iter().enumerate() {
                    println!("  {}: {}", i + 1, voice.name);
                }
                let Some(choice) = prompt("Voice number> ") else { break };
                let voice = choice
                    .trim()
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|i| VOICES.get(i));
                match voice {
                    Some(voice) => {
                        report(
                            app.dispatch(Event::VoiceSelected(voice.voice_id.to_string()))
                                .await,
                        );
                        save_audio(app.session());
                    }
                    None => println!("No such voice"),
                }
            }
            "g" => {
                report(app.dispatch(Event::SynthesisRequested).await);
                save_audio(app.session());
            }
            "q" => break,
            _ => {}
        }
    }
}

fn prompt(label: &str) -> Option<String> {
    print!("{}", label);
    let _ = io::stdout().flush();
    read_line()
}

fn read_line() -> Option<String> {
    let mut line = String::new();
    match io::stdin().read_line(&mut line) {
        Ok(0) => None,
        Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
        Err(_) => None,
    }
}

fn report(notices: Vec<String>) {
    for notice in notices {
        println!("! {}", notice);
    }
}

fn show_reply(session: &Session) {
    if !session.reply.is_empty() {
        println!("Suggested reply (editable):\n{}", session.reply);
    }
}

fn save_audio(session: &Session) {
    if session.phase() != Phase::VoiceReady {
        return;
    }
    let Some(audio) = &session.audio else { return };

    match std::fs::write(AUDIO_FILE_NAME, audio) {
        Ok(()) => {
            println!("Saved {} ({} bytes)", AUDIO_FILE_NAME, audio.len());
            #[cfg(feature = "audio-playback")]
            play_audio(audio.clone());
        }
        Err(e) => eprintln!("Failed to save audio: {}", e),
    }
}

#[cfg(feature = "audio-playback")]
fn play_audio(audio: Vec<u8>) {
    if let Err(e) = try_play(audio) {
        tracing::error!("Failed to play audio: {}", e);
    }
}

#[cfg(feature = "audio-playback")]
fn try_play(audio: Vec<u8>) -> Result<(), Box<dyn std::error::Error>> {
    let (_stream, stream_handle) = rodio::OutputStream::try_default()?;
    let sink = rodio::Sink::try_new(&stream_handle)?;
    sink.append(rodio::Decoder::new(std::io::Cursor::new(audio))?);
    sink.sleep_until_end();
    Ok(())
}
