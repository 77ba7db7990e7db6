use clap::{Parser, ValueEnum};
use etude::audio::{ClickOutput, ClickTrigger, start_click_output};
use etude::timing::BeatNotifier;
use etude::{
    EtudeApp, Metronome, NoteTracker, Session, SessionClock, SessionConfig, SessionControls,
    drill, midi,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Practice window with the live timeline
    Gui,
    /// Console walk through the curriculum
    Drill,
}

#[derive(Parser, Debug)]
#[command(name = "etude")]
#[command(about = "Scale and arpeggio practice with a metronome and a live MIDI timeline")]
struct Args {
    /// RON session config; built-in defaults when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value = "gui")]
    mode: Mode,

    /// Substring of the MIDI input port to use
    #[arg(short, long)]
    port: Option<String>,

    /// Start with the metronome muted
    #[arg(short, long)]
    mute: bool,

    /// Do not open an audio output for the click
    #[arg(long)]
    no_audio: bool,

    /// Print the available MIDI inputs and exit
    #[arg(long)]
    list_ports: bool,
}

fn main() -> ExitCode {
    etude::init_tracing();
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> etude::Result<()> {
    if args.list_ports {
        for (i, name) in midi::list_ports()?.iter().enumerate() {
            println!("  {}: {}", i, name);
        }
        return Ok(());
    }

    let mut config = match &args.config {
        Some(path) => SessionConfig::load(path)?,
        None => SessionConfig::default(),
    };
    if args.port.is_some() {
        config.midi_port = args.port.clone();
    }

    let clock = SessionClock::start();
    let tracker = NoteTracker::shared(config.grace_period()?);
    let curriculum = config.build_curriculum(&mut rand::thread_rng())?;
    info!(exercises = curriculum.len(), "curriculum ready");

    let controls = Arc::new(SessionControls::new(
        curriculum.get(0).target_tempo(),
        config.muted || args.mute,
    ));
    let mut session = Session::new(curriculum, controls.clone(), tracker.clone());

    let (click_output, click_trigger) = open_click(&args, &config);
    let (beat_tx, beat_rx) = crossbeam::channel::bounded(16);
    Metronome::new(controls, clock, (click_trigger, BeatNotifier::new(beat_tx))).spawn()?;

    match args.mode {
        Mode::Drill => {
            drill::run(&mut session)?;
            Ok(())
        }
        Mode::Gui => {
            let listener = match midi::connect(config.midi_port.as_deref(), tracker, clock) {
                Ok(listener) => {
                    info!(port = listener.port_name(), "listening for notes");
                    Some(listener)
                }
                Err(e) => {
                    warn!("running without MIDI input: {}", e);
                    None
                }
            };

            let options = eframe::NativeOptions {
                viewport: egui::ViewportBuilder::default()
                    .with_inner_size([960.0, 800.0])
                    .with_title("etude"),
                ..Default::default()
            };

            eframe::run_native(
                "etude",
                options,
                Box::new(move |_cc| {
                    Ok(Box::new(EtudeApp::new(
                        session,
                        clock,
                        Some(beat_rx),
                        listener,
                        click_output,
                    )))
                }),
            )
            .map_err(|e| etude::Error::Gui(e.to_string()))
        }
    }
}

fn open_click(
    args: &Args,
    config: &SessionConfig,
) -> (Option<ClickOutput>, Option<ClickTrigger>) {
    if args.no_audio {
        return (None, None);
    }
    match start_click_output(config.tick_volume) {
        Ok((output, trigger)) => (Some(output), Some(trigger)),
        Err(e) => {
            warn!("running without click audio: {}", e);
            (None, None)
        }
    }
}
