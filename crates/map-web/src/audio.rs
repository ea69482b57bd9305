use map_core::{FilterKind, GainStep, ToneSink, ToneSpec, Waveform};
use web_sys as web;

/// WebAudio tone engine. The context is created on first use, since browsers
/// only allow audio to start after a user gesture; if creation fails the
/// engine stays silent for the rest of the session.
#[derive(Default)]
pub struct WebToneEngine {
    ctx: Option<web::AudioContext>,
    unavailable: bool,
}

impl WebToneEngine {
    fn context(&mut self) -> Option<&web::AudioContext> {
        if self.ctx.is_none() && !self.unavailable {
            match web::AudioContext::new() {
                Ok(ctx) => self.ctx = Some(ctx),
                Err(e) => {
                    log::warn!("[sfx] AudioContext unavailable: {:?}", e);
                    self.unavailable = true;
                }
            }
        }
        let ctx = self.ctx.as_ref()?;
        if ctx.state() == web::AudioContextState::Suspended {
            _ = ctx.resume();
        }
        Some(ctx)
    }
}

fn oscillator_type(waveform: Waveform) -> web::OscillatorType {
    match waveform {
        Waveform::Sine => web::OscillatorType::Sine,
        Waveform::Square => web::OscillatorType::Square,
        Waveform::Sawtooth => web::OscillatorType::Sawtooth,
        Waveform::Triangle => web::OscillatorType::Triangle,
    }
}

fn filter_type(kind: FilterKind) -> web::BiquadFilterType {
    match kind {
        FilterKind::Lowpass => web::BiquadFilterType::Lowpass,
        FilterKind::Highpass => web::BiquadFilterType::Highpass,
        FilterKind::Bandpass => web::BiquadFilterType::Bandpass,
    }
}

// Oscillator -> [filter] -> gain -> destination, started now and stopped at
// the end of the spec. Nodes are released by the browser once the source ends.
fn trigger_tone(ctx: &web::AudioContext, spec: &ToneSpec) -> Result<(), wasm_bindgen::JsValue> {
    let src = web::OscillatorNode::new(ctx)?;
    src.set_type(oscillator_type(spec.waveform));
    src.frequency().set_value(spec.frequency_hz);

    let gain = web::GainNode::new(ctx)?;
    let t0 = ctx.current_time();
    for p in spec.gain_schedule(t0) {
        match p.step {
            GainStep::Set => {
                gain.gain().set_value_at_time(p.gain, p.at_sec)?;
            }
            GainStep::Ramp => {
                gain.gain().linear_ramp_to_value_at_time(p.gain, p.at_sec)?;
            }
        }
    }

    match spec.filter {
        Some(f) => {
            let filter = web::BiquadFilterNode::new(ctx)?;
            filter.set_type(filter_type(f.kind));
            filter.frequency().set_value(f.frequency_hz);
            filter.q().set_value(f.q);
            src.connect_with_audio_node(&filter)?;
            filter.connect_with_audio_node(&gain)?;
        }
        None => {
            src.connect_with_audio_node(&gain)?;
        }
    }
    gain.connect_with_audio_node(&ctx.destination())?;

    src.start_with_when(t0)?;
    src.stop_with_when(spec.stop_at(t0))?;
    Ok(())
}

impl ToneSink for WebToneEngine {
    fn play(&mut self, spec: &ToneSpec) {
        let Some(ctx) = self.context() else {
            return;
        };
        if let Err(e) = trigger_tone(ctx, spec) {
            log::warn!("[sfx] tone failed: {:?}", e);
        }
    }
}
