//! Synthesis configuration record.
//!
//! A [`SynthesisConfig`] is the single input of the synthesizer. It is
//! deserialized from JSON with every field optional; missing fields take the
//! defaults listed on [`SynthesisConfig::default`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{SpecError, ValidationWarning, WarningCode};

/// Waveform family to synthesize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SignalType {
    /// Continuous (optionally multi-tone, oversampled) sine.
    #[default]
    #[serde(rename = "sine")]
    Sine,
    /// Sine rendered as a sample-and-hold step sequence.
    #[serde(rename = "sine_samp", alias = "sine_sampled")]
    SineSampled,
    /// Trapezoidal clock/pulse train with optional edge jitter.
    #[serde(rename = "pulse")]
    Pulse,
    /// Rising or falling ramp.
    #[serde(rename = "sawtooth")]
    Sawtooth,
    /// Gaussian noise through a fixed equiripple FIR.
    #[serde(rename = "bpnoise", alias = "bandpass_noise")]
    BandpassNoise,
}

impl SignalType {
    /// All supported signal types.
    pub const ALL: [SignalType; 5] = [
        SignalType::Sine,
        SignalType::SineSampled,
        SignalType::Pulse,
        SignalType::Sawtooth,
        SignalType::BandpassNoise,
    ];

    /// Canonical wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalType::Sine => "sine",
            SignalType::SineSampled => "sine_samp",
            SignalType::Pulse => "pulse",
            SignalType::Sawtooth => "sawtooth",
            SignalType::BandpassNoise => "bpnoise",
        }
    }

    /// Returns true for signal types whose time base is a uniform
    /// (oversampled) sample grid.
    pub fn is_continuous(&self) -> bool {
        matches!(
            self,
            SignalType::Sine | SignalType::Sawtooth | SignalType::BandpassNoise
        )
    }
}

impl FromStr for SignalType {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sine" => Ok(SignalType::Sine),
            "sine_samp" | "sine_sampled" => Ok(SignalType::SineSampled),
            "pulse" => Ok(SignalType::Pulse),
            "sawtooth" => Ok(SignalType::Sawtooth),
            "bpnoise" | "bandpass_noise" => Ok(SignalType::BandpassNoise),
            other => Err(SpecError::UnsupportedSignalType(other.to_string())),
        }
    }
}

impl fmt::Display for SignalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sawtooth ramp direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlopeType {
    /// Ramp rises over each period.
    #[default]
    Rising,
    /// Ramp falls over each period.
    Falling,
}

/// A single tone of a (multi-)tone signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tone {
    /// Frequency in Hz.
    pub frequency: f64,
    /// Peak amplitude.
    pub amplitude: f64,
    /// DC offset added by this tone.
    pub common_mode: f64,
}

impl Tone {
    /// Creates a new tone.
    pub fn new(frequency: f64, amplitude: f64, common_mode: f64) -> Self {
        Self {
            frequency,
            amplitude,
            common_mode,
        }
    }
}

/// Configuration record for one synthesis call.
///
/// Field names are the short keys used by test-harness configs, so those
/// configs can be passed through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct SynthesisConfig {
    /// Signal type.
    pub sigtype: SignalType,
    /// Tone frequencies in Hz (also the pulse repetition rate).
    #[serde(deserialize_with = "one_or_many")]
    pub sig_freq: Vec<f64>,
    /// Tone amplitudes.
    #[serde(deserialize_with = "one_or_many")]
    pub sig_amp: Vec<f64>,
    /// Tone common-mode offsets.
    #[serde(deserialize_with = "one_or_many")]
    pub sig_cm: Vec<f64>,
    /// Phase in degrees, used when `tau` is zero.
    pub sig_phase: f64,
    /// Delay in seconds; overrides `sig_phase` when nonzero.
    pub tau: f64,
    /// Oversampling ratio.
    pub sig_osr: usize,
    /// Number of nominal samples (periods for pulse).
    pub nsamp: usize,
    /// Extra samples appended after `nsamp`.
    pub extra_sampl: usize,
    /// Sample rate in Hz.
    pub fs: f64,
    /// Snap tone frequencies to a prime number of cycles in `nsamp` samples.
    pub coherent: bool,
    /// Target SNR in dB; zero or less disables noise injection.
    pub snr: f64,
    /// Standard deviation of pulse edge jitter in seconds.
    pub jitter_sd: Option<f64>,
    /// Pulse high level.
    pub high: f64,
    /// Pulse low level.
    pub low: f64,
    /// Time offset added to every timestamp, in seconds.
    pub after: f64,
    /// Pulse duty cycle.
    pub duty: f64,
    /// Pulse rise time (also the sample-and-hold guard), in seconds.
    pub trise: f64,
    /// Pulse fall time, in seconds.
    pub tfall: f64,
    /// Sawtooth slope direction.
    pub slopetype: SlopeType,
    /// Base seed for all random streams.
    pub seed: u32,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            sigtype: SignalType::Sine,
            sig_freq: vec![1e6],
            sig_amp: vec![0.5],
            sig_cm: vec![0.0],
            sig_phase: 0.0,
            tau: 0.0,
            sig_osr: 1,
            nsamp: 1024,
            extra_sampl: 0,
            fs: 2e9,
            coherent: false,
            snr: 0.0,
            jitter_sd: None,
            high: 1.0,
            low: 0.0,
            after: 0.0,
            duty: 0.5,
            trise: 5e-12,
            tfall: 5e-12,
            slopetype: SlopeType::Rising,
            seed: 0,
        }
    }
}

impl SynthesisConfig {
    /// Creates a default config of the given signal type.
    pub fn new(sigtype: SignalType) -> Self {
        Self {
            sigtype,
            ..Self::default()
        }
    }

    /// Parses a config from JSON.
    ///
    /// An unknown `sigtype` is reported as
    /// [`SpecError::UnsupportedSignalType`] rather than a generic parse error.
    pub fn from_json(json: &str) -> Result<Self, SpecError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if let Some(sigtype) = value.get("sigtype").and_then(|v| v.as_str()) {
            sigtype.parse::<SignalType>()?;
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Serializes the config to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, SpecError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Total number of samples (or pulse periods) to generate.
    pub fn total_samples(&self) -> usize {
        self.nsamp.saturating_add(self.extra_sampl)
    }

    /// Oversampling ratio actually used by the configured signal type.
    pub fn effective_osr(&self) -> usize {
        match self.sigtype {
            SignalType::SineSampled | SignalType::Pulse => 1,
            _ => self.sig_osr,
        }
    }

    /// Jitter standard deviation, if jitter is enabled.
    ///
    /// A present but zero deviation disables jitter.
    pub fn jitter(&self) -> Option<f64> {
        self.jitter_sd.filter(|&sd| sd > 0.0)
    }

    /// Number of output rows the configured signal type will produce.
    pub fn expected_rows(&self) -> usize {
        let total = self.total_samples();
        let anchor = usize::from(self.after != 0.0);
        match self.sigtype {
            SignalType::Sine | SignalType::Sawtooth | SignalType::BandpassNoise => {
                total.saturating_mul(self.sig_osr)
            }
            SignalType::SineSampled => total.saturating_mul(2).saturating_add(anchor),
            SignalType::Pulse => total.saturating_mul(4).saturating_add(anchor),
        }
    }

    /// Builds the ordered tone list, broadcasting amplitude and common-mode
    /// from their first element when list lengths do not match the
    /// frequency list.
    ///
    /// Returns the tones together with one warning per broadcast list.
    pub fn broadcast_tones(&self) -> (Vec<Tone>, Vec<ValidationWarning>) {
        let mut warnings = Vec::new();
        let n = self.sig_freq.len();

        let amps = broadcast(&self.sig_amp, n);
        if self.sig_amp.len() != n {
            warnings.push(ValidationWarning::with_path(
                WarningCode::ToneLengthMismatch,
                "Length mismatch in sig_freq and sig_amp. Using first value for sig_amp.",
                "sig_amp",
            ));
        }
        let cms = broadcast(&self.sig_cm, n);
        if self.sig_cm.len() != n {
            warnings.push(ValidationWarning::with_path(
                WarningCode::ToneLengthMismatch,
                "Length mismatch in sig_freq and sig_cm. Using first value for sig_cm.",
                "sig_cm",
            ));
        }

        let tones = self
            .sig_freq
            .iter()
            .zip(amps)
            .zip(cms)
            .map(|((&f, a), c)| Tone::new(f, a, c))
            .collect();
        (tones, warnings)
    }

    /// Ordered tone list (see [`SynthesisConfig::broadcast_tones`]).
    pub fn tones(&self) -> Vec<Tone> {
        self.broadcast_tones().0
    }

    /// First tone, used by the single-tone signal types.
    pub fn primary_tone(&self) -> Tone {
        self.tones()
            .first()
            .copied()
            .unwrap_or_else(|| Tone::new(0.0, 0.0, 0.0))
    }
}

fn broadcast(values: &[f64], n: usize) -> Vec<f64> {
    if values.len() == n {
        values.to_vec()
    } else {
        vec![values.first().copied().unwrap_or(0.0); n]
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(f64),
    Many(Vec<f64>),
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(v) => vec![v],
        OneOrMany::Many(v) => v,
    })
}
