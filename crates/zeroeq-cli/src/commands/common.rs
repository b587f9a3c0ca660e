//! Argument groups shared between commands.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use zeroeq_config::EditorConfig;
use zeroeq_core::{ChainSettings, EqParam};

/// Equalizer parameter flags.
///
/// Unset flags keep their defaults. `--set name=value` accepts any
/// parameter by name, short name or string ID and is applied last.
#[derive(Args, Debug, Default)]
pub struct EqArgs {
    /// Low-cut corner frequency in Hz
    #[arg(long, value_name = "HZ")]
    pub low_cut_freq: Option<f32>,

    /// Low-cut slope ordinal (0-3 = 12-48 dB/Oct)
    #[arg(long, value_name = "0-3")]
    pub low_cut_slope: Option<u8>,

    /// High-cut corner frequency in Hz
    #[arg(long, value_name = "HZ")]
    pub high_cut_freq: Option<f32>,

    /// High-cut slope ordinal (0-3 = 12-48 dB/Oct)
    #[arg(long, value_name = "0-3")]
    pub high_cut_slope: Option<u8>,

    /// Peak centre frequency in Hz
    #[arg(long, value_name = "HZ")]
    pub peak_freq: Option<f32>,

    /// Peak gain in dB
    #[arg(long, value_name = "DB", allow_negative_numbers = true)]
    pub peak_gain: Option<f32>,

    /// Peak quality factor
    #[arg(long, value_name = "Q")]
    pub peak_q: Option<f32>,

    /// Bypass the low-cut band
    #[arg(long)]
    pub bypass_low_cut: bool,

    /// Bypass the peak band
    #[arg(long)]
    pub bypass_peak: bool,

    /// Bypass the high-cut band
    #[arg(long)]
    pub bypass_high_cut: bool,

    /// Set any parameter by name (e.g. --set "Peak Gain=-3")
    #[arg(long = "set", value_name = "NAME=VALUE")]
    pub assignments: Vec<String>,
}

impl EqArgs {
    /// Snapshot with every given flag applied on top of the defaults.
    pub fn to_settings(&self) -> anyhow::Result<ChainSettings> {
        let mut settings = ChainSettings::default();

        let values = [
            (EqParam::LowCutFreq, self.low_cut_freq),
            (EqParam::LowCutSlope, self.low_cut_slope.map(f32::from)),
            (EqParam::HighCutFreq, self.high_cut_freq),
            (EqParam::HighCutSlope, self.high_cut_slope.map(f32::from)),
            (EqParam::PeakFreq, self.peak_freq),
            (EqParam::PeakGain, self.peak_gain),
            (EqParam::PeakQuality, self.peak_q),
        ];
        for (param, value) in values {
            if let Some(value) = value {
                settings.set(param, value);
            }
        }

        let toggles = [
            (EqParam::LowCutBypassed, self.bypass_low_cut),
            (EqParam::PeakBypassed, self.bypass_peak),
            (EqParam::HighCutBypassed, self.bypass_high_cut),
        ];
        for (param, on) in toggles {
            if on {
                settings.set(param, 1.0);
            }
        }

        for assignment in &self.assignments {
            let (param, value) = parse_assignment(assignment)?;
            settings.set(param, value);
        }

        Ok(settings)
    }
}

/// Parse `name=value` into a parameter and value.
pub fn parse_assignment(assignment: &str) -> anyhow::Result<(EqParam, f32)> {
    let (name, value) = assignment
        .split_once('=')
        .ok_or_else(|| anyhow::anyhow!("expected NAME=VALUE, got '{assignment}'"))?;
    let param = EqParam::from_name(name.trim())
        .ok_or_else(|| anyhow::anyhow!("unknown parameter: {}", name.trim()))?;
    let value: f32 = value
        .trim()
        .parse()
        .with_context(|| format!("invalid value for {param}: '{}'", value.trim()))?;
    Ok((param, value))
}

/// Config file and sample-rate override.
#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// Editor configuration file (TOML)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Sample rate in Hz, overriding the configuration
    #[arg(long, value_name = "HZ")]
    pub sample_rate: Option<f32>,
}

impl ConfigArgs {
    /// Loads `--config` (or the defaults) and applies the overrides.
    pub fn load(&self) -> anyhow::Result<EditorConfig> {
        let mut config = match &self.config {
            Some(path) => EditorConfig::load(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => EditorConfig::default(),
        };
        if let Some(sample_rate) = self.sample_rate {
            config.sample_rate = sample_rate;
        }
        config.validate()?;
        Ok(config)
    }
}
