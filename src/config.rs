//! Simulation configuration: which predictor to build, and with what
//! parameters, validated once at startup before any trace is touched.

use std::path::PathBuf;

use thiserror::Error;

/// Which predictor variant to simulate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    OneLevel,
    TwoLevelGlobal,
    GShare,
    TwoLevelLocal,
    Tournament,
    Tage,
}
impl Method {
    pub fn parse(flag: &str) -> Result<Self, ConfigError> {
        match flag {
            "one-level" => Ok(Method::OneLevel),
            "two-level-global" => Ok(Method::TwoLevelGlobal),
            "gshare" => Ok(Method::GShare),
            "two-level-local" => Ok(Method::TwoLevelLocal),
            "tournament" => Ok(Method::Tournament),
            "tage" => Ok(Method::Tage),
            other => Err(ConfigError::UnknownMethod(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::OneLevel => "one-level",
            Method::TwoLevelGlobal => "two-level-global",
            Method::GShare => "gshare",
            Method::TwoLevelLocal => "two-level-local",
            Method::Tournament => "tournament",
            Method::Tage => "tage",
        }
    }
}

/// Fully validated simulation configuration, built once from CLI flags.
///
/// Every address function in this crate slices the PC directly as a 64-bit
/// unsigned integer (spec §9's later, 64-bit revision); none of them ever
/// examines a bit beyond the low ~20, so there is no PC-width knob to
/// expose here — a `pc_width` field would change nothing any address
/// function computes, including `TwoLevelLocal`, whose local-register
/// index is separately pinned to a 32-bit rendering regardless of the rest
/// of the simulator (spec §4.6).
#[derive(Clone, Debug)]
pub struct SimConfig {
    pub method: Method,
    pub counter_bits: u32,
    pub counter_init: u8,
    pub pht_size: usize,
    pub trace_path: PathBuf,
    pub seed: Option<u64>,
}
impl SimConfig {
    pub fn validate(
        method: Method,
        counter_bits: u32,
        counter_init: i64,
        pht_size: usize,
        trace_path: PathBuf,
        seed: Option<u64>,
    ) -> Result<Self, ConfigError> {
        if !(1..=8).contains(&counter_bits) {
            return Err(ConfigError::CounterBitsOutOfRange(counter_bits));
        }
        if pht_size == 0 || !pht_size.is_power_of_two() {
            return Err(ConfigError::PhtSizeNotPowerOfTwo(pht_size));
        }
        let max_init = (1i64 << counter_bits) - 1;
        if counter_init < 0 || counter_init > max_init {
            return Err(ConfigError::CounterInitOutOfRange { init: counter_init, max: max_init });
        }
        if !trace_path.exists() {
            return Err(ConfigError::TraceUnreadable {
                path: trace_path,
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "trace file not found"),
            });
        }
        Ok(Self { method, counter_bits, counter_init: counter_init as u8, pht_size, trace_path, seed })
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown prediction method `{0}`")]
    UnknownMethod(String),
    #[error("pht size {0} is not a positive power of two")]
    PhtSizeNotPowerOfTwo(usize),
    #[error("counter bits {0} is out of the supported range [1, 8]")]
    CounterBitsOutOfRange(u32),
    #[error("counter init {init} is out of range [0, {max}]")]
    CounterInitOutOfRange { init: i64, max: i64 },
    #[error("trace file {path:?} could not be read: {source}")]
    TraceUnreadable { path: PathBuf, source: std::io::Error },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_known_method_flag() {
        for (flag, method) in [
            ("one-level", Method::OneLevel),
            ("two-level-global", Method::TwoLevelGlobal),
            ("gshare", Method::GShare),
            ("two-level-local", Method::TwoLevelLocal),
            ("tournament", Method::Tournament),
            ("tage", Method::Tage),
        ] {
            assert_eq!(Method::parse(flag).unwrap(), method);
        }
    }

    #[test]
    fn rejects_unknown_method() {
        assert!(matches!(Method::parse("bogus"), Err(ConfigError::UnknownMethod(_))));
    }

    #[test]
    fn rejects_non_power_of_two_pht_size() {
        let err = SimConfig::validate(Method::OneLevel, 2, 0, 3, PathBuf::from("/dev/null"), None);
        assert!(matches!(err, Err(ConfigError::PhtSizeNotPowerOfTwo(3))));
    }

    #[test]
    fn rejects_out_of_range_counter_bits() {
        let err = SimConfig::validate(Method::OneLevel, 0, 0, 4, PathBuf::from("/dev/null"), None);
        assert!(matches!(err, Err(ConfigError::CounterBitsOutOfRange(0))));
    }
}
