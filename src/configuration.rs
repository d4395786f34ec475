//! Config for the simulator behaviors
//!
//! Configuration can be created programmatically using [`Configuration::new()`] or by reading
//! environment variables using [`Configuration::from_env()`].
//!
//! # Environment Variables
//!
//! All values are optional. Flags are case-insensitive; set them to `"true"` to enable.
//!
//! - `TENNIS_VERBOSE`: Print umpire announcements to stdout (default: `true`)
//! - `TENNIS_LOG`: Enable logging to a file (default: `false`)
//! - `TENNIS_SEED`: Seed of the random stream (default: seeded from entropy)
//! - `TENNIS_DECIDING_SET_TIEBREAK`: Games each at which a deciding set plays a tiebreak
//!   (default: unset, the deciding set is played out until a side leads by two games)

use crate::error::SetupError;

/// Rules that vary between competitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoringRules {
    pub(crate) deciding_set_tiebreak_at: Option<u32>,
}

impl ScoringRules {
    /// Deciding set without a tiebreak: it continues until one side leads by two games.
    pub fn advantage_deciding_set() -> Self {
        Self::default()
    }

    /// Deciding set plays a tiebreak when both sides reach `games`.
    ///
    /// # Errors
    /// `games` must be at least 6.
    pub fn with_deciding_set_tiebreak(games: u32) -> Result<Self, SetupError> {
        if games < 6 {
            return Err(SetupError::InvalidTiebreakThreshold(games));
        }
        Ok(Self {
            deciding_set_tiebreak_at: Some(games),
        })
    }

    /// Games each at which a tiebreak is played in a set.
    pub fn tiebreak_at(&self, deciding: bool) -> Option<u32> {
        if deciding {
            self.deciding_set_tiebreak_at
        } else {
            Some(6)
        }
    }
}

/// Configuration for simulator behaviors.
#[derive(Debug, Clone, Copy)]
pub struct Configuration {
    pub(crate) verbose: bool,
    pub(crate) log: bool,
    pub(crate) seed: Option<u64>,
    pub(crate) deciding_set_tiebreak_at: Option<u32>,
}

impl Configuration {
    /// Create a new configuration with default parameters.
    ///
    /// By default:
    /// - Announcements are printed to stdout.
    /// - Logging to file is disabled.
    /// - The random stream is seeded from entropy.
    /// - Deciding sets have no tiebreak.
    pub fn new() -> Self {
        Self {
            verbose: true,
            log: false,
            seed: None,
            deciding_set_tiebreak_at: None,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Unset or unparsable values fall back to the defaults of [`Configuration::new()`].
    pub fn from_env() -> Self {
        fn get_env_flag(var: &str, default: bool) -> bool {
            match std::env::var(var) {
                Ok(val) => val.eq_ignore_ascii_case("true"),
                Err(_) => default,
            }
        }

        fn parse<T: std::str::FromStr>(var: &str) -> Option<T> {
            std::env::var(var).ok()?.trim().parse().ok()
        }

        Self {
            verbose: get_env_flag("TENNIS_VERBOSE", true),
            log: get_env_flag("TENNIS_LOG", false),
            seed: parse("TENNIS_SEED"),
            deciding_set_tiebreak_at: parse("TENNIS_DECIDING_SET_TIEBREAK"),
        }
    }

    /// Enable or disable stdout announcements.
    pub fn with_verbose(mut self, value: bool) -> Self {
        self.verbose = value;
        self
    }

    /// Enable or disable logging to file.
    pub fn with_log(mut self, value: bool) -> Self {
        self.log = value;
        self
    }

    /// Fix the seed of the random stream.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Play a tiebreak in the deciding set once both sides reach `games`.
    pub fn with_deciding_set_tiebreak(mut self, games: Option<u32>) -> Self {
        self.deciding_set_tiebreak_at = games;
        self
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn log(&self) -> bool {
        self.log
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// The scoring rules this configuration asks for.
    ///
    /// # Errors
    /// The deciding-set tiebreak threshold is below 6.
    pub fn scoring_rules(&self) -> Result<ScoringRules, SetupError> {
        match self.deciding_set_tiebreak_at {
            Some(games) => ScoringRules::with_deciding_set_tiebreak(games),
            None => Ok(ScoringRules::advantage_deciding_set()),
        }
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new()
    }
}
