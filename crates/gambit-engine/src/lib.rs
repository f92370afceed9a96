//! Search and evaluation for gambit.

pub mod config;
pub mod eval;
pub mod search;
pub mod time;

pub use config::{ConfigError, EngineConfig};
pub use eval::{Evaluator, PestoEvaluator, evaluate};
pub use search::negamax::{INF, MATE_SCORE, MATE_THRESHOLD, MAX_PLY, SearchAborted};
pub use search::tt::{Bound, TranspositionTable, TtEntry};
pub use search::{Engine, SearchResult};
pub use time::{Clock, FixedClock, GameClock, ShrinkingClock};
