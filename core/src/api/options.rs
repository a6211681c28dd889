//! Configuration options for the quotient engine.

use core::time::Duration;
use std::env;
use std::str::FromStr;

use tracing::warn;

use crate::parser::Operator;

/// Simulated cost of each arithmetic operation, in milliseconds.
///
/// Every task carries the cost of its operator; workers sleep for that long
/// before computing.
///
/// # Example
///
/// ```
/// use quotient_core::api::CostTable;
/// use quotient_core::parser::Operator;
/// use std::time::Duration;
///
/// let costs = CostTable { mul_ms: 250, ..CostTable::default() };
/// assert_eq!(costs.cost_of(Operator::Mul), Duration::from_millis(250));
/// assert_eq!(costs.cost_of(Operator::Add), Duration::from_millis(10));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostTable {
    pub add_ms: u64,
    pub sub_ms: u64,
    pub mul_ms: u64,
    pub div_ms: u64,
}

impl CostTable {
    /// Cost of a single operator.
    pub fn cost_ms(&self, op: Operator) -> u64 {
        match op {
            Operator::Add => self.add_ms,
            Operator::Sub => self.sub_ms,
            Operator::Mul => self.mul_ms,
            Operator::Div => self.div_ms,
        }
    }

    pub fn cost_of(&self, op: Operator) -> Duration {
        Duration::from_millis(self.cost_ms(op))
    }
}

impl Default for CostTable {
    fn default() -> Self {
        Self {
            add_ms: 10,
            sub_ms: 10,
            mul_ms: 10,
            div_ms: 10,
        }
    }
}

/// Configuration for the task distribution bridge.
///
/// # Example
///
/// ```
/// use quotient_core::api::BridgeConfig;
///
/// let config = BridgeConfig::for_workers(8);
/// assert_eq!(config.capacity, 32);
/// assert_eq!(config.fetch_timeout, None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BridgeConfig {
    /// Maximum number of tasks waiting in the queue.
    ///
    /// Producers wait for a free slot when the queue is full.
    ///
    /// Default: 4
    pub capacity: usize,

    /// How long `fetch_task` waits for a task before reporting that none is
    /// available.
    ///
    /// `None` returns immediately. Default: None
    pub fetch_timeout: Option<Duration>,
}

impl BridgeConfig {
    const SLOTS_PER_WORKER: usize = 4;

    /// Capacity proportional to the number of workers pulling from the queue.
    pub fn for_workers(workers: usize) -> Self {
        Self {
            capacity: workers.saturating_mul(Self::SLOTS_PER_WORKER).max(Self::SLOTS_PER_WORKER),
            ..Self::default()
        }
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            capacity: Self::SLOTS_PER_WORKER,
            fetch_timeout: None,
        }
    }
}

/// Configuration for the worker pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerOptions {
    /// Number of concurrent workers.
    ///
    /// Default: 1
    pub count: usize,

    /// Pause after an empty fetch or a transport error.
    ///
    /// Never shorter than 1 ms. Default: 3 seconds
    pub backoff: Duration,
}

impl Default for WorkerOptions {
    fn default() -> Self {
        Self {
            count: 1,
            backoff: Duration::from_secs(3),
        }
    }
}

/// Configuration options for expression execution.
///
/// These options control resource limits during evaluation.
///
/// # Example
///
/// ```
/// use quotient_core::api::ExecutionOptions;
///
/// let options = ExecutionOptions { max_depth: 500 };
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionOptions {
    /// Maximum evaluation stack depth (for recursion protection).
    ///
    /// Default: 1000
    pub max_depth: usize,
}

impl Default for ExecutionOptions {
    fn default() -> Self {
        Self { max_depth: 1000 }
    }
}

/// Configuration options for the quotient engine.
///
/// # Example
///
/// ```
/// use quotient_core::api::{EngineOptions, ExecutionOptions};
///
/// let options = EngineOptions {
///     execution: ExecutionOptions { max_depth: 500 },
///     ..EngineOptions::default()
/// };
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    pub costs: CostTable,
    pub bridge: BridgeConfig,
    pub workers: WorkerOptions,
    pub execution: ExecutionOptions,
}

impl Default for EngineOptions {
    fn default() -> Self {
        let workers = WorkerOptions::default();
        Self {
            costs: CostTable::default(),
            bridge: BridgeConfig::for_workers(workers.count),
            workers,
            execution: ExecutionOptions::default(),
        }
    }
}

impl EngineOptions {
    pub const ADDITION_MS: &'static str = "TIME_ADDITION_MS";
    pub const SUBTRACTION_MS: &'static str = "TIME_SUBTRACTION_MS";
    pub const MULTIPLICATION_MS: &'static str = "TIME_MULTIPLICATIONS_MS";
    pub const DIVISION_MS: &'static str = "TIME_DIVISIONS_MS";
    pub const COMPUTING_POWER: &'static str = "COMPUTING_POWER";
    pub const BACKOFF_MS: &'static str = "WORKER_BACKOFF_MS";

    /// Read options from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read options through `lookup`. Missing or unparseable values keep
    /// their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let costs = CostTable {
            add_ms: parse_or(&lookup, Self::ADDITION_MS, defaults.costs.add_ms),
            sub_ms: parse_or(&lookup, Self::SUBTRACTION_MS, defaults.costs.sub_ms),
            mul_ms: parse_or(&lookup, Self::MULTIPLICATION_MS, defaults.costs.mul_ms),
            div_ms: parse_or(&lookup, Self::DIVISION_MS, defaults.costs.div_ms),
        };

        let count = parse_or(&lookup, Self::COMPUTING_POWER, defaults.workers.count).max(1);
        let backoff = lookup(Self::BACKOFF_MS)
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .map(|ms| Duration::from_millis(ms.max(1)))
            .unwrap_or(defaults.workers.backoff);

        Self {
            costs,
            bridge: BridgeConfig::for_workers(count),
            workers: WorkerOptions { count, backoff },
            execution: defaults.execution,
        }
    }

    /// Change the worker count, keeping the bridge capacity proportional.
    pub fn with_workers(mut self, count: usize) -> Self {
        let count = count.max(1);
        self.workers.count = count;
        self.bridge.capacity = BridgeConfig::for_workers(count).capacity;
        self
    }
}

fn parse_or<T: FromStr + Copy>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, "ignoring unparseable setting");
            default
        }),
    }
}
