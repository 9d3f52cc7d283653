//! Benchmark circuits for the gatesim logic simulator.
//!
//! Provides pre-built boards for benchmarking:
//!
//! - [`buffer_chain`]: a NOT followed by `n` OR buffers, one long path
//! - [`fan_out`]: one driver broadcasting to `n` readers
//! - [`switch_bank`]: `n` switches, each driving its own NOT gate

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use gatesim_components::{Gate, Switch};
use gatesim_core::{ComponentId, SocketId, WiringError};
use gatesim_engine::{Board, BoardConfig, BoardError, ConfigError};

/// Errors building a benchmark board.
#[derive(Debug)]
pub enum ProfileError {
    /// The board configuration was rejected.
    Config(ConfigError),
    /// Wiring failed.
    Wiring(WiringError),
    /// Registration failed.
    Board(BoardError),
}

impl std::fmt::Display for ProfileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Wiring(e) => write!(f, "wiring: {e}"),
            Self::Board(e) => write!(f, "board: {e}"),
        }
    }
}

impl std::error::Error for ProfileError {}

impl From<ConfigError> for ProfileError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<WiringError> for ProfileError {
    fn from(e: WiringError) -> Self {
        Self::Wiring(e)
    }
}

impl From<BoardError> for ProfileError {
    fn from(e: BoardError) -> Self {
        Self::Board(e)
    }
}

/// A board plus the handles a benchmark drives and observes.
pub struct Profile {
    /// The settled board.
    pub board: Board,
    /// The socket the benchmark toggles.
    pub input: SocketId,
    /// The socket at the far end of the circuit.
    pub output: SocketId,
}

/// A NOT gate followed by `n` OR gates used as buffers, all registered.
///
/// Toggling `input` ripples through `n + 1` components. In recursive
/// mode that is `n + 1` nested updates, so `config.max_depth` must be at
/// least `n + 1`.
pub fn buffer_chain(config: BoardConfig, n: usize) -> Result<Profile, ProfileError> {
    let mut board = Board::new(config)?;
    let head = board.create(Gate::not())?;
    let mut ids = vec![head];
    let mut prev = board.output(head, 0)?;
    for _ in 0..n {
        let buf = board.create(Gate::or())?;
        let next = board.input(buf, 0)?;
        board.connect(&[prev, next])?;
        prev = board.output(buf, 0)?;
        ids.push(buf);
    }
    board.add_components(&ids)?;
    let input = board.input(head, 0)?;
    Ok(Profile {
        board,
        input,
        output: prev,
    })
}

/// One OR gate driving `n` NOT gates through a single connection.
pub fn fan_out(config: BoardConfig, n: usize) -> Result<Profile, ProfileError> {
    let mut board = Board::new(config)?;
    let driver = board.create(Gate::or())?;
    let mut members = vec![board.output(driver, 0)?];
    let mut ids = vec![driver];
    let mut last = None;
    for _ in 0..n {
        let not = board.create(Gate::not())?;
        members.push(board.input(not, 0)?);
        ids.push(not);
        last = Some(not);
    }
    board.connect(&members)?;
    board.add_components(&ids)?;
    let input = board.input(driver, 0)?;
    let output = match last {
        Some(id) => board.output(id, 0)?,
        None => members[0],
    };
    Ok(Profile {
        board,
        input,
        output,
    })
}

/// `n` switches laid out in rows of 16, each driving one NOT gate.
///
/// Returns the board and the switch IDs; every tick polls all `n`.
pub fn switch_bank(
    config: BoardConfig,
    n: usize,
) -> Result<(Board, Vec<ComponentId>), ProfileError> {
    let mut board = Board::new(config)?;
    let mut switches = Vec::with_capacity(n);
    let mut ids = Vec::with_capacity(2 * n);
    for i in 0..n {
        let x = (i % 16) as f32 * 70.0;
        let y = (i / 16) as f32 * 60.0;
        let sw = board.create(Switch::new().at(x, y))?;
        let not = board.create(Gate::not())?;
        let members = [board.output(sw, 0)?, board.input(not, 0)?];
        board.connect(&members)?;
        switches.push(sw);
        ids.extend([sw, not]);
    }
    board.add_components(&ids)?;
    Ok((board, switches))
}
