//! The game session: owns all mutable state and exposes the command and
//! query surface used by a presentation layer.
//!
//! ## Round protocol
//!
//! `roll_dice → select_project → place_project_temp* → save_changes → next_round`
//!
//! Out-of-order commands are rejected, never queued. Every command either
//! applies fully or returns an error with the session unchanged: all
//! checks run before the first write.
//!
//! The first player added is the tracked player; placements and scoring
//! act on that player's board.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, info, warn};

use super::phase::Phase;
use crate::board::{Board, Cell, CellType, ProvisionalBuffer, StageOutcome};
use crate::core::config::{GameConfig, MAX_ROUNDS_LIMIT};
use crate::core::dice::Dice;
use crate::core::error::{CommandError, CommandResult, ContractViolation, Rejection};
use crate::core::player::{Player, PlayerId};
use crate::core::rng::{DiceRng, DiceRngState};
use crate::rules;

/// Result of a successful commit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitSummary {
    /// Cells written to the board.
    pub placed: usize,
    /// Round score recorded by this commit. `None` during round 0.
    pub round_score: Option<i64>,
}

/// Result of a successful `next_round`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundAdvance {
    /// Moved on to this round.
    Round(u32),
    /// Final round done; the session is now terminal.
    GameOver { total_score: i64, final_bonus: i64 },
}

/// Complete mutable state of one game.
#[derive(Clone, Debug)]
pub struct GameSession {
    config: GameConfig,
    rng: DiceRng,
    current_round: u32,
    phase: Phase,
    dice: Dice,
    players: Vec<Player>,
    round_scores: Vec<i64>,
    total_score: i64,
    used_bonus_rounds: FxHashSet<u32>,
    selected_project: Option<CellType>,
    buffer: ProvisionalBuffer,
    changes_committed: bool,
    dice_rolled_this_round: bool,
    square_placed_on_board: bool,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl GameSession {
    /// Create a session in the planning phase at round 0.
    pub fn new(config: GameConfig) -> Self {
        let rng = config.seed.map_or_else(DiceRng::from_entropy, DiceRng::new);
        let round_scores = vec![0; config.max_rounds.min(MAX_ROUNDS_LIMIT) as usize];

        Self {
            config,
            rng,
            current_round: 0,
            phase: Phase::Planning,
            dice: Dice::unrolled(),
            players: Vec::new(),
            round_scores,
            total_score: 0,
            used_bonus_rounds: FxHashSet::default(),
            selected_project: None,
            buffer: ProvisionalBuffer::new(),
            changes_committed: false,
            dice_rolled_this_round: false,
            square_placed_on_board: false,
        }
    }

    // === Commands ===

    /// Add a player with an empty board. Ids are sequential from 1.
    pub fn add_player(&mut self, name: impl Into<String>) -> CommandResult<PlayerId> {
        let name = name.into();
        logged("add_player", self.try_add_player(name))
    }

    /// Start the game. Only legal in planning at round 0 with a player.
    pub fn start_game(&mut self) -> CommandResult {
        logged("start_game", self.try_start_game())
    }

    /// Roll both dice from the session RNG.
    pub fn roll_dice(&mut self) -> CommandResult<Dice> {
        logged("roll_dice", self.try_roll(None))
    }

    /// Use externally rolled dice. Same gating as `roll_dice`.
    pub fn roll_dice_with(&mut self, die1: u8, die2: u8) -> CommandResult<Dice> {
        logged("roll_dice", self.try_roll(Some((die1, die2))))
    }

    /// Choose the project that subsequent placements build.
    pub fn select_project(&mut self, kind: CellType) -> CommandResult {
        logged("select_project", self.try_select_project(kind))
    }

    /// Stage the selected project at `(row, col)` (0-based).
    pub fn place_project_temp(&mut self, row: usize, col: usize) -> CommandResult<StageOutcome> {
        logged("place_project_temp", self.try_place(row, col))
    }

    /// Discard this round's provisional placements. Returns how many.
    pub fn clear_temp_changes(&mut self) -> CommandResult<usize> {
        logged("clear_temp_changes", self.try_clear())
    }

    /// Validate the buffer as a whole and write it to the board.
    pub fn save_changes(&mut self) -> CommandResult<CommitSummary> {
        logged("save_changes", self.try_commit())
    }

    /// Advance to the next round, or end the game after `max_rounds`.
    ///
    /// `None` uses the configured round count.
    pub fn next_round(&mut self, max_rounds: Option<u32>) -> CommandResult<RoundAdvance> {
        logged("next_round", self.try_next_round(max_rounds))
    }

    /// Spend the one-shot bonus of `round`, selecting `kind`.
    ///
    /// Only the current round's bonus can be spent.
    pub fn use_bonus_round(&mut self, round: u32, kind: CellType) -> CommandResult {
        logged("use_bonus_round", self.try_use_bonus(round, kind))
    }

    // === Queries ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    #[must_use]
    pub fn dice(&self) -> Dice {
        self.dice
    }

    #[must_use]
    pub fn dice1(&self) -> Option<u8> {
        self.dice.die1()
    }

    #[must_use]
    pub fn dice2(&self) -> Option<u8> {
        self.dice.die2()
    }

    #[must_use]
    pub fn dice_sum(&self) -> u8 {
        self.dice.sum()
    }

    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Look up a player by id.
    pub fn player(&self, id: PlayerId) -> Result<&Player, ContractViolation> {
        self.players
            .iter()
            .find(|p| p.id == id)
            .ok_or(ContractViolation::UnknownPlayer(id))
    }

    /// The tracked player, if any has been added.
    #[must_use]
    pub fn active_player(&self) -> Option<&Player> {
        self.players.first()
    }

    #[must_use]
    pub fn active_board(&self) -> Option<&Board> {
        self.active_player().map(|p| &p.board)
    }

    #[must_use]
    pub fn provisional(&self) -> &ProvisionalBuffer {
        &self.buffer
    }

    #[must_use]
    pub fn total_score(&self) -> i64 {
        self.total_score
    }

    /// Recorded round scores, indexed by `round - 1`.
    #[must_use]
    pub fn round_scores(&self) -> &[i64] {
        &self.round_scores
    }

    #[must_use]
    pub fn selected_project(&self) -> Option<CellType> {
        self.selected_project
    }

    /// Bonus rounds already spent, ascending.
    #[must_use]
    pub fn used_bonus_rounds(&self) -> Vec<u32> {
        let mut rounds: Vec<_> = self.used_bonus_rounds.iter().copied().collect();
        rounds.sort_unstable();
        rounds
    }

    #[must_use]
    pub fn changes_committed(&self) -> bool {
        self.changes_committed
    }

    #[must_use]
    pub fn dice_rolled_this_round(&self) -> bool {
        self.dice_rolled_this_round
    }

    /// A square is committed or staged.
    #[must_use]
    pub fn square_placed_on_board(&self) -> bool {
        self.square_placed_on_board
    }

    #[must_use]
    pub fn can_start_game(&self) -> bool {
        !self.players.is_empty()
    }

    #[must_use]
    pub fn can_roll_dice(&self) -> bool {
        !self.phase.is_terminal() && !self.dice_rolled_this_round && !self.changes_committed
    }

    #[must_use]
    pub fn can_proceed_to_next_round(&self) -> bool {
        !self.phase.is_terminal() && self.buffer.is_empty() && self.changes_committed
    }

    #[must_use]
    pub fn is_planning(&self) -> bool {
        self.current_round == 0
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Projects the legend offers for the current dice.
    #[must_use]
    pub fn available_projects(&self) -> SmallVec<[CellType; 5]> {
        rules::available_projects(&self.dice)
    }

    /// Columns (1-based) named by the current dice.
    #[must_use]
    pub fn allowed_columns(&self) -> SmallVec<[u8; 2]> {
        rules::allowed_columns(&self.dice)
    }

    /// Columns (1-based) where `kind` is dice-legal this round.
    #[must_use]
    pub fn legal_columns(&self, kind: CellType) -> SmallVec<[u8; 6]> {
        rules::legal_columns(&self.dice, kind)
    }

    /// Dice RNG position, for replaying a seeded game.
    #[must_use]
    pub fn rng_state(&self) -> DiceRngState {
        self.rng.state()
    }

    // === Command bodies ===

    fn try_add_player(&mut self, name: String) -> CommandResult<PlayerId> {
        self.ensure_running()?;

        let id = PlayerId::new(self.players.len() as u32 + 1);
        debug!(%id, %name, "player added");
        self.players.push(Player::new(id, name));
        Ok(id)
    }

    fn try_start_game(&mut self) -> CommandResult {
        self.ensure_running()?;
        if self.phase != Phase::Planning || self.current_round != 0 {
            return Err(Rejection::AlreadyStarted.into());
        }
        if !self.can_start_game() {
            return Err(Rejection::NoPlayers.into());
        }

        self.reset_round_state();
        info!(players = self.players.len(), "game started");
        Ok(())
    }

    fn try_roll(&mut self, forced: Option<(u8, u8)>) -> CommandResult<Dice> {
        let forced = forced.map(|(a, b)| Dice::rolled(a, b)).transpose()?;
        self.ensure_running()?;
        if self.dice_rolled_this_round {
            return Err(Rejection::DiceAlreadyRolled.into());
        }
        if self.changes_committed {
            return Err(Rejection::ChangesCommitted.into());
        }

        let dice = match forced {
            Some(dice) => dice,
            None => {
                let (die1, die2) = self.rng.roll_pair();
                Dice::rolled(die1, die2)?
            }
        };

        self.dice = dice;
        self.phase = Phase::Building;
        self.dice_rolled_this_round = true;
        self.changes_committed = false;
        self.buffer.clear();
        self.selected_project = None;
        self.refresh_square_flag();

        debug!(round = self.current_round, %dice, sum = dice.sum(), "dice rolled");
        Ok(dice)
    }

    fn try_select_project(&mut self, kind: CellType) -> CommandResult {
        self.ensure_running()?;
        self.check_selectable(kind)?;

        self.selected_project = Some(kind);
        debug!(project = %kind, "project selected");
        Ok(())
    }

    fn try_place(&mut self, row: usize, col: usize) -> CommandResult<StageOutcome> {
        Board::check_bounds(row, col)?;
        let board = self.active_board().ok_or(ContractViolation::NoActivePlayer)?;
        self.ensure_running()?;

        let kind = self.selected_project.ok_or(Rejection::NoProjectSelected)?;
        if !self.dice_rolled_this_round {
            return Err(Rejection::DiceNotRolled.into());
        }
        if self.changes_committed {
            return Err(Rejection::ChangesCommitted.into());
        }

        // Columns are die faces, 1..=6
        let column = (col + 1) as u8;
        rules::check_placement(&self.dice, kind, column)?;

        if board.get(row, col).is_some_and(Cell::is_occupied) {
            let row = (row + 1) as u8;
            return Err(Rejection::CellOccupied { row, column }.into());
        }

        if kind == CellType::Square {
            let staged_elsewhere = self
                .buffer
                .iter()
                .any(|e| e.kind == CellType::Square && (e.row, e.col) != (row, col));
            if board.count(CellType::Square) > 0 || staged_elsewhere {
                return Err(Rejection::SquareAlreadyPlaced.into());
            }
        }

        if self.buffer.column_has(col, kind) || board.column_has(col, kind) {
            return Err(Rejection::DuplicateInColumn { column, project: kind }.into());
        }

        let outcome = self.buffer.stage(row, col, kind);
        self.refresh_square_flag();

        debug!(row, column, project = %kind, ?outcome, "project staged");
        Ok(outcome)
    }

    fn try_clear(&mut self) -> CommandResult<usize> {
        self.ensure_running()?;

        let discarded = self.buffer.clear();
        self.refresh_square_flag();

        if discarded > 0 {
            debug!(discarded, "provisional placements discarded");
        }
        Ok(discarded)
    }

    fn try_commit(&mut self) -> CommandResult<CommitSummary> {
        if self.players.is_empty() {
            return Err(ContractViolation::NoActivePlayer.into());
        }
        self.ensure_running()?;
        if self.changes_committed {
            return Err(Rejection::ChangesCommitted.into());
        }
        rules::validate_commit(&self.dice, &self.buffer)?;

        let mut placed = 0;
        if let Some(player) = self.players.first_mut() {
            for entry in self.buffer.iter() {
                if let Some(cell) = player.board.get_mut(entry.row, entry.col) {
                    if cell.build(entry.kind) {
                        placed += 1;
                    }
                }
            }
        }

        self.buffer.clear();
        self.changes_committed = true;
        self.selected_project = None;
        if self.phase == Phase::Bonus {
            self.phase = Phase::Building;
        }
        self.refresh_square_flag();

        let round_score = (self.current_round > 0).then(|| self.record_round_score());

        debug!(round = self.current_round, placed, ?round_score, "changes saved");
        Ok(CommitSummary { placed, round_score })
    }

    fn try_next_round(&mut self, max_rounds: Option<u32>) -> CommandResult<RoundAdvance> {
        self.ensure_running()?;
        if !self.buffer.is_empty() {
            return Err(Rejection::UnsavedChanges.into());
        }
        if !self.changes_committed {
            return Err(Rejection::NotCommitted.into());
        }

        let max_rounds = max_rounds.unwrap_or(self.config.max_rounds);
        if self.current_round < max_rounds {
            self.current_round += 1;
            self.phase = Phase::Building;
            self.reset_round_state();

            info!(round = self.current_round, max_rounds, "advanced to next round");
            return Ok(RoundAdvance::Round(self.current_round));
        }

        let final_bonus = self
            .active_board()
            .map_or(0, |board| rules::final_bonus(board, &self.config));
        self.total_score = rules::total_of(&self.round_scores) + final_bonus;
        self.sync_player_score();
        self.phase = Phase::Scoring;

        info!(total_score = self.total_score, final_bonus, "game over");
        Ok(RoundAdvance::GameOver {
            total_score: self.total_score,
            final_bonus,
        })
    }

    fn try_use_bonus(&mut self, round: u32, kind: CellType) -> CommandResult {
        self.ensure_running()?;
        if !self.config.is_bonus_round(round) {
            return Err(Rejection::NotBonusRound { round }.into());
        }
        if self.used_bonus_rounds.contains(&round) {
            return Err(Rejection::BonusUsed { round }.into());
        }
        if round != self.current_round {
            let current = self.current_round;
            return Err(Rejection::BonusNotCurrentRound { round, current }.into());
        }
        if !self.dice_rolled_this_round {
            return Err(Rejection::DiceNotRolled.into());
        }
        if self.changes_committed {
            return Err(Rejection::ChangesCommitted.into());
        }
        self.check_selectable(kind)?;

        self.used_bonus_rounds.insert(round);
        self.selected_project = Some(kind);
        self.phase = Phase::Bonus;
        if let Some(player) = self.players.first_mut() {
            player.used_bonuses.insert(format!("round {round}: {kind}"));
        }

        debug!(round, project = %kind, "bonus round used");
        Ok(())
    }

    // === Helpers ===

    fn ensure_running(&self) -> Result<(), Rejection> {
        if self.phase.is_terminal() {
            Err(Rejection::GameOver)
        } else {
            Ok(())
        }
    }

    fn check_selectable(&self, kind: CellType) -> Result<(), Rejection> {
        if !kind.is_project() {
            return Err(Rejection::NotAProject);
        }
        if kind == CellType::Square && self.square_placed_on_board {
            return Err(Rejection::SquareAlreadyPlaced);
        }
        Ok(())
    }

    /// Clear everything that lives for one round only.
    fn reset_round_state(&mut self) {
        self.changes_committed = false;
        self.dice_rolled_this_round = false;
        self.buffer.clear();
        self.selected_project = None;
        self.dice = Dice::unrolled();
        self.refresh_square_flag();
    }

    fn refresh_square_flag(&mut self) {
        let committed = self
            .active_board()
            .is_some_and(|board| board.count(CellType::Square) > 0);
        self.square_placed_on_board = committed || self.buffer.contains(CellType::Square);
    }

    fn record_round_score(&mut self) -> i64 {
        let score = self.active_board().map_or(0, rules::round_score);
        let index = (self.current_round - 1) as usize;
        if index >= self.round_scores.len() {
            self.round_scores.resize(index + 1, 0);
        }
        self.round_scores[index] = score;
        self.total_score = rules::total_of(&self.round_scores);
        self.sync_player_score();

        debug!(round = self.current_round, score, total = self.total_score, "round scored");
        score
    }

    fn sync_player_score(&mut self) {
        let total = self.total_score;
        if let Some(player) = self.players.first_mut() {
            player.score = total;
        }
    }
}

/// Log a failed command at warn level and pass the result through.
fn logged<T>(command: &'static str, result: CommandResult<T>) -> CommandResult<T> {
    match &result {
        Err(CommandError::Rejected(reason)) => warn!(command, %reason, "command rejected"),
        Err(CommandError::Contract(violation)) => {
            warn!(command, %violation, "contract violation")
        }
        Ok(_) => {}
    }
    result
}
