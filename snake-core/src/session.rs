use alloc::format;

use serde::{Deserialize, Serialize};

use crate::apple::{place_apple, Apple};
use crate::clock::{Fired, Scheduler, TimerHandle, TimerToken};
use crate::config::SessionConfig;
use crate::constants::{APPLE_SIZE, SNAKE_START_X, SNAKE_START_Y};
use crate::error::{ConfigError, RuleCode};
use crate::geometry::{Board, Position};
use crate::input::{Button, Command};
use crate::presenter::Presenter;
use crate::rng::SeededRng;
use crate::snake::{Direction, MoveOutcome, Snake};


/// Per-round flags and counters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub alive: bool,
    pub paused: bool,
    /// Round is over (death or view closed); the next `setup` consumes it.
    pub resetting: bool,
    pub score: u32,
    pub bonus: u32,
    /// Single slot, last press wins.
    pub queued_input: Option<Command>,
}

impl GameState {
    fn fresh() -> Self {
        Self {
            alive: true,
            paused: false,
            resetting: false,
            score: 0,
            bonus: 0,
            queued_input: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub round: u32,
    pub ticks: u64,
    pub score: u32,
    pub bonus: u32,
    pub alive: bool,
    pub paused: bool,
    pub resetting: bool,
    pub direction: Direction,
    pub head: Position,
    pub length: usize,
    pub apple: Position,
}

/// One app session: the state, the snake and the apple, plus the handles of
/// the timers that drive them.
///
/// Handlers take the scheduler and presenter by reference; the session never
/// stores either.
pub struct GameSession {
    config: SessionConfig,
    board: Board,
    state: GameState,
    snake: Snake,
    apple: Apple,
    rng: SeededRng,
    tick_timer: Option<TimerHandle>,
    bonus_timer: Option<TimerHandle>,
    round: u32,
    ticks: u64,
}

impl GameSession {
    pub fn new(config: SessionConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let start = Position::new(SNAKE_START_X, SNAKE_START_Y);
        let mut session = Self {
            board: config.board(),
            config,
            state: GameState::fresh(),
            snake: Snake::new(start),
            apple: Apple::at(start),
            rng: SeededRng::new(config.seed),
            tick_timer: None,
            bonus_timer: None,
            round: 0,
            ticks: 0,
        };
        session.setup();
        Ok(session)
    }

    #[inline]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[inline]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    #[inline]
    pub fn apple(&self) -> &Apple {
        &self.apple
    }

    #[inline]
    pub fn round(&self) -> u32 {
        self.round
    }

    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// A tick is armed and the round has not been torn down.
    pub fn is_running(&self) -> bool {
        self.tick_timer.is_some() && !self.state.resetting
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            round: self.round,
            ticks: self.ticks,
            score: self.state.score,
            bonus: self.state.bonus,
            alive: self.state.alive,
            paused: self.state.paused,
            resetting: self.state.resetting,
            direction: self.snake.direction(),
            head: self.snake.head(),
            length: self.snake.len(),
            apple: self.apple.position,
        }
    }

    /// Start a fresh round in place: single head back at the start cell,
    /// counters cleared, snake regrown, apple re-placed.
    pub fn setup(&mut self) {
        self.snake.reset(Position::new(SNAKE_START_X, SNAKE_START_Y));
        self.state = GameState::fresh();
        for _ in 1..self.config.start_length {
            self.snake.grow_head();
        }
        self.relocate_apple();
        self.ticks = 0;

        tracing::debug!(
            head_x = self.snake.head().x,
            head_y = self.snake.head().y,
            apple_x = self.apple.position.x,
            apple_y = self.apple.position.y,
            "round set up"
        );
    }

    /// Set up a round and arm its first tick.
    pub fn start(&mut self, scheduler: &mut dyn Scheduler) {
        self.cancel_timers(scheduler);
        self.setup();
        self.round += 1;
        tracing::info!(round = self.round, seed = self.config.seed, "round started");
        self.tick_timer = Some(scheduler.schedule(self.config.tick_interval_ms, TimerToken::Tick));
    }

    pub fn queue_input(&mut self, command: Command) {
        self.state.queued_input = Some(command);
    }

    pub fn press(&mut self, button: Button) {
        self.queue_input(Command::from(button));
    }

    /// Dispatch a fired timer. Timers this session no longer holds a handle
    /// for are dropped.
    pub fn on_timer(
        &mut self,
        fired: Fired,
        scheduler: &mut dyn Scheduler,
        presenter: &mut dyn Presenter,
    ) {
        match fired.token {
            TimerToken::Tick if self.tick_timer == Some(fired.handle) => {
                self.tick_timer = None;
                self.tick(scheduler, presenter);
            }
            TimerToken::BonusDecay if self.bonus_timer == Some(fired.handle) => {
                self.bonus_timer = None;
                self.decay_bonus(scheduler);
            }
            token => {
                tracing::debug!(?token, handle = fired.handle.id(), "ignoring stale timer");
            }
        }
    }

    fn tick(&mut self, scheduler: &mut dyn Scheduler, presenter: &mut dyn Presenter) {
        if !self.state.alive {
            self.end(true, scheduler, presenter);
            return;
        }
        if !self.state.resetting {
            self.tick_timer =
                Some(scheduler.schedule(self.config.tick_interval_ms, TimerToken::Tick));
        }

        self.ticks += 1;

        if self.state.paused && self.state.queued_input != Some(Command::TogglePause) {
            self.refresh_display(presenter);
            return;
        }

        if let Some(command) = self.state.queued_input.take() {
            self.apply(command);
        }

        if self.snake.advance(&self.board) == MoveOutcome::Collided {
            self.state.alive = false;
            tracing::info!(
                round = self.round,
                score = self.state.score,
                length = self.snake.len(),
                "snake ran into itself"
            );
        }

        if self.state.alive && self.apple.is_eaten_by(self.snake.head()) {
            self.eat_apple(scheduler, presenter);
        }

        self.refresh_display(presenter);
    }

    fn apply(&mut self, command: Command) {
        match command {
            Command::TurnCcw => self.snake.turn_ccw(),
            Command::TurnCw => self.snake.turn_cw(),
            Command::TogglePause => self.state.paused = !self.state.paused,
        }
    }

    fn eat_apple(&mut self, scheduler: &mut dyn Scheduler, presenter: &mut dyn Presenter) {
        let bonus_before = self.state.bonus;

        self.snake.grow_head();
        self.relocate_apple();
        self.state.score += 1 + bonus_before;
        presenter.short_pulse();

        if self.bonus_timer.is_none() {
            self.bonus_timer =
                Some(scheduler.schedule(self.config.bonus_interval_ms, TimerToken::BonusDecay));
        }
        self.state.bonus = (self.snake.len() / 2) as u32;

        tracing::debug!(
            score = self.state.score,
            bonus = self.state.bonus,
            length = self.snake.len(),
            "apple eaten"
        );
    }

    /// Count the bonus down by one; stays armed only while there was
    /// something to take away.
    fn decay_bonus(&mut self, scheduler: &mut dyn Scheduler) {
        if self.state.bonus == 0 {
            return;
        }
        self.state.bonus -= 1;
        self.bonus_timer =
            Some(scheduler.schedule(self.config.bonus_interval_ms, TimerToken::BonusDecay));
    }

    fn relocate_apple(&mut self) {
        match place_apple(&self.board, &self.snake, &mut self.rng) {
            Ok(position) => self.apple = Apple::at(position),
            Err(err) => {
                tracing::warn!(%err, "keeping previous apple");
            }
        }
    }

    fn refresh_display(&self, presenter: &mut dyn Presenter) {
        presenter.render(&self.snake, &self.apple);
        if self.state.paused {
            presenter.set_score_text("Paused");
        } else {
            presenter.set_score_text(&format!("Score: {}", self.state.score));
        }
        presenter.set_bonus_text(&format!("Bonus: {}", self.state.bonus));
    }

    /// Finish the round. A natural death buzzes twice and hands the score to
    /// the results screen; a closed view does neither.
    pub fn end(
        &mut self,
        finished: bool,
        scheduler: &mut dyn Scheduler,
        presenter: &mut dyn Presenter,
    ) {
        self.cancel_timers(scheduler);
        if finished {
            presenter.double_pulse();
            presenter.show_debrief(self.state.score);
            self.state.resetting = true;
            tracing::info!(round = self.round, score = self.state.score, "round over");
        }
    }

    /// The game view went away mid-round.
    pub fn close(&mut self, scheduler: &mut dyn Scheduler, presenter: &mut dyn Presenter) {
        self.state.resetting = true;
        self.end(false, scheduler, presenter);
        tracing::info!(round = self.round, "view closed");
    }

    fn cancel_timers(&mut self, scheduler: &mut dyn Scheduler) {
        if let Some(handle) = self.tick_timer.take() {
            scheduler.cancel(handle);
        }
        if let Some(handle) = self.bonus_timer.take() {
            scheduler.cancel(handle);
        }
    }

    pub fn validate_invariants(&self) -> Result<(), RuleCode> {
        if self.snake.is_empty() {
            return Err(RuleCode::SnakeEmpty);
        }

        let apple = self.apple.position;
        if !self.board.contains(apple) {
            return Err(RuleCode::AppleOutOfBounds);
        }
        if apple.x % APPLE_SIZE != 0 || apple.y % APPLE_SIZE != 0 {
            return Err(RuleCode::AppleOffGrid);
        }

        let length = self.snake.len();
        if self.state.bonus as usize > length / 2 {
            return Err(RuleCode::BonusAboveCap);
        }

        let grown = length.saturating_sub(self.config.start_length);
        if (self.state.score as usize) < grown {
            return Err(RuleCode::ScoreBelowGrowth);
        }

        Ok(())
    }
}
