//! ASCII stand-in for the watch display.

use std::fmt;

use snake_core::constants::SNAKE_STEP;
use snake_core::{Apple, Board, Debrief, Presenter, Recorder, SeededRng, Snake};

/// One redraw: the board on a 10-pixel grid plus the status bar text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Frame {
    pub score: String,
    pub bonus: String,
    pub rows: Vec<String>,
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} | {}", self.score, self.bonus)?;
        for row in &self.rows {
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}

/// Records every call and, when asked, keeps a [`Frame`] per redraw.
pub struct TerminalPresenter {
    recorder: Recorder,
    board: Board,
    keep_frames: bool,
    frames: Vec<Frame>,
    debrief_rng: SeededRng,
    last_debrief: Option<Debrief>,
}

impl TerminalPresenter {
    pub fn new(board: Board, seed: u32, keep_frames: bool) -> Self {
        Self {
            recorder: Recorder::new(),
            board,
            keep_frames,
            frames: Vec::new(),
            debrief_rng: SeededRng::new(seed),
            last_debrief: None,
        }
    }

    pub fn recorder(&self) -> &Recorder {
        &self.recorder
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn last_debrief(&self) -> Option<&Debrief> {
        self.last_debrief.as_ref()
    }

    fn columns(&self) -> usize {
        (self.board.width / SNAKE_STEP + 1) as usize
    }

    fn lines(&self) -> usize {
        (self.board.height / SNAKE_STEP + 1) as usize
    }

    fn draw(&self, snake: &Snake, apple: &Apple) -> Vec<String> {
        let columns = self.columns();
        let lines = self.lines();
        let mut grid = vec![vec!['.'; columns]; lines];

        let mut plot = |x: i32, y: i32, glyph: char| {
            let (col, line) = (x.div_euclid(SNAKE_STEP), y.div_euclid(SNAKE_STEP));
            if col < 0 || line < 0 {
                return;
            }
            if let Some(cell) = grid
                .get_mut(line as usize)
                .and_then(|row| row.get_mut(col as usize))
            {
                *cell = glyph;
            }
        };

        plot(apple.position.x, apple.position.y, '*');
        for segment in snake.segments().skip(1) {
            plot(segment.x, segment.y, 'o');
        }
        let head = snake.head();
        plot(head.x, head.y, '@');

        grid.into_iter().map(|row| row.into_iter().collect()).collect()
    }

    fn current_frame(&mut self) -> Option<&mut Frame> {
        if self.keep_frames {
            self.frames.last_mut()
        } else {
            None
        }
    }
}

impl Presenter for TerminalPresenter {
    fn render(&mut self, snake: &Snake, apple: &Apple) {
        self.recorder.render(snake, apple);
        if self.keep_frames {
            let rows = self.draw(snake, apple);
            self.frames.push(Frame {
                rows,
                ..Frame::default()
            });
        }
    }

    fn set_score_text(&mut self, text: &str) {
        self.recorder.set_score_text(text);
        if let Some(frame) = self.current_frame() {
            frame.score = text.to_string();
        }
    }

    fn set_bonus_text(&mut self, text: &str) {
        self.recorder.set_bonus_text(text);
        if let Some(frame) = self.current_frame() {
            frame.bonus = text.to_string();
        }
    }

    fn short_pulse(&mut self) {
        self.recorder.short_pulse();
    }

    fn double_pulse(&mut self) {
        self.recorder.double_pulse();
    }

    fn show_debrief(&mut self, score: u32) {
        self.recorder.show_debrief(score);
        self.last_debrief = Some(Debrief::for_score(score, &mut self.debrief_rng));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snake_core::{Direction, Position};

    #[test]
    fn frame_marks_head_body_and_apple() {
        let board = Board::new(40, 40);
        let mut presenter = TerminalPresenter::new(board, 1, true);
        let snake = Snake::from_segments(
            [
                Position::new(25, 5),
                Position::new(15, 5),
                Position::new(5, 5),
            ],
            Direction::Right,
        )
        .unwrap();

        presenter.render(&snake, &Apple::at(Position::new(30, 30)));
        presenter.set_score_text("Score: 3");
        presenter.set_bonus_text("Bonus: 1");

        let frame = &presenter.frames()[0];
        assert_eq!(frame.rows.len(), 5);
        assert_eq!(frame.rows[0], "oo@..");
        assert_eq!(frame.rows[3], "...*.");
        assert!(frame.to_string().starts_with("Score: 3 | Bonus: 1\n"));
    }

    #[test]
    fn frames_are_only_kept_on_request() {
        let mut presenter = TerminalPresenter::new(Board::new(40, 40), 1, false);
        let snake = Snake::new(Position::new(5, 5));
        presenter.render(&snake, &Apple::at(Position::new(30, 30)));
        presenter.set_score_text("Score: 0");
        assert!(presenter.frames().is_empty());
        assert_eq!(presenter.recorder().renders(), 1);
    }

    #[test]
    fn debrief_picks_lines_for_the_score() {
        let mut presenter = TerminalPresenter::new(Board::new(40, 40), 5, false);
        presenter.show_debrief(200);
        let debrief = presenter.last_debrief().unwrap();
        assert_eq!(debrief.score, 200);
        assert_eq!(debrief.title, snake_core::debrief::TITLES[9]);
        assert_eq!(presenter.recorder().debriefs(), vec![200]);
    }
}
