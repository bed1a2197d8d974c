use std::io::{BufRead, Write};

use anyhow::Result;
use gridsweep_core::*;
use rand::prelude::*;
use serde::Serialize;

use crate::render::{render_hidden, render_visible};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Options {
    pub hint: bool,
    pub json: bool,
    pub show_layout: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            hint: true,
            json: false,
            show_layout: false,
        }
    }
}

/// Non-event lines of the `--json` stream.
#[derive(Serialize)]
enum Record<'a> {
    Hint(Coord2),
    DecodeError(DecodeError),
    Outcome(GameOutcome),
    Layout(&'a HiddenBoard),
}

/// How a single game was left.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Flow {
    Finished,
    Exit,
}

/// Console session: reads moves line by line and writes the board and messages back.
pub struct Session<R, W> {
    input: R,
    output: W,
    options: Options,
    rng: SmallRng,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W, options: Options, seed: u64) -> Self {
        Self {
            input,
            output,
            options,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Plays games on the standard board until the player declines another or exits.
    pub fn run(&mut self) -> Result<()> {
        let config = GameConfig::STANDARD;
        self.say("Welcome to gridsweep!")?;
        self.announce_board(config)?;

        loop {
            let game_seed = self.rng.random();
            log::info!("Starting game with seed {}", game_seed);
            let mut game = Game::new_game(config, game_seed)?;

            if self.play(&mut game)? == Flow::Exit || !self.ask_play_again()? {
                break;
            }
            self.say("\nStarting new game...")?;
            self.announce_board(config)?;
        }

        self.say("\nGoodbye!")
    }

    /// Runs one game to its end, or until the player asks to leave.
    pub fn play(&mut self, game: &mut Game) -> Result<Flow> {
        self.draw(game)?;
        if self.options.hint {
            if let Some(coords) = game.hint(&mut self.rng) {
                if self.options.json {
                    self.emit(&Record::Hint(coords))?;
                } else {
                    writeln!(self.output, "HINT: try {}", Move::reveal(coords))?;
                }
            }
        }

        loop {
            let Some(line) = self.prompt("Enter your next move:")? else {
                return Ok(Flow::Exit);
            };

            let mv = match decode(&line) {
                Ok(mv) => mv,
                Err(DecodeError::ExitRequested) => return Ok(Flow::Exit),
                Err(err) => {
                    log::debug!("Rejected input {:?}: {:?}", line, err);
                    if self.options.json {
                        self.emit(&Record::DecodeError(err))?;
                    } else {
                        writeln!(self.output, "\nInvalid move!\n\n{}\n", err)?;
                    }
                    continue;
                }
            };

            let event = game.apply(mv)?;
            self.report(game, &event)?;

            match game.outcome() {
                GameOutcome::InProgress => continue,
                outcome if self.options.json => self.emit(&Record::Outcome(outcome))?,
                GameOutcome::Lost => self.say("\nYou hit a mine!\n\nYou lose!")?,
                GameOutcome::Won => self.say("\nCongratulations! You win!")?,
            }

            if self.options.show_layout {
                if let Some(hidden) = game.hidden_board() {
                    if self.options.json {
                        self.emit(&Record::Layout(hidden))?;
                    } else {
                        write!(self.output, "\n{}", render_hidden(hidden))?;
                    }
                }
            }
            return Ok(Flow::Finished);
        }
    }

    fn report(&mut self, game: &Game, event: &EngineEvent) -> Result<()> {
        if self.options.json {
            return self.emit(event);
        }

        if event.has_update() {
            self.draw(game)
        } else {
            writeln!(self.output, "\nInvalid move!\n\nTry choosing an available space...")?;
            Ok(())
        }
    }

    fn draw(&mut self, game: &Game) -> Result<()> {
        if self.options.json {
            return Ok(());
        }
        write!(self.output, "\n{}", render_visible(game.visible_board()))?;
        writeln!(self.output, "Mines left: {}\n", game.mines_left())?;
        Ok(())
    }

    fn announce_board(&mut self, config: GameConfig) -> Result<()> {
        self.say(&format!(
            "\nThe board will be initialized with size {} x {} and {} mines...",
            config.size.1, config.size.0, config.mines
        ))
    }

    /// Writes a line of player-facing text. The JSON stream carries none.
    fn say(&mut self, text: &str) -> Result<()> {
        if !self.options.json {
            writeln!(self.output, "{}", text)?;
        }
        Ok(())
    }

    /// Writes one JSON value on its own line.
    fn emit(&mut self, value: &impl Serialize) -> Result<()> {
        writeln!(self.output, "{}", serde_json::to_string(value)?)?;
        Ok(())
    }

    fn ask_play_again(&mut self) -> Result<bool> {
        loop {
            let Some(answer) = self.prompt("Play again? Y/N:")? else {
                return Ok(false);
            };
            match answer.trim() {
                "Y" | "y" => return Ok(true),
                "N" | "n" => return Ok(false),
                _ => continue,
            }
        }
    }

    /// Reads one line without its terminator, `None` at end of input.
    /// The JSON stream gets no prompt.
    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        if !self.options.json {
            write!(self.output, "{}", message)?;
        }
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}
