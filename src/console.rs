//! Plain console front end
//!
//! Reads single-key commands and the final accusation from any buffered
//! reader and writes the story to any writer, so the whole game can be
//! driven from a script as easily as from a terminal.

use crate::data::Side;
use crate::game::{Command, Game, GamePhase, LeafPolicy, Verdict};
use crate::Result;
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Where player input comes from. Calls block until input is available.
pub trait PlayerInput {
    /// Next command key, skipping whitespace. `None` once input runs out.
    fn next_key(&mut self) -> io::Result<Option<char>>;

    /// Next non-blank line. Unread keys on the current line are discarded.
    fn next_line(&mut self) -> io::Result<Option<String>>;
}

/// [`PlayerInput`] over a line-oriented reader such as stdin
pub struct LineInput<R> {
    reader: R,
    pending: VecDeque<char>,
}

impl<R: BufRead> LineInput<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
        }
    }

    fn fill(&mut self) -> io::Result<bool> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(false);
        }
        self.pending.extend(line.chars());
        Ok(true)
    }
}

impl<R: BufRead> PlayerInput for LineInput<R> {
    fn next_key(&mut self) -> io::Result<Option<char>> {
        loop {
            while let Some(key) = self.pending.pop_front() {
                if !key.is_whitespace() {
                    return Ok(Some(key));
                }
            }
            if !self.fill()? {
                return Ok(None);
            }
        }
    }

    fn next_line(&mut self) -> io::Result<Option<String>> {
        self.pending.clear();
        loop {
            if !self.fill()? {
                return Ok(None);
            }
            let line: String = self.pending.drain(..).collect();
            let line = line.trim_end_matches(['\r', '\n']);
            if !line.trim().is_empty() {
                return Ok(Some(line.to_string()));
            }
        }
    }
}

/// Play a whole game: explore, list the clues, take the accusation.
pub fn run<I: PlayerInput, W: Write>(
    game: &mut Game,
    input: &mut I,
    out: &mut W,
) -> Result<Verdict> {
    writeln!(out, "--- Welcome to Detective Quest ---")?;
    writeln!(out, "{}", game.title)?;

    let mut shown = 0;
    while game.phase == GamePhase::Exploring {
        shown = flush_messages(game, shown, out)?;
        write_choices(game, out)?;

        let command = match input.next_key()? {
            Some(key) => Command::parse(key),
            None => Command::Quit,
        };
        game.execute(command);
    }
    shown = flush_messages(game, shown, out)?;

    writeln!(out)?;
    writeln!(out, "Clues collected (alphabetical):")?;
    if game.notebook().is_empty() {
        writeln!(out, "  (none)")?;
    }
    for clue in game.clues() {
        writeln!(out, "  - {}", clue)?;
    }

    writeln!(out)?;
    writeln!(out, "Suspects: {}", game.suspects().join(", "))?;
    write!(out, "Who do you accuse? ")?;
    out.flush()?;

    let accused = input.next_line()?.unwrap_or_default();
    let verdict = game.accuse(&accused)?;

    writeln!(out)?;
    for exhibit in &verdict.evidence {
        match exhibit.suspect.as_deref() {
            Some(suspect) => writeln!(out, "  {} -> {}", exhibit.clue, suspect)?,
            None => writeln!(out, "  {} -> nobody", exhibit.clue)?,
        }
    }
    flush_messages(game, shown, out)?;
    Ok(verdict)
}

fn flush_messages<W: Write>(game: &Game, from: usize, out: &mut W) -> io::Result<usize> {
    for message in &game.message_log[from..] {
        writeln!(out, "{} {}", message.tone.symbol(), message.message)?;
    }
    Ok(game.message_log.len())
}

fn write_choices<W: Write>(game: &Game, out: &mut W) -> io::Result<()> {
    if game.exits().is_empty() && game.leaf_policy() == LeafPolicy::QuitOnly {
        writeln!(out, "A dead end. The only way on is out of the mansion.")?;
    }
    writeln!(out, "Choose your path:")?;
    for side in game.exits() {
        let label = match side {
            Side::Left => "Go left",
            Side::Right => "Go right",
        };
        writeln!(out, " ({}) {}", side.key(), label)?;
    }
    writeln!(out, " (s) Leave the mansion")?;
    write!(out, "Your choice: ")?;
    out.flush()
}
