use std::io::{BufRead, Write};

use anyhow::{Context, Result, bail};
use log::{debug, info};

use crate::search::Minimax;
use crate::tic_tac_toe::{Move, Outcome, Player, TicTacToe};

fn read_line<R: BufRead>(input: &mut R) -> Result<String> {
    let mut line = String::new();
    let read = input.read_line(&mut line).context("Failed to read input")?;
    if read == 0 {
        bail!("Input closed before the game ended");
    }
    Ok(line)
}

fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, text: &str) -> Result<String> {
    write!(output, "{}", text)?;
    output.flush()?;
    read_line(input)
}

fn choose_player<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Player> {
    let mut answer = prompt(input, output, "Do you want to be X or O? ")?;
    loop {
        match answer.trim().to_ascii_uppercase().as_str() {
            "X" => return Ok(Player::X),
            "O" => return Ok(Player::O),
            _ => answer = prompt(input, output, "Choose X or O: ")?,
        }
    }
}

/// Runs one human-vs-AI game over the given streams and returns how it ended.
pub(crate) fn play<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Outcome> {
    let human = choose_player(input, output)?;
    let ai = human.opponent();
    info!("new game: human plays {}, AI plays {}", human, ai);

    let mut board = TicTacToe::new();
    let mut search = Minimax::new();
    let mut turn = Player::X;

    loop {
        write!(output, "{}", board)?;

        let outcome = board.outcome();
        if outcome.is_over() {
            match outcome.winner() {
                Some(winner) => writeln!(output, "{} wins!", winner)?,
                None => writeln!(output, "It's a draw!")?,
            }
            info!("game over: {:?}", outcome);
            return Ok(outcome);
        }

        if turn == human {
            let line = prompt(input, output, "Your move (row and column, from 0 to 2): ")?;
            let mv = match Move::parse(&line) {
                Ok(mv) => mv,
                Err(err) => {
                    debug!("rejected human input {:?}: {}", line.trim(), err);
                    writeln!(output, "Invalid input. Enter two numbers from 0 to 2.")?;
                    continue;
                }
            };
            if let Err(err) = board.place(mv, human) {
                debug!("rejected human move: {}", err);
                writeln!(output, "Position already taken. Try again.")?;
                continue;
            }
            turn = ai;
        } else {
            writeln!(output, "AI is thinking...")?;
            let mv = search
                .best_move(&mut board, ai)
                .context("AI asked to move on a full board")?;
            debug!("AI plays {} ({:?})", mv, search.stats());
            board.apply(mv, ai);
            turn = human;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    // A human who tries every cell in row-major order, over and over.
    fn first_free_cell_script(prefix: &str) -> String {
        let mut script = String::from(prefix);
        for _ in 0..5 {
            for i in 0..9 {
                script.push_str(&format!("{} {}\n", i / 3, i % 3));
            }
        }
        script
    }

    fn run(script: &str) -> (Result<Outcome>, String) {
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut output = Vec::new();
        let result = play(&mut input, &mut output);
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_ai_punishes_edge_reply() {
        // AI opens in the corner and the human answers on the adjacent edge.
        let (result, output) = run(&first_free_cell_script("o\n"));
        assert_eq!(result.unwrap(), Outcome::WinX);
        assert!(output.contains("X wins!"));
        assert!(output.contains("AI is thinking..."));
        assert!(output.contains("Position already taken. Try again."));
    }

    #[test]
    fn test_human_as_x_cannot_win() {
        let (result, output) = run(&first_free_cell_script("z\n\nx\n"));
        let outcome = result.unwrap();
        assert_ne!(outcome, Outcome::WinX);
        assert_eq!(output.matches("Choose X or O: ").count(), 2);
        assert!(output.ends_with("It's a draw!\n") || output.ends_with("O wins!\n"));
    }

    #[test]
    fn test_bad_input_is_reprompted() {
        let (result, output) = run("o\n9 9\nabc\n0 0\n");
        assert!(result.is_err());
        assert_eq!(output.matches("Invalid input. Enter two numbers from 0 to 2.").count(), 2);
        assert!(output.contains("Position already taken. Try again."));
        assert!(output.contains("AI is thinking...\nX |   |  \n"));
    }

    #[test]
    fn test_closed_input_is_an_error() {
        let (result, _) = run("");
        assert!(result.is_err());
    }
}
