mod tic_tac_toe;
mod search;
mod game;

use std::io;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    let outcome = game::play(&mut input, &mut output)?;
    log::debug!("session finished with {:?}", outcome);

    Ok(())
}
