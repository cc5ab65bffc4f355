use std::error::Error;
use std::str::FromStr;
use acquire_engine::ai::random_rollout;
use acquire_engine::{Acquire, Action, Options, PlayerId};
use rand::{thread_rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<(Option<u32>, Option<u64>), String> {
    let mut games: Option<u32> = None;
    let mut seed: Option<u64> = None;
    let mut it = args.into_iter();
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--games" => games = Some(parse_value(&arg, it.next())?),
            "--seed" => seed = Some(parse_value(&arg, it.next())?),
            _ => return Err(format!("unknown argument '{arg}'")),
        }
    }
    Ok((games, seed))
}

fn parse_value<T: FromStr>(flag: &str, value: Option<String>) -> Result<T, String> {
    let value = value.ok_or_else(|| format!("{flag} needs a value"))?;
    value.parse().map_err(|_| format!("invalid value '{value}' for {flag}"))
}

fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .init();

    let (games, seed) = parse_args(std::env::args().skip(1))?;
    let games = games.unwrap_or(100);
    let seed = seed.unwrap_or_else(|| thread_rng().next_u64());

    info!(games, seed, "starting self-play");

    let mut wins = vec![0u32; Options::default().num_players as usize];
    let mut total_steps = 0u64;

    for n in 0..games {
        let mut rng = ChaCha8Rng::seed_from_u64(seed.wrapping_add(n as u64));
        let game = Acquire::new(&mut rng, &Options::default())?;

        let game = random_rollout::<Acquire, Action, PlayerId, _>(&game, &mut rng)?;
        total_steps += game.step() as u64;

        let winners = game.winners();
        for player_id in &winners {
            wins[player_id.0 as usize] += 1;
        }

        debug!(
            game = n,
            turns = game.turn(),
            rankings = ?game.rankings(),
            "game finished"
        );
    }

    info!(
        ?wins,
        mean_steps = total_steps as f64 / games.max(1) as f64,
        "self-play finished"
    );

    Ok(())
}
