//! REPL Commands
//!
//! Command registry and the handler behind each command.

use std::io::Write;

use rand::Rng;
use tracing::debug;

use crate::api::PokeApiClient;
use crate::error::{PokedexError, Result};
use crate::models::{CaughtPokemon, LocationAreaPage};
use crate::repl::Session;

/// What the REPL should do after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Every command the REPL understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Exit,
    Help,
    Map,
    MapBack,
    Explore,
    Catch,
    Inspect,
    Pokedex,
}

impl Command {
    /// All commands in the order `help` lists them.
    pub const ALL: [Command; 8] = [
        Command::Help,
        Command::Exit,
        Command::Map,
        Command::MapBack,
        Command::Explore,
        Command::Catch,
        Command::Inspect,
        Command::Pokedex,
    ];

    /// Looks up a command by the word typed at the prompt.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|cmd| cmd.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Command::Exit => "exit",
            Command::Help => "help",
            Command::Map => "map",
            Command::MapBack => "mapb",
            Command::Explore => "explore",
            Command::Catch => "catch",
            Command::Inspect => "inspect",
            Command::Pokedex => "pokedex",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Command::Exit => "Exit the Pokedex",
            Command::Help => "Displays a help message",
            Command::Map => "Display the next 20 locations",
            Command::MapBack => "Display the previous 20 locations",
            Command::Explore => "Explore a location area and list Pokémon",
            Command::Catch => "Attempt to catch a Pokémon by name",
            Command::Inspect => "Inspect a caught Pokémon's details",
            Command::Pokedex => "List all caught Pokémon",
        }
    }
}

/// Shared handles every command runs against
pub struct Context<'a, W, R> {
    pub client: &'a PokeApiClient,
    pub session: &'a mut Session,
    pub out: &'a mut W,
    pub rng: &'a mut R,
}

/// Runs one command with its arguments.
pub async fn execute<W: Write, R: Rng>(
    command: Command,
    args: &[String],
    ctx: &mut Context<'_, W, R>,
) -> Result<Flow> {
    debug!(command = command.name(), ?args, "executing command");
    match command {
        Command::Exit => command_exit(ctx),
        Command::Help => command_help(ctx).map(|_| Flow::Continue),
        Command::Map => command_map(ctx).await.map(|_| Flow::Continue),
        Command::MapBack => command_mapb(ctx).await.map(|_| Flow::Continue),
        Command::Explore => command_explore(ctx, args).await.map(|_| Flow::Continue),
        Command::Catch => command_catch(ctx, args).await.map(|_| Flow::Continue),
        Command::Inspect => command_inspect(ctx, args).map(|_| Flow::Continue),
        Command::Pokedex => command_pokedex(ctx).map(|_| Flow::Continue),
    }
}

fn command_exit<W: Write, R>(ctx: &mut Context<'_, W, R>) -> Result<Flow> {
    writeln!(ctx.out, "Closing the Pokedex... Goodbye!")?;
    Ok(Flow::Exit)
}

fn command_help<W: Write, R>(ctx: &mut Context<'_, W, R>) -> Result<()> {
    writeln!(ctx.out, "Welcome to the Pokedex!")?;
    writeln!(ctx.out, "Usage:")?;
    for command in Command::ALL {
        writeln!(ctx.out, "{}: {}", command.name(), command.description())?;
    }
    Ok(())
}

async fn command_map<W: Write, R>(ctx: &mut Context<'_, W, R>) -> Result<()> {
    let url = if !ctx.session.started {
        ctx.client.first_page_url()
    } else {
        match ctx.session.next.clone() {
            Some(url) => url,
            None => {
                writeln!(ctx.out, "you're on the last page")?;
                return Ok(());
            }
        }
    };
    show_page(ctx, &url).await
}

async fn command_mapb<W: Write, R>(ctx: &mut Context<'_, W, R>) -> Result<()> {
    let Some(url) = ctx.session.previous.clone() else {
        writeln!(ctx.out, "you're on the first page")?;
        return Ok(());
    };
    show_page(ctx, &url).await
}

async fn show_page<W: Write, R>(ctx: &mut Context<'_, W, R>, url: &str) -> Result<()> {
    let fetched = ctx.client.location_areas(url).await?;
    if fetched.from_cache {
        writeln!(ctx.out, "Using cached data")?;
    }

    let LocationAreaPage {
        next,
        previous,
        results,
        ..
    } = fetched.data;
    for area in &results {
        writeln!(ctx.out, "{}", area.name)?;
    }
    ctx.session.set_page(next, previous);
    Ok(())
}

async fn command_explore<W: Write, R>(ctx: &mut Context<'_, W, R>, args: &[String]) -> Result<()> {
    let area = args
        .first()
        .ok_or(PokedexError::MissingArgument("a location area to explore"))?;

    writeln!(ctx.out, "Exploring {}...", area)?;
    let fetched = ctx.client.location_area(area).await?;
    if fetched.from_cache {
        writeln!(ctx.out, "Using cached data")?;
    }

    let encounters = fetched.data.pokemon_encounters;
    if encounters.is_empty() {
        writeln!(ctx.out, "No Pokémon found in this area!")?;
        return Ok(());
    }

    writeln!(ctx.out, "Found Pokémon:")?;
    for encounter in &encounters {
        writeln!(ctx.out, " - {}", encounter.pokemon.name)?;
    }
    Ok(())
}

/// Probability of a catch: 100 / base experience, certain when it is missing or zero.
pub fn catch_chance(base_experience: Option<u32>) -> f64 {
    let base = base_experience.unwrap_or(0).max(1);
    100.0 / f64::from(base)
}

async fn command_catch<W: Write, R: Rng>(
    ctx: &mut Context<'_, W, R>,
    args: &[String],
) -> Result<()> {
    let name = args
        .first()
        .ok_or(PokedexError::MissingArgument("a Pokémon to catch"))?
        .to_lowercase();

    writeln!(ctx.out, "Throwing a Pokeball at {}...", name)?;
    let pokemon = ctx.client.pokemon(&name).await?.data;

    let chance = catch_chance(pokemon.base_experience);
    let roll: f64 = ctx.rng.gen();
    debug!(pokemon = %name, chance, roll, "catch roll");

    if roll < chance {
        ctx.session.pokedex.add(CaughtPokemon::from_response(&pokemon));
        writeln!(ctx.out, "{} was caught!", name)?;
        ctx.session.save()?;
    } else {
        writeln!(ctx.out, "{} escaped!", name)?;
    }
    Ok(())
}

fn command_inspect<W: Write, R>(ctx: &mut Context<'_, W, R>, args: &[String]) -> Result<()> {
    let name = args
        .first()
        .ok_or(PokedexError::MissingArgument("a Pokémon to inspect"))?;

    let Some(pokemon) = ctx.session.pokedex.get(name) else {
        writeln!(ctx.out, "you have not caught that Pokémon")?;
        return Ok(());
    };

    writeln!(ctx.out, "Name: {}", pokemon.name)?;
    writeln!(ctx.out, "Height: {}", pokemon.height)?;
    writeln!(ctx.out, "Weight: {}", pokemon.weight)?;
    writeln!(ctx.out, "Stats:")?;
    for stat in &pokemon.stats {
        writeln!(ctx.out, "  -{}: {}", stat.name, stat.value)?;
    }
    writeln!(ctx.out, "Types:")?;
    for kind in &pokemon.types {
        writeln!(ctx.out, "  - {}", kind)?;
    }
    Ok(())
}

fn command_pokedex<W: Write, R>(ctx: &mut Context<'_, W, R>) -> Result<()> {
    if ctx.session.pokedex.is_empty() {
        writeln!(ctx.out, "Your Pokedex is empty")?;
        return Ok(());
    }

    writeln!(ctx.out, "Your Pokedex:")?;
    for pokemon in ctx.session.pokedex.iter() {
        writeln!(ctx.out, " - {}", pokemon.name)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use chrono::Utc;
    use rand::rngs::mock::StepRng;
    use tokio_test::{assert_err, assert_ok};

    use crate::cache::Cache;
    use crate::models::StatValue;

    // Nothing listens on the discard port, so only cached URLs resolve
    fn offline_client() -> PokeApiClient {
        PokeApiClient::new(
            Cache::new(Duration::from_secs(60)),
            "http://127.0.0.1:9/api/v2",
            20,
            Duration::from_secs(1),
        )
        .unwrap()
    }

    async fn run(
        client: &PokeApiClient,
        session: &mut Session,
        rng: &mut StepRng,
        command: Command,
        args: &[&str],
    ) -> (Result<Flow>, String) {
        let mut out = Vec::new();
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        let result = {
            let mut ctx = Context {
                client,
                session,
                out: &mut out,
                rng,
            };
            execute(command, &args, &mut ctx).await
        };
        (result, String::from_utf8(out).unwrap())
    }

    fn always_low() -> StepRng {
        StepRng::new(0, 0)
    }

    fn always_high() -> StepRng {
        StepRng::new(u64::MAX, 0)
    }

    #[test]
    fn test_parse_every_command() {
        for command in Command::ALL {
            assert_eq!(Command::parse(command.name()), Some(command));
        }
        assert_eq!(Command::parse("mapb"), Some(Command::MapBack));
        assert_eq!(Command::parse("fly"), None);
    }

    #[test]
    fn test_catch_chance() {
        assert_eq!(catch_chance(Some(50)), 2.0);
        assert_eq!(catch_chance(Some(200)), 0.5);
        assert_eq!(catch_chance(Some(0)), 100.0);
        assert_eq!(catch_chance(None), 100.0);
    }

    #[tokio::test]
    async fn test_help_lists_every_command() {
        let client = offline_client();
        let mut session = Session::new();
        let (result, out) = run(&client, &mut session, &mut always_low(), Command::Help, &[]).await;

        assert_eq!(assert_ok!(result), Flow::Continue);
        let expected = [
            "Welcome to the Pokedex!",
            "Usage:",
            "help: Displays a help message",
            "exit: Exit the Pokedex",
            "map: Display the next 20 locations",
            "mapb: Display the previous 20 locations",
            "explore: Explore a location area and list Pokémon",
            "catch: Attempt to catch a Pokémon by name",
            "inspect: Inspect a caught Pokémon's details",
            "pokedex: List all caught Pokémon",
        ];
        assert_eq!(out.lines().collect::<Vec<_>>(), expected);
        assert!(!out.contains("\n\n"), "help output has a blank line: {:?}", out);
    }

    #[tokio::test]
    async fn test_exit_returns_exit_flow() {
        let client = offline_client();
        let mut session = Session::new();
        let (result, out) = run(&client, &mut session, &mut always_low(), Command::Exit, &[]).await;

        assert_eq!(assert_ok!(result), Flow::Exit);
        assert_eq!(out, "Closing the Pokedex... Goodbye!\n");
    }

    #[tokio::test]
    async fn test_mapb_on_first_page() {
        let client = offline_client();
        let mut session = Session::new();
        let (result, out) =
            run(&client, &mut session, &mut always_low(), Command::MapBack, &[]).await;

        assert_ok!(result);
        assert_eq!(out, "you're on the first page\n");
    }

    #[tokio::test]
    async fn test_map_uses_cached_page() {
        let client = offline_client();
        client.cache().store(
            client.first_page_url(),
            r#"{"count": 2, "next": "http://127.0.0.1:9/api/v2/location-area?offset=20&limit=20",
                "previous": null,
                "results": [{"name": "canalave-city-area", "url": ""},
                            {"name": "eterna-city-area", "url": ""}]}"#,
        );
        let mut session = Session::new();

        let (result, out) = run(&client, &mut session, &mut always_low(), Command::Map, &[]).await;

        assert_ok!(result);
        assert_eq!(out, "Using cached data\ncanalave-city-area\neterna-city-area\n");
        assert!(session.started);
        assert!(session.next.as_deref().unwrap().contains("offset=20"));
        assert!(session.previous.is_none());
    }

    #[tokio::test]
    async fn test_map_after_last_page() {
        let client = offline_client();
        let mut session = Session::new();
        session.set_page(None, Some("prev".to_string()));

        let (result, out) = run(&client, &mut session, &mut always_low(), Command::Map, &[]).await;

        assert_ok!(result);
        assert_eq!(out, "you're on the last page\n");
    }

    #[tokio::test]
    async fn test_explore_requires_argument() {
        let client = offline_client();
        let mut session = Session::new();
        let (result, _) =
            run(&client, &mut session, &mut always_low(), Command::Explore, &[]).await;

        let err = assert_err!(result);
        assert!(matches!(err, PokedexError::MissingArgument(_)));
    }

    #[tokio::test]
    async fn test_explore_empty_area() {
        let client = offline_client();
        client
            .cache()
            .store(client.location_area_url("empty-area"), r#"{"pokemon_encounters": []}"#);
        let mut session = Session::new();

        let (result, out) =
            run(&client, &mut session, &mut always_low(), Command::Explore, &["empty-area"]).await;

        assert_ok!(result);
        assert!(out.ends_with("No Pokémon found in this area!\n"));
    }

    #[tokio::test]
    async fn test_explore_network_failure_propagates() {
        let client = offline_client();
        let mut session = Session::new();

        let (result, out) =
            run(&client, &mut session, &mut always_low(), Command::Explore, &["somewhere"]).await;

        assert!(matches!(assert_err!(result), PokedexError::Http(_)));
        assert_eq!(out, "Exploring somewhere...\n");
    }

    #[tokio::test]
    async fn test_catch_success_and_escape() {
        let client = offline_client();
        client.cache().store(
            client.pokemon_url("mewtwo"),
            r#"{"name": "mewtwo", "height": 20, "weight": 1220, "base_experience": 340}"#,
        );
        let mut session = Session::new();

        let (result, out) =
            run(&client, &mut session, &mut always_high(), Command::Catch, &["MewTwo"]).await;
        assert_ok!(result);
        assert_eq!(out, "Throwing a Pokeball at mewtwo...\nmewtwo escaped!\n");
        assert!(!session.pokedex.contains("mewtwo"));

        let (result, out) =
            run(&client, &mut session, &mut always_low(), Command::Catch, &["mewtwo"]).await;
        assert_ok!(result);
        assert_eq!(out, "Throwing a Pokeball at mewtwo...\nmewtwo was caught!\n");
        assert!(session.pokedex.contains("mewtwo"));
    }

    #[tokio::test]
    async fn test_inspect_uncaught_and_caught() {
        let client = offline_client();
        let mut session = Session::new();

        let (result, out) =
            run(&client, &mut session, &mut always_low(), Command::Inspect, &["pidgey"]).await;
        assert_ok!(result);
        assert_eq!(out, "you have not caught that Pokémon\n");

        session.pokedex.add(CaughtPokemon {
            name: "pidgey".to_string(),
            height: 3,
            weight: 18,
            base_experience: Some(50),
            stats: vec![
                StatValue { name: "hp".to_string(), value: 40 },
                StatValue { name: "attack".to_string(), value: 45 },
            ],
            types: vec!["normal".to_string(), "flying".to_string()],
            caught_at: Utc::now(),
        });

        let (result, out) =
            run(&client, &mut session, &mut always_low(), Command::Inspect, &["pidgey"]).await;
        assert_ok!(result);
        assert_eq!(
            out,
            "Name: pidgey\nHeight: 3\nWeight: 18\n\
             Stats:\n  -hp: 40\n  -attack: 45\n\
             Types:\n  - normal\n  - flying\n"
        );
    }

    #[tokio::test]
    async fn test_pokedex_listing() {
        let client = offline_client();
        let mut session = Session::new();

        let (_, out) = run(&client, &mut session, &mut always_low(), Command::Pokedex, &[]).await;
        assert_eq!(out, "Your Pokedex is empty\n");

        client.cache().store(
            client.pokemon_url("abra"),
            r#"{"name": "abra", "height": 9, "weight": 195, "base_experience": 62}"#,
        );
        let (result, _) =
            run(&client, &mut session, &mut always_low(), Command::Catch, &["abra"]).await;
        assert_ok!(result);

        let (_, out) = run(&client, &mut session, &mut always_low(), Command::Pokedex, &[]).await;
        assert_eq!(out, "Your Pokedex:\n - abra\n");
    }
}
