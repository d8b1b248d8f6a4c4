use evodeck_core::{
    describe_effects, Catalog, EffectKind, Event, EventBus, GameConfig, Phase, RunState,
    StageOutcome,
};
use evodeck_data::{
    default_data_dir, load_catalog_or_builtin, DeckDraft, DeckLibrary, FileScoreStore,
    DECKS_FILE, HIGH_SCORE_FILE,
};
use std::io::{self, Write};
use std::path::PathBuf;

const DEFAULT_RUN_SEED: u64 = 0xC0FFEE;
const AUTO_STAGE_LIMIT: u32 = 12;
const AUTO_STEP_LIMIT: usize = 5_000;

#[derive(Debug, Clone, Default)]
struct CliOptions {
    auto: bool,
    seed: Option<u64>,
    deck: Option<usize>,
    data_dir: Option<PathBuf>,
}

fn parse_cli_options(args: &[String]) -> CliOptions {
    let mut options = CliOptions::default();
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "--auto" => options.auto = true,
            "--seed" => {
                if let Some(value) = args.get(idx + 1) {
                    options.seed = value.parse::<u64>().ok();
                    idx += 1;
                }
            }
            "--deck" => {
                if let Some(value) = args.get(idx + 1) {
                    options.deck = value.parse::<usize>().ok();
                    idx += 1;
                }
            }
            "--data" => {
                if let Some(value) = args.get(idx + 1) {
                    options.data_dir = Some(PathBuf::from(value));
                    idx += 1;
                }
            }
            _ => {}
        }
        idx += 1;
    }
    options
}

struct Session {
    run: RunState,
    library: DeckLibrary,
    library_path: Option<PathBuf>,
    events: EventBus,
    draft: Option<DeckDraft>,
}

impl Session {
    fn build(options: &CliOptions) -> Result<Self, String> {
        let data_dir = options.data_dir.clone().or_else(default_data_dir);
        let catalog = match data_dir.as_deref() {
            Some(dir) => load_catalog_or_builtin(dir).map_err(|err| format!("{err:#}"))?,
            None => Catalog::builtin(),
        };
        let library_path = data_dir.as_ref().map(|dir| dir.join(DECKS_FILE));
        let mut library = match library_path.as_deref() {
            Some(path) => DeckLibrary::load_or_default(path),
            None => DeckLibrary::default(),
        };
        if let Some(index) = options.deck {
            library.select(index).map_err(|err| err.to_string())?;
        }
        let seed = options.seed.unwrap_or(DEFAULT_RUN_SEED);
        let mut run = RunState::new(GameConfig::default(), catalog, seed);
        if let Some(dir) = data_dir.as_ref() {
            run.set_score_store(Some(Box::new(FileScoreStore::new(dir.join(HIGH_SCORE_FILE)))));
        }
        Ok(Self {
            run,
            library,
            library_path,
            events: EventBus::default(),
            draft: None,
        })
    }

    /// Starts a game with the selected deck if it is playable.
    fn start_game(&mut self) -> bool {
        let deck = self.library.selected();
        if let Err(err) = DeckLibrary::validate(deck, &self.run.catalog, self.run.config.deck_size) {
            eprintln!("deck '{}' is not playable: {err}", deck.name);
            return false;
        }
        match self.run.start_new_game_from(&self.library, &mut self.events) {
            Ok(()) => true,
            Err(err) => {
                eprintln!("start error: {err}");
                false
            }
        }
    }

    /// Deck editing works on a draft. Only `save` touches the library, and it
    /// refuses decks that are not exactly the configured size.
    fn draft_command(&mut self, cmd: &str, args: &[&str]) -> Result<String, String> {
        if cmd == "edit" {
            let idx = parse_index(args, 0).ok_or("usage: edit <deck index>")?;
            let draft = self.library.edit(idx).map_err(|err| err.to_string())?;
            let message = format!("editing '{}' ({} cards)", draft.deck().name, draft.total_cards());
            self.draft = Some(draft);
            return Ok(message);
        }
        let deck_size = self.run.config.deck_size;
        let draft = self.draft.as_mut().ok_or("no deck is being edited (try 'edit <idx>')")?;
        match cmd {
            "add" | "remove" => {
                let id = args.first().ok_or("usage: add|remove <card id> [count]")?;
                let amount = args
                    .get(1)
                    .and_then(|value| value.parse::<i32>().ok())
                    .unwrap_or(1);
                let sign = if cmd == "add" { 1 } else { -1 };
                let count = draft
                    .change_card_count(id, sign * amount, &self.run.catalog)
                    .map_err(|err| err.to_string())?;
                Ok(format!("{id}: {count} (deck {}/{deck_size})", draft.total_cards()))
            }
            "name" => {
                draft.rename(&args.join(" "));
                Ok(format!("draft name: {}", draft.deck().name))
            }
            "save" => {
                let draft = draft.clone();
                let idx = draft.index();
                self.library
                    .commit(draft, &self.run.catalog, deck_size)
                    .map_err(|err| format!("not saved: {err}"))?;
                self.draft = None;
                self.persist_library();
                Ok(format!("saved: {}", self.library.decks()[idx].name))
            }
            "cancel" => {
                self.draft = None;
                Ok("edit cancelled".to_string())
            }
            _ => Err(format!("unknown command: {cmd}")),
        }
    }

    fn persist_library(&self) {
        let Some(path) = self.library_path.as_deref() else {
            return;
        };
        if let Err(err) = self.library.save(path) {
            eprintln!("deck library not saved: {err:#}");
        }
    }
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = parse_cli_options(&args);
    let mut session = match Session::build(&options) {
        Ok(session) => session,
        Err(err) => {
            eprintln!("load error: {err}");
            std::process::exit(1);
        }
    };
    if options.auto {
        run_auto(&mut session);
        return;
    }
    run_repl(&mut session);
}

fn run_auto(session: &mut Session) {
    println!("seed: {}", session.run.rng.seed());
    if !session.start_game() {
        std::process::exit(1);
    }
    drain_events(&mut session.events);
    for _ in 0..AUTO_STEP_LIMIT {
        let run = &mut session.run;
        if run.is_game_over() || run.state.stage > AUTO_STAGE_LIMIT {
            break;
        }
        let result = match run.state.phase {
            Phase::Evolution => run.select_evolution(0, &mut session.events).map(|_| ()),
            Phase::AwaitingPlay => {
                let idx = pick_auto_card(run);
                match run.play_card(idx, &mut session.events) {
                    Ok(Some(_)) => Ok(()),
                    Ok(None) => {
                        run.end_turn_manually(&mut session.events);
                        Ok(())
                    }
                    Err(err) => Err(err),
                }
            }
            _ => break,
        };
        drain_events(&mut session.events);
        if let Err(err) = result {
            eprintln!("run error: {err}");
            break;
        }
    }
    print_summary(&session.run);
}

/// Greedy choice: set up a multiplier or free plays first, then take the
/// biggest immediate score.
fn pick_auto_card(run: &RunState) -> usize {
    let snapshot = run.snapshot();
    if snapshot.hand.len() > 1 {
        let setup = snapshot.hand.iter().position(|card| {
            card.effects.iter().any(|effect| {
                matches!(
                    effect.kind,
                    EffectKind::ScoreMultiplier | EffectKind::CostIgnore
                )
            })
        });
        if let Some(idx) = setup {
            return idx;
        }
    }
    snapshot
        .hand
        .iter()
        .max_by_key(|card| {
            card.effects
                .iter()
                .filter(|effect| matches!(effect.kind, EffectKind::Score | EffectKind::PurgeSelf))
                .map(|effect| effect.value)
                .sum::<i64>()
        })
        .map(|card| card.index)
        .unwrap_or(0)
}

fn run_repl(session: &mut Session) {
    print_help();
    if session.start_game() {
        drain_events(&mut session.events);
        print_state(&session.run);
        print_hand(&session.run);
    }
    loop {
        let Some(line) = read_line(&prompt_text(&session.run)) else {
            break;
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");
        let args: Vec<&str> = parts.collect();
        match cmd {
            "help" | "h" | "?" => print_help(),
            "quit" | "exit" | "q" => break,
            "state" | "s" => print_state(&session.run),
            "hand" => print_hand(&session.run),
            "evo" | "evolution" => print_evolution(&session.run),
            "cards" => print_catalog(&session.run.catalog),
            "json" => match serde_json::to_string_pretty(&session.run.snapshot()) {
                Ok(body) => println!("{body}"),
                Err(err) => eprintln!("snapshot error: {err}"),
            },
            "play" | "p" => {
                let Some(idx) = parse_index(&args, 0) else {
                    println!("usage: play <hand index>");
                    continue;
                };
                match session.run.play_card(idx, &mut session.events) {
                    Ok(Some(report)) => {
                        drain_events(&mut session.events);
                        after_action(&session.run, report.outcome);
                    }
                    Ok(None) => println!("nothing to play at {idx}"),
                    Err(err) => eprintln!("play error: {err}"),
                }
            }
            "end" | "e" => {
                let outcome = session.run.end_turn_manually(&mut session.events);
                drain_events(&mut session.events);
                after_action(&session.run, outcome);
            }
            "evolve" | "v" => {
                let Some(idx) = parse_index(&args, 0) else {
                    println!("usage: evolve <candidate index>");
                    continue;
                };
                match session.run.select_evolution(idx, &mut session.events) {
                    Ok(Some(evolved)) => {
                        drain_events(&mut session.events);
                        println!("{} is now Lv.{}", evolved.definition_id, evolved.level + 1);
                        after_action(&session.run, None);
                    }
                    Ok(None) => println!("no evolution candidate at {idx}"),
                    Err(err) => eprintln!("evolve error: {err}"),
                }
            }
            "new" | "n" => {
                if session.start_game() {
                    drain_events(&mut session.events);
                    print_state(&session.run);
                    print_hand(&session.run);
                }
            }
            "decks" | "d" => print_decks(&session.library),
            "deck" => {
                let idx = parse_index(&args, 0).unwrap_or(session.library.selected_index());
                match session.library.deck(idx) {
                    Ok(deck) => print_deck(deck, &session.run),
                    Err(err) => println!("{err}"),
                }
            }
            "select" => deck_command(session, &args, |library, args| {
                let idx = parse_index(args, 0).ok_or("usage: select <deck index>")?;
                library.select(idx).map_err(|err| err.to_string())?;
                Ok(format!("selected: {}", library.selected().name))
            }),
            "create" => deck_command(session, &args, |library, args| {
                let idx = library.create(&args.join(" "));
                Ok(format!("created deck {idx}"))
            }),
            "copy" => deck_command(session, &args, |library, args| {
                let idx = parse_index(args, 0).ok_or("usage: copy <deck index>")?;
                let new_idx = library.copy(idx).map_err(|err| err.to_string())?;
                Ok(format!("copied to deck {new_idx}"))
            }),
            "delete" => deck_command(session, &args, |library, args| {
                let idx = parse_index(args, 0).ok_or("usage: delete <deck index>")?;
                let removed = library.delete(idx).map_err(|err| err.to_string())?;
                Ok(format!("deleted: {}", removed.name))
            }),
            "rename" => deck_command(session, &args, |library, args| {
                let idx = parse_index(args, 0).ok_or("usage: rename <deck index> <name>")?;
                library
                    .rename(idx, &args[1..].join(" "))
                    .map_err(|err| err.to_string())?;
                Ok(format!("renamed: {}", library.decks()[idx].name))
            }),
            "edit" | "add" | "remove" | "name" | "save" | "cancel" => {
                match session.draft_command(cmd, &args) {
                    Ok(message) => println!("{message}"),
                    Err(err) => println!("{err}"),
                }
            }
            _ => println!("unknown command: {cmd} (try 'help')"),
        }
    }
}

/// Runs a deck library edit and saves the library if it succeeded.
fn deck_command<F>(session: &mut Session, args: &[&str], edit: F)
where
    F: FnOnce(&mut DeckLibrary, &[&str]) -> Result<String, String>,
{
    match edit(&mut session.library, args) {
        Ok(message) => {
            println!("{message}");
            session.persist_library();
        }
        Err(err) => println!("{err}"),
    }
}

fn after_action(run: &RunState, outcome: Option<StageOutcome>) {
    match outcome {
        Some(StageOutcome::Cleared) => println!("stage cleared"),
        Some(StageOutcome::GameOver) => {
            println!("game over, type 'new' to play again");
            print_summary(run);
            return;
        }
        None => {}
    }
    match run.state.phase {
        Phase::Evolution => print_evolution(run),
        Phase::AwaitingPlay => {
            print_state(run);
            print_hand(run);
        }
        _ => {}
    }
}

fn read_line(prompt: &str) -> Option<String> {
    print!("{prompt}");
    let _ = io::stdout().flush();
    let mut line = String::new();
    if io::stdin().read_line(&mut line).ok()? == 0 {
        return None;
    }
    Some(line.trim_end_matches(&['\n', '\r'][..]).to_string())
}

fn prompt_text(run: &RunState) -> String {
    match run.state.phase {
        Phase::Evolution => format!("[stage {} evolve {}] > ", run.state.stage, run.state.evolution.remaining),
        Phase::AwaitingPlay => format!(
            "[stage {} {}/{} uses {}] > ",
            run.state.stage,
            run.state.score,
            run.state.target,
            run.state.uses_remaining()
        ),
        _ => "> ".to_string(),
    }
}

fn parse_index(args: &[&str], pos: usize) -> Option<usize> {
    args.get(pos)?.parse::<usize>().ok()
}

fn print_help() {
    println!("commands:");
    println!("  state | s             show stage, score and piles");
    println!("  hand                  show the hand");
    println!("  play | p <idx>        play a hand card");
    println!("  end | e               end the turn");
    println!("  evolve | v <idx>      pick an evolution candidate");
    println!("  evo                   show evolution candidates");
    println!("  new | n               start a new game with the selected deck");
    println!("  json                  dump the round snapshot");
    println!("  cards                 list the card catalog");
    println!("  decks | d             list decks");
    println!("  deck [idx]            show a deck");
    println!("  select <idx>          select the deck for the next game");
    println!("  create [name]         create a deck from the starter list");
    println!("  copy <idx>            copy a deck");
    println!("  delete <idx>          delete a deck");
    println!("  rename <idx> <name>   rename a deck");
    println!("  edit <idx>            start editing a deck");
    println!("  add <id> [n]          add cards to the edited deck");
    println!("  remove <id> [n]       remove cards from the edited deck");
    println!("  name <name>           rename the edited deck");
    println!("  save                  save the edited deck (must be full size)");
    println!("  cancel                drop the edited deck");
    println!("  quit | q              exit");
}

fn print_state(run: &RunState) {
    let state = &run.state;
    println!("== Stage {} ({:?}) ==", state.stage, state.phase);
    println!(
        "Score {}/{} | High {} | Uses {}/{}",
        state.score,
        state.target,
        state.high_score,
        state.uses_remaining(),
        state.max_uses_per_turn
    );
    println!(
        "Multiplier x{} | Free plays {} | Draw {} | Discard {} | Cards {} (purged {})",
        state.pending_multiplier,
        state.pending_cost_ignore,
        run.deck.draw.len(),
        run.deck.discard.len(),
        run.master.len(),
        state.purged
    );
}

fn print_hand(run: &RunState) {
    let snapshot = run.snapshot();
    println!("== Hand ({} cards) ==", snapshot.hand.len());
    for card in &snapshot.hand {
        println!(
            "{:>4}  {:<20} Lv.{}/{}  {}",
            card.index,
            card.name,
            card.level + 1,
            card.max_level + 1,
            card.text
        );
    }
}

fn print_evolution(run: &RunState) {
    let snapshot = run.snapshot();
    if !snapshot.evolution.active {
        println!("no evolution in progress");
        return;
    }
    println!("== Evolution ({} picks left) ==", snapshot.evolution.remaining);
    for candidate in &snapshot.evolution.candidates {
        println!(
            "{:>4}  {:<20} Lv.{} -> Lv.{}  {}  =>  {}",
            candidate.index,
            candidate.name,
            candidate.level + 1,
            candidate.level + 2,
            candidate.text,
            candidate.next_text
        );
    }
}

fn print_summary(run: &RunState) {
    println!(
        "stage {} | score {}/{} | high score {} | phase {:?}",
        run.state.stage, run.state.score, run.state.target, run.state.high_score, run.state.phase
    );
}

fn print_catalog(catalog: &Catalog) {
    println!("== Cards ==");
    for def in catalog.definitions() {
        println!(
            "{:<16} {:<20} {:?} max Lv.{}  {}",
            def.id,
            def.name,
            def.category,
            def.max_level() + 1,
            describe_effects(def, def.starting_level())
        );
    }
}

fn print_decks(library: &DeckLibrary) {
    println!("== Decks ==");
    for (idx, deck) in library.decks().iter().enumerate() {
        let marker = if idx == library.selected_index() { "*" } else { " " };
        println!("{marker}{idx:>3}  {} ({} cards)", deck.name, deck.total_cards());
    }
}

fn print_deck(deck: &evodeck_core::DeckConfig, run: &RunState) {
    println!("== {} ({}/{} cards) ==", deck.name, deck.total_cards(), run.config.deck_size);
    for entry in &deck.cards {
        let name = run
            .catalog
            .get(&entry.id)
            .map(|def| def.name.as_str())
            .unwrap_or("?");
        println!("{:>4}x  {:<16} {}", entry.count, entry.id, name);
    }
}

fn drain_events(events: &mut EventBus) {
    for event in events.drain() {
        println!("event: {}", format_event(&event));
    }
}

fn format_event(event: &Event) -> String {
    match event {
        Event::GameStarted {
            deck,
            cards,
            high_score,
        } => format!("game started: {deck} ({cards} cards) high score {high_score}"),
        Event::StageStarted { stage, target } => {
            format!("stage started: {stage} target {target}")
        }
        Event::TurnStarted { stage, hand } => format!("turn started: stage {stage} hand {hand}"),
        Event::CardsDrawn { count } => format!("drew {count} cards"),
        Event::DiscardReshuffled { count } => {
            format!("discard reshuffled: {count} cards back in the draw pile")
        }
        Event::CardPlayed {
            instance,
            definition,
            level,
            cost_ignored,
        } => format!(
            "played {definition} {instance} Lv.{}{}",
            level + 1,
            if *cost_ignored { " (free)" } else { "" }
        ),
        Event::EffectApplied {
            kind,
            base,
            applied,
        } => {
            if base == applied {
                format!("effect {kind:?}: {applied}")
            } else {
                format!("effect {kind:?}: {base} -> {applied}")
            }
        }
        Event::MultiplierPending { multiplier } => format!("next card x{multiplier}"),
        Event::CardPurged {
            instance,
            definition,
        } => format!("purged {definition} {instance}"),
        Event::CardsRetrieved { count } => format!("retrieved {count} cards from discard"),
        Event::CardsDiscarded { count } => format!("discarded {count} cards from hand"),
        Event::StageCleared {
            stage,
            score,
            target,
        } => format!("stage {stage} cleared: {score}/{target}"),
        Event::EvolutionOffered {
            remaining,
            candidates,
        } => format!(
            "evolution offered ({remaining} left): {}",
            candidates.join(", ")
        ),
        Event::CardEvolved {
            instance,
            definition,
            level,
        } => format!("evolved {definition} {instance} to Lv.{}", level + 1),
        Event::EvolutionSkipped { stage } => {
            format!("evolution skipped after stage {stage}: nothing can evolve")
        }
        Event::HighScore { score } => format!("new high score: {score}"),
        Event::GameOver {
            stage,
            score,
            high_score,
        } => format!("game over at stage {stage}: score {score} high score {high_score}"),
    }
}
