use bingo_core::codec;
use bingo_core::{
    BingoEvent, BingoEventBus, BingoEventHandler, detect_wins, generate_card, new_wins,
    validate_definition, validate_size,
};
use bingo_types::{BingoError, Card, CardDocument, CardId, GameDefinition, Win};
use rand::Rng;
use tracing::{debug, info, warn};

use crate::library::BingoLibrary;

/// Result of toggling one cell
#[derive(Debug, Clone, PartialEq)]
pub struct ToggleOutcome {
    /// New mark state, `None` when the cell could not be toggled
    pub marked: Option<bool>,
    /// Every win currently on the card
    pub wins: Vec<Win>,
    /// Wins that appeared with this toggle
    pub new_wins: Vec<Win>,
}

/// The single owner of the card being played
pub struct GameSession {
    library: BingoLibrary,
    game: GameDefinition,
    card_id: CardId,
    card: Card,
    wins: Vec<Win>,
    events: BingoEventBus,
}

impl GameSession {
    /// Open a game for play. Without an explicit card id the game's current
    /// card is resumed; if there is none a new card is dealt and becomes current.
    /// Games with an unsupported board size are refused before any card is dealt.
    pub async fn open<R: Rng + ?Sized>(
        library: &BingoLibrary,
        game_id: &str,
        card_id: Option<&str>,
        rng: &mut R,
    ) -> Result<Self, BingoError> {
        let game = library.game(game_id).await?;
        validate_size(game.size)?;
        if let Err(issue) = validate_definition(&game) {
            warn!(game_id = %game_id, %issue, "Playing a game that would not pass the editor");
        }

        let repo = library.repository();
        let card_id = match card_id.filter(|id| !id.is_empty()) {
            Some(id) => id.to_string(),
            None => match repo.current_card_id(game_id).await? {
                Some(id) => id,
                None => {
                    let id = library.mint_card_id(game_id, rng).await?;
                    repo.set_current_card_id(game_id, &id).await?;
                    id
                }
            },
        };

        let mut session = Self {
            library: library.clone(),
            game,
            card_id,
            card: Card::default(),
            wins: Vec::new(),
            events: BingoEventBus::new(),
        };

        match repo.card_state(game_id, &session.card_id).await? {
            Some(card) => {
                debug!(game_id = %game_id, card_id = %session.card_id, "Resuming card");
                session.card = card;
            }
            None => session.deal(rng).await?,
        }
        session.wins = detect_wins(&session.card, &session.game.victory_types);

        Ok(session)
    }

    async fn deal<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), BingoError> {
        self.card = generate_card(&self.game.words, self.game.size, self.game.free_center, rng);
        self.library
            .repository()
            .save_card_state(&self.game.id, &self.card_id, &self.card)
            .await?;

        info!(game_id = %self.game.id, card_id = %self.card_id, "Dealt new card");
        self.events.publish(BingoEvent::CardDealt {
            game_id: self.game.id.clone(),
            card_id: self.card_id.clone(),
        });
        Ok(())
    }

    pub fn add_handler(&mut self, handler: Box<dyn BingoEventHandler>) {
        self.events.add_handler(handler);
    }

    pub fn game(&self) -> &GameDefinition {
        &self.game
    }

    pub fn card(&self) -> &Card {
        &self.card
    }

    pub fn card_id(&self) -> &str {
        &self.card_id
    }

    pub fn wins(&self) -> &[Win] {
        &self.wins
    }

    /// Flip a cell and persist the card. Free cells and coordinates off the
    /// board leave the card untouched.
    pub async fn toggle(&mut self, row: usize, col: usize) -> Result<ToggleOutcome, BingoError> {
        let Some(marked) = self.card.toggle(row, col) else {
            debug!(row, col, "Ignoring toggle of a free or missing cell");
            return Ok(ToggleOutcome {
                marked: None,
                wins: self.wins.clone(),
                new_wins: Vec::new(),
            });
        };

        self.library
            .repository()
            .save_card_state(&self.game.id, &self.card_id, &self.card)
            .await?;

        let wins = detect_wins(&self.card, &self.game.victory_types);
        let fresh = new_wins(&self.wins, &wins);
        self.wins = wins;

        self.events.publish(BingoEvent::CellToggled {
            game_id: self.game.id.clone(),
            card_id: self.card_id.clone(),
            row,
            col,
            marked,
        });
        for win in &fresh {
            info!(game_id = %self.game.id, card_id = %self.card_id, ?win, "Bingo!");
            self.events.publish(BingoEvent::WinAchieved {
                game_id: self.game.id.clone(),
                card_id: self.card_id.clone(),
                win: *win,
            });
        }

        Ok(ToggleOutcome {
            marked: Some(marked),
            wins: self.wins.clone(),
            new_wins: fresh,
        })
    }

    /// Deal a new card under a new id and make it current. The old card stays stored.
    pub async fn regenerate<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<&Card, BingoError> {
        let card_id = self.library.mint_card_id(&self.game.id, rng).await?;
        self.library
            .repository()
            .set_current_card_id(&self.game.id, &card_id)
            .await?;
        let previous_card_id = std::mem::replace(&mut self.card_id, card_id);

        self.deal(rng).await?;
        self.wins = detect_wins(&self.card, &self.game.victory_types);

        self.events.publish(BingoEvent::CardRegenerated {
            game_id: self.game.id.clone(),
            previous_card_id,
            card_id: self.card_id.clone(),
        });
        Ok(&self.card)
    }

    pub fn export(&self) -> CardDocument {
        codec::export_card(&self.game, &self.card, &self.card_id)
    }

    pub fn export_json(&self) -> Result<String, BingoError> {
        codec::to_json(&self.export())
    }

    pub fn file_name(&self) -> String {
        codec::card_file_name(&self.game, &self.card_id)
    }
}
