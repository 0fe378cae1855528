use bingo_types::{CardId, GameId, Win};

#[derive(Debug, Clone, PartialEq)]
pub enum BingoEvent {
    CardDealt {
        game_id: GameId,
        card_id: CardId,
    },
    CellToggled {
        game_id: GameId,
        card_id: CardId,
        row: usize,
        col: usize,
        marked: bool,
    },
    WinAchieved {
        game_id: GameId,
        card_id: CardId,
        win: Win,
    },
    CardRegenerated {
        game_id: GameId,
        previous_card_id: CardId,
        card_id: CardId,
    },
}

impl BingoEvent {
    pub fn game_id(&self) -> &GameId {
        match self {
            BingoEvent::CardDealt { game_id, .. } => game_id,
            BingoEvent::CellToggled { game_id, .. } => game_id,
            BingoEvent::WinAchieved { game_id, .. } => game_id,
            BingoEvent::CardRegenerated { game_id, .. } => game_id,
        }
    }

    pub fn card_id(&self) -> &CardId {
        match self {
            BingoEvent::CardDealt { card_id, .. } => card_id,
            BingoEvent::CellToggled { card_id, .. } => card_id,
            BingoEvent::WinAchieved { card_id, .. } => card_id,
            BingoEvent::CardRegenerated { card_id, .. } => card_id,
        }
    }
}

/// Event handler trait for observing play
pub trait BingoEventHandler {
    fn handle_event(&mut self, event: BingoEvent);
}

/// Simple event bus for distributing play events
pub struct BingoEventBus {
    handlers: Vec<Box<dyn BingoEventHandler>>,
}

impl BingoEventBus {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn add_handler(&mut self, handler: Box<dyn BingoEventHandler>) {
        self.handlers.push(handler);
    }

    pub fn publish(&mut self, event: BingoEvent) {
        for handler in &mut self.handlers {
            handler.handle_event(event.clone());
        }
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }
}

impl Default for BingoEventBus {
    fn default() -> Self {
        Self::new()
    }
}
