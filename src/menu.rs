//! Selection navigation state machine.
//!
//! Drives the character -> option flow for a menu layer without any file
//! I/O. The terminal commit is the only side effect, handed back to the
//! caller as a [`MenuEffect`]; persisting the committed selection is the
//! caller's job.

use thiserror::Error;

use crate::catalog::CharacterCatalog;
use crate::selection::{
    Selection, BEST_MATCH, RANDOM_OUTFITS, RANDOM_OUTFITS_AND_EXPRESSIONS,
};

/// Navigation states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    #[default]
    Idle,
    AwaitingCharacter,
    AwaitingVariant,
}

/// Inputs the menu layer feeds into the flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuInput {
    Open,
    ChooseCharacter(String),
    ChooseOption(String),
    Cancel,
}

/// The only side effect the machine produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEffect {
    Commit { folder: String, selection: Selection },
}

/// Error type for invalid navigation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum MenuError {
    #[error("unknown character: {0}")]
    UnknownCharacter(String),
    #[error("'{option}' is not an option for {folder}")]
    UnknownOption { folder: String, option: String },
    #[error("input not valid in state {0:?}")]
    InvalidTransition(MenuState),
}

/// Options presented for a character: the three modes plus its outfit names.
pub fn options_for(characters: &CharacterCatalog, folder: &str) -> Vec<String> {
    let mut options = vec![
        BEST_MATCH.to_string(),
        RANDOM_OUTFITS.to_string(),
        RANDOM_OUTFITS_AND_EXPRESSIONS.to_string(),
    ];
    options.extend(characters.outfits(folder).iter().map(|o| o.name.clone()));
    options
}

/// State machine for choosing a character and a substitution option.
///
/// Transitions form a single explicit table over `(state, input)`; anything
/// not in the table is an [`MenuError::InvalidTransition`].
#[derive(Debug)]
pub struct SelectionFlow<'a> {
    state: MenuState,
    character: Option<String>,
    characters: &'a CharacterCatalog,
}

impl<'a> SelectionFlow<'a> {
    pub fn new(characters: &'a CharacterCatalog) -> Self {
        Self { state: MenuState::Idle, character: None, characters }
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    /// Apply one input, returning the commit effect on the terminal step.
    pub fn handle(&mut self, input: MenuInput) -> Result<Option<MenuEffect>, MenuError> {
        match (self.state, input) {
            (MenuState::Idle, MenuInput::Open) => {
                self.state = MenuState::AwaitingCharacter;
                Ok(None)
            }
            (MenuState::AwaitingCharacter, MenuInput::ChooseCharacter(folder)) => {
                if !self.characters.contains(&folder) {
                    return Err(MenuError::UnknownCharacter(folder));
                }
                self.character = Some(folder);
                self.state = MenuState::AwaitingVariant;
                Ok(None)
            }
            (MenuState::AwaitingVariant, MenuInput::ChooseOption(option)) => {
                let folder = match self.character.clone() {
                    Some(folder) => folder,
                    None => return Err(MenuError::InvalidTransition(self.state)),
                };
                // An unknown option leaves the flow in AwaitingVariant so the
                // menu layer can re-prompt.
                let selection = self.map_option(&folder, &option)?;
                self.character = None;
                self.state = MenuState::Idle;
                Ok(Some(MenuEffect::Commit { folder, selection }))
            }
            (_, MenuInput::Cancel) => {
                self.character = None;
                self.state = MenuState::Idle;
                Ok(None)
            }
            (state, _) => Err(MenuError::InvalidTransition(state)),
        }
    }

    /// Map a display option to a Selection value.
    fn map_option(&self, folder: &str, option: &str) -> Result<Selection, MenuError> {
        if option.eq_ignore_ascii_case(BEST_MATCH) {
            return Ok(Selection::BestMatch);
        }
        match option {
            RANDOM_OUTFITS => return Ok(Selection::RandomOutfits),
            RANDOM_OUTFITS_AND_EXPRESSIONS => return Ok(Selection::RandomOutfitsAndExpressions),
            _ => {}
        }
        self.characters
            .outfits(folder)
            .iter()
            .find(|o| o.name == option)
            .map(|o| Selection::Fixed { name: o.name.clone(), variant: o.variant.clone() })
            .ok_or_else(|| MenuError::UnknownOption {
                folder: folder.to_string(),
                option: option.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flow(characters: &CharacterCatalog) -> SelectionFlow<'_> {
        SelectionFlow::new(characters)
    }

    #[test]
    fn test_commit_fixed_outfit() {
        let characters = CharacterCatalog::builtin();
        let outfit = characters.outfits("satoko")[0].clone();
        let mut flow = flow(&characters);

        assert_eq!(flow.handle(MenuInput::Open).unwrap(), None);
        assert_eq!(flow.state(), MenuState::AwaitingCharacter);
        assert_eq!(
            flow.handle(MenuInput::ChooseCharacter("satoko".to_string())).unwrap(),
            None
        );
        assert_eq!(flow.state(), MenuState::AwaitingVariant);

        let effect = flow.handle(MenuInput::ChooseOption(outfit.name.clone())).unwrap();
        assert_eq!(
            effect,
            Some(MenuEffect::Commit {
                folder: "satoko".to_string(),
                selection: Selection::Fixed { name: outfit.name, variant: outfit.variant },
            })
        );
        assert_eq!(flow.state(), MenuState::Idle);
    }

    #[test]
    fn test_commit_mode_labels() {
        let characters = CharacterCatalog::builtin();
        for (label, expected) in [
            (BEST_MATCH, Selection::BestMatch),
            (RANDOM_OUTFITS, Selection::RandomOutfits),
            (RANDOM_OUTFITS_AND_EXPRESSIONS, Selection::RandomOutfitsAndExpressions),
        ] {
            let mut flow = flow(&characters);
            flow.handle(MenuInput::Open).unwrap();
            flow.handle(MenuInput::ChooseCharacter("rena".to_string())).unwrap();
            let effect = flow.handle(MenuInput::ChooseOption(label.to_string())).unwrap();
            assert_eq!(
                effect,
                Some(MenuEffect::Commit { folder: "rena".to_string(), selection: expected })
            );
        }
    }

    #[test]
    fn test_unknown_character_rejected() {
        let characters = CharacterCatalog::builtin();
        let mut flow = flow(&characters);
        flow.handle(MenuInput::Open).unwrap();

        let result = flow.handle(MenuInput::ChooseCharacter("nobody".to_string()));
        assert_eq!(result, Err(MenuError::UnknownCharacter("nobody".to_string())));
        assert_eq!(flow.state(), MenuState::AwaitingCharacter);
    }

    #[test]
    fn test_unknown_option_keeps_awaiting() {
        let characters = CharacterCatalog::builtin();
        let mut flow = flow(&characters);
        flow.handle(MenuInput::Open).unwrap();
        flow.handle(MenuInput::ChooseCharacter("mion".to_string())).unwrap();

        let result = flow.handle(MenuInput::ChooseOption("No Such Outfit".to_string()));
        assert!(matches!(result, Err(MenuError::UnknownOption { .. })));
        assert_eq!(flow.state(), MenuState::AwaitingVariant);

        // The flow can still commit after the bad option.
        let effect = flow.handle(MenuInput::ChooseOption(BEST_MATCH.to_string())).unwrap();
        assert!(effect.is_some());
    }

    #[test]
    fn test_cancel_resets_from_any_state() {
        let characters = CharacterCatalog::builtin();
        let mut flow = flow(&characters);
        flow.handle(MenuInput::Open).unwrap();
        flow.handle(MenuInput::ChooseCharacter("rika".to_string())).unwrap();

        assert_eq!(flow.handle(MenuInput::Cancel).unwrap(), None);
        assert_eq!(flow.state(), MenuState::Idle);
    }

    #[test]
    fn test_invalid_transition() {
        let characters = CharacterCatalog::builtin();
        let mut flow = flow(&characters);

        let result = flow.handle(MenuInput::ChooseOption(BEST_MATCH.to_string()));
        assert_eq!(result, Err(MenuError::InvalidTransition(MenuState::Idle)));
    }

    #[test]
    fn test_options_include_modes_and_outfits() {
        let characters = CharacterCatalog::builtin();
        let options = options_for(&characters, "satoko");
        assert_eq!(options[0], BEST_MATCH);
        assert_eq!(options[1], RANDOM_OUTFITS);
        assert_eq!(options[2], RANDOM_OUTFITS_AND_EXPRESSIONS);
        assert_eq!(options.len(), 3 + characters.outfits("satoko").len());
    }
}
