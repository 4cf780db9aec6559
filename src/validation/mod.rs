//! Validation of generated instructions before they enter the dataset.

pub mod instruction_validator;

pub use instruction_validator::{
    find_blacklisted, normalize_candidate, InstructionValidator, Rejection, MAX_WORDS, MIN_WORDS_EXCLUSIVE,
    MODALITY_BLACKLIST,
};
