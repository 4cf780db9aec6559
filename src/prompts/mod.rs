//! LLM prompts for self-instruct generation.
//!
//! [`self_instruct`] holds the fixed system and requirements prompts and the
//! [`PromptBuilder`] that renders a random sample of examples into each request.
//!
//! ```no_run
//! use instruct_forge::dataset::InstructionRecord;
//! use instruct_forge::prompts::PromptBuilder;
//!
//! let pool = vec![
//!     InstructionRecord::new("Give three tips for staying healthy.", "", "Eat well."),
//!     InstructionRecord::new("Translate the sentence to French.", "Hello", "Bonjour"),
//!     InstructionRecord::new("Name a primary color.", "", "Red"),
//! ];
//! let mut builder = PromptBuilder::new().with_seed(42);
//! let messages = builder.build(&pool).expect("pool is large enough");
//! assert_eq!(messages.len(), 3);
//! ```

pub mod self_instruct;

pub use self_instruct::{
    normalize_instruction, PromptBuilder, DEFAULT_REQUESTED_EXAMPLES, DEFAULT_SAMPLE_SIZE,
    NO_INPUT_MARKER, SYSTEM_PROMPT, TASK_DELIMITER, TASK_REQUIREMENTS,
};
