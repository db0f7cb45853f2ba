use crate::config::Difficulty;
use crate::error::EngineError;
use include_dir::{include_dir, Dir};
use serde::Deserialize;

static WORDS_DIR: Dir = include_dir!("src/words");

/// One embedded word pool. Each difficulty tier has its own JSON file
/// compiled into the binary.
#[derive(Deserialize, Clone, Debug)]
pub struct WordList {
    pub name: String,
    pub size: u32,
    pub words: Vec<String>,
}

impl WordList {
    pub fn load(difficulty: Difficulty) -> Result<Self, EngineError> {
        let file_name = format!("{difficulty}.json");
        let file = WORDS_DIR
            .get_file(&file_name)
            .ok_or_else(|| EngineError::WordListMissing(file_name.clone()))?;
        let text = file
            .contents_utf8()
            .ok_or_else(|| EngineError::WordListMissing(file_name.clone()))?;
        let list: WordList = serde_json::from_str(text)
            .map_err(|e| EngineError::WordListInvalid(file_name, e))?;
        if list.words.is_empty() {
            return Err(EngineError::EmptyWordPool(list.name));
        }
        Ok(list)
    }
}
