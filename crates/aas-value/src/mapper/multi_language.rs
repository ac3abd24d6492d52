//! Multi-language property mapper.

use crate::error::MappingError;
use crate::mapper::ValueMapper;
use crate::model::{LangString, MultiLanguageProperty};

/// Texts are read in stored order, duplicates included, and written by
/// replacing the whole sequence.
impl ValueMapper for MultiLanguageProperty {
    type Value = Vec<LangString>;

    fn value(&self) -> Vec<LangString> {
        self.value.clone()
    }

    fn check_value(&self, _value: &Vec<LangString>) -> Result<(), MappingError> {
        Ok(())
    }

    fn apply_value(&mut self, value: Vec<LangString>) {
        self.value = value;
    }
}
