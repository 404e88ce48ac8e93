use crate::error::{Result, SearchError};
use crate::stop_words::StopWordSet;
use crate::tokenizer::{is_valid_word, split_into_words};
use std::collections::BTreeSet;

/// Parsed retrieval query. Plus words contribute relevance; a document
/// containing any minus word is excluded outright. Both sets borrow from the
/// raw query text and are deduplicated by construction.
#[derive(Debug, Default)]
pub(crate) struct Query<'a> {
    pub plus_words: BTreeSet<&'a str>,
    pub minus_words: BTreeSet<&'a str>,
}

enum QueryWord<'a> {
    Plus(&'a str),
    Minus(&'a str),
    Stop,
}

impl<'a> Query<'a> {
    pub fn parse(text: &'a str, stop_words: &StopWordSet) -> Result<Self> {
        let mut query = Query::default();
        for token in split_into_words(text) {
            match parse_query_word(token, stop_words)? {
                QueryWord::Plus(word) => {
                    query.plus_words.insert(word);
                }
                QueryWord::Minus(word) => {
                    query.minus_words.insert(word);
                }
                QueryWord::Stop => {}
            }
        }
        Ok(query)
    }
}

fn parse_query_word<'a>(token: &'a str, stop_words: &StopWordSet) -> Result<QueryWord<'a>> {
    if token.chars().all(|c| c == ' ') {
        return Err(SearchError::EmptyQueryWord);
    }
    let (word, is_minus) = match token.strip_prefix('-') {
        Some(rest) => (rest, true),
        None => (token, false),
    };
    if word.is_empty() {
        // lone "-"
        return Err(SearchError::EmptyQueryWord);
    }
    if word.starts_with('-') || !is_valid_word(word) {
        return Err(SearchError::InvalidQueryWord(token.to_string()));
    }
    if stop_words.contains(word) {
        Ok(QueryWord::Stop)
    } else if is_minus {
        Ok(QueryWord::Minus(word))
    } else {
        Ok(QueryWord::Plus(word))
    }
}
