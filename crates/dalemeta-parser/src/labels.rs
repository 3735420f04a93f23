use std::collections::BTreeMap;

use crate::errors::ParserError;

/// Channel-number to label mapping for one household, parsed from its
/// `labels.dat`. Iteration order is ascending channel number.
#[derive(Debug, Clone, Default)]
pub struct LabelTable {
    channels: BTreeMap<u32, String>,
}

impl LabelTable {
    /// Parses a label table: one `<channel> <label>` pair per line. The label
    /// is everything after the first space, trimmed of surrounding
    /// whitespace. Blank lines are ignored; anything else malformed is a
    /// hard error.
    pub fn parse(text: &str) -> Result<Self, ParserError> {
        let mut channels = BTreeMap::new();
        for (index, raw) in text.lines().enumerate() {
            let line = index + 1;
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                continue;
            }

            let (number, label) = trimmed.split_once(' ').ok_or_else(|| {
                ParserError::MalformedLabelRow {
                    line,
                    message: format!("expected '<channel> <label>', got '{trimmed}'"),
                }
            })?;
            let channel =
                number
                    .parse::<u32>()
                    .map_err(|err| ParserError::MalformedLabelRow {
                        line,
                        message: format!("channel '{number}' is not an integer: {err}"),
                    })?;
            let label = label.trim();
            if channels.insert(channel, label.to_string()).is_some() {
                return Err(ParserError::DuplicateChannel { line, channel });
            }
        }

        Ok(Self { channels })
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    pub fn get(&self, channel: u32) -> Option<&str> {
        self.channels.get(&channel).map(String::as_str)
    }

    /// Channels and labels in ascending channel order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.channels
            .iter()
            .map(|(channel, label)| (*channel, label.as_str()))
    }

    pub fn max_channel(&self) -> Option<u32> {
        self.channels.keys().next_back().copied()
    }

    pub fn contains_label(&self, label: &str) -> bool {
        self.channels.values().any(|candidate| candidate == label)
    }

    /// Reverse lookup. Exactly one channel must carry the label: zero matches
    /// indicate a stale appliance table or a data mismatch, and more than one
    /// cannot be resolved without guessing, so both are errors.
    pub fn channel_for_label(&self, label: &str) -> Result<u32, ParserError> {
        let matches: Vec<u32> = self
            .channels
            .iter()
            .filter(|(_, candidate)| candidate.as_str() == label)
            .map(|(channel, _)| *channel)
            .collect();

        match matches.as_slice() {
            [] => Err(ParserError::LabelNotFound {
                label: label.to_string(),
            }),
            [channel] => Ok(*channel),
            _ => Err(ParserError::AmbiguousLabel {
                label: label.to_string(),
                channels: matches,
            }),
        }
    }
}
